use serde::Deserialize;

pub mod envelope;
pub mod page;
pub mod stats;
pub mod student;

/// Navigation context for the student form: `?id=` means edit, nothing means create.
#[derive(Deserialize, Debug, Default)]
pub struct IdQuery {
    pub id: Option<String>,
}
