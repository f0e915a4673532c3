use crate::error::{ParseStudentIdSnafu, RegistrarError, RegistrarResult};
use jiff::civil::Date;
use maud::{Markup, Render, html};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Backend-assigned identifier. Only ever parsed from something the backend
/// (or a link the console rendered from backend data) handed us.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i64);

impl StudentId {
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn parse(original: &str) -> RegistrarResult<Self> {
        original
            .trim()
            .parse()
            .map(Self)
            .context(ParseStudentIdSnafu { original })
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentStatus {
    Active,
    Inactive,
}

impl StudentStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl Display for StudentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = RegistrarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(RegistrarError::UnknownStatus {
                provided: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub address: String,
    pub course: String,
    pub year: u32,
    pub status: StudentStatus,
    #[serde(default)]
    pub enrollment_date: Option<Date>,
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age_on(&self, today: Date) -> i16 {
        age_on(self.date_of_birth, today)
    }
}

impl Render for StudentRecord {
    fn render(&self) -> Markup {
        html! {
            (self.first_name) " " (self.last_name)
        }
    }
}

/// What the backend accepts for a create or an update: everything apart from
/// the fields it owns (ID and enrollment date).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub address: String,
    pub course: String,
    pub year: u32,
    pub status: StudentStatus,
}

/// Full years elapsed, so the birthday itself already counts.
pub fn age_on(date_of_birth: Date, today: Date) -> i16 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}
