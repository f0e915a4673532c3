//! Typed maud renderings of backend data. Handlers decide *what* to show, these
//! decide how it looks.

pub mod dashboard;
pub mod form;
pub mod students;
