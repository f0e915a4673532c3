use crate::{
    data::student::{StudentRecord, StudentStatus},
    error::RegistrarError,
};
use email_address::EmailAddress;
use jiff::civil::Date;
use serde::Deserialize;
use std::str::FromStr;

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];
pub const COURSES: [&str; 6] = [
    "Computer Science",
    "Information Technology",
    "Electrical Engineering",
    "Electronics Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
];
pub const YEARS: std::ops::RangeInclusive<u32> = 1..=6;
pub const PHONE_DIGITS: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    Course,
    Year,
    Status,
}

impl Field {
    pub const ALL: [Self; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::DateOfBirth,
        Self::Gender,
        Self::Address,
        Self::Course,
        Self::Year,
        Self::Status,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DateOfBirth => "date_of_birth",
            Self::Gender => "gender",
            Self::Address => "address",
            Self::Course => "course",
            Self::Year => "year",
            Self::Status => "status",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::DateOfBirth => "Date of Birth",
            Self::Gender => "Gender",
            Self::Address => "Address",
            Self::Course => "Course",
            Self::Year => "Year",
            Self::Status => "Status",
        }
    }

    /// Everything but the status, which only exists in edit mode.
    pub fn always_shown() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|field| *field != Self::Status)
    }

    pub fn check(self, value: &str, today: Date) -> Result<(), &'static str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("This field is required");
        }

        match self {
            Self::FirstName | Self::LastName => {
                let len = trimmed.chars().count();
                if !(2..=50).contains(&len) {
                    return Err("Must be between 2 and 50 characters");
                }
            }
            Self::Email => {
                if !EmailAddress::is_valid(trimmed) {
                    return Err("Please enter a valid email address");
                }
            }
            Self::Phone => {
                let digits = normalize_phone(trimmed);
                if digits.len() != PHONE_DIGITS {
                    return Err("Phone number must be 10 digits");
                }
            }
            Self::DateOfBirth => match trimmed.parse::<Date>() {
                Ok(dob) if dob > today => return Err("Date of birth cannot be in the future"),
                Ok(_) => {}
                Err(_) => return Err("Please enter a valid date"),
            },
            Self::Gender => {
                if !GENDERS.contains(&trimmed) {
                    return Err("Please select a gender");
                }
            }
            Self::Address => {
                if trimmed.chars().count() > 200 {
                    return Err("Address must be at most 200 characters");
                }
            }
            Self::Course => {}
            Self::Year => {
                if !trimmed.parse::<u32>().is_ok_and(|year| YEARS.contains(&year)) {
                    return Err("Year must be between 1 and 6");
                }
            }
            Self::Status => {
                if trimmed.parse::<StudentStatus>().is_err() {
                    return Err("Please select a status");
                }
            }
        }

        Ok(())
    }
}

impl FromStr for Field {
    type Err = RegistrarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| RegistrarError::UnknownField {
                provided: s.to_string(),
            })
    }
}

/// Digits only. Anything else the admin types is dropped, not rejected.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// The form exactly as the browser posted it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentFormInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub course: String,
    pub year: String,
    pub status: String,
}

impl StudentFormInput {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Gender => &self.gender,
            Field::Address => &self.address,
            Field::Course => &self.course,
            Field::Year => &self.year,
            Field::Status => &self.status,
        }
    }
}

impl From<&StudentRecord> for StudentFormInput {
    fn from(student: &StudentRecord) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            date_of_birth: student.date_of_birth.to_string(),
            gender: student.gender.clone(),
            address: student.address.clone(),
            course: student.course.clone(),
            year: student.year.to_string(),
            status: student.status.to_string(),
        }
    }
}

/// Per-field visual state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldEvent {
    Blur,
    Input,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldFeedback {
    pub mark: Mark,
    pub problem: Option<&'static str>,
}

impl FieldFeedback {
    pub const UNTOUCHED: Self = Self {
        mark: Mark::Untouched,
        problem: None,
    };

    pub fn evaluate(field: Field, value: &str, today: Date) -> Self {
        match field.check(value, today) {
            Ok(()) => Self {
                mark: Mark::Valid,
                problem: None,
            },
            Err(problem) => Self {
                mark: Mark::Invalid,
                problem: Some(problem),
            },
        }
    }

    /// Live feedback: a blur only marks non-blank fields, typing only re-marks
    /// fields that already carry a mark.
    pub fn on_event(
        field: Field,
        value: &str,
        event: FieldEvent,
        current: Mark,
        today: Date,
    ) -> Self {
        let should_evaluate = match event {
            FieldEvent::Blur => !value.trim().is_empty(),
            FieldEvent::Input => current != Mark::Untouched,
        };

        if should_evaluate {
            Self::evaluate(field, value, today)
        } else {
            Self {
                mark: current,
                problem: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    const TODAY: Date = date(2024, 6, 15);

    #[test]
    fn phone_keeps_only_digits() {
        assert_eq!(normalize_phone("12a3-45"), "12345");
        assert_eq!(normalize_phone("(987) 654-3210"), "9876543210");
    }

    #[test]
    fn future_birthdays_are_rejected() {
        assert!(Field::DateOfBirth.check("2024-06-15", TODAY).is_ok());
        assert!(Field::DateOfBirth.check("2024-06-16", TODAY).is_err());
        assert!(Field::DateOfBirth.check("15/06/2000", TODAY).is_err());
    }

    #[test]
    fn required_fields_reject_whitespace() {
        for field in Field::ALL {
            assert_eq!(field.check("   ", TODAY), Err("This field is required"));
        }
    }

    #[test]
    fn year_must_be_a_small_positive_integer() {
        assert!(Field::Year.check("1", TODAY).is_ok());
        assert!(Field::Year.check("6", TODAY).is_ok());
        assert!(Field::Year.check("0", TODAY).is_err());
        assert!(Field::Year.check("-2", TODAY).is_err());
        assert!(Field::Year.check("two", TODAY).is_err());
    }

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert!("favourite_colour".parse::<Field>().is_err());
    }

    #[test]
    fn blur_on_blank_field_leaves_it_untouched() {
        let feedback =
            FieldFeedback::on_event(Field::Email, "  ", FieldEvent::Blur, Mark::Untouched, TODAY);
        assert_eq!(feedback, FieldFeedback::UNTOUCHED);
    }

    #[test]
    fn blur_with_content_marks_the_field() {
        let feedback = FieldFeedback::on_event(
            Field::Email,
            "not-an-email",
            FieldEvent::Blur,
            Mark::Untouched,
            TODAY,
        );
        assert_eq!(feedback.mark, Mark::Invalid);
    }

    #[test]
    fn typing_only_re_evaluates_marked_fields() {
        let untouched = FieldFeedback::on_event(
            Field::FirstName,
            "J",
            FieldEvent::Input,
            Mark::Untouched,
            TODAY,
        );
        assert_eq!(untouched.mark, Mark::Untouched);

        let fixed = FieldFeedback::on_event(
            Field::FirstName,
            "Jo",
            FieldEvent::Input,
            Mark::Invalid,
            TODAY,
        );
        assert_eq!(fixed.mark, Mark::Valid);
    }
}
