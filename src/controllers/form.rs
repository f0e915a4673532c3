use crate::{
    data::student::{StudentDraft, StudentId, StudentRecord, StudentStatus},
    gateway::Gateway,
    reply::Toasts,
};
use fields::{Field, FieldFeedback, StudentFormInput, normalize_phone};
use jiff::civil::Date;
use std::collections::HashMap;

pub mod fields;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load student data";
pub const INVALID_FORM_MESSAGE: &str = "Please fill in all required fields correctly";
pub const ADDED_MESSAGE: &str = "Student added successfully";
pub const UPDATED_MESSAGE: &str = "Student updated successfully";

/// Decided once, when the form page is requested.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(StudentId),
}

impl FormMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "Add Student",
            Self::Edit(_) => "Edit Student",
        }
    }

    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Add Student",
            Self::Edit(_) => "Update Student",
        }
    }

    pub const fn shows_status(self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::always_shown().chain(self.shows_status().then_some(Field::Status))
    }
}

/// Every field checked at once, as on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormReview {
    pub feedback: HashMap<Field, FieldFeedback>,
}

impl FormReview {
    pub fn of(mode: FormMode, input: &StudentFormInput, today: Date) -> Self {
        let feedback = mode
            .fields()
            .map(|field| (field, FieldFeedback::evaluate(field, input.value(field), today)))
            .collect();
        Self { feedback }
    }

    pub fn is_valid(&self) -> bool {
        self.feedback.values().all(|fb| fb.problem.is_none())
    }

    pub fn feedback(&self, field: Field) -> FieldFeedback {
        self.feedback
            .get(&field)
            .cloned()
            .unwrap_or(FieldFeedback::UNTOUCHED)
    }
}

/// Turns a form that has passed review into what the backend takes. `None` if
/// something slipped past the review.
pub fn draft_from(mode: FormMode, input: &StudentFormInput) -> Option<StudentDraft> {
    let status = match mode {
        FormMode::Create => StudentStatus::Active,
        FormMode::Edit(_) => input.status.parse().ok()?,
    };

    Some(StudentDraft {
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        email: input.email.trim().to_string(),
        phone: normalize_phone(&input.phone),
        date_of_birth: input.date_of_birth.trim().parse().ok()?,
        gender: input.gender.trim().to_string(),
        address: input.address.trim().to_string(),
        course: input.course.trim().to_string(),
        year: input.year.trim().parse().ok()?,
        status,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormLoad {
    Create,
    Edit { id: StudentId, input: StudentFormInput },
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Invalid(FormReview),
    Saved(StudentRecord),
    Failed,
}

#[derive(Debug)]
pub struct FormController {
    gateway: Gateway,
}

impl FormController {
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// A missing or blank `id` means create mode.
    pub async fn load(&self, id: Option<&str>, toasts: &mut Toasts) -> FormLoad {
        let Some(id) = id.filter(|id| !id.trim().is_empty()) else {
            return FormLoad::Create;
        };

        let id = match StudentId::parse(id) {
            Ok(id) => id,
            Err(e) => {
                warn!(?e, "Edit form opened with a bad ID");
                toasts.error(LOAD_FAILED_MESSAGE);
                return FormLoad::Failed;
            }
        };

        match self.gateway.get_student(id, toasts).await {
            Ok(student) => FormLoad::Edit {
                id,
                input: StudentFormInput::from(&student),
            },
            Err(e) => {
                error!(?e, %id, "Error loading student");
                toasts.error(LOAD_FAILED_MESSAGE);
                FormLoad::Failed
            }
        }
    }

    pub async fn submit(
        &self,
        mode: FormMode,
        input: &StudentFormInput,
        today: Date,
        toasts: &mut Toasts,
    ) -> Submission {
        let review = FormReview::of(mode, input, today);
        let draft = if review.is_valid() {
            draft_from(mode, input)
        } else {
            None
        };
        let Some(draft) = draft else {
            debug!(?mode, "Form failed validation");
            toasts.error(INVALID_FORM_MESSAGE);
            return Submission::Invalid(review);
        };

        let saved = match mode {
            FormMode::Create => self.gateway.create_student(&draft, toasts).await,
            FormMode::Edit(id) => self.gateway.update_student(id, &draft, toasts).await,
        };

        match saved {
            Ok(student) => {
                info!(id = %student.id, ?mode, "Saved student");
                toasts.success(match mode {
                    FormMode::Create => ADDED_MESSAGE,
                    FormMode::Edit(_) => UPDATED_MESSAGE,
                });
                Submission::Saved(student)
            }
            Err(e) => {
                error!(?e, ?mode, "Error saving student");
                Submission::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fields::Mark;
    use jiff::civil::date;

    const TODAY: Date = date(2024, 6, 15);

    fn filled() -> StudentFormInput {
        StudentFormInput {
            first_name: " John ".into(),
            last_name: "Doe".into(),
            email: "john.doe@example.com".into(),
            phone: "(987) 654-3210".into(),
            date_of_birth: "2002-05-15".into(),
            gender: "Male".into(),
            address: "123 Main St, New York, NY".into(),
            course: "Computer Science".into(),
            year: "2".into(),
            status: "Inactive".into(),
        }
    }

    #[test]
    fn create_mode_ignores_status() {
        let mut input = filled();
        input.status = String::new();

        assert!(FormReview::of(FormMode::Create, &input, TODAY).is_valid());
        let draft = draft_from(FormMode::Create, &filled()).unwrap();
        assert_eq!(draft.status, StudentStatus::Active);
    }

    #[test]
    fn edit_mode_needs_a_status() {
        let mode = FormMode::Edit(StudentId::parse("3").unwrap());
        let mut input = filled();
        input.status = String::new();

        let review = FormReview::of(mode, &input, TODAY);
        assert!(!review.is_valid());
        assert_eq!(review.feedback(Field::Status).mark, Mark::Invalid);

        let draft = draft_from(mode, &filled()).unwrap();
        assert_eq!(draft.status, StudentStatus::Inactive);
    }

    #[test]
    fn drafts_are_trimmed_and_normalised() {
        let draft = draft_from(FormMode::Create, &filled()).unwrap();
        assert_eq!(draft.first_name, "John");
        assert_eq!(draft.phone, "9876543210");
        assert_eq!(draft.year, 2);
        assert_eq!(draft.date_of_birth, date(2002, 5, 15));
    }

    #[test]
    fn review_marks_every_field() {
        let mut input = filled();
        input.email = String::new();

        let review = FormReview::of(FormMode::Create, &input, TODAY);
        assert_eq!(review.feedback.len(), 9);
        assert_eq!(review.feedback(Field::Email).mark, Mark::Invalid);
        assert_eq!(review.feedback(Field::FirstName).mark, Mark::Valid);
    }

    #[test]
    fn modes_label_themselves() {
        let edit = FormMode::Edit(StudentId::parse("1").unwrap());
        assert_eq!(edit.title(), "Edit Student");
        assert_eq!(edit.submit_label(), "Update Student");
        assert_eq!(FormMode::Create.fields().count(), 9);
        assert_eq!(edit.fields().count(), 10);
    }
}
