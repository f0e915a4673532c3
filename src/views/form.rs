use crate::{
    controllers::form::{
        FormMode, FormReview,
        fields::{COURSES, Field, FieldFeedback, GENDERS, Mark, StudentFormInput, YEARS},
    },
    data::student::StudentStatus,
    maud_conveniences::{BUTTON, INPUT, form_element, title},
};
use jiff::civil::Date;
use maud::{Markup, html};

pub const FORM_ID: &str = "student_form";

const fn mark_name(mark: Mark) -> &'static str {
    match mark {
        Mark::Untouched => "untouched",
        Mark::Valid => "valid",
        Mark::Invalid => "invalid",
    }
}

/// Widgets take their border from the marker just before them.
const MARKED_BORDER: &str =
    " peer-data-[mark=valid]:border-green-500 peer-data-[mark=invalid]:border-red-500";

fn options<'a>(
    placeholder: &str,
    choices: impl IntoIterator<Item = &'a str>,
    selected: &str,
) -> Markup {
    html! {
        option value="" disabled selected[selected.is_empty()] {(placeholder)}
        @for choice in choices {
            option value=(choice) selected[choice == selected] {(choice)}
        }
    }
}

fn widget(field: Field, value: &str, today: Date) -> Markup {
    let id = field.name();
    let class = format!("{INPUT}{MARKED_BORDER}");

    match field {
        Field::Email => html! {
            input type="email" id=(id) name=(id) value=(value) class=(class) {}
        },
        Field::Phone => html! {
            input type="tel" id=(id) name=(id) value=(value) maxlength="10" inputmode="numeric"
                oninput="this.value = this.value.replace(/\\D/g, '')" class=(class) {}
        },
        Field::DateOfBirth => html! {
            input type="date" id=(id) name=(id) value=(value) max=(today.to_string()) class=(class) {}
        },
        Field::Address => html! {
            textarea id=(id) name=(id) rows="3" maxlength="200" class=(class) {(value)}
        },
        Field::Gender => html! {
            select id=(id) name=(id) class=(class) {
                (options("Select gender", GENDERS, value))
            }
        },
        Field::Course => {
            let unknown_course = (!value.is_empty() && !COURSES.contains(&value)).then_some(value);
            html! {
                select id=(id) name=(id) class=(class) {
                    (options("Select course", COURSES.into_iter().chain(unknown_course), value))
                }
            }
        }
        Field::Year => {
            let years: Vec<String> = YEARS.map(|year| year.to_string()).collect();
            html! {
                select id=(id) name=(id) class=(class) {
                    (options("Select year", years.iter().map(String::as_str), value))
                }
            }
        }
        Field::Status => html! {
            select id=(id) name=(id) class=(class) {
                (options("Select status", StudentStatus::ALL.map(StudentStatus::as_str), value))
            }
        },
        Field::FirstName | Field::LastName => html! {
            input type="text" id=(id) name=(id) value=(value) maxlength="50" class=(class) {}
        },
    }
}

fn marker(field: Field, mark: Mark, out_of_band: bool) -> Markup {
    html! {
        span id={"mark_" (field.name())} class="peer hidden" data-mark=(mark_name(mark))
            hx-swap-oob=[out_of_band.then_some("true")] {}
    }
}

fn problem(field: Field, feedback: &FieldFeedback) -> Markup {
    html! {
        p id={"feedback_" (field.name())} class="text-red-400 text-xs italic mt-1" {
            @if let Some(problem) = feedback.problem {
                (problem)
            }
        }
    }
}

/// One labelled field. While the admin works through the form, only its
/// marker and message are replaced, never the widget being typed into.
pub fn field(field: Field, value: &str, feedback: &FieldFeedback, today: Date) -> Markup {
    let name = field.name();
    let vals = format!(
        "js:{{event: event.type === 'focusout' ? 'blur' : 'input', mark: document.getElementById('mark_{name}').dataset.mark}}"
    );

    html! {
        div id={"field_" (name)} class="field"
            hx-post={"/internal/students/form/field/" (name)}
            hx-trigger="focusout, input changed delay:300ms"
            hx-vals=(vals)
            hx-target={"#feedback_" (name)} hx-swap="outerHTML" {
            (form_element(name, field.label(), html! {
                (marker(field, feedback.mark, false))
                (widget(field, value, today))
                (problem(field, feedback))
            }))
        }
    }
}

/// Live feedback for one field: the message in place, the marker out of band.
pub fn field_feedback(field: Field, feedback: &FieldFeedback) -> Markup {
    html! {
        (problem(field, feedback))
        (marker(field, feedback.mark, true))
    }
}

/// `review` is `Some` once a submit has been attempted.
pub fn student_form(
    mode: FormMode,
    input: &StudentFormInput,
    review: Option<&FormReview>,
    today: Date,
) -> Markup {
    let reset_url = match mode {
        FormMode::Create => "/students/form".to_string(),
        FormMode::Edit(id) => format!("/students/form?id={id}"),
    };
    let submit_url = match mode {
        FormMode::Create => "/internal/students/form".to_string(),
        FormMode::Edit(id) => format!("/internal/students/form/{id}"),
    };
    let (post, put) = match mode {
        FormMode::Create => (Some(submit_url), None),
        FormMode::Edit(_) => (None, Some(submit_url)),
    };

    html! {
        form id=(FORM_ID) class=(if review.is_some() { "p-4 was-validated" } else { "p-4" })
            hx-post=[post] hx-put=[put] hx-trigger="submit" hx-target="this" hx-swap="outerHTML" novalidate {
            @for f in mode.fields() {
                @let feedback = review.map_or(FieldFeedback::UNTOUCHED, |review| review.feedback(f));
                (field(f, input.value(f), &feedback, today))
            }

            div class="flex items-center justify-between" {
                button type="submit" class={(BUTTON) " bg-blue-500 hover:bg-blue-700"} {(mode.submit_label())}
                button type="button" hx-get=(reset_url) hx-select={"#" (FORM_ID)} hx-target={"#" (FORM_ID)} hx-swap="outerHTML"
                    class={(BUTTON) " bg-slate-600 hover:bg-slate-800"} {"Reset"}
                a href="/students" class="text-gray-300 hover:text-white" {"Cancel"}
            }
        }
    }
}

pub fn form_page(mode: FormMode, input: &StudentFormInput, today: Date) -> Markup {
    html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-2xl w-full" {
            (title(mode.title()))
            (student_form(mode, input, None, today))
        }
    }
}

pub fn failed_load_page() -> Markup {
    html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full text-center" {
            (title("Edit Student"))
            p class="text-gray-400" {"Taking you back to the student list..."}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::student::StudentId;
    use jiff::civil::date;

    const TODAY: Date = date(2024, 6, 15);

    #[test]
    fn create_form_posts_and_hides_status() {
        let html = form_page(FormMode::Create, &StudentFormInput::default(), TODAY).into_string();
        assert!(html.contains(r#"hx-post="/internal/students/form""#));
        assert!(!html.contains("hx-put"));
        assert!(!html.contains(r#"id="status""#));
        assert!(html.contains("Add Student"));
    }

    #[test]
    fn edit_form_puts_and_shows_status() {
        let input = StudentFormInput {
            status: "Inactive".into(),
            course: "Biotechnology".into(),
            ..StudentFormInput::default()
        };
        let html = form_page(FormMode::Edit(StudentId::parse("4").unwrap()), &input, TODAY)
            .into_string();
        assert!(html.contains(r#"hx-put="/internal/students/form/4""#));
        assert!(html.contains(r#"id="status""#));
        assert!(html.contains("Update Student"));
        assert!(html.contains(r#"<option value="Inactive" selected>"#));
        assert!(html.contains(r#"<option value="Biotechnology" selected>"#));
    }

    #[test]
    fn reviewed_form_is_marked_validated() {
        let input = StudentFormInput::default();
        let review = FormReview::of(FormMode::Create, &input, TODAY);
        let html = student_form(FormMode::Create, &input, Some(&review), TODAY).into_string();

        assert!(html.contains("was-validated"));
        assert!(html.contains(r#"data-mark="invalid""#));
        assert!(!html.contains(r#"data-mark="untouched""#));
    }

    #[test]
    fn date_of_birth_cannot_be_picked_in_the_future() {
        let html = field(Field::DateOfBirth, "", &FieldFeedback::UNTOUCHED, TODAY).into_string();
        assert!(html.contains(r#"max="2024-06-15""#));
    }

    #[test]
    fn live_feedback_leaves_the_widget_alone() {
        let feedback = FieldFeedback {
            mark: Mark::Invalid,
            problem: Some("Please enter a valid email address"),
        };
        let html = field_feedback(Field::Email, &feedback).into_string();

        assert!(!html.contains("<input"));
        assert!(html.contains(r#"id="feedback_email""#));
        assert!(html.contains("Please enter a valid email address"));
        assert!(html.contains(r#"id="mark_email" class="peer hidden" data-mark="invalid" hx-swap-oob="true""#));
    }

    #[test]
    fn fields_send_their_current_mark_and_target_the_message() {
        let html = field(Field::Email, "a@b.co", &FieldFeedback::UNTOUCHED, TODAY).into_string();

        assert!(html.contains(r#"hx-post="/internal/students/form/field/email""#));
        assert!(html.contains("document.getElementById('mark_email').dataset.mark"));
        assert!(html.contains(r##"hx-target="#feedback_email""##));
        assert!(html.contains(r#"data-mark="untouched""#));
        assert!(!html.contains("?mark="));
    }
}
