use crate::{
    controllers::form::{
        FormLoad, FormMode, Submission,
        fields::{Field, FieldEvent, FieldFeedback, Mark, StudentFormInput},
    },
    data::{IdQuery, student::StudentId},
    error::RegistrarResult,
    reply::{Navigation, Reply, Toasts},
    state::RegistrarState,
    views::form::{failed_load_page, field_feedback, form_page, student_form},
};
use axum::{
    Form,
    extract::{Path, Query, State},
};
use maud::Markup;
use serde::Deserialize;
use std::collections::HashMap;

const LIST_PAGE: &str = "/students";

pub async fn get_student_form(
    State(state): State<RegistrarState>,
    Query(IdQuery { id }): Query<IdQuery>,
) -> Markup {
    let mut toasts = Toasts::default();
    let today = state.today();

    let (page, navigation) = match state.form().load(id.as_deref(), &mut toasts).await {
        FormLoad::Create => (
            form_page(FormMode::Create, &StudentFormInput::default(), today),
            None,
        ),
        FormLoad::Edit { id, input } => (form_page(FormMode::Edit(id), &input, today), None),
        FormLoad::Failed => (
            failed_load_page(),
            Some(Navigation::After {
                to: LIST_PAGE.to_string(),
                delay: state.config().delays().after_failed_load,
            }),
        ),
    };

    let mut reply = state.reply(toasts);
    if let Some(navigation) = navigation {
        reply = reply.navigate(navigation);
    }

    state.render("Student Form", page, Some(reply.extras()))
}

async fn submit(state: &RegistrarState, mode: FormMode, input: StudentFormInput) -> Reply {
    let mut toasts = Toasts::default();
    let today = state.today();

    match state.form().submit(mode, &input, today, &mut toasts).await {
        Submission::Invalid(review) => state
            .reply(toasts)
            .with_body(student_form(mode, &input, Some(&review), today)),
        Submission::Saved(_) => state.reply(toasts).navigate(Navigation::After {
            to: LIST_PAGE.to_string(),
            delay: state.config().delays().after_save,
        }),
        Submission::Failed => state.reply(toasts),
    }
}

pub async fn internal_post_student_form(
    State(state): State<RegistrarState>,
    Form(input): Form<StudentFormInput>,
) -> Reply {
    submit(&state, FormMode::Create, input).await
}

pub async fn internal_put_student_form(
    State(state): State<RegistrarState>,
    Path(id): Path<String>,
    Form(input): Form<StudentFormInput>,
) -> RegistrarResult<Reply> {
    let id = StudentId::parse(&id)?;
    Ok(submit(&state, FormMode::Edit(id), input).await)
}

#[derive(Deserialize)]
pub struct FieldForm {
    event: FieldEvent,
    #[serde(default)]
    mark: Mark,
    #[serde(flatten)]
    values: HashMap<String, String>,
}

pub async fn internal_post_form_field(
    State(state): State<RegistrarState>,
    Path(name): Path<String>,
    Form(FieldForm {
        event,
        mark,
        values,
    }): Form<FieldForm>,
) -> RegistrarResult<Markup> {
    let f: Field = name.parse()?;
    let value = values.get(f.name()).map_or("", String::as_str);

    let feedback = FieldFeedback::on_event(f, value, event, mark, state.today());
    Ok(field_feedback(f, &feedback))
}
