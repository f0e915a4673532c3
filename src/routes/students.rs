use crate::{
    controllers::list::DeleteOutcome,
    data::{
        page::PageToken,
        student::{StudentId, StudentStatus},
    },
    error::RegistrarResult,
    reply::{Reply, Toasts},
    state::RegistrarState,
    views::students::{delete_prompt, details, dismiss_modal, list_page, listing},
};
use axum::extract::{Path, Query, State};
use maud::{Markup, html};
use serde::Deserialize;

pub async fn get_students(State(state): State<RegistrarState>) -> Markup {
    state.render("Students", list_page(PageToken::fresh()), None)
}

pub async fn internal_get_students(State(state): State<RegistrarState>, page: PageToken) -> Reply {
    let mut toasts = Toasts::default();
    let students = state.list().load_all(page, &mut toasts).await;

    state
        .reply(toasts)
        .with_optional_body(listing(&students))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    keyword: String,
}

pub async fn internal_get_search_students(
    State(state): State<RegistrarState>,
    page: PageToken,
    Query(SearchQuery { keyword }): Query<SearchQuery>,
) -> Reply {
    let mut toasts = Toasts::default();
    let students = state.list().search(page, &keyword, &mut toasts).await;

    state
        .reply(toasts)
        .with_optional_body(listing(&students))
}

#[derive(Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    status: String,
}

pub async fn internal_get_filter_students(
    State(state): State<RegistrarState>,
    page: PageToken,
    Query(StatusQuery { status }): Query<StatusQuery>,
) -> RegistrarResult<Reply> {
    let status = if status.trim().is_empty() {
        None
    } else {
        Some(status.parse::<StudentStatus>()?)
    };

    let mut toasts = Toasts::default();
    let students = state
        .list()
        .filter_by_status(page, status, &mut toasts)
        .await;

    Ok(state
        .reply(toasts)
        .with_optional_body(listing(&students)))
}

pub async fn internal_get_student_details(
    State(state): State<RegistrarState>,
    page: PageToken,
    Path(id): Path<String>,
) -> RegistrarResult<Reply> {
    let id = StudentId::parse(&id)?;
    let mut toasts = Toasts::default();

    let body = match state.list().view_details(page, id, &mut toasts).await {
        Some(student) => Some(details(
            &student,
            state.today(),
            &state.config().date_locale(),
        )?),
        None => None,
    };

    Ok(state.reply(toasts).with_optional_body(body))
}

pub async fn internal_get_edit_student(
    State(state): State<RegistrarState>,
    Path(id): Path<String>,
) -> RegistrarResult<Reply> {
    let id = StudentId::parse(&id)?;
    let navigation = state.list().edit(id);

    Ok(state.reply(Toasts::default()).navigate(navigation))
}

pub async fn internal_post_delete_student(
    State(state): State<RegistrarState>,
    page: PageToken,
    Path(id): Path<String>,
) -> RegistrarResult<Reply> {
    let id = StudentId::parse(&id)?;
    let mut toasts = Toasts::default();
    let prompt = state.list().request_delete(page, id, &mut toasts).await;

    Ok(state
        .reply(toasts)
        .with_optional_body(prompt.map(|prompt| delete_prompt(&prompt, page))))
}

pub async fn internal_post_confirm_delete(
    State(state): State<RegistrarState>,
    page: PageToken,
    Path(id): Path<String>,
) -> RegistrarResult<Reply> {
    let id = StudentId::parse(&id)?;
    let mut toasts = Toasts::default();

    Ok(match state.list().confirm_delete(page, id, &mut toasts).await {
        DeleteOutcome::NothingPending => state.reply(toasts).with_out_of_band(dismiss_modal()),
        DeleteOutcome::Failed => state.reply(toasts),
        DeleteOutcome::Deleted(students) => state
            .reply(toasts)
            .with_optional_body(listing(&students))
            .with_out_of_band(dismiss_modal()),
    })
}

pub async fn internal_post_cancel_delete(
    State(state): State<RegistrarState>,
    page: PageToken,
) -> Reply {
    let pending = state.list().pending_delete(page).await;
    debug!(?pending, %page, "Delete cancelled");
    state.reply(Toasts::default()).with_body(html! {})
}
