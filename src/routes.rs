use crate::state::RegistrarState;
use axum::{
    Router,
    routing::{get, post, put},
};
use dashboard::internal_get_dashboard;
use index::get_index_route;
use student_form::{
    get_student_form, internal_post_form_field, internal_post_student_form,
    internal_put_student_form,
};
use students::{
    get_students, internal_get_edit_student, internal_get_filter_students,
    internal_get_search_students, internal_get_student_details, internal_get_students,
    internal_post_cancel_delete, internal_post_confirm_delete, internal_post_delete_student,
};

pub mod dashboard;
pub mod index;
pub mod student_form;
pub mod students;

/// Every page and fragment the console serves.
pub fn router(state: RegistrarState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", get(get_students))
        .route("/students/form", get(get_student_form))
        .route("/internal/dashboard", get(internal_get_dashboard))
        .route("/internal/students", get(internal_get_students))
        .route(
            "/internal/students/search",
            get(internal_get_search_students),
        )
        .route(
            "/internal/students/filter",
            get(internal_get_filter_students),
        )
        .route(
            "/internal/students/{id}/details",
            get(internal_get_student_details),
        )
        .route(
            "/internal/students/{id}/edit",
            get(internal_get_edit_student),
        )
        .route(
            "/internal/students/{id}/delete",
            post(internal_post_delete_student),
        )
        .route(
            "/internal/students/{id}/delete/confirm",
            post(internal_post_confirm_delete),
        )
        .route(
            "/internal/students/delete/cancel",
            post(internal_post_cancel_delete),
        )
        .route(
            "/internal/students/form",
            post(internal_post_student_form),
        )
        .route(
            "/internal/students/form/{id}",
            put(internal_put_student_form),
        )
        .route(
            "/internal/students/form/field/{field}",
            post(internal_post_form_field),
        )
        .with_state(state)
}
