use crate::{reply::{Reply, Toasts}, state::RegistrarState, views::dashboard::dashboard};
use axum::extract::State;

pub async fn internal_get_dashboard(State(state): State<RegistrarState>) -> Reply {
    let mut toasts = Toasts::default();
    let stats = state.dashboard().load(&mut toasts).await;

    state
        .reply(toasts)
        .with_optional_body(stats.as_ref().map(dashboard))
}
