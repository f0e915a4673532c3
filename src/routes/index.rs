use crate::{state::RegistrarState, views::dashboard::dashboard_page};
use axum::extract::State;
use maud::Markup;

pub async fn get_index_route(State(state): State<RegistrarState>) -> Markup {
    state.render("Dashboard", dashboard_page(), None)
}
