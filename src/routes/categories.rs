use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::response::ok;
use crate::state::AppState;
use crate::study::category;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

/// Full catalog in display order, each with the number of words it holds.
async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.study().snapshot().await;
    ok(category::counts(&snapshot.words))
}
