use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::study::progress::UserProgress;
use crate::study::reducer::StudyEvent;
use crate::study::word::{self, WordStats};
use crate::study::{badge, category};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    #[serde(flatten)]
    progress: UserProgress,
    xp_for_next_level: u32,
    level_progress: f64,
}

impl From<UserProgress> for ProgressView {
    fn from(progress: UserProgress) -> Self {
        Self {
            xp_for_next_level: progress.xp_for_next_level(),
            level_progress: progress.level_progress(),
            progress,
        }
    }
}

pub fn progress_router() -> Router<AppState> {
    Router::new().route("/", get(get_progress).delete(reset_progress))
}

pub fn badges_router() -> Router<AppState> {
    Router::new().route("/", get(list_badges))
}

pub fn stats_router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}

async fn get_progress(State(state): State<AppState>) -> impl IntoResponse {
    ok(ProgressView::from(state.study().snapshot().await.progress))
}

async fn reset_progress(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let next = state.study().apply(StudyEvent::ResetProgress).await?;
    Ok(ok(ProgressView::from(next.progress)))
}

async fn list_badges(State(state): State<AppState>) -> impl IntoResponse {
    ok(badge::views(&state.study().snapshot().await.progress))
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    category_id: String,
    #[serde(flatten)]
    stats: WordStats,
}

async fn get_stats(
    Query(query): Query<StatsQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let category_id = query.category.unwrap_or_else(|| category::ALL.to_string());
    let snapshot = state.study().snapshot().await;
    let stats = word::stats(category::filter(&snapshot.words, &category_id));
    ok(StatsResponse { category_id, stats })
}
