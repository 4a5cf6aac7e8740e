use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::routes::progress::ProgressView;
use crate::routes::words::WordView;
use crate::state::AppState;
use crate::study::reducer::StudyEvent;

pub fn quiz_router() -> Router<AppState> {
    Router::new()
        .route("/answer", post(answer))
        .route("/complete", post(complete))
}

pub fn typing_router() -> Router<AppState> {
    Router::new().route("/complete", post(finish_typing_round))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRequest {
    word_id: i64,
    correct: bool,
}

#[derive(Debug, Serialize)]
struct AnswerResponse {
    word: WordView,
    progress: ProgressView,
}

async fn answer(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let next = state
        .study()
        .apply(StudyEvent::AnswerQuiz {
            word_id: req.word_id,
            correct: req.correct,
        })
        .await?;
    let word = next
        .words
        .iter()
        .find(|w| w.id == req.word_id)
        .ok_or_else(|| AppError::not_found("Word not found"))?;
    Ok(ok(AnswerResponse {
        word: WordView::from(word),
        progress: ProgressView::from(next.progress),
    }))
}

async fn complete(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let next = state.study().apply(StudyEvent::CompleteQuiz).await?;
    Ok(ok(ProgressView::from(next.progress)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypingRoundRequest {
    correct_count: u32,
    #[serde(default)]
    score: u32,
}

async fn finish_typing_round(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TypingRoundRequest>,
) -> Result<impl IntoResponse, AppError> {
    let next = state
        .study()
        .apply(StudyEvent::FinishTypingRound {
            correct_count: req.correct_count,
            score: req.score,
        })
        .await?;
    Ok(ok(ProgressView::from(next.progress)))
}
