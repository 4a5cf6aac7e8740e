use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::study::category::{self, Category};
use crate::study::reducer::StudyEvent;
use crate::study::word::{self, WordEntry};
use crate::study::classifier;
use crate::validation::normalize_word_fields;

/// Word plus derived accuracy figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordView {
    #[serde(flatten)]
    word: WordEntry,
    total_attempts: u32,
    accuracy_rate: f64,
}

impl From<&WordEntry> for WordView {
    fn from(w: &WordEntry) -> Self {
        Self {
            word: w.clone(),
            total_attempts: w.total_attempts(),
            accuracy_rate: w.accuracy_rate(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_words).post(add_word))
        .route("/classify", post(classify_word))
        .route("/backfill-categories", post(backfill_categories))
        .route("/:id", put(edit_word).delete(delete_word))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListWordsQuery {
    category: Option<String>,
    search: Option<String>,
}

async fn list_words(
    Query(query): Query<ListWordsQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let snapshot = state.study().snapshot().await;
    let in_category = category::filter(
        &snapshot.words,
        query.category.as_deref().unwrap_or(category::ALL),
    );
    let found = word::search(&in_category, query.search.as_deref().unwrap_or(""));
    let items: Vec<WordView> = found.into_iter().map(WordView::from).collect();
    ok(items)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordRequest {
    term: String,
    meaning: String,
    category_id: Option<String>,
}

async fn add_word(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<WordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let next = state
        .study()
        .apply(StudyEvent::AddWord {
            term: req.term,
            meaning: req.meaning,
            category_id: req.category_id,
        })
        .await?;
    // New words always take the highest id.
    let added = next
        .words
        .iter()
        .max_by_key(|w| w.id)
        .ok_or_else(|| AppError::internal("word list empty after add"))?;
    Ok(created(WordView::from(added)))
}

async fn edit_word(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<WordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let next = state
        .study()
        .apply(StudyEvent::EditWord {
            id,
            term: req.term,
            meaning: req.meaning,
            category_id: req.category_id,
        })
        .await?;
    let edited = next
        .words
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| AppError::not_found("Word not found"))?;
    Ok(ok(WordView::from(edited)))
}

async fn delete_word(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.study().apply(StudyEvent::DeleteWord { id }).await?;
    Ok(ok(serde_json::json!({ "deleted": true, "id": id })))
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    term: String,
    meaning: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyResponse {
    category_id: &'static str,
    category: Option<&'static Category>,
}

async fn classify_word(
    JsonBody(req): JsonBody<ClassifyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (term, meaning) = normalize_word_fields(&req.term, &req.meaning)?;
    let category_id = classifier::classify(&term, &meaning);
    Ok(ok(ClassifyResponse {
        category_id,
        category: category::find_by_id(category_id),
    }))
}

async fn backfill_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let next = state.study().apply(StudyEvent::BackfillCategories).await?;
    let items: Vec<WordView> = next.words.iter().map(WordView::from).collect();
    Ok(ok(items))
}
