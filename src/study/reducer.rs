//! Explicit study state and the pure per-event transition.
//!
//! Callers keep one `StudyState`, feed every event through [`reduce`] and
//! replace their copy with the result. Nothing here touches storage or the
//! clock; `today` is passed in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{XP_PER_CORRECT_ANSWER, XP_PER_TYPING_CORRECT, XP_QUIZ_COMPLETION_BONUS};
use crate::study::badge::auto_unlock;
use crate::study::progress::UserProgress;
use crate::study::word::{self, WordEntry};
use crate::study::{category, classifier};
use crate::validation::normalize_word_fields;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyState {
    pub words: Vec<WordEntry>,
    pub progress: UserProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StudyEvent {
    AddWord {
        term: String,
        meaning: String,
        category_id: Option<String>,
    },
    EditWord {
        id: i64,
        term: String,
        meaning: String,
        category_id: Option<String>,
    },
    DeleteWord {
        id: i64,
    },
    AnswerQuiz {
        word_id: i64,
        correct: bool,
    },
    CompleteQuiz,
    FinishTypingRound {
        correct_count: u32,
        score: u32,
    },
    BackfillCategories,
    ResetProgress,
}

impl StudyEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddWord { .. } => "add_word",
            Self::EditWord { .. } => "edit_word",
            Self::DeleteWord { .. } => "delete_word",
            Self::AnswerQuiz { .. } => "answer_quiz",
            Self::CompleteQuiz => "complete_quiz",
            Self::FinishTypingRound { .. } => "finish_typing_round",
            Self::BackfillCategories => "backfill_categories",
            Self::ResetProgress => "reset_progress",
        }
    }

    /// Client-side round score. Recorded in logs only; XP comes from
    /// `correct_count`.
    pub fn score(&self) -> Option<u32> {
        match self {
            Self::FinishTypingRound { score, .. } => Some(*score),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("term and meaning must not be blank")]
    EmptyField,
    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("word {0} not found")]
    WordNotFound(i64),
}

pub fn reduce(
    state: &StudyState,
    event: &StudyEvent,
    today: NaiveDate,
) -> Result<StudyState, Rejection> {
    let next = match event {
        StudyEvent::AddWord {
            term,
            meaning,
            category_id,
        } => add_word(state, term, meaning, category_id.as_deref())?,
        StudyEvent::EditWord {
            id,
            term,
            meaning,
            category_id,
        } => edit_word(state, *id, term, meaning, category_id.as_deref())?,
        StudyEvent::DeleteWord { id } => {
            position(&state.words, *id)?;
            let words = state.words.iter().filter(|w| w.id != *id).cloned().collect();
            StudyState {
                words,
                progress: state.progress.clone(),
            }
        }
        StudyEvent::AnswerQuiz { word_id, correct } => {
            answer_quiz(state, *word_id, *correct, today)?
        }
        StudyEvent::CompleteQuiz => StudyState {
            words: state.words.clone(),
            progress: state
                .progress
                .record_quiz_completed()
                .add_xp(XP_QUIZ_COMPLETION_BONUS)
                .update_streak_for_today(today),
        },
        StudyEvent::FinishTypingRound { correct_count, .. } => {
            let mut progress = state
                .progress
                .add_xp(correct_count.saturating_mul(XP_PER_TYPING_CORRECT));
            // A round with no correct answer does not count as a study day.
            if *correct_count > 0 {
                progress = progress.update_streak_for_today(today);
            }
            StudyState {
                words: state.words.clone(),
                progress,
            }
        }
        StudyEvent::BackfillCategories => {
            let mut words = state.words.clone();
            classifier::backfill(&mut words);
            StudyState {
                words,
                progress: state.progress.clone(),
            }
        }
        StudyEvent::ResetProgress => {
            // Reset skips auto-unlock so the snapshot really is the default one.
            return Ok(StudyState {
                words: state.words.clone(),
                progress: UserProgress::default(),
            });
        }
    };

    Ok(StudyState {
        progress: auto_unlock(&next.progress, &next.words),
        words: next.words,
    })
}

fn position(words: &[WordEntry], id: i64) -> Result<usize, Rejection> {
    words
        .iter()
        .position(|w| w.id == id)
        .ok_or(Rejection::WordNotFound(id))
}

fn explicit_category(category_id: Option<&str>) -> Option<String> {
    category_id
        .map(str::trim)
        .filter(|id| category::is_selectable(id))
        .map(str::to_string)
}

fn add_word(
    state: &StudyState,
    term: &str,
    meaning: &str,
    category_id: Option<&str>,
) -> Result<StudyState, Rejection> {
    let (term, meaning) = normalize_word_fields(term, meaning)?;
    let category_id = explicit_category(category_id)
        .unwrap_or_else(|| classifier::classify(&term, &meaning).to_string());

    let entry = WordEntry {
        category_id,
        ..WordEntry::new(word::next_id(&state.words), &term, &meaning)
    };

    let mut words = state.words.clone();
    words.push(entry);
    Ok(StudyState {
        words,
        progress: state.progress.clone(),
    })
}

fn edit_word(
    state: &StudyState,
    id: i64,
    term: &str,
    meaning: &str,
    category_id: Option<&str>,
) -> Result<StudyState, Rejection> {
    let index = position(&state.words, id)?;
    let (term, meaning) = normalize_word_fields(term, meaning)?;

    let mut words = state.words.clone();
    let word = &mut words[index];
    word.term = term;
    word.meaning = meaning;
    if let Some(category_id) = explicit_category(category_id) {
        word.category_id = category_id;
    }

    Ok(StudyState {
        words,
        progress: state.progress.clone(),
    })
}

fn answer_quiz(
    state: &StudyState,
    word_id: i64,
    correct: bool,
    today: NaiveDate,
) -> Result<StudyState, Rejection> {
    let index = position(&state.words, word_id)?;
    let mut words = state.words.clone();
    let mut progress = state.progress.clone();

    let word = &mut words[index];
    if correct {
        if word.correct_count == 0 {
            progress = progress.record_word_learned();
        }
        word.correct_count = word.correct_count.saturating_add(1);
        progress = progress.add_xp(XP_PER_CORRECT_ANSWER);
    } else {
        word.incorrect_count = word.incorrect_count.saturating_add(1);
    }

    Ok(StudyState {
        words,
        progress: progress.update_streak_for_today(today),
    })
}
