//! JSON payloads kept in the store.
//!
//! Encoding is strict. Decoding is fail-soft: a malformed payload becomes an
//! empty list or default progress, and bad records inside a list are skipped.

use serde::{Deserialize, Serialize};

use crate::study::category::UNCATEGORIZED;
use crate::study::progress::{format_date, parse_date, UserProgress, MAX_LEVEL};
use crate::study::word::{dedup_by_id_sorted, WordEntry};

pub const EMPTY_JSON: &str = "[]";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWord {
    #[serde(default = "missing_id")]
    id: i64,
    #[serde(default)]
    term: String,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    correct_count: u32,
    #[serde(default)]
    incorrect_count: u32,
    #[serde(default)]
    category_id: Option<String>,
}

fn missing_id() -> i64 {
    -1
}

impl StoredWord {
    fn into_entry(self) -> Option<WordEntry> {
        let term = self.term.trim();
        let meaning = self.meaning.trim();
        if self.id < 0 || term.is_empty() || meaning.is_empty() {
            return None;
        }
        let category_id = self
            .category_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        Some(WordEntry {
            id: self.id,
            term: term.to_string(),
            meaning: meaning.to_string(),
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
            category_id,
        })
    }
}

/// Deduplicates by id (last wins) and sorts ascending before encoding.
pub fn encode_words(words: &[WordEntry]) -> Result<String, serde_json::Error> {
    let deduped = dedup_by_id_sorted(words);
    if deduped.is_empty() {
        return Ok(EMPTY_JSON.to_string());
    }
    serde_json::to_string(&deduped)
}

pub fn decode_words(raw: &[u8]) -> Vec<WordEntry> {
    let items: Vec<serde_json::Value> = match serde_json::from_slice(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Stored word list is malformed, using empty list");
            return Vec::new();
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut skipped = 0usize;
    for item in items {
        match serde_json::from_value::<StoredWord>(item)
            .ok()
            .and_then(StoredWord::into_entry)
        {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "Skipped invalid stored word records");
    }

    dedup_by_id_sorted(&entries)
}

/// True for an absent, blank or `[]` word payload.
pub fn is_empty_words_payload(raw: Option<&[u8]>) -> bool {
    match raw {
        None => true,
        Some(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            let text = text.trim();
            text.is_empty() || text == EMPTY_JSON
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredProgress {
    level: u32,
    #[serde(rename = "currentXP")]
    current_xp: u32,
    current_streak: u32,
    longest_streak: u32,
    last_study_date: String,
    total_quizzes_taken: u32,
    total_words_learned: u32,
    unlocked_badges: Vec<String>,
}

impl Default for StoredProgress {
    fn default() -> Self {
        Self::from(&UserProgress::default())
    }
}

impl From<&UserProgress> for StoredProgress {
    fn from(p: &UserProgress) -> Self {
        Self {
            level: p.level,
            current_xp: p.current_xp,
            current_streak: p.current_streak,
            longest_streak: p.longest_streak,
            last_study_date: p.last_study_date.map(format_date).unwrap_or_default(),
            total_quizzes_taken: p.total_quizzes_taken,
            total_words_learned: p.total_words_learned,
            unlocked_badges: p.unlocked_badges.clone(),
        }
    }
}

impl From<StoredProgress> for UserProgress {
    fn from(s: StoredProgress) -> Self {
        let mut unlocked_badges: Vec<String> = Vec::with_capacity(s.unlocked_badges.len());
        for badge in s.unlocked_badges {
            if !badge.is_empty() && !unlocked_badges.contains(&badge) {
                unlocked_badges.push(badge);
            }
        }

        let progress = UserProgress {
            level: s.level.clamp(1, MAX_LEVEL),
            current_xp: s.current_xp,
            current_streak: s.current_streak,
            longest_streak: s.longest_streak.max(s.current_streak),
            last_study_date: parse_date(&s.last_study_date),
            total_quizzes_taken: s.total_quizzes_taken,
            total_words_learned: s.total_words_learned,
            unlocked_badges,
        };
        // Re-normalize in case the stored XP is over the level threshold.
        progress.add_xp(0)
    }
}

pub fn encode_progress(progress: &UserProgress) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredProgress::from(progress))
}

pub fn decode_progress(raw: &[u8]) -> UserProgress {
    match serde_json::from_slice::<StoredProgress>(raw) {
        Ok(stored) => stored.into(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored progress is malformed, using defaults");
            UserProgress::default()
        }
    }
}
