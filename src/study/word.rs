use serde::{Deserialize, Serialize};

use crate::study::category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: i64,
    pub term: String,
    pub meaning: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub category_id: String,
}

impl WordEntry {
    pub fn new(id: i64, term: &str, meaning: &str) -> Self {
        Self {
            id,
            term: term.to_string(),
            meaning: meaning.to_string(),
            correct_count: 0,
            incorrect_count: 0,
            category_id: category::UNCATEGORIZED.to_string(),
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.correct_count.saturating_add(self.incorrect_count)
    }

    /// Percentage of correct answers, 0 when the word was never asked.
    pub fn accuracy_rate(&self) -> f64 {
        let total = self.total_attempts();
        if total == 0 {
            0.0
        } else {
            f64::from(self.correct_count) / f64::from(total) * 100.0
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category_id == category::UNCATEGORIZED
    }
}

/// Next id for a new word: one past the largest id in use.
pub fn next_id(words: &[WordEntry]) -> i64 {
    words.iter().map(|w| w.id).max().unwrap_or(0).saturating_add(1)
}

/// Keeps the last entry per id and orders the result by id.
pub fn dedup_by_id_sorted(words: &[WordEntry]) -> Vec<WordEntry> {
    let mut by_id = std::collections::BTreeMap::new();
    for word in words {
        by_id.insert(word.id, word.clone());
    }
    by_id.into_values().collect()
}

/// Case-insensitive substring search over term and meaning; blank query keeps all.
pub fn search<'a>(words: &[&'a WordEntry], query: &str) -> Vec<&'a WordEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return words.to_vec();
    }
    words
        .iter()
        .copied()
        .filter(|w| {
            w.term.to_lowercase().contains(&query) || w.meaning.to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    pub word_count: usize,
    pub total_correct: u64,
    pub total_incorrect: u64,
    pub accuracy: f64,
}

pub fn stats<'a>(words: impl IntoIterator<Item = &'a WordEntry>) -> WordStats {
    let mut word_count = 0usize;
    let mut total_correct = 0u64;
    let mut total_incorrect = 0u64;
    for word in words {
        word_count += 1;
        total_correct += u64::from(word.correct_count);
        total_incorrect += u64::from(word.incorrect_count);
    }
    let attempts = total_correct + total_incorrect;
    let accuracy = if attempts > 0 {
        total_correct as f64 / attempts as f64 * 100.0
    } else {
        0.0
    };
    WordStats {
        word_count,
        total_correct,
        total_incorrect,
        accuracy,
    }
}
