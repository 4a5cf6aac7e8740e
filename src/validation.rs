//! Input checks shared by the study reducer and the HTTP layer.

use crate::constants::{MAX_MEANING_CHARS, MAX_TERM_CHARS};
use crate::study::reducer::Rejection;

/// Trims both sides of a flashcard and rejects blank or oversized input.
pub fn normalize_word_fields(term: &str, meaning: &str) -> Result<(String, String), Rejection> {
    let term = term.trim();
    let meaning = meaning.trim();
    if term.is_empty() || meaning.is_empty() {
        return Err(Rejection::EmptyField);
    }
    check_length("term", term, MAX_TERM_CHARS)?;
    check_length("meaning", meaning, MAX_MEANING_CHARS)?;
    Ok((term.to_string(), meaning.to_string()))
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), Rejection> {
    // Limits count chars, not bytes.
    if value.chars().count() > max {
        return Err(Rejection::FieldTooLong { field, max });
    }
    Ok(())
}
