//! Owner of the single writable study state.
//!
//! Every event is reduced against the in-memory copy under one lock and the
//! changed snapshots are queued for persistence before the lock is released,
//! so the stored order always matches the applied order.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::constants::DEFAULT_SEED_WORDS;
use crate::services::persistence::PersistenceGateway;
use crate::study::classifier;
use crate::study::reducer::{reduce, Rejection, StudyEvent, StudyState};
use crate::study::word::WordEntry;

pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Built-in starter words, already classified.
pub fn default_seed_words() -> Vec<WordEntry> {
    DEFAULT_SEED_WORDS
        .iter()
        .map(|(id, term, meaning)| classifier::apply(&WordEntry::new(*id, term, meaning)))
        .collect()
}

pub struct StudyService {
    state: Mutex<StudyState>,
    gateway: Arc<PersistenceGateway>,
    clock: Clock,
}

impl StudyService {
    /// Loads the stored collections, seeding the defaults first when asked.
    pub async fn start(gateway: Arc<PersistenceGateway>, seed_defaults: bool) -> Self {
        Self::start_with_clock(gateway, seed_defaults, local_today).await
    }

    pub async fn start_with_clock(
        gateway: Arc<PersistenceGateway>,
        seed_defaults: bool,
        clock: Clock,
    ) -> Self {
        if seed_defaults {
            gateway.ensure_seeded(default_seed_words());
            gateway.flush().await;
        }

        let state = StudyState {
            words: gateway.stored_words(),
            progress: gateway.stored_progress(),
        };
        tracing::info!(
            words = state.words.len(),
            level = state.progress.level,
            "Study state loaded"
        );

        Self {
            state: Mutex::new(state),
            gateway,
            clock,
        }
    }

    pub async fn snapshot(&self) -> StudyState {
        self.state.lock().await.clone()
    }

    pub async fn apply(&self, event: StudyEvent) -> Result<StudyState, Rejection> {
        let today = (self.clock)();
        self.apply_on(event, today).await
    }

    pub async fn apply_on(
        &self,
        event: StudyEvent,
        today: NaiveDate,
    ) -> Result<StudyState, Rejection> {
        let mut state = self.state.lock().await;

        let next = match reduce(&state, &event, today) {
            Ok(next) => next,
            Err(rejection) => {
                tracing::debug!(event = event.name(), reason = %rejection, "Study event rejected");
                return Err(rejection);
            }
        };

        if next.words != state.words {
            self.gateway.set_words(next.words.clone());
        }
        if next.progress != state.progress {
            self.gateway.save_progress(next.progress.clone());
        }

        tracing::info!(
            event = event.name(),
            words = next.words.len(),
            level = next.progress.level,
            xp = next.progress.current_xp,
            score = event.score(),
            "Study event applied"
        );
        *state = next.clone();
        Ok(next)
    }
}
