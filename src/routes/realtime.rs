use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;
use futures::{Stream, StreamExt};
use serde::Serialize;

use crate::routes::progress::ProgressView;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(sse_handler))
}

/// Pushes the stored word list (`words`) and progress (`progress`) once on
/// connect and again after every successful write, until shutdown.
pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut words = state.gateway().words_stream();
    let mut progress = state.gateway().progress_stream();
    let mut shutdown_rx = state.shutdown_rx();

    let stream = async_stream::stream! {
        loop {
            tokio::select! {
                Some(list) = words.next() => {
                    if let Some(event) = json_event("words", &list) {
                        yield Ok(event);
                    }
                }
                Some(snapshot) = progress.next() => {
                    if let Some(event) = json_event("progress", &ProgressView::from(snapshot)) {
                        yield Ok(event);
                    }
                }
                _ = shutdown_rx.recv() => break,
                else => break,
            }
        }
        tracing::debug!("Realtime stream closed");
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    )
}

fn json_event<T: Serialize>(name: &str, payload: &T) -> Option<Event> {
    match serde_json::to_string(payload) {
        Ok(json) => Some(Event::default().event(name).data(json)),
        Err(e) => {
            tracing::warn!(event = name, error = %e, "Failed to encode realtime event");
            None
        }
    }
}
