mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use futures::StreamExt;
use http_body_util::BodyExt;

use common::app::spawn_seeded_app;
use common::http::{add_word, request};

/// Reads SSE frames until every needle has shown up or the deadline passes.
async fn read_until(body: &mut axum::body::BodyDataStream, needles: &[&str]) -> String {
    let mut seen = String::new();
    let deadline = tokio::time::sleep(Duration::from_secs(5));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            chunk = body.next() => match chunk {
                Some(Ok(bytes)) => {
                    seen.push_str(&String::from_utf8_lossy(&bytes));
                    if needles.iter().all(|n| seen.contains(n)) {
                        return seen;
                    }
                }
                _ => return seen,
            },
            _ = &mut deadline => return seen,
        }
    }
}

#[tokio::test]
async fn it_sse_sends_initial_snapshots() {
    let app = spawn_seeded_app().await;

    let response = request(&app.app, Method::GET, "/api/realtime/events", None, &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.contains("text/event-stream"));

    let mut body = response.into_body().into_data_stream();
    let seen = read_until(&mut body, &["event: words", "event: progress", "compose"]).await;
    assert!(seen.contains("event: words"), "missing words event: {seen}");
    assert!(seen.contains("compose"));
    assert!(seen.contains("event: progress"), "missing progress event: {seen}");
}

#[tokio::test]
async fn it_sse_pushes_after_write() {
    let app = spawn_seeded_app().await;

    let response = request(&app.app, Method::GET, "/api/realtime/events", None, &[]).await;
    let mut body = response.into_body().into_data_stream();
    read_until(&mut body, &["event: words", "event: progress"]).await;

    add_word(&app.app, "passport", "travel document").await;
    app.flush().await;

    let seen = read_until(&mut body, &["passport"]).await;
    assert!(seen.contains("passport"), "write not pushed: {seen}");
}

#[tokio::test]
async fn it_sse_ends_on_shutdown() {
    let app = spawn_seeded_app().await;

    let response = request(&app.app, Method::GET, "/api/realtime/events", None, &[]).await;
    let mut body = response.into_body();
    app.shutdown_tx.send(()).unwrap();

    let drained = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(frame) = body.frame().await {
            if frame.is_err() {
                break;
            }
        }
    })
    .await;
    assert!(drained.is_ok(), "stream did not end after shutdown");
}
