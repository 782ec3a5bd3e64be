#![allow(dead_code)]

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;

/// Serves `/entries/:word` on an ephemeral port and returns the base URL.
///
/// - `cat`    → one entry with audio
/// - `broken` → 200 with an HTML body
/// - `empty`  → 200 with `[]`
/// - other    → 404 with the not-found shape
pub async fn spawn() -> String {
    let app = Router::new().route("/entries/:word", get(entry));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock dictionary");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}/entries", addr)
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/entries", addr)
}

async fn entry(Path(word): Path<String>) -> Response {
    match word.as_str() {
        "cat" => Json(json!([{
            "word": "cat",
            "meanings": [{ "definitions": [{ "definition": "A small domesticated carnivore." }] }],
            "phonetics": [{ "audio": "https://x/cat.mp3" }]
        }]))
        .into_response(),
        "broken" => (StatusCode::OK, "<html>upstream hiccup</html>").into_response(),
        "empty" => Json(json!([])).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "title": "No Definitions Found",
                "message": format!("Sorry pal, we couldn't find definitions for {}.", word),
                "resolution": "You can try the search again at later time or head to the web instead."
            })),
        )
            .into_response(),
    }
}
