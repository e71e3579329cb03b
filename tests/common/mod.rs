//! In-process backend used by the integration tests

#![allow(dead_code)]

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use recipe_finder::FinderConfig;
use serde_json::{json, Value};
use std::time::Duration;

/// Serve `app` on an ephemeral localhost port and return its base URL
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test backend");
    });
    format!("http://{addr}")
}

pub fn config_for(api_url: &str) -> FinderConfig {
    FinderConfig {
        api_url: api_url.to_string(),
        request_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body[name].as_str().unwrap_or_default()
}

/// Backend that answers every endpoint, echoing request fields
pub fn recipe_backend() -> Router {
    Router::new()
        .route(
            "/translate",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "result": format!("[{}] {}", field(&body, "language"), field(&body, "text"))
                }))
            }),
        )
        .route(
            "/search-recipes",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "result": format!(
                        "**Pasta alla Norma**\nUses {}.",
                        field(&body, "ingredients")
                    )
                }))
            }),
        )
        .route(
            "/give-recipe",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "result": format!(
                        "**{}**\n*Boil water\n*Add **salt**",
                        field(&body, "chosen_recipe")
                    )
                }))
            }),
        )
        .route(
            "/drink-recommendations",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "result": format!("**Nero d'Avola** with {}", field(&body, "chosen_recipe"))
                }))
            }),
        )
}

/// Backend whose endpoints each misbehave in a different way
pub fn broken_backend() -> Router {
    Router::new()
        .route(
            "/search-recipes",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded") }),
        )
        .route(
            "/give-recipe",
            post(|| async { Json(json!({ "answer": "wrong field" })) }),
        )
        .route(
            "/drink-recommendations",
            post(|| async { (StatusCode::OK, "not json") }),
        )
        .route(
            "/translate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "result": "too late" }))
            }),
        )
}
