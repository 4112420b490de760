mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use shorturl::api::handlers::shorten_handler;
use shorturl::config::Config;
use shorturl::state::AppState;
use std::sync::Arc;

fn create_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_single_url_success() {
    let (state, _db) = common::create_scripted_state(&["aB3x"]).await;
    let server = create_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                {
                    "url": "github.com"
                }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["summary"]["total"], 1);
    assert_eq!(json["summary"]["successful"], 1);
    assert_eq!(json["summary"]["failed"], 0);

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["long_url"], "github.com");
    assert_eq!(items[0]["url"], "http://github.com");
    assert_eq!(items[0]["token"], "aB3x");
    assert_eq!(items[0]["short_url"], "http://s.example.com/aB3x");
}

#[tokio::test]
async fn test_shorten_batch_with_invalid_items() {
    let (state, _db) = common::create_test_state().await;
    let server = create_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "url": "https://example.com" },
                { "url": "notaurl" },
                { "url": "   " },
                { "url": "rust-lang.org" }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["summary"]["total"], 4);
    assert_eq!(json["summary"]["successful"], 2);
    assert_eq!(json["summary"]["failed"], 2);

    let items = json["items"].as_array().unwrap();
    assert!(items[0]["token"].is_string());

    assert_eq!(items[1]["long_url"], "notaurl");
    assert_eq!(items[1]["error"]["code"], "invalid_url");
    assert_eq!(items[1]["error"]["details"]["reason"], "no_domain_marker");

    assert_eq!(items[2]["error"]["code"], "invalid_url");
    assert_eq!(items[2]["error"]["details"]["reason"], "empty");

    assert_eq!(items[3]["url"], "http://rust-lang.org");
}

#[tokio::test]
async fn test_shorten_same_url_returns_same_token() {
    let (state, _db) = common::create_test_state().await;
    let server = create_server(state);

    let body = json!({ "urls": [ { "url": "example.com" }, { "url": "http://example.com" } ] });

    let first = server.post("/api/shorten").json(&body).await;
    let second = server.post("/api/shorten").json(&body).await;

    let first = first.json::<serde_json::Value>();
    let second = second.json::<serde_json::Value>();

    let token = &first["items"][0]["token"];
    assert!(token.is_string());
    assert_eq!(&first["items"][1]["token"], token);
    assert_eq!(&second["items"][0]["token"], token);
    assert_eq!(&second["items"][1]["token"], token);
}

#[tokio::test]
async fn test_shorten_empty_batch() {
    let (state, _db) = common::create_test_state().await;
    let server = create_server(state);

    let response = server.post("/api/shorten").json(&json!({ "urls": [] })).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_shorten_oversized_batch() {
    let (state, _db) = common::create_test_state().await;
    let server = create_server(state);

    let urls: Vec<_> = (0..101)
        .map(|i| json!({ "url": format!("site{i}.example.com") }))
        .collect();

    let response = server.post("/api/shorten").json(&json!({ "urls": urls })).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_shorten_invalid_json() {
    let (state, _db) = common::create_test_state().await;
    let server = create_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "invalid": "data" }))
        .await;

    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn test_shorten_exhausted_token_space() {
    let db = common::create_test_database().await;
    common::create_test_link(&db, "http://taken.com", "BBBB", Utc::now()).await;

    let config = Config {
        token_max_attempts: 3,
        ..common::test_config()
    };
    let state = AppState::with_generator(
        db.clone(),
        &config,
        Arc::new(common::ScriptedGenerator::new(&["BBBB", "BBBB", "BBBB"])),
    );
    let server = create_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "urls": [ { "url": "fresh.example.com" } ] }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["summary"]["failed"], 1);
    assert_eq!(json["items"][0]["error"]["code"], "token_space_exhausted");
    assert_eq!(json["items"][0]["error"]["details"]["attempts"], 3);
}
