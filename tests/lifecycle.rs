mod common;

use std::collections::HashSet;

use shorturl::prelude::{AppError, RedirectTarget};
use shorturl::utils::code_generator::ALPHABET;
use shorturl::utils::url_normalizer::normalize_url;

#[tokio::test]
async fn test_github_scenario() {
    let (state, db) = common::create_scripted_state(&["aB3x"]).await;

    let link = state.link_service.shorten("github.com").await.unwrap();
    assert_eq!(link.token, "aB3x");

    let first = state.redirect_service.resolve("aB3x").await.unwrap();
    assert_eq!(first, RedirectTarget::Destination("http://github.com".to_string()));

    let second = state.redirect_service.resolve("aB3x").await.unwrap();
    assert_eq!(second.location(), "http://github.com");
    assert_eq!(common::wait_for_visits(&db, "aB3x", 2).await, 2);

    let unknown = state.redirect_service.resolve("zzzz").await.unwrap();
    assert_eq!(unknown, RedirectTarget::Fallback(common::HOME_URL.to_string()));
    assert_eq!(common::count_visits_for(&db, "zzzz").await, 0);

    let report = state.stats_service.summarize().await.unwrap();
    assert_eq!(report.total_links, 1);
    assert_eq!(report.total_visits, 2);
    let top = report.top_token.unwrap();
    assert_eq!(top.token, "aB3x");
    assert_eq!(top.visits, 2);
    assert_eq!(report.visits_per_day.len(), 1);
    assert_eq!(report.visits_per_day[0].visits, 2);
}

#[tokio::test]
async fn test_resolve_returns_normalized_url() {
    let (state, _db) = common::create_test_state().await;

    for raw in [
        "example.com",
        "https://example.org/path?x=1",
        "  rust-lang.org  ",
        "docs.rs/<tokio>",
    ] {
        let link = state.link_service.shorten(raw).await.unwrap();
        let target = state.redirect_service.resolve(&link.token).await.unwrap();

        assert_eq!(target.location(), normalize_url(raw).unwrap(), "input: {raw}");
    }
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let (state, db) = common::create_test_state().await;

    let first = state.link_service.shorten("example.com").await.unwrap();
    let second = state.link_service.shorten("example.com").await.unwrap();
    let third = state
        .link_service
        .shorten("http://example.com")
        .await
        .unwrap();

    assert_eq!(first.token, second.token);
    assert_eq!(first.token, third.token);
    assert_eq!(common::count_links_for(&db, "http://example.com").await, 1);
}

#[tokio::test]
async fn test_tokens_are_distinct_and_well_formed() {
    let (state, _db) = common::create_test_state().await;
    let mut tokens = HashSet::new();

    for i in 0..200 {
        let link = state
            .link_service
            .shorten(&format!("site{i}.example.com"))
            .await
            .unwrap();

        assert_eq!(link.token.len(), 4);
        assert!(link.token.bytes().all(|b| ALPHABET.contains(&b)));
        tokens.insert(link.token);
    }

    assert_eq!(tokens.len(), 200);
}

#[tokio::test]
async fn test_collision_with_stored_token_is_skipped() {
    let (state, _db) = common::create_scripted_state(&["AAAA", "AAAA", "BBBB"]).await;

    let first = state.link_service.shorten("one.com").await.unwrap();
    let second = state.link_service.shorten("two.com").await.unwrap();

    assert_eq!(first.token, "AAAA");
    assert_eq!(second.token, "BBBB");
}

#[tokio::test]
async fn test_invalid_urls_are_rejected() {
    let (state, _db) = common::create_test_state().await;

    for raw in ["", "   ", "notaurl", "\"<>'"] {
        let err = state.link_service.shorten(raw).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }), "input: {raw:?}");
    }

    let report = state.stats_service.summarize().await.unwrap();
    assert_eq!(report.total_links, 0);
}

#[tokio::test]
async fn test_visit_accounting() {
    let (state, db) = common::create_scripted_state(&["hot1", "cold"]).await;

    state.link_service.shorten("hot.example.com").await.unwrap();
    state.link_service.shorten("cold.example.com").await.unwrap();

    let before = state.stats_service.summarize().await.unwrap().total_visits;

    for _ in 0..5 {
        state.redirect_service.resolve("hot1").await.unwrap();
    }
    state.redirect_service.resolve("cold").await.unwrap();
    state.redirect_service.resolve("nope").await.unwrap();

    assert_eq!(common::wait_for_visits(&db, "hot1", 5).await, 5);
    assert_eq!(common::wait_for_visits(&db, "cold", 1).await, 1);

    let report = state.stats_service.summarize().await.unwrap();
    assert_eq!(report.total_visits, before + 6);
    assert_eq!(report.top_token.unwrap().token, "hot1");
    assert_eq!(common::count_visits_for(&db, "nope").await, 0);
}

#[tokio::test]
async fn test_empty_store_summary() {
    let (state, _db) = common::create_test_state().await;

    let report = state.stats_service.summarize().await.unwrap();

    assert_eq!(report.total_links, 0);
    assert!(report.first_created_at.is_none());
    assert!(report.last_created_at.is_none());
    assert_eq!(report.total_visits, 0);
    assert!(report.top_token.is_none());
    assert!(report.visits_per_day.is_empty());
}

#[tokio::test]
async fn test_lookup_does_not_record_visit() {
    let (state, db) = common::create_scripted_state(&["look"]).await;
    state.link_service.shorten("example.com").await.unwrap();

    let link = state.link_service.get_link_by_token("look").await.unwrap();

    assert_eq!(link.url, "http://example.com");
    assert_eq!(common::count_visits_for(&db, "look").await, 0);
}

#[tokio::test]
async fn test_route_names_are_never_issued() {
    let (state, _db) = common::create_scripted_state(&["api", "health", "tok1"]).await;

    let link = state.link_service.shorten("example.com").await.unwrap();

    assert_eq!(link.token, "tok1");
}
