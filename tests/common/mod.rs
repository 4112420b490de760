#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use shorturl::config::Config;
use shorturl::infrastructure::persistence::Database;
use shorturl::state::AppState;
use shorturl::utils::code_generator::{CodeGenerator, generate_code};
use sqlx::SqlitePool;

pub const BASE_URL: &str = "http://s.example.com/";
pub const HOME_URL: &str = "http://home.example.com/";

/// Token source that replays a fixed sequence, then falls back to random tokens.
pub struct ScriptedGenerator {
    tokens: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: Mutex::new(tokens.iter().map(|t| t.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self, length: usize) -> String {
        self.tokens
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| generate_code(length))
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        base_url: BASE_URL.to_string(),
        home_url: HOME_URL.to_string(),
        ..Config::default()
    }
}

pub async fn create_test_database() -> Database {
    Database::in_memory().await.unwrap()
}

pub fn sqlite_pool(database: &Database) -> SqlitePool {
    match database {
        Database::Sqlite(pool) => pool.clone(),
        Database::Postgres(_) => panic!("expected an SQLite test database"),
    }
}

pub async fn create_test_state() -> (AppState, Database) {
    let database = create_test_database().await;
    let state = AppState::new(database.clone(), &test_config());
    (state, database)
}

pub async fn create_scripted_state(tokens: &[&str]) -> (AppState, Database) {
    let database = create_test_database().await;
    let state = AppState::with_generator(
        database.clone(),
        &test_config(),
        Arc::new(ScriptedGenerator::new(tokens)),
    );
    (state, database)
}

pub async fn create_test_link(database: &Database, url: &str, token: &str, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO shortlinks (url, token, created_at) VALUES (?, ?, ?)")
        .bind(url)
        .bind(token)
        .bind(created_at.timestamp())
        .execute(&sqlite_pool(database))
        .await
        .unwrap();
}

pub async fn create_test_visit(database: &Database, token: &str, visited_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO visits (token, visited_at) VALUES (?, ?)")
        .bind(token)
        .bind(visited_at.timestamp())
        .execute(&sqlite_pool(database))
        .await
        .unwrap();
}

pub async fn count_visits_for(database: &Database, token: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE token = ?")
        .bind(token)
        .fetch_one(&sqlite_pool(database))
        .await
        .unwrap()
}

pub async fn count_links_for(database: &Database, url: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM shortlinks WHERE url = ?")
        .bind(url)
        .fetch_one(&sqlite_pool(database))
        .await
        .unwrap()
}

/// Polls the visit log until `token` has `expected` visits or two seconds pass.
///
/// Visits are written off the request path, so a count taken right after a
/// redirect may not see them yet. Returns the last count observed.
pub async fn wait_for_visits(database: &Database, token: &str, expected: i64) -> i64 {
    let mut count = count_visits_for(database, token).await;
    for _ in 0..200 {
        if count >= expected {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        count = count_visits_for(database, token).await;
    }
    count
}
