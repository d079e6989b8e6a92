//! Shared helpers for the API test binaries
//!
//! - [`test_config`]: a `Config` that needs no environment
//! - [`mock_app`]: the full router over mock stores
//! - [`TestContext`]: the full router over a real database (`DATABASE_URL`)
//! - request and body helpers

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig};
use taskboard_shared::store::mock::{MockProjectStore, MockTaskStore, MockUserStore};

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            shutdown_grace_seconds: 1,
        },
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/taskboard_test".to_string()),
            max_connections: 5,
            run_migrations: true,
        },
    }
}

pub fn mock_app(users: MockUserStore, tasks: MockTaskStore, projects: MockProjectStore) -> Router {
    build_router(AppState::with_stores(
        Arc::new(users),
        Arc::new(tasks),
        Arc::new(projects),
        test_config(),
    ))
}

pub fn users_app(users: MockUserStore) -> Router {
    mock_app(users, MockTaskStore::new(), MockProjectStore::new())
}

pub fn tasks_app(tasks: MockTaskStore) -> Router {
    mock_app(MockUserStore::new(), tasks, MockProjectStore::new())
}

pub fn projects_app(projects: MockProjectStore) -> Router {
    mock_app(MockUserStore::new(), MockTaskStore::new(), projects)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Router wired to PostgreSQL
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
}

impl TestContext {
    /// Connects to `DATABASE_URL` and applies the embedded migrations
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        let db = PgPool::connect(&config.database.url).await?;

        taskboard_shared::db::migrations::run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self { db, app })
    }

    /// Removes rows whose text columns carry `marker`
    pub async fn cleanup(&self, marker: &str) -> anyhow::Result<()> {
        let pattern = format!("%{}%", marker);

        sqlx::query("DELETE FROM tasks WHERE title LIKE $1")
            .bind(&pattern)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM projects WHERE title LIKE $1")
            .bind(&pattern)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM users WHERE email LIKE $1")
            .bind(&pattern)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
