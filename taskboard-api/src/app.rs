/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::store::{
    PgProjectStore, PgTaskStore, PgUserStore, ProjectStore, TaskStore, UserStore,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler by axum's `State` extractor. The accessors are
/// read-only; the only shared resource behind them is the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,

    pub tasks: Arc<dyn TaskStore>,

    pub projects: Arc<dyn ProjectStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the PostgreSQL accessors to one pool
    pub fn new(db: PgPool, config: Config) -> Self {
        Self::with_stores(
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgTaskStore::new(db.clone())),
            Arc::new(PgProjectStore::new(db)),
            config,
        )
    }

    /// Builds state from arbitrary accessors (e.g. the mocks in tests)
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        projects: Arc<dyn ProjectStore>,
        config: Config,
    ) -> Self {
        Self {
            users,
            tasks,
            projects,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router
///
/// ```text
/// GET    /health-check
/// GET    /users                 POST /users
/// GET    /users/search?email=|name=
/// GET    /users/:id             PUT /users/:id      DELETE /users/:id
/// GET    /users/:id/tasks
/// GET    /tasks                 POST /tasks
/// GET    /tasks/search?title=|status=|priority=|assignee=|project=
/// GET    /tasks/:id             PUT /tasks/:id      DELETE /tasks/:id
/// GET    /projects              POST /projects
/// GET    /projects/search?title=|manager=
/// GET    /projects/:id          PUT /projects/:id   DELETE /projects/:id
/// GET    /projects/:id/tasks
/// ```
///
/// Static `search` segments take precedence over `:id`.
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, projects, tasks, users};

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/search", get(users::search_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/tasks", get(users::user_tasks));

    let task_routes = Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/search", get(tasks::search_tasks))
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        );

    let project_routes = Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/search", get(projects::search_projects))
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/:id/tasks", get(projects::project_tasks));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health-check", get(health::health_check))
        .merge(user_routes)
        .merge(task_routes)
        .merge(project_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
