use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{self, Config};
use crate::db;
use crate::todo::TodoState;
use crate::todo::web::create_todo_router;

pub mod api;

/// Everything the router needs, built once at start-up and shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub todos: Arc<TodoState>,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        Self::with_todo_state(config, TodoState::new(db))
    }

    pub fn with_todo_state(config: Config, todos: TodoState) -> Self {
        Self {
            config: Arc::new(config),
            todos: Arc::new(todos),
        }
    }
}

/// Assembles the complete application router: JSON API, HTML pages, static files and shared layers.
pub fn create_app(state: AppState) -> Router {
    let api_router = api::create_api_router(state.todos.clone());
    let todo_router = create_todo_router(state.todos.clone());

    Router::new()
        .route("/", get(root_redirect_handler))
        .route("/health", get(health_check_handler))
        .merge(api_router)
        .merge(todo_router)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(state.config.request_timeout())),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = db::connect(&config).await?;
    db::ensure_schema(&db).await?;

    let app = create_app(AppState::new(config, db));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
pub async fn root_redirect_handler() -> Redirect {
    Redirect::to("/todo")
}
