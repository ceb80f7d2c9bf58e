use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use sea_orm::DatabaseConnection;
use todo_server::config::Config;
use todo_server::web::{AppState, create_app};
use tower::ServiceExt;

/// Test context holding an in-memory database and the full application router.
#[allow(dead_code)]
pub struct TestContext {
    pub db: DatabaseConnection,
    pub app: Router,
}

/// Configuration pointing at a private in-memory SQLite database.
pub fn test_config() -> Config {
    Config {
        db_url: Some("sqlite::memory:".to_string()),
        db_max_connections: 1,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
        ..Config::default()
    }
}

pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    let db = todo_server::db::connect(&test_config()).await?;
    todo_server::db::ensure_schema(&db).await?;
    Ok(db)
}

#[allow(dead_code)]
pub async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();
    let db = setup_db().await?;
    let app = create_app(AppState::new(test_config(), db.clone()));
    Ok(TestContext { db, app })
}

/// Response parts collected from a single request against the router.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response body is not JSON")
    }
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}
