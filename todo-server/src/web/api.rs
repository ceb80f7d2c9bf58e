use std::sync::Arc;

use crate::todo::{self, TodoItem, TodoPayload, TodoState};

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// JSON body returned by every failing API request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of the failure
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        todo::api::v1::get_todos_handler,
        todo::api::v1::get_todo_handler,
        todo::api::v1::create_todo_handler,
        todo::api::v1::update_todo_handler,
        todo::api::v1::delete_todo_handler,
    ),
    components(schemas(TodoItem, TodoPayload, ErrorResponse)),
    tags((name = "Todo", description = "Todo list management"))
)]
pub struct ApiDoc;

#[tracing::instrument]
async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints, mounted under `/api`.
pub fn create_api_router(todo_state: Arc<TodoState>) -> axum::Router {
    let todo_routes = todo::api::v1::create_api_router(todo_state);
    let api_routes = todo_routes.route("/openapi.json", get(openapi_handler));
    Router::new().nest("/api", api_routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_document_every_todo_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.contains(&&"/api/todo".to_string()));
        assert!(paths.contains(&&"/api/todo/{id}".to_string()));
    }

    #[test]
    fn can_serialize_error_response() {
        let body = serde_json::to_value(ErrorResponse::new("boom".to_string())).unwrap();
        assert_eq!(body, serde_json::json!({"error": "boom"}));
    }
}
