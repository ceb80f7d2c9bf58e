use crate::todo::{TodoItem, TodoPayload, TodoServiceError, TodoState};
use crate::web::api::ErrorResponse;
use axum::{
    Router,
    extract::{
        Path, State,
        rejection::{FormRejection, JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use std::sync::Arc;

/// Error type for todo handlers, rendered as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The path, query or body of the request could not be parsed.
    #[error("{0}")]
    BadRequest(String),
    /// The data access layer refused or failed the operation.
    #[error(transparent)]
    Service(#[from] TodoServiceError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(TodoServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(TodoServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(TodoServiceError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid todo item ID: {}", rejection.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!("Todo request failed: {}", self);
        } else {
            tracing::warn!("Rejected todo request: {}", self);
        }
        (status_code, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Handler for GET /api/todo - Returns every todo item.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/todo",
    responses(
        (status = 200, description = "Successfully retrieved todo items", body = [TodoItem]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todo"
)]
pub async fn get_todos_handler(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let todos = state.repository.get_all_todos().await?;
    Ok(Json(todos))
}

/// Handler for GET /api/todo/{id} - Returns a single todo item.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/todo/{id}",
    params(("id" = i32, Path, description = "ID of the todo item")),
    responses(
        (status = 200, description = "Successfully retrieved the todo item", body = TodoItem),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Todo item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todo"
)]
pub async fn get_todo_handler(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let Path(id) = id?;
    let todo = state.repository.get_todo_by_id(id).await?;
    Ok(Json(todo))
}

/// Handler for POST /api/todo - Creates a todo item.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/todo",
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Successfully created the todo item", body = TodoItem),
        (status = 400, description = "Malformed body or empty fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todo"
)]
pub async fn create_todo_handler(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let Json(payload) = payload?;
    let todo = state.repository.create_todo(payload).await?;
    Ok(Json(todo))
}

/// Handler for PUT /api/todo/{id} - Replaces the fields of a todo item.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/todo/{id}",
    params(("id" = i32, Path, description = "ID of the todo item")),
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Successfully updated the todo item", body = TodoItem),
        (status = 400, description = "Malformed ID, body or empty fields", body = ErrorResponse),
        (status = 404, description = "Todo item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todo"
)]
pub async fn update_todo_handler(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let todo = state.repository.update_todo(id, payload).await?;
    Ok(Json(todo))
}

/// Handler for DELETE /api/todo/{id} - Removes a todo item and answers with `null`.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/todo/{id}",
    params(("id" = i32, Path, description = "ID of the todo item")),
    responses(
        (status = 200, description = "Successfully deleted the todo item"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Todo item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todo"
)]
pub async fn delete_todo_handler(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<()>, ApiError> {
    let Path(id) = id?;
    state.repository.delete_todo(id).await?;
    Ok(Json(()))
}

/// Creates and returns the todo API router. Routes are relative to the `/api` prefix.
pub fn create_api_router(state: Arc<TodoState>) -> Router {
    Router::new()
        .route("/todo", get(get_todos_handler).post(create_todo_handler))
        .route(
            "/todo/{id}",
            get(get_todo_handler)
                .put(update_todo_handler)
                .delete(delete_todo_handler),
        )
        .with_state(state)
}
