use askama::Template;
use axum::{
    Form, Router,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::todo::api::v1::ApiError;
use crate::todo::{TodoItem, TodoPayload, TodoServiceError, TodoState};

const LIST_TITLE: &str = "Todo List";

/// Fields posted by the add and edit forms. An unchecked `done` checkbox is absent from the form.
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    title: String,
    description: String,
    #[serde(default)]
    done: Option<String>,
}

impl From<TodoForm> for TodoPayload {
    fn from(form: TodoForm) -> Self {
        TodoPayload::new(form.title, form.description, form.done.is_some())
    }
}

/// Custom error type for todo page handlers.
#[derive(Debug, thiserror::Error)]
pub enum TodoPageError {
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// Request or data access failures, answered the same way as the JSON API.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<TodoServiceError> for TodoPageError {
    fn from(err: TodoServiceError) -> Self {
        TodoPageError::Api(ApiError::from(err))
    }
}

impl From<PathRejection> for TodoPageError {
    fn from(rejection: PathRejection) -> Self {
        TodoPageError::Api(ApiError::from(rejection))
    }
}

impl From<FormRejection> for TodoPageError {
    fn from(rejection: FormRejection) -> Self {
        TodoPageError::Api(ApiError::from(rejection))
    }
}

impl IntoResponse for TodoPageError {
    fn into_response(self) -> axum::response::Response {
        match self {
            TodoPageError::Api(err) => err.into_response(),
            TodoPageError::Template(err) => {
                tracing::error!("Failed to render todo page: {}", err);
                let user_facing_error_message = "An unexpected error occurred while processing your request. Please try again later.";
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!(
                        "<h1>Internal Server Error</h1><p>{}</p>",
                        user_facing_error_message
                    )),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    title: String,
    header: String,
    todos: Vec<TodoItem>,
}

impl HomeTemplate {
    pub fn new(todos: Vec<TodoItem>) -> Self {
        Self {
            title: LIST_TITLE.to_string(),
            header: LIST_TITLE.to_string(),
            todos,
        }
    }
}

#[derive(Template)]
#[template(path = "item.html")]
struct ItemTemplate {
    item: TodoItem,
}

#[derive(Template)]
#[template(path = "add_item.html")]
struct AddItemTemplate {
    header: String,
}

#[derive(Template)]
#[template(path = "edit_item.html")]
struct EditItemTemplate {
    header: String,
    item: TodoItem,
}

/// Handler for GET /todo that displays every item.
#[tracing::instrument(skip(state))]
async fn home_page_handler(
    State(state): State<Arc<TodoState>>,
) -> Result<Html<String>, TodoPageError> {
    let todos = state.repository.get_all_todos().await?;
    let template = HomeTemplate::new(todos);
    Ok(Html(template.render()?))
}

/// Handler for GET /todo/{id} that displays a single item.
#[tracing::instrument(skip(state))]
async fn item_page_handler(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Html<String>, TodoPageError> {
    let Path(id) = id?;
    let item = state.repository.get_todo_by_id(id).await?;
    let template = ItemTemplate { item };
    Ok(Html(template.render()?))
}

/// Handler for GET /todo/new that serves the add form.
#[tracing::instrument]
async fn add_page_handler() -> Result<Html<String>, TodoPageError> {
    let template = AddItemTemplate {
        header: "Add item to list".to_string(),
    };
    Ok(Html(template.render()?))
}

/// Handler for GET /todo/edit/{id} that serves the edit form prefilled with the item.
#[tracing::instrument(skip(state))]
async fn edit_page_handler(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Html<String>, TodoPageError> {
    let Path(id) = id?;
    let item = state.repository.get_todo_by_id(id).await?;
    let template = EditItemTemplate {
        header: "Edit item in list".to_string(),
        item,
    };
    Ok(Html(template.render()?))
}

/// Handler for POST /todo that creates an item from the add form.
#[tracing::instrument(skip(state))]
async fn create_todo_form_handler(
    State(state): State<Arc<TodoState>>,
    form: Result<Form<TodoForm>, FormRejection>,
) -> Result<Redirect, TodoPageError> {
    let Form(form) = form?;
    state.repository.create_todo(form.into()).await?;
    Ok(Redirect::to("/todo"))
}

/// Handler for POST /todo/{id} that updates an item from the edit form.
#[tracing::instrument(skip(state))]
async fn update_todo_form_handler(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
    form: Result<Form<TodoForm>, FormRejection>,
) -> Result<Redirect, TodoPageError> {
    let Path(id) = id?;
    let Form(form) = form?;
    state.repository.update_todo(id, form.into()).await?;
    Ok(Redirect::to("/todo"))
}

/// Creates and returns the router with all todo page routes.
pub fn create_todo_router(state: Arc<TodoState>) -> Router {
    Router::new()
        .route(
            "/todo",
            get(home_page_handler).post(create_todo_form_handler),
        )
        .route("/todo/new", get(add_page_handler))
        .route(
            "/todo/{id}",
            get(item_page_handler).post(update_todo_form_handler),
        )
        .route("/todo/edit/{id}", get(edit_page_handler))
        .with_state(state)
}
