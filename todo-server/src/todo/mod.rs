use crate::entities::*;
use async_trait::async_trait;
use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

pub mod api;
pub mod web;

/// A single entry of the todo list as stored in the `todolist` table.
#[derive(Debug, PartialEq, Clone, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct TodoItem {
    /// Server-assigned identifier, never reused
    pub id: i32,
    /// Short title of the item
    pub title: String,
    /// Longer description of the item
    pub description: String,
    /// Whether the item is finished
    pub done: bool,
}

impl TodoItem {
    pub fn new(id: i32, title: String, description: String, done: bool) -> Self {
        Self {
            id,
            title,
            description,
            done,
        }
    }
}

impl From<todo_item::Model> for TodoItem {
    fn from(model: todo_item::Model) -> Self {
        TodoItem::new(model.id, model.title, model.description, model.done)
    }
}

/// The client-supplied fields of a todo item, used for both creation and update.
#[derive(Debug, PartialEq, Clone, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoPayload {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoPayload {
    pub fn new(title: impl Into<String>, description: impl Into<String>, done: bool) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            done,
        }
    }

    /// Checks that title and description are not blank.
    pub fn validate(&self) -> Result<(), TodoServiceError> {
        if self.title.trim().is_empty() {
            return Err(TodoServiceError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(TodoServiceError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for todo data access operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoServiceError {
    /// A required field was empty.
    #[error("{0}")]
    Validation(String),
    /// No row exists for the requested ID.
    #[error("Todo item with ID {0} not found")]
    NotFound(i32),
    /// The database rejected or failed the statement.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Data access operations on the todo list.
///
/// Every method runs a single statement (or a single transaction) and keeps no state between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Retrieves the item with the given ID.
    async fn get_todo_by_id(&self, id: i32) -> Result<TodoItem, TodoServiceError>;

    /// Retrieves every item, ordered by ID (insertion order).
    async fn get_all_todos(&self) -> Result<Vec<TodoItem>, TodoServiceError>;

    /// Persists a new item and returns it with its assigned ID.
    async fn create_todo(&self, payload: TodoPayload) -> Result<TodoItem, TodoServiceError>;

    /// Replaces title, description and done flag of an existing item.
    async fn update_todo(&self, id: i32, payload: TodoPayload)
    -> Result<TodoItem, TodoServiceError>;

    /// Removes the item with the given ID.
    async fn delete_todo(&self, id: i32) -> Result<(), TodoServiceError>;
}

/// `TodoRepository` backed by a SeaORM connection pool.
#[derive(Clone, Debug)]
pub struct TodoService {
    db: DatabaseConnection,
}

impl TodoService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for TodoService {
    #[tracing::instrument(skip(self))]
    async fn get_todo_by_id(&self, id: i32) -> Result<TodoItem, TodoServiceError> {
        let model = todo_item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TodoServiceError::NotFound(id))?;
        Ok(TodoItem::from(model))
    }

    #[tracing::instrument(skip(self))]
    async fn get_all_todos(&self) -> Result<Vec<TodoItem>, TodoServiceError> {
        let todos = todo_item::Entity::find()
            .order_by_asc(todo_item::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(TodoItem::from)
            .collect();
        Ok(todos)
    }

    /// The insert and the read-back of the generated ID share one transaction,
    /// so the ID always comes from the same connection that wrote the row.
    #[tracing::instrument(skip(self))]
    async fn create_todo(&self, payload: TodoPayload) -> Result<TodoItem, TodoServiceError> {
        payload.validate()?;

        let active_model = todo_item::ActiveModel {
            title: ActiveValue::Set(payload.title),
            description: ActiveValue::Set(payload.description),
            done: ActiveValue::Set(payload.done),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let created_model = active_model.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!("Created todo item {}", created_model.id);
        Ok(TodoItem::from(created_model))
    }

    #[tracing::instrument(skip(self))]
    async fn update_todo(
        &self,
        id: i32,
        payload: TodoPayload,
    ) -> Result<TodoItem, TodoServiceError> {
        payload.validate()?;

        let active_model = todo_item::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: ActiveValue::Set(payload.title),
            description: ActiveValue::Set(payload.description),
            done: ActiveValue::Set(payload.done),
        };

        match active_model.update(&self.db).await {
            Ok(updated_model) => Ok(TodoItem::from(updated_model)),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(TodoServiceError::NotFound(id))
            }
            Err(err) => Err(TodoServiceError::Database(err)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete_todo(&self, id: i32) -> Result<(), TodoServiceError> {
        let result = todo_item::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(TodoServiceError::NotFound(id));
        }
        tracing::info!("Deleted todo item {}", id);
        Ok(())
    }
}

/// Shared context handed to every todo handler.
#[derive(Clone)]
pub struct TodoState {
    pub repository: Arc<dyn TodoRepository>,
}

impl TodoState {
    /// Creates the state over the given connection pool.
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_repository(Arc::new(TodoService::new(db)))
    }

    pub fn with_repository(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }
}
