//! Connection pool setup and table bootstrap.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::config::Config;
use crate::entities::todo_item;

/// Opens the shared connection pool described by `config`.
///
/// The returned `DatabaseConnection` is a pool and is safe to clone into every handler.
#[tracing::instrument(skip(config), fields(backend = %config.database_backend()))]
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url());
    options
        .max_connections(config.db_max_connections)
        .connect_timeout(config.db_connect_timeout())
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    tracing::info!("Database connection pool established");
    Ok(db)
}

/// Creates the `todolist` table when it does not exist yet.
///
/// Existing tables are left untouched.
#[tracing::instrument(skip(db))]
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(todo_item::Entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::info!("Table `todolist` is ready");
    Ok(())
}
