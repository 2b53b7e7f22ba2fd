pub mod entities;
mod pg_store;
mod post_repository;
mod vote_repository;

pub use pg_store::PgStore;
pub use post_repository::PostRepository;
pub use vote_repository::VoteRepository;

use circles_errors::AppError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

/// Opens the pool. Acquire and connect share one timeout; sqlx statement
/// logging stays off, requests are traced by the HTTP layer.
pub async fn create_connection(
    database_url: &str,
    pool_size: u32,
    timeout: Duration,
) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(pool_size)
        .min_connections(1)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    tracing::debug!(pool_size, timeout_secs = timeout.as_secs(), "Database pool ready");
    Ok(db)
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    for statement in migration.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        db.execute(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            statement.to_string(),
        ))
        .await?;
    }

    tracing::info!("Database migrations applied");
    Ok(())
}

pub(crate) fn store_error(err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotFound(what) => AppError::NotFound(what),
        other => AppError::Store(other.to_string()),
    }
}
