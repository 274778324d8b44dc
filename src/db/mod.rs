pub mod repository;

use std::future::Future;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;

use crate::error::AppError;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Single-record reads and writes.
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);
/// Listing a whole collection or a bulk reset.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);
/// The standalone reset job.
pub const JOB_TIMEOUT: Duration = Duration::from_secs(20);
/// Report export (read, bulk due-month append and reset).
pub const EXPORT_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| AppError::Database(e.into()))?;

    Ok(pool)
}

/// Runs one database call with a deadline. No retries.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::Timeout),
    }
}
