pub mod files;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::file::{FileSummary, StoredFile};

pub use files::PgFileStore;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Where validated uploads end up.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Adds `file` and commits it. When this returns `Ok` the record is
    /// durable; a failure leaves nothing behind for this file.
    async fn add(&self, file: &StoredFile) -> Result<(), AppError>;

    /// All stored files, newest first.
    async fn list(&self) -> Result<Vec<FileSummary>, AppError>;
}
