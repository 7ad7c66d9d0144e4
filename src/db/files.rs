use async_trait::async_trait;
use log::debug;
use sqlx::PgPool;

use super::FileStore;
use crate::errors::AppError;
use crate::models::file::{FileSummary, StoredFile};

#[derive(Clone)]
pub struct PgFileStore {
    pool: PgPool,
}

impl PgFileStore {
    pub fn new(pool: PgPool) -> Self {
        PgFileStore { pool }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn add(&self, file: &StoredFile) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO files (file_id, content, name, note, size, uploaded_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(file.file_id)
        .bind(&file.content)
        .bind(&file.name)
        .bind(&file.note)
        .bind(file.size)
        .bind(file.uploaded_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Committed file {} ({} bytes)", file.file_id, file.size);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FileSummary>, AppError> {
        let files = sqlx::query_as::<_, FileSummary>(
            "SELECT file_id, name, note, size, uploaded_at FROM files ORDER BY uploaded_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(files)
    }
}
