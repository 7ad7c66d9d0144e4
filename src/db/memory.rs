use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::FileStore;
use crate::errors::AppError;
use crate::models::file::{FileSummary, StoredFile};

/// In-memory `FileStore` for tests. Writes can be switched to fail to
/// exercise the persistence error path.
#[derive(Default)]
pub struct MemoryFileStore {
    files: Mutex<Vec<StoredFile>>,
    fail_writes: AtomicBool,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn files(&self) -> Vec<StoredFile> {
        self.files.lock().clone()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn add(&self, file: &StoredFile) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("write rejected".to_string()));
        }
        self.files.lock().push(file.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FileSummary>, AppError> {
        let mut files: Vec<FileSummary> = self.files.lock().iter().map(FileSummary::from).collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }
}
