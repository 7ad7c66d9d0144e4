use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_id: Uuid,
    pub content: Vec<u8>,
    pub name: String,
    pub note: Option<String>,
    pub size: i64,
    pub uploaded_at: chrono::DateTime<Utc>,
}

/// A stored file without its content, for listings.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub file_id: Uuid,
    pub name: String,
    pub note: Option<String>,
    pub size: i64,
    pub uploaded_at: chrono::DateTime<Utc>,
}

impl From<&StoredFile> for FileSummary {
    fn from(file: &StoredFile) -> Self {
        FileSummary {
            file_id: file.file_id,
            name: file.name.clone(),
            note: file.note.clone(),
            size: file.size,
            uploaded_at: file.uploaded_at,
        }
    }
}
