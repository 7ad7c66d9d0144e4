use std::fmt;
use std::io;

use actix_web::web::Bytes;
use futures_util::{Stream, StreamExt};

use crate::utils::signatures;

#[derive(Debug)]
pub enum UploadValidationError {
    Empty,
    SizeExceeded { limit: u64 },
    DisallowedExtension,
    ContentMismatch,
    ReadFailed(io::Error),
}

impl UploadValidationError {
    /// The message shown next to the form field. `file_name` is the name the
    /// client sent; escaping it is up to whatever renders the message.
    pub fn field_message(&self, display_name: &str, file_name: &str) -> String {
        match self {
            UploadValidationError::Empty => format!("{} ({}) is empty.", display_name, file_name),
            UploadValidationError::SizeExceeded { limit } => {
                let megabytes = *limit as f64 / 1_048_576.0;
                format!("{} ({}) exceeds {:.1} MB.", display_name, file_name, megabytes)
            }
            UploadValidationError::DisallowedExtension => {
                format!("{} ({}) file type isn't permitted.", display_name, file_name)
            }
            UploadValidationError::ContentMismatch => format!(
                "{} ({}) file's signature doesn't match the file's extension.",
                display_name, file_name
            ),
            UploadValidationError::ReadFailed(_) => {
                "The upload failed. Please contact the Help Desk for support.".to_string()
            }
        }
    }
}

impl fmt::Display for UploadValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadValidationError::Empty => write!(f, "file is empty"),
            UploadValidationError::SizeExceeded { limit } => write!(f, "file exceeds the {} byte limit", limit),
            UploadValidationError::DisallowedExtension => write!(f, "file extension is not permitted"),
            UploadValidationError::ContentMismatch => write!(f, "file content does not match its extension"),
            UploadValidationError::ReadFailed(err) => write!(f, "failed to read upload: {}", err),
        }
    }
}

impl std::error::Error for UploadValidationError {}

/// The lowercase extension of the last path segment of `file_name`,
/// including the dot. `None` when there is no non-empty suffix.
pub fn file_extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let dot = base.rfind('.')?;
    let extension = &base[dot..];
    if extension.len() < 2 {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

/// Checks a single uploaded file and buffers its content.
///
/// The declared length and name are checked first so obviously bad uploads
/// are rejected without reading the body. The body is then read chunk by
/// chunk and rejected as soon as it grows past `size_limit`, whatever the
/// client declared. Finally the bytes are sniffed against the signature of
/// the declared extension.
pub async fn process_form_file<S>(
    mut body: S,
    file_name: &str,
    declared_length: u64,
    permitted_extensions: &[&str],
    size_limit: u64,
) -> Result<Vec<u8>, UploadValidationError>
where
    S: Stream<Item = io::Result<Bytes>> + Unpin,
{
    if declared_length == 0 {
        return Err(UploadValidationError::Empty);
    }
    if declared_length > size_limit {
        return Err(UploadValidationError::SizeExceeded { limit: size_limit });
    }

    let extension = file_extension(file_name).ok_or(UploadValidationError::DisallowedExtension)?;
    if !permitted_extensions
        .iter()
        .any(|permitted| permitted.eq_ignore_ascii_case(&extension))
    {
        return Err(UploadValidationError::DisallowedExtension);
    }

    let mut content = Vec::with_capacity(declared_length as usize);
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(UploadValidationError::ReadFailed)?;
        if (content.len() + chunk.len()) as u64 > size_limit {
            return Err(UploadValidationError::SizeExceeded { limit: size_limit });
        }
        content.extend_from_slice(&chunk);
    }

    if content.is_empty() {
        return Err(UploadValidationError::Empty);
    }
    if !signatures::matches_extension(&extension, &content) {
        return Err(UploadValidationError::ContentMismatch);
    }

    Ok(content)
}
