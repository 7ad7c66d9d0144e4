use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header::CONTENT_LENGTH;
use actix_web::web::Bytes;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use log::debug;

use crate::errors::AppError;
use crate::models::upload::{ByteStream, FormFile, UploadRequest};

const FIELD_PREFIX: &str = "FileUpload.";
const MAX_NOTE_BYTES: usize = 4096;

/// Reads the upload form out of a multipart body.
///
/// File parts are kept in memory up to `spool_limit` bytes; anything past
/// that is read and counted but dropped, so an oversized file still reaches
/// the validator as an oversized stream without being held in full.
pub async fn read_upload_form(mut payload: Multipart, spool_limit: u64) -> Result<UploadRequest, AppError> {
    let mut request = UploadRequest::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let name = name.strip_prefix(FIELD_PREFIX).unwrap_or(&name).to_string();

        match name.as_str() {
            "FormFile1" => request.form_file1 = read_file_field(&mut field, spool_limit).await?,
            "FormFile2" => request.form_file2 = read_file_field(&mut field, spool_limit).await?,
            "Note" => {
                let note = read_text_field(&mut field).await?;
                request.note = Some(note).filter(|note| !note.is_empty());
            }
            other => {
                debug!("Ignoring unexpected form field {:?}", other);
                drain(&mut field).await?;
            }
        }
    }

    Ok(request)
}

/// A part with no file name (or an empty one) is how browsers send a file
/// input the user left empty, so it counts as a missing file.
async fn read_file_field(field: &mut Field, spool_limit: u64) -> Result<Option<FormFile>, MultipartError> {
    let file_name = field
        .content_disposition()
        .and_then(|disposition| disposition.get_filename())
        .map(str::to_string)
        .unwrap_or_default();
    if file_name.is_empty() {
        drain(field).await?;
        return Ok(None);
    }

    let content_type = field.content_type().map(|mime| mime.to_string());
    let header_length = field
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    let mut kept: Vec<Bytes> = Vec::new();
    let mut kept_len: u64 = 0;
    let mut seen: u64 = 0;
    while let Some(chunk) = field.try_next().await? {
        seen += chunk.len() as u64;
        if kept_len < spool_limit {
            let take = (spool_limit - kept_len).min(chunk.len() as u64) as usize;
            kept_len += take as u64;
            kept.push(chunk.slice(..take));
        }
    }

    let body: ByteStream = stream::iter(kept.into_iter().map(Ok)).boxed();
    Ok(Some(FormFile::new(
        file_name,
        header_length.unwrap_or(seen),
        content_type,
        body,
    )))
}

async fn read_text_field(field: &mut Field) -> Result<String, MultipartError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        let room = MAX_NOTE_BYTES.saturating_sub(buf.len());
        buf.extend_from_slice(&chunk[..room.min(chunk.len())]);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn drain(field: &mut Field) -> Result<(), MultipartError> {
    while field.try_next().await?.is_some() {}
    Ok(())
}
