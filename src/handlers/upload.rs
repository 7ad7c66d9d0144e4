use actix_multipart::Multipart;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::db::FileStore;
use crate::errors::{AppError, FormErrors};
use crate::models::file::StoredFile;
use crate::models::upload::{display_name, form_field_name, FormFile, UploadRequest};
use crate::utils::file_helpers::process_form_file;
use crate::utils::filename::sanitize;
use crate::utils::multipart::read_upload_form;
use crate::utils::validation::validate_payload;
use crate::views::Views;

pub const PERMITTED_EXTENSIONS: &[&str] = &[".txt", ".pdf"];
pub const INDEX_PATH: &str = "/";

#[derive(Debug, Clone, Copy)]
pub struct UploadSettings {
    pub file_size_limit: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Redirect(pub &'static str);

#[derive(Debug)]
pub enum UploadError {
    /// The form is re-rendered with these messages.
    Invalid(FormErrors),
    /// Storing a validated file failed; not recoverable for this request.
    Failed(AppError),
}

impl From<AppError> for UploadError {
    fn from(err: AppError) -> Self {
        UploadError::Failed(err)
    }
}

/// Validates and stores both files of `request`, file 1 first.
///
/// Each file is committed before the next one is looked at. If file 2 is
/// rejected, file 1 has already been stored and stays stored: there is no
/// transaction spanning both files.
pub async fn handle_upload<S>(request: UploadRequest, store: &S, size_limit: u64) -> Result<Redirect, UploadError>
where
    S: FileStore + ?Sized,
{
    if let Err(errors) = validate_payload(&request, form_field_name) {
        warn!("Rejected upload form: {}", errors);
        return Err(UploadError::Invalid(errors));
    }

    let UploadRequest { form_file1, form_file2, note } = request;
    let slots = [("FormFile1", form_file1), ("FormFile2", form_file2)];

    for (field, form_file) in slots {
        // Presence was checked by validate_payload.
        let Some(form_file) = form_file else {
            return Err(UploadError::Invalid(
                FormErrors::new().with_field(field, format!("The {} field is required.", display_name(field))),
            ));
        };
        let FormFile { file_name, length, content_type, body } = form_file;
        debug!(
            "Validating {} ({:?}, declared {} bytes, {})",
            field,
            file_name,
            length,
            content_type.as_deref().unwrap_or("no content type")
        );

        let content = match process_form_file(body, &file_name, length, PERMITTED_EXTENSIONS, size_limit).await {
            Ok(content) => content,
            Err(err) => {
                warn!("Rejected {} ({:?}): {}", field, file_name, err);
                let message = err.field_message(display_name(field), &file_name);
                return Err(UploadError::Invalid(FormErrors::new().with_field(field, message)));
            }
        };

        let file = StoredFile {
            file_id: Uuid::new_v4(),
            content,
            name: sanitize(&file_name),
            note: note.clone(),
            size: i64::try_from(length).unwrap_or(i64::MAX),
            uploaded_at: Utc::now(),
        };

        if let Err(err) = store.add(&file).await {
            error!("Failed to store {} ({}): {}", field, file.name, err);
            return Err(err.into());
        }
        info!("Stored {} as {} ({} bytes)", field, file.file_id, file.size);
    }

    Ok(Redirect(INDEX_PATH))
}

pub async fn upload_form(views: web::Data<Views>) -> Result<HttpResponse, AppError> {
    let html = views.upload_form(None, None)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

pub async fn upload_files(
    payload: Multipart,
    store: web::Data<dyn FileStore>,
    views: web::Data<Views>,
    settings: web::Data<UploadSettings>,
) -> Result<HttpResponse, AppError> {
    // One byte past the limit is enough for the validator to see an
    // oversized file.
    let request = read_upload_form(payload, settings.file_size_limit.saturating_add(1)).await?;
    let note = request.note.clone();

    match handle_upload(request, store.get_ref(), settings.file_size_limit).await {
        Ok(Redirect(location)) => Ok(HttpResponse::Found().insert_header((LOCATION, location)).finish()),
        Err(UploadError::Invalid(errors)) => {
            let html = views.upload_form(Some(&errors), note.as_deref())?;
            Ok(HttpResponse::BadRequest().content_type(ContentType::html()).body(html))
        }
        Err(UploadError::Failed(err)) => Err(err),
    }
}
