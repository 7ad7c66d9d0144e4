use std::io;

use actix_web::web::Bytes;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use validator::Validate;

pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// One uploaded file as the client described it. Nothing here is trusted
/// until `process_form_file` has read and checked the body.
pub struct FormFile {
    pub file_name: String,
    pub length: u64,
    pub content_type: Option<String>,
    pub body: ByteStream,
}

impl FormFile {
    pub fn new(file_name: impl Into<String>, length: u64, content_type: Option<String>, body: ByteStream) -> Self {
        FormFile {
            file_name: file_name.into(),
            length,
            content_type,
            body,
        }
    }

    /// A file whose declared length is the real length of `content`.
    pub fn from_bytes(file_name: impl Into<String>, content_type: Option<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        let length = content.len() as u64;
        FormFile::new(file_name, length, content_type, stream::once(async move { Ok(content) }).boxed())
    }
}

impl std::fmt::Debug for FormFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormFile")
            .field("file_name", &self.file_name)
            .field("length", &self.length)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Only the client's description of the file is serialized, never the body.
impl Serialize for FormFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FormFile", 3)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("length", &self.length)?;
        state.serialize_field("content_type", &self.content_type)?;
        state.end()
    }
}

#[derive(Debug, Default, Validate)]
pub struct UploadRequest {
    #[validate(required(message = "The File 1 field is required."))]
    pub form_file1: Option<FormFile>,
    #[validate(required(message = "The File 2 field is required."))]
    pub form_file2: Option<FormFile>,
    #[validate(length(max = 50, message = "The field Note must be a string with a maximum length of 50."))]
    pub note: Option<String>,
}

/// Name the form posts for a field of `UploadRequest`.
pub fn form_field_name(field: &str) -> &'static str {
    match field {
        "form_file1" => "FormFile1",
        "form_file2" => "FormFile2",
        "note" => "Note",
        _ => "Form",
    }
}

/// Label used in messages about a form field.
pub fn display_name(form_field: &str) -> &'static str {
    match form_field {
        "FormFile1" => "File 1",
        "FormFile2" => "File 2",
        "Note" => "Note",
        _ => "Form",
    }
}
