use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use validator::ValidationErrors;

pub const FORM_ERROR_SUMMARY: &str = "Please correct the form.";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    InternalServerError(String),
    DatabaseError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() }),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(ErrorResponse { error: msg.clone() }),
            // Don't leak driver messages to the client.
            AppError::DatabaseError(_) => HttpResponse::InternalServerError().json(ErrorResponse { error: "Database operation failed".to_string() }),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        AppError::InternalServerError(format!("Failed to render page: {}", err))
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("Malformed upload: {}", err))
    }
}

/// A message attached to one form field, keyed by the field's form name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// What the form page shows after a rejected submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub result: String,
    pub fields: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        FormErrors {
            result: FORM_ERROR_SUMMARY.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: &str, message: impl Into<String>) -> Self {
        self.fields.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message.as_str())
            .collect()
    }

    /// Maps shape errors from `validator` onto form field names. `form_name`
    /// translates the struct field name into the name the form posts.
    pub fn from_validation(errors: &ValidationErrors, form_name: fn(&str) -> &'static str) -> Self {
        let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
        field_errors.sort_by_key(|(field, _)| *field);

        let mut form_errors = FormErrors::new();
        for (field, errs) in field_errors {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", form_name(field)));
                form_errors = form_errors.with_field(form_name(field), message);
            }
        }
        form_errors
    }
}

impl Default for FormErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.result)?;
        for error in &self.fields {
            write!(f, " [{}: {}]", error.field, error.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn database_errors_are_masked_in_the_response() {
        let err = AppError::DatabaseError("connection refused on 10.0.0.3".to_string());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn messages_are_grouped_by_field() {
        let errors = FormErrors::new()
            .with_field("FormFile1", "first")
            .with_field("Note", "too long")
            .with_field("FormFile1", "second");

        assert_eq!(errors.result, FORM_ERROR_SUMMARY);
        assert_eq!(errors.messages_for("FormFile1"), vec!["first", "second"]);
        assert_eq!(errors.messages_for("Note"), vec!["too long"]);
        assert!(errors.messages_for("FormFile2").is_empty());
    }
}
