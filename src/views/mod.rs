use minijinja::{context, Environment};

use crate::errors::{AppError, FormErrors};
use crate::models::file::FileSummary;

const UPLOAD_TEMPLATE: &str = "upload.html";
const INDEX_TEMPLATE: &str = "index.html";

/// Page templates. `.html` templates are auto-escaped, which is what keeps
/// client supplied file names in error messages harmless.
pub struct Views {
    env: Environment<'static>,
    permitted_extensions: Vec<&'static str>,
    limit_mb: String,
}

impl Views {
    pub fn new(permitted_extensions: &[&'static str], file_size_limit: u64) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(UPLOAD_TEMPLATE, include_str!("../../templates/upload.html"))?;
        env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        Ok(Views {
            env,
            permitted_extensions: permitted_extensions.to_vec(),
            limit_mb: format!("{:.1}", file_size_limit as f64 / 1_048_576.0),
        })
    }

    pub fn upload_form(&self, errors: Option<&FormErrors>, note: Option<&str>) -> Result<String, AppError> {
        let messages = |field: &str| errors.map(|e| e.messages_for(field)).unwrap_or_default();
        let html = self.env.get_template(UPLOAD_TEMPLATE)?.render(context! {
            permitted => self.permitted_extensions,
            limit_mb => self.limit_mb,
            result => errors.map(|e| e.result.as_str()),
            file1_errors => messages("FormFile1"),
            file2_errors => messages("FormFile2"),
            note_errors => messages("Note"),
            note => note.unwrap_or_default(),
        })?;
        Ok(html)
    }

    pub fn index(&self, files: &[FileSummary]) -> Result<String, AppError> {
        let html = self.env.get_template(INDEX_TEMPLATE)?.render(context! { files })?;
        Ok(html)
    }
}
