pub mod file_helpers;
pub mod filename;
pub mod multipart;
pub mod signatures;
pub mod validation;
