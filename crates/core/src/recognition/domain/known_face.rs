use thiserror::Error;

use crate::recognition::domain::face_encoding::FaceEncoding;

#[derive(Clone, Debug, PartialEq)]
pub struct KnownFace {
    pub name: String,
    pub encoding: FaceEncoding,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("Name is required")]
    Missing,
    #[error("Name contains characters that are not allowed: {0:?}")]
    Invalid(String),
}

/// Normalizes a display name for enrollment.
///
/// Names double as file stems in the known-faces directory, so path
/// separators, control characters and dot-only names are refused.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Missing);
    }
    let forbidden = |c: char| c == '/' || c == '\\' || c.is_control();
    if name.chars().any(forbidden) || name == "." || name == ".." {
        return Err(NameError::Invalid(name.to_string()));
    }
    Ok(name.to_string())
}
