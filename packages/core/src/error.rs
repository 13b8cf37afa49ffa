use thiserror::Error;

pub type StyleResult<T> = Result<T, StyleError>;

/// Errors raised while converting untyped input into a style tree
///
/// Registration itself never fails; only the boundary that accepts
/// loosely-typed data (JSON documents, `serde_json::Value`) can.
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Invalid style value at '{path}': {message}")]
    InvalidValue { path: String, message: String },

    #[error("Style tree must be an object, found {found}")]
    NotAnObject { found: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StyleError {
    pub fn invalid_value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn not_an_object(found: impl Into<String>) -> Self {
        Self::NotAnObject {
            found: found.into(),
        }
    }
}
