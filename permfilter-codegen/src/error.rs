//! Errors raised while turning a plugin request into generated files.

use thiserror::Error;

/// Why a generation run failed.
///
/// Any of these aborts the whole run: the plugin response then carries the
/// message and no files.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("invalid generator option `{option}`: {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("{file}: field `{message}.{field}`: {reason}")]
    InvalidField {
        file: String,
        message: String,
        field: String,
        reason: String,
    },

    #[error("file to generate `{0}` is missing from the request")]
    UnknownFile(String),
}

impl GenerateError {
    pub(crate) fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}
