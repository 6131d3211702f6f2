use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during processing";
pub const PROCESSING_FAILED_MESSAGE: &str = "Processing failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Transport,
}

/// Everything that can end up in the form's single error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please upload a valid script file (.txt or .fountain)")]
    InvalidScript,
    #[error("Please upload valid video files")]
    NoValidVideos,
    #[error("Please upload both script and video files")]
    MissingInputs,
    #[error("{0}")]
    Transport(String),
}

impl FormError {
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Transport(GENERIC_FAILURE_MESSAGE.to_string())
        } else {
            Self::Transport(message)
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidScript | Self::NoValidVideos | Self::MissingInputs => {
                ErrorCode::Validation
            }
            Self::Transport(_) => ErrorCode::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transport_detail_falls_back_to_generic_message() {
        assert_eq!(
            FormError::transport("  ").to_string(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            FormError::transport("connection refused").to_string(),
            "connection refused"
        );
    }

    #[test]
    fn validation_errors_are_classified_separately_from_transport() {
        assert_eq!(FormError::MissingInputs.code(), ErrorCode::Validation);
        assert_eq!(FormError::InvalidScript.code(), ErrorCode::Validation);
        assert_eq!(
            FormError::transport(PROCESSING_FAILED_MESSAGE).code(),
            ErrorCode::Transport
        );
    }
}
