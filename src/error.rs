//! Error types for the upholstery_quote library

use crate::photo::PhotoIssue;
use thiserror::Error;

/// Result type alias for upholstery_quote operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Error types for quote estimation, photo checking and submission
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Photo could not be opened or its header could not be read
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Photo has a file extension no decoder is available for
    #[error("Unsupported image format: {path}")]
    UnsupportedFormat { path: String },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Photo was analyzed and failed one or more quality checks
    #[error("Photo failed quality check: {}", describe_issues(.issues))]
    PhotoRejected { issues: Vec<PhotoIssue> },

    /// Form state does not allow submission yet
    #[error("Submission blocked: {reason}")]
    SubmissionBlocked { reason: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn describe_issues(issues: &[PhotoIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl QuoteError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a submission-blocked error
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::SubmissionBlocked {
            reason: reason.into(),
        }
    }

    /// Check if the customer can fix this by changing their input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuoteError::PhotoRejected { .. }
                | QuoteError::SubmissionBlocked { .. }
                | QuoteError::InvalidParameter { .. }
        )
    }

    /// Get user-friendly error description for form display
    pub fn user_message(&self) -> String {
        match self {
            QuoteError::ImageLoadError { .. } | QuoteError::UnsupportedFormat { .. } => {
                "Could not open the photo. Please check the link or file and try again.".to_string()
            }
            QuoteError::InvalidParameter { parameter, .. } => {
                format!("Please check the value entered for {}.", parameter)
            }
            QuoteError::PhotoRejected { issues } => {
                let hints: Vec<&str> = issues.iter().map(PhotoIssue::hint).collect();
                format!("Your photo needs another try. {}", hints.join(" "))
            }
            QuoteError::SubmissionBlocked { reason } => format!("Almost there: {}.", reason),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
