//! Error kinds surfaced by the ingestion and query pipelines

use chatpdf_config::ConfigError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatPdfError>;

/// Remote service a request was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Embedding,
    Generation,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Embedding => write!(f, "embedding"),
            Service::Generation => write!(f, "generation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChatPdfError {
    #[error("API key is missing or not set ({var})")]
    MissingCredential { var: String },

    #[error("{service} API rejected the credential: {message}")]
    InvalidCredential { service: Service, message: String },

    #[error("failed to decode PDF '{document}': {message}")]
    DecodeError { document: String, message: String },

    #[error("no documents were submitted")]
    EmptyUpload,

    #[error("submitted documents contain no extractable text")]
    NoExtractableText,

    #[error("question is empty")]
    EmptyQuestion,

    #[error("no index found at {}", path.display())]
    IndexNotFound { path: PathBuf },

    #[error("refusing to load index at {}: {reason}", path.display())]
    UntrustedIndex { path: PathBuf, reason: String },

    #[error(
        "index at {} was built with embedding model '{found}' but '{expected}' is configured",
        path.display()
    )]
    IndexMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("{service} service unavailable: {message}")]
    ServiceUnavailable { service: Service, message: String },

    #[error(transparent)]
    Config(ConfigError),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ChatPdfError {
    pub fn unexpected(err: impl fmt::Display) -> Self {
        ChatPdfError::Unexpected(err.to_string())
    }

    /// Short stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ChatPdfError::MissingCredential { .. } => "MissingCredential",
            ChatPdfError::InvalidCredential { .. } => "InvalidCredential",
            ChatPdfError::DecodeError { .. } => "DecodeError",
            ChatPdfError::EmptyUpload => "EmptyUpload",
            ChatPdfError::NoExtractableText => "NoExtractableText",
            ChatPdfError::EmptyQuestion => "EmptyQuestion",
            ChatPdfError::IndexNotFound { .. } => "IndexNotFound",
            ChatPdfError::UntrustedIndex { .. } => "UntrustedIndex",
            ChatPdfError::IndexMismatch { .. } => "IndexMismatch",
            ChatPdfError::ServiceUnavailable { .. } => "ServiceUnavailable",
            ChatPdfError::Config(_) => "Config",
            ChatPdfError::Unexpected(_) => "UnexpectedError",
        }
    }

    /// Message rendered to the person at the keyboard
    pub fn user_message(&self) -> String {
        match self {
            ChatPdfError::MissingCredential { var } => {
                format!("API key is missing or not set. Set {} and start again.", var)
            }
            ChatPdfError::InvalidCredential { service, .. } => format!(
                "The {} API rejected the API key. Check that it is valid and enabled.",
                service
            ),
            ChatPdfError::DecodeError { document, message } => {
                format!("Could not read '{}' as a PDF: {}", document, message)
            }
            ChatPdfError::EmptyUpload => "Please upload at least one PDF file.".to_string(),
            ChatPdfError::NoExtractableText => {
                "No text could be extracted from the uploaded PDF files. Scanned pages without a text layer are not supported.".to_string()
            }
            ChatPdfError::EmptyQuestion => "Please enter a question.".to_string(),
            ChatPdfError::IndexNotFound { .. } => {
                "No documents have been processed yet. Upload PDF files and process them first."
                    .to_string()
            }
            ChatPdfError::UntrustedIndex { path, reason } => format!(
                "The index at {} was not produced by chatpdf ({}). Re-process your documents, or enable storage.allow_untrusted_index if you trust its source.",
                path.display(),
                reason
            ),
            ChatPdfError::IndexMismatch {
                expected, found, ..
            } => format!(
                "The saved index was built with embedding model '{}' but '{}' is configured. Re-process your documents.",
                found, expected
            ),
            ChatPdfError::ServiceUnavailable { service, message } => format!(
                "The {} service is unreachable or returned an error: {}",
                service, message
            ),
            ChatPdfError::Config(err) => format!("Invalid configuration: {}", err),
            ChatPdfError::Unexpected(message) => {
                format!("An unexpected error occurred: {}", message)
            }
        }
    }
}

impl From<ConfigError> for ChatPdfError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingCredential { var } => ChatPdfError::MissingCredential { var },
            other => ChatPdfError::Config(other),
        }
    }
}

impl From<std::io::Error> for ChatPdfError {
    fn from(err: std::io::Error) -> Self {
        ChatPdfError::Unexpected(err.to_string())
    }
}
