//! Error types for the converter client.
//!
//! [`FormError`] is what the user sees in the upload box. [`ConvertError`]
//! carries the detail of a failed submission for the log; every variant is
//! shown to the user as [`FormError::SubmissionFailed`].

use std::path::PathBuf;
use thiserror::Error;

/// User-visible form errors. Neither is fatal: the form stays interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// The picked or dropped file is not a `.txt` file.
    #[error("Only .txt files are allowed")]
    InvalidFileType,

    /// The server rejected the file or the request never completed.
    #[error("Conversion failed. Please try again.")]
    SubmissionFailed,
}

impl FormError {
    /// Key into [`crate::localizations::Localizations`].
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidFileType => "error-invalid-file-type",
            Self::SubmissionFailed => "error-conversion-failed",
        }
    }
}

/// Everything that can go wrong between locking the form and unlocking it.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The server answered with a non-success status.
    #[error("server answered {status}")]
    HttpStatus { status: u16 },

    /// The request could not be sent or the response body could not be read.
    #[error("request to conversion server failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The selected file could not be opened for upload.
    #[error("cannot read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converted file could not be saved.
    #[error("cannot write '{path}': {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The worker thread went away without reporting a result.
    #[error("conversion worker stopped without a result")]
    WorkerLost,
}

/// Invalid startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("unknown language '{0}'")]
    InvalidLanguage(String),
}
