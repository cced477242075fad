//! Bank loading error types.
//!
//! Only the manifest can fail a load; unreadable or malformed bank files are
//! collected as [`FileFailure`]s and the rest of the bank is still used.

use thiserror::Error;

/// Errors that abort loading a bank.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The manifest could not be read.
    #[error("manifest unavailable at {location}: {source}")]
    ManifestUnavailable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or its `files` entry is not a list of names.
    #[error("invalid manifest at {location}: {message}")]
    InvalidManifest { location: String, message: String },
}

impl LoadError {
    /// Returns `true` if retrying the same source cannot help.
    pub fn is_permanent(&self) -> bool {
        match self {
            LoadError::InvalidManifest { .. } => true,
            LoadError::ManifestUnavailable { source, .. } => matches!(
                source.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
        }
    }
}

/// Why a single bank file was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileFailure {
    #[error("read failed: {message}")]
    Unreadable { file: String, message: String },

    #[error("not valid JSON: {message}")]
    InvalidJson { file: String, message: String },
}

impl FileFailure {
    pub fn file(&self) -> &str {
        match self {
            FileFailure::Unreadable { file, .. } | FileFailure::InvalidJson { file, .. } => file,
        }
    }
}
