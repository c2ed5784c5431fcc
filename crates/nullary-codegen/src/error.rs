//! Error types for loop generation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::markers::MarkerError;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON parsing error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed manifest {}: {reason}", path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    #[error("Malformed aggregator {}: {source}", path.display())]
    MalformedAggregator {
        path: PathBuf,
        #[source]
        source: MarkerError,
    },

    #[error("Unrendered placeholder {{{{{placeholder}}}}} in {template} template")]
    UnrenderedPlaceholder { template: String, placeholder: String },

    #[error("Duplicate signature: {0}")]
    DuplicateSignature(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, CodegenError>;
