//! Error types for hazardfeed

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    // Transport errors
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    // Payload errors
    #[error("Failed to parse GeoJSON: {reason}")]
    Parse { reason: String },

    #[error("Expected a FeatureCollection, found {found}")]
    UnexpectedShape { found: String },

    // Construction errors
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("Config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Whether this error came from the network round trip rather than the payload
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FeedError::Transport { .. } | FeedError::Timeout { .. } | FeedError::HttpStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
