// Error type shared by the collector and the webhook client. The binaries
// wrap these in `anyhow` at the top level.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("No supported files found in {}. Supported extensions: {:?}", .dir.display(), .extensions)]
    NoEligibleFiles { dir: PathBuf, extensions: Vec<String> },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Request to API failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// True for the "nothing to work with" failures of the collector.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::DirectoryNotFound(_) | ClientError::NoEligibleFiles { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
