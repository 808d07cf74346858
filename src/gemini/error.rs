use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading a reference image and
/// writing the generated one. No variant is recoverable; they all
/// propagate to the top level.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Reference image not found: {}", .0.display())]
    ReferenceNotFound(PathBuf),

    #[error("Failed to read reference image {}: {source}", path.display())]
    ReferenceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON in response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(&'static str),

    #[error("Invalid base64 image data: {0}")]
    InvalidImageData(#[from] base64::DecodeError),

    #[error("No image in response. Text: {0}")]
    NoImage(String),

    #[error("Failed to write output file {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}
