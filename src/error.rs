//! Catalog error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API error {status}: {reason}")]
    Api { status: u16, reason: String },

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
