//! Catalog retrieval and normalization.
//!
//! Fetches the public model-pricing catalog and reshapes each raw entry
//! into a display row. The snapshot is replaced wholesale on every fetch;
//! nothing here depends on how rows are rendered.

mod fetch;
#[cfg(test)]
mod tests;
mod types;

pub use types::{ModelRow, Snapshot};

/// Public catalog endpoint; no key required for the model listing.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Client for the catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}
