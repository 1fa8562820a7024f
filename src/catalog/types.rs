//! Wire types for the catalog API and the derived display rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog API response: `{ "data": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    pub(crate) data: Vec<ApiModel>,
}

/// One raw catalog entry as the API reports it.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiModel {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) context_length: u64,
    #[serde(default)]
    pub(crate) architecture: Option<ApiArchitecture>,
    #[serde(default)]
    pub(crate) pricing: ApiPricing,
    #[serde(default)]
    pub(crate) supported_parameters: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiArchitecture {
    #[serde(default)]
    pub(crate) modality: Option<String>,
    #[serde(default)]
    pub(crate) input_modalities: Vec<String>,
}

/// Prices arrive as decimal strings in dollars per token ("0.000001").
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiPricing {
    #[serde(default)]
    pub(crate) prompt: String,
    #[serde(default)]
    pub(crate) completion: String,
    #[serde(default)]
    pub(crate) image: Option<String>,
    #[serde(default)]
    pub(crate) input_cache_read: Option<String>,
    #[serde(default)]
    pub(crate) input_cache_write: Option<String>,
}

/// A normalized, display-ready catalog row.
///
/// Every cost field is either a `$`-prefixed per-million label or exactly
/// `"N/A"`. `keep` is UI-only state and starts false.
#[derive(Debug, Clone, Serialize)]
pub struct ModelRow {
    pub id: String,
    pub name: String,
    pub url: String,
    pub provider: String,
    pub context_window: String,
    pub input_cost: String,
    pub output_cost: String,
    pub image_cost: String,
    pub cache_read_cost: String,
    pub cache_write_cost: String,
    pub features: Vec<String>,
    pub modalities: Vec<String>,
    pub description: String,
    #[serde(skip)]
    pub keep: bool,
}

/// One fetched catalog generation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub rows: Vec<ModelRow>,
    /// Distinct providers, in order of first occurrence.
    pub providers: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    #[must_use]
    pub fn new(rows: Vec<ModelRow>) -> Self {
        let mut providers: Vec<String> = Vec::new();
        for row in &rows {
            if !providers.contains(&row.provider) {
                providers.push(row.provider.clone());
            }
        }
        Self {
            rows,
            providers,
            fetched_at: Utc::now(),
        }
    }
}
