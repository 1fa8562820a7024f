//! The one network boundary: fetch the catalog and normalize every entry.

use super::types::{ApiModel, ModelRow, ModelsResponse, Snapshot};
use super::CatalogClient;
use crate::error::{Error, Result};
use crate::format::{NOT_AVAILABLE, format_context_size, format_price};

impl CatalogClient {
    /// Fetch the full catalog and map it into display rows.
    ///
    /// Non-2xx responses fail with the HTTP status and reason phrase;
    /// malformed bodies fold into the same error type. Callers keep their
    /// previous snapshot on failure.
    pub async fn fetch_catalog(&self) -> Result<Snapshot> {
        tracing::debug!("fetching catalog from {}", self.base_url);

        let mut request = self.client.get(format!("{}/models", self.base_url));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: ModelsResponse = serde_json::from_str(&body)?;
        let rows: Vec<ModelRow> = parsed.data.into_iter().map(normalize_model).collect();
        tracing::debug!("catalog fetched: {} models", rows.len());

        Ok(Snapshot::new(rows))
    }
}

/// Reshape one raw entry into a display row.
pub(crate) fn normalize_model(m: ApiModel) -> ModelRow {
    let optional_price = |p: Option<&String>| match p {
        Some(raw) => format_price(raw),
        None => NOT_AVAILABLE.to_string(),
    };

    ModelRow {
        url: format!("https://openrouter.ai/{}", m.id),
        provider: provider_name(&m.id),
        context_window: format_context_size(m.context_length),
        input_cost: format_price(&m.pricing.prompt),
        output_cost: format_price(&m.pricing.completion),
        image_cost: optional_price(m.pricing.image.as_ref()),
        cache_read_cost: optional_price(m.pricing.input_cache_read.as_ref()),
        cache_write_cost: optional_price(m.pricing.input_cache_write.as_ref()),
        features: extract_features(&m),
        modalities: m
            .architecture
            .as_ref()
            .map(|a| a.input_modalities.clone())
            .unwrap_or_default(),
        description: m.description,
        name: m.name,
        id: m.id,
        keep: false,
    }
}

/// The id segment before the first `/`, capitalized ("openai/gpt-4o" → "Openai").
fn provider_name(id: &str) -> String {
    let raw = id.split('/').next().unwrap_or("unknown");
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Unknown".to_string(),
    }
}

/// Derive feature tags from raw metadata, in a fixed order.
pub(crate) fn extract_features(m: &ApiModel) -> Vec<String> {
    let arch = m.architecture.as_ref();
    let mut features = Vec::new();

    if arch.is_some_and(|a| a.input_modalities.iter().any(|m| m == "image")) {
        features.push("Vision".to_string());
    }
    if m.supported_parameters
        .iter()
        .any(|p| p == "tools" || p == "function_call")
    {
        features.push("Function calling".to_string());
    }
    if m.context_length >= 100_000 {
        features.push("Long context".to_string());
    }
    if arch.and_then(|a| a.modality.as_deref()) == Some("multimodal") {
        features.push("Multimodal".to_string());
    }

    features
}
