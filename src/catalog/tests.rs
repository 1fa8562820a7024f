//! Tests for catalog normalization.

use super::fetch::{extract_features, normalize_model};
use super::types::{ApiArchitecture, ApiModel, ApiPricing, ModelsResponse, Snapshot};

fn make_api_model(id: &str, prompt: &str, completion: &str, context_length: u64) -> ApiModel {
    ApiModel {
        id: id.to_string(),
        name: id.to_string(),
        context_length,
        pricing: ApiPricing {
            prompt: prompt.to_string(),
            completion: completion.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_normalize_derives_provider_and_url() {
    let row = normalize_model(make_api_model("openai/gpt-4o", "0.0000025", "0.00001", 128_000));
    assert_eq!(row.provider, "Openai");
    assert_eq!(row.url, "https://openrouter.ai/openai/gpt-4o");
    assert_eq!(row.context_window, "128K");
    assert_eq!(row.input_cost, "$2.5");
    assert_eq!(row.output_cost, "$10.0");
    assert!(!row.keep);
}

#[test]
fn test_normalize_absent_prices_are_not_available() {
    let row = normalize_model(make_api_model("a/m", "0.000001", "0.000002", 8_192));
    assert_eq!(row.image_cost, "N/A");
    assert_eq!(row.cache_read_cost, "N/A");
    assert_eq!(row.cache_write_cost, "N/A");
}

#[test]
fn test_normalize_negative_price_degrades() {
    let mut m = make_api_model("a/m", "-1", "0", 1_000);
    m.pricing.image = Some("-0.5".to_string());
    let row = normalize_model(m);
    assert_eq!(row.input_cost, "N/A");
    assert_eq!(row.output_cost, "$0.0");
    assert_eq!(row.image_cost, "N/A");
}

#[test]
fn test_extract_features_all_gates() {
    let mut m = make_api_model("a/m", "0", "0", 200_000);
    m.architecture = Some(ApiArchitecture {
        modality: Some("multimodal".to_string()),
        input_modalities: vec!["text".to_string(), "image".to_string()],
    });
    m.supported_parameters = vec!["temperature".to_string(), "tools".to_string()];

    assert_eq!(
        extract_features(&m),
        vec!["Vision", "Function calling", "Long context", "Multimodal"]
    );
}

#[test]
fn test_extract_features_function_call_alias() {
    let mut m = make_api_model("a/m", "0", "0", 4_096);
    m.supported_parameters = vec!["function_call".to_string()];
    assert_eq!(extract_features(&m), vec!["Function calling"]);
}

#[test]
fn test_extract_features_modality_must_be_exact() {
    let mut m = make_api_model("a/m", "0", "0", 4_096);
    m.architecture = Some(ApiArchitecture {
        modality: Some("text+image->text".to_string()),
        input_modalities: Vec::new(),
    });
    assert!(extract_features(&m).is_empty());
}

#[test]
fn test_extract_features_long_context_boundary() {
    let at = make_api_model("a/m", "0", "0", 100_000);
    let below = make_api_model("a/m", "0", "0", 99_999);
    assert_eq!(extract_features(&at), vec!["Long context"]);
    assert!(extract_features(&below).is_empty());
}

#[test]
fn test_snapshot_providers_first_occurrence_order() {
    let rows: Vec<_> = ["b/m1", "a/m1", "b/m2", "c/m1", "a/m2"]
        .iter()
        .map(|id| normalize_model(make_api_model(id, "0.000001", "0.000001", 1_000)))
        .collect();
    let snapshot = Snapshot::new(rows);
    assert_eq!(snapshot.providers, vec!["B", "A", "C"]);
}

#[test]
fn test_deserialize_catalog_response() {
    let body = r#"{
        "data": [{
            "id": "anthropic/claude-sonnet-4",
            "name": "Anthropic: Claude Sonnet 4",
            "description": "A model.",
            "context_length": 1000000,
            "architecture": {
                "modality": "text+image->text",
                "input_modalities": ["text", "image"],
                "output_modalities": ["text"],
                "tokenizer": "Claude"
            },
            "pricing": {
                "prompt": "0.000003",
                "completion": "0.000015",
                "image": "0.0048",
                "input_cache_read": "0.0000003",
                "input_cache_write": "0.00000375"
            },
            "supported_parameters": ["tools", "temperature"]
        }]
    }"#;

    let parsed: ModelsResponse = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.data.len(), 1);
    let row = normalize_model(parsed.data.into_iter().next().unwrap());
    assert_eq!(row.provider, "Anthropic");
    assert_eq!(row.context_window, "1M");
    assert_eq!(row.input_cost, "$3.0");
    assert_eq!(row.cache_read_cost, "$0.3");
    assert_eq!(row.modalities, vec!["text", "image"]);
    assert_eq!(row.features, vec!["Vision", "Function calling", "Long context"]);
}

#[test]
fn test_end_to_end_normalize_sort_search() {
    use crate::browser::{Browser, Columns};
    use std::time::{Duration, Instant};

    let rows = vec![
        normalize_model(make_api_model("a/m1", "0.000001", "0.000002", 1_000)),
        normalize_model(make_api_model("b/m2", "0.00002", "0.00004", 2_000_000)),
    ];
    assert_eq!(rows[0].context_window, "1K");
    assert_eq!(rows[1].context_window, "2M");

    let mut browser = Browser::new(Columns::default());
    browser.apply_snapshot(Snapshot::new(rows));

    // Default sort: input cost ascending
    let shown = browser.rows();
    assert_eq!(shown[0].id, "a/m1");
    assert_eq!(shown[1].id, "b/m2");
    drop(shown);

    let now = Instant::now();
    browser.set_search_input("m2", now);
    browser.tick(now + Duration::from_millis(300));
    let shown = browser.rows();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "b/m2");
}

#[test]
fn test_deserialize_tolerates_missing_optional_fields() {
    let body = r#"{"data": [{"id": "x/y", "name": "Y", "pricing": {"prompt": "0", "completion": "0"}}]}"#;
    let parsed: ModelsResponse = serde_json::from_str(body).unwrap();
    let row = normalize_model(parsed.data.into_iter().next().unwrap());
    assert_eq!(row.context_window, "0");
    assert_eq!(row.input_cost, "$0.0");
    assert!(row.modalities.is_empty());
}
