//! Scaled price and context-size labels.
//!
//! The catalog API reports prices as decimal strings in dollars per token.
//! Display always uses dollars per million tokens, with precision picked by
//! magnitude. Context windows are abbreviated with K/M suffixes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for prices that are absent or unparseable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a raw per-token price string as a per-million-token dollar label.
///
/// Unparseable or negative input degrades to `"N/A"`. A price of exactly
/// zero is a valid free tier and renders as `"$0.0"`, distinct from absent.
#[must_use]
pub fn format_price(raw: &str) -> String {
    let Ok(per_token) = raw.trim().parse::<f64>() else {
        return NOT_AVAILABLE.to_string();
    };
    if per_token.is_nan() || per_token < 0.0 {
        return NOT_AVAILABLE.to_string();
    }

    let per_million = per_token * 1_000_000.0;
    if per_million == 0.0 {
        "$0.0".to_string()
    } else if per_million < 0.001 {
        format!("${per_million:.3}")
    } else if per_million < 0.01 {
        format!("${per_million:.2}")
    } else {
        format!("${per_million:.1}")
    }
}

/// Numeric magnitude of a formatted price label.
///
/// Strips the `$` prefix; `"N/A"` (or anything else malformed) parses as NaN
/// so the sort comparators can push it past every real price.
#[must_use]
pub fn price_magnitude(label: &str) -> f64 {
    label
        .strip_prefix('$')
        .and_then(|s| s.parse().ok())
        .unwrap_or(f64::NAN)
}

/// Abbreviate a token count with a K/M suffix ("128K", "1.5M").
///
/// Counts below 1,000 render as plain integers. Division is exact, so
/// 1,500,000 becomes "1.5M" rather than "1M".
#[must_use]
#[allow(clippy::cast_precision_loss)] // Context windows are far below 2^52
pub fn format_context_size(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{}M", trim_decimal(tokens as f64 / 1_000_000.0))
    } else if tokens >= 1_000 {
        format!("{}K", trim_decimal(tokens as f64 / 1_000.0))
    } else {
        tokens.to_string()
    }
}

/// Render a scaled value without a trailing ".0" for whole numbers.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn trim_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{value}")
    }
}

static CONTEXT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)([KM])?").expect("valid regex"));

/// Parse a context-size label back to a token count, for comparison only.
///
/// Matches a leading number (with an optional fraction, so "1.5M" reads as
/// 1,500,000) and an optional K/M suffix; anything without leading digits
/// parses as 0. Exactly inverts [`format_context_size`] for every label it
/// produces.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_context_size(label: &str) -> u64 {
    let Some(caps) = CONTEXT_LABEL.captures(label) else {
        return 0;
    };
    let base: f64 = caps[1].parse().unwrap_or(0.0);
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("K") => 1_000.0,
        Some("M") => 1_000_000.0,
        _ => 1.0,
    };
    (base * multiplier).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_scales_to_per_million() {
        assert_eq!(format_price("0.000001"), "$1.0");
        assert_eq!(format_price("0.00002"), "$20.0");
        assert_eq!(format_price("0.0000005"), "$0.5");
    }

    #[test]
    fn test_format_price_precision_by_magnitude() {
        // Below a tenth of a cent per million: three decimals
        assert_eq!(format_price("0.0000000002"), "$0.000");
        // Below a cent per million: two decimals
        assert_eq!(format_price("0.000000002"), "$0.00");
        // Everything else: one decimal
        assert_eq!(format_price("0.000015"), "$15.0");
    }

    #[test]
    fn test_format_price_zero_is_free_not_absent() {
        assert_eq!(format_price("0"), "$0.0");
        assert_eq!(format_price("0.0"), "$0.0");
    }

    #[test]
    fn test_format_price_degrades_to_not_available() {
        assert_eq!(format_price("-1"), "N/A");
        assert_eq!(format_price(""), "N/A");
        assert_eq!(format_price("not-a-number"), "N/A");
    }

    #[test]
    fn test_format_price_monotonic() {
        let raw = ["0", "0.0000000001", "0.0000005", "0.000001", "0.00002", "0.1"];
        let numeric: Vec<f64> = raw.iter().map(|r| price_magnitude(&format_price(r))).collect();
        for pair in numeric.windows(2) {
            assert!(pair[0] <= pair[1], "expected {} <= {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_price_magnitude() {
        assert_eq!(price_magnitude("$1.5"), 1.5);
        assert_eq!(price_magnitude("$0.0"), 0.0);
        assert!(price_magnitude("N/A").is_nan());
        assert!(price_magnitude("garbage").is_nan());
    }

    #[test]
    fn test_format_context_size() {
        assert_eq!(format_context_size(0), "0");
        assert_eq!(format_context_size(999), "999");
        assert_eq!(format_context_size(1_000), "1K");
        assert_eq!(format_context_size(128_000), "128K");
        assert_eq!(format_context_size(1_000_000), "1M");
        assert_eq!(format_context_size(1_500_000), "1.5M");
        assert_eq!(format_context_size(2_000_000), "2M");
    }

    #[test]
    fn test_parse_context_size() {
        assert_eq!(parse_context_size("128K"), 128_000);
        assert_eq!(parse_context_size("2M"), 2_000_000);
        assert_eq!(parse_context_size("1.5M"), 1_500_000);
        assert_eq!(parse_context_size("32.5K"), 32_500);
        assert_eq!(parse_context_size("999"), 999);
        assert_eq!(parse_context_size("N/A"), 0);
        assert_eq!(parse_context_size(""), 0);
    }

    #[test]
    fn test_context_size_round_trip() {
        for tokens in [
            512, 1_000, 8_000, 32_500, 128_000, 200_000, 1_000_000, 1_500_000, 1_536_000,
            2_000_000,
        ] {
            assert_eq!(
                parse_context_size(&format_context_size(tokens)),
                tokens,
                "round trip failed for {tokens}"
            );
        }
    }
}
