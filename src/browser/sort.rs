//! Type-aware ordering with a standing pinned-first override.

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::catalog::ModelRow;
use crate::format::{parse_context_size, price_magnitude};

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    Name,
    Provider,
    Context,
    #[default]
    InputCost,
    OutputCost,
    ImageCost,
    CacheReadCost,
    CacheWriteCost,
}

impl SortKey {
    /// Cycle order used by the interactive sort key binding.
    pub const ALL: [SortKey; 8] = [
        SortKey::Name,
        SortKey::Provider,
        SortKey::Context,
        SortKey::InputCost,
        SortKey::OutputCost,
        SortKey::ImageCost,
        SortKey::CacheReadCost,
        SortKey::CacheWriteCost,
    ];

    #[must_use]
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Provider => "provider",
            SortKey::Context => "context",
            SortKey::InputCost => "input cost",
            SortKey::OutputCost => "output cost",
            SortKey::ImageCost => "image cost",
            SortKey::CacheReadCost => "cache read",
            SortKey::CacheWriteCost => "cache write",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Full comparator: pinned rows first unconditionally, then the active key
/// with the direction applied. Direction never reorders the pin partition.
/// Callers use this with a stable sort so ties keep insertion order.
pub(crate) fn compare(
    a: &ModelRow,
    b: &ModelRow,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    match b.keep.cmp(&a.keep) {
        Ordering::Equal => {
            let by_key = compare_by_key(a, b, key);
            match direction {
                SortDirection::Ascending => by_key,
                SortDirection::Descending => by_key.reverse(),
            }
        }
        pinned_first => pinned_first,
    }
}

fn compare_by_key(a: &ModelRow, b: &ModelRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Provider => a.provider.cmp(&b.provider),
        SortKey::Context => {
            parse_context_size(&a.context_window).cmp(&parse_context_size(&b.context_window))
        }
        SortKey::InputCost => compare_price(&a.input_cost, &b.input_cost),
        SortKey::OutputCost => compare_price(&a.output_cost, &b.output_cost),
        SortKey::ImageCost => compare_price(&a.image_cost, &b.image_cost),
        SortKey::CacheReadCost => compare_price(&a.cache_read_cost, &b.cache_read_cost),
        SortKey::CacheWriteCost => compare_price(&a.cache_write_cost, &b.cache_write_cost),
    }
}

/// NaN ("N/A") sorts above every real price in the base ascending order.
fn compare_price(a: &str, b: &str) -> Ordering {
    let (a, b) = (price_magnitude(a), price_magnitude(b));
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
