//! Free-text, provider, and free-tier filtering.

use std::collections::HashSet;

use crate::catalog::ModelRow;
use crate::format::price_magnitude;

/// Filter inputs for one derivation pass.
pub(crate) struct QueryState<'a> {
    pub(crate) query: &'a str,
    pub(crate) providers: &'a HashSet<String>,
    pub(crate) hide_free: bool,
    pub(crate) search_descriptions: bool,
}

/// Whether a row survives the current filters. Pinned rows always do.
pub(crate) fn row_matches(row: &ModelRow, q: &QueryState) -> bool {
    if row.keep {
        return true;
    }
    matches_text(row, q.query, q.search_descriptions)
        && matches_provider(row, q.providers)
        && (!q.hide_free || !is_free(row))
}

/// Text predicate: either every whitespace-split term is a substring of the
/// name, or the whole query is a substring of the provider, a modality, a
/// feature tag, or (when enabled) the description. Case-insensitive; an
/// empty query matches everything through the vacuous name branch.
fn matches_text(row: &ModelRow, query: &str, search_descriptions: bool) -> bool {
    let name = row.name.to_lowercase();
    if query
        .split_whitespace()
        .all(|term| name.contains(&term.to_lowercase()))
    {
        return true;
    }

    let whole = query.to_lowercase();
    row.provider.to_lowercase().contains(&whole)
        || row.modalities.iter().any(|m| m.to_lowercase().contains(&whole))
        || row.features.iter().any(|f| f.to_lowercase().contains(&whole))
        || (search_descriptions && row.description.to_lowercase().contains(&whole))
}

fn matches_provider(row: &ModelRow, selected: &HashSet<String>) -> bool {
    selected.is_empty() || selected.contains(&row.provider)
}

/// A row is free if its name says so or either parsed cost is zero. The two
/// signals can disagree; each is sufficient on its own.
pub(crate) fn is_free(row: &ModelRow) -> bool {
    row.name.contains("(free)")
        || price_magnitude(&row.input_cost) == 0.0
        || price_magnitude(&row.output_cost) == 0.0
}
