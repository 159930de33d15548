//! Map list filtering and sorting.
//!
//! Query strings arrive as raw text. Empty values mean "no filter", and an
//! unrecognized sort key leaves the list in storage order instead of being
//! rejected.

use serde::Serialize;

/// Sort key applied when the `sort` parameter is absent.
pub const DEFAULT_SORT: &str = "name";

/// Ordering requested for the map list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapSort {
    /// Name ascending.
    Name,
    /// Creation time descending.
    Newest,
    /// Creation time ascending.
    Oldest,
    /// Unrecognized key: storage order.
    Unsorted,
}

impl MapSort {
    /// Parse a sort key. Never fails; unknown keys map to [`MapSort::Unsorted`].
    pub fn parse(key: &str) -> Self {
        match key {
            "name" => Self::Name,
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            _ => Self::Unsorted,
        }
    }

    /// SQL `ORDER BY` body for the `game_maps` table.
    ///
    /// Ties are broken by `id` so paging through equal names or timestamps
    /// is deterministic.
    pub fn order_clause(&self) -> &'static str {
        match self {
            Self::Name => "name ASC, id ASC",
            Self::Newest => "created_at DESC, id DESC",
            Self::Oldest => "created_at ASC, id ASC",
            Self::Unsorted => "id ASC",
        }
    }
}

/// Normalized list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapFilter {
    /// Case-insensitive substring of the map name.
    pub search: Option<String>,
    /// Exact mode tag. Unknown tags are kept and simply match nothing.
    pub mode: Option<String>,
}

impl MapFilter {
    /// Build a filter from raw query values, dropping empty strings.
    pub fn new(search: Option<&str>, mode: Option<&str>) -> Self {
        Self {
            search: non_empty(search),
            mode: non_empty(mode),
        }
    }

    /// `ILIKE` pattern for [`MapFilter::search`], if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(contains_pattern)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Build a `LIKE` pattern matching `needle` anywhere, with the wildcard and
/// escape characters in `needle` matched literally (default `\` escape).
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
