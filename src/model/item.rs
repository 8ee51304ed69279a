//! Catalog items and result pages.
//!
//! These are the decoded forms of the endpoint payload. Decoding itself lives
//! in [`crate::parser`]; everything here is already validated.

/// One catalog entry as returned by the search endpoint.
///
/// Optional fields are `None` when the endpoint sent `null` or omitted them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Version string.
    pub version: Option<String>,
    /// Category name.
    pub category: Option<String>,
    /// Human-readable size (e.g. "85 MB").
    pub size: Option<String>,
    /// Tags in wire order, already split and trimmed.
    pub tags: Vec<String>,
    /// Icon path, if the item has its own.
    pub icon_ref: Option<String>,
    /// Path of the downloadable file, relative to the download root.
    pub download_ref: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// Split a comma-delimited tag field.
///
/// Segments are trimmed and empty segments are dropped, so `"cli, tools ,  "`
/// becomes `["cli", "tools"]`.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    /// Items on this page, in endpoint order.
    pub items: Vec<Item>,
    /// Total number of matches across all pages.
    pub total: u64,
    /// Page number the endpoint answered for.
    pub page: u32,
    /// Page size the endpoint answered with.
    pub per_page: u32,
}

impl PageResult {
    /// Number of pages, `ceil(total / per_page)`.
    ///
    /// Zero when there are no matches; callers treat that as one empty page.
    pub fn page_count(&self) -> u32 {
        page_count(self.total, self.per_page)
    }
}

/// `ceil(total / per_page)`, saturating at `u32::MAX`. A zero page size yields 0.
pub fn page_count(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
