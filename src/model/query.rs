//! Query snapshot and its pure update rule.
//!
//! A [`QueryState`] is never mutated in place. Every change goes through
//! [`QueryState::update`], which returns a fresh snapshot and applies the
//! pagination re-clamp: changing the search text, a filter, or the page size
//! sends the view back to page 1.

use crate::model::error::ControllerError;
use std::fmt;

/// Wire value used for the catch-all filter.
pub const FILTER_ALL: &str = "all";

/// Page sizes offered by the per-page selector.
pub const PER_PAGE_CHOICES: [u32; 4] = [6, 9, 12, 24];

/// Smallest grid column count.
pub const MIN_COLUMNS: u8 = 2;

// ===== ViewMode =====

/// Presentation mode for the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Cards laid out in `columns` columns.
    #[default]
    Grid,
    /// One row per item, single column.
    List,
}

impl ViewMode {
    /// Parse a mode name (`"grid"` or `"list"`, case-insensitive).
    pub fn parse(raw: &str) -> Result<Self, ControllerError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            _ => Err(ControllerError::UnknownViewMode(raw.to_string())),
        }
    }

    /// Lowercase name, matching what [`ViewMode::parse`] accepts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== PerPage =====

/// Validated page size. Only values in [`PER_PAGE_CHOICES`] can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerPage(u32);

impl PerPage {
    /// Smart constructor: rejects sizes outside the selector's choices.
    pub fn new(raw: u32) -> Result<Self, ControllerError> {
        if PER_PAGE_CHOICES.contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(ControllerError::InvalidPerPage(raw))
        }
    }

    /// The page size as an integer.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PerPage {
    fn default() -> Self {
        Self(9)
    }
}

// ===== Columns =====

/// Validated grid column count (at least [`MIN_COLUMNS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Columns(u8);

impl Columns {
    /// Smart constructor: rejects counts below [`MIN_COLUMNS`].
    pub fn new(raw: u8) -> Result<Self, ControllerError> {
        if raw >= MIN_COLUMNS {
            Ok(Self(raw))
        } else {
            Err(ControllerError::InvalidColumns(raw))
        }
    }

    /// The column count as an integer.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self(3)
    }
}

// ===== Filter =====

/// Category or tag filter. `All` disables filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// No filtering on this dimension.
    #[default]
    All,
    /// Keep only items matching this value.
    Only(String),
}

impl Filter {
    /// Build a filter from a selector value.
    ///
    /// Empty input and `"all"` (any case) both mean [`Filter::All`].
    pub fn from_selector(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(FILTER_ALL) {
            Filter::All
        } else {
            Filter::Only(trimmed.to_string())
        }
    }

    /// Value sent on the wire. The endpoint reads an empty value as "no filter".
    pub fn wire_value(&self) -> &str {
        match self {
            Filter::All => "",
            Filter::Only(value) => value,
        }
    }
}

// ===== QueryState =====

/// Immutable snapshot of every user-controlled view parameter.
///
/// Fields are private; the only way to derive a new snapshot is
/// [`QueryState::update`], which keeps `page` consistent with the filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    search: String,
    category: Filter,
    tag: Option<Filter>,
    page: u32,
    per_page: PerPage,
    view_mode: ViewMode,
    columns: Columns,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::initial(false, PerPage::default(), ViewMode::default(), Columns::default())
    }
}

impl QueryState {
    /// Starting snapshot for a controller.
    ///
    /// `tag` is present (as [`Filter::All`]) only when tag filtering is enabled.
    pub fn initial(
        tag_filter_enabled: bool,
        per_page: PerPage,
        view_mode: ViewMode,
        columns: Columns,
    ) -> Self {
        Self {
            search: String::new(),
            category: Filter::All,
            tag: tag_filter_enabled.then_some(Filter::All),
            page: 1,
            per_page,
            view_mode,
            columns,
        }
    }

    /// Free-text search.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Category filter.
    pub fn category(&self) -> &Filter {
        &self.category
    }

    /// Tag filter, `None` when tag filtering is not configured.
    pub fn tag(&self) -> Option<&Filter> {
        self.tag.as_ref()
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub fn per_page(&self) -> PerPage {
        self.per_page
    }

    /// Grid or list.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Grid column count.
    pub fn columns(&self) -> Columns {
        self.columns
    }

    /// Produce the next snapshot from this one plus `patch`.
    ///
    /// Setting `search`, `category`, `tag` or `per_page` to a *different*
    /// value resets `page` to 1. An explicit `page` in the same patch is
    /// applied after the reset. `view_mode` and `columns` never touch `page`.
    /// A tag patch on a snapshot without tag filtering is ignored.
    pub fn update(&self, patch: QueryPatch) -> QueryState {
        let mut next = self.clone();
        let mut filters_changed = false;

        if let Some(search) = patch.search {
            filters_changed |= search != next.search;
            next.search = search;
        }
        if let Some(category) = patch.category {
            filters_changed |= category != next.category;
            next.category = category;
        }
        if let (Some(tag), Some(current)) = (patch.tag, next.tag.as_mut()) {
            filters_changed |= tag != *current;
            *current = tag;
        }
        if let Some(per_page) = patch.per_page {
            filters_changed |= per_page != next.per_page;
            next.per_page = per_page;
        }
        if filters_changed {
            next.page = 1;
        }
        if let Some(page) = patch.page {
            next.page = page.max(1);
        }
        if let Some(view_mode) = patch.view_mode {
            next.view_mode = view_mode;
        }
        if let Some(columns) = patch.columns {
            next.columns = columns;
        }

        next
    }

    /// Query-string pairs for the search endpoint, in wire order.
    ///
    /// `tag` is omitted when tag filtering is not configured.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("search", self.search.clone()),
            ("category", self.category.wire_value().to_string()),
        ];
        if let Some(tag) = &self.tag {
            pairs.push(("tag", tag.wire_value().to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("per_page", self.per_page.get().to_string()));
        pairs
    }
}

// ===== QueryPatch =====

/// Partial change to a [`QueryState`]. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
    /// New search text.
    pub search: Option<String>,
    /// New category filter.
    pub category: Option<Filter>,
    /// New tag filter.
    pub tag: Option<Filter>,
    /// New page number (values below 1 become 1).
    pub page: Option<u32>,
    /// New page size.
    pub per_page: Option<PerPage>,
    /// New view mode.
    pub view_mode: Option<ViewMode>,
    /// New column count.
    pub columns: Option<Columns>,
}

impl QueryPatch {
    /// Patch that only changes the search text.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the category.
    pub fn category(filter: Filter) -> Self {
        Self {
            category: Some(filter),
            ..Self::default()
        }
    }

    /// Patch that only changes the tag.
    pub fn tag(filter: Filter) -> Self {
        Self {
            tag: Some(filter),
            ..Self::default()
        }
    }

    /// Patch that only changes the page.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    /// Patch that only changes the page size.
    pub fn per_page(per_page: PerPage) -> Self {
        Self {
            per_page: Some(per_page),
            ..Self::default()
        }
    }

    /// Patch that only changes the view mode.
    pub fn view_mode(view_mode: ViewMode) -> Self {
        Self {
            view_mode: Some(view_mode),
            ..Self::default()
        }
    }

    /// Patch that only changes the column count.
    pub fn columns(columns: Columns) -> Self {
        Self {
            columns: Some(columns),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
