//! Render pipeline: result set → view nodes.
//!
//! Produces toolkit-independent [`ViewNode`]s. Each node carries a stagger
//! index (its position) that render targets may turn into a reveal delay.
//! An empty result set yields one placeholder node so "no results" is
//! distinguishable from "not loaded yet".

use crate::model::{Columns, FetchError, FetchErrorKind, Item, ViewMode};
use std::time::Duration;

/// Icon used when an item has none.
pub const DEFAULT_ICON: &str = "/static/default.png";

/// Root prepended to item download paths.
pub const DEFAULT_DOWNLOAD_BASE: &str = "/download";

/// Text of the "no results" placeholder.
pub const NO_RESULTS_TEXT: &str = "No software matches the current filters.";

/// Layout hint for the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Cards in `columns` columns.
    Grid {
        /// Number of columns.
        columns: u8,
    },
    /// Single column of rows.
    List,
}

/// Display-ready fields of one item. Missing values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemView {
    /// Display name.
    pub name: String,
    /// `"v <version> | <category>"`.
    pub subtitle: String,
    /// Size text, empty when unknown.
    pub size: String,
    /// Tag badges.
    pub tags: Vec<String>,
    /// Icon reference, falling back to the default icon.
    pub icon_ref: String,
    /// Download link, absent when the item has no file.
    pub download_ref: Option<String>,
    /// Description, empty when unknown.
    pub description: String,
}

/// Informational node shown instead of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// The query matched nothing.
    NoResults,
    /// The request failed.
    Failed {
        /// Failure category.
        kind: FetchErrorKind,
        /// Detail from the error.
        message: String,
    },
}

impl Placeholder {
    /// Sentence shown to the user.
    pub fn text(&self) -> String {
        match self {
            Placeholder::NoResults => NO_RESULTS_TEXT.to_string(),
            Placeholder::Failed { kind, .. } => match kind {
                FetchErrorKind::Network => "Could not reach the catalog server.".to_string(),
                FetchErrorKind::Server => "The catalog server returned an error.".to_string(),
                FetchErrorKind::Decode => {
                    "The catalog server sent an unreadable response.".to_string()
                }
            },
        }
    }
}

/// What a node shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeContent {
    /// Grid card.
    Card(ItemView),
    /// List row.
    Row(ItemView),
    /// Informational placeholder.
    Placeholder(Placeholder),
}

/// One renderable unit with its reveal order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewNode {
    /// Position in the produced sequence, starting at 0.
    pub stagger_index: usize,
    /// The node's content.
    pub content: NodeContent,
}

impl ViewNode {
    /// Reveal delay for this node, `step * stagger_index`. Advisory only.
    pub fn reveal_delay(&self, step: Duration) -> Duration {
        step.saturating_mul(u32::try_from(self.stagger_index).unwrap_or(u32::MAX))
    }

    /// The item view for cards and rows.
    pub fn item(&self) -> Option<&ItemView> {
        match &self.content {
            NodeContent::Card(view) | NodeContent::Row(view) => Some(view),
            NodeContent::Placeholder(_) => None,
        }
    }

    /// Whether this is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, NodeContent::Placeholder(_))
    }
}

/// Rendered result set: layout hint plus nodes in display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderedPage {
    /// How the target should arrange the nodes.
    pub layout: Layout,
    /// Nodes in input order.
    pub nodes: Vec<ViewNode>,
}

/// Layout hint for a view mode. List mode ignores `columns`.
pub fn layout_for(view_mode: ViewMode, columns: Columns) -> Layout {
    match view_mode {
        ViewMode::Grid => Layout::Grid {
            columns: columns.get(),
        },
        ViewMode::List => Layout::List,
    }
}

/// Maps items to view nodes using configured asset references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    default_icon: String,
    download_base: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_ICON, DEFAULT_DOWNLOAD_BASE)
    }
}

impl Renderer {
    /// Renderer with a fallback icon and a download root.
    pub fn new(default_icon: impl Into<String>, download_base: impl Into<String>) -> Self {
        Self {
            default_icon: default_icon.into(),
            download_base: download_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Render a result set.
    pub fn render(&self, items: &[Item], view_mode: ViewMode, columns: Columns) -> RenderedPage {
        if items.is_empty() {
            return placeholder_page(Placeholder::NoResults, view_mode, columns);
        }

        let nodes = items
            .iter()
            .enumerate()
            .map(|(stagger_index, item)| {
                let view = self.item_view(item);
                let content = match view_mode {
                    ViewMode::Grid => NodeContent::Card(view),
                    ViewMode::List => NodeContent::Row(view),
                };
                ViewNode {
                    stagger_index,
                    content,
                }
            })
            .collect();

        RenderedPage {
            layout: layout_for(view_mode, columns),
            nodes,
        }
    }

    /// Render a failed request as a single placeholder.
    pub fn render_failure(
        &self,
        error: &FetchError,
        view_mode: ViewMode,
        columns: Columns,
    ) -> RenderedPage {
        placeholder_page(
            Placeholder::Failed {
                kind: error.kind(),
                message: error.message().to_string(),
            },
            view_mode,
            columns,
        )
    }

    fn item_view(&self, item: &Item) -> ItemView {
        let version = item.version.as_deref().unwrap_or_default();
        let category = item.category.as_deref().unwrap_or_default();
        ItemView {
            name: item.name.clone(),
            subtitle: format!("v {version} | {category}"),
            size: item.size.clone().unwrap_or_default(),
            tags: item.tags.clone(),
            icon_ref: item
                .icon_ref
                .clone()
                .unwrap_or_else(|| self.default_icon.clone()),
            download_ref: item.download_ref.as_deref().map(|path| {
                format!("{}/{}", self.download_base, path.trim_start_matches('/'))
            }),
            description: item.description.clone().unwrap_or_default(),
        }
    }
}

fn placeholder_page(placeholder: Placeholder, view_mode: ViewMode, columns: Columns) -> RenderedPage {
    RenderedPage {
        layout: layout_for(view_mode, columns),
        nodes: vec![ViewNode {
            stagger_index: 0,
            content: NodeContent::Placeholder(placeholder),
        }],
    }
}

/// Render with the default icon and download root.
pub fn render(items: &[Item], view_mode: ViewMode, columns: Columns) -> RenderedPage {
    Renderer::default().render(items, view_mode, columns)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
