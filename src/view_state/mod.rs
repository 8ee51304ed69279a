//! View-state layer (pure).
//!
//! Everything a render target needs, computed without touching a terminal or
//! a network: the page selector and the rendered node sequence.

pub mod pagination;
pub mod render;

pub use pagination::{build, PageAction, Pagination};
pub use render::{
    layout_for, render, ItemView, Layout, NodeContent, Placeholder, RenderedPage, Renderer,
    ViewNode, DEFAULT_DOWNLOAD_BASE, DEFAULT_ICON,
};

use crate::model::QueryState;

/// Complete content for one draw: the query it answers, its nodes, and its
/// page selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFrame {
    /// Snapshot this frame was produced for.
    pub query: QueryState,
    /// Item nodes or a placeholder.
    pub page: RenderedPage,
    /// Page selector; empty on failures and empty results.
    pub pagination: Pagination,
}

impl ViewFrame {
    /// Names of the items in this frame, in display order.
    pub fn item_names(&self) -> Vec<&str> {
        self.page
            .nodes
            .iter()
            .filter_map(ViewNode::item)
            .map(|view| view.name.as_str())
            .collect()
    }
}
