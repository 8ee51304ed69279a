//! Page selector model.
//!
//! [`build`] is pure: the same `(total, page, per_page)` always yields the
//! same [`Pagination`], so redraws are stable.

use crate::model::page_count;

/// One page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageAction {
    /// Number shown on the button.
    pub label: u32,
    /// Whether this is the page being shown.
    pub is_current: bool,
    /// Page requested when the button is used.
    pub target_page: u32,
}

/// Derived page selector for a result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pagination {
    /// `ceil(total / per_page)`; zero when there are no matches.
    pub page_count: u32,
    /// Page actively shown after clamping.
    pub current_page: u32,
    /// One action per page, in ascending order. Empty when `page_count` is 0.
    pub actions: Vec<PageAction>,
}

impl Pagination {
    /// True when there is nothing to page through (the empty indicator).
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The action marked current, if any.
    pub fn current(&self) -> Option<&PageAction> {
        self.actions.iter().find(|a| a.is_current)
    }
}

/// Build the page selector.
///
/// A `page` outside `1..=page_count` is treated as page 1 (never the last
/// page). `total == 0` yields no actions.
pub fn build(total: u64, page: u32, per_page: u32) -> Pagination {
    let page_count = page_count(total, per_page);
    let current_page = if (1..=page_count).contains(&page) {
        page
    } else {
        1
    };

    let actions = (1..=page_count)
        .map(|target_page| PageAction {
            label: target_page,
            is_current: target_page == current_page,
            target_page,
        })
        .collect();

    Pagination {
        page_count,
        current_page,
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_25_items_9_per_page_has_three_actions() {
        let pagination = build(25, 2, 9);

        assert_eq!(pagination.page_count, 3);
        assert_eq!(pagination.actions.len(), 3);
        let labels: Vec<u32> = pagination.actions.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec![1, 2, 3]);
        assert_eq!(pagination.current().map(|a| a.target_page), Some(2));
        assert!(!pagination.actions[0].is_current);
        assert!(pagination.actions[1].is_current);
        assert!(!pagination.actions[2].is_current);
    }

    #[test]
    fn build_is_idempotent() {
        assert_eq!(build(25, 2, 9), build(25, 2, 9));
    }

    #[test]
    fn zero_total_has_no_actions() {
        let pagination = build(0, 1, 9);

        assert!(pagination.is_empty());
        assert_eq!(pagination.page_count, 0);
        assert_eq!(pagination.current(), None);
    }

    #[test]
    fn page_past_the_end_clamps_to_first() {
        let pagination = build(10, 7, 6);

        assert_eq!(pagination.page_count, 2);
        assert_eq!(pagination.current_page, 1);
        assert!(pagination.actions[0].is_current);
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let pagination = build(10, 0, 6);

        assert_eq!(pagination.current_page, 1);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(build(18, 1, 9).actions.len(), 2);
    }

    #[test]
    fn target_page_matches_label() {
        for action in build(100, 4, 12).actions {
            assert_eq!(action.label, action.target_page);
        }
    }
}
