//! Tests for QueryState and QueryPatch.

use super::*;

fn state_on_page(page: u32) -> QueryState {
    QueryState::default().update(QueryPatch::page(page))
}

fn tagged_state() -> QueryState {
    QueryState::initial(true, PerPage::default(), ViewMode::Grid, Columns::default())
}

// ===== Defaults =====

#[test]
fn default_state_matches_selector_defaults() {
    let state = QueryState::default();

    assert_eq!(state.search(), "");
    assert_eq!(state.category(), &Filter::All);
    assert_eq!(state.tag(), None);
    assert_eq!(state.page(), 1);
    assert_eq!(state.per_page().get(), 9);
    assert_eq!(state.view_mode(), ViewMode::Grid);
    assert_eq!(state.columns().get(), 3);
}

#[test]
fn initial_with_tag_filter_starts_at_all() {
    let state = tagged_state();

    assert_eq!(state.tag(), Some(&Filter::All));
}

// ===== Re-clamp invariant =====

#[test]
fn category_change_resets_page_to_one() {
    let state = state_on_page(3);

    let next = state.update(QueryPatch::category(Filter::Only("tools".into())));

    assert_eq!(next.page(), 1);
    assert_eq!(next.category(), &Filter::Only("tools".into()));
}

#[test]
fn columns_change_keeps_page() {
    let state = state_on_page(3);

    let next = state.update(QueryPatch::columns(Columns::new(4).unwrap()));

    assert_eq!(next.page(), 3);
    assert_eq!(next.columns().get(), 4);
}

#[test]
fn view_mode_change_keeps_page() {
    let state = state_on_page(2);

    let next = state.update(QueryPatch::view_mode(ViewMode::List));

    assert_eq!(next.page(), 2);
    assert_eq!(next.view_mode(), ViewMode::List);
}

#[test]
fn search_change_resets_page() {
    let next = state_on_page(5).update(QueryPatch::search("gimp"));

    assert_eq!(next.page(), 1);
    assert_eq!(next.search(), "gimp");
}

#[test]
fn per_page_change_resets_page() {
    let next = state_on_page(4).update(QueryPatch::per_page(PerPage::new(24).unwrap()));

    assert_eq!(next.page(), 1);
    assert_eq!(next.per_page().get(), 24);
}

#[test]
fn tag_change_resets_page_when_tag_filter_enabled() {
    let state = tagged_state().update(QueryPatch::page(6));

    let next = state.update(QueryPatch::tag(Filter::Only("cli".into())));

    assert_eq!(next.page(), 1);
    assert_eq!(next.tag(), Some(&Filter::Only("cli".into())));
}

#[test]
fn tag_patch_is_ignored_without_tag_filter() {
    let state = state_on_page(2);

    let next = state.update(QueryPatch::tag(Filter::Only("cli".into())));

    assert_eq!(next, state);
}

#[test]
fn setting_same_search_is_not_a_change() {
    let state = state_on_page(3).update(QueryPatch::search("vlc"));
    let on_three = state.update(QueryPatch::page(3));

    let next = on_three.update(QueryPatch::search("vlc"));

    assert_eq!(next.page(), 3);
}

#[test]
fn explicit_page_in_same_patch_wins_over_reclamp() {
    let patch = QueryPatch {
        search: Some("x".into()),
        page: Some(2),
        ..QueryPatch::default()
    };

    let next = state_on_page(5).update(patch);

    assert_eq!(next.page(), 2);
}

#[test]
fn page_zero_is_raised_to_one() {
    let next = QueryState::default().update(QueryPatch::page(0));

    assert_eq!(next.page(), 1);
}

#[test]
fn update_does_not_touch_previous_snapshot() {
    let state = state_on_page(3);

    let _ = state.update(QueryPatch::search("new"));

    assert_eq!(state.search(), "");
    assert_eq!(state.page(), 3);
}

#[test]
fn identical_snapshots_are_equal() {
    let a = QueryState::default().update(QueryPatch::search("a"));
    let b = QueryState::default().update(QueryPatch::search("a"));

    assert_eq!(a, b);
}

// ===== Smart constructors =====

#[test]
fn per_page_accepts_only_selector_choices() {
    for n in PER_PAGE_CHOICES {
        assert!(PerPage::new(n).is_ok());
    }
    assert!(matches!(
        PerPage::new(10),
        Err(ControllerError::InvalidPerPage(10))
    ));
    assert!(PerPage::new(0).is_err());
}

#[test]
fn columns_rejects_below_two() {
    assert!(Columns::new(2).is_ok());
    assert!(Columns::new(6).is_ok());
    assert!(matches!(
        Columns::new(1),
        Err(ControllerError::InvalidColumns(1))
    ));
}

#[test]
fn filter_from_selector_maps_all_and_empty() {
    assert_eq!(Filter::from_selector("all"), Filter::All);
    assert_eq!(Filter::from_selector("ALL"), Filter::All);
    assert_eq!(Filter::from_selector("  "), Filter::All);
    assert_eq!(
        Filter::from_selector(" Graphics "),
        Filter::Only("Graphics".into())
    );
}

#[test]
fn view_mode_parse_round_trips_names() {
    assert_eq!(ViewMode::parse("grid").unwrap(), ViewMode::Grid);
    assert_eq!(ViewMode::parse("List").unwrap(), ViewMode::List);
    assert!(ViewMode::parse("table").is_err());
}

// ===== Wire pairs =====

#[test]
fn query_pairs_omit_tag_when_disabled() {
    let pairs = QueryState::default().query_pairs();
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();

    assert_eq!(keys, vec!["search", "category", "page", "per_page"]);
}

#[test]
fn query_pairs_send_all_as_empty_value() {
    let state = tagged_state().update(QueryPatch::search("zip"));

    let pairs = state.query_pairs();

    assert_eq!(
        pairs,
        vec![
            ("search", "zip".to_string()),
            ("category", String::new()),
            ("tag", String::new()),
            ("page", "1".to_string()),
            ("per_page", "9".to_string()),
        ]
    );
}
