//! Tests for the render pipeline.

use super::*;
use crate::model::split_tags;

fn columns(n: u8) -> Columns {
    Columns::new(n).expect("valid column count")
}

fn item(name: &str) -> Item {
    Item {
        name: name.to_string(),
        version: Some("2.1".to_string()),
        category: Some("Office".to_string()),
        size: Some("12 MB".to_string()),
        tags: vec!["docs".to_string()],
        icon_ref: Some("/static/images/x.png".to_string()),
        download_ref: Some("office/x.exe".to_string()),
        description: None,
    }
}

// ===== Empty results =====

#[test]
fn empty_grid_yields_exactly_one_placeholder() {
    let page = render(&[], ViewMode::Grid, columns(3));

    assert_eq!(page.nodes.len(), 1);
    assert_eq!(
        page.nodes[0].content,
        NodeContent::Placeholder(Placeholder::NoResults)
    );
    assert_eq!(page.layout, Layout::Grid { columns: 3 });
}

#[test]
fn empty_list_yields_exactly_one_placeholder() {
    let page = render(&[], ViewMode::List, columns(4));

    assert_eq!(page.nodes.len(), 1);
    assert!(page.nodes[0].is_placeholder());
}

// ===== Modes =====

#[test]
fn grid_mode_makes_cards_with_column_hint() {
    let page = render(&[item("a"), item("b")], ViewMode::Grid, columns(4));

    assert_eq!(page.layout, Layout::Grid { columns: 4 });
    assert!(page
        .nodes
        .iter()
        .all(|n| matches!(n.content, NodeContent::Card(_))));
}

#[test]
fn list_mode_makes_rows_and_ignores_columns() {
    let a = render(&[item("a")], ViewMode::List, columns(2));
    let b = render(&[item("a")], ViewMode::List, columns(5));

    assert_eq!(a.layout, Layout::List);
    assert_eq!(a, b);
    assert!(matches!(a.nodes[0].content, NodeContent::Row(_)));
}

// ===== Ordering =====

#[test]
fn nodes_follow_input_order_with_monotonic_stagger() {
    let items = vec![item("first"), item("second"), item("third")];

    let page = render(&items, ViewMode::Grid, columns(3));

    let names: Vec<&str> = page
        .nodes
        .iter()
        .filter_map(|n| n.item())
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    let stagger: Vec<usize> = page.nodes.iter().map(|n| n.stagger_index).collect();
    assert_eq!(stagger, vec![0, 1, 2]);
}

#[test]
fn reveal_delay_scales_with_index() {
    let page = render(&[item("a"), item("b"), item("c")], ViewMode::Grid, columns(3));
    let step = Duration::from_millis(40);

    assert_eq!(page.nodes[0].reveal_delay(step), Duration::ZERO);
    assert_eq!(page.nodes[2].reveal_delay(step), Duration::from_millis(80));
}

// ===== Missing fields =====

#[test]
fn missing_size_and_tags_render_empty() {
    let bare = Item {
        name: "bare".to_string(),
        ..Item::default()
    };

    let page = render(&[bare], ViewMode::List, columns(3));
    let view = page.nodes[0].item().unwrap();

    assert_eq!(view.size, "");
    assert!(view.tags.is_empty());
    assert_eq!(view.subtitle, "v  | ");
    assert!(!view.subtitle.contains("undefined"));
    assert!(!view.subtitle.contains("None"));
    assert_eq!(view.icon_ref, DEFAULT_ICON);
    assert_eq!(view.download_ref, None);
}

#[test]
fn tag_badges_come_from_split_wire_field() {
    let tagged = Item {
        name: "t".to_string(),
        tags: split_tags("cli, tools ,  "),
        ..Item::default()
    };

    let page = render(&[tagged], ViewMode::Grid, columns(3));

    assert_eq!(page.nodes[0].item().unwrap().tags, vec!["cli", "tools"]);
}

#[test]
fn item_view_uses_configured_asset_roots() {
    let renderer = Renderer::new("/img/fallback.svg", "https://mirror.example/dl/");
    let mut no_icon = item("x");
    no_icon.icon_ref = None;

    let page = renderer.render(&[no_icon], ViewMode::Grid, columns(2));
    let view = page.nodes[0].item().unwrap();

    assert_eq!(view.icon_ref, "/img/fallback.svg");
    assert_eq!(
        view.download_ref.as_deref(),
        Some("https://mirror.example/dl/office/x.exe")
    );
    assert_eq!(view.subtitle, "v 2.1 | Office");
}

// ===== Failures =====

#[test]
fn failure_renders_single_placeholder_with_category() {
    let err = FetchError::server("status 503");

    let page = Renderer::default().render_failure(&err, ViewMode::Grid, columns(3));

    assert_eq!(page.nodes.len(), 1);
    match &page.nodes[0].content {
        NodeContent::Placeholder(Placeholder::Failed { kind, message }) => {
            assert_eq!(*kind, FetchErrorKind::Server);
            assert_eq!(message, "status 503");
        }
        other => panic!("expected failure placeholder, got {other:?}"),
    }
}

#[test]
fn placeholder_texts_differ_by_category() {
    let network = Placeholder::Failed {
        kind: FetchErrorKind::Network,
        message: String::new(),
    };
    let decode = Placeholder::Failed {
        kind: FetchErrorKind::Decode,
        message: String::new(),
    };

    assert_ne!(network.text(), decode.text());
    assert_eq!(Placeholder::NoResults.text(), NO_RESULTS_TEXT);
}
