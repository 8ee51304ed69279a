//! Search endpoint payload decoder.
//!
//! Pure functions that turn a response body into a validated [`PageResult`].
//! Malformed bodies become [`FetchError`]s of kind `decode`; missing optional
//! item fields are not errors.

use crate::model::{split_tags, FetchError, Item, PageResult};
use serde::Deserialize;

/// Raw JSON structure of the endpoint response.
#[derive(Debug, Deserialize)]
struct RawPage {
    items: Vec<RawItem>,
    total: u64,
    page: u32,
    per_page: u32,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    #[serde(default)]
    version: Option<RawScalar>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    size: Option<RawScalar>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default, alias = "image_path")]
    image: Option<String>,
    #[serde(default, alias = "file_path")]
    relative_path: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Text field that the store may hand back as a number (e.g. `"version": 3.1`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            RawScalar::Text(text) => text,
            RawScalar::Number(number) => number.to_string(),
        }
    }
}

/// Turn blank strings into `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Item {
            name: raw.name,
            version: non_blank(raw.version.map(RawScalar::into_text)),
            category: non_blank(raw.category),
            size: non_blank(raw.size.map(RawScalar::into_text)),
            tags: raw.tag.as_deref().map(split_tags).unwrap_or_default(),
            icon_ref: non_blank(raw.image),
            download_ref: non_blank(raw.relative_path),
            description: non_blank(raw.description),
        }
    }
}

/// Decode a response body.
///
/// # Errors
///
/// Returns a `decode` [`FetchError`] if the body is not JSON or lacks
/// `items`, `total`, `page`, `per_page`, or an item `name`.
pub fn parse_page(body: &[u8]) -> Result<PageResult, FetchError> {
    let raw: RawPage =
        serde_json::from_slice(body).map_err(|e| FetchError::decode(e.to_string()))?;

    Ok(PageResult {
        items: raw.items.into_iter().map(Item::from).collect(),
        total: raw.total,
        page: raw.page,
        per_page: raw.per_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FetchErrorKind;

    #[test]
    fn parses_full_payload() {
        let body = br#"{
            "items": [{
                "name": "VLC",
                "version": "3.0.20",
                "category": "Multimedia",
                "size": "42 MB",
                "tag": "video, player",
                "image": "/static/images/vlc.png",
                "relative_path": "multimedia/vlc.exe"
            }],
            "total": 1,
            "page": 1,
            "per_page": 9
        }"#;

        let page = parse_page(body).expect("valid payload");

        assert_eq!(page.total, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 9);
        let item = &page.items[0];
        assert_eq!(item.name, "VLC");
        assert_eq!(item.version.as_deref(), Some("3.0.20"));
        assert_eq!(item.category.as_deref(), Some("Multimedia"));
        assert_eq!(item.size.as_deref(), Some("42 MB"));
        assert_eq!(item.tags, vec!["video", "player"]);
        assert_eq!(item.icon_ref.as_deref(), Some("/static/images/vlc.png"));
        assert_eq!(item.download_ref.as_deref(), Some("multimedia/vlc.exe"));
    }

    #[test]
    fn missing_and_null_optional_fields_are_empty() {
        let body = br#"{
            "items": [{"name": "7-Zip", "size": null, "tag": null}],
            "total": 1, "page": 1, "per_page": 9
        }"#;

        let item = &parse_page(body).unwrap().items[0];

        assert_eq!(item.size, None);
        assert!(item.tags.is_empty());
        assert_eq!(item.version, None);
        assert_eq!(item.download_ref, None);
    }

    #[test]
    fn tag_field_is_split_on_commas() {
        let body = br#"{
            "items": [{"name": "x", "tag": "cli, tools ,  "}],
            "total": 1, "page": 1, "per_page": 6
        }"#;

        let item = &parse_page(body).unwrap().items[0];

        assert_eq!(item.tags, vec!["cli", "tools"]);
    }

    #[test]
    fn store_column_names_are_accepted_as_aliases() {
        let body = br#"{
            "items": [{
                "id": 7, "name": "GIMP", "description": "Image editor",
                "image_path": "/static/images/gimp.png",
                "file_path": "graphics/gimp.exe",
                "created_at": "2025-01-01 00:00:00"
            }],
            "total": 1, "page": 1, "per_page": 9, "pages": 1
        }"#;

        let item = &parse_page(body).unwrap().items[0];

        assert_eq!(item.icon_ref.as_deref(), Some("/static/images/gimp.png"));
        assert_eq!(item.download_ref.as_deref(), Some("graphics/gimp.exe"));
        assert_eq!(item.description.as_deref(), Some("Image editor"));
    }

    #[test]
    fn numeric_version_is_rendered_as_text() {
        let body = br#"{"items":[{"name":"x","version":2.5,"size":120}],"total":1,"page":1,"per_page":9}"#;

        let item = &parse_page(body).unwrap().items[0];

        assert_eq!(item.version.as_deref(), Some("2.5"));
        assert_eq!(item.size.as_deref(), Some("120"));
    }

    #[test]
    fn blank_size_is_none() {
        let body = br#"{"items":[{"name":"x","size":"  "}],"total":1,"page":1,"per_page":9}"#;

        assert_eq!(parse_page(body).unwrap().items[0].size, None);
    }

    #[test]
    fn empty_result_is_valid() {
        let body = br#"{"items":[],"total":0,"page":1,"per_page":9}"#;

        let page = parse_page(body).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let err = parse_page(b"<html>oops</html>").unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Decode);
    }

    #[test]
    fn missing_total_is_decode_error() {
        let err = parse_page(br#"{"items":[],"page":1,"per_page":9}"#).unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Decode);
        assert!(err.message().contains("total"));
    }

    #[test]
    fn item_without_name_is_decode_error() {
        let body = br#"{"items":[{"version":"1"}],"total":1,"page":1,"per_page":9}"#;

        let err = parse_page(body).unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Decode);
    }
}
