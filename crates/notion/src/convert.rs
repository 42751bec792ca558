//! Mapping between Notion API JSON and the domain types in `reelsync-core`.

use std::collections::{BTreeMap, HashMap};

use reelsync_core::row::{PropertyValue, Row};
use reelsync_core::tags::{PropertyKind, PropertySchema, TagOption, TagSchema};
use reelsync_core::types::Timestamp;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::NotionError;

/// Notion rejects rich text segments longer than this many characters.
pub const MAX_RICH_TEXT_LEN: usize = 2000;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A page object (one database row).
#[derive(Debug, Deserialize)]
pub struct PageObject {
    pub id: String,
    pub created_time: Timestamp,
    #[serde(default)]
    pub properties: HashMap<String, PageProperty>,
}

/// The page property shapes the worker reads. Everything else is `Other`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageProperty {
    Title { title: Vec<RichText> },
    Url { url: Option<String> },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<PageObject>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// A database object (schema only).
#[derive(Debug, Deserialize)]
pub struct DatabaseObject {
    #[serde(default)]
    pub properties: BTreeMap<String, DatabaseProperty>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseProperty {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub select: Option<OptionList>,
    pub multi_select: Option<OptionList>,
}

#[derive(Debug, Deserialize)]
pub struct OptionList {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Build a [`Row`] from a page.
///
/// The title is taken from whichever property has type `title`; the
/// detail URL from the `url` property named `detail_url_property`.
pub fn row_from_page(page: PageObject, detail_url_property: &str) -> Row {
    let title = page
        .properties
        .values()
        .find_map(|p| match p {
            PageProperty::Title { title } => Some(plain_text(title)),
            _ => None,
        })
        .unwrap_or_default();

    let detail_url = match page.properties.get(detail_url_property) {
        Some(PageProperty::Url { url }) => url.clone().filter(|u| !u.is_empty()),
        _ => None,
    };

    Row {
        id: page.id,
        title,
        created: page.created_time,
        detail_url,
    }
}

/// Build a [`TagSchema`] from a database object.
pub fn schema_from_database(database: DatabaseObject) -> TagSchema {
    let properties = database
        .properties
        .into_iter()
        .map(|(name, property)| {
            let options = property
                .multi_select
                .or(property.select)
                .map(|list| {
                    list.options
                        .into_iter()
                        .map(|o| TagOption {
                            color: o.color.unwrap_or_else(|| "default".to_string()),
                            id: o.id,
                            value: o.name,
                        })
                        .collect()
                })
                .unwrap_or_default();
            (
                name,
                PropertySchema {
                    id: property.id,
                    kind: property.kind,
                    options,
                },
            )
        })
        .collect();

    TagSchema { properties }
}

/// Decode a JSON body into `T`, reporting shape mismatches as
/// [`NotionError::Decode`].
pub fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, NotionError> {
    serde_json::from_value(body).map_err(|e| NotionError::Decode(e.to_string()))
}

fn plain_text(segments: &[RichText]) -> String {
    segments.iter().map(|s| s.plain_text.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// JSON for one entry of a page update's `properties` object.
pub fn property_value_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Title(text) => json!({ "title": [text_segment(text)] }),
        PropertyValue::Select(name) => json!({ "select": { "name": name } }),
        PropertyValue::MultiSelect(names) => {
            let names: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
            json!({ "multi_select": names })
        }
        PropertyValue::Url(url) => json!({ "url": url }),
        PropertyValue::Number(n) => json!({ "number": n }),
    }
}

/// Body of `PATCH /pages/{id}` setting one property.
pub fn property_update_body(name: &str, value: &PropertyValue) -> Value {
    json!({ "properties": { name: property_value_json(value) } })
}

/// Body of `PATCH /pages/{id}` setting an emoji icon.
pub fn icon_update_body(emoji: &str) -> Value {
    json!({ "icon": { "type": "emoji", "emoji": emoji } })
}

/// Body of `PATCH /blocks/{id}/children` appending one paragraph.
pub fn paragraph_body(text: &str) -> Value {
    json!({
        "children": [{
            "object": "block",
            "type": "paragraph",
            "paragraph": { "rich_text": [text_segment(text)] }
        }]
    })
}

/// Body of `PATCH /databases/{id}` rewriting categorical option lists.
///
/// Options are sent by name and colour; Notion matches existing options
/// by name and assigns its own ids to new ones.
pub fn schema_update_body(schema: &TagSchema) -> Value {
    let mut properties = serde_json::Map::new();
    for (name, property) in &schema.properties {
        if !property.kind.is_categorical() {
            continue;
        }
        let options: Vec<Value> = property
            .options
            .iter()
            .map(|o| json!({ "name": o.value, "color": o.color }))
            .collect();
        properties.insert(
            name.clone(),
            json!({ property.kind.as_str(): { "options": options } }),
        );
    }
    json!({ "properties": properties })
}

fn text_segment(text: &str) -> Value {
    let content: String = text.chars().take(MAX_RICH_TEXT_LEN).collect();
    json!({ "type": "text", "text": { "content": content } })
}
