//! Tag schema model: the selectable options of categorical properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Colours a new tag option can be given.
pub const TAG_PALETTE: [&str; 10] = [
    "default", "gray", "brown", "orange", "yellow", "green", "blue", "purple", "pink", "red",
];

/// Kind of a collection property.
///
/// Kinds the worker never touches (formulas, relations, ...) collapse
/// into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Url,
    Date,
    Checkbox,
    Other,
}

impl From<String> for PropertyKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "url" => Self::Url,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            _ => Self::Other,
        }
    }
}

impl PropertyKind {
    /// Whether the property holds values picked from a list of options.
    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Url => "url",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Other => "other",
        }
    }
}

/// One selectable option of a categorical property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOption {
    pub color: String,
    pub id: String,
    pub value: String,
}

/// Definition of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub id: String,
    pub kind: PropertyKind,
    /// Only meaningful for categorical kinds.
    #[serde(default)]
    pub options: Vec<TagOption>,
}

impl PropertySchema {
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Property name → definition, for the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSchema {
    pub properties: BTreeMap<String, PropertySchema>,
}

impl TagSchema {
    /// Look up a categorical property by name.
    pub fn categorical(&self, name: &str) -> Result<&PropertySchema, SchemaError> {
        let property = self
            .properties
            .get(name)
            .ok_or_else(|| SchemaError::UnknownProperty(name.to_string()))?;
        if !property.kind.is_categorical() {
            return Err(SchemaError::WrongPropertyKind {
                name: name.to_string(),
                kind: property.kind.as_str().to_string(),
            });
        }
        Ok(property)
    }

    /// Append `option` to the named property unless its value is taken.
    ///
    /// Returns `Ok(false)` without modifying the schema when an option with
    /// the same value (exact match) already exists.
    pub fn insert_option(&mut self, name: &str, option: TagOption) -> Result<bool, SchemaError> {
        if self.categorical(name)?.has_option(&option.value) {
            return Ok(false);
        }
        // `categorical` succeeded, so the entry exists.
        if let Some(property) = self.properties.get_mut(name) {
            property.options.push(option);
        }
        Ok(true)
    }
}
