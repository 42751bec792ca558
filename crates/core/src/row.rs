//! Rows of the watched collection and the values written into them.

use serde::{Deserialize, Serialize};

use crate::types::{RowId, Timestamp};

/// A row as read from the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    /// Plain text of the title column; empty while the user is still typing.
    pub title: String,
    pub created: Timestamp,
    /// Value of the detail URL column, `None` when unset.
    pub detail_url: Option<String>,
}

impl Row {
    /// True once the row carries a non-blank title.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// True when the row has already been enriched.
    pub fn is_enriched(&self) -> bool {
        self.detail_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// A typed value for one named row property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Title(String),
    Select(String),
    MultiSelect(Vec<String>),
    Url(String),
    Number(f64),
}

/// Column names of the collection.
///
/// Defaults match the watchlist template; each can be overridden from
/// the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNames {
    pub title: String,
    pub kind: String,
    pub detail_url: String,
    pub genre: String,
    pub rating: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Name".into(),
            kind: "Type".into(),
            detail_url: "IMDb".into(),
            genre: "Genre".into(),
            rating: "Rating".into(),
        }
    }
}
