//! In-memory collection and lookup backends shared by the worker tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reelsync_core::row::{PropertyValue, Row};
use reelsync_core::tags::{PropertyKind, PropertySchema, TagOption, TagSchema};
use reelsync_imdb::{Candidate, LookupError, MetadataLookup, TitleDetails};
use reelsync_notion::{CollectionClient, NotionError};

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// A write the worker made to a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Property { row_id: String, name: String, value: PropertyValue },
    Icon { row_id: String, icon: String },
    Block { row_id: String, text: String },
}

pub struct FakeCollection {
    rows: Mutex<HashMap<String, Row>>,
    schema: Mutex<TagSchema>,
    writes: Mutex<Vec<Write>>,
    schema_writes: AtomicUsize,
}

impl FakeCollection {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            schema: Mutex::new(watchlist_schema()),
            writes: Mutex::new(Vec::new()),
            schema_writes: AtomicUsize::new(0),
        }
    }

    pub fn with_row(self, id: &str, title: &str) -> Self {
        self.rows.lock().unwrap().insert(
            id.to_string(),
            Row {
                id: id.to_string(),
                title: title.to_string(),
                created: chrono::Utc::now(),
                detail_url: None,
            },
        );
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn property(&self, row_id: &str, name: &str) -> Option<PropertyValue> {
        self.writes().into_iter().rev().find_map(|w| match w {
            Write::Property { row_id: r, name: n, value } if r == row_id && n == name => {
                Some(value)
            }
            _ => None,
        })
    }

    pub fn schema(&self) -> TagSchema {
        self.schema.lock().unwrap().clone()
    }

    pub fn schema_writes(&self) -> usize {
        self.schema_writes.load(Ordering::SeqCst)
    }

    fn record(&self, write: Write) {
        self.writes.lock().unwrap().push(write);
    }
}

/// Name (title), Type (select), IMDb (url), Genre (multi-select with
/// Drama), Rating (number).
pub fn watchlist_schema() -> TagSchema {
    let mut properties = BTreeMap::new();
    let plain = |id: &str, kind| PropertySchema {
        id: id.to_string(),
        kind,
        options: Vec::new(),
    };
    properties.insert("Name".to_string(), plain("title", PropertyKind::Title));
    properties.insert("Type".to_string(), plain("type", PropertyKind::Select));
    properties.insert("IMDb".to_string(), plain("imdb", PropertyKind::Url));
    properties.insert("Rating".to_string(), plain("rating", PropertyKind::Number));
    properties.insert(
        "Genre".to_string(),
        PropertySchema {
            id: "genre".to_string(),
            kind: PropertyKind::MultiSelect,
            options: vec![TagOption {
                color: "red".into(),
                id: "drama-id".into(),
                value: "Drama".into(),
            }],
        },
    );
    TagSchema { properties }
}

#[async_trait]
impl CollectionClient for FakeCollection {
    async fn list_rows(&self) -> Result<Vec<Row>, NotionError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn get_row(&self, row_id: &str) -> Result<Row, NotionError> {
        self.rows
            .lock()
            .unwrap()
            .get(row_id)
            .cloned()
            .ok_or_else(|| NotionError::RowNotFound(row_id.to_string()))
    }

    async fn set_property(
        &self,
        row_id: &str,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), NotionError> {
        self.record(Write::Property {
            row_id: row_id.to_string(),
            name: name.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    async fn set_icon(&self, row_id: &str, icon: &str) -> Result<(), NotionError> {
        self.record(Write::Icon {
            row_id: row_id.to_string(),
            icon: icon.to_string(),
        });
        Ok(())
    }

    async fn append_text_block(&self, row_id: &str, text: &str) -> Result<(), NotionError> {
        self.record(Write::Block {
            row_id: row_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn get_schema(&self) -> Result<TagSchema, NotionError> {
        Ok(self.schema())
    }

    async fn set_schema(&self, schema: &TagSchema) -> Result<(), NotionError> {
        *self.schema.lock().unwrap() = schema.clone();
        self.schema_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Film database with a fixed catalogue keyed by lowercase search text.
pub struct FakeLookup {
    catalogue: HashMap<String, TitleDetails>,
    searches: Mutex<Vec<String>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self {
            catalogue: HashMap::new(),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_title(mut self, query: &str, details: TitleDetails) -> Self {
        self.catalogue.insert(query.to_lowercase(), details);
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

pub fn inception() -> TitleDetails {
    TitleDetails {
        id: "tt1375666".into(),
        kind: "movie".into(),
        title: "Inception".into(),
        plot: vec!["A thief who steals corporate secrets...::writer".into()],
        rating: Some(8.8),
        genres: vec!["Action".into(), "Sci-Fi".into(), "Action".into()],
    }
}

#[async_trait]
impl MetadataLookup for FakeLookup {
    async fn search(&self, title: &str) -> Result<Vec<Candidate>, LookupError> {
        self.searches.lock().unwrap().push(title.to_string());
        Ok(self
            .catalogue
            .get(&title.to_lowercase())
            .map(|d| Candidate {
                id: d.id.clone(),
                title: d.title.clone(),
                year: None,
            })
            .into_iter()
            .collect())
    }

    async fn details(&self, id: &str) -> Result<TitleDetails, LookupError> {
        self.catalogue
            .values()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| LookupError::Service(format!("unknown id {id}")))
    }
}
