//! The collection operations the worker relies on.

use async_trait::async_trait;
use reelsync_core::row::{PropertyValue, Row};
use reelsync_core::tags::TagSchema;

/// Errors from a collection backend.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Notion returned a non-2xx status code.
    #[error("Notion API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// No row exists with the given id.
    #[error("Row {0} not found")]
    RowNotFound(String),
}

/// A watched collection of rows sharing one tag schema.
#[async_trait]
pub trait CollectionClient: Send + Sync {
    /// All rows, in the collection's default order.
    async fn list_rows(&self) -> Result<Vec<Row>, NotionError>;

    async fn get_row(&self, row_id: &str) -> Result<Row, NotionError>;

    async fn set_property(
        &self,
        row_id: &str,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), NotionError>;

    async fn set_icon(&self, row_id: &str, icon: &str) -> Result<(), NotionError>;

    /// Append a text block after the row's existing content.
    async fn append_text_block(&self, row_id: &str, text: &str) -> Result<(), NotionError>;

    async fn get_schema(&self) -> Result<TagSchema, NotionError>;

    /// Replace the option lists of the schema's categorical properties.
    async fn set_schema(&self, schema: &TagSchema) -> Result<(), NotionError>;
}
