/// Opaque identifier of a row (a Notion page id).
pub type RowId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
