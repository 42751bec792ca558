//! Change notifications delivered by the collection watcher.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::RowId;

/// Field name carried by row membership changes.
pub const FIELD_ROWS: &str = "rows";

/// What happened to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    RowAdded,
    RowDeleted,
}

impl ChangeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RowAdded => "row_added",
            Self::RowDeleted => "row_deleted",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(action, field, row id)` change tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub action: ChangeAction,
    pub field: String,
    pub row_id: RowId,
}

impl ChangeEvent {
    pub fn row_added(row_id: impl Into<RowId>) -> Self {
        Self {
            action: ChangeAction::RowAdded,
            field: FIELD_ROWS.into(),
            row_id: row_id.into(),
        }
    }

    pub fn row_deleted(row_id: impl Into<RowId>) -> Self {
        Self {
            action: ChangeAction::RowDeleted,
            field: FIELD_ROWS.into(),
            row_id: row_id.into(),
        }
    }
}

/// Changes observed by a single poll, in delivery order.
pub type ChangeBatch = Vec<ChangeEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_rows_field() {
        let added = ChangeEvent::row_added("R1");
        assert_eq!(added.action, ChangeAction::RowAdded);
        assert_eq!(added.field, FIELD_ROWS);
        assert_eq!(added.row_id, "R1");

        assert_eq!(ChangeEvent::row_deleted("R2").action, ChangeAction::RowDeleted);
    }

    #[test]
    fn action_wire_names() {
        assert_eq!(ChangeAction::RowAdded.to_string(), "row_added");
        let json = serde_json::to_string(&ChangeAction::RowDeleted).unwrap();
        assert_eq!(json, "\"row_deleted\"");
    }
}
