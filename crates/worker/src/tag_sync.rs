//! Keeps categorical options (genres) present in the collection schema.
//!
//! Every call is a read-modify-write of the whole schema with no
//! concurrency guard: an edit made to the schema by someone else between
//! the read and the write is lost.

use std::sync::Arc;

use rand::seq::IndexedRandom;
use reelsync_core::error::SchemaError;
use reelsync_core::tags::{TagOption, TAG_PALETTE};
use reelsync_notion::{CollectionClient, NotionError};

/// Errors from [`TagSynchronizer`].
#[derive(Debug, thiserror::Error)]
pub enum TagSyncError {
    /// The property is missing or not categorical.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Reading or writing the schema failed.
    #[error("Schema update failed: {0}")]
    Collection(#[from] NotionError),
}

/// Adds missing options to categorical properties.
pub struct TagSynchronizer {
    client: Arc<dyn CollectionClient>,
}

impl TagSynchronizer {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        Self { client }
    }

    /// Make sure `value` is an option of `property`.
    ///
    /// Returns `true` when the option was added, `false` when it already
    /// existed (in which case nothing is written).
    pub async fn ensure_tag(&self, property: &str, value: &str) -> Result<bool, TagSyncError> {
        let mut schema = self.client.get_schema().await?;

        let option = TagOption {
            color: random_color().to_string(),
            // Local placeholder only: options are written back by name and
            // colour, and Notion assigns the stored id.
            id: uuid::Uuid::new_v4().to_string(),
            value: value.to_string(),
        };
        if !schema.insert_option(property, option)? {
            return Ok(false);
        }

        self.client.set_schema(&schema).await?;
        Ok(true)
    }

    /// [`ensure_tag`](Self::ensure_tag) for each value, in order.
    ///
    /// Stops at the first failure. Returns how many options were added.
    pub async fn ensure_tags(
        &self,
        property: &str,
        values: &[String],
    ) -> Result<usize, TagSyncError> {
        let mut added = 0;
        for value in values {
            if self.ensure_tag(property, value).await? {
                tracing::info!(property, value = %value, "Added tag option");
                added += 1;
            }
        }
        Ok(added)
    }
}

fn random_color() -> &'static str {
    TAG_PALETTE
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(TAG_PALETTE[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_color_is_from_palette() {
        for _ in 0..50 {
            assert!(TAG_PALETTE.contains(&random_color()));
        }
    }
}
