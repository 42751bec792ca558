//! Populates a freshly added row with film metadata.
//!
//! [`RowEnricher::enrich`] runs once per new row: wait out the debounce,
//! re-read the title, look it up, then write the type, detail link,
//! genres, rating, icon and a plot paragraph back into the row. Nothing
//! is retried; a failed row stays as the user left it.

use std::sync::Arc;
use std::time::Duration;

use reelsync_core::emoji::select_emoji;
use reelsync_core::links::detail_url;
use reelsync_core::movie::MovieRecord;
use reelsync_core::row::{PropertyNames, PropertyValue};
use reelsync_imdb::{FetchError, MetadataFetcher, MetadataLookup};
use reelsync_notion::{CollectionClient, NotionError};

use crate::tag_sync::TagSynchronizer;

/// Tunables for [`RowEnricher`].
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Delay between noticing a row and reading its title.
    pub debounce: Duration,
    pub detail_base_url: String,
    pub properties: PropertyNames,
}

/// What happened to a row.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichOutcome {
    /// Metadata was written.
    Enriched { title: String, external_id: String },
    /// The title was still blank after the debounce.
    Abandoned,
}

/// Errors that abort enrichment of a row.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("Lookup for {title:?} failed: {source}")]
    Fetch {
        title: String,
        #[source]
        source: FetchError,
    },

    #[error("Collection update failed: {0}")]
    Collection(#[from] NotionError),
}

/// Orchestrates lookup, icon choice, tag sync and row writes.
pub struct RowEnricher {
    client: Arc<dyn CollectionClient>,
    fetcher: MetadataFetcher,
    tags: TagSynchronizer,
    config: EnricherConfig,
}

impl RowEnricher {
    pub fn new(
        client: Arc<dyn CollectionClient>,
        lookup: Arc<dyn MetadataLookup>,
        config: EnricherConfig,
    ) -> Self {
        Self {
            tags: TagSynchronizer::new(Arc::clone(&client)),
            fetcher: MetadataFetcher::new(lookup),
            client,
            config,
        }
    }

    /// Enrich the row `row_id`.
    pub async fn enrich(&self, row_id: &str) -> Result<EnrichOutcome, EnrichError> {
        let row = self.client.get_row(row_id).await?;
        tracing::debug!(
            row_id,
            created = %row.created,
            debounce_ms = self.config.debounce.as_millis() as u64,
            "Waiting for title entry to settle",
        );

        tokio::time::sleep(self.config.debounce).await;

        let row = self.client.get_row(row_id).await?;
        if !row.has_title() {
            tracing::info!(row_id, "Row still has no title, skipping");
            return Ok(EnrichOutcome::Abandoned);
        }
        let typed_title = row.title.trim().to_string();

        let record = self
            .fetcher
            .fetch(&typed_title)
            .await
            .map_err(|source| EnrichError::Fetch {
                title: typed_title.clone(),
                source,
            })?;

        let icon = select_emoji(&record.title);

        if !record.genres.is_empty() {
            if let Err(e) = self
                .tags
                .ensure_tags(&self.config.properties.genre, &record.genres)
                .await
            {
                tracing::warn!(
                    row_id,
                    title = %typed_title,
                    error = %e,
                    "Genre tag sync failed, continuing",
                );
            }
        }

        self.write_record(row_id, &record, icon).await?;

        tracing::info!(
            row_id,
            typed_title = %typed_title,
            title = %record.title,
            external_id = %record.external_id,
            "Row enriched",
        );

        Ok(EnrichOutcome::Enriched {
            title: record.title,
            external_id: record.external_id,
        })
    }

    /// Write every field of `record` into the row.
    async fn write_record(
        &self,
        row_id: &str,
        record: &MovieRecord,
        icon: &str,
    ) -> Result<(), NotionError> {
        let names = &self.config.properties;

        self.client
            .set_property(row_id, &names.title, &PropertyValue::Title(record.title.clone()))
            .await?;

        if let Some(kind) = record.kind {
            self.client
                .set_property(row_id, &names.kind, &PropertyValue::Select(kind.label().into()))
                .await?;
        }

        let url = detail_url(&self.config.detail_base_url, &record.external_id);
        self.client
            .set_property(row_id, &names.detail_url, &PropertyValue::Url(url))
            .await?;

        self.client.set_icon(row_id, icon).await?;

        if !record.genres.is_empty() {
            self.client
                .set_property(
                    row_id,
                    &names.genre,
                    &PropertyValue::MultiSelect(record.genres.clone()),
                )
                .await?;
        }

        if let Some(rating) = record.rating {
            self.client
                .set_property(row_id, &names.rating, &PropertyValue::Number(rating))
                .await?;
        }

        match record.plot_summary() {
            Some(summary) => self.client.append_text_block(row_id, summary).await?,
            None => tracing::debug!(row_id, "No plot to append"),
        }

        Ok(())
    }
}
