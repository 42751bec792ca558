//! Free-text title → [`MovieRecord`].

use std::sync::Arc;

use reelsync_core::movie::{dedup_genres, MovieKind, MovieRecord};

use crate::lookup::{LookupError, MetadataLookup};

/// Errors from [`MetadataFetcher::fetch`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The search produced no candidates.
    #[error("No match found for title {title:?}")]
    NotFound { title: String },

    /// The service could not be reached or answered with an error.
    #[error("Lookup unavailable: {0}")]
    Unavailable(#[from] LookupError),
}

/// Resolves titles through a [`MetadataLookup`] backend.
pub struct MetadataFetcher {
    lookup: Arc<dyn MetadataLookup>,
}

impl MetadataFetcher {
    pub fn new(lookup: Arc<dyn MetadataLookup>) -> Self {
        Self { lookup }
    }

    /// Look up `title` and return the record of its first candidate.
    ///
    /// No ranking is applied beyond the service's own order.
    pub async fn fetch(&self, title: &str) -> Result<MovieRecord, FetchError> {
        tracing::info!(title, "Searching film database");

        let candidates = self.lookup.search(title).await?;
        let first = candidates.into_iter().next().ok_or_else(|| FetchError::NotFound {
            title: title.to_string(),
        })?;

        let details = self.lookup.details(&first.id).await?;

        tracing::debug!(
            title,
            external_id = %first.id,
            kind = %details.kind,
            "Fetched film record",
        );

        Ok(MovieRecord {
            kind: MovieKind::from_service_kind(&details.kind),
            // Keep the id the search returned, not whatever the detail
            // endpoint echoes back.
            external_id: first.id,
            title: details.title,
            plot: details.plot,
            rating: details.rating,
            genres: dedup_genres(details.genres),
        })
    }
}
