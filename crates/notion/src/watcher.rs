//! Polling change detector for a collection.
//!
//! The Notion API has no push channel, so [`CollectionWatcher`] lists the
//! collection on a fixed interval, diffs the row ids against the previous
//! listing, and sends every non-empty [`ChangeBatch`] down an mpsc
//! channel. The first listing only seeds the known set, unless backfill
//! is enabled, in which case rows that were never enriched are reported
//! as added.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use reelsync_core::change::{ChangeBatch, ChangeEvent};
use reelsync_core::row::Row;
use reelsync_core::types::RowId;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::backoff::{BackoffConfig, PollBackoff};
use crate::client::CollectionClient;

/// Channel capacity for change batches awaiting dispatch.
pub const BATCH_CHANNEL_CAPACITY: usize = 64;

/// Polling behaviour of a [`CollectionWatcher`].
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Pause between successful polls.
    pub poll_interval: Duration,
    /// Report pre-existing rows without a detail URL on the first poll.
    pub backfill: bool,
    pub backoff: BackoffConfig,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            backfill: false,
            backoff: BackoffConfig::default(),
        }
    }
}

/// Watches one collection for added and deleted rows.
pub struct CollectionWatcher {
    client: Arc<dyn CollectionClient>,
    config: WatcherConfig,
}

impl CollectionWatcher {
    pub fn new(client: Arc<dyn CollectionClient>, config: WatcherConfig) -> Self {
        Self { client, config }
    }

    /// Spawn the polling loop and return its handle and the batch receiver.
    pub fn spawn(
        self,
        cancel: CancellationToken,
    ) -> (tokio::task::JoinHandle<()>, mpsc::Receiver<ChangeBatch>) {
        let (tx, rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);
        let handle = tokio::spawn(async move {
            tracing::info!(
                poll_interval_ms = self.config.poll_interval.as_millis() as u64,
                backfill = self.config.backfill,
                "Collection watcher started",
            );
            self.run(tx, cancel).await;
            tracing::info!("Collection watcher stopped");
        });
        (handle, rx)
    }

    /// Poll until `cancel` fires or the receiving side is dropped.
    pub async fn run(&self, tx: mpsc::Sender<ChangeBatch>, cancel: CancellationToken) {
        let mut known: Option<HashSet<RowId>> = None;
        let mut backoff = PollBackoff::new(self.config.backoff.clone());

        loop {
            let listing = tokio::select! {
                _ = cancel.cancelled() => return,
                result = self.client.list_rows() => result,
            };

            let wait = match listing {
                Ok(rows) => {
                    backoff.on_success();
                    let batch = match &known {
                        None => seed_batch(&rows, self.config.backfill),
                        Some(previous) => diff_rows(previous, &rows),
                    };
                    known = Some(rows.into_iter().map(|r| r.id).collect());

                    if !batch.is_empty() {
                        tracing::debug!(changes = batch.len(), "Collection changed");
                        tokio::select! {
                            _ = cancel.cancelled() => return,
                            sent = tx.send(batch) => {
                                if sent.is_err() {
                                    tracing::info!("Change receiver dropped, stopping watcher");
                                    return;
                                }
                            }
                        }
                    }
                    self.config.poll_interval
                }
                Err(e) => {
                    let wait = backoff.on_failure();
                    tracing::warn!(
                        error = %e,
                        failures = backoff.failures(),
                        retry_in_ms = wait.as_millis() as u64,
                        "Failed to poll collection",
                    );
                    wait
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }
}

/// Changes between the previously known ids and a fresh listing.
///
/// Additions come first in listing order, then deletions sorted by id.
pub fn diff_rows(known: &HashSet<RowId>, current: &[Row]) -> ChangeBatch {
    let mut batch: ChangeBatch = current
        .iter()
        .filter(|row| !known.contains(&row.id))
        .map(|row| ChangeEvent::row_added(row.id.clone()))
        .collect();

    let current_ids: HashSet<&str> = current.iter().map(|r| r.id.as_str()).collect();
    let mut deleted: Vec<&RowId> = known
        .iter()
        .filter(|id| !current_ids.contains(id.as_str()))
        .collect();
    deleted.sort();
    batch.extend(deleted.into_iter().map(|id| ChangeEvent::row_deleted(id.clone())));

    batch
}

/// Changes reported for the very first listing.
pub fn seed_batch(rows: &[Row], backfill: bool) -> ChangeBatch {
    if !backfill {
        return ChangeBatch::new();
    }
    rows.iter()
        .filter(|row| !row.is_enriched())
        .map(|row| ChangeEvent::row_added(row.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use reelsync_core::change::ChangeAction;

    use super::*;

    fn row(id: &str, detail_url: Option<&str>) -> Row {
        Row {
            id: id.into(),
            title: format!("Title {id}"),
            created: chrono::Utc::now(),
            detail_url: detail_url.map(String::from),
        }
    }

    fn known(ids: &[&str]) -> HashSet<RowId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unchanged_listing_yields_nothing() {
        let rows = vec![row("a", None), row("b", None)];
        assert!(diff_rows(&known(&["a", "b"]), &rows).is_empty());
    }

    #[test]
    fn additions_keep_listing_order() {
        let rows = vec![row("z", None), row("a", None), row("m", None)];
        let batch = diff_rows(&known(&["a"]), &rows);
        assert_eq!(
            batch,
            vec![ChangeEvent::row_added("z"), ChangeEvent::row_added("m")]
        );
    }

    #[test]
    fn deletions_follow_additions() {
        let rows = vec![row("new", None)];
        let batch = diff_rows(&known(&["old2", "old1"]), &rows);
        let actions: Vec<_> = batch.iter().map(|e| (e.action, e.row_id.as_str())).collect();
        assert_eq!(
            actions,
            vec![
                (ChangeAction::RowAdded, "new"),
                (ChangeAction::RowDeleted, "old1"),
                (ChangeAction::RowDeleted, "old2"),
            ]
        );
    }

    #[test]
    fn seed_without_backfill_is_silent() {
        let rows = vec![row("a", None)];
        assert!(seed_batch(&rows, false).is_empty());
    }

    #[test]
    fn seed_with_backfill_reports_unenriched_rows() {
        let rows = vec![
            row("a", Some("https://www.imdb.com/title/tt1")),
            row("b", None),
            row("c", Some("")),
        ];
        assert_eq!(
            seed_batch(&rows, true),
            vec![ChangeEvent::row_added("b"), ChangeEvent::row_added("c")]
        );
    }
}
