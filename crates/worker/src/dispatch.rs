//! Feeds `row_added` change events to the enrichment handler.
//!
//! Batches are handled strictly one after another and, within a batch,
//! one row at a time: the handler (debounce included) runs to completion
//! before the next event is looked at.

use std::sync::Arc;

use async_trait::async_trait;
use reelsync_core::change::{ChangeAction, ChangeBatch, ChangeEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::enricher::{EnrichOutcome, RowEnricher};

/// Receiver of newly added rows.
#[async_trait]
pub trait RowHandler: Send + Sync {
    /// Process one new row. Failures are reported by the handler itself.
    async fn handle_new_row(&self, row_id: &str);
}

#[async_trait]
impl RowHandler for RowEnricher {
    async fn handle_new_row(&self, row_id: &str) {
        match self.enrich(row_id).await {
            Ok(EnrichOutcome::Enriched { .. }) => {}
            Ok(EnrichOutcome::Abandoned) => {
                tracing::debug!(row_id, "Row abandoned");
            }
            Err(e) => {
                tracing::error!(row_id, error = %e, "Row enrichment failed");
            }
        }
    }
}

/// Run `handler` for every `row_added` event of `batch`, in order.
///
/// Returns the number of rows handed to the handler.
pub async fn dispatch_batch(handler: &dyn RowHandler, batch: &[ChangeEvent]) -> usize {
    let mut handled = 0;
    for event in batch {
        if event.action != ChangeAction::RowAdded {
            tracing::trace!(action = %event.action, row_id = %event.row_id, "Ignoring change");
            continue;
        }
        tracing::info!(row_id = %event.row_id, "New row detected");
        handler.handle_new_row(&event.row_id).await;
        handled += 1;
    }
    handled
}

/// Consume change batches until `cancel` fires or the sender is dropped.
///
/// Cancellation is only observed between batches.
pub async fn run_dispatch_loop(
    mut batches: mpsc::Receiver<ChangeBatch>,
    handler: Arc<dyn RowHandler>,
    cancel: CancellationToken,
) {
    loop {
        // Cancellation wins over a batch that is already queued.
        let batch = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            batch = batches.recv() => match batch {
                Some(batch) => batch,
                None => {
                    tracing::info!("Change stream closed");
                    break;
                }
            },
        };

        dispatch_batch(handler.as_ref(), &batch).await;
    }
    tracing::info!("Dispatch loop stopped");
}
