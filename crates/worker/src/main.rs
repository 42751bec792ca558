//! `reelsync-worker` -- watchlist enrichment daemon.
//!
//! Watches a Notion watchlist database and, for every row the user adds,
//! looks the typed title up in the film database and fills in the type,
//! detail link, genres, rating, icon and a plot paragraph.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default | Description                              |
//! |------------------------|----------|---------|------------------------------------------|
//! | `NOTION_TOKEN`         | yes      | --      | Notion integration token                 |
//! | `OMDB_API_KEY`         | yes      | --      | OMDb API key                             |
//! | `NOTION_DATABASE_URL`  | no       | watchlist | URL or id of the watched database      |
//! | `POLL_INTERVAL_SECS`   | no       | `2`     | Seconds between collection polls         |
//! | `ENRICH_DEBOUNCE_SECS` | no       | `20`    | Seconds to wait before reading a new row |
//! | `BACKFILL_ON_START`    | no       | `false` | Enrich pre-existing unenriched rows      |
//!
//! See [`WorkerConfig::from_env`] for the full list.

use std::sync::Arc;
use std::time::Duration;

use reelsync_imdb::OmdbApi;
use reelsync_notion::backoff::BackoffConfig;
use reelsync_notion::{CollectionWatcher, NotionApi, WatcherConfig};
use reelsync_worker::config::WorkerConfig;
use reelsync_worker::dispatch::{run_dispatch_loop, RowHandler};
use reelsync_worker::enricher::{EnricherConfig, RowEnricher};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long each background task gets to wind down after a shutdown signal.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "reelsync_worker=info,reelsync_notion=info,reelsync_imdb=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_thread_names(true))
        .init();

    let config = WorkerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        database_id = %config.database_id,
        poll_interval_secs = config.poll_interval.as_secs(),
        debounce_secs = config.debounce.as_secs(),
        backfill = config.backfill,
        "Starting reelsync-worker",
    );

    let notion = NotionApi::new(
        config.notion_token.clone(),
        config.database_id.clone(),
        config.properties.clone(),
    )
    .unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build Notion client");
        std::process::exit(1);
    });
    let omdb = OmdbApi::new(config.omdb_base_url.clone(), config.omdb_api_key.clone())
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build lookup client");
            std::process::exit(1);
        });

    let collection = Arc::new(notion);
    let enricher: Arc<dyn RowHandler> = Arc::new(RowEnricher::new(
        collection.clone(),
        Arc::new(omdb),
        EnricherConfig {
            debounce: config.debounce,
            detail_base_url: config.detail_base_url.clone(),
            properties: config.properties.clone(),
        },
    ));

    let cancel = CancellationToken::new();
    let watcher = CollectionWatcher::new(
        collection,
        WatcherConfig {
            poll_interval: config.poll_interval,
            backfill: config.backfill,
            backoff: BackoffConfig::default(),
        },
    );
    let (watcher_handle, batches) = watcher.spawn(cancel.clone());
    let dispatch_handle = tokio::spawn(run_dispatch_loop(batches, enricher, cancel.clone()));

    shutdown_signal().await;
    cancel.cancel();

    if tokio::time::timeout(SHUTDOWN_TIMEOUT, watcher_handle)
        .await
        .is_err()
    {
        tracing::warn!("Collection watcher did not stop in time");
    }
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, dispatch_handle)
        .await
        .is_err()
    {
        tracing::warn!("Abandoning in-flight enrichment");
    }

    tracing::info!("Shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
