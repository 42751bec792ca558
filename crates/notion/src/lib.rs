//! Notion collection client and change watcher.
//!
//! Provides the [`CollectionClient`] trait the worker writes through,
//! a REST implementation ([`NotionApi`]), and a [`CollectionWatcher`]
//! that polls the collection and emits row-level change batches.

pub mod api;
pub mod backoff;
pub mod client;
pub mod convert;
pub mod watcher;

pub use api::NotionApi;
pub use client::{CollectionClient, NotionError};
pub use watcher::{CollectionWatcher, WatcherConfig};
