//! `reelsync-worker` library crate.
//!
//! Re-exports the worker's modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod dispatch;
pub mod enricher;
pub mod tag_sync;
