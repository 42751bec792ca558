//! Domain types and pure logic shared by the reelsync crates.
//!
//! Nothing in here performs I/O: the collection and metadata clients
//! live in `reelsync-notion` and `reelsync-imdb`, and the orchestration
//! lives in `reelsync-worker`.

pub mod change;
pub mod emoji;
pub mod error;
pub mod links;
pub mod movie;
pub mod row;
pub mod tags;
pub mod types;
