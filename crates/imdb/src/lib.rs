//! Film database lookups.
//!
//! [`MetadataLookup`] is the seam the worker depends on; [`OmdbApi`] is
//! the HTTP implementation and [`MetadataFetcher`] turns a free-text
//! title into a normalized [`MovieRecord`](reelsync_core::movie::MovieRecord).

pub mod api;
pub mod fetcher;
pub mod lookup;

pub use api::OmdbApi;
pub use fetcher::{FetchError, MetadataFetcher};
pub use lookup::{Candidate, LookupError, MetadataLookup, TitleDetails};
