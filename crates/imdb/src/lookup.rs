//! Client-side contract of the film database.

use async_trait::async_trait;

/// A search hit, before its full record has been fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
}

/// Full record for one title, as reported by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDetails {
    pub id: String,
    /// Service kind string: `movie`, `tv series`, `tv mini series`, ...
    pub kind: String,
    pub title: String,
    pub plot: Vec<String>,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
}

/// Errors from a lookup backend.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Lookup API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The service answered but reported a failure.
    #[error("Lookup service error: {0}")]
    Service(String),
}

/// Title search and record retrieval.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Candidates for a free-text title, best match first.
    async fn search(&self, title: &str) -> Result<Vec<Candidate>, LookupError>;

    /// Full record for a candidate id.
    async fn details(&self, id: &str) -> Result<TitleDetails, LookupError>;
}
