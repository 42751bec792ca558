//! REST client for the OMDb API.
//!
//! OMDb serves IMDb data keyed by IMDb ids (`tt...`). Searches go to
//! `GET /?s=<title>` and full records to `GET /?i=<id>&plot=full`.
//! Responses carry a `"Response": "True" | "False"` flag; a `"False"`
//! search with `"Movie not found!"` is an empty result, not an error.
//! Titles too short for a search (`"Too many results."`) are retried as
//! an exact-title lookup (`GET /?t=<title>`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::lookup::{Candidate, LookupError, MetadataLookup, TitleDetails};

/// Public OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

/// HTTP timeout for a single lookup request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Placeholder OMDb uses for missing fields.
const NOT_AVAILABLE: &str = "N/A";

/// Error text OMDb returns for searches without hits.
const NOT_FOUND_ERROR: &str = "Movie not found!";

/// Error text OMDb returns when a search term matches too broadly.
const TOO_MANY_RESULTS_ERROR: &str = "Too many results.";

/// HTTP client for OMDb.
pub struct OmdbApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Body of a `?s=` search.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchHit>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// One entry of [`SearchResponse::search`].
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

/// Body of an `?i=` or `?t=` lookup.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating")]
    pub rating: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
}

impl OmdbApi {
    /// Create a client for `base_url` (usually [`DEFAULT_BASE_URL`]).
    pub fn new(base_url: String, api_key: String) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    // ---- private helpers ----

    /// Send a `GET /` with the given query plus the API key and decode
    /// the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url.trim_end_matches('/')))
            .query(query)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MetadataLookup for OmdbApi {
    async fn search(&self, title: &str) -> Result<Vec<Candidate>, LookupError> {
        tracing::debug!(title, "Searching OMDb");
        let body: SearchResponse = self.get(&[("s", title)]).await?;
        if is_too_broad(&body) {
            tracing::debug!(title, "Search too broad, trying exact title");
            let exact: DetailsResponse = self.get(&[("t", title)]).await?;
            return parse_exact(exact);
        }
        parse_search(body)
    }

    async fn details(&self, id: &str) -> Result<TitleDetails, LookupError> {
        tracing::debug!(id, "Fetching OMDb record");
        let body: DetailsResponse = self.get(&[("i", id), ("plot", "full")]).await?;
        parse_details(body)
    }
}

/// Convert a search body into candidates, keeping service order.
pub fn parse_search(body: SearchResponse) -> Result<Vec<Candidate>, LookupError> {
    if !is_true(&body.response) {
        return match body.error.as_deref() {
            Some(NOT_FOUND_ERROR) => Ok(Vec::new()),
            Some(error) => Err(LookupError::Service(error.to_string())),
            None => Err(LookupError::Service("search failed".to_string())),
        };
    }

    Ok(body
        .search
        .into_iter()
        .map(|hit| Candidate {
            id: hit.imdb_id,
            title: hit.title,
            year: hit.year.filter(|y| y != NOT_AVAILABLE),
        })
        .collect())
}

/// True when OMDb refused the search because the term is too short.
pub fn is_too_broad(body: &SearchResponse) -> bool {
    !is_true(&body.response) && body.error.as_deref() == Some(TOO_MANY_RESULTS_ERROR)
}

/// Convert an exact-title lookup into at most one candidate.
pub fn parse_exact(body: DetailsResponse) -> Result<Vec<Candidate>, LookupError> {
    if !is_true(&body.response) && body.error.as_deref() == Some(NOT_FOUND_ERROR) {
        return Ok(Vec::new());
    }
    let year = available(body.year.clone());
    let details = parse_details(body)?;
    Ok(vec![Candidate {
        id: details.id,
        title: details.title,
        year,
    }])
}

/// Convert a details body into a [`TitleDetails`].
pub fn parse_details(body: DetailsResponse) -> Result<TitleDetails, LookupError> {
    if !is_true(&body.response) {
        let error = body.error.unwrap_or_else(|| "lookup failed".to_string());
        return Err(LookupError::Service(error));
    }

    let id = available(body.imdb_id)
        .ok_or_else(|| LookupError::Service("record without imdbID".to_string()))?;

    Ok(TitleDetails {
        id,
        kind: service_kind(available(body.kind).as_deref().unwrap_or_default()),
        title: available(body.title).unwrap_or_default(),
        plot: available(body.plot).into_iter().collect(),
        rating: available(body.rating).and_then(|r| r.parse().ok()),
        genres: available(body.genre)
            .map(|g| {
                g.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
    })
}

/// Translate OMDb's `Type` field into the film database's kind names.
fn service_kind(omdb_type: &str) -> String {
    match omdb_type {
        "series" => "tv series".to_string(),
        other => other.to_string(),
    }
}

fn is_true(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

/// Drop empty and `"N/A"` values.
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}
