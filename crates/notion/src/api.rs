//! REST client for the Notion HTTP API.
//!
//! Wraps the page, block and database endpoints used by the worker with
//! [`reqwest`], authenticating with an integration token.

use std::time::Duration;

use async_trait::async_trait;
use reelsync_core::row::{PropertyNames, PropertyValue, Row};
use reelsync_core::tags::TagSchema;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use crate::client::{CollectionClient, NotionError};
use crate::convert::{
    decode, icon_update_body, paragraph_body, property_update_body, row_from_page,
    schema_from_database, schema_update_body, DatabaseObject, PageObject, QueryResponse,
};

/// Public Notion API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Largest page size the query endpoint accepts.
const QUERY_PAGE_SIZE: u32 = 100;

/// HTTP timeout for a single request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one Notion database.
pub struct NotionApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
    names: PropertyNames,
}

impl NotionApi {
    /// Create a client for `database_id` against [`DEFAULT_BASE_URL`].
    pub fn new(
        token: String,
        database_id: String,
        names: PropertyNames,
    ) -> Result<Self, NotionError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(
            client,
            DEFAULT_BASE_URL.to_string(),
            token,
            database_id,
            names,
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`] and base URL.
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        token: String,
        database_id: String,
        names: PropertyNames,
    ) -> Self {
        Self {
            client,
            base_url,
            token,
            database_id,
            names,
        }
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    // ---- private helpers ----

    /// Send an authenticated request and return the decoded JSON body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, NotionError> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url.trim_end_matches('/'), path))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(NotionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Value>().await?)
    }

    /// PATCH a page, mapping 404 to [`NotionError::RowNotFound`].
    async fn patch_page(&self, row_id: &str, body: &Value) -> Result<(), NotionError> {
        self.send(Method::PATCH, &format!("/pages/{row_id}"), Some(body))
            .await
            .map_err(|e| not_found_as_row(e, row_id))?;
        Ok(())
    }
}

#[async_trait]
impl CollectionClient for NotionApi {
    async fn list_rows(&self) -> Result<Vec<Row>, NotionError> {
        let path = format!("/databases/{}/query", self.database_id);
        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "page_size": QUERY_PAGE_SIZE });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let page: QueryResponse = decode(self.send(Method::POST, &path, Some(&body)).await?)?;
            rows.extend(
                page.results
                    .into_iter()
                    .map(|p| row_from_page(p, &self.names.detail_url)),
            );

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::trace!(count = rows.len(), "Listed collection rows");
        Ok(rows)
    }

    async fn get_row(&self, row_id: &str) -> Result<Row, NotionError> {
        let body = self
            .send(Method::GET, &format!("/pages/{row_id}"), None)
            .await
            .map_err(|e| not_found_as_row(e, row_id))?;
        let page: PageObject = decode(body)?;
        Ok(row_from_page(page, &self.names.detail_url))
    }

    async fn set_property(
        &self,
        row_id: &str,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), NotionError> {
        self.patch_page(row_id, &property_update_body(name, value)).await
    }

    async fn set_icon(&self, row_id: &str, icon: &str) -> Result<(), NotionError> {
        self.patch_page(row_id, &icon_update_body(icon)).await
    }

    async fn append_text_block(&self, row_id: &str, text: &str) -> Result<(), NotionError> {
        self.send(
            Method::PATCH,
            &format!("/blocks/{row_id}/children"),
            Some(&paragraph_body(text)),
        )
        .await
        .map_err(|e| not_found_as_row(e, row_id))?;
        Ok(())
    }

    async fn get_schema(&self) -> Result<TagSchema, NotionError> {
        let body = self
            .send(Method::GET, &format!("/databases/{}", self.database_id), None)
            .await?;
        let database: DatabaseObject = decode(body)?;
        Ok(schema_from_database(database))
    }

    async fn set_schema(&self, schema: &TagSchema) -> Result<(), NotionError> {
        self.send(
            Method::PATCH,
            &format!("/databases/{}", self.database_id),
            Some(&schema_update_body(schema)),
        )
        .await?;
        Ok(())
    }
}

fn not_found_as_row(error: NotionError, row_id: &str) -> NotionError {
    match error {
        NotionError::Api { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            NotionError::RowNotFound(row_id.to_string())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn new_builds_client() {
        let api = NotionApi::new("secret".into(), "db".into(), PropertyNames::default()).unwrap();
        assert_eq!(api.database_id(), "db");
    }

    #[test]
    fn api_404_becomes_row_not_found() {
        let err = NotionError::Api {
            status: 404,
            body: "{}".into(),
        };
        assert_matches!(not_found_as_row(err, "r1"), NotionError::RowNotFound(id) if id == "r1");
    }

    #[test]
    fn other_errors_pass_through() {
        let err = NotionError::Api {
            status: 429,
            body: "slow down".into(),
        };
        assert_matches!(
            not_found_as_row(err, "r1"),
            NotionError::Api { status: 429, .. }
        );
    }

    #[test]
    fn api_error_display() {
        let err = NotionError::Api {
            status: 401,
            body: "unauthorized".into(),
        };
        assert_eq!(err.to_string(), "Notion API error (401): unauthorized");
    }
}
