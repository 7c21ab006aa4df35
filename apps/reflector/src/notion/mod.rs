/// Notion client — the only module that talks to the journal database.
///
/// Two calls: query the database for the most recently dated page, and patch a
/// page's `Reflection` property. `JournalStore` is the seam the run goes through,
/// so tests swap in an in-memory store.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

pub mod properties;

use properties::Page;

const NOTION_API_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
/// Property the query sorts on.
pub const DATE_PROPERTY: &str = "Date";
/// Property the generated text is written to.
pub const REFLECTION_PROPERTY: &str = "Reflection";

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    message: String,
}

/// Read and write access to the journal database.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// The single page with the most recent `Date`. `NotFound` when the database is empty.
    async fn latest_page(&self) -> Result<Page, NotionError>;

    /// Overwrites the page's `Reflection` property with `reflection`.
    async fn write_reflection(&self, page_id: &str, reflection: &str) -> Result<(), NotionError>;
}

/// Body of the database query: newest `Date` first, one row.
pub fn latest_entry_query() -> Value {
    json!({
        "sorts": [{ "property": DATE_PROPERTY, "direction": "descending" }],
        "page_size": 1
    })
}

/// Body of the page update: the reflection as a single rich-text segment.
pub fn reflection_patch(reflection: &str) -> Value {
    json!({
        "properties": {
            REFLECTION_PROPERTY: {
                "rich_text": [{ "text": { "content": reflection } }]
            }
        }
    })
}

#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    api_key: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(api_key: String, database_id: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            database_id,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, NotionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &body))
    }
}

/// Maps a non-2xx response to `NotionError::Api`, preferring Notion's `message`.
pub fn api_error(status: u16, body: &str) -> NotionError {
    let message = serde_json::from_str::<NotionErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string());
    NotionError::Api { status, message }
}

/// The first page of a query response body. An empty result set is `NotFound`.
pub fn first_page(body: &str) -> Result<Page, NotionError> {
    let query: QueryResponse = serde_json::from_str(body)?;

    debug!("Notion query returned {} result(s)", query.results.len());

    query
        .results
        .into_iter()
        .next()
        .ok_or_else(|| NotionError::NotFound("No echoes found".to_string()))
}

#[async_trait]
impl JournalStore for NotionClient {
    async fn latest_page(&self) -> Result<Page, NotionError> {
        let url = format!("{NOTION_API_URL}/databases/{}/query", self.database_id);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&latest_entry_query())
            .send()
            .await?;

        let body = Self::check(response).await?.text().await?;
        first_page(&body)
    }

    async fn write_reflection(&self, page_id: &str, reflection: &str) -> Result<(), NotionError> {
        let url = format!("{NOTION_API_URL}/pages/{page_id}");

        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&reflection_patch(reflection))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
