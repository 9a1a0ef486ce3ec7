// Webhook client: a small blocking HTTP client that talks to the two n8n
// workflows (upload and search). One call per operation, no retries; the
// per-request timeout is the only cancellation.

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::{FileRecord, SearchRequest, SearchResponse, SearchResult, UploadRequest, UploadResult};
use crate::search::{filter_results, format_query};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Holds a reqwest blocking client plus the endpoints and limits taken from
/// `Config` at construction time.
#[derive(Clone, Debug)]
pub struct WebhookClient {
    client: Client,
    upload_url: String,
    search_url: String,
    upload_timeout: Duration,
    search_timeout: Duration,
    chunk_size: u32,
    chunk_overlap: u32,
}

impl WebhookClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pinecone-hook/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(WebhookClient {
            client,
            upload_url: config.upload_url.clone(),
            search_url: config.search_url.clone(),
            upload_timeout: config.upload_timeout,
            search_timeout: config.search_timeout,
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        })
    }

    /// Point searches at a different webhook (the CLI's `--url`).
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Build the batch request for `files`; chunking parameters come from
    /// the configuration the client was created with.
    pub fn upload_request(&self, files: Vec<FileRecord>, namespace: &str) -> UploadRequest {
        UploadRequest {
            files,
            namespace: namespace.to_string(),
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
        }
    }

    /// Send every file in a single POST and return the workflow's report.
    pub fn upload(&self, files: Vec<FileRecord>, namespace: &str) -> Result<UploadResult> {
        let request = self.upload_request(files, namespace);
        let bytes: usize = request.files.iter().map(|f| f.text.len()).sum();
        debug!(
            url = %self.upload_url,
            files = request.files.len(),
            bytes,
            namespace,
            "uploading batch"
        );
        self.post_json(&self.upload_url, &request, self.upload_timeout)
    }

    /// Run a search and apply the score filter and `top_k` cap locally.
    pub fn search(
        &self,
        query: &str,
        namespace: &str,
        top_k: usize,
        min_score: f64,
    ) -> Result<Vec<SearchResult>> {
        let request = SearchRequest {
            query: format_query(query),
            namespace: namespace.to_string(),
            top_k,
            min_score,
        };
        debug!(url = %self.search_url, namespace, top_k, min_score, "searching");

        let response: Option<SearchResponse> =
            self.post_json(&self.search_url, &request, self.search_timeout)?;
        let raw = response.map(SearchResponse::into_results).unwrap_or_default();
        let received = raw.len();
        let results = filter_results(raw, min_score, top_k);
        debug!(received, kept = results.len(), "filtered search results");
        Ok(results)
    }

    fn post_json<B, R>(&self, url: &str, body: &B, timeout: Duration) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body)
            .timeout(timeout)
            .send()?;

        let status = res.status();
        debug!(%status, url, "webhook responded");
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let text = res.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}
