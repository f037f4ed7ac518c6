//! HTTP client for a running linepool server.
//!
//! A thin, stateless caller: uploads files to `/load`, draws lines from
//! `/sample`, and clears the pool via `/reset`. Server-side 400s surface as
//! [`ClientError::Rejected`] carrying the server's `detail` string.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::server::{ErrorBody, LoadResponse, SampleResponse};

/// Errors from [`PoolClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, bad body).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Local file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The server rejected the request; the string is its `detail` message.
    #[error("server rejected request: {0}")]
    Rejected(String),
}

/// Client for the three pool endpoints.
#[derive(Debug, Clone)]
pub struct PoolClient {
    http: reqwest::Client,
    base_url: String,
}

impl PoolClient {
    /// Create a client for the server at `base_url`
    /// (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Upload the file at `path` to `/load`; returns the number of lines read.
    pub async fn load(&self, path: &Path) -> Result<usize, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.txt".to_string());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        let resp = self
            .http
            .post(format!("{}/load", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let body: LoadResponse = resp.json().await?;
        Ok(body.lines_read)
    }

    /// Draw `n` lines from `/sample`.
    pub async fn sample(&self, n: i64) -> Result<Vec<String>, ClientError> {
        let resp = self
            .http
            .post(format!("{}/sample", self.base_url))
            .query(&[("n", n)])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let body: SampleResponse = resp.json().await?;
        Ok(body.sampled_lines)
    }

    /// Clear the server's pool via `/reset`.
    pub async fn reset(&self) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(format!("{}/reset", self.base_url))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let detail = match resp.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => status.to_string(),
        };
        Err(ClientError::Rejected(detail))
    }
}
