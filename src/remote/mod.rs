//! Reqwest-based client for the remote JF execution service.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// One execution request: the full program text, nothing else.
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest<'a> {
    pub code: &'a str,
}

/// Service reply. The backend sends `error: ""` on success, so an absent
/// field and an empty string both mean the program ran cleanly.
#[derive(Debug, Clone, Deserialize)]
pub struct RunReply {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: Option<String>,
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Transport-tier failures. A program that ran and failed is NOT one of
/// these; it comes back as a normal [`RunReply`] with `error` set.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("failed to reach the execution service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("execution service answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed reply from the execution service: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RunClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RunClient {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Self::new(cfg.endpoint(), Duration::from_secs(cfg.request_timeout()))
    }

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint: endpoint.into() })
    }

    /// POST the program and parse the reply.
    pub async fn execute(&self, code: &str) -> RemoteResult<RunReply> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        debug!("POST {} ({} bytes of source)", self.endpoint, code.len());
        let resp = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(&RunRequest { code })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(RemoteError::Status(resp.status()));
        }

        let bytes = resp.bytes().await?;
        let reply: RunReply = serde_json::from_slice(&bytes)?;
        debug!(
            "reply: {} output bytes, error={}",
            reply.output.len(),
            reply.error.as_deref().is_some_and(|e| !e.is_empty())
        );
        Ok(reply)
    }
}
