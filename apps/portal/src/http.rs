//! HTTP transport seam.
//!
//! Everything that talks to the job-portal API goes through `HttpTransport`.
//! `ReqwestTransport` is the production implementation; tests swap in an
//! in-memory fake.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Raw response: status plus the undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request was sent (or attempted) but no response arrived.
    #[error("No response from {url}: {reason}")]
    NoResponse { url: String, reason: String },

    /// The request could not be built, or its response could not be read.
    #[error("Request failed: {0}")]
    Request(String),
}

/// Injected HTTP client. Paths are relative to the transport's base URL.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<HttpResponse, TransportError>;
    async fn post(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError>;
    async fn put(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError>;
    async fn delete(&self, path: &str) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport bound to one base URL.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url(path);
        let request_id = Uuid::new_v4();

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        }
        .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%request_id, "{} {}", method.as_str(), url);

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::Request(e.to_string())
            } else {
                TransportError::NoResponse {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(format!("Failed to read response body: {e}")))?;

        debug!(%request_id, status, "{} {} completed", method.as_str(), url);

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse, TransportError> {
        self.send(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.send(Method::Post, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.send(Method::Put, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse, TransportError> {
        self.send(Method::Delete, path, None).await
    }
}
