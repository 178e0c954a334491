//! Typed client for the job-portal API.
//!
//! One method per (resource, verb) pair, split by resource across the
//! submodules. Every failure comes back as a normalized [`ApiError`].

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::errors::ApiError;
use crate::http::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};

pub mod companies;
pub mod employees;
pub mod jobs;
pub mod reviews;

/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Client over `reqwest` pointed at the configured base URL.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.api_base_url.clone())?;
        Ok(Self::new(Arc::new(transport)))
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.transport.get(path).await?;
        decode(path, ensure_success(response)?)
    }

    async fn post_json<T, R>(&self, path: &str, payload: &T) -> Result<R, ApiError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let body = encode(payload)?;
        let response = self.transport.post(path, &body).await?;
        decode(path, ensure_success(response)?)
    }

    /// POST where a 2xx plain-text acknowledgement is as good as the entity.
    async fn post_acknowledged<T, R>(&self, path: &str, payload: &T) -> Result<Option<R>, ApiError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let body = encode(payload)?;
        let response = self.transport.post(path, &body).await?;
        Ok(decode_optional(path, ensure_success(response)?))
    }

    async fn put_acknowledged<T, R>(&self, path: &str, payload: &T) -> Result<Option<R>, ApiError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let body = encode(payload)?;
        let response = self.transport.put(path, &body).await?;
        Ok(decode_optional(path, ensure_success(response)?))
    }

    async fn delete_path(&self, path: &str) -> Result<(), ApiError> {
        let response = self.transport.delete(path).await?;
        ensure_success(response).map(|_| ())
    }
}

fn ensure_success(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(response.status, &response.body))
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::client(format!("Failed to encode request body: {e}")))
}

fn decode<R: DeserializeOwned>(path: &str, response: HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::client(format!("Failed to parse response from {path}: {e}")))
}

fn decode_optional<R: DeserializeOwned>(path: &str, response: HttpResponse) -> Option<R> {
    if response.body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(&response.body) {
        Ok(entity) => Some(entity),
        Err(_) => {
            warn!("{path} acknowledged without an entity: {}", response.body.trim());
            None
        }
    }
}
