// src/services/upstream.rs
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderName},
};
use thiserror::Error;

use crate::config::Config;
use crate::message::ChatRequest;

pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-api-version");
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Whatever the upstream answered, success or not.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No response came back: refused, timed out, reset mid-body.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The request never left this process.
    #[error("could not build upstream request: {0}")]
    Request(String),
}

/// Seam between the chat handler and the backend chat API.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// Production client: one pooled `reqwest::Client` shared by every request.
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    client: Client,
    chat_url: String,
    api_key: String,
    api_version: String,
}

impl ReqwestUpstream {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_timeout(config, config.upstream_timeout)
    }

    pub fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            chat_url: config.chat_url(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }
}

#[async_trait]
impl UpstreamClient for ReqwestUpstream {
    async fn send(&self, request: &ChatRequest) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .client
            .post(&self.chat_url)
            .header(ACCEPT, "application/json")
            .header(API_VERSION_HEADER, &self.api_version)
            .header(API_KEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.bytes().await.map_err(classify)?;

        Ok(UpstreamResponse { status, body })
    }
}

// Builder errors (bad URL, bad header value) happen before any I/O.
fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_builder() {
        UpstreamError::Request(err.to_string())
    } else {
        UpstreamError::Unavailable(err.to_string())
    }
}
