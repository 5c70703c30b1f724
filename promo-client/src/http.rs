//! HTTP client for the authoritative evaluation service

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use shared::evaluation::{EvaluateRequest, EvaluateResponse};
use shared::models::CartLine;
use std::time::Duration;

use crate::{ClientConfig, ClientError, ClientResult};

/// `GET /health` body
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub campaigns: usize,
}

/// HTTP client for making requests to the evaluation service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry_once: bool,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            retry_once: config.retry_once,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a POST request with JSON body.
    ///
    /// A connection failure is retried once when enabled; any other failure
    /// is returned to the caller.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let url = self.url(path);
        let mut attempt = self.client.post(&url).json(body).send().await;

        if self.retry_once
            && let Err(e) = &attempt
            && e.is_connect()
        {
            tracing::debug!(url = %url, "Connection failed, retrying once");
            attempt = self.client.post(&url).json(body).send().await;
        }

        let response = attempt.map_err(|e| self.transport_error(e))?;
        Self::handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::handle_response(response).await
    }

    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Http(error)
        }
    }

    /// Handle the HTTP response: non-2xx and undecodable bodies are failures
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Err(ClientError::InvalidResponse("empty body".to_string()));
        }

        serde_json::from_str(&text).map_err(Into::into)
    }

    // ========== Evaluation API ==========

    /// Service liveness and loaded campaign count
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.get("/health").await
    }

    /// Ask the service for the authoritative evaluation of a cart
    pub async fn evaluate(&self, cart: &[CartLine]) -> ClientResult<EvaluateResponse> {
        let request = EvaluateRequest {
            cart: cart.to_vec(),
        };
        self.post("/evaluate", &request).await
    }
}
