//! HTTP access to the calculation service.
//!
//! [`ResultsApi`] is the seam between the view and the network;
//! [`HttpResultsApi`] implements it with [`reqwest`].

use async_trait::async_trait;
use perfcalc_core::calculation::ComputeRequest;
use serde::Deserialize;

use crate::error::ClientError;

/// One historical computation as returned by `GET /api/results`.
///
/// Only the fields the view renders are kept; the server may send more.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComputeResult {
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub processing_mode: String,
    pub execution_time: f64,
    pub cpu_time: f64,
    pub memory_usage: f64,
    pub cpu_utilization: f64,
    pub result_value: f64,
}

/// Body of `GET /api/results`.
#[derive(Debug, Deserialize)]
pub struct ResultsListing {
    pub results: Vec<ComputeResult>,
}

/// Network operations the results view depends on.
#[async_trait]
pub trait ResultsApi: Send + Sync {
    /// `POST /api/calculate`. The response body is not used.
    async fn calculate(&self, request: &ComputeRequest) -> Result<(), ClientError>;

    /// `GET /api/results`, in server order.
    async fn list_results(&self) -> Result<Vec<ComputeResult>, ClientError>;
}

/// [`ResultsApi`] over HTTP.
pub struct HttpResultsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResultsApi {
    /// Create a client for a server at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Human-readable failure detail for a non-2xx response.
    ///
    /// Prefers the `error` field of the server's JSON error body.
    async fn failure_detail(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"].as_str().map(str::to_string))
            .unwrap_or(body);

        if message.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            format!("HTTP {}: {message}", status.as_u16())
        }
    }
}

#[async_trait]
impl ResultsApi for HttpResultsApi {
    async fn calculate(&self, request: &ComputeRequest) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/api/calculate", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::RequestFailed(
                Self::failure_detail(response).await,
            ));
        }
        Ok(())
    }

    async fn list_results(&self) -> Result<Vec<ComputeResult>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/results", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::LoadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::LoadFailed(Self::failure_detail(response).await));
        }

        let listing = response
            .json::<ResultsListing>()
            .await
            .map_err(|e| ClientError::LoadFailed(e.to_string()))?;
        Ok(listing.results)
    }
}
