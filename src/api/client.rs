//! Native HTTP Client
//!
//! `reqwest`-backed [`VitalsApi`] used by the terminal monitor.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{HealthResponse, HistoryResponse, HistorySample, LiveReading, LoginRequest, PatientsResponse};
use super::error::{ApiError, ApiResult};
use super::{endpoint, health_path, history_path, live_path, login_path, patients_path, VitalsApi};
use crate::config::BackendConfig;
use crate::monitor::Statistic;
use crate::session::AuthSession;

/// CityCare backend client over HTTP
pub struct HttpVitalsApi {
    client: Client,
    base_url: String,
}

impl HttpVitalsApi {
    /// Create a client for the configured backend
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = endpoint(&self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport)?;

        decode(response).await
    }
}

fn map_transport(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        ApiError::Build(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        } else {
            text
        };
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl VitalsApi for HttpVitalsApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession> {
        let url = endpoint(&self.base_url, &login_path());
        debug!("POST {} as {}", url, request.user_id);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_transport)?;

        decode(response).await
    }

    async fn patients(&self) -> ApiResult<Vec<String>> {
        let resp: PatientsResponse = self.get_json(&patients_path()).await?;
        Ok(resp.into_ids())
    }

    async fn history(
        &self,
        patient: &str,
        stat: Statistic,
        limit: usize,
    ) -> ApiResult<Vec<HistorySample>> {
        let resp: HistoryResponse = self.get_json(&history_path(patient, stat, limit)).await?;
        Ok(resp.into_samples())
    }

    async fn live(&self, patient: &str, stat: Statistic) -> ApiResult<LiveReading> {
        self.get_json(&live_path(patient, stat)).await
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        self.get_json(&health_path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_normalizes_base_url() {
        let config = BackendConfig {
            base_url: "http://127.0.0.1:8000/".to_string(),
            request_timeout_secs: Some(5),
        };
        let api = HttpVitalsApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let config = BackendConfig {
            // Port 9 (discard) is closed on test machines.
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: Some(2),
        };
        let api = HttpVitalsApi::new(&config).unwrap();
        let err = api.patients().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
