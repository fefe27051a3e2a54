//! HTTP API Client
//!
//! `gloo-net` implementation of the CityCare backend contract.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use citycare::api::{
    endpoint, health_path, history_path, live_path, login_path, patients_path, ApiError,
    ApiResult, HealthResponse, HistoryResponse, HistorySample, LiveReading, LoginRequest,
    PatientsResponse, VitalsApi,
};
use citycare::config::DEFAULT_BASE_URL;
use citycare::storage::API_URL_KEY;
use citycare::{AuthSession, Statistic};

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Backend client running on the browser's `fetch`
pub struct GlooVitalsApi {
    base_url: String,
}

impl GlooVitalsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the URL in local storage, or the default backend
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            response.status_text()
        } else {
            text
        };
        return Err(ApiError::Status {
            status: response.status(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl VitalsApi for GlooVitalsApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession> {
        let url = endpoint(&self.base_url, &login_path());
        tracing::debug!("POST {} as {}", url, request.user_id);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Build(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

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
    fn test_trailing_slash_dropped() {
        let api = GlooVitalsApi::new("http://10.0.0.5:8000/");
        assert_eq!(api.base_url(), "http://10.0.0.5:8000");
    }
}
