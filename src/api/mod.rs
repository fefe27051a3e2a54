//! CityCare Backend API
//!
//! The contract between the dashboard controllers and the backend, plus the
//! native HTTP implementation used by the terminal monitor.
//!
//! # Endpoints
//!
//! - `POST /auth/login` - Authenticate a user id + PIN
//! - `GET /patients` - List patient identifiers
//! - `GET /sensor/{patient}/history/{stat}?limit=N` - Recent samples, oldest first
//! - `GET /sensor/{patient}/{stat}` - Latest sample
//! - `GET /health` - Backend health summary
//!
//! The browser app supplies its own [`VitalsApi`] built on `gloo-net`.

#[cfg(feature = "native")]
pub mod client;
pub mod dto;
pub mod error;

use async_trait::async_trait;

use crate::monitor::Statistic;
use crate::session::AuthSession;

#[cfg(feature = "native")]
pub use client::HttpVitalsApi;
pub use dto::{
    HealthResponse, HistoryResponse, HistorySample, LiveReading, LoginRequest, PatientsResponse,
};
pub use error::{ApiError, ApiResult};

/// Backend operations used by the header and monitor controllers.
///
/// Futures are not `Send`: everything runs on one cooperative thread.
#[async_trait(?Send)]
pub trait VitalsApi {
    /// Base URL this client talks to, for user-facing messages
    fn base_url(&self) -> &str;

    /// Authenticate and return the backend's session object
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession>;

    /// Patient identifiers in backend order
    async fn patients(&self) -> ApiResult<Vec<String>>;

    /// Up to `limit` recent samples, oldest first
    async fn history(
        &self,
        patient: &str,
        stat: Statistic,
        limit: usize,
    ) -> ApiResult<Vec<HistorySample>>;

    /// Latest sample for a patient/statistic pair
    async fn live(&self, patient: &str, stat: Statistic) -> ApiResult<LiveReading>;

    /// Backend health summary
    async fn health(&self) -> ApiResult<HealthResponse>;
}

/// Path for the login endpoint
pub fn login_path() -> String {
    "/auth/login".to_string()
}

/// Path for the patient list endpoint
pub fn patients_path() -> String {
    "/patients".to_string()
}

/// Path for the history endpoint
pub fn history_path(patient: &str, stat: Statistic, limit: usize) -> String {
    format!(
        "/sensor/{}/history/{}?limit={}",
        urlencoding::encode(patient),
        stat.as_str(),
        limit
    )
}

/// Path for the live reading endpoint
pub fn live_path(patient: &str, stat: Statistic) -> String {
    format!("/sensor/{}/{}", urlencoding::encode(patient), stat.as_str())
}

/// Path for the health endpoint
pub fn health_path() -> String {
    "/health".to_string()
}

/// Join a base URL and an endpoint path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_path() {
        assert_eq!(
            history_path("PAT_001", Statistic::HeartRate, 30),
            "/sensor/PAT_001/history/heart_rate?limit=30"
        );
    }

    #[test]
    fn test_live_path_encodes_patient() {
        assert_eq!(live_path("PAT 7/a", Statistic::O2), "/sensor/PAT%207%2Fa/o2");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("http://127.0.0.1:8000/", &patients_path()),
            "http://127.0.0.1:8000/patients"
        );
    }
}
