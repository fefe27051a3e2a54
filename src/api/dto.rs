//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the CityCare backend.

use serde::{Deserialize, Serialize};

use crate::session::AuthSession;

// ============================================
// AUTH DTOs
// ============================================

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub user_id: String,
    pub pin: String,
}

/// Response of `POST /auth/login` is the session itself
pub type LoginResponse = AuthSession;

// ============================================
// PATIENT DTOs
// ============================================

/// Response of `GET /patients`
///
/// Accepts both the wrapped `{patients: [...]}` form and a bare array, and
/// entries that are either plain identifiers or full patient records.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatientsResponse {
    Wrapped { patients: Vec<PatientEntry> },
    Bare(Vec<PatientEntry>),
}

/// One entry of the patient list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatientEntry {
    Id(String),
    Record {
        user_id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl PatientEntry {
    pub fn id(&self) -> &str {
        match self {
            PatientEntry::Id(id) => id,
            PatientEntry::Record { user_id, .. } => user_id,
        }
    }
}

impl PatientsResponse {
    /// Patient identifiers in response order
    pub fn into_ids(self) -> Vec<String> {
        let entries = match self {
            PatientsResponse::Wrapped { patients } => patients,
            PatientsResponse::Bare(patients) => patients,
        };
        entries.iter().map(|p| p.id().to_string()).collect()
    }
}

// ============================================
// SENSOR DTOs
// ============================================

/// Response of `GET /sensor/{patient}/history/{stat}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    /// `[value, epoch_seconds]` pairs, oldest first
    #[serde(default)]
    pub history: Vec<(f64, f64)>,
}

impl HistoryResponse {
    pub fn into_samples(self) -> Vec<HistorySample> {
        self.history
            .into_iter()
            .map(|(value, ts)| HistorySample {
                value,
                timestamp: ts as i64,
            })
            .collect()
    }
}

/// A single historical reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub value: f64,
    /// Seconds since epoch
    pub timestamp: i64,
}

/// Response of `GET /sensor/{patient}/{stat}`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LiveReading {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

impl LiveReading {
    /// The value to chart, if any.
    ///
    /// With `zero_is_missing` set a `0` reading counts as absent, matching
    /// the legacy web dashboard. A genuine zero is then indistinguishable
    /// from no data.
    pub fn present_value(&self, zero_is_missing: bool) -> Option<f64> {
        match self.value {
            Some(v) if v.is_nan() => None,
            Some(v) if zero_is_missing && v == 0.0 => None,
            other => other,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Response of `GET /health`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub patients: usize,
    #[serde(default)]
    pub appointments: usize,
    #[serde(default)]
    pub alerts: usize,
    #[serde(default)]
    pub facilities: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patients_wrapped_ids() {
        let resp: PatientsResponse =
            serde_json::from_str(r#"{"patients": ["P1", "P2"]}"#).unwrap();
        assert_eq!(resp.into_ids(), vec!["P1", "P2"]);
    }

    #[test]
    fn test_patients_bare_records() {
        let body = r#"[
            {"user_id": "USR_PAT_001", "pin": "1111", "name": "Asha"},
            {"user_id": "USR_PAT_002", "pin": "2222"}
        ]"#;
        let resp: PatientsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.into_ids(), vec!["USR_PAT_001", "USR_PAT_002"]);
    }

    #[test]
    fn test_patients_empty() {
        let resp: PatientsResponse = serde_json::from_str(r#"{"patients": []}"#).unwrap();
        assert!(resp.into_ids().is_empty());
    }

    #[test]
    fn test_history_samples_keep_order() {
        let resp: HistoryResponse =
            serde_json::from_str(r#"{"history": [[72, 1700000000], [75.5, 1700000003.9]]}"#)
                .unwrap();
        let samples = resp.into_samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].value, 72.0);
        assert_eq!(samples[1].timestamp, 1_700_000_003);
    }

    #[test]
    fn test_live_reading_absent_value() {
        let reading: LiveReading = serde_json::from_str(r#"{"unit": "bpm"}"#).unwrap();
        assert_eq!(reading.present_value(true), None);

        let reading: LiveReading =
            serde_json::from_str(r#"{"value": null, "unit": "bpm"}"#).unwrap();
        assert_eq!(reading.present_value(false), None);
    }

    #[test]
    fn test_live_reading_zero_handling() {
        let reading = LiveReading {
            value: Some(0.0),
            unit: "%".to_string(),
        };
        assert_eq!(reading.present_value(true), None);
        assert_eq!(reading.present_value(false), Some(0.0));
    }

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest {
            user_id: "DOC_1".to_string(),
            pin: "1234".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"user_id": "DOC_1", "pin": "1234"}));
    }
}
