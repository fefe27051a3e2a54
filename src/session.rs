//! Session state
//!
//! Two kinds of client-held session live here:
//!
//! - [`AuthSession`]: what `POST /auth/login` returns, held in memory by the
//!   header after a successful login.
//! - [`Session`]: the monitor's convenience record (who is watching which
//!   patient and statistic), persisted to local storage so a reload can
//!   resume polling.
//!
//! Neither has a server-side counterpart.

use serde::{Deserialize, Serialize};

use crate::monitor::Statistic;

/// Identity returned by the backend on login
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Authenticated session as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: UserInfo,
}

impl AuthSession {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> Option<&str> {
        self.user.role.as_deref()
    }

    /// `id (role)` with `unknown` standing in for missing parts
    pub fn display_identity(&self) -> String {
        let id = if self.user.id.is_empty() {
            "unknown"
        } else {
            &self.user.id
        };
        let role = self.role().filter(|r| !r.is_empty()).unwrap_or("unknown");
        format!("{} ({})", id, role)
    }

    /// Audience tag used to filter alerts for this user.
    ///
    /// Patients see alerts addressed to their patient record
    /// (`USR_PAT_001` → `patient:PAT_001`); everyone else sees alerts for
    /// their role.
    pub fn alert_audience(&self) -> String {
        let role = self.role().unwrap_or("");
        if role == "patient" {
            format!("patient:{}", self.user.id.replace("USR_PAT_", "PAT_"))
        } else {
            format!("role:{}", role)
        }
    }
}

/// Monitor convenience state, persisted as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<Statistic>,
}

impl Session {
    /// The patient/statistic pair, when both are set and non-empty
    pub fn selection(&self) -> Option<(&str, Statistic)> {
        match (self.patient.as_deref(), self.stat) {
            (Some(patient), Some(stat)) if !patient.is_empty() => Some((patient, stat)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(id: &str, role: Option<&str>) -> AuthSession {
        AuthSession {
            user: UserInfo {
                id: id.to_string(),
                name: None,
                role: role.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_login_response_parses() {
        let session: AuthSession =
            serde_json::from_str(r#"{"user": {"id": "DOC_7", "role": "doctor"}}"#).unwrap();
        assert_eq!(session.user_id(), "DOC_7");
        assert_eq!(session.role(), Some("doctor"));
        assert_eq!(session.display_identity(), "DOC_7 (doctor)");
    }

    #[test]
    fn test_display_identity_unknown_parts() {
        assert_eq!(auth("", None).display_identity(), "unknown (unknown)");
    }

    #[test]
    fn test_alert_audience() {
        assert_eq!(
            auth("USR_PAT_001", Some("patient")).alert_audience(),
            "patient:PAT_001"
        );
        assert_eq!(auth("DOC_1", Some("doctor")).alert_audience(), "role:doctor");
        assert_eq!(auth("X", None).alert_audience(), "role:");
    }

    #[test]
    fn test_session_serializes_flat() {
        let session = Session {
            user: Some("DOC_1".to_string()),
            role: None,
            patient: Some("PAT_001".to_string()),
            stat: Some(Statistic::HeartRate),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user": "DOC_1", "patient": "PAT_001", "stat": "heart_rate"})
        );
    }

    #[test]
    fn test_selection_requires_both_parts() {
        let mut session = Session::default();
        assert!(session.selection().is_none());

        session.patient = Some("PAT_001".to_string());
        assert!(session.selection().is_none());

        session.stat = Some(Statistic::O2);
        assert_eq!(session.selection(), Some(("PAT_001", Statistic::O2)));

        session.patient = Some(String::new());
        assert!(session.selection().is_none());
    }
}
