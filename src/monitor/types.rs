//! Monitor value types
//!
//! Everything the monitor view needs to draw itself: the statistic being
//! charted, the patient selector contents, the live readout and the
//! snapshot published after every state change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::chart::ChartWindow;

/// Vital-sign channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    HeartRate,
    O2,
    Temperature,
}

impl Statistic {
    pub const ALL: [Statistic; 3] = [Statistic::HeartRate, Statistic::O2, Statistic::Temperature];

    /// Wire name used in URLs and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::HeartRate => "heart_rate",
            Statistic::O2 => "o2",
            Statistic::Temperature => "temperature",
        }
    }

    /// Human label for selectors
    pub fn display_name(&self) -> &'static str {
        match self {
            Statistic::HeartRate => "Heart rate",
            Statistic::O2 => "Oxygen saturation",
            Statistic::Temperature => "Temperature",
        }
    }

    /// Dataset label: first underscore becomes a space, upper-cased
    pub fn dataset_label(&self) -> String {
        self.as_str().replacen('_', " ", 1).to_uppercase()
    }

    /// Y axis title
    pub fn axis_title(&self) -> &'static str {
        match self {
            Statistic::HeartRate => "BPM",
            Statistic::O2 => "%",
            Statistic::Temperature => "°C",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "heart_rate" => Ok(Statistic::HeartRate),
            "o2" => Ok(Statistic::O2),
            "temperature" => Ok(Statistic::Temperature),
            other => Err(format!("Unknown statistic: {}", other)),
        }
    }
}

/// Monitor lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonitorPhase {
    #[default]
    Unauthenticated,
    PatientListLoaded,
    Polling,
}

/// One `<option>` of the patient selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

/// Placeholder shown when the backend has no patients
pub const NO_PATIENTS_LABEL: &str = "No patients yet";

/// Contents of the patient selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatientOptions {
    /// Never loaded, or the last load failed
    #[default]
    Unloaded,
    /// Loaded and empty
    Empty,
    Loaded(Vec<String>),
}

impl PatientOptions {
    pub fn from_ids(ids: Vec<String>) -> Self {
        if ids.is_empty() {
            PatientOptions::Empty
        } else {
            PatientOptions::Loaded(ids)
        }
    }

    /// Options to render, in backend order
    pub fn options(&self) -> Vec<SelectOption> {
        match self {
            PatientOptions::Unloaded => Vec::new(),
            PatientOptions::Empty => vec![SelectOption {
                value: String::new(),
                label: NO_PATIENTS_LABEL.to_string(),
                disabled: true,
            }],
            PatientOptions::Loaded(ids) => ids
                .iter()
                .map(|id| SelectOption {
                    value: id.clone(),
                    label: id.clone(),
                    disabled: false,
                })
                .collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        matches!(self, PatientOptions::Loaded(ids) if ids.iter().any(|p| p == id))
    }

    /// First selectable patient
    pub fn first(&self) -> Option<&str> {
        match self {
            PatientOptions::Loaded(ids) => ids.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Shown when the live value cannot be read
pub const UNAVAILABLE_TEXT: &str = "⚠ Unable to fetch data";

/// Textual live-value readout
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Readout {
    #[default]
    Idle,
    Value { value: f64, unit: String },
    Unavailable,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readout::Idle => f.write_str("--"),
            Readout::Value { value, unit } if unit.is_empty() => write!(f, "{}", value),
            Readout::Value { value, unit } => write!(f, "{} {}", value, unit),
            Readout::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}

/// Everything the monitor view renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorSnapshot {
    pub phase: MonitorPhase,
    pub section_visible: bool,
    pub user: Option<String>,
    pub patients: PatientOptions,
    pub selected_patient: Option<String>,
    pub selected_stat: Option<Statistic>,
    pub chart: Option<ChartWindow>,
    pub readout: Readout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_labels() {
        assert_eq!(Statistic::HeartRate.dataset_label(), "HEART RATE");
        assert_eq!(Statistic::O2.dataset_label(), "O2");
        assert_eq!(Statistic::HeartRate.axis_title(), "BPM");
        assert_eq!(Statistic::O2.axis_title(), "%");
        assert_eq!(Statistic::Temperature.axis_title(), "°C");
    }

    #[test]
    fn test_statistic_parse_roundtrip() {
        for stat in Statistic::ALL {
            assert_eq!(stat.as_str().parse::<Statistic>().unwrap(), stat);
        }
        assert!("blood_sugar".parse::<Statistic>().is_err());
    }

    #[test]
    fn test_patient_options_in_order() {
        let options =
            PatientOptions::from_ids(vec!["P1".to_string(), "P2".to_string()]).options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "P1");
        assert_eq!(options[1].value, "P2");
        assert!(options.iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_empty_patients_placeholder() {
        let options = PatientOptions::from_ids(Vec::new()).options();
        assert_eq!(options.len(), 1);
        assert!(options[0].disabled);
        assert_eq!(options[0].label, NO_PATIENTS_LABEL);
        assert!(PatientOptions::Unloaded.options().is_empty());
    }

    #[test]
    fn test_readout_text() {
        let readout = Readout::Value {
            value: 98.2,
            unit: "F".to_string(),
        };
        assert_eq!(readout.to_string(), "98.2 F");

        let readout = Readout::Value {
            value: 72.0,
            unit: "bpm".to_string(),
        };
        assert_eq!(readout.to_string(), "72 bpm");

        assert_eq!(Readout::Unavailable.to_string(), UNAVAILABLE_TEXT);
        assert_eq!(Readout::Idle.to_string(), "--");
    }
}
