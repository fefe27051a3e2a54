//! Vitals Monitor
//!
//! Lets an operator pick a patient and a vital-sign stream, seeds a rolling
//! chart from recent history, then polls for the latest sample on a fixed
//! interval.
//!
//! - **types**: Statistic, patient selector, readout, snapshot
//! - **chart**: Fixed-capacity FIFO chart window
//! - **clock**: Wall clock seam for chart labels
//! - **timer**: Repeating poll timer with an owned cancel handle
//! - **controller**: The state machine tying it together
//!
//! # Lifecycle
//!
//! ```text
//! Unauthenticated --login--> PatientListLoaded --start--> Polling
//!                                   ^                        |
//!                                   +---------stop-----------+
//! reload with saved selection: Unauthenticated ----------> Polling
//! ```

pub mod chart;
pub mod clock;
pub mod controller;
pub mod timer;
pub mod types;

pub use chart::{ChartPoint, ChartWindow, DEFAULT_WINDOW};
pub use clock::{epoch_label, time_label, Clock, SystemClock};
pub use controller::{MonitorController, MonitorDeps, MonitorView};
#[cfg(feature = "native")]
pub use timer::TokioTicker;
pub use timer::{PollTask, PollTimer, Ticker};
pub use types::{
    MonitorPhase, MonitorSnapshot, PatientOptions, Readout, SelectOption, Statistic,
    NO_PATIENTS_LABEL, UNAVAILABLE_TEXT,
};
