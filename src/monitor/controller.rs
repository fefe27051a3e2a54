//! Monitor Controller
//!
//! Owns the monitor's session, chart and poll timer. Every network failure
//! is logged and reflected in the published snapshot; nothing is returned to
//! the caller as an error.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_util::FutureExt;
use tracing::{debug, info, warn};

use super::chart::ChartWindow;
use super::clock::{epoch_label, time_label, Clock};
use super::timer::{PollTask, PollTimer, Ticker};
use super::types::{MonitorPhase, MonitorSnapshot, PatientOptions, Readout, Statistic};
use crate::api::VitalsApi;
use crate::config::MonitorConfig;
use crate::notify::Notifier;
use crate::session::Session;
use crate::storage::{read_json, write_json, KeyValueStore, DOCTOR_SESSION_KEY, MONITOR_SESSION_KEY};

/// Receives a fresh snapshot after every state change
pub trait MonitorView {
    fn render(&self, snapshot: &MonitorSnapshot);
}

/// Everything the controller talks to
#[derive(Clone)]
pub struct MonitorDeps {
    pub api: Rc<dyn VitalsApi>,
    pub store: Rc<dyn KeyValueStore>,
    pub clock: Rc<dyn Clock>,
    pub ticker: Rc<dyn Ticker>,
    pub view: Rc<dyn MonitorView>,
    pub notifier: Rc<dyn Notifier>,
}

#[derive(Debug, Default)]
struct MonitorState {
    phase: MonitorPhase,
    section_visible: bool,
    session: Session,
    patients: PatientOptions,
    chart: Option<ChartWindow>,
    readout: Readout,
}

/// Patient vitals monitor
pub struct MonitorController {
    deps: MonitorDeps,
    config: MonitorConfig,
    state: RefCell<MonitorState>,
    timer: RefCell<Option<PollTimer>>,
    // Bumped on every start/stop; responses tagged with an older value are dropped.
    generation: Cell<u64>,
}

impl MonitorController {
    pub fn new(deps: MonitorDeps, config: MonitorConfig) -> Rc<Self> {
        Rc::new(Self {
            deps,
            config,
            state: RefCell::new(MonitorState::default()),
            timer: RefCell::new(None),
            generation: Cell::new(0),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn phase(&self) -> MonitorPhase {
        self.state.borrow().phase
    }

    /// True while a repeating poll is scheduled
    pub fn is_polling(&self) -> bool {
        self.timer.borrow().is_some()
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        let state = self.state.borrow();
        MonitorSnapshot {
            phase: state.phase,
            section_visible: state.section_visible,
            user: state.session.user.clone(),
            patients: state.patients.clone(),
            selected_patient: state.session.patient.clone(),
            selected_stat: state.session.stat,
            chart: state.chart.clone(),
            readout: state.readout.clone(),
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.deps.view.render(&snapshot);
    }

    fn persist_session(&self, key: &str) {
        let session = self.state.borrow().session.clone();
        if let Err(e) = write_json(&*self.deps.store, key, &session) {
            debug!("Session not persisted under {}: {}", key, e);
        }
    }

    fn selection(&self) -> Option<(String, Statistic)> {
        self.state
            .borrow()
            .session
            .selection()
            .map(|(patient, stat)| (patient.to_string(), stat))
    }

    /// Record the operator and load the patient list.
    ///
    /// Returns false (and sends nothing) when either field is blank.
    pub async fn login(&self, user: &str, pin: &str) -> bool {
        let user = user.trim();
        let pin = pin.trim();
        if user.is_empty() || pin.is_empty() {
            self.deps.notifier.error("Enter credentials");
            return false;
        }

        self.state.borrow_mut().session.user = Some(user.to_string());
        self.persist_session(DOCTOR_SESSION_KEY);

        self.load_patients().await;
        self.state.borrow_mut().section_visible = true;
        self.publish();
        true
    }

    /// Fetch the patient list. Failures leave the selector as it was.
    pub async fn load_patients(&self) -> bool {
        match self.deps.api.patients().await {
            Ok(ids) => {
                debug!("Loaded {} patients", ids.len());
                {
                    let mut state = self.state.borrow_mut();
                    state.patients = PatientOptions::from_ids(ids);
                    if state.phase == MonitorPhase::Unauthenticated {
                        state.phase = MonitorPhase::PatientListLoaded;
                    }
                }
                self.publish();
                true
            }
            Err(e) => {
                warn!("Failed to load patients: {}", e);
                self.publish();
                false
            }
        }
    }

    /// Start monitoring a patient/statistic pair.
    ///
    /// Cancels any running poll first, so at most one timer exists.
    pub async fn start(self: &Rc<Self>, patient: Option<&str>, stat: Option<Statistic>) -> bool {
        let patient = patient.map(str::trim).filter(|p| !p.is_empty());
        let (patient, stat) = match (patient, stat) {
            (Some(patient), Some(stat)) => (patient.to_string(), stat),
            _ => {
                self.deps.notifier.error("Select a patient and a statistic");
                return false;
            }
        };

        {
            let mut state = self.state.borrow_mut();
            state.session.patient = Some(patient.clone());
            state.session.stat = Some(stat);
        }
        self.persist_session(MONITOR_SESSION_KEY);

        self.begin_polling(patient, stat).await;
        true
    }

    /// Resume the selection saved by a previous page load.
    ///
    /// Returns false when nothing usable was saved.
    pub async fn restore(self: &Rc<Self>) -> bool {
        let saved: Option<Session> = match read_json(&*self.deps.store, MONITOR_SESSION_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                debug!("Ignoring saved monitor session: {}", e);
                None
            }
        };
        let Some(saved) = saved else {
            return false;
        };
        let Some((patient, stat)) = saved.selection().map(|(p, s)| (p.to_string(), s)) else {
            return false;
        };

        info!("Resuming monitor for {} / {}", patient, stat);
        {
            let mut state = self.state.borrow_mut();
            state.session = saved;
            state.section_visible = true;
        }
        self.publish();

        self.load_patients().await;
        self.begin_polling(patient, stat).await;
        true
    }

    /// Stop polling and drop any in-flight responses
    pub fn stop(&self) {
        self.cancel_timer();
        self.generation.set(self.generation.get() + 1);
        {
            let mut state = self.state.borrow_mut();
            if state.phase == MonitorPhase::Polling {
                state.phase = MonitorPhase::PatientListLoaded;
            }
        }
        self.publish();
    }

    fn cancel_timer(&self) {
        let previous = self.timer.borrow_mut().take();
        if let Some(timer) = previous {
            timer.cancel();
            debug!("Cancelled previous poll timer");
        }
    }

    async fn begin_polling(self: &Rc<Self>, patient: String, stat: Statistic) {
        self.cancel_timer();
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        {
            let mut state = self.state.borrow_mut();
            state.chart = Some(ChartWindow::new(stat, self.config.window_capacity));
            state.readout = Readout::Idle;
        }
        self.publish();

        self.load_history(generation, &patient, stat).await;
        if self.generation.get() != generation {
            return;
        }

        self.poll_live().await;
        if self.generation.get() != generation {
            return;
        }

        let weak = Rc::downgrade(self);
        let task: PollTask = Rc::new(move || {
            let weak = weak.clone();
            async move {
                if let Some(controller) = weak.upgrade() {
                    controller.poll_live().await;
                }
            }
            .boxed_local()
        });
        let timer = self.deps.ticker.every(self.config.poll_interval(), task);
        let replaced = self.timer.borrow_mut().replace(timer);
        drop(replaced);

        self.state.borrow_mut().phase = MonitorPhase::Polling;
        info!(
            "Polling {} / {} every {}ms",
            patient, stat, self.config.poll_interval_ms
        );
        self.publish();
    }

    async fn load_history(&self, generation: u64, patient: &str, stat: Statistic) {
        let result = self
            .deps
            .api
            .history(patient, stat, self.config.history_limit)
            .await;
        if self.generation.get() != generation {
            return;
        }

        match result {
            Ok(mut samples) => {
                if samples.is_empty() {
                    debug!("No history yet for {} / {}", patient, stat);
                }
                samples.sort_by_key(|s| s.timestamp);
                let clock = &*self.deps.clock;
                let mut state = self.state.borrow_mut();
                if let Some(chart) = state.chart.as_mut() {
                    for sample in samples {
                        chart.push(sample.value, epoch_label(clock, sample.timestamp));
                    }
                }
            }
            Err(e) => {
                warn!("No history found for {} / {}: {}", patient, stat, e);
            }
        }
        self.publish();
    }

    /// Fetch the latest value once and fold it into the chart and readout
    pub async fn poll_live(&self) {
        let Some((patient, stat)) = self.selection() else {
            return;
        };
        let generation = self.generation.get();

        let result = self.deps.api.live(&patient, stat).await;
        if self.generation.get() != generation {
            debug!("Dropping stale reading for {} / {}", patient, stat);
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            match result {
                Ok(reading) => match reading.present_value(self.config.zero_is_missing) {
                    Some(value) => {
                        let label = time_label(&*self.deps.clock, self.deps.clock.now());
                        if let Some(chart) = state.chart.as_mut() {
                            chart.push(value, label);
                        }
                        state.readout = Readout::Value {
                            value,
                            unit: reading.unit,
                        };
                    }
                    None => {
                        debug!("No live value for {} / {}", patient, stat);
                        state.readout = Readout::Unavailable;
                    }
                },
                Err(e) => {
                    warn!("Live fetch failed for {} / {}: {}", patient, stat, e);
                    state.readout = Readout::Unavailable;
                }
            }
        }
        self.publish();
    }
}
