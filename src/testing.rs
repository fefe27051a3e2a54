//! Test doubles shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tokio::sync::Notify;

use crate::api::{
    ApiError, ApiResult, HealthResponse, HistorySample, LiveReading, LoginRequest, VitalsApi,
};
use crate::monitor::{Clock, MonitorSnapshot, MonitorView, PollTask, PollTimer, Statistic, Ticker};
use crate::notify::Notifier;
use crate::session::AuthSession;
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use crate::theme::ClassList;

fn offline() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

/// Scripted backend. Live readings are served from a queue; an empty queue
/// behaves like an unreachable server.
///
/// A held call captures its result when it is made and only returns once
/// the gate is released, so tests can overlap requests.
pub struct FakeApi {
    base_url: String,
    login: RefCell<ApiResult<AuthSession>>,
    patients: RefCell<ApiResult<Vec<String>>>,
    history: RefCell<ApiResult<Vec<HistorySample>>>,
    live: RefCell<VecDeque<ApiResult<LiveReading>>>,
    health: RefCell<ApiResult<HealthResponse>>,
    login_calls: Cell<usize>,
    patients_calls: Cell<usize>,
    history_calls: Cell<usize>,
    live_calls: Cell<usize>,
    last_login: RefCell<Option<LoginRequest>>,
    last_history_limit: Cell<Option<usize>>,
    history_gate: RefCell<Option<Rc<Notify>>>,
    live_gate: RefCell<Option<Rc<Notify>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            login: RefCell::new(Err(offline())),
            patients: RefCell::new(Ok(Vec::new())),
            history: RefCell::new(Ok(Vec::new())),
            live: RefCell::new(VecDeque::new()),
            health: RefCell::new(Err(offline())),
            login_calls: Cell::new(0),
            patients_calls: Cell::new(0),
            history_calls: Cell::new(0),
            live_calls: Cell::new(0),
            last_login: RefCell::new(None),
            last_history_limit: Cell::new(None),
            history_gate: RefCell::new(None),
            live_gate: RefCell::new(None),
        }
    }

    pub fn set_login(&self, result: ApiResult<AuthSession>) {
        *self.login.borrow_mut() = result;
    }

    pub fn set_patients(&self, result: ApiResult<Vec<String>>) {
        *self.patients.borrow_mut() = result;
    }

    pub fn set_history(&self, result: ApiResult<Vec<HistorySample>>) {
        *self.history.borrow_mut() = result;
    }

    pub fn push_live(&self, result: ApiResult<LiveReading>) {
        self.live.borrow_mut().push_back(result);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.get()
    }

    pub fn patients_calls(&self) -> usize {
        self.patients_calls.get()
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.get()
    }

    pub fn live_calls(&self) -> usize {
        self.live_calls.get()
    }

    pub fn last_login(&self) -> Option<LoginRequest> {
        self.last_login.borrow().clone()
    }

    pub fn last_history_limit(&self) -> Option<usize> {
        self.last_history_limit.get()
    }

    /// Park the next history call until the returned gate is notified
    pub fn hold_history(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.history_gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    /// Park the next live call until the returned gate is notified
    pub fn hold_live(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.live_gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }
}

#[async_trait(?Send)]
impl VitalsApi for FakeApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession> {
        self.login_calls.set(self.login_calls.get() + 1);
        *self.last_login.borrow_mut() = Some(request.clone());
        self.login.borrow().clone()
    }

    async fn patients(&self) -> ApiResult<Vec<String>> {
        self.patients_calls.set(self.patients_calls.get() + 1);
        self.patients.borrow().clone()
    }

    async fn history(
        &self,
        _patient: &str,
        _stat: Statistic,
        limit: usize,
    ) -> ApiResult<Vec<HistorySample>> {
        self.history_calls.set(self.history_calls.get() + 1);
        self.last_history_limit.set(Some(limit));
        let result = self.history.borrow().clone();
        let gate = self.history_gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn live(&self, _patient: &str, _stat: Statistic) -> ApiResult<LiveReading> {
        self.live_calls.set(self.live_calls.get() + 1);
        let result = self.live.borrow_mut().pop_front().unwrap_or_else(|| Err(offline()));
        let gate = self.live_gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        self.health.borrow().clone()
    }
}

/// Ticker driven by hand through [`FakeTicker::tick`]
#[derive(Default)]
pub struct FakeTicker {
    timers: RefCell<Vec<(Rc<Cell<bool>>, PollTask)>>,
    last_period: Cell<Option<Duration>>,
}

impl FakeTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers ever started
    pub fn started_count(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Timers not yet cancelled
    pub fn active_count(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|(active, _)| active.get())
            .count()
    }

    pub fn last_period(&self) -> Option<Duration> {
        self.last_period.get()
    }

    /// Fire every active timer once, running each task to completion
    pub async fn tick(&self) {
        let tasks: Vec<PollTask> = self
            .timers
            .borrow()
            .iter()
            .filter(|(active, _)| active.get())
            .map(|(_, task)| Rc::clone(task))
            .collect();
        for task in tasks {
            task().await;
        }
    }
}

impl Ticker for FakeTicker {
    fn every(&self, period: Duration, task: PollTask) -> PollTimer {
        let active = Rc::new(Cell::new(true));
        self.timers.borrow_mut().push((Rc::clone(&active), task));
        self.last_period.set(Some(period));
        PollTimer::new(move || active.set(false))
    }
}

/// Clock frozen at one instant
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn at(epoch_secs: i64, offset_secs: i32) -> Self {
        Self {
            now: Utc.timestamp_opt(epoch_secs, 0).unwrap(),
            offset: FixedOffset::east_opt(offset_secs).unwrap(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Keeps every published snapshot
#[derive(Default)]
pub struct RecordingView {
    snapshots: RefCell<Vec<MonitorSnapshot>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> usize {
        self.snapshots.borrow().len()
    }

    pub fn last(&self) -> Option<MonitorSnapshot> {
        self.snapshots.borrow().last().cloned()
    }
}

impl MonitorView for RecordingView {
    fn render(&self, snapshot: &MonitorSnapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}

/// Keeps every notice
#[derive(Default)]
pub struct RecordingNotifier {
    infos: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

/// Store where every operation fails, like `localStorage` in a locked-down browser
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// In-memory class list
#[derive(Default)]
pub struct FakeClassList {
    classes: RefCell<BTreeSet<String>>,
}

impl FakeClassList {
    pub fn with(initial: &[&str]) -> Self {
        Self {
            classes: RefCell::new(initial.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// Classes in sorted order
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.borrow().contains(name)
    }
}

impl ClassList for FakeClassList {
    fn add_class(&self, name: &str) {
        self.classes.borrow_mut().insert(name.to_string());
    }

    fn remove_class(&self, name: &str) {
        self.classes.borrow_mut().remove(name);
    }
}
