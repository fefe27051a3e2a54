//! Browser Platform
//!
//! Implementations of the controller seams on top of web APIs:
//! `localStorage`, `setInterval`, `Date`, `document.body.classList` and the
//! toast signals.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use gloo_timers::callback::Interval;
use leptos::*;

use citycare::monitor::{Clock, MonitorSnapshot, MonitorView, PollTask, PollTimer, Ticker};
use citycare::{ClassList, KeyValueStore, Notifier, StorageError, StorageResult};

use crate::state::GlobalState;

/// `window.localStorage`
#[derive(Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable("localStorage missing".to_string())),
            Err(e) => Err(StorageError::Unavailable(format!("{:?}", e))),
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

/// `setInterval` ticker. Every tick spawns its own poll future.
#[derive(Clone, Copy, Default)]
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    fn every(&self, period: Duration, task: PollTask) -> PollTimer {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        let interval = Interval::new(millis, move || {
            wasm_bindgen_futures::spawn_local(task());
        });
        PollTimer::new(move || drop(interval))
    }
}

/// Browser wall clock in the page's local time zone
#[derive(Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        offset_from_js_minutes(js_sys::Date::new_0().get_timezone_offset())
    }
}

/// `Date.getTimezoneOffset()` counts minutes *behind* UTC
fn offset_from_js_minutes(minutes: f64) -> FixedOffset {
    FixedOffset::west_opt((minutes * 60.0).round() as i32).unwrap_or_else(|| Utc.fix())
}

/// `document.body.classList`
#[derive(Clone, Copy, Default)]
pub struct BodyClassList;

impl BodyClassList {
    fn body() -> Option<web_sys::HtmlElement> {
        web_sys::window()?.document()?.body()
    }
}

impl ClassList for BodyClassList {
    fn add_class(&self, name: &str) {
        if let Some(body) = Self::body() {
            let _ = body.class_list().add_1(name);
        }
    }

    fn remove_class(&self, name: &str) {
        if let Some(body) = Self::body() {
            let _ = body.class_list().remove_1(name);
        }
    }
}

/// Publishes monitor snapshots into a signal
#[derive(Clone, Copy)]
pub struct SignalMonitorView {
    pub snapshot: RwSignal<MonitorSnapshot>,
}

impl MonitorView for SignalMonitorView {
    fn render(&self, snapshot: &MonitorSnapshot) {
        self.snapshot.set(snapshot.clone());
    }
}

/// Shows notices as toasts
#[derive(Clone)]
pub struct ToastNotifier {
    pub state: GlobalState,
}

impl Notifier for ToastNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
        self.state.show_success(message);
    }

    fn error(&self, message: &str) {
        tracing::warn!("{}", message);
        self.state.show_error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_offset_is_inverted() {
        // Indore, UTC+05:30
        assert_eq!(offset_from_js_minutes(-330.0).local_minus_utc(), 19800);
        assert_eq!(offset_from_js_minutes(300.0).local_minus_utc(), -18000);
        assert_eq!(offset_from_js_minutes(0.0).local_minus_utc(), 0);
    }

    #[test]
    fn test_absurd_offset_falls_back_to_utc() {
        assert_eq!(offset_from_js_minutes(1e9).local_minus_utc(), 0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use citycare::theme::{apply_theme, load_theme, save_theme};
    use citycare::Theme;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_keeps_theme() {
        let store = LocalStorageStore;
        save_theme(&store, Theme::Ocean);
        assert_eq!(load_theme(&store), Theme::Ocean);
        store.remove_item(citycare::storage::THEME_KEY).unwrap();
        assert_eq!(load_theme(&store), Theme::Default);
    }

    #[wasm_bindgen_test]
    fn body_carries_one_theme_class() {
        let body = BodyClassList;
        apply_theme(&body, Theme::Sunrise);
        apply_theme(&body, Theme::Ocean);

        let classes = BodyClassList::body().unwrap().class_name();
        assert!(classes.contains("theme-ocean"));
        assert!(!classes.contains("theme-sunrise"));
    }
}
