//! Global Application State
//!
//! Reactive state management using Leptos signals. Controllers publish into
//! these signals; components only read them.

use std::rc::Rc;

use leptos::*;

use citycare::{
    AuthSession, HeaderController, MonitorController, MonitorSnapshot, Theme, VitalsApi,
};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Latest monitor snapshot
    pub monitor: RwSignal<MonitorSnapshot>,
    /// Session from the header login form
    pub session: RwSignal<Option<AuthSession>>,
    /// Active theme
    pub theme: RwSignal<Theme>,
    /// Backend origin in use
    pub api_base: RwSignal<String>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Controllers shared by every page
#[derive(Clone)]
pub struct Services {
    pub api: Rc<dyn VitalsApi>,
    pub header: Rc<HeaderController>,
    pub monitor: Rc<MonitorController>,
}

/// Create the global state and provide it to the component tree
pub fn provide_global_state(api_base: String) -> GlobalState {
    let state = GlobalState {
        monitor: create_rw_signal(MonitorSnapshot::default()),
        session: create_rw_signal(None),
        theme: create_rw_signal(Theme::Default),
        api_base: create_rw_signal(api_base),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state.clone());
    state
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}
