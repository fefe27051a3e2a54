//! App Root Component
//!
//! Main application component with routing, global providers and the
//! controllers wired to browser platform seams.

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use citycare::config::MonitorConfig;
use citycare::{HeaderController, MonitorController, MonitorDeps, MonitorPhase, VitalsApi};

use crate::api::GlooVitalsApi;
use crate::components::Toast;
use crate::pages::{Home, Monitor};
use crate::platform::{
    BodyClassList, BrowserClock, IntervalTicker, LocalStorageStore, SignalMonitorView,
    ToastNotifier,
};
use crate::state::global::{provide_global_state, GlobalState, Services};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let api = Rc::new(GlooVitalsApi::from_storage());
    let state = provide_global_state(api.base_url().to_string());
    let store = Rc::new(LocalStorageStore);
    let notifier = Rc::new(ToastNotifier {
        state: state.clone(),
    });

    let header = HeaderController::new(
        api.clone(),
        store.clone(),
        Rc::new(BodyClassList),
        notifier.clone(),
    );
    let monitor = MonitorController::new(
        MonitorDeps {
            api: api.clone(),
            store,
            clock: Rc::new(BrowserClock),
            ticker: Rc::new(IntervalTicker),
            view: Rc::new(SignalMonitorView {
                snapshot: state.monitor,
            }),
            notifier,
        },
        MonitorConfig::default(),
    );
    provide_context(Services {
        api,
        header: Rc::new(header),
        monitor,
    });

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Main content area
                <main class="flex-1 pb-24">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/monitor" view=Monitor />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with backend and poll status
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Footer component showing backend and poll status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let monitor = state.monitor;
    let api_base = state.api_base;
    let loading = state.loading;

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Poll status
                <div class="flex items-center space-x-2">
                    {move || {
                        if monitor.with(|s| s.phase == MonitorPhase::Polling) {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                    <span>"Live"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-gray-400">
                                    <span class="w-2 h-2 bg-gray-400 rounded-full" />
                                    <span>"Idle"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                // Last sample time
                <div class="text-gray-400">
                    {move || {
                        monitor.with(|s| {
                            s.chart
                                .as_ref()
                                .and_then(|c| c.latest())
                                .map(|p| format!("Last sample: {}", p.label))
                                .unwrap_or_else(|| format!("Backend: {}", api_base.get()))
                        })
                    }}
                </div>

                // Loading indicator
                {move || {
                    if loading.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Loading..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
