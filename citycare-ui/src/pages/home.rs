//! Home Page
//!
//! Landing view with backend status and the way into the monitor.

use leptos::*;
use leptos_router::*;

use citycare::api::HealthResponse;
use citycare::VitalsApi;

use crate::components::Header;
use crate::state::{GlobalState, Services};

/// Home page component
#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let services = use_context::<Services>().expect("Services not found");

    let (health, set_health) = create_signal(None::<Result<HealthResponse, String>>);

    // Check the backend once on mount
    let loading = state.loading;
    create_effect(move |_| {
        let api = services.api.clone();
        spawn_local(async move {
            loading.set(true);
            match api.health().await {
                Ok(h) => set_health.set(Some(Ok(h))),
                Err(e) => {
                    tracing::warn!("Health check failed: {}", e);
                    set_health.set(Some(Err(e.to_string())));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <Header active="home" />
        <div class="container mx-auto px-4 py-8 space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"CityCare"</h1>
                <p class="text-gray-400 mt-1">"Clinical monitoring for Indore"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Backend"</h2>
                <p class="text-sm text-gray-400 mb-4">{move || state.api_base.get()}</p>
                {move || match health.get() {
                    None => view! { <div class="loading-spinner w-6 h-6" /> }.into_view(),
                    Some(Ok(h)) => view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <StatCard label="Patients" value=h.patients />
                            <StatCard label="Appointments" value=h.appointments />
                            <StatCard label="Alerts" value=h.alerts />
                            <StatCard label="Facilities" value=h.facilities />
                        </div>
                    }.into_view(),
                    Some(Err(e)) => view! {
                        <span class="text-red-400">{format!("✕ Unreachable: {}", e)}</span>
                    }.into_view(),
                }}
            </section>

            <A
                href="/monitor"
                class="inline-block px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Open Vitals Monitor"
            </A>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: usize) -> impl IntoView {
    view! {
        <div class="bg-gray-700 rounded-lg p-4">
            <div class="text-sm text-gray-400">{label}</div>
            <div class="text-2xl font-bold">{value}</div>
        </div>
    }
}
