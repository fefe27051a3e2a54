//! Monitor Page
//!
//! Operator login, patient/statistic pickers, live readout and chart.

use leptos::*;

use citycare::{MonitorPhase, MonitorSnapshot, Statistic};

use crate::components::{Chart, Header};
use crate::state::{GlobalState, Services};

/// Monitor page component
#[component]
pub fn Monitor() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let services = use_context::<Services>().expect("Services not found");
    let snapshot = state.monitor;
    let section_visible = section_visibility(snapshot);

    // Resume a saved selection without asking for credentials again
    let monitor = services.monitor.clone();
    spawn_local(async move {
        monitor.restore().await;
    });

    // Leaving the page stops the poll
    let monitor = services.monitor.clone();
    on_cleanup(move || monitor.stop());

    view! {
        <Header active="monitor" />
        <div class="container mx-auto px-4 py-8 space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Vitals Monitor"</h1>
                <p class="text-gray-400 mt-1">"Live sensor readings per patient"</p>
            </div>

            <OperatorLogin />

            {move || {
                if section_visible.get() {
                    view! { <MonitorSection /> }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </div>
    }
}

/// Changes only when the section appears or disappears, so polls never
/// rebuild the pickers
fn section_visibility(snapshot: RwSignal<MonitorSnapshot>) -> Memo<bool> {
    create_memo(move |_| snapshot.with(|s| s.section_visible))
}

#[component]
fn OperatorLogin() -> impl IntoView {
    let services = use_context::<Services>().expect("Services not found");
    let snapshot = use_context::<GlobalState>().expect("GlobalState not found").monitor;

    let (user, set_user) = create_signal(String::new());
    let (pin, set_pin) = create_signal(String::new());

    let on_login = move |_| {
        let monitor = services.monitor.clone();
        let (user, pin) = (user.get(), pin.get());
        spawn_local(async move {
            monitor.login(&user, &pin).await;
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Operator"</h2>
            <div class="flex flex-wrap items-center gap-2">
                <input
                    type="text"
                    placeholder="Doctor ID"
                    prop:value=move || user.get()
                    on:input=move |ev| set_user.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <input
                    type="password"
                    placeholder="PIN"
                    prop:value=move || pin.get()
                    on:input=move |ev| set_pin.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=on_login
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Login"
                </button>
                {move || {
                    snapshot.with(|s| s.user.clone()).map(|user| view! {
                        <span class="text-sm text-gray-400">{format!("Operator: {}", user)}</span>
                    })
                }}
            </div>
        </section>
    }
}

#[component]
fn MonitorSection() -> impl IntoView {
    let services = use_context::<Services>().expect("Services not found");
    let snapshot = use_context::<GlobalState>().expect("GlobalState not found").monitor;

    // Memos keep the selects from being rebuilt by readout and chart updates
    let options = create_memo(move |_| snapshot.with(|s| s.patients.options()));
    let saved_patient = create_memo(move |_| {
        snapshot.with(|s| {
            s.selected_patient
                .clone()
                .or_else(|| s.patients.first().map(str::to_string))
        })
    });
    let saved_stat = create_memo(move |_| snapshot.with(|s| s.selected_stat));
    let polling = create_memo(move |_| snapshot.with(|s| s.phase == MonitorPhase::Polling));

    // Pickers default to the saved selection, then to the first option
    let (patient, set_patient) = create_signal(None::<String>);
    let (stat, set_stat) = create_signal(None::<Statistic>);
    let chosen_patient = move || patient.get().or_else(|| saved_patient.get());
    let chosen_stat = move || {
        stat.get()
            .or_else(|| saved_stat.get())
            .or(Some(Statistic::HeartRate))
    };

    let start_monitor = services.monitor.clone();
    let on_start = move |_| {
        let monitor = start_monitor.clone();
        let (patient, stat) = (chosen_patient(), chosen_stat());
        spawn_local(async move {
            monitor.start(patient.as_deref(), stat).await;
        });
    };

    let stop_monitor = services.monitor.clone();
    let on_stop = move |_| stop_monitor.stop();

    let stat_options = Statistic::ALL
        .iter()
        .map(|&s| {
            view! {
                <option value=s.as_str() selected=move || chosen_stat() == Some(s)>
                    {s.display_name()}
                </option>
            }
        })
        .collect_view();

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-6">
            <div class="flex flex-wrap items-center gap-2">
                <select
                    on:change=move |ev| set_patient.set(Some(event_target_value(&ev)))
                    class="bg-gray-700 rounded-lg px-4 py-3 border border-gray-600"
                >
                    {move || {
                        let current = chosen_patient();
                        options.get()
                            .into_iter()
                            .map(|option| {
                                let selected = current.as_deref() == Some(option.value.as_str());
                                view! {
                                    <option value=option.value disabled=option.disabled selected=selected>
                                        {option.label}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>

                <select
                    on:change=move |ev| set_stat.set(event_target_value(&ev).parse().ok())
                    class="bg-gray-700 rounded-lg px-4 py-3 border border-gray-600"
                >
                    {stat_options}
                </select>

                <button
                    on:click=on_start
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Start"
                </button>
                <button
                    on:click=on_stop
                    disabled=move || !polling.get()
                    class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700 rounded-lg font-medium transition-colors"
                >
                    "Stop"
                </button>
            </div>

            <div class="flex items-baseline space-x-4">
                <span class="text-sm text-gray-400">"Live"</span>
                <span id="live_value" class="text-4xl font-bold">
                    {move || snapshot.with(|s| s.readout.to_string())}
                </span>
            </div>

            <Chart />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use citycare::Readout;

    use super::*;

    #[test]
    fn test_readout_updates_do_not_rebuild_section() {
        let runtime = create_runtime();
        let snapshot = create_rw_signal(MonitorSnapshot::default());
        let visible = section_visibility(snapshot);
        let builds = Rc::new(Cell::new(0));
        let counter = Rc::clone(&builds);
        let section = create_memo(move |_| {
            counter.set(counter.get() + 1);
            visible.get()
        });

        assert!(!section.get());
        snapshot.update(|s| s.section_visible = true);
        assert!(section.get());
        assert_eq!(builds.get(), 2);

        snapshot.update(|s| {
            s.readout = Readout::Value {
                value: 72.0,
                unit: "bpm".to_string(),
            }
        });
        snapshot.update(|s| s.readout = Readout::Unavailable);
        assert!(section.get());
        assert_eq!(builds.get(), 2);

        runtime.dispose();
    }
}
