//! Header Component
//!
//! Brand, navigation, theme buttons and the login form.

use leptos::*;

use citycare::Theme;

use crate::state::{GlobalState, Services};

/// Page header. `active` is the nav token to highlight.
#[component]
pub fn Header(#[prop(default = "")] active: &'static str) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let services = use_context::<Services>().expect("Services not found");

    let model = services.header.mount(active);
    state.theme.set(services.header.theme());

    let links = model
        .links
        .into_iter()
        .map(|link| {
            let class = if link.active {
                "px-3 py-2 rounded-lg bg-gray-700 text-white"
            } else {
                "px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            };
            view! { <a href=link.href class=class>{link.label}</a> }
        })
        .collect_view();

    let theme_buttons = model
        .themes
        .into_iter()
        .map(|button| view! { <ThemeButton theme=button.theme label=button.label /> })
        .collect_view();

    view! {
        <header class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4 flex flex-wrap items-center justify-between gap-4 py-3">
                <a href="/" class="text-xl font-bold text-white">{model.brand}</a>

                <nav class="nav flex items-center space-x-1">{links}</nav>

                <div class="flex items-center space-x-2">{theme_buttons}</div>

                <LoginForm
                    user_placeholder=model.user_placeholder
                    pin_placeholder=model.pin_placeholder
                />
            </div>
        </header>
    }
}

#[component]
fn ThemeButton(theme: Theme, label: &'static str) -> impl IntoView {
    let current = use_context::<GlobalState>().expect("GlobalState not found").theme;
    let services = use_context::<Services>().expect("Services not found");

    let on_click = move |_| {
        let applied = services.header.set_theme(theme.as_str());
        current.set(applied);
    };

    view! {
        <button
            on:click=on_click
            class=move || {
                let base = "px-3 py-1 rounded-lg text-sm transition-colors";
                if current.get() == theme {
                    format!("{} bg-primary-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {label}
        </button>
    }
}

#[component]
fn LoginForm(user_placeholder: &'static str, pin_placeholder: &'static str) -> impl IntoView {
    let session = use_context::<GlobalState>().expect("GlobalState not found").session;
    let services = use_context::<Services>().expect("Services not found");

    let (user, set_user) = create_signal(String::new());
    let (pin, set_pin) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_login = move |_| {
        let header = services.header.clone();
        let (user, pin) = (user.get(), pin.get());
        set_submitting.set(true);
        spawn_local(async move {
            match header.login(&user, &pin).await {
                Ok(logged_in) => session.set(Some(logged_in)),
                // Already surfaced as a toast
                Err(e) => tracing::debug!("Login not completed: {}", e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center space-x-2">
            {move || {
                session.get().map(|session| view! {
                    <span class="text-sm text-gray-400" title=session.alert_audience()>
                        {session.display_identity()}
                    </span>
                })
            }}
            <input
                type="text"
                placeholder=user_placeholder
                prop:value=move || user.get()
                on:input=move |ev| set_user.set(event_target_value(&ev))
                class="w-44 bg-gray-700 rounded-lg px-3 py-2 border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
            <input
                type="password"
                placeholder=pin_placeholder
                prop:value=move || pin.get()
                on:input=move |ev| set_pin.set(event_target_value(&ev))
                class="w-20 bg-gray-700 rounded-lg px-3 py-2 border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
            <button
                on:click=on_login
                disabled=move || submitting.get()
                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700 rounded-lg font-medium transition-colors"
            >
                "Login"
            </button>
        </div>
    }
}
