//! CityCare Dashboard
//!
//! Browser front end for the CityCare clinical demo, built with Leptos (WASM).
//!
//! # Features
//!
//! - Shared header with login and persisted themes
//! - Live vitals monitor with a rolling 30-point chart
//! - Saved monitor selection resumed on reload
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The header and monitor logic lives in the `citycare` crate;
//! this crate supplies the browser implementations of its seams and the
//! components that render its snapshots.

use leptos::*;

mod api;
mod app;
mod components;
mod logging;
mod pages;
mod platform;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    logging::init();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
