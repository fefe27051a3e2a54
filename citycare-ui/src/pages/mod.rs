//! Pages
//!
//! Top-level page components for each route.

pub mod home;
pub mod monitor;

pub use home::Home;
pub use monitor::Monitor;
