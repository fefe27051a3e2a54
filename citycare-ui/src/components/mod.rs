//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod chart;
pub mod header;
pub mod toast;

pub use chart::Chart;
pub use header::Header;
pub use toast::Toast;
