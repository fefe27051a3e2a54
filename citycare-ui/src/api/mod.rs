//! API Module
//!
//! Browser HTTP client for the CityCare backend.

pub mod client;

pub use client::{get_api_base, GlooVitalsApi};
