//! State Management
//!
//! Signals shared across the component tree and the controllers behind them.

pub mod global;

pub use global::{provide_global_state, GlobalState, Services};
