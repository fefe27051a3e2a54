//! # CityCare
//!
//! Vitals dashboard core - session, theme and live patient monitoring for the
//! CityCare clinical demo backend.
//!
//! ## Features
//!
//! - **Header session**: Login against the backend, alert audience, themes
//! - **Live monitor**: History-seeded rolling chart, fixed-interval polling
//! - **Persistence**: `localStorage`-style key/value seam
//! - **Portable**: Same controllers drive the browser app and the terminal
//!
//! ## Modules
//!
//! - [`api`]: Backend contract and HTTP client
//! - [`header`]: Navigation header and login controller
//! - [`monitor`]: Chart window, poll timer and monitor controller
//! - [`storage`]: Key/value persistence
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use citycare::config::Config;
//! use citycare::monitor::*;
//! use citycare::{HttpVitalsApi, LogNotifier, MemoryStore};
//!
//! struct PrintView;
//!
//! impl MonitorView for PrintView {
//!     fn render(&self, snapshot: &MonitorSnapshot) {
//!         println!("{}", snapshot.readout);
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     let deps = MonitorDeps {
//!         api: Rc::new(HttpVitalsApi::new(&config.backend)?),
//!         store: Rc::new(MemoryStore::new()),
//!         clock: Rc::new(SystemClock),
//!         ticker: Rc::new(TokioTicker),
//!         view: Rc::new(PrintView),
//!         notifier: Rc::new(LogNotifier),
//!     };
//!
//!     let local = tokio::task::LocalSet::new();
//!     local
//!         .run_until(async {
//!             let monitor = MonitorController::new(deps, config.monitor.clone());
//!             monitor.login("USR_DOC_001", "1234").await;
//!             monitor.start(Some("PAT_001"), Some(Statistic::HeartRate)).await;
//!             tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//!             monitor.stop();
//!         })
//!         .await;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod header;
pub mod monitor;
pub mod notify;
pub mod session;
pub mod storage;
pub mod theme;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
#[cfg(feature = "native")]
pub use api::HttpVitalsApi;
pub use api::{ApiError, ApiResult, VitalsApi};

pub use config::{Config, ConfigError};

pub use header::{HeaderController, HeaderModel, LoginError, NavLink, ThemeButton};

pub use monitor::{
    ChartWindow, MonitorController, MonitorDeps, MonitorPhase, MonitorSnapshot, MonitorView,
    Readout, Statistic,
};

pub use notify::{LogNotifier, Notifier};
pub use session::{AuthSession, Session, UserInfo};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use theme::{ClassList, Theme};
