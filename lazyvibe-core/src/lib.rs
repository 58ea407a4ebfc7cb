//! # lazyvibe-core
//!
//! Core library for lazyvibe - a terminal dashboard for coding-assistant usage.
//!
//! This library provides:
//! - Domain types for sessions, daily activity, projects and the monitored VM
//! - Parsers for the on-disk session index and stats cache files
//! - A TTL cache that sits between the dashboard and its data sources
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data flow
//!
//! - **Sources:** JSON files under the Claude directory plus a process probe
//! - **Cache:** one entry per kind, each with its own time-to-live
//! - **Snapshot:** an immutable [`DashboardData`] handed to the UI
//!
//! ## Example
//!
//! ```rust,no_run
//! use lazyvibe_core::{CacheStore, Config, FileSource};
//!
//! let config = Config::load().expect("failed to load config");
//! let store = CacheStore::new(FileSource::from_config(&config.sources));
//! let snapshot = store.dashboard(false);
//! println!("{} sessions", snapshot.total_sessions());
//! ```

// Re-export commonly used items at the crate root
pub use cache::{CacheStore, Clock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use source::{DataSource, FileSource};
pub use types::*;

// Public modules
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod source;
pub mod types;
