//! Telemetry sources
//!
//! Everything the dashboard displays comes from one of three places:
//!
//! | Data | Module | Location |
//! |------|--------|----------|
//! | Sessions | [`sessions`] | `<claude_dir>/projects/*/sessions-index.json` |
//! | Daily activity | [`activity`] | `<claude_dir>/stats-cache.json` |
//! | VM status | [`process`] | process table, matched by command line |
//!
//! All fetches are fail-soft: unreadable or malformed inputs are logged and
//! degrade to empty results, never errors.

pub mod activity;
pub mod process;
pub mod sessions;

pub use process::ProcessProbe;

use crate::config::SourcesConfig;
use crate::types::{DailyActivity, SessionEntry, VmStatus};
use std::path::{Path, PathBuf};

/// Where the cache layer gets fresh values from.
///
/// Implementations must be callable from background threads.
pub trait DataSource: Send + Sync {
    /// Current status of the monitored process.
    fn vm_status(&self) -> VmStatus;

    /// All sessions from every sessions index.
    fn sessions(&self) -> Vec<SessionEntry>;

    /// Daily activity counters, oldest first.
    fn daily_activity(&self) -> Vec<DailyActivity>;
}

/// Production source reading the Claude directory and the process table.
pub struct FileSource {
    claude_dir: PathBuf,
    probe: ProcessProbe,
}

impl FileSource {
    pub fn new(claude_dir: impl Into<PathBuf>, process_pattern: impl Into<String>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
            probe: ProcessProbe::new(process_pattern),
        }
    }

    pub fn from_config(config: &SourcesConfig) -> Self {
        Self::new(config.claude_dir(), config.process_pattern.clone())
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }
}

impl DataSource for FileSource {
    fn vm_status(&self) -> VmStatus {
        self.probe.status()
    }

    fn sessions(&self) -> Vec<SessionEntry> {
        sessions::load_sessions(&self.claude_dir)
    }

    fn daily_activity(&self) -> Vec<DailyActivity> {
        activity::load_daily_activity(&self.claude_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_claude_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let source = FileSource::new(temp.path().join("nope"), "no-such-process-pattern-xyz");
        assert!(source.sessions().is_empty());
        assert!(source.daily_activity().is_empty());
        assert!(!source.vm_status().running);
    }

    #[test]
    fn test_from_config_uses_override() {
        let config = SourcesConfig {
            claude_dir: Some(PathBuf::from("/data/claude")),
            ..Default::default()
        };
        let source = FileSource::from_config(&config);
        assert_eq!(source.claude_dir(), Path::new("/data/claude"));
    }
}
