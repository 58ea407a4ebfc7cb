//! Sessions index parser
//!
//! Each project directory under `<claude_dir>/projects/` may hold a
//! `sessions-index.json`. Two shapes are accepted: an object with an
//! `entries` array, or a bare array of entries.
//!
//! Missing fields use defaults via `#[serde(default)]`, and a timestamp that
//! can't be parsed falls back to the current instant. A file that can't be
//! read or decoded is skipped with a warning; the other files still count.

use crate::error::{Error, Result};
use crate::types::SessionEntry;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Summaries longer than this are cut.
pub const MAX_SUMMARY_CHARS: usize = 100;

// ============================================
// Raw JSON types (serde deserialization)
// ============================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Wrapped {
        #[serde(default)]
        entries: Vec<RawEntry>,
    },
    Bare(Vec<RawEntry>),
}

impl RawIndex {
    fn into_entries(self) -> Vec<RawEntry> {
        match self {
            RawIndex::Wrapped { entries } => entries,
            RawIndex::Bare(entries) => entries,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawEntry {
    session_id: String,
    project_path: String,
    summary: String,
    first_prompt: String,
    message_count: i64,
    created: String,
    modified: String,
    git_branch: Option<String>,
}

impl RawEntry {
    fn into_session(self, now: DateTime<Utc>) -> SessionEntry {
        let summary = if self.summary.is_empty() {
            self.first_prompt
        } else {
            self.summary
        };

        SessionEntry {
            project_name: project_name(&self.project_path),
            session_id: self.session_id,
            project_path: self.project_path,
            summary: summary.chars().take(MAX_SUMMARY_CHARS).collect(),
            message_count: self.message_count,
            created: parse_timestamp(&self.created).unwrap_or(now),
            modified: parse_timestamp(&self.modified).unwrap_or(now),
            git_branch: self.git_branch,
        }
    }
}

// ============================================
// Public API
// ============================================

/// Find every sessions index under `<claude_dir>/projects/`.
pub fn index_files(claude_dir: &Path) -> Vec<PathBuf> {
    let pattern = claude_dir
        .join("projects")
        .join("*")
        .join("sessions-index.json");

    let Some(pattern) = pattern.to_str() else {
        tracing::warn!(path = %claude_dir.display(), "Claude directory is not valid UTF-8");
        return Vec::new();
    };

    match glob::glob(pattern) {
        Ok(paths) => {
            let mut files: Vec<PathBuf> = paths.filter_map(|p| p.ok()).collect();
            files.sort();
            files
        }
        Err(e) => {
            tracing::warn!(error = %e, "Invalid sessions index pattern");
            Vec::new()
        }
    }
}

/// Parse one sessions index file.
pub fn parse_index_file(path: &Path) -> Result<Vec<SessionEntry>> {
    let content = std::fs::read_to_string(path)?;
    parse_index(&content).map_err(|e| Error::Parse {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Parse the text of a sessions index.
pub fn parse_index(content: &str) -> Result<Vec<SessionEntry>> {
    let raw: RawIndex = serde_json::from_str(content)?;
    let now = Utc::now();
    Ok(raw
        .into_entries()
        .into_iter()
        .map(|entry| entry.into_session(now))
        .collect())
}

/// Load sessions from every index under the Claude directory.
pub fn load_sessions(claude_dir: &Path) -> Vec<SessionEntry> {
    let mut sessions = Vec::new();

    for path in index_files(claude_dir) {
        match parse_index_file(&path) {
            Ok(mut parsed) => sessions.append(&mut parsed),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping sessions index");
            }
        }
    }

    tracing::debug!(count = sessions.len(), "Loaded sessions");
    sessions
}

/// Last path component, or "Unknown" when there isn't one.
pub fn project_name(project_path: &str) -> String {
    Path::new(project_path)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Parse an RFC 3339 or naive ISO-8601 timestamp (naive values are UTC).
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .map(|naive| naive.and_utc())
}
