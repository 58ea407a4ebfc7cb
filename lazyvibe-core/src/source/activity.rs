//! Stats cache parser (`<claude_dir>/stats-cache.json`)

use crate::error::{Error, Result};
use crate::types::DailyActivity;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawStatsCache {
    daily_activity: Vec<RawDay>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawDay {
    date: String,
    message_count: i64,
    session_count: i64,
    tool_call_count: i64,
}

/// Parse stats cache text into days sorted oldest first.
///
/// Days whose date isn't `YYYY-MM-DD` are dropped.
pub fn parse_stats_cache(content: &str) -> Result<Vec<DailyActivity>> {
    let raw: RawStatsCache = serde_json::from_str(content)?;

    let mut days: Vec<DailyActivity> = raw
        .daily_activity
        .into_iter()
        .filter_map(|day| match NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") {
            Ok(date) => Some(DailyActivity::new(
                date,
                day.message_count,
                day.session_count,
                day.tool_call_count,
            )),
            Err(_) => {
                tracing::warn!(date = %day.date, "Skipping activity entry with bad date");
                None
            }
        })
        .collect();

    days.sort_by_key(|d| d.date);
    Ok(days)
}

/// Read and parse a stats cache file.
pub fn parse_stats_file(path: &Path) -> Result<Vec<DailyActivity>> {
    let content = std::fs::read_to_string(path)?;
    parse_stats_cache(&content).map_err(|e| Error::Parse {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load daily activity, degrading to nothing when the file is absent or bad.
pub fn load_daily_activity(claude_dir: &Path) -> Vec<DailyActivity> {
    let path = claude_dir.join("stats-cache.json");
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No stats cache");
        return Vec::new();
    }

    match parse_stats_file(&path) {
        Ok(days) => days,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping stats cache");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sorts_and_estimates_tokens() {
        let json = r#"{"dailyActivity": [
            {"date": "2024-06-02", "messageCount": 4, "sessionCount": 1, "toolCallCount": 10},
            {"date": "2024-06-01", "messageCount": 8, "sessionCount": 2, "toolCallCount": 0}
        ]}"#;

        let days = parse_stats_cache(json).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(days[0].token_count, 1000);
        assert_eq!(days[1].token_count, (4 * 500 + 10 * 200) / 4);
    }

    #[test]
    fn test_bad_dates_are_skipped() {
        let json = r#"{"dailyActivity": [
            {"date": "June 1st", "messageCount": 1},
            {"date": "2024-06-01", "messageCount": 2}
        ]}"#;
        let days = parse_stats_cache(json).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].message_count, 2);
    }

    #[test]
    fn test_missing_field_is_empty() {
        assert!(parse_stats_cache("{}").unwrap().is_empty());
    }

    #[test]
    fn test_load_degrades_on_garbage() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("stats-cache.json"), "][").unwrap();
        assert!(load_daily_activity(temp.path()).is_empty());
        assert!(load_daily_activity(&temp.path().join("missing")).is_empty());
    }
}
