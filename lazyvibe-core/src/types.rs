//! Core domain types for lazyvibe
//!
//! These types are the plain records the dashboard works with. They are
//! produced by the [`crate::source`] parsers, held by the [`crate::cache`]
//! layer and combined into one immutable [`DashboardData`] snapshot per
//! refresh cycle.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Session** | One coding-assistant conversation recorded in a sessions index |
//! | **Project** | All sessions that share a project path |
//! | **Daily activity** | Per-day counters from the assistant's stats cache |
//! | **VM** | The monitored background process (Claude Desktop's virtual machine) |
//! | **Snapshot** | One [`DashboardData`] produced by a single refresh cycle |

use chrono::{DateTime, Duration, Local, Months, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;

// ============================================
// VM status
// ============================================

/// Status of the monitored background process.
///
/// Optional metrics are `None` when they could not be measured, which is
/// different from a measured zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VmStatus {
    pub running: bool,
    pub pid: Option<u32>,
    pub cpu_percent: Option<f64>,
    pub memory_mb: Option<f64>,
}

impl VmStatus {
    /// A well-formed "not running" status.
    pub fn not_running() -> Self {
        Self::default()
    }
}

// ============================================
// Sessions
// ============================================

/// A single coding-assistant session from a sessions index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEntry {
    pub session_id: String,
    pub project_path: String,
    pub project_name: String,
    pub summary: String,
    pub message_count: i64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub git_branch: Option<String>,
}

impl SessionEntry {
    /// Session duration (`modified - created`), never negative.
    pub fn duration(&self) -> Duration {
        let d = self.modified.signed_duration_since(self.created);
        if d < Duration::zero() {
            Duration::zero()
        } else {
            d
        }
    }

    /// Human-readable duration, e.g. `<1m`, `42m`, `3h`, `1h5m`.
    pub fn format_duration(&self) -> String {
        let d = self.duration();
        if d < Duration::minutes(1) {
            return "<1m".to_string();
        }
        if d < Duration::hours(1) {
            return format!("{}m", d.num_minutes());
        }
        let hours = d.num_hours();
        let mins = d.num_minutes() % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h{}m", hours, mins)
        }
    }
}

// ============================================
// Daily activity
// ============================================

/// Activity counters for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub message_count: i64,
    pub session_count: i64,
    pub tool_call_count: i64,
    /// Estimated, not measured. See [`DailyActivity::estimate_tokens`].
    pub token_count: i64,
}

impl DailyActivity {
    /// Build a day record, deriving the token estimate from the counters.
    pub fn new(date: NaiveDate, message_count: i64, session_count: i64, tool_call_count: i64) -> Self {
        Self {
            date,
            message_count,
            session_count,
            tool_call_count,
            token_count: Self::estimate_tokens(message_count, tool_call_count),
        }
    }

    /// Rough token estimate: ~500 chars per message, ~200 per tool call,
    /// 4 chars per token.
    pub fn estimate_tokens(message_count: i64, tool_call_count: i64) -> i64 {
        (message_count * 500 + tool_call_count * 200) / 4
    }
}

/// Which daily counter a chart displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActivityMetric {
    #[default]
    Messages,
    Sessions,
    Tools,
    Tokens,
}

impl ActivityMetric {
    pub const ALL: [ActivityMetric; 4] = [
        ActivityMetric::Messages,
        ActivityMetric::Sessions,
        ActivityMetric::Tools,
        ActivityMetric::Tokens,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActivityMetric::Messages => "Messages",
            ActivityMetric::Sessions => "Sessions",
            ActivityMetric::Tools => "Tools",
            ActivityMetric::Tokens => "Tokens",
        }
    }

    /// The metric after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Read this metric from a day record.
    pub fn value(&self, day: &DailyActivity) -> i64 {
        match self {
            ActivityMetric::Messages => day.message_count,
            ActivityMetric::Sessions => day.session_count,
            ActivityMetric::Tools => day.tool_call_count,
            ActivityMetric::Tokens => day.token_count,
        }
    }
}

// ============================================
// Projects
// ============================================

/// Aggregate over all sessions sharing a project path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub project_name: String,
    pub project_path: String,
    pub session_count: i64,
    pub total_messages: i64,
    pub last_activity: DateTime<Utc>,
}

/// Group sessions by `project_path` into project summaries.
///
/// The result is ordered by most recent activity first.
pub fn aggregate_projects(sessions: &[SessionEntry]) -> Vec<ProjectSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut projects: Vec<ProjectSummary> = Vec::new();

    for session in sessions {
        match index.get(session.project_path.as_str()) {
            Some(&idx) => {
                let existing = &mut projects[idx];
                existing.session_count += 1;
                existing.total_messages += session.message_count;
                if session.modified > existing.last_activity {
                    existing.last_activity = session.modified;
                }
            }
            None => {
                index.insert(session.project_path.as_str(), projects.len());
                projects.push(ProjectSummary {
                    project_name: session.project_name.clone(),
                    project_path: session.project_path.clone(),
                    session_count: 1,
                    total_messages: session.message_count,
                    last_activity: session.modified,
                });
            }
        }
    }

    projects.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
    projects
}

// ============================================
// Time range
// ============================================

/// Time window applied to every panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::All,
        TimeRange::Today,
        TimeRange::Week,
        TimeRange::Month,
    ];

    /// Display name used in panel titles and the footer.
    pub fn name(&self) -> &'static str {
        match self {
            TimeRange::All => "All Time",
            TimeRange::Today => "Today",
            TimeRange::Week => "This Week",
            TimeRange::Month => "This Month",
        }
    }

    /// The range after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Lower bound of the window, or `None` for [`TimeRange::All`].
    pub fn start_time<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self {
            TimeRange::All => None,
            TimeRange::Today => {
                let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
                now.timezone().from_local_datetime(&midnight).earliest()
            }
            TimeRange::Week => Some(now.clone() - Duration::days(7)),
            TimeRange::Month => now.clone().checked_sub_months(Months::new(1)),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "today" => Ok(TimeRange::Today),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            _ => Err(format!("unknown time range: {}", s)),
        }
    }
}

// ============================================
// Dashboard snapshot
// ============================================

/// Everything the dashboard shows, produced atomically by one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub vm_status: VmStatus,
    pub sessions: Vec<SessionEntry>,
    pub daily_activity: Vec<DailyActivity>,
    pub projects: Vec<ProjectSummary>,
}

impl DashboardData {
    /// Build a snapshot, deriving projects from the given sessions.
    pub fn from_parts(
        vm_status: VmStatus,
        sessions: Vec<SessionEntry>,
        daily_activity: Vec<DailyActivity>,
    ) -> Self {
        let projects = aggregate_projects(&sessions);
        Self {
            vm_status,
            sessions,
            daily_activity,
            projects,
        }
    }

    pub fn total_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn total_messages(&self) -> i64 {
        self.sessions.iter().map(|s| s.message_count).sum()
    }

    pub fn total_tool_calls(&self) -> i64 {
        self.daily_activity.iter().map(|a| a.tool_call_count).sum()
    }

    pub fn total_tokens(&self) -> i64 {
        self.daily_activity.iter().map(|a| a.token_count).sum()
    }

    /// The last `n` days of activity (the source is ordered oldest first).
    pub fn last_n_days(&self, n: usize) -> &[DailyActivity] {
        let len = self.daily_activity.len();
        &self.daily_activity[len.saturating_sub(n)..]
    }

    /// Series of one metric over the last `n` days, most recent last.
    pub fn trend(&self, metric: ActivityMetric, n: usize) -> Vec<i64> {
        self.last_n_days(n).iter().map(|d| metric.value(d)).collect()
    }

    /// Sessions modified inside the time range.
    pub fn filter_sessions(&self, range: TimeRange, now: DateTime<Local>) -> Vec<SessionEntry> {
        match range.start_time(&now) {
            None => self.sessions.clone(),
            Some(start) => {
                let start = start.with_timezone(&Utc);
                self.sessions
                    .iter()
                    .filter(|s| s.modified > start)
                    .cloned()
                    .collect()
            }
        }
    }

    /// Projects with activity inside the time range.
    pub fn filter_projects(&self, range: TimeRange, now: DateTime<Local>) -> Vec<ProjectSummary> {
        match range.start_time(&now) {
            None => self.projects.clone(),
            Some(start) => {
                let start = start.with_timezone(&Utc);
                self.projects
                    .iter()
                    .filter(|p| p.last_activity > start)
                    .cloned()
                    .collect()
            }
        }
    }

    /// Days on or after the first day of the time range.
    pub fn filter_daily_activity(
        &self,
        range: TimeRange,
        now: DateTime<Local>,
    ) -> Vec<DailyActivity> {
        match range.start_time(&now) {
            None => self.daily_activity.clone(),
            Some(start) => {
                let start_date = start.date_naive();
                self.daily_activity
                    .iter()
                    .filter(|d| d.date >= start_date)
                    .cloned()
                    .collect()
            }
        }
    }
}
