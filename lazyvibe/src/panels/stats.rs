use chrono::{DateTime, Local};
use lazyvibe_core::{ActivityMetric, DashboardData, TimeRange};

use super::Panel;
use crate::sparkline::MAX_POINTS;

/// Totals over the time-range-filtered snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub projects: usize,
    pub sessions: usize,
    pub messages: i64,
    pub tools: i64,
    pub tokens: i64,
    /// Daily messages, most recent last.
    pub trend: Vec<i64>,
}

impl StatsSummary {
    pub fn from_snapshot(data: &DashboardData, range: TimeRange, now: DateTime<Local>) -> Self {
        let sessions = data.filter_sessions(range, now);
        let projects = data.filter_projects(range, now);
        let days = data.filter_daily_activity(range, now);
        let recent = &days[days.len().saturating_sub(MAX_POINTS)..];

        Self {
            projects: projects.len(),
            sessions: sessions.len(),
            messages: sessions.iter().map(|s| s.message_count).sum(),
            tools: days.iter().map(|d| d.tool_call_count).sum(),
            tokens: days.iter().map(|d| d.token_count).sum(),
            trend: recent
                .iter()
                .map(|d| ActivityMetric::Messages.value(d))
                .collect(),
        }
    }

    pub fn trend_total(&self) -> i64 {
        self.trend.iter().sum()
    }

    pub fn trend_average(&self) -> i64 {
        if self.trend.is_empty() {
            0
        } else {
            self.trend_total() / self.trend.len() as i64
        }
    }

    pub fn trend_peak(&self) -> i64 {
        self.trend.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct StatsPanel {
    focused: bool,
    time_range: TimeRange,
    summary: Option<StatsSummary>,
}

impl StatsPanel {
    pub fn update(&mut self, data: &DashboardData, range: TimeRange, now: DateTime<Local>) {
        self.time_range = range;
        self.summary = Some(StatsSummary::from_snapshot(data, range, now));
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// `None` until the first snapshot arrives.
    pub fn summary(&self) -> Option<&StatsSummary> {
        self.summary.as_ref()
    }
}

impl Panel for StatsPanel {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
