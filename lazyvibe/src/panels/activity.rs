use chrono::NaiveDate;
use lazyvibe_core::{ActivityMetric, DailyActivity, TimeRange};

use super::{Keybinding, Panel};
use crate::heatmap::{self, Heatmap};

#[derive(Debug)]
pub struct ActivityPanel {
    focused: bool,
    metric: ActivityMetric,
    time_range: TimeRange,
    days: Option<Vec<DailyActivity>>,
    height: u16,
}

impl Default for ActivityPanel {
    fn default() -> Self {
        Self {
            focused: false,
            metric: ActivityMetric::Messages,
            time_range: TimeRange::All,
            days: None,
            height: 20,
        }
    }
}

impl ActivityPanel {
    pub fn update(&mut self, days: Vec<DailyActivity>, range: TimeRange) {
        self.days = Some(days);
        self.time_range = range;
    }

    pub fn metric(&self) -> ActivityMetric {
        self.metric
    }

    pub fn cycle_metric(&mut self) {
        self.metric = self.metric.next();
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn is_loaded(&self) -> bool {
        self.days.is_some()
    }

    pub fn has_data(&self) -> bool {
        self.days.as_ref().is_some_and(|d| !d.is_empty())
    }

    pub fn heatmap(&self, today: NaiveDate) -> Heatmap {
        let days = self.days.as_deref().unwrap_or_default();
        heatmap::build(days, self.metric, today, heatmap::weeks_for_height(self.height))
    }
}

impl Panel for ActivityPanel {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![Keybinding::new("m", "metric")]
    }

    fn set_height(&mut self, height: u16) {
        self.height = height;
    }
}
