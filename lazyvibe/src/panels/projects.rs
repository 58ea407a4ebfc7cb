use std::cmp::Ordering;

use lazyvibe_core::{ProjectSummary, TimeRange};

use super::{list_keybindings, Keybinding, Panel};
use crate::list::{FilterList, Listable, SortField};

/// Rows before the first layout pass.
const DEFAULT_VISIBLE_ROWS: usize = 10;

/// Borders, filter line, column header and separator.
const CHROME_ROWS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSort {
    Activity,
    Name,
    Sessions,
    Messages,
}

impl SortField for ProjectSort {
    fn next(self) -> Self {
        match self {
            ProjectSort::Activity => ProjectSort::Name,
            ProjectSort::Name => ProjectSort::Sessions,
            ProjectSort::Sessions => ProjectSort::Messages,
            ProjectSort::Messages => ProjectSort::Activity,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ProjectSort::Activity => "Activity",
            ProjectSort::Name => "Name",
            ProjectSort::Sessions => "Sessions",
            ProjectSort::Messages => "Messages",
        }
    }
}

impl Listable for ProjectSummary {
    type Field = ProjectSort;

    fn matches(&self, query: &str) -> bool {
        self.project_name.to_lowercase().contains(query)
    }

    fn compare(&self, other: &Self, field: ProjectSort) -> Ordering {
        match field {
            ProjectSort::Activity => self.last_activity.cmp(&other.last_activity),
            ProjectSort::Name => self.project_name.cmp(&other.project_name),
            ProjectSort::Sessions => self.session_count.cmp(&other.session_count),
            ProjectSort::Messages => self.total_messages.cmp(&other.total_messages),
        }
    }
}

#[derive(Debug)]
pub struct ProjectsPanel {
    focused: bool,
    time_range: TimeRange,
    loaded: bool,
    list: FilterList<ProjectSummary>,
}

impl Default for ProjectsPanel {
    fn default() -> Self {
        Self {
            focused: false,
            time_range: TimeRange::All,
            loaded: false,
            list: FilterList::new(ProjectSort::Activity, true, DEFAULT_VISIBLE_ROWS),
        }
    }
}

impl ProjectsPanel {
    pub fn update(&mut self, projects: Vec<ProjectSummary>, range: TimeRange) {
        self.loaded = true;
        self.time_range = range;
        self.list.set_items(projects);
    }

    pub fn list(&self) -> &FilterList<ProjectSummary> {
        &self.list
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Panel for ProjectsPanel {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        list_keybindings(self.list.is_filter_mode(), &[])
    }

    fn cursor_up(&mut self) {
        self.list.up();
    }

    fn cursor_down(&mut self) {
        self.list.down();
    }

    fn cursor_up_n(&mut self, n: usize) {
        self.list.up_n(n);
    }

    fn cursor_down_n(&mut self, n: usize) {
        self.list.down_n(n);
    }

    fn cursor_first(&mut self) {
        self.list.first();
    }

    fn cursor_last(&mut self) {
        self.list.last();
    }

    fn cycle_sort(&mut self) {
        self.list.cycle_sort();
    }

    fn toggle_sort_direction(&mut self) {
        self.list.toggle_sort_direction();
    }

    fn is_filter_mode(&self) -> bool {
        self.list.is_filter_mode()
    }

    fn set_filter_mode(&mut self, enabled: bool) {
        if enabled {
            self.list.enter_filter();
        } else {
            self.list.cancel_filter();
        }
    }

    fn confirm_filter(&mut self) {
        self.list.confirm_filter();
    }

    fn handle_filter_input(&mut self, c: char) {
        self.list.push_char(c);
    }

    fn handle_filter_backspace(&mut self) {
        self.list.backspace();
    }

    fn set_height(&mut self, height: u16) {
        self.list
            .set_visible_rows(usize::from(height.saturating_sub(CHROME_ROWS)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn project(name: &str, sessions: i64, messages: i64, day: u32) -> ProjectSummary {
        ProjectSummary {
            project_name: name.to_string(),
            project_path: format!("/code/{name}"),
            session_count: sessions,
            total_messages: messages,
            last_activity: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
        }
    }

    fn names(panel: &ProjectsPanel) -> Vec<String> {
        panel
            .list()
            .items()
            .iter()
            .map(|p| p.project_name.clone())
            .collect()
    }

    fn panel() -> ProjectsPanel {
        let mut panel = ProjectsPanel::default();
        panel.update(
            vec![
                project("web", 2, 40, 3),
                project("API Gateway", 5, 10, 9),
                project("cli", 1, 90, 6),
            ],
            TimeRange::All,
        );
        panel
    }

    #[test]
    fn test_default_sort_is_most_recent_first() {
        let panel = panel();
        assert_eq!(names(&panel), vec!["API Gateway", "cli", "web"]);
        assert_eq!(panel.list().sort_label(), "Activity ↓");
    }

    #[test]
    fn test_cycle_sort_fields() {
        let mut panel = panel();
        panel.cycle_sort();
        assert_eq!(panel.list().sort_field(), ProjectSort::Name);
        panel.cycle_sort();
        assert_eq!(names(&panel), vec!["API Gateway", "web", "cli"]);
        panel.cycle_sort();
        assert_eq!(names(&panel), vec!["cli", "web", "API Gateway"]);
        panel.toggle_sort_direction();
        assert_eq!(names(&panel), vec!["API Gateway", "web", "cli"]);
    }

    #[test]
    fn test_filter_matches_project_name() {
        let mut panel = panel();
        panel.set_filter_mode(true);
        for c in "api".chars() {
            panel.handle_filter_input(c);
        }
        assert_eq!(names(&panel), vec!["API Gateway"]);
        assert_eq!(
            panel.keybindings(),
            vec![Keybinding::new("esc", "clear"), Keybinding::new("enter", "apply")]
        );
        panel.set_filter_mode(false);
        assert_eq!(panel.list().len(), 3);
    }

    #[test]
    fn test_visible_rows_follow_height() {
        let mut panel = panel();
        panel.set_height(8);
        assert_eq!(panel.list().cursor().visible_rows(), 2);
        panel.cursor_last();
        assert_eq!(panel.list().cursor().offset(), 1);
    }
}
