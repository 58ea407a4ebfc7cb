use std::cmp::Ordering;

use lazyvibe_core::{SessionEntry, TimeRange};

use super::{list_keybindings, Keybinding, Panel};
use crate::list::{FilterList, Listable, SortField};

/// Only the most recently modified sessions are listed.
pub const MAX_SESSIONS: usize = 20;

const DEFAULT_VISIBLE_ROWS: usize = 5;

/// Borders, filter line and spare line.
const CHROME_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSort {
    Time,
    Messages,
    Project,
}

impl SortField for SessionSort {
    fn next(self) -> Self {
        match self {
            SessionSort::Time => SessionSort::Messages,
            SessionSort::Messages => SessionSort::Project,
            SessionSort::Project => SessionSort::Time,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SessionSort::Time => "Time",
            SessionSort::Messages => "Messages",
            SessionSort::Project => "Project",
        }
    }
}

impl Listable for SessionEntry {
    type Field = SessionSort;

    fn matches(&self, query: &str) -> bool {
        self.summary.to_lowercase().contains(query)
            || self.project_name.to_lowercase().contains(query)
    }

    fn compare(&self, other: &Self, field: SessionSort) -> Ordering {
        match field {
            SessionSort::Time => self.modified.cmp(&other.modified),
            SessionSort::Messages => self.message_count.cmp(&other.message_count),
            SessionSort::Project => self.project_name.cmp(&other.project_name),
        }
    }
}

#[derive(Debug)]
pub struct SessionsPanel {
    focused: bool,
    time_range: TimeRange,
    loaded: bool,
    list: FilterList<SessionEntry>,
}

impl Default for SessionsPanel {
    fn default() -> Self {
        Self {
            focused: false,
            time_range: TimeRange::All,
            loaded: false,
            list: FilterList::new(SessionSort::Time, true, DEFAULT_VISIBLE_ROWS),
        }
    }
}

impl SessionsPanel {
    /// Replace the listed sessions, keeping the newest [`MAX_SESSIONS`].
    pub fn update(&mut self, mut sessions: Vec<SessionEntry>, range: TimeRange) {
        sessions.sort_by(|a, b| b.modified.cmp(&a.modified));
        sessions.truncate(MAX_SESSIONS);
        self.loaded = true;
        self.time_range = range;
        self.list.set_items(sessions);
    }

    pub fn list(&self) -> &FilterList<SessionEntry> {
        &self.list
    }

    pub fn selected(&self) -> Option<&SessionEntry> {
        self.list.selected()
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Panel for SessionsPanel {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        list_keybindings(
            self.list.is_filter_mode(),
            &[
                Keybinding::new("y", "copy"),
                Keybinding::new("enter", "details"),
            ],
        )
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

    /// Two lines per session.
    fn set_height(&mut self, height: u16) {
        self.list
            .set_visible_rows(usize::from(height.saturating_sub(CHROME_ROWS) / 2));
    }
}
