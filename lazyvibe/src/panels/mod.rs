//! Dashboard panels.
//!
//! Each panel owns the view state for one quadrant. Key dispatch goes through
//! [`Panel`]; panels that have no list leave the cursor and filter methods at
//! their no-op defaults.

pub mod activity;
pub mod projects;
pub mod sessions;
pub mod stats;

pub use activity::ActivityPanel;
pub use projects::ProjectsPanel;
pub use sessions::SessionsPanel;
pub use stats::StatsPanel;

/// A key hint shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    pub key: &'static str,
    pub desc: &'static str,
}

impl Keybinding {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

pub trait Panel {
    fn set_focused(&mut self, focused: bool);

    fn is_focused(&self) -> bool;

    fn keybindings(&self) -> Vec<Keybinding> {
        Vec::new()
    }

    fn cursor_up(&mut self) {}

    fn cursor_down(&mut self) {}

    fn cursor_up_n(&mut self, _n: usize) {}

    fn cursor_down_n(&mut self, _n: usize) {}

    fn cursor_first(&mut self) {}

    fn cursor_last(&mut self) {}

    fn cycle_sort(&mut self) {}

    fn toggle_sort_direction(&mut self) {}

    fn is_filter_mode(&self) -> bool {
        false
    }

    /// `true` enters filter entry; `false` cancels and clears the query.
    fn set_filter_mode(&mut self, _enabled: bool) {}

    fn confirm_filter(&mut self) {}

    fn handle_filter_input(&mut self, _c: char) {}

    fn handle_filter_backspace(&mut self) {}

    /// Outer height of the panel, borders included.
    fn set_height(&mut self, _height: u16) {}
}

/// Footer bindings shared by the two list panels.
pub(crate) fn list_keybindings(filter_mode: bool, extra: &[Keybinding]) -> Vec<Keybinding> {
    if filter_mode {
        return vec![
            Keybinding::new("esc", "clear"),
            Keybinding::new("enter", "apply"),
        ];
    }
    let mut bindings = vec![
        Keybinding::new("s/S", "sort"),
        Keybinding::new("/", "filter"),
    ];
    bindings.extend_from_slice(extra);
    bindings
}
