//! Panel focus and dashboard geometry.
//!
//! The four panels sit in a 2x2 grid:
//!
//! ```text
//! +----------+---------------------+
//! | 1 Stats  | 3 Projects          |
//! +----------+---------------------+
//! | 2 Activ. | 4 Sessions          |
//! +----------+---------------------+
//! ```
//!
//! Tab order follows the panel numbers; `h`/`l` move within a grid row.

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Stats,
    Activity,
    Projects,
    Sessions,
}

const GRID: [[PanelId; 2]; 2] = [
    [PanelId::Stats, PanelId::Projects],
    [PanelId::Activity, PanelId::Sessions],
];

impl PanelId {
    pub const ALL: [PanelId; 4] = [
        PanelId::Stats,
        PanelId::Activity,
        PanelId::Projects,
        PanelId::Sessions,
    ];

    pub fn index(self) -> usize {
        match self {
            PanelId::Stats => 0,
            PanelId::Activity => 1,
            PanelId::Projects => 2,
            PanelId::Sessions => 3,
        }
    }

    /// Panel for a numeric jump key (`'1'..='4'`).
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(PanelId::Stats),
            '2' => Some(PanelId::Activity),
            '3' => Some(PanelId::Projects),
            '4' => Some(PanelId::Sessions),
            _ => None,
        }
    }

    /// The jump key shown in the panel title.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            PanelId::Stats => "Stats",
            PanelId::Activity => "Activity",
            PanelId::Projects => "Projects",
            PanelId::Sessions => "Sessions",
        }
    }

    fn grid_position(self) -> (usize, usize) {
        for (row, panels) in GRID.iter().enumerate() {
            if let Some(col) = panels.iter().position(|p| *p == self) {
                return (row, col);
            }
        }
        (0, 0)
    }
}

/// Which panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    current: PanelId,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            current: PanelId::Stats,
        }
    }
}

impl Focus {
    pub fn current(&self) -> PanelId {
        self.current
    }

    pub fn is_focused(&self, panel: PanelId) -> bool {
        self.current == panel
    }

    pub fn jump(&mut self, panel: PanelId) {
        self.current = panel;
    }

    pub fn next(&mut self) {
        self.current = PanelId::ALL[(self.current.index() + 1) % PanelId::ALL.len()];
    }

    pub fn previous(&mut self) {
        let len = PanelId::ALL.len();
        self.current = PanelId::ALL[(self.current.index() + len - 1) % len];
    }

    /// Move one column left within the grid row; no-op at the edge.
    pub fn left(&mut self) {
        let (row, col) = self.current.grid_position();
        if col > 0 {
            self.current = GRID[row][col - 1];
        }
    }

    /// Move one column right within the grid row; no-op at the edge.
    pub fn right(&mut self) {
        let (row, col) = self.current.grid_position();
        if col + 1 < GRID[row].len() {
            self.current = GRID[row][col + 1];
        }
    }
}

/// Screen geometry shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardLayout {
    pub width: u16,
    pub height: u16,
}

impl DashboardLayout {
    pub const HEADER_HEIGHT: u16 = 1;
    pub const FOOTER_HEIGHT: u16 = 1;

    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn content_height(&self) -> u16 {
        self.height
            .saturating_sub(Self::HEADER_HEIGHT + Self::FOOTER_HEIGHT)
    }

    /// Left column is 35% of the width.
    pub fn left_width(&self) -> u16 {
        (u32::from(self.width) * 35 / 100) as u16
    }

    /// Top row is 35% of the content height.
    pub fn top_height(&self) -> u16 {
        (u32::from(self.content_height()) * 35 / 100) as u16
    }

    pub fn header(&self) -> Rect {
        Rect::new(0, 0, self.width, Self::HEADER_HEIGHT.min(self.height))
    }

    pub fn footer(&self) -> Rect {
        let y = self.height.saturating_sub(Self::FOOTER_HEIGHT);
        Rect::new(0, y, self.width, Self::FOOTER_HEIGHT.min(self.height))
    }

    pub fn panel(&self, id: PanelId) -> Rect {
        let left = self.left_width();
        let right = self.width.saturating_sub(left);
        let top = self.top_height();
        let bottom = self.content_height().saturating_sub(top);
        let y_top = Self::HEADER_HEIGHT;
        let y_bottom = y_top + top;

        match id {
            PanelId::Stats => Rect::new(0, y_top, left, top),
            PanelId::Activity => Rect::new(0, y_bottom, left, bottom),
            PanelId::Projects => Rect::new(left, y_top, right, top),
            PanelId::Sessions => Rect::new(left, y_bottom, right, bottom),
        }
    }

    /// Panel under a terminal cell, `None` over the header or footer.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<PanelId> {
        if y < Self::HEADER_HEIGHT || y >= Self::HEADER_HEIGHT + self.content_height() {
            return None;
        }
        let top = y < Self::HEADER_HEIGHT + self.top_height();
        let left = x < self.left_width();
        Some(match (left, top) {
            (true, true) => PanelId::Stats,
            (true, false) => PanelId::Activity,
            (false, true) => PanelId::Projects,
            (false, false) => PanelId::Sessions,
        })
    }
}
