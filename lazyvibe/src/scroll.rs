//! Selection cursor and visible window for list panels.

use std::ops::Range;

/// Cursor plus scroll offset over a list of `len` items.
///
/// Invariant for a non-empty list: `offset <= cursor < offset + visible_rows`
/// and `cursor < len`. For an empty list both are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    cursor: usize,
    offset: usize,
    visible_rows: usize,
}

impl Cursor {
    pub fn new(visible_rows: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            visible_rows: visible_rows.max(1),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Index of the selected row, if the list has one.
    pub fn selected(&self, len: usize) -> Option<usize> {
        (self.cursor < len).then_some(self.cursor)
    }

    /// Rows currently inside the window.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(self.offset + self.visible_rows).min(len)
    }

    pub fn set_visible_rows(&mut self, rows: usize, len: usize) {
        self.visible_rows = rows.max(1);
        self.clamp_to(len);
    }

    pub fn up(&mut self, len: usize) {
        self.up_n(1, len);
    }

    pub fn down(&mut self, len: usize) {
        self.down_n(1, len);
    }

    pub fn up_n(&mut self, n: usize, len: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.clamp_to(len);
    }

    pub fn down_n(&mut self, n: usize, len: usize) {
        self.cursor = self.cursor.saturating_add(n);
        self.clamp_to(len);
    }

    pub fn first(&mut self, len: usize) {
        self.cursor = 0;
        self.clamp_to(len);
    }

    pub fn last(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
        self.clamp_to(len);
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Re-establish the invariant after the list changed length.
    pub fn clamp_to(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.cursor = self.cursor.min(len - 1);
        self.offset = self.offset.min(len.saturating_sub(self.visible_rows));
        self.ensure_visible();
    }

    /// Smallest offset change that keeps the cursor in the window.
    fn ensure_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible_rows {
            self.offset = self.cursor + 1 - self.visible_rows;
        }
    }
}

/// Scrollbar thumb within a track of `track` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumb {
    pub position: usize,
    pub size: usize,
}

/// Thumb geometry, or `None` when everything fits.
pub fn scrollbar(total: usize, visible: usize, offset: usize, track: usize) -> Option<Thumb> {
    if total <= visible || track == 0 {
        return None;
    }
    let size = (track * visible / total).max(1);
    let position = (track * offset / total).min(track - size);
    Some(Thumb { position, size })
}

/// Track cells as glyphs: `▓` for the thumb, `░` elsewhere.
pub fn scrollbar_glyphs(total: usize, visible: usize, offset: usize, track: usize) -> Vec<char> {
    match scrollbar(total, visible, offset, track) {
        Some(thumb) => (0..track)
            .map(|i| {
                if i >= thumb.position && i < thumb.position + thumb.size {
                    '▓'
                } else {
                    '░'
                }
            })
            .collect(),
        None => Vec::new(),
    }
}
