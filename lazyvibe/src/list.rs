//! Filterable, sortable list state shared by the Projects and Sessions panels.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::scroll::Cursor;

/// A fixed, cyclic set of sort fields.
pub trait SortField: Copy + Eq + Debug {
    fn next(self) -> Self;
    fn label(self) -> &'static str;
}

/// An item that can live in a [`FilterList`].
pub trait Listable: Clone {
    type Field: SortField;

    /// Case-insensitive substring match; `query` is already lowercase.
    fn matches(&self, query: &str) -> bool;

    /// Ascending order over one field.
    fn compare(&self, other: &Self, field: Self::Field) -> Ordering;
}

#[derive(Debug, Clone)]
pub struct FilterList<T: Listable> {
    all_items: Vec<T>,
    items: Vec<T>,
    query: String,
    filter_mode: bool,
    sort_field: T::Field,
    sort_descending: bool,
    cursor: Cursor,
}

impl<T: Listable> FilterList<T> {
    pub fn new(sort_field: T::Field, sort_descending: bool, visible_rows: usize) -> Self {
        Self {
            all_items: Vec::new(),
            items: Vec::new(),
            query: String::new(),
            filter_mode: false,
            sort_field,
            sort_descending,
            cursor: Cursor::new(visible_rows),
        }
    }

    /// Replace the underlying items, keeping query and sort.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.all_items = items;
        self.recompute();
    }

    /// Items after filtering and sorting.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.all_items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_filter_mode(&self) -> bool {
        self.filter_mode
    }

    pub fn sort_field(&self) -> T::Field {
        self.sort_field
    }

    pub fn is_descending(&self) -> bool {
        self.sort_descending
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn selected(&self) -> Option<&T> {
        self.cursor
            .selected(self.items.len())
            .and_then(|i| self.items.get(i))
    }

    /// `"Activity ↓"` style label for panel titles.
    pub fn sort_label(&self) -> String {
        let arrow = if self.sort_descending { "↓" } else { "↑" };
        format!("{} {}", self.sort_field.label(), arrow)
    }

    /// `"filtered/total"` while a query is active.
    pub fn count_label(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| format!("{}/{}", self.items.len(), self.all_items.len()))
    }

    // Filter entry

    pub fn enter_filter(&mut self) {
        self.filter_mode = true;
    }

    /// Leave filter mode and drop the query.
    pub fn cancel_filter(&mut self) {
        self.filter_mode = false;
        self.query.clear();
        self.recompute();
    }

    /// Leave filter mode, keeping the query applied.
    pub fn confirm_filter(&mut self) {
        self.filter_mode = false;
    }

    /// Append a printable ASCII character; returns whether it was accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        if !matches!(c, ' '..='~') {
            return false;
        }
        self.query.push(c);
        self.recompute();
        self.cursor.reset();
        true
    }

    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.recompute();
            self.cursor.reset();
        }
    }

    // Sorting

    pub fn cycle_sort(&mut self) {
        self.sort_field = self.sort_field.next();
        self.recompute();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_descending = !self.sort_descending;
        self.recompute();
    }

    // Cursor movement

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.cursor.set_visible_rows(rows, self.items.len());
    }

    pub fn up(&mut self) {
        self.cursor.up(self.items.len());
    }

    pub fn down(&mut self) {
        self.cursor.down(self.items.len());
    }

    pub fn up_n(&mut self, n: usize) {
        self.cursor.up_n(n, self.items.len());
    }

    pub fn down_n(&mut self, n: usize) {
        self.cursor.down_n(n, self.items.len());
    }

    pub fn first(&mut self) {
        self.cursor.first(self.items.len());
    }

    pub fn last(&mut self) {
        self.cursor.last(self.items.len());
    }

    fn recompute(&mut self) {
        let query = self.query.to_lowercase();
        let mut items: Vec<T> = if query.is_empty() {
            self.all_items.clone()
        } else {
            self.all_items
                .iter()
                .filter(|item| item.matches(&query))
                .cloned()
                .collect()
        };

        let field = self.sort_field;
        let descending = self.sort_descending;
        items.sort_by(|a, b| {
            let ord = a.compare(b, field);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });

        self.items = items;
        self.cursor.clamp_to(self.items.len());
    }
}
