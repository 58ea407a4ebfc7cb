use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::*;

/// Rows moved by `u`/`i` and PageUp/PageDown.
const PAGE_STEP: usize = 5;

impl App {
    /// Route a key: modal first, then filter entry, then normal bindings.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        if !self.modals.is_empty() {
            self.handle_modal_key(key);
            return Vec::new();
        }
        if self.focused_panel_mut().is_filter_mode() {
            self.handle_filter_key(key);
            return Vec::new();
        }
        self.handle_normal_key(key)
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match self.modals.last() {
            Some(Modal::Help) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    self.modals.pop();
                }
            }
            Some(Modal::Detail(session)) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    self.modals.pop();
                }
                KeyCode::Char('y') => {
                    let id = session.session_id.clone();
                    self.copy_session_id(&id);
                }
                _ => {}
            },
            None => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        let panel = self.focused_panel_mut();
        match key.code {
            KeyCode::Esc => panel.set_filter_mode(false),
            KeyCode::Enter => panel.confirm_filter(),
            KeyCode::Backspace => panel.handle_filter_backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                panel.handle_filter_input(c);
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return self.quit();
        }

        match key.code {
            KeyCode::Char('q') => return self.quit(),
            KeyCode::Char('r') => {
                tracing::debug!("Manual refresh requested");
                return vec![Command::LoadDashboard { force: true }];
            }
            KeyCode::Char('p') => {
                self.paused = !self.paused;
                tracing::info!(paused = self.paused, "Toggled auto-refresh");
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(id) = PanelId::from_digit(c) {
                    self.set_focus(id);
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.focus.left();
                self.sync_focus();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.focus.right();
                self.sync_focus();
            }
            KeyCode::Tab => {
                self.focus.next();
                self.sync_focus();
            }
            KeyCode::BackTab => {
                self.focus.previous();
                self.sync_focus();
            }
            KeyCode::Char('j') | KeyCode::Down => self.focused_panel_mut().cursor_down(),
            KeyCode::Char('k') | KeyCode::Up => self.focused_panel_mut().cursor_up(),
            KeyCode::Char('u') | KeyCode::PageUp => self.focused_panel_mut().cursor_up_n(PAGE_STEP),
            KeyCode::Char('i') | KeyCode::PageDown => {
                self.focused_panel_mut().cursor_down_n(PAGE_STEP)
            }
            KeyCode::Char('g') | KeyCode::Home => self.focused_panel_mut().cursor_first(),
            KeyCode::Char('G') | KeyCode::End => self.focused_panel_mut().cursor_last(),
            KeyCode::Char('s') => self.focused_panel_mut().cycle_sort(),
            KeyCode::Char('S') => self.focused_panel_mut().toggle_sort_direction(),
            KeyCode::Char('t') => self.cycle_time_range(),
            KeyCode::Char('T') => {
                self.theme = self.theme.next();
                tracing::debug!(theme = self.theme.name, "Switched theme");
            }
            KeyCode::Char('m') => {
                if self.focus.is_focused(PanelId::Activity) {
                    self.activity.cycle_metric();
                }
            }
            KeyCode::Char('/') => self.focused_panel_mut().set_filter_mode(true),
            KeyCode::Char('y') => {
                if self.focus.is_focused(PanelId::Sessions) {
                    if let Some(id) = self.sessions.selected().map(|s| s.session_id.clone()) {
                        self.copy_session_id(&id);
                    }
                }
            }
            KeyCode::Enter => {
                if self.focus.is_focused(PanelId::Sessions) {
                    if let Some(session) = self.sessions.selected() {
                        self.modals.push(Modal::Detail(Box::new(session.clone())));
                    }
                }
            }
            KeyCode::Char('?') => self.modals.push(Modal::Help),
            _ => {}
        }
        Vec::new()
    }

    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.modals.is_empty() {
            return;
        }
        let Some(hit) = self.layout.hit_test(mouse.column, mouse.row) else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.set_focus(hit),
            MouseEventKind::ScrollUp if self.focus.is_focused(hit) => {
                self.panel_mut(hit).cursor_up();
            }
            MouseEventKind::ScrollDown if self.focus.is_focused(hit) => {
                self.panel_mut(hit).cursor_down();
            }
            _ => {}
        }
    }

    fn quit(&mut self) -> Vec<Command> {
        self.should_quit = true;
        vec![Command::Quit]
    }
}
