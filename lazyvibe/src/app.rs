//! Application state and event handling.
//!
//! The app is a plain state machine: the runtime loop feeds it [`AppEvent`]s
//! and executes the [`Command`]s that [`App::update`] returns. Nothing in here
//! touches the terminal or blocks on I/O.

mod input;
mod refresh;

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseEvent};
use lazyvibe_core::{DashboardData, SessionEntry, TimeRange, VmStatus};

use crate::clipboard::Clipboard;
use crate::focus::{DashboardLayout, Focus, PanelId};
use crate::panels::{ActivityPanel, Keybinding, Panel, ProjectsPanel, SessionsPanel, StatsPanel};
use crate::theme::Theme;

/// How long a flash message replaces the footer.
pub const FLASH_DURATION: Duration = Duration::from_secs(2);

/// Everything the app reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// 2s timer.
    VmTick,
    /// 10s timer.
    SessionsTick,
    /// A dashboard load finished.
    Dashboard(Box<DashboardData>),
    /// A VM status fetch finished.
    Vm(VmStatus),
}

/// Work the runtime performs on the app's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LoadDashboard { force: bool },
    FetchVm,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Help,
    Detail(Box<SessionEntry>),
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub message: String,
    expires_at: Instant,
}

/// Startup preferences taken from the config file.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub theme: Theme,
    pub time_range: TimeRange,
    pub show_scrollbar: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            time_range: TimeRange::All,
            show_scrollbar: true,
        }
    }
}

pub struct App {
    /// Latest snapshot; `None` until the first load completes.
    pub data: Option<DashboardData>,
    /// Latest VM status from either a snapshot or a VM tick.
    pub vm_status: VmStatus,
    pub time_range: TimeRange,
    pub paused: bool,
    /// Open modals, topmost last.
    pub modals: Vec<Modal>,
    pub focus: Focus,
    pub stats: StatsPanel,
    pub activity: ActivityPanel,
    pub projects: ProjectsPanel,
    pub sessions: SessionsPanel,
    pub theme: Theme,
    pub layout: DashboardLayout,
    pub show_scrollbar: bool,
    pub should_quit: bool,
    flash: Option<Flash>,
    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(settings: Settings, clipboard: Box<dyn Clipboard>) -> Self {
        let mut app = Self {
            data: None,
            vm_status: VmStatus::not_running(),
            time_range: settings.time_range,
            paused: false,
            modals: Vec::new(),
            focus: Focus::default(),
            stats: StatsPanel::default(),
            activity: ActivityPanel::default(),
            projects: ProjectsPanel::default(),
            sessions: SessionsPanel::default(),
            theme: settings.theme,
            layout: DashboardLayout::default(),
            show_scrollbar: settings.show_scrollbar,
            should_quit: false,
            flash: None,
            clipboard,
        };
        app.sync_focus();
        app
    }

    /// Commands to run once at startup.
    pub fn init(&self) -> Vec<Command> {
        vec![Command::LoadDashboard { force: false }]
    }

    pub fn update(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Vec::new()
            }
            AppEvent::Resize(width, height) => {
                self.resize(width, height);
                Vec::new()
            }
            AppEvent::VmTick => self.on_vm_tick(),
            AppEvent::SessionsTick => self.on_sessions_tick(),
            AppEvent::Dashboard(data) => {
                self.apply_dashboard(*data);
                Vec::new()
            }
            AppEvent::Vm(status) => {
                self.apply_vm_status(status);
                Vec::new()
            }
        }
    }

    pub fn panel(&self, id: PanelId) -> &dyn Panel {
        match id {
            PanelId::Stats => &self.stats,
            PanelId::Activity => &self.activity,
            PanelId::Projects => &self.projects,
            PanelId::Sessions => &self.sessions,
        }
    }

    pub fn panel_mut(&mut self, id: PanelId) -> &mut dyn Panel {
        match id {
            PanelId::Stats => &mut self.stats,
            PanelId::Activity => &mut self.activity,
            PanelId::Projects => &mut self.projects,
            PanelId::Sessions => &mut self.sessions,
        }
    }

    fn focused_panel_mut(&mut self) -> &mut dyn Panel {
        self.panel_mut(self.focus.current())
    }

    /// Footer hints for the focused panel.
    pub fn keybindings(&self) -> Vec<Keybinding> {
        self.panel(self.focus.current()).keybindings()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modals.last()
    }

    /// The flash message, while it is still live.
    pub fn flash(&self) -> Option<&str> {
        self.flash
            .as_ref()
            .filter(|f| f.expires_at > Instant::now())
            .map(|f| f.message.as_str())
    }

    fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash {
            message: message.into(),
            expires_at: Instant::now() + FLASH_DURATION,
        });
    }

    fn set_focus(&mut self, id: PanelId) {
        self.focus.jump(id);
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        for id in PanelId::ALL {
            let focused = self.focus.is_focused(id);
            self.panel_mut(id).set_focused(focused);
        }
    }

    /// Copy a session id to the clipboard and report the outcome.
    fn copy_session_id(&mut self, session_id: &str) {
        match self.clipboard.copy(session_id) {
            Ok(()) => {
                let shown: String = session_id.chars().take(12).collect();
                let suffix = if session_id.chars().count() > 12 { "..." } else { "" };
                self.set_flash(format!("Copied: {shown}{suffix}"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard copy failed");
                self.set_flash("Copy failed");
            }
        }
    }
}

#[cfg(test)]
mod tests;
