use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Duration as ChronoDuration, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use lazyvibe_core::DailyActivity;

use super::*;

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("no display");
        }
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press(app: &mut App, c: char) -> Vec<Command> {
    app.update(key(KeyCode::Char(c)))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> AppEvent {
    AppEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn session(n: i64, project: &str, summary: &str) -> SessionEntry {
    let modified = Utc::now() - ChronoDuration::minutes(n * 10);
    SessionEntry {
        session_id: format!("{n:08}-aaaa-bbbb-cccc-000000000000"),
        project_path: format!("/Users/me/code/{project}"),
        project_name: project.to_string(),
        summary: summary.to_string(),
        message_count: 10 * n,
        created: modified - ChronoDuration::minutes(5),
        modified,
        git_branch: Some("main".to_string()),
    }
}

fn snapshot() -> DashboardData {
    DashboardData::from_parts(
        VmStatus::not_running(),
        vec![
            session(1, "api", "Add rate limiting"),
            session(2, "web", "Fix API docs link"),
            session(3, "cli", "Release notes"),
        ],
        vec![DailyActivity::new(Local::now().date_naive(), 12, 3, 7)],
    )
}

fn app_with(clipboard: RecordingClipboard) -> App {
    let mut app = App::new(Settings::default(), Box::new(clipboard));
    app.update(AppEvent::Resize(120, 40));
    app.update(AppEvent::Dashboard(Box::new(snapshot())));
    app
}

fn app() -> App {
    app_with(RecordingClipboard::default())
}

fn focused_count(app: &App) -> usize {
    PanelId::ALL
        .iter()
        .filter(|id| app.panel(**id).is_focused())
        .count()
}

#[test]
fn test_startup_loads_once() {
    let app = App::new(Settings::default(), Box::new(RecordingClipboard::default()));
    assert_eq!(app.init(), vec![Command::LoadDashboard { force: false }]);
    assert!(app.data.is_none());
    assert!(app.stats.is_focused());
}

#[test]
fn test_snapshot_reaches_every_panel() {
    let app = app();
    assert_eq!(app.stats.summary().map(|s| s.sessions), Some(3));
    assert_eq!(app.stats.summary().map(|s| s.messages), Some(60));
    assert_eq!(app.projects.list().len(), 3);
    assert_eq!(app.sessions.list().len(), 3);
    assert!(app.activity.has_data());
}

#[test]
fn test_quit_keys() {
    let mut app = app();
    assert_eq!(press(&mut app, 'q'), vec![Command::Quit]);
    assert!(app.should_quit);

    let mut app = self::app();
    let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(app.update(ctrl_c), vec![Command::Quit]);
}

#[test]
fn test_refresh_is_forced() {
    let mut app = app();
    assert_eq!(press(&mut app, 'r'), vec![Command::LoadDashboard { force: true }]);
}

#[test]
fn test_ticks_respect_pause() {
    let mut app = app();
    assert_eq!(app.update(AppEvent::VmTick), vec![Command::FetchVm]);
    assert_eq!(
        app.update(AppEvent::SessionsTick),
        vec![Command::LoadDashboard { force: false }]
    );

    press(&mut app, 'p');
    assert!(app.paused);
    assert!(app.update(AppEvent::VmTick).is_empty());
    assert!(app.update(AppEvent::SessionsTick).is_empty());

    // In-flight results still land while paused
    let mut data = snapshot();
    data.sessions.truncate(1);
    app.update(AppEvent::Dashboard(Box::new(data)));
    assert_eq!(app.sessions.list().len(), 1);
}

#[test]
fn test_vm_status_updates_header_only() {
    let mut app = app();
    let data = snapshot();
    let held = data.vm_status.clone();
    app.update(AppEvent::Dashboard(Box::new(data)));

    let status = VmStatus {
        running: true,
        pid: Some(4242),
        cpu_percent: Some(12.5),
        memory_mb: Some(2048.0),
    };
    app.update(AppEvent::Vm(status.clone()));
    assert_eq!(app.vm_status, status);
    assert_ne!(held, status);
    assert_eq!(app.data.as_ref().map(|d| d.vm_status.clone()), Some(held));
}

#[test]
fn test_focus_navigation_keeps_one_panel_focused() {
    let mut app = app();
    press(&mut app, 'l');
    assert_eq!(app.focus.current(), PanelId::Projects);
    press(&mut app, 'l');
    assert_eq!(app.focus.current(), PanelId::Projects);
    assert_eq!(focused_count(&app), 1);

    press(&mut app, '2');
    assert_eq!(app.focus.current(), PanelId::Activity);
    app.update(key(KeyCode::Tab));
    assert_eq!(app.focus.current(), PanelId::Projects);
    app.update(key(KeyCode::BackTab));
    app.update(key(KeyCode::BackTab));
    assert_eq!(app.focus.current(), PanelId::Stats);
    assert!(app.stats.is_focused());
    assert_eq!(focused_count(&app), 1);
}

#[test]
fn test_cursor_keys_go_to_focused_panel() {
    let mut app = app();
    press(&mut app, '4');
    press(&mut app, 'j');
    assert_eq!(app.sessions.list().cursor().position(), 1);
    press(&mut app, 'k');
    assert_eq!(app.sessions.list().cursor().position(), 0);
    press(&mut app, 'j');
    press(&mut app, 'G');
    assert_eq!(app.sessions.list().cursor().position(), 2);
    press(&mut app, 'u');
    assert_eq!(app.sessions.list().cursor().position(), 0);
    assert_eq!(app.projects.list().cursor().position(), 0);
}

#[test]
fn test_filter_mode_captures_keys() {
    let mut app = app();
    press(&mut app, '3');
    press(&mut app, '/');
    assert!(app.projects.is_filter_mode());

    // 'q' is text while filtering
    assert!(press(&mut app, 'q').is_empty());
    assert!(!app.should_quit);
    assert_eq!(app.projects.list().query(), "q");

    app.update(key(KeyCode::Backspace));
    for c in "API".chars() {
        press(&mut app, c);
    }
    app.update(key(KeyCode::Enter));
    assert!(!app.projects.is_filter_mode());
    assert_eq!(app.projects.list().len(), 1);

    press(&mut app, '/');
    app.update(key(KeyCode::Esc));
    assert_eq!(app.projects.list().query(), "");
    assert_eq!(app.projects.list().len(), 3);
}

#[test]
fn test_help_modal_swallows_keys() {
    let mut app = app();
    press(&mut app, '4');
    press(&mut app, '?');
    assert_eq!(app.modal(), Some(&Modal::Help));

    press(&mut app, 'j');
    assert!(press(&mut app, 'q').is_empty());
    assert!(!app.should_quit);
    assert_eq!(app.sessions.list().cursor().position(), 0);

    press(&mut app, '?');
    assert!(app.modal().is_none());
}

#[test]
fn test_detail_modal_and_copy() {
    let clipboard = RecordingClipboard::default();
    let copied = clipboard.copied.clone();
    let mut app = app_with(clipboard);

    press(&mut app, '4');
    app.update(key(KeyCode::Enter));
    let Some(Modal::Detail(session)) = app.modal() else {
        panic!("detail modal should be open");
    };
    assert_eq!(session.session_id, "00000001-aaaa-bbbb-cccc-000000000000");

    press(&mut app, 'y');
    assert_eq!(copied.borrow().as_slice(), ["00000001-aaaa-bbbb-cccc-000000000000"]);
    assert_eq!(app.flash(), Some("Copied: 00000001-aaa..."));

    press(&mut app, 'q');
    assert!(app.modal().is_none());
    assert!(!app.should_quit);
}

#[test]
fn test_copy_failure_flashes() {
    let mut app = app_with(RecordingClipboard {
        fail: true,
        ..Default::default()
    });
    press(&mut app, '4');
    press(&mut app, 'y');
    assert_eq!(app.flash(), Some("Copy failed"));
}

#[test]
fn test_copy_needs_sessions_focus() {
    let clipboard = RecordingClipboard::default();
    let copied = clipboard.copied.clone();
    let mut app = app_with(clipboard);
    press(&mut app, 'y');
    assert!(copied.borrow().is_empty());
    assert_eq!(app.flash(), None);
}

#[test]
fn test_metric_only_cycles_on_activity() {
    let mut app = app();
    press(&mut app, 'm');
    assert_eq!(app.activity.metric(), lazyvibe_core::ActivityMetric::Messages);
    press(&mut app, '2');
    press(&mut app, 'm');
    assert_eq!(app.activity.metric(), lazyvibe_core::ActivityMetric::Sessions);
}

#[test]
fn test_time_range_and_theme_cycle() {
    let mut app = app();
    press(&mut app, 't');
    assert_eq!(app.time_range, TimeRange::Today);
    assert_eq!(app.sessions.time_range(), TimeRange::Today);
    assert_eq!(app.stats.time_range(), TimeRange::Today);

    press(&mut app, 'T');
    assert_eq!(app.theme.name, "dracula");
}

#[test]
fn test_mouse_focus_and_wheel() {
    let mut app = app();
    // 120x40: left column 42 wide, top row ends at y=14
    app.update(mouse(MouseEventKind::ScrollDown, 60, 20));
    assert_eq!(app.sessions.list().cursor().position(), 0);

    app.update(mouse(MouseEventKind::Down(MouseButton::Left), 60, 20));
    assert_eq!(app.focus.current(), PanelId::Sessions);
    app.update(mouse(MouseEventKind::ScrollDown, 60, 20));
    assert_eq!(app.sessions.list().cursor().position(), 1);

    // Header row hits nothing
    app.update(mouse(MouseEventKind::Down(MouseButton::Left), 10, 0));
    assert_eq!(app.focus.current(), PanelId::Sessions);

    press(&mut app, '?');
    app.update(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
    assert_eq!(app.focus.current(), PanelId::Sessions);
}

#[test]
fn test_resize_sets_list_heights() {
    let mut app = app();
    app.update(AppEvent::Resize(100, 42));
    // top row 14, bottom row 26
    assert_eq!(app.projects.list().cursor().visible_rows(), 8);
    assert_eq!(app.sessions.list().cursor().visible_rows(), 11);
}
