//! lazyvibe - terminal dashboard for coding-assistant usage
//!
//! Shows sessions, projects, daily activity and the status of the assistant's
//! background VM in a four-panel dashboard.

mod app;
mod clipboard;
mod focus;
mod heatmap;
mod list;
mod panels;
mod scroll;
mod sparkline;
mod theme;
mod ui;

use std::io;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lazyvibe_core::{
    CacheStore, Config, DailyActivity, DashboardData, FileSource, ProjectSummary, SessionEntry,
    VmStatus,
};
use ratatui::{
    backend::{CrosstermBackend, TestBackend},
    buffer::Buffer,
    Terminal,
};
use serde::Serialize;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::{App, AppEvent, Command, Settings};
use crate::clipboard::SystemClipboard;
use crate::theme::Theme;

const VM_INTERVAL: Duration = Duration::from_secs(2);
const SESSIONS_INTERVAL: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

const MIN_CAPTURE_WIDTH: u16 = 40;
const MIN_CAPTURE_HEIGHT: u16 = 10;

#[derive(Parser)]
#[command(name = "lazyvibe")]
#[command(about = "Terminal dashboard for coding-assistant usage")]
#[command(version)]
struct Args {
    /// Print the current snapshot as JSON and exit
    #[arg(long, conflicts_with = "capture")]
    dump: bool,

    /// Render one frame at WIDTHxHEIGHT as plain text and exit
    #[arg(long, value_name = "WxH")]
    capture: Option<CaptureSize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CaptureSize {
    width: u16,
    height: u16,
}

impl FromStr for CaptureSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let width: u16 = w.trim().parse().map_err(|_| format!("invalid width {w:?}"))?;
        let height: u16 = h.trim().parse().map_err(|_| format!("invalid height {h:?}"))?;
        if width < MIN_CAPTURE_WIDTH || height < MIN_CAPTURE_HEIGHT {
            return Err(format!(
                "size must be at least {MIN_CAPTURE_WIDTH}x{MIN_CAPTURE_HEIGHT}, got {width}x{height}"
            ));
        }
        Ok(Self { width, height })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;

    // Log to file only; the terminal belongs to the dashboard
    let _log_guard =
        lazyvibe_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("lazyvibe starting up");

    let settings = Settings {
        theme: Theme::by_name(&config.theme),
        time_range: config.time_range().context("invalid default_time_range")?,
        show_scrollbar: config.show_scrollbar,
    };

    let source = FileSource::from_config(&config.sources);
    tracing::info!(claude_dir = %source.claude_dir().display(), "Reading assistant data");
    let store = Arc::new(CacheStore::new(source));

    let result = if args.dump {
        dump(&store)
    } else if let Some(size) = args.capture {
        capture(&store, settings, size)
    } else {
        run_interactive(store, settings)
    };

    tracing::info!("lazyvibe shutting down");
    result
}

// ============================================
// One-shot modes
// ============================================

#[derive(Serialize)]
struct Totals {
    sessions: usize,
    messages: i64,
    tool_calls: i64,
    tokens: i64,
}

#[derive(Serialize)]
struct Dump<'a> {
    vm_status: &'a VmStatus,
    sessions: &'a [SessionEntry],
    daily_activity: &'a [DailyActivity],
    projects: &'a [ProjectSummary],
    totals: Totals,
}

impl<'a> Dump<'a> {
    fn new(data: &'a DashboardData) -> Self {
        Self {
            vm_status: &data.vm_status,
            sessions: &data.sessions,
            daily_activity: &data.daily_activity,
            projects: &data.projects,
            totals: Totals {
                sessions: data.total_sessions(),
                messages: data.total_messages(),
                tool_calls: data.total_tool_calls(),
                tokens: data.total_tokens(),
            },
        }
    }
}

/// `--dump`: print the snapshot as JSON.
fn dump(store: &CacheStore) -> Result<()> {
    let data = store.dashboard(false);
    let json = serde_json::to_string_pretty(&Dump::new(&data)).context("failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

/// `--capture`: render a single frame and print it as text.
fn capture(store: &CacheStore, settings: Settings, size: CaptureSize) -> Result<()> {
    let mut app = App::new(settings, Box::new(SystemClipboard::new()));
    app.update(AppEvent::Resize(size.width, size.height));
    app.update(AppEvent::Dashboard(Box::new(store.dashboard(false))));

    let mut terminal =
        Terminal::new(TestBackend::new(size.width, size.height)).context("failed to create capture terminal")?;
    terminal
        .draw(|frame| ui::render(frame, &app))
        .context("failed to render frame")?;

    print!("{}", buffer_text(terminal.backend().buffer()));
    Ok(())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// ============================================
// Interactive mode
// ============================================

/// Executes app commands off the event loop.
struct Runner {
    handle: Handle,
    store: Arc<CacheStore>,
    tx: UnboundedSender<AppEvent>,
}

impl Runner {
    fn dispatch(&self, app: &mut App, event: AppEvent) {
        for command in app.update(event) {
            self.execute(command);
        }
    }

    fn execute(&self, command: Command) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        match command {
            Command::LoadDashboard { force } => {
                self.handle.spawn_blocking(move || {
                    let data = if force {
                        store.refresh_all()
                    } else {
                        store.dashboard(false)
                    };
                    if tx.send(AppEvent::Dashboard(Box::new(data))).is_err() {
                        tracing::debug!("Event loop gone, dropping dashboard result");
                    }
                });
            }
            Command::FetchVm => {
                self.handle.spawn_blocking(move || {
                    let status = store.vm_status(false);
                    if tx.send(AppEvent::Vm((*status).clone())).is_err() {
                        tracing::debug!("Event loop gone, dropping VM status");
                    }
                });
            }
            Command::Quit => {}
        }
    }
}

/// Post `event()` into the loop every `period`, starting one period from now.
fn spawn_ticker(handle: &Handle, tx: UnboundedSender<AppEvent>, period: Duration, event: fn() -> AppEvent) {
    handle.spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(event()).is_err() {
                break;
            }
        }
    });
}

fn run_interactive(store: Arc<CacheStore>, settings: Settings) -> Result<()> {
    let runtime = Runtime::new().context("failed to start async runtime")?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = Runner {
        handle: runtime.handle().clone(),
        store,
        tx: tx.clone(),
    };

    spawn_ticker(runtime.handle(), tx.clone(), VM_INTERVAL, || AppEvent::VmTick);
    spawn_ticker(runtime.handle(), tx, SESSIONS_INTERVAL, || AppEvent::SessionsTick);

    let mut app = App::new(settings, Box::new(SystemClipboard::new()));

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_app(&mut terminal, &mut app, &runner, &mut rx);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    // Detached fetches may still be blocked on disk; don't wait for them
    runtime.shutdown_background();

    result
}

/// Run the main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runner: &Runner,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let size = terminal.size().context("failed to read terminal size")?;
    runner.dispatch(app, AppEvent::Resize(size.width, size.height));
    for command in app.init() {
        runner.execute(command);
    }

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            let event = match event::read()? {
                Event::Key(key) => Some(AppEvent::Key(key)),
                Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
                Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
                _ => None,
            };
            if let Some(event) = event {
                runner.dispatch(app, event);
            }
        }

        // Results and ticks that arrived while we waited
        while let Ok(event) = rx.try_recv() {
            runner.dispatch(app, event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_size_parsing() {
        assert_eq!(
            "80x24".parse::<CaptureSize>(),
            Ok(CaptureSize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(
            "120X40".parse::<CaptureSize>().map(|s| s.width),
            Ok(120)
        );
        assert!("39x24".parse::<CaptureSize>().is_err());
        assert!("80x9".parse::<CaptureSize>().is_err());
        assert!("80".parse::<CaptureSize>().is_err());
        assert!("axb".parse::<CaptureSize>().is_err());
    }

    #[test]
    fn test_dump_totals() {
        let data = DashboardData::from_parts(
            VmStatus::not_running(),
            Vec::new(),
            vec![DailyActivity::new(
                chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                8,
                2,
                4,
            )],
        );
        let json = serde_json::to_value(Dump::new(&data)).unwrap();
        assert_eq!(json["totals"]["tool_calls"], 4);
        assert_eq!(json["totals"]["sessions"], 0);
        assert_eq!(json["daily_activity"][0]["date"], "2024-06-01");
    }

    #[test]
    fn test_help_lists_cursor_directions() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut app = App::new(Settings::default(), Box::new(SystemClipboard::new()));
        app.update(AppEvent::Resize(100, 40));
        app.update(AppEvent::Key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE)));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| ui::render(frame, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());

        let down = text.lines().find(|l| l.contains("Cursor down")).unwrap_or_default();
        let up = text.lines().find(|l| l.contains("Cursor up")).unwrap_or_default();
        assert!(down.contains("j / ↓"), "help:\n{text}");
        assert!(up.contains("k / ↑"), "help:\n{text}");
    }

    #[test]
    fn test_detail_shows_relative_age() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let modified = chrono::Utc::now() - chrono::Duration::minutes(210);
        let session = SessionEntry {
            session_id: "abc123".to_string(),
            project_path: "/work/api".to_string(),
            project_name: "api".to_string(),
            summary: "Add rate limiting".to_string(),
            message_count: 4,
            created: modified - chrono::Duration::minutes(30),
            modified,
            git_branch: None,
        };
        let data = DashboardData::from_parts(VmStatus::not_running(), vec![session], Vec::new());

        let mut app = App::new(Settings::default(), Box::new(SystemClipboard::new()));
        app.update(AppEvent::Resize(100, 40));
        app.update(AppEvent::Dashboard(Box::new(data)));
        for code in [KeyCode::Char('4'), KeyCode::Enter] {
            app.update(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        }

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| ui::render(frame, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("(3h ago)"), "detail:\n{text}");
    }

    #[test]
    fn test_capture_renders_dashboard_chrome() {
        let app = App::new(Settings::default(), Box::new(SystemClipboard::new()));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| ui::render(frame, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());

        assert!(text.starts_with(" lazyvibe | VM: Not Running"));
        assert!(text.contains("Stats 1"));
        assert!(text.contains("Sessions 4"));
        assert!(text.contains("Loading..."));
        assert_eq!(text.lines().count(), 30);
    }
}
