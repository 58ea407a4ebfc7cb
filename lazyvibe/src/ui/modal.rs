use lazyvibe_core::format::{format_number, format_relative_time, truncate_middle};
use lazyvibe_core::SessionEntry;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

const DETAIL_HEIGHT: u16 = 16;
const HELP_WIDTH: u16 = 50;
const LABEL_WIDTH: usize = 12;

/// A `width` x `height` rect centred in `area`, shrunk to fit.
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub(super) fn render_detail(frame: &mut Frame, app: &App, session: &SessionEntry, area: Rect) {
    let theme = &app.theme;
    let width = (u32::from(area.width) * 60 / 100).clamp(50, 80) as u16;
    let rect = centered(width, DETAIL_HEIGHT, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.primary))
        .title(Span::styled(
            " Session Details ",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.surface));

    let value_width = usize::from(rect.width.saturating_sub(4)).saturating_sub(LABEL_WIDTH);
    let label = Style::default().fg(theme.text_muted);
    let value = Style::default().fg(theme.text_bright);
    let field = |name: &str, v: String| {
        Line::from(vec![
            Span::styled(format!(" {name:<width$}", width = LABEL_WIDTH - 1), label),
            Span::styled(v, value),
        ])
    };

    let time = |ts: chrono::DateTime<chrono::Utc>| {
        ts.with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    };

    let mut lines = vec![
        field("Session ID", session.session_id.clone()),
        field("Project", session.project_name.clone()),
        field("Path", truncate_middle(&session.project_path, value_width)),
        field(
            "Branch",
            session.git_branch.clone().unwrap_or_else(|| "-".to_string()),
        ),
        field("Messages", format_number(session.message_count)),
        field("Duration", session.format_duration()),
        field("Created", time(session.created)),
        field(
            "Modified",
            format!(
                "{} ({})",
                time(session.modified),
                format_relative_time(session.modified)
            ),
        ),
        Line::default(),
        Line::from(Span::styled(" Summary", label)),
        Line::from(Span::styled(
            format!(" {}", session.summary),
            Style::default().fg(theme.text),
        )),
    ];
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled("y copy id · esc close", label)).alignment(Alignment::Center),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Panel Navigation",
        &[
            ("1-4", "Jump to panel"),
            ("Tab / S-Tab", "Next / previous panel"),
            ("h/l ←/→", "Move between columns"),
            ("click", "Focus panel"),
        ],
    ),
    (
        "Vim-Style Movement",
        &[
            ("j / ↓", "Cursor down"),
            ("k / ↑", "Cursor up"),
            ("u/i", "Up / down 5 rows"),
            ("g/G", "First / last row"),
        ],
    ),
    (
        "General",
        &[
            ("/", "Filter list"),
            ("s/S", "Sort field / direction"),
            ("t", "Cycle time range"),
            ("T", "Cycle theme"),
            ("m", "Cycle heatmap metric"),
            ("y", "Copy session ID"),
            ("enter", "Session details"),
            ("p", "Pause auto-refresh"),
            ("r", "Refresh now"),
            ("?", "Toggle help"),
            ("q", "Quit"),
        ],
    ),
];

pub(super) fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let section = Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(theme.primary).add_modifier(Modifier::BOLD);
    let desc = Style::default().fg(theme.text);

    let mut lines = Vec::new();
    for (i, (title, bindings)) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(format!(" {title}"), section)));
        for (k, d) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {k:<14}"), key),
                Span::styled(*d, desc),
            ]));
        }
    }
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(
            "Press Esc or ? to close this help",
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center),
    );

    let height = lines.len() as u16 + 2;
    let rect = centered(HELP_WIDTH, height, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.secondary))
        .title(Span::styled(
            " lazyvibe - Keyboard Shortcuts ",
            Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.surface));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
