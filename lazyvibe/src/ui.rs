//! UI rendering for the dashboard.

mod activity;
mod footer;
mod header;
mod modal;
mod projects;
mod sessions;
mod stats;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Modal};
use crate::focus::{DashboardLayout, PanelId};
use crate::scroll::scrollbar_glyphs;

/// Render the whole dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = if app.layout.is_empty() {
        DashboardLayout::new(area.width, area.height)
    } else {
        app.layout
    };

    header::render(frame, app, layout.header().intersection(area));
    stats::render(frame, app, layout.panel(PanelId::Stats).intersection(area));
    activity::render(frame, app, layout.panel(PanelId::Activity).intersection(area));
    projects::render(frame, app, layout.panel(PanelId::Projects).intersection(area));
    sessions::render(frame, app, layout.panel(PanelId::Sessions).intersection(area));
    footer::render(frame, app, layout.footer().intersection(area));

    match app.modal() {
        Some(Modal::Help) => modal::render_help(frame, app, area),
        Some(Modal::Detail(session)) => modal::render_detail(frame, app, session, area),
        None => {}
    }
}

/// Rounded panel frame titled `Name N` plus any extra tags.
fn panel_block<'a>(app: &App, id: PanelId, tags: Vec<String>) -> Block<'a> {
    let theme = &app.theme;
    let focused = app.focus.is_focused(id);
    let border = if focused { theme.primary } else { theme.text_muted };
    let title_style = if focused {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let mut title = vec![
        Span::styled(format!(" {} ", id.title()), title_style),
        Span::styled(format!("{} ", id.number()), Style::default().fg(theme.text_muted)),
    ];
    for tag in tags {
        title.push(Span::styled(
            format!("[{tag}] "),
            Style::default().fg(theme.secondary),
        ));
    }

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Line::from(title))
}

/// Placeholder shown before the first snapshot lands.
fn placeholder<'a>(app: &App, text: &'a str) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(app.theme.text_muted),
    )))
}

/// Vertical scrollbar in the last column of `area`.
fn render_scrollbar(frame: &mut Frame, app: &App, area: Rect, total: usize, visible: usize, offset: usize) {
    if !app.show_scrollbar || area.width == 0 {
        return;
    }
    let glyphs = scrollbar_glyphs(total, visible, offset, usize::from(area.height));
    if glyphs.is_empty() {
        return;
    }
    let style = Style::default().fg(app.theme.text_muted);
    let lines: Vec<Line> = glyphs
        .into_iter()
        .map(|g| Line::from(Span::styled(g.to_string(), style)))
        .collect();
    let column = Rect::new(area.right() - 1, area.y, 1, area.height);
    frame.render_widget(Paragraph::new(lines), column);
}
