use lazyvibe_core::format::{format_relative_short, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{panel_block, placeholder, render_scrollbar};
use crate::app::App;
use crate::focus::PanelId;
use crate::panels::Panel;

const BRANCH_WIDTH: usize = 15;
const PROJECT_WIDTH: usize = 18;

pub(super) fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let panel = &app.sessions;
    let list = panel.list();

    let mut tags = vec![list.sort_label()];
    tags.extend(list.count_label());
    tags.push(panel.time_range().to_string());
    let block = panel_block(app, PanelId::Sessions, tags);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !panel.is_loaded() {
        frame.render_widget(placeholder(app, "Loading..."), inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let muted = Style::default().fg(theme.text_muted);
    let filter_row = Rect::new(inner.x, inner.y, inner.width, 1);
    if list.is_filter_mode() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("/{}█", list.query()),
                Style::default().fg(theme.primary),
            ))),
            filter_row,
        );
    } else {
        if !list.query().is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!("/{}", list.query()), muted))),
                filter_row,
            );
        }
        if panel.is_focused() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled("j/k u/i ", muted))).alignment(Alignment::Right),
                filter_row,
            );
        }
    }

    let body = Rect::new(
        inner.x,
        inner.y + 1,
        inner.width,
        inner.height.saturating_sub(1),
    );
    if list.is_empty() {
        frame.render_widget(placeholder(app, " No sessions found"), body);
        return;
    }

    let cursor = list.cursor();
    let range = cursor.visible_range(list.len());
    let selected = cursor.selected(list.len());
    let text_width = usize::from(if app.show_scrollbar {
        body.width.saturating_sub(1)
    } else {
        body.width
    });

    let highlight = Style::default().bg(theme.primary).fg(theme.surface_dark);
    let mut lines = Vec::with_capacity(range.len() * 2);
    for (i, session) in list.items()[range.clone()].iter().enumerate() {
        let is_selected = Some(range.start + i) == selected;
        let indicator = if is_selected { "▶ " } else { "  " };
        let when = format_relative_short(session.modified);
        let branch = session
            .git_branch
            .as_deref()
            .map(|b| format!(" [{}]", truncate(b, BRANCH_WIDTH)))
            .unwrap_or_default();
        let summary = if session.summary.is_empty() {
            "(no summary)"
        } else {
            session.summary.as_str()
        };
        let fixed = indicator.chars().count() + when.chars().count() + 2 + branch.chars().count();
        let summary = truncate(summary, text_width.saturating_sub(fixed).max(4));

        let detail = format!(
            "    {} | {} msgs | {}",
            truncate(&session.project_name, PROJECT_WIDTH),
            session.message_count,
            session.format_duration()
        );

        if is_selected && panel.is_focused() {
            lines.push(Line::from(Span::styled(
                format!("{indicator}{when}: {summary}{branch}"),
                highlight,
            )));
            lines.push(Line::from(Span::styled(detail, highlight)));
        } else {
            lines.push(Line::from(vec![
                Span::styled(indicator, Style::default().fg(theme.primary)),
                Span::styled(format!("{when}: "), Style::default().fg(theme.warning)),
                Span::styled(summary, Style::default().fg(theme.text)),
                Span::styled(branch, Style::default().fg(theme.secondary)),
            ]));
            lines.push(Line::from(Span::styled(detail, muted)));
        }
    }

    let text_area = Rect::new(body.x, body.y, text_width as u16, body.height);
    frame.render_widget(Paragraph::new(lines), text_area);

    let track = (cursor.visible_rows() * 2).min(usize::from(body.height)) as u16;
    let track_area = Rect::new(body.x, body.y, body.width, track);
    // Scrollbar counts sessions, not lines
    render_scrollbar(frame, app, track_area, list.len(), cursor.visible_rows(), cursor.offset());
}
