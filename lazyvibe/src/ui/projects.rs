use lazyvibe_core::format::{format_number, format_relative_short};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::{panel_block, placeholder, render_scrollbar};
use crate::app::App;
use crate::focus::PanelId;
use crate::panels::Panel;

/// Filter line, column header, separator.
const HEADER_ROWS: u16 = 3;

pub(super) fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let panel = &app.projects;
    let list = panel.list();

    let mut tags = vec![list.sort_label()];
    tags.extend(list.count_label());
    tags.push(panel.time_range().to_string());
    let block = panel_block(app, PanelId::Projects, tags);
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

    // Line 0: filter input or navigation hints
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
        frame.render_widget(placeholder(app, " No projects found"), body);
        return;
    }

    let cursor = list.cursor();
    let range = cursor.visible_range(list.len());
    let selected = cursor.selected(list.len());
    let table_width = if app.show_scrollbar {
        body.width.saturating_sub(1)
    } else {
        body.width
    };

    let highlight = Style::default().bg(theme.primary).fg(theme.surface_dark);
    let rows: Vec<Row> = list.items()[range.clone()]
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let is_selected = Some(range.start + i) == selected;
            let indicator = if is_selected { "▶ " } else { "  " };
            let style = if is_selected && panel.is_focused() {
                highlight
            } else {
                Style::default().fg(theme.text)
            };
            Row::new(vec![
                Cell::from(indicator),
                Cell::from(project.project_name.clone()),
                Cell::from(Line::from(project.session_count.to_string()).alignment(Alignment::Right)),
                Cell::from(Line::from(format_number(project.total_messages)).alignment(Alignment::Right)),
                Cell::from(
                    Line::from(format_relative_short(project.last_activity)).alignment(Alignment::Right),
                ),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Project"),
        Cell::from(Line::from("Sessions").alignment(Alignment::Right)),
        Cell::from(Line::from("Messages").alignment(Alignment::Right)),
        Cell::from(Line::from("Last Active").alignment(Alignment::Right)),
    ])
    .style(muted.add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .column_spacing(0);

    let table_area = Rect::new(body.x, body.y, table_width, body.height);
    frame.render_widget(table, table_area);

    // Dashed separator in the header's bottom margin
    if body.height > 1 {
        let separator = Rect::new(body.x, body.y + 1, table_width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "─".repeat(usize::from(table_width)),
                muted,
            ))),
            separator,
        );
    }

    let rows_area = Rect::new(
        body.x,
        inner.y + HEADER_ROWS,
        body.width,
        inner.height.saturating_sub(HEADER_ROWS),
    );
    render_scrollbar(frame, app, rows_area, list.len(), cursor.visible_rows(), cursor.offset());
}
