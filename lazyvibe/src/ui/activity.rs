use chrono::Local;
use lazyvibe_core::format::format_number;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{panel_block, placeholder};
use crate::app::App;
use crate::focus::PanelId;

const CELL: &str = "██";
/// Width of the month label column.
const MARGIN: &str = "     ";

pub(super) fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let panel = &app.activity;
    let block = panel_block(
        app,
        PanelId::Activity,
        vec![panel.metric().name().to_string(), panel.time_range().to_string()],
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !panel.is_loaded() {
        frame.render_widget(placeholder(app, "Loading..."), inner);
        return;
    }
    if !panel.has_data() {
        frame.render_widget(placeholder(app, " No activity data"), inner);
        return;
    }

    let map = panel.heatmap(Local::now().date_naive());
    let muted = Style::default().fg(theme.text_muted);

    let mut header = vec![Span::raw(MARGIN)];
    header.extend(
        map.weekday_labels
            .iter()
            .map(|label| Span::styled(format!("{label} "), muted)),
    );
    let mut lines = vec![Line::from(header)];

    for week in &map.weeks {
        let label = match &week.month_label {
            Some(month) => format!("{month:<4} "),
            None => MARGIN.to_string(),
        };
        let mut spans = vec![Span::styled(label, muted)];
        for cell in &week.cells {
            spans.push(Span::styled(CELL, Style::default().fg(theme.heat_color(cell.level))));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    let mut legend = vec![Span::styled(format!("{MARGIN}Less "), muted)];
    for level in 0..=3 {
        legend.push(Span::styled(CELL, Style::default().fg(theme.heat_color(level))));
        legend.push(Span::raw(" "));
    }
    legend.push(Span::styled("More", muted));
    lines.push(Line::from(legend));

    if let Some(summary) = map.summary {
        lines.push(Line::from(Span::styled(
            format!(
                "{MARGIN}{} · {}/day · {} max",
                format_number(summary.total),
                format_number(summary.per_day),
                format_number(summary.max)
            ),
            Style::default().fg(theme.text),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
