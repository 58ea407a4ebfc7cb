use lazyvibe_core::format::{format_number, format_tokens};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{panel_block, placeholder};
use crate::app::App;
use crate::focus::PanelId;
use crate::sparkline;

pub(super) fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = panel_block(app, PanelId::Stats, vec![app.stats.time_range().to_string()]);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(summary) = app.stats.summary() else {
        frame.render_widget(placeholder(app, "Loading..."), inner);
        return;
    };

    let label = Style::default().fg(theme.text_muted);
    let value = Style::default().fg(theme.text_bright).add_modifier(Modifier::BOLD);
    let metric = |name: &str, v: String| {
        Line::from(vec![
            Span::styled(format!(" {name:<10}"), label),
            Span::styled(v, value),
        ])
    };

    let mut lines = vec![
        metric("Projects", format_number(summary.projects as i64)),
        metric("Sessions", format_number(summary.sessions as i64)),
        metric("Messages", format_number(summary.messages)),
        metric("Tools", format_number(summary.tools)),
        metric("Tokens", format_tokens(summary.tokens)),
        Line::default(),
        Line::from(Span::styled(
            format!(" Activity (Last {} Days)", sparkline::MAX_POINTS),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
    ];

    if summary.trend.is_empty() {
        lines.push(Line::from(Span::styled(" No activity data", label)));
    } else {
        let mut spark = vec![Span::raw(" ")];
        spark.extend(sparkline::sparkline(&summary.trend).into_iter().map(|p| {
            Span::styled(p.glyph.to_string(), Style::default().fg(theme.tier_color(p.tier)))
        }));
        lines.push(Line::from(spark));
        lines.push(Line::from(vec![
            Span::styled(" Total ", label),
            Span::styled(format_number(summary.trend_total()), value),
            Span::styled("  Avg ", label),
            Span::styled(format!("{}/day", format_number(summary.trend_average())), value),
            Span::styled("  Peak ", label),
            Span::styled(format_number(summary.trend_peak()), value),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
