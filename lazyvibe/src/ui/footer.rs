use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub(super) fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let base = Style::default().bg(theme.surface_dark);

    if let Some(message) = app.flash() {
        let flash = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )))
        .style(base);
        frame.render_widget(flash, area);
        return;
    }

    let key_style = Style::default().fg(theme.primary).add_modifier(Modifier::BOLD);
    let global_key_style = Style::default().fg(theme.text_bright).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.text_muted);

    let mut spans = vec![Span::raw(" ")];
    for binding in app.keybindings() {
        spans.push(Span::styled(binding.key, key_style));
        spans.push(Span::styled(format!(" {}  ", binding.desc), desc_style));
    }

    let pause = if app.paused { "resume" } else { "pause" };
    let range = app.time_range.to_string();
    let globals = [
        ("q", "quit"),
        ("r", "refresh"),
        ("p", pause),
        ("t", range.as_str()),
        ("1-4", "jump"),
        ("?", "help"),
    ];
    for (key, desc) in globals {
        spans.push(Span::styled(key, global_key_style));
        spans.push(Span::styled(format!(" {desc}  "), desc_style));
    }

    let theme_label = format!("T {} ", theme.display_name);
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(theme_label.chars().count() as u16),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), left);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(theme_label, desc_style)))
            .alignment(Alignment::Right)
            .style(base),
        right,
    );
}
