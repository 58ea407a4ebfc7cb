use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::sparkline;
use crate::theme::Theme;

const BAR_WIDTH: usize = 10;

/// Memory is shown against a 4 GB VM allocation.
const VM_MEMORY_MB: f64 = 4096.0;

pub(super) fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let muted = Style::default().fg(theme.text_muted);
    let sep = || Span::styled(" | ", muted);

    let mut spans = vec![
        Span::styled(
            " lazyvibe",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        sep(),
    ];

    let vm = &app.vm_status;
    if vm.running {
        let label = match vm.pid {
            Some(pid) => format!("VM: Running (PID {pid})"),
            None => "VM: Running".to_string(),
        };
        spans.push(Span::styled(label, Style::default().fg(theme.success)));

        spans.push(sep());
        spans.push(Span::styled("CPU ", muted));
        match vm.cpu_percent {
            Some(cpu) => {
                spans.extend(bar(theme, cpu));
                spans.push(Span::styled(format!(" {cpu:.1}%"), Style::default().fg(theme.text)));
            }
            None => spans.push(Span::styled("n/a", muted)),
        }

        spans.push(sep());
        spans.push(Span::styled("MEM ", muted));
        match vm.memory_mb {
            Some(mb) => {
                spans.extend(bar(theme, (mb / VM_MEMORY_MB * 100.0).min(100.0)));
                spans.push(Span::styled(format!(" {mb:.0}MB"), Style::default().fg(theme.text)));
            }
            None => spans.push(Span::styled("n/a", muted)),
        }
    } else {
        spans.push(Span::styled("VM: Not Running", muted));
    }

    if app.paused {
        spans.push(sep());
        spans.push(Span::styled(
            "[PAUSED]",
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface_dark));
    frame.render_widget(header, area);
}

/// Gradient bar: filled cells coloured by load, the rest as track.
fn bar(theme: &Theme, percent: f64) -> Vec<Span<'static>> {
    let (filled, tier) = sparkline::bar(percent, BAR_WIDTH);
    vec![
        Span::styled("[", Style::default().fg(theme.text_muted)),
        Span::styled("█".repeat(filled), Style::default().fg(theme.tier_color(tier))),
        Span::styled(
            "░".repeat(BAR_WIDTH - filled),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled("]", Style::default().fg(theme.text_muted)),
    ]
}
