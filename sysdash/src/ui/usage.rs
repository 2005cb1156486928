//! RAM / disk usage gauge.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::ui::theme::status_color;
use crate::ui::util::clamp_pct;
use crate::widgets::UsageWidget;

pub fn draw_usage(f: &mut ratatui::Frame<'_>, area: Rect, w: &UsageWidget) {
    let [used, free] = w.slices();
    let g = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} [{}]", w.kind.title(), w.status.label())),
        )
        .gauge_style(Style::default().fg(status_color(w.status)))
        .percent(clamp_pct(used))
        .label(format!("{used:.1}% used / {free:.1}% free"));
    f.render_widget(g, area);
}
