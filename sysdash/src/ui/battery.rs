//! Battery gauge showing remaining charge.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::ui::theme::{status_color, MUTED};
use crate::ui::util::clamp_pct;
use crate::widgets::BatteryWidget;

pub fn draw_battery(f: &mut ratatui::Frame<'_>, area: Rect, w: &BatteryWidget) {
    let (title, color) = match w.status {
        Some(s) => (format!("Battery [{}]", s.label()), status_color(s)),
        None => ("Battery".to_string(), MUTED),
    };
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(color))
        .percent(clamp_pct(w.remaining()))
        .label(w.summary.clone());
    f.render_widget(g, area);
}
