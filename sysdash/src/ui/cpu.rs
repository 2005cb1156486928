//! Per-core CPU bars coloured by peak load.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{BarChart, Block, Borders, Paragraph},
};

use crate::ui::theme::{status_color, MUTED};
use crate::ui::util::{bar_width, clamp_pct};
use crate::widgets::CpuWidget;

pub fn draw_cpu_bars(f: &mut ratatui::Frame<'_>, area: Rect, w: &CpuWidget) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} [{}]", w.title, w.status.label()));
    if w.values.is_empty() {
        f.render_widget(
            Paragraph::new("no cores reported")
                .style(Style::default().fg(MUTED))
                .block(block),
            area,
        );
        return;
    }

    let color = status_color(w.status);
    let data: Vec<(&str, u64)> = w
        .labels
        .iter()
        .zip(&w.values)
        .map(|(label, v)| (label.as_str(), clamp_pct(*v) as u64))
        .collect();
    let chart = BarChart::default()
        .block(block)
        .data(data.as_slice())
        .bar_width(bar_width(area, data.len()))
        .bar_gap(1)
        .max(100)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));
    f.render_widget(chart, area);
}
