//! GPU load bars with temperature/VRAM line for the first GPU.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{BarChart, Block, Borders, Paragraph},
};

use crate::ui::theme::{status_color, MUTED};
use crate::ui::util::{bar_width, clamp_pct};
use crate::widgets::GpuWidget;

pub fn draw_gpu(f: &mut ratatui::Frame<'_>, area: Rect, w: &GpuWidget) {
    let color = if w.has_gpu() {
        status_color(w.status)
    } else {
        MUTED
    };
    let title = if w.has_gpu() {
        format!("GPU [{}]", w.status.label())
    } else {
        "GPU".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Guard: need room for bars plus the text line
    if inner.height < 2 || inner.width < 2 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let data: Vec<(&str, u64)> = w
        .labels
        .iter()
        .zip(&w.values)
        .map(|(label, v)| (label.as_str(), clamp_pct(*v) as u64))
        .collect();
    let chart = BarChart::default()
        .data(data.as_slice())
        .bar_width(bar_width(area, data.len()))
        .bar_gap(1)
        .max(100)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));
    f.render_widget(chart, rows[0]);

    let text = format!("temp: {} | vram: {}", w.temperature, w.vram);
    f.render_widget(
        Paragraph::new(Span::raw(text)).style(Style::default().fg(Color::Gray)),
        rows[1],
    );
}
