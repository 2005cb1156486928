//! Network panel: raw counters as text, or upload/download sparklines over
//! the rolling window.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Sparkline},
};

use crate::ui::theme::{DOWNLOAD, MUTED, UPLOAD};
use crate::widgets::{NetMode, NetWidget};

pub fn draw_net(f: &mut ratatui::Frame<'_>, area: Rect, w: &NetWidget) {
    match w.mode {
        NetMode::Waiting => {
            f.render_widget(
                Paragraph::new("N/A")
                    .style(Style::default().fg(MUTED))
                    .block(Block::default().borders(Borders::ALL).title("Network")),
                area,
            );
        }
        NetMode::Counters => {
            let lines = vec![
                Line::from(format!("Sent:     {} bytes", w.upload_text)),
                Line::from(format!("Received: {} bytes", w.download_text)),
            ];
            f.render_widget(
                Paragraph::new(lines).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Network (totals)"),
                ),
                area,
            );
        }
        NetMode::Rates => {
            let span = match (w.window.iter().next(), w.window.latest()) {
                (Some(first), Some(last)) => format!("{} - {}", first.label, last.label),
                _ => String::new(),
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!("Network ({span})"));
            let inner = block.inner(area);
            f.render_widget(block, area);

            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);
            // tenths of KB/s so sub-1 KB/s traffic still shows
            let up: Vec<u64> = w
                .window
                .iter()
                .map(|s| (s.upload_kbps.max(0.0) * 10.0).round() as u64)
                .collect();
            let down: Vec<u64> = w
                .window
                .iter()
                .map(|s| (s.download_kbps.max(0.0) * 10.0).round() as u64)
                .collect();
            draw_net_spark(f, cols[0], &format!("Upload {}", w.upload_text), &up, UPLOAD);
            draw_net_spark(
                f,
                cols[1],
                &format!("Download {}", w.download_text),
                &down,
                DOWNLOAD,
            );
        }
    }
}

pub fn draw_net_spark(f: &mut ratatui::Frame<'_>, area: Rect, title: &str, hist: &[u64], color: Color) {
    let max_points = area.width.saturating_sub(2) as usize;
    let start = hist.len().saturating_sub(max_points);
    let data = &hist[start..];

    let spark = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        )
        .data(data)
        .style(Style::default().fg(color));
    f.render_widget(spark, area);
}
