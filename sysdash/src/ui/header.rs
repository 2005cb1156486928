//! Top header with host line, CPU temperature and last update time.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::ui::util::truncate_middle;
use crate::widgets::Dashboard;

pub fn header_title(d: &Dashboard, width: usize) -> String {
    let title = match d.last_update() {
        Some(at) => format!(
            "sysdash | {} | CPU Temp: {} | updated {}  (press 'q' to quit)",
            d.system.text,
            d.cpu.temperature,
            at.format("%H:%M:%S")
        ),
        None => "sysdash | waiting for first snapshot... (press 'q' to quit)".into(),
    };
    truncate_middle(&title, width)
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, d: &Dashboard) {
    let title = header_title(d, area.width as usize);
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
