//! UI module root: lays out the dashboard and exposes the per-panel drawing
//! functions.

pub mod battery;
pub mod cpu;
pub mod gpu;
pub mod header;
pub mod net;
pub mod theme;
pub mod usage;
pub mod util;

use ratatui::layout::{Constraint, Direction, Layout};

use crate::widgets::Dashboard;

pub fn draw_dashboard(f: &mut ratatui::Frame<'_>, d: &Dashboard) {
    let area = f.area();

    // Root rows: header, cpu + gpu, ram/disk/battery gauges, network
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Min(6),
        ])
        .split(area);

    header::draw_header(f, rows[0], d);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    cpu::draw_cpu_bars(f, top[0], &d.cpu);
    gpu::draw_gpu(f, top[1], &d.gpu);

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[2]);
    usage::draw_usage(f, gauges[0], &d.ram);
    usage::draw_usage(f, gauges[1], &d.disk);
    battery::draw_battery(f, gauges[2], &d.battery);

    net::draw_net(f, rows[3], &d.net);
}
