//! Small UI helpers: percentage clamping, bar sizing, truncation.

use ratatui::layout::Rect;

/// Gauges and bars only draw 0..=100; widget state may hold anything.
pub fn clamp_pct(v: f64) -> u16 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 100.0).round() as u16
}

pub fn bar_width(area: Rect, bars: usize) -> u16 {
    let inner = area.width.saturating_sub(2);
    let n = bars.max(1) as u16;
    (inner / n).saturating_sub(1).clamp(1, 9)
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(len - right).collect();
    format!("{head}...{tail}")
}
