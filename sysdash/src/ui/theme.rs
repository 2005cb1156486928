//! Shared UI theme constants.

use ratatui::style::Color;

use crate::status::Status;

// Used for placeholders and panels with no status
pub const MUTED: Color = Color::DarkGray;
pub const UPLOAD: Color = Color::Blue;
pub const DOWNLOAD: Color = Color::Green;

pub fn status_color(s: Status) -> Color {
    match s {
        Status::Green => Color::Green,
        Status::Amber => Color::Yellow,
        Status::Red => Color::Red,
    }
}
