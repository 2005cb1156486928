//! Host line: OS, hostname and whole hours of uptime.

use super::{Widget, NOT_AVAILABLE};
use crate::types::{Snapshot, SystemInfo};

#[derive(Debug, Clone, PartialEq)]
pub struct SystemWidget {
    pub text: String,
}

impl SystemWidget {
    pub fn new() -> Self {
        Self {
            text: NOT_AVAILABLE.into(),
        }
    }
}

impl Default for SystemWidget {
    fn default() -> Self {
        Self::new()
    }
}

pub fn describe(info: &SystemInfo) -> String {
    let hours = (info.uptime_seconds.max(0.0) / 3600.0).floor() as u64;
    format!("{} | {} | Uptime: {hours}h", info.os, info.hostname)
}

impl Widget for SystemWidget {
    fn apply(&mut self, snapshot: &Snapshot) {
        self.text = snapshot
            .system
            .as_ref()
            .map(describe)
            .unwrap_or_else(|| NOT_AVAILABLE.into());
    }
}
