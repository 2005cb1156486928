//! Battery proportion and charge summary.

use super::{fmt_number, Widget};
use crate::status::{classify, Status};
use crate::types::{Battery, Snapshot};

pub const NO_BATTERY: &str = "No battery detected";

#[derive(Debug, Clone, PartialEq)]
pub struct BatteryWidget {
    /// `[used, remaining]`
    pub slices: [f64; 2],
    /// `None` when no battery is present.
    pub status: Option<Status>,
    pub summary: String,
}

impl BatteryWidget {
    pub fn new() -> Self {
        Self {
            slices: [0.0, 0.0],
            status: None,
            summary: NO_BATTERY.into(),
        }
    }

    pub fn remaining(&self) -> f64 {
        self.slices[1]
    }
}

impl Default for BatteryWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for BatteryWidget {
    fn apply(&mut self, snapshot: &Snapshot) {
        let Some(b) = snapshot.battery.as_ref() else {
            *self = Self::new();
            return;
        };
        self.slices = [100.0 - b.percent, b.percent];
        // less charge left is worse
        self.status = Some(classify(100.0 - b.percent));
        self.summary = summary(b);
    }
}

pub fn summary(b: &Battery) -> String {
    let state = if b.is_charging() {
        "Charging"
    } else {
        "Not Charging"
    };
    let mut text = format!("{}% - {state}", fmt_number(b.percent));
    if !b.is_charging() {
        if let Some(secs) = b.seconds_remaining.filter(|s| *s > 0) {
            let hours = secs / 3600;
            let minutes = (secs % 3600) / 60;
            text.push_str(&format!(" - {hours}h {minutes}m remaining"));
        }
    }
    text
}
