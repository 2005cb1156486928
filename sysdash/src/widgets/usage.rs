//! Used/free proportion for single-percentage metrics (RAM and disk).

use super::Widget;
use crate::status::{classify, Status};
use crate::types::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Ram,
    Disk,
}

impl UsageKind {
    pub fn title(self) -> &'static str {
        match self {
            UsageKind::Ram => "RAM",
            UsageKind::Disk => "Disk",
        }
    }

    fn read(self, snapshot: &Snapshot) -> f64 {
        match self {
            UsageKind::Ram => snapshot.ram,
            UsageKind::Disk => snapshot.disk,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageWidget {
    pub kind: UsageKind,
    pub used: f64,
    pub status: Status,
}

impl UsageWidget {
    pub fn new(kind: UsageKind) -> Self {
        Self {
            kind,
            used: 0.0,
            status: Status::Green,
        }
    }

    /// `[used, free]`
    pub fn slices(&self) -> [f64; 2] {
        [self.used, 100.0 - self.used]
    }
}

impl Widget for UsageWidget {
    fn apply(&mut self, snapshot: &Snapshot) {
        self.used = self.kind.read(snapshot);
        self.status = classify(self.used);
    }
}
