//! Per-core CPU bars, peak-driven status and the CPU temperature readout.

use super::{peak, Widget, NOT_AVAILABLE};
use crate::status::{classify, Status};
use crate::types::Snapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct CpuWidget {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub peak: f64,
    pub status: Status,
    pub title: String,
    pub temperature: String,
}

impl CpuWidget {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
            peak: 0.0,
            status: Status::Green,
            title: "CPU".into(),
            temperature: NOT_AVAILABLE.into(),
        }
    }
}

impl Default for CpuWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for CpuWidget {
    fn apply(&mut self, snapshot: &Snapshot) {
        self.labels = (1..=snapshot.cpu.len()).map(|i| format!("Core {i}")).collect();
        self.values = snapshot.cpu.clone();
        self.peak = peak(snapshot.cpu.iter().copied()).unwrap_or(0.0);
        self.status = classify(self.peak);
        self.title = format!("CPU (peak {:.1}%)", self.peak);
        self.temperature = snapshot
            .cpu_temperature
            .map(|t| format!("{t:.1}°C"))
            .unwrap_or_else(|| NOT_AVAILABLE.into());
    }
}
