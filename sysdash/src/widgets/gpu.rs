//! GPU load bars plus temperature and VRAM text for the first GPU.

use super::{peak, Widget, NOT_AVAILABLE};
use crate::status::{classify, Status};
use crate::types::{GpuRecord, Snapshot};

pub const NO_GPU: &str = "No GPU";

#[derive(Debug, Clone, PartialEq)]
pub struct GpuWidget {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub status: Status,
    pub temperature: String,
    pub vram: String,
}

impl GpuWidget {
    pub fn new() -> Self {
        Self {
            labels: vec![NO_GPU.into()],
            values: vec![0.0],
            status: Status::Green,
            temperature: NOT_AVAILABLE.into(),
            vram: NOT_AVAILABLE.into(),
        }
    }

    pub fn has_gpu(&self) -> bool {
        !(self.labels.len() == 1 && self.labels[0] == NO_GPU)
    }
}

impl Default for GpuWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for GpuWidget {
    fn apply(&mut self, snapshot: &Snapshot) {
        let gpus = &snapshot.gpu;
        let Some(first) = gpus.first() else {
            *self = Self::new();
            return;
        };

        self.labels = gpus
            .iter()
            .enumerate()
            .map(|(i, g)| match g.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("GPU {}", i + 1),
            })
            .collect();
        self.values = gpus.iter().map(|g| g.load_percent.unwrap_or(0.0)).collect();
        self.status = classify(peak(self.values.iter().copied()).unwrap_or(0.0));
        self.temperature = first
            .temperature
            .map(|t| format!("{t:.0}°C"))
            .unwrap_or_else(|| NOT_AVAILABLE.into());
        self.vram = vram_text(first);
    }
}

fn vram_text(g: &GpuRecord) -> String {
    match (g.vram_used_mb, g.vram_total_mb) {
        (Some(used), Some(total)) => format!("{used:.0}/{total:.0} MB"),
        _ => NOT_AVAILABLE.into(),
    }
}
