//! Widget registry: one stateful widget per metric category.
//!
//! Every widget reads only the snapshot and its own state, so the order in
//! which [`Dashboard::apply`] visits them does not matter.

pub mod battery;
pub mod cpu;
pub mod gpu;
pub mod net;
pub mod system;
pub mod usage;

use chrono::{DateTime, Local};

use crate::types::Snapshot;

pub use battery::BatteryWidget;
pub use cpu::CpuWidget;
pub use gpu::GpuWidget;
pub use net::{NetMode, NetWidget};
pub use system::SystemWidget;
pub use usage::{UsageKind, UsageWidget};

/// Placeholder for any text the snapshot could not supply.
pub const NOT_AVAILABLE: &str = "N/A";

pub trait Widget {
    /// Overwrite the widget's state from `snapshot`. Never fails; missing or
    /// malformed data becomes a placeholder.
    fn apply(&mut self, snapshot: &Snapshot);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub cpu: CpuWidget,
    pub ram: UsageWidget,
    pub disk: UsageWidget,
    pub gpu: GpuWidget,
    pub battery: BatteryWidget,
    pub net: NetWidget,
    pub system: SystemWidget,
    cycles_applied: u64,
    last_update: Option<DateTime<Local>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            cpu: CpuWidget::new(),
            ram: UsageWidget::new(UsageKind::Ram),
            disk: UsageWidget::new(UsageKind::Disk),
            gpu: GpuWidget::new(),
            battery: BatteryWidget::new(),
            net: NetWidget::new(),
            system: SystemWidget::new(),
            cycles_applied: 0,
            last_update: None,
        }
    }

    pub fn apply(&mut self, snapshot: &Snapshot) {
        for w in self.widgets_mut() {
            w.apply(snapshot);
        }
        self.cycles_applied += 1;
        self.last_update = Some(snapshot.fetched_at);
    }

    /// Snapshots applied so far.
    pub fn cycles_applied(&self) -> u64 {
        self.cycles_applied
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    fn widgets_mut(&mut self) -> [&mut dyn Widget; 7] {
        [
            &mut self.cpu,
            &mut self.ram,
            &mut self.disk,
            &mut self.gpu,
            &mut self.battery,
            &mut self.net,
            &mut self.system,
        ]
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number the way the endpoint sent it: integral values without a
/// trailing `.0`.
pub(crate) fn fmt_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

pub(crate) fn peak(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some(v),
        Some(m) => Some(f64::max(m, v)),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Local, TimeZone};

    use crate::types::{NetworkSample, Snapshot};

    /// `{cpu:[10,90], ram:70, disk:40, gpu:[], battery:null, network: rates 2048/1024}`
    pub fn scenario() -> Snapshot {
        Snapshot {
            cpu: vec![10.0, 90.0],
            ram: 70.0,
            disk: 40.0,
            cpu_temperature: None,
            gpu: vec![],
            battery: None,
            network: NetworkSample::Rates {
                upload_bytes_per_sec: 2048.0,
                download_bytes_per_sec: 1024.0,
            },
            system: None,
            fetched_at: Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::scenario;
    use super::*;
    use crate::status::Status;

    #[test]
    fn end_to_end_scenario() {
        let mut d = Dashboard::new();
        d.apply(&scenario());

        assert_eq!(d.cpu.labels, vec!["Core 1", "Core 2"]);
        assert_eq!(d.cpu.values, vec![10.0, 90.0]);
        assert_eq!(d.cpu.status, Status::Red);

        assert_eq!(d.ram.slices(), [70.0, 30.0]);
        assert_eq!(d.ram.status, Status::Amber);
        assert_eq!(d.disk.slices(), [40.0, 60.0]);
        assert_eq!(d.disk.status, Status::Green);

        assert_eq!(d.gpu.labels, vec!["No GPU"]);
        assert_eq!(d.gpu.values, vec![0.0]);

        assert_eq!(d.battery.summary, "No battery detected");
        assert_eq!(d.battery.slices, [0.0, 0.0]);

        assert_eq!(d.net.window.len(), 1);
        let s = d.net.window.latest().unwrap();
        assert_eq!((s.upload_kbps, s.download_kbps), (2.0, 1.0));
        assert_eq!(d.net.upload_text, "2.0 KB/s");
        assert_eq!(d.net.download_text, "1.0 KB/s");

        assert_eq!(d.cycles_applied(), 1);
        assert!(d.last_update().is_some());
    }

    #[test]
    fn applying_twice_only_grows_the_network_window() {
        let snap = scenario();
        let mut once = Dashboard::new();
        once.apply(&snap);
        let mut twice = Dashboard::new();
        twice.apply(&snap);
        twice.apply(&snap);

        assert_eq!(once.cpu, twice.cpu);
        assert_eq!(once.ram, twice.ram);
        assert_eq!(once.disk, twice.disk);
        assert_eq!(once.gpu, twice.gpu);
        assert_eq!(once.battery, twice.battery);
        assert_eq!(once.system, twice.system);
        assert_eq!(once.net.upload_text, twice.net.upload_text);
        assert_eq!(twice.net.window.len(), 2);
    }

    #[test]
    fn fmt_number_drops_integral_fraction() {
        assert_eq!(fmt_number(80.0), "80");
        assert_eq!(fmt_number(87.5), "87.5");
    }

    #[test]
    fn peak_of_empty_is_none() {
        assert_eq!(peak(Vec::new()), None);
        assert_eq!(peak(vec![3.0, 9.0, 1.0]), Some(9.0));
    }
}
