//! Network readout: raw counters, or KB/s rates with a rolling time series.

use super::{Widget, NOT_AVAILABLE};
use crate::history::{NetSample, RollingWindow, NET_WINDOW};
use crate::types::{NetworkSample, Snapshot};

/// Which payload shape the widget last saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetMode {
    Waiting,
    Counters,
    Rates,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetWidget {
    pub mode: NetMode,
    /// Sent total in counter mode, upload rate in rate mode.
    pub upload_text: String,
    /// Received total in counter mode, download rate in rate mode.
    pub download_text: String,
    pub window: RollingWindow<NetSample>,
}

impl NetWidget {
    pub fn new() -> Self {
        Self {
            mode: NetMode::Waiting,
            upload_text: NOT_AVAILABLE.into(),
            download_text: NOT_AVAILABLE.into(),
            window: RollingWindow::new(NET_WINDOW),
        }
    }
}

impl Default for NetWidget {
    fn default() -> Self {
        Self::new()
    }
}

pub fn to_kbps(bytes_per_sec: f64) -> f64 {
    bytes_per_sec / 1024.0
}

impl Widget for NetWidget {
    fn apply(&mut self, snapshot: &Snapshot) {
        match snapshot.network {
            NetworkSample::Counters {
                bytes_sent,
                bytes_received,
            } => {
                // counters carry no history
                if self.mode == NetMode::Rates {
                    self.window.clear();
                }
                self.mode = NetMode::Counters;
                self.upload_text = bytes_sent.to_string();
                self.download_text = bytes_received.to_string();
            }
            NetworkSample::Rates {
                upload_bytes_per_sec,
                download_bytes_per_sec,
            } => {
                let up = to_kbps(upload_bytes_per_sec);
                let down = to_kbps(download_bytes_per_sec);
                self.mode = NetMode::Rates;
                self.upload_text = format!("{up:.1} KB/s");
                self.download_text = format!("{down:.1} KB/s");
                self.window.push(NetSample {
                    label: snapshot.fetched_at.format("%H:%M:%S").to_string(),
                    upload_kbps: up,
                    download_kbps: down,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::fixtures::scenario;

    #[test]
    fn counters_are_shown_raw_without_history() {
        let mut snap = scenario();
        snap.network = NetworkSample::Counters {
            bytes_sent: 123_456_789,
            bytes_received: 42,
        };
        let mut w = NetWidget::new();
        w.apply(&snap);
        assert_eq!(w.mode, NetMode::Counters);
        assert_eq!(w.upload_text, "123456789");
        assert_eq!(w.download_text, "42");
        assert!(w.window.is_empty());
    }

    #[test]
    fn rates_convert_to_kb_and_fill_window() {
        let mut w = NetWidget::new();
        let mut snap = scenario();
        for i in 0..35 {
            snap.network = NetworkSample::Rates {
                upload_bytes_per_sec: 1024.0 * i as f64,
                download_bytes_per_sec: 512.0,
            };
            w.apply(&snap);
        }
        assert_eq!(w.window.len(), 30);
        let ups: Vec<f64> = w.window.iter().map(|s| s.upload_kbps).collect();
        assert_eq!(ups.first(), Some(&5.0));
        assert_eq!(ups.last(), Some(&34.0));
        assert_eq!(w.upload_text, "34.0 KB/s");
        assert_eq!(w.download_text, "0.5 KB/s");
        assert_eq!(w.window.latest().unwrap().label, "12:00:00");
    }

    #[test]
    fn switching_to_counters_drops_rate_history() {
        let mut w = NetWidget::new();
        let mut snap = scenario();
        w.apply(&snap);
        assert_eq!(w.window.len(), 1);
        snap.network = NetworkSample::Counters {
            bytes_sent: 1,
            bytes_received: 2,
        };
        w.apply(&snap);
        assert!(w.window.is_empty());
    }
}
