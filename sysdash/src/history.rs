//! Bounded history buffers for charts.

use std::collections::VecDeque;

/// Samples kept by the network time series.
pub const NET_WINDOW: usize = 30;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    dq.push_back(v);
    while dq.len() > cap {
        dq.pop_front();
    }
}

// Fixed-capacity FIFO; the oldest sample goes first once full
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow<T> {
    samples: VecDeque<T>,
    cap: usize,
}

impl<T> RollingWindow<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, v: T) {
        push_capped(&mut self.samples, v, self.cap);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }
}

/// One point of the network time series, already converted to KB/s.
#[derive(Debug, Clone, PartialEq)]
pub struct NetSample {
    pub label: String,
    pub upload_kbps: f64,
    pub download_kbps: f64,
}
