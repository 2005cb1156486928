//! Types that mirror the metrics endpoint's JSON snapshot.
//!
//! `cpu`, `ram`, `disk`, `gpu` and `network` are mandatory; a body without them
//! fails to parse. Everything else degrades to `None`/defaults when missing or
//! malformed so a single odd field never costs the whole cycle.

use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    pub cpu: Vec<f64>,
    pub ram: f64,
    pub disk: f64,
    #[serde(default, rename = "cpuTemperature", deserialize_with = "lenient")]
    pub cpu_temperature: Option<f64>,
    #[serde(deserialize_with = "lenient_items")]
    pub gpu: Vec<GpuRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub battery: Option<Battery>,
    pub network: NetworkSample,
    #[serde(default, deserialize_with = "lenient")]
    pub system: Option<SystemInfo>,
    // stamped locally when the body is parsed; not part of the wire format
    #[serde(skip, default = "Local::now")]
    pub fetched_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GpuRecord {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(rename = "loadPercent", alias = "load", deserialize_with = "lenient")]
    pub load_percent: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub temperature: Option<f64>,
    #[serde(rename = "vramUsedMB", alias = "memoryUsed", deserialize_with = "lenient")]
    pub vram_used_mb: Option<f64>,
    #[serde(rename = "vramTotalMB", alias = "memoryTotal", deserialize_with = "lenient")]
    pub vram_total_mb: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Battery {
    pub percent: f64,
    #[serde(default, alias = "power_plugged", deserialize_with = "lenient")]
    pub charging: Option<bool>,
    // producers report negative sentinels for "unknown" and "unlimited"
    #[serde(
        default,
        rename = "secondsRemaining",
        alias = "secsleft",
        deserialize_with = "lenient"
    )]
    pub seconds_remaining: Option<i64>,
}

impl Battery {
    pub fn is_charging(&self) -> bool {
        self.charging.unwrap_or(false)
    }
}

/// Network section. Deployments send either cumulative counters or
/// instantaneous rates; both are kept as sent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NetworkSample {
    Rates {
        #[serde(rename = "uploadBytesPerSec")]
        upload_bytes_per_sec: f64,
        #[serde(rename = "downloadBytesPerSec")]
        download_bytes_per_sec: f64,
    },
    Counters {
        #[serde(rename = "bytesSent", alias = "sent")]
        bytes_sent: u64,
        #[serde(rename = "bytesReceived", alias = "recv")]
        bytes_received: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub hostname: String,
    #[serde(rename = "uptimeSeconds")]
    pub uptime_seconds: f64,
}

fn lenient<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(d)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<T>(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::debug!("ignoring malformed snapshot field: {e}");
            Ok(None)
        }
    }
}

fn lenient_items<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = Vec::<serde_json::Value>::deserialize(d)?;
    Ok(items
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_legacy_field_aliases() {
        let body = json!({
            "cpu": [12.5, 40.0],
            "ram": 51.2,
            "disk": 77.0,
            "network": {"sent": 1000, "recv": 2000},
            "gpu": [{"name": "RTX", "load": 33.0, "memoryUsed": 512.0, "memoryTotal": 8192.0}],
            "battery": {"percent": 80, "charging": false, "secsleft": 5400}
        });
        let s: Snapshot = serde_json::from_value(body).unwrap();
        assert_eq!(s.cpu, vec![12.5, 40.0]);
        assert_eq!(
            s.network,
            NetworkSample::Counters {
                bytes_sent: 1000,
                bytes_received: 2000
            }
        );
        assert_eq!(s.gpu[0].load_percent, Some(33.0));
        assert_eq!(s.gpu[0].vram_total_mb, Some(8192.0));
        let b = s.battery.unwrap();
        assert_eq!(b.seconds_remaining, Some(5400));
        assert!(!b.is_charging());
        assert!(s.system.is_none());
        assert!(s.cpu_temperature.is_none());
    }

    #[test]
    fn parses_rate_shape_and_system_block() {
        let body = json!({
            "cpu": [],
            "ram": 1.0,
            "disk": 2.0,
            "cpuTemperature": 55.5,
            "gpu": [],
            "battery": null,
            "network": {"uploadBytesPerSec": 2048.0, "downloadBytesPerSec": 1024},
            "system": {"os": "Linux", "hostname": "box", "uptimeSeconds": 7300}
        });
        let s: Snapshot = serde_json::from_value(body).unwrap();
        assert_eq!(
            s.network,
            NetworkSample::Rates {
                upload_bytes_per_sec: 2048.0,
                download_bytes_per_sec: 1024.0
            }
        );
        assert_eq!(s.cpu_temperature, Some(55.5));
        assert_eq!(s.system.unwrap().hostname, "box");
    }

    #[test]
    fn malformed_optional_sections_degrade_to_none() {
        let body = json!({
            "cpu": [1.0],
            "ram": 1.0,
            "disk": 2.0,
            "cpuTemperature": "hot",
            "gpu": ["not-a-record", {"name": 7, "loadPercent": 10}],
            "battery": "yes",
            "network": {"bytesSent": 1, "bytesReceived": 2},
            "system": {"os": "Linux"}
        });
        let s: Snapshot = serde_json::from_value(body).unwrap();
        assert!(s.cpu_temperature.is_none());
        assert!(s.battery.is_none());
        assert!(s.system.is_none());
        assert_eq!(s.gpu.len(), 2);
        assert_eq!(s.gpu[0], GpuRecord::default());
        assert_eq!(s.gpu[1].name, None);
        assert_eq!(s.gpu[1].load_percent, Some(10.0));
    }

    #[test]
    fn missing_mandatory_field_is_an_error() {
        let body = json!({"cpu": [1.0], "ram": 1.0, "disk": 2.0, "network": {"sent": 1, "recv": 2}});
        assert!(serde_json::from_value::<Snapshot>(body).is_err());
    }
}
