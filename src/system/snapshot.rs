use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Point-in-time host metrics. Memory and swap are in megabytes, disk and
/// network counters in bytes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    #[serde(deserialize_with = "lenient_f64")]
    pub load_1: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub load_5: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub load_15: f64,
    #[serde(deserialize_with = "lenient_cores")]
    pub cpu_cores: u32,
    #[serde(deserialize_with = "lenient_u64")]
    pub mem_total: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub mem_used: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub swap_total: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub swap_used: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub disk_read_bytes: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub disk_write_bytes: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub net_sent_bytes: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub net_recv_bytes: u64,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        MetricsSnapshot {
            load_1: 0.0,
            load_5: 0.0,
            load_15: 0.0,
            cpu_cores: 1,
            mem_total: 0,
            mem_used: 0,
            swap_total: 0,
            swap_used: 0,
            disk_read_bytes: 0,
            disk_write_bytes: 0,
            net_sent_bytes: 0,
            net_recv_bytes: 0,
        }
    }
}

impl MetricsSnapshot {
    /// Used RAM as a percentage of total; 0 when the total is unknown.
    pub fn mem_percent(&self) -> f64 {
        if self.mem_total == 0 {
            return 0.0;
        }
        self.mem_used as f64 / self.mem_total as f64 * 100.0
    }

    pub fn disk_io_mb(&self) -> f64 {
        self.disk_read_bytes.saturating_add(self.disk_write_bytes) as f64 / BYTES_PER_MB as f64
    }

    pub fn net_total_bytes(&self) -> u64 {
        self.net_sent_bytes.saturating_add(self.net_recv_bytes)
    }
}

pub fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}

/// Any JSON number is accepted; `null` and non-numeric values read as absent.
fn number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(Some(n)),
        Value::Null => Ok(None),
        other => {
            tracing::warn!(value = %other, "non-numeric metric, using its default");
            Ok(None)
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?
        .and_then(|n| n.as_f64())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

/// Floats truncate toward zero, negatives clamp to 0.
fn to_u64(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| n.as_f64().map(|v| v as u64))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.as_ref().and_then(to_u64).unwrap_or(0))
}

fn lenient_cores<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?
        .as_ref()
        .and_then(to_u64)
        .map_or(1, |cores| u32::try_from(cores).unwrap_or(u32::MAX)))
}
