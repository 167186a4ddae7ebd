use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

pub const TOP_PROCESSES: usize = 5;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProcessSample {
    pub pid: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cpu_percent: f32,
    #[serde(default)]
    pub resident_memory_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The process disappeared between enumeration and sampling.
    Exited,
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Exited => write!(f, "exited during scan"),
            SkipReason::Malformed(detail) => write!(f, "unreadable entry ({detail})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedProcess {
    pub pid: Option<u32>,
    pub reason: SkipReason,
}

/// Every process seen by one scan, split into usable samples and the ones
/// that could not be read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessScan {
    pub samples: Vec<ProcessSample>,
    pub skipped: Vec<SkippedProcess>,
}

impl ProcessScan {
    pub fn new(samples: Vec<ProcessSample>) -> Self {
        ProcessScan {
            samples,
            skipped: Vec::new(),
        }
    }

    pub fn skip(&mut self, pid: Option<u32>, reason: SkipReason) {
        tracing::debug!(?pid, %reason, "process skipped");
        self.skipped.push(SkippedProcess { pid, reason });
    }

    pub fn top_by_cpu(&self) -> Vec<&ProcessSample> {
        top_by_cpu(&self.samples)
    }

    pub fn top_by_memory(&self) -> Vec<&ProcessSample> {
        top_by_memory(&self.samples)
    }
}

/// Highest CPU users first. Ties keep input order; NaN readings sort last.
pub fn top_by_cpu(samples: &[ProcessSample]) -> Vec<&ProcessSample> {
    let mut ranked: Vec<&ProcessSample> = samples.iter().collect();
    ranked.sort_by(|a, b| cmp_cpu_desc(a.cpu_percent, b.cpu_percent));
    ranked.truncate(TOP_PROCESSES);
    ranked
}

/// Largest resident sets first. Ties keep input order.
pub fn top_by_memory(samples: &[ProcessSample]) -> Vec<&ProcessSample> {
    let mut ranked: Vec<&ProcessSample> = samples.iter().collect();
    ranked.sort_by(|a, b| b.resident_memory_bytes.cmp(&a.resident_memory_bytes));
    ranked.truncate(TOP_PROCESSES);
    ranked
}

fn cmp_cpu_desc(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
