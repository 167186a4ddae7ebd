use std::thread;
use std::time::Duration;

use color_eyre::Result;
use sysinfo::{
    MINIMUM_CPU_UPDATE_INTERVAL, Networks, ProcessRefreshKind, ProcessesToUpdate, System,
};

use crate::format::format_bytes;

use super::platform::{self, IoStats};
use super::process::{ProcessSample, ProcessScan, SkipReason};
use super::snapshot::{MetricsSnapshot, bytes_to_mb};
use super::source::{Capture, MetricsSource};

/// Live host metrics via `sysinfo`.
pub struct HostCollector {
    sys: System,
    sample_interval: Duration,
}

impl Default for HostCollector {
    fn default() -> Self {
        Self::new(MINIMUM_CPU_UPDATE_INTERVAL)
    }
}

impl HostCollector {
    /// `sample_interval` is how long to wait between the two process
    /// refreshes that CPU percentages are computed from. It never goes
    /// below what `sysinfo` needs for a meaningful reading.
    pub fn new(sample_interval: Duration) -> Self {
        HostCollector {
            sys: System::new(),
            sample_interval: sample_interval.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    fn refresh(&mut self) -> ProcessScan {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu().with_disk_usage(),
        );

        thread::sleep(self.sample_interval);

        // Keep dead entries on this pass so processes that exit mid-scan can be reported.
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            false,
            ProcessRefreshKind::nothing().with_memory().with_cpu().with_disk_usage(),
        );

        self.scan_processes()
    }

    fn scan_processes(&self) -> ProcessScan {
        scan_from_readings(self.sys.processes().iter().map(|(pid, process)| {
            let sample = ProcessSample {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
                cpu_percent: process.cpu_usage(),
                resident_memory_bytes: process.memory(),
            };
            (process.exists(), sample)
        }))
    }

    fn disk_io(&self) -> IoStats {
        if let Some(stats) = platform::disk_io_totals() {
            return stats;
        }
        self.sys
            .processes()
            .values()
            .fold(IoStats::default(), |acc, process| {
                let usage = process.disk_usage();
                IoStats {
                    read_bytes: acc.read_bytes.saturating_add(usage.total_read_bytes),
                    write_bytes: acc.write_bytes.saturating_add(usage.total_written_bytes),
                }
            })
    }

    fn build_snapshot(&self) -> MetricsSnapshot {
        let _snapshot_span = tracing::debug_span!("collector.build_snapshot").entered();

        let load = System::load_average();
        let disk = self.disk_io();

        let networks = Networks::new_with_refreshed_list();
        let (net_sent_bytes, net_recv_bytes) =
            networks
                .iter()
                .fold((0u64, 0u64), |(sent, recv), (_name, data)| {
                    (
                        sent.saturating_add(data.total_transmitted()),
                        recv.saturating_add(data.total_received()),
                    )
                });

        let cpu_cores = u32::try_from(self.sys.cpus().len()).unwrap_or(u32::MAX).max(1);

        MetricsSnapshot {
            load_1: load.one,
            load_5: load.five,
            load_15: load.fifteen,
            cpu_cores,
            mem_total: bytes_to_mb(self.sys.total_memory()),
            mem_used: bytes_to_mb(self.sys.used_memory()),
            swap_total: bytes_to_mb(self.sys.total_swap()),
            swap_used: bytes_to_mb(self.sys.used_swap()),
            disk_read_bytes: disk.read_bytes,
            disk_write_bytes: disk.write_bytes,
            net_sent_bytes,
            net_recv_bytes,
        }
    }
}

/// Split `(still running, reading)` pairs into samples and skips. Readings
/// of processes gone by the second refresh are stale and dropped.
fn scan_from_readings(readings: impl IntoIterator<Item = (bool, ProcessSample)>) -> ProcessScan {
    let mut scan = ProcessScan::default();
    for (alive, sample) in readings {
        if alive {
            scan.samples.push(sample);
        } else {
            scan.skip(Some(sample.pid), SkipReason::Exited);
        }
    }
    // HashMap iteration order is arbitrary; pin it so ties rank the same way every run.
    scan.samples.sort_by_key(|p| p.pid);
    scan
}

impl MetricsSource for HostCollector {
    fn capture(&mut self) -> Result<Capture> {
        let processes = self.refresh();
        let metrics = self.build_snapshot();
        tracing::info!(
            cores = metrics.cpu_cores,
            mem_total_mb = metrics.mem_total,
            disk_io = %format_bytes(
                metrics.disk_read_bytes.saturating_add(metrics.disk_write_bytes)
            ),
            net_io = %format_bytes(metrics.net_total_bytes()),
            processes = processes.samples.len(),
            skipped = processes.skipped.len(),
            "host metrics captured"
        );
        Ok(Capture { metrics, processes })
    }
}
