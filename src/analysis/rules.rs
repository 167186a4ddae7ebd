use crate::system::snapshot::MetricsSnapshot;

use super::finding::{Finding, RuleId};

const RAM_PRESSURE_PERCENT: f64 = 80.0;
const SWAP_PRESSURE_PERCENT: f64 = 75.0;
const LOW_MEMORY_MB: u64 = 4096;
const DISK_IO_MB: f64 = 1000.0;
const NETWORK_BYTES: u64 = 1024 * 1024 * 1024;

pub struct Rule {
    pub id: RuleId,
    pub issue: &'static str,
    pub recommendation: &'static str,
    pub fires: fn(&MetricsSnapshot) -> bool,
}

/// Evaluated top to bottom; every rule is independent of the others.
pub static RULES: &[Rule] = &[
    Rule {
        id: RuleId::CpuLoad,
        issue: "High CPU load relative to CPU cores",
        recommendation: "Check CPU-intensive processes",
        fires: |m| m.load_1 > f64::from(m.cpu_cores),
    },
    Rule {
        id: RuleId::MemoryPressure,
        issue: "High RAM usage detected",
        recommendation: "Close heavy apps or consider adding swap",
        fires: |m| m.mem_percent() > RAM_PRESSURE_PERCENT,
    },
    Rule {
        id: RuleId::NoSwapLowMemory,
        issue: "No swap detected on low-memory system",
        recommendation: "Create a 2-4GB swap file",
        // A zero total means the size is unknown, not that the host has no RAM.
        fires: |m| m.swap_total == 0 && m.mem_total > 0 && m.mem_total <= LOW_MEMORY_MB,
    },
    Rule {
        id: RuleId::SwapUnderPressure,
        issue: "System is using swap under high RAM usage",
        recommendation: "Reduce memory load or close memory-heavy processes",
        fires: |m| m.swap_used > 0 && m.mem_percent() > SWAP_PRESSURE_PERCENT,
    },
    Rule {
        id: RuleId::DiskIo,
        issue: "High disk I/O activity",
        recommendation: "Check processes with heavy read/write operations",
        fires: |m| m.disk_io_mb() > DISK_IO_MB,
    },
    Rule {
        id: RuleId::NetworkUsage,
        issue: "High network usage",
        recommendation: "Check network-intensive applications",
        fires: |m| m.net_total_bytes() > NETWORK_BYTES,
    },
];

pub fn evaluate(snapshot: &MetricsSnapshot) -> Vec<Finding> {
    let _span = tracing::debug_span!("rules.evaluate").entered();

    RULES
        .iter()
        .filter(|rule| {
            let fired = (rule.fires)(snapshot);
            tracing::debug!(rule = ?rule.id, fired, "rule evaluated");
            fired
        })
        .map(|rule| Finding {
            rule: rule.id,
            issue: rule.issue.to_string(),
            recommendation: rule.recommendation.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(snapshot: &MetricsSnapshot) -> Vec<RuleId> {
        evaluate(snapshot).into_iter().map(|f| f.rule).collect()
    }

    #[test]
    fn scenario_cpu_only() {
        let snapshot = MetricsSnapshot {
            load_1: 5.0,
            cpu_cores: 4,
            mem_total: 8000,
            mem_used: 4000,
            swap_total: 2000,
            swap_used: 0,
            ..MetricsSnapshot::default()
        };
        let findings = evaluate(&snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].issue, "High CPU load relative to CPU cores");
        assert_eq!(findings[0].recommendation, "Check CPU-intensive processes");
    }

    #[test]
    fn scenario_ram_and_no_swap() {
        let snapshot = MetricsSnapshot {
            load_1: 1.0,
            cpu_cores: 4,
            mem_total: 4000,
            mem_used: 3800,
            swap_total: 0,
            ..MetricsSnapshot::default()
        };
        assert_eq!(
            fired(&snapshot),
            vec![RuleId::MemoryPressure, RuleId::NoSwapLowMemory]
        );
    }

    #[test]
    fn scenario_empty_snapshot() {
        assert!(evaluate(&MetricsSnapshot::default()).is_empty());
    }

    #[test]
    fn load_equal_to_cores_does_not_fire() {
        let snapshot = MetricsSnapshot {
            load_1: 4.0,
            cpu_cores: 4,
            ..MetricsSnapshot::default()
        };
        assert!(fired(&snapshot).is_empty());
    }

    #[test]
    fn swap_in_use_under_pressure() {
        let snapshot = MetricsSnapshot {
            mem_total: 16_000,
            mem_used: 12_400,
            swap_total: 4000,
            swap_used: 1,
            ..MetricsSnapshot::default()
        };
        // 77.5%: above the swap threshold, not above the RAM one.
        assert_eq!(fired(&snapshot), vec![RuleId::SwapUnderPressure]);
    }

    #[test]
    fn large_host_without_swap_is_fine() {
        let snapshot = MetricsSnapshot {
            mem_total: 4097,
            mem_used: 100,
            ..MetricsSnapshot::default()
        };
        assert!(fired(&snapshot).is_empty());
    }

    #[test]
    fn low_memory_boundary_is_inclusive() {
        let snapshot = MetricsSnapshot {
            mem_total: 4096,
            mem_used: 100,
            ..MetricsSnapshot::default()
        };
        assert_eq!(fired(&snapshot), vec![RuleId::NoSwapLowMemory]);
    }

    #[test]
    fn exactly_eighty_percent_ram_does_not_fire() {
        let snapshot = MetricsSnapshot {
            mem_total: 8000,
            mem_used: 6400,
            swap_total: 2000,
            ..MetricsSnapshot::default()
        };
        assert_eq!(snapshot.mem_percent(), 80.0);
        assert!(fired(&snapshot).is_empty());
    }

    #[test]
    fn exactly_seventy_five_percent_with_swap_does_not_fire() {
        let snapshot = MetricsSnapshot {
            mem_total: 8000,
            mem_used: 6000,
            swap_total: 2000,
            swap_used: 500,
            ..MetricsSnapshot::default()
        };
        assert_eq!(snapshot.mem_percent(), 75.0);
        assert!(fired(&snapshot).is_empty());
    }

    #[test]
    fn disk_and_network_thresholds() {
        let snapshot = MetricsSnapshot {
            disk_read_bytes: 600 * 1024 * 1024,
            disk_write_bytes: 401 * 1024 * 1024,
            net_sent_bytes: 1024 * 1024 * 1024,
            net_recv_bytes: 1,
            ..MetricsSnapshot::default()
        };
        assert_eq!(fired(&snapshot), vec![RuleId::DiskIo, RuleId::NetworkUsage]);

        let quiet = MetricsSnapshot {
            disk_read_bytes: 500 * 1024 * 1024,
            disk_write_bytes: 500 * 1024 * 1024,
            net_sent_bytes: 1024 * 1024 * 1024,
            ..MetricsSnapshot::default()
        };
        assert!(fired(&quiet).is_empty());
    }

    #[test]
    fn every_rule_fires_in_declaration_order() {
        let snapshot = MetricsSnapshot {
            load_1: 9.0,
            cpu_cores: 2,
            mem_total: 2000,
            mem_used: 1900,
            swap_total: 0,
            swap_used: 10,
            disk_read_bytes: u64::MAX,
            net_recv_bytes: u64::MAX,
            ..MetricsSnapshot::default()
        };
        let expected: Vec<RuleId> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(fired(&snapshot), expected);
    }
}
