use super::{IoStats, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn disk_io_totals() -> Option<IoStats> {
        // No cheap system-wide counter here; the collector sums per-process usage instead.
        None
    }
}
