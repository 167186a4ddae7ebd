#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IoStats {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Host counters `sysinfo` does not expose system-wide on every OS.
pub trait PlatformExtensions {
    /// Cumulative bytes read from and written to block devices since boot.
    fn disk_io_totals() -> Option<IoStats>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod fallback;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use fallback as platform_impl;

pub fn disk_io_totals() -> Option<IoStats> {
    platform_impl::Platform::disk_io_totals()
}
