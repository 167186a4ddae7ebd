use std::path::Path;

use super::{IoStats, PlatformExtensions};

/// `/proc/diskstats` always counts in 512-byte sectors, whatever the device's real sector size.
const SECTOR_BYTES: u64 = 512;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn disk_io_totals() -> Option<IoStats> {
        let contents = std::fs::read_to_string("/proc/diskstats").ok()?;
        // Partitions have no /sys/block entry; counting them would double the device totals.
        parse_diskstats(&contents, |name| Path::new("/sys/block").join(name).exists())
    }
}

fn parse_diskstats(contents: &str, is_whole_device: impl Fn(&str) -> bool) -> Option<IoStats> {
    let mut totals = IoStats::default();
    let mut seen = false;
    for line in contents.lines() {
        // major minor name reads merged sectors_read ms writes merged sectors_written ...
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            continue;
        }
        let name = fields[2].replace('/', "!");
        if !is_whole_device(&name) {
            continue;
        }
        let (Ok(read), Ok(written)) = (fields[5].parse::<u64>(), fields[9].parse::<u64>()) else {
            continue;
        };
        totals.read_bytes = totals.read_bytes.saturating_add(read.saturating_mul(SECTOR_BYTES));
        totals.write_bytes = totals
            .write_bytes
            .saturating_add(written.saturating_mul(SECTOR_BYTES));
        seen = true;
    }
    seen.then_some(totals)
}
