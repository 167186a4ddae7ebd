#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleId {
    CpuLoad,
    MemoryPressure,
    NoSwapLowMemory,
    SwapUnderPressure,
    DiskIo,
    NetworkUsage,
}

/// One detected issue and the advice that goes with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub rule: RuleId,
    pub issue: String,
    pub recommendation: String,
}
