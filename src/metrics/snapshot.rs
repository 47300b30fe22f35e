/// Point-in-time copy of a cache's counters plus its geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetAssociativeMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evictions: u64,
    pub contract_violations: u64,

    pub hit_ratio: f64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
    pub set_count: usize,
    pub lines_per_set: usize,
}
