//! Per-computation statistics records.

use serde::{Deserialize, Serialize};

/// Workload counter value meaning "unknown": the computation expired
/// before the counter could be read. Distinguishes a timed-out run from one
/// that computed and found nothing.
pub const UNKNOWN_WORKLOAD: i64 = -1;

/// Timing and workload statistics for one betweenness (or diameter)
/// computation. Created fresh per computation; never mutated after being
/// returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationStats {
    /// Wall-clock seconds spent computing. On expiry this is the deadline.
    pub time: f64,
    /// Edges relaxed across all forward (SSSP) passes.
    pub forward_touched_edges: i64,
    /// Predecessor edges traversed across all backward passes.
    pub backward_touched_edges: i64,
    pub timed_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_touched_edges: Option<i64>,
}

impl ComputationStats {
    /// Record for a completed computation; optional fields start empty.
    pub fn completed(time: f64, forward_touched_edges: u64, backward_touched_edges: u64) -> Self {
        Self {
            time,
            forward_touched_edges: forward_touched_edges as i64,
            backward_touched_edges: backward_touched_edges as i64,
            timed_out: false,
            sample_size: None,
            diameter: None,
            diameter_touched_edges: None,
        }
    }

    /// Sentinel record for a computation that hit its deadline: workload
    /// counters are unknown, not zero.
    pub fn expired(deadline_secs: u64, sample_size: Option<u64>) -> Self {
        Self {
            time: deadline_secs as f64,
            forward_touched_edges: UNKNOWN_WORKLOAD,
            backward_touched_edges: UNKNOWN_WORKLOAD,
            timed_out: true,
            sample_size,
            diameter: None,
            diameter_touched_edges: None,
        }
    }
}
