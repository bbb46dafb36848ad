//! Byte accounting and memory bandwidth derivation.
//!
//! The counters are purely arithmetic: they compute the bytes a kernel must
//! stream from its parameters, then divide by measured wall time.

use serde::Serialize;

/// Assumed peak memory bandwidth of the reference machine (M4 Max estimate).
pub const DEFAULT_PEAK_BANDWIDTH_GBS: f64 = 400.0;

/// Bytes moved by one call of a profiled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Workload {
    pub bytes: u64,
}

impl Workload {
    pub fn bytes(self) -> f64 {
        self.bytes as f64
    }
}

/// Reduction over `n` elements of `elem_bytes` each: read N, write nothing.
pub fn reduction_workload(n: usize, elem_bytes: usize) -> Workload {
    Workload { bytes: n as u64 * elem_bytes as u64 }
}

/// Element-wise binary op: read 2N + write N elements.
pub fn elementwise_binary_workload(n: usize, elem_bytes: usize) -> Workload {
    Workload { bytes: 3 * n as u64 * elem_bytes as u64 }
}

/// Theoretical peak of the current hardware.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HwPeak {
    /// Peak memory bandwidth in GB/s.
    pub bandwidth_gbs: f64,
}

impl HwPeak {
    pub fn manual(bandwidth_gbs: f64) -> Self {
        Self { bandwidth_gbs }
    }

    /// Lower bound on the time to stream `workload` at peak bandwidth.
    pub fn theoretical_min_ns(&self, workload: Workload) -> f64 {
        if self.bandwidth_gbs > 0.0 {
            workload.bytes() / (self.bandwidth_gbs * 1e9) * 1e9
        } else {
            0.0
        }
    }

    /// Fraction of the theoretical floor achieved by `observed_ns`.
    pub fn efficiency(&self, workload: Workload, observed_ns: f64) -> f64 {
        if observed_ns > 0.0 {
            self.theoretical_min_ns(workload) / observed_ns
        } else {
            0.0
        }
    }
}

impl Default for HwPeak {
    fn default() -> Self {
        Self::manual(DEFAULT_PEAK_BANDWIDTH_GBS)
    }
}

/// GB/s achieved when `workload` takes `avg_ns` nanoseconds.
pub fn bandwidth_gbs(workload: Workload, avg_ns: f64) -> f64 {
    if avg_ns > 0.0 {
        workload.bytes() / (avg_ns / 1e9) / 1e9
    } else {
        0.0
    }
}

/// Mebibytes, as shown in report headers.
pub fn mib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
