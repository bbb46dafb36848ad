//! Run configuration for the benchmark programs.
//!
//! Defaults are the compile-time constants of each experiment; the programs
//! take no runtime configuration.

use serde::Serialize;

use crate::error::{BenchError, BenchResult};
use crate::profiling::counters::{HwPeak, DEFAULT_PEAK_BANDWIDTH_GBS};

/// Configuration of a summation suite run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchConfig {
    /// Array length (elements).
    pub len: usize,
    /// Timed calls per kernel.
    pub iterations: usize,
    /// Discarded calls per kernel before timing.
    pub warmup: usize,
    /// Assumed peak memory bandwidth in GB/s.
    pub peak_bandwidth_gbs: f64,
    /// Absolute tolerance of the correctness check.
    pub tolerance: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            len: 1_000_000,
            iterations: 100,
            warmup: 10,
            peak_bandwidth_gbs: DEFAULT_PEAK_BANDWIDTH_GBS,
            tolerance: 1e-6,
        }
    }
}

impl BenchConfig {
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_peak_bandwidth(mut self, gbs: f64) -> Self {
        self.peak_bandwidth_gbs = gbs;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn hw_peak(&self) -> HwPeak {
        HwPeak::manual(self.peak_bandwidth_gbs)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.len == 0 {
            return Err(BenchError::InvalidConfig("len must be > 0".into()));
        }
        if self.iterations == 0 {
            return Err(BenchError::InvalidConfig("iterations must be > 0".into()));
        }
        if !(self.peak_bandwidth_gbs > 0.0) || !self.peak_bandwidth_gbs.is_finite() {
            return Err(BenchError::InvalidConfig(format!(
                "peak bandwidth must be positive, got {}",
                self.peak_bandwidth_gbs
            )));
        }
        if !(self.tolerance >= 0.0) {
            return Err(BenchError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Sequential recurrence + add + reduce pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainConfig {
    pub len: usize,
    /// First element of the recurrence.
    pub seed: f64,
    /// `a[i] = a[i-1] * factor`.
    pub factor: f64,
    /// Constant written to the independent array.
    pub fill: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { len: 50_000_000, seed: 1.0, factor: 1.0000001, fill: 2.0 }
    }
}

impl ChainConfig {
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.len == 0 {
            return Err(BenchError::InvalidConfig("chain len must be > 0".into()));
        }
        Ok(())
    }
}

/// Dense square matrix multiply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatmulConfig {
    pub n: usize,
    /// Growth factor of the noise vector.
    pub factor: f64,
}

impl Default for MatmulConfig {
    fn default() -> Self {
        Self { n: 512, factor: 1.0000001 }
    }
}

impl MatmulConfig {
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.n == 0 {
            return Err(BenchError::InvalidConfig("matrix size must be > 0".into()));
        }
        Ok(())
    }
}

/// Two multiply-add streams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamConfig {
    pub iterations: usize,
    pub a: f64,
    pub b: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { iterations: 100_000_000, a: 1.5, b: 2.5 }
    }
}

impl StreamConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}
