//! Amdahl and Gustafson speedup predictions.
//!
//! Both take the serial fraction `fs` of a workload measured on one core.

use crate::error::{BenchError, BenchResult};

/// Processor counts reported by the chain experiments.
pub const DEFAULT_PROCESSORS: [u32; 7] = [1, 2, 4, 8, 16, 32, 64];

fn check_fraction(fs: f64) -> BenchResult<f64> {
    if (0.0..=1.0).contains(&fs) {
        Ok(fs)
    } else {
        Err(BenchError::ScalingFraction(fs))
    }
}

/// Fixed problem size: `S(p) = 1 / (fs + (1 - fs) / p)`.
pub fn amdahl(p: u32, fs: f64) -> BenchResult<f64> {
    let fs = check_fraction(fs)?;
    let p = f64::from(p.max(1));
    Ok(1.0 / (fs + (1.0 - fs) / p))
}

/// Problem grows with p: `S(p) = fs + p * (1 - fs)`.
pub fn gustafson(p: u32, fs: f64) -> BenchResult<f64> {
    let fs = check_fraction(fs)?;
    let p = f64::from(p.max(1));
    Ok(fs + p * (1.0 - fs))
}

/// Amdahl limit `1 / fs`; infinite for a fully parallel workload.
pub fn max_speedup(fs: f64) -> BenchResult<f64> {
    let fs = check_fraction(fs)?;
    Ok(if fs > 0.0 { 1.0 / fs } else { f64::INFINITY })
}
