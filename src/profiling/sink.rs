//! Explicit observe step that keeps benchmarked results alive.

use crate::traits::Accumulator;

/// Consumes kernel results so the optimizer cannot prove them unused.
///
/// Every value goes through `std::hint::black_box` and is folded into a
/// checksum that binaries print at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sink {
    checksum: f64,
    observed: u64,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn observe<A: Accumulator>(&mut self, value: A) {
        let value = std::hint::black_box(value);
        self.checksum += value.to_f64();
        self.observed += 1;
    }

    pub fn checksum(&self) -> f64 {
        self.checksum
    }

    pub fn observed(&self) -> u64 {
        self.observed
    }
}
