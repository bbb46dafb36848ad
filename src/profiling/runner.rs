//! Warmup, timed trials and correctness check for registered kernels.

use serde::Serialize;

use crate::buffer::AlignedBuffer;
use crate::config::BenchConfig;
use crate::error::{BenchError, BenchResult};
use crate::kernels::{Kernel, KernelRegistry};
use crate::profiling::counters::{bandwidth_gbs, reduction_workload};
use crate::profiling::report::SuiteReport;
use crate::profiling::sink::Sink;
use crate::profiling::timer::{Clock, PlatformClock};
use crate::traits::{Accumulator, SumElement};

/// Aggregated per-call wall time of one kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingStats {
    pub avg_ns: f64,
    pub min_ns: u64,
    pub max_ns: u64,
    pub iterations: usize,
}

/// Running total/min/max over timed samples.
#[derive(Debug, Clone, Copy)]
struct SampleAccumulator {
    total_ns: u128,
    min_ns: u64,
    max_ns: u64,
    count: usize,
}

impl SampleAccumulator {
    fn new() -> Self {
        Self { total_ns: 0, min_ns: u64::MAX, max_ns: 0, count: 0 }
    }

    #[inline(always)]
    fn record(&mut self, elapsed_ns: u64) {
        self.total_ns += elapsed_ns as u128;
        self.min_ns = self.min_ns.min(elapsed_ns);
        self.max_ns = self.max_ns.max(elapsed_ns);
        self.count += 1;
    }

    fn finish(self) -> TimingStats {
        if self.count == 0 {
            return TimingStats { avg_ns: 0.0, min_ns: 0, max_ns: 0, iterations: 0 };
        }
        TimingStats {
            avg_ns: self.total_ns as f64 / self.count as f64,
            min_ns: self.min_ns,
            max_ns: self.max_ns,
            iterations: self.count,
        }
    }
}

/// Outcome of the untimed correctness call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation {
    Passed,
    Mismatch { got: f64, expected: f64 },
}

impl Validation {
    pub fn check(got: f64, expected: f64, tolerance: f64) -> Self {
        if (got - expected).abs() <= tolerance {
            Validation::Passed
        } else {
            Validation::Mismatch { got, expected }
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Validation::Passed)
    }
}

/// Result of benchmarking one kernel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialResult {
    pub name: String,
    pub unroll: usize,
    pub accumulators: usize,
    pub stats: TimingStats,
    pub bandwidth_gbs: f64,
    /// Baseline average over this kernel's average.
    pub speedup: f64,
    pub validation: Validation,
}

/// Runs kernels against one clock, feeding every result into its sink.
pub struct BenchRunner<C: Clock = PlatformClock> {
    config: BenchConfig,
    clock: C,
    sink: Sink,
}

impl BenchRunner<PlatformClock> {
    pub fn new(config: BenchConfig) -> BenchResult<Self> {
        Self::with_clock(config, PlatformClock::default())
    }
}

impl<C: Clock> BenchRunner<C> {
    pub fn with_clock(config: BenchConfig, clock: C) -> BenchResult<Self> {
        config.validate()?;
        log::debug!(
            "runner: {} iterations (+{} warmup), clock={}",
            config.iterations,
            config.warmup,
            clock.name()
        );
        Ok(Self { config, clock, sink: Sink::new() })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Warmup calls, then timed calls. Every result goes to the sink.
    pub fn time_kernel<T: SumElement>(&mut self, kernel: &Kernel<T>, data: &[T]) -> TimingStats {
        for _ in 0..self.config.warmup {
            let r = kernel.call(std::hint::black_box(data));
            self.sink.observe(r);
        }

        let mut samples = SampleAccumulator::new();
        for _ in 0..self.config.iterations {
            let start = self.clock.now_ns();
            let r = kernel.call(std::hint::black_box(data));
            let end = self.clock.now_ns();
            self.sink.observe(r);
            samples.record(end.saturating_sub(start));
        }
        samples.finish()
    }

    /// One untimed call compared against `expected` within the tolerance.
    pub fn validate_kernel<T: SumElement>(
        &mut self,
        kernel: &Kernel<T>,
        data: &[T],
        expected: f64,
    ) -> Validation {
        let r = kernel.call(std::hint::black_box(data));
        self.sink.observe(r);
        let validation = Validation::check(r.to_f64(), expected, self.config.tolerance);
        if let Validation::Mismatch { got, expected } = validation {
            log::warn!("{} returned {got:.2}, expected {expected:.0}", kernel.name());
        }
        validation
    }

    /// Benchmark every registered kernel on `data`, in order.
    ///
    /// The first kernel is the speedup baseline.
    pub fn run_suite<T: SumElement>(
        &mut self,
        title: &str,
        registry: &KernelRegistry<T>,
        data: &[T],
        expected: f64,
    ) -> BenchResult<SuiteReport> {
        if registry.is_empty() {
            return Err(BenchError::InvalidConfig("kernel registry is empty".into()));
        }
        let workload = reduction_workload(data.len(), T::size_bytes());
        let mut results = Vec::with_capacity(registry.len());
        let mut baseline_ns = 0.0;

        for (i, kernel) in registry.iter().enumerate() {
            let stats = self.time_kernel(kernel, data);
            let validation = self.validate_kernel(kernel, data, expected);

            if i == 0 {
                baseline_ns = stats.avg_ns;
            }
            let speedup = if i == 0 {
                1.0
            } else if stats.avg_ns > 0.0 {
                baseline_ns / stats.avg_ns
            } else {
                0.0
            };

            log::debug!(
                "{} [{}]: avg {:.2} ns, min {} ns, max {} ns",
                kernel.name(),
                T::NAME,
                stats.avg_ns,
                stats.min_ns,
                stats.max_ns
            );

            results.push(TrialResult {
                name: kernel.name().to_string(),
                unroll: kernel.unroll(),
                accumulators: kernel.accumulation().accumulators(),
                stats,
                bandwidth_gbs: bandwidth_gbs(workload, stats.avg_ns),
                speedup,
                validation,
            });
        }

        Ok(SuiteReport {
            title: title.to_string(),
            element: T::NAME.to_string(),
            elem_bytes: T::size_bytes(),
            len: data.len(),
            workload,
            peak: self.config.hw_peak(),
            iterations: self.config.iterations,
            warmup: self.config.warmup,
            clock: self.clock.name().to_string(),
            results,
        })
    }

    /// Allocate an array of `config.len` ones and run the suite on it.
    ///
    /// The expected sum is exactly the length.
    pub fn run_ones_suite<T: SumElement>(
        &mut self,
        title: &str,
        registry: &KernelRegistry<T>,
    ) -> BenchResult<SuiteReport> {
        let data = AlignedBuffer::<T>::ones(self.config.len)?;
        let expected = data.len() as f64;
        self.run_suite(title, registry, &data, expected)
    }
}
