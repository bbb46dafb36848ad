//! Dependency-chain pipeline: one sequential stage, three independent ones.
//!
//! ```text
//! a[0] = seed, a[i] = a[i-1] * factor   sequential (loop-carried)
//! b[i] = fill                           independent
//! c[i] = a[i] + b[i]                    independent
//! sum(c)                                reduction
//! ```
//!
//! Everything runs on one thread. The independent stages are the ones a
//! compiler may vectorize; the recurrence cannot be reordered.

use serde::Serialize;

use crate::buffer::AlignedBuffer;
use crate::config::ChainConfig;
use crate::error::BenchResult;
use crate::profiling::counters::{bandwidth_gbs, elementwise_binary_workload};
use crate::profiling::report::{serial_fraction, StageTiming};
use crate::profiling::sink::Sink;
use crate::profiling::timer::{Clock, Stopwatch};

/// `a[0] = seed`, `a[i] = a[i-1] * factor`.
#[inline(never)]
pub fn fill_recurrence(a: &mut [f64], seed: f64, factor: f64) {
    let Some((first, rest)) = a.split_first_mut() else {
        return;
    };
    *first = seed;
    let mut prev = seed;
    for x in rest {
        prev *= factor;
        *x = prev;
    }
}

/// Closed form of the recurrence at index `i`: `seed * factor^i`.
pub fn recurrence_closed_form(seed: f64, factor: f64, i: usize) -> f64 {
    seed * factor.powf(i as f64)
}

#[inline(never)]
pub fn fill_constant(b: &mut [f64], value: f64) {
    b.fill(value);
}

/// `out[i] = a[i] + b[i]`.
#[inline(never)]
pub fn add_elementwise(a: &[f64], b: &[f64], out: &mut [f64]) {
    assert_eq!(a.len(), b.len(), "add_elementwise: input lengths differ");
    assert_eq!(a.len(), out.len(), "add_elementwise: output length differs");
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x + y;
    }
}

/// Serial single-accumulator reduction.
#[inline(never)]
pub fn reduce_sum(c: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &x in c {
        sum += x;
    }
    sum
}

/// Analytic value of `sum(c)`: geometric series of `a` plus `fill * len`.
pub fn expected_sum(config: &ChainConfig) -> f64 {
    let n = config.len as f64;
    let geometric = if config.factor == 1.0 {
        config.seed * n
    } else {
        config.seed * (config.factor.powf(n) - 1.0) / (config.factor - 1.0)
    };
    geometric + config.fill * n
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainOutcome {
    pub len: usize,
    pub result: f64,
    pub expected: f64,
    pub stages: Vec<StageTiming>,
}

impl ChainOutcome {
    pub fn serial_fraction(&self) -> f64 {
        serial_fraction(&self.stages)
    }

    /// Relative deviation of the reduction from the closed form.
    pub fn relative_error(&self) -> f64 {
        if self.expected == 0.0 {
            self.result.abs()
        } else {
            ((self.result - self.expected) / self.expected).abs()
        }
    }

    /// GB/s of the `c = a + b` stage: two streams read, one written.
    pub fn add_bandwidth_gbs(&self) -> f64 {
        let workload = elementwise_binary_workload(self.len, std::mem::size_of::<f64>());
        self.stages
            .iter()
            .find(|s| s.name == "add")
            .map(|s| bandwidth_gbs(workload, s.elapsed_ns as f64))
            .unwrap_or(0.0)
    }
}

/// Owns the three pipeline arrays.
pub struct ChainPipeline {
    config: ChainConfig,
    a: AlignedBuffer<f64>,
    b: AlignedBuffer<f64>,
    c: AlignedBuffer<f64>,
}

impl ChainPipeline {
    pub fn new(config: ChainConfig) -> BenchResult<Self> {
        config.validate()?;
        let a = AlignedBuffer::filled(config.len, 0.0)?;
        let b = AlignedBuffer::filled(config.len, 0.0)?;
        let c = AlignedBuffer::filled(config.len, 0.0)?;
        log::debug!("chain: allocated 3 x {} doubles", config.len);
        Ok(Self { config, a, b, c })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Recurrence values after the last `run`.
    pub fn recurrence(&self) -> &[f64] {
        &self.a
    }

    /// Run every stage once, timing each.
    pub fn run<C: Clock>(&mut self, clock: &C, sink: &mut Sink) -> ChainOutcome {
        let mut stages = Vec::with_capacity(4);

        let mut sw = Stopwatch::start(clock);
        fill_recurrence(&mut self.a, self.config.seed, self.config.factor);
        sw.stop(clock);
        stages.push(stage("recurrence", &sw, true));

        let mut sw = Stopwatch::start(clock);
        fill_constant(&mut self.b, self.config.fill);
        sw.stop(clock);
        stages.push(stage("init", &sw, false));

        let mut sw = Stopwatch::start(clock);
        add_elementwise(&self.a, &self.b, &mut self.c);
        sw.stop(clock);
        stages.push(stage("add", &sw, false));

        let mut sw = Stopwatch::start(clock);
        let result = reduce_sum(std::hint::black_box(self.c.as_slice()));
        sw.stop(clock);
        stages.push(stage("reduction", &sw, false));

        sink.observe(result);
        for s in &stages {
            log::debug!("chain stage {}: {} ns", s.name, s.elapsed_ns);
        }
        ChainOutcome { len: self.config.len, result, expected: expected_sum(&self.config), stages }
    }
}

fn stage(name: &str, sw: &Stopwatch, sequential: bool) -> StageTiming {
    StageTiming { name: name.to_string(), elapsed_ns: sw.elapsed_ns(), sequential }
}
