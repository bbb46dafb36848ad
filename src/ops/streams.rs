//! Two independent multiply-add streams.
//!
//! The naive loop recomputes `a * b` and carries one dependency per stream.
//! The manual loop hoists the product and splits each stream across four
//! accumulators, unrolled by four.

use serde::Serialize;

use crate::config::StreamConfig;
use crate::profiling::sink::Sink;
use crate::profiling::timer::{Clock, Stopwatch};

/// `x = a*b + x; y = a*b + y` repeated `n` times.
#[inline(never)]
pub fn dual_stream_naive(n: usize, a: f64, b: f64) -> (f64, f64) {
    let mut x = 0.0;
    let mut y = 0.0;
    for _ in 0..n {
        x = a * b + x;
        y = a * b + y;
    }
    (x, y)
}

/// Same totals as [`dual_stream_naive`] with the product hoisted and
/// eight live accumulators.
#[inline(never)]
pub fn dual_stream_manual(n: usize, a: f64, b: f64) -> (f64, f64) {
    let ab = a * b;
    let (mut x1, mut x2, mut x3, mut x4) = (0.0, 0.0, 0.0, 0.0);
    let (mut y1, mut y2, mut y3, mut y4) = (0.0, 0.0, 0.0, 0.0);

    for _ in 0..n / 4 {
        x1 += ab;
        x2 += ab;
        x3 += ab;
        x4 += ab;

        y1 += ab;
        y2 += ab;
        y3 += ab;
        y4 += ab;
    }
    for _ in 0..n % 4 {
        x1 += ab;
        y1 += ab;
    }

    (x1 + x2 + x3 + x4, y1 + y2 + y3 + y4)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamTiming {
    pub name: &'static str,
    pub elapsed_ns: u64,
    pub x: f64,
    pub y: f64,
}

impl StreamTiming {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ns as f64 / 1e9
    }
}

type StreamFn = fn(usize, f64, f64) -> (f64, f64);

fn time_stream<C: Clock>(
    name: &'static str,
    f: StreamFn,
    config: &StreamConfig,
    clock: &C,
    sink: &mut Sink,
) -> StreamTiming {
    let (n, a, b) = std::hint::black_box((config.iterations, config.a, config.b));
    let mut sw = Stopwatch::start(clock);
    let (x, y) = f(n, a, b);
    sw.stop(clock);
    sink.observe(x);
    sink.observe(y);
    log::debug!("{name}: {} ns", sw.elapsed_ns());
    StreamTiming { name, elapsed_ns: sw.elapsed_ns(), x, y }
}

/// Time the naive then the manual variant once each.
pub fn run_streams<C: Clock>(
    config: &StreamConfig,
    clock: &C,
    sink: &mut Sink,
) -> [StreamTiming; 2] {
    [
        time_stream("naive", dual_stream_naive, config, clock, sink),
        time_stream("manual (hoisted, 4 accum)", dual_stream_manual, config, clock, sink),
    ]
}
