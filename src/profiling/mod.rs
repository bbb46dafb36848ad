//! Benchmark harness: clocks, timed trials, bandwidth accounting and reports.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ilp_kernels::config::BenchConfig;
//! use ilp_kernels::kernels::KernelRegistry;
//! use ilp_kernels::profiling::BenchRunner;
//!
//! let mut runner = BenchRunner::new(BenchConfig::default()).unwrap();
//! let report = runner
//!     .run_ones_suite("unrolling", &KernelRegistry::<f64>::unrolling_suite())
//!     .unwrap();
//! print!("{}", report.table_string());
//! print!("{}", report.summary_string());
//! ```
//!
//! Every kernel result is routed through the runner's [`Sink`], so the
//! optimizer cannot drop a timed call whose value is otherwise unused.

pub mod counters;
pub mod report;
pub mod runner;
pub mod scaling;
pub mod sink;
pub mod timer;

pub use counters::{HwPeak, Workload};
pub use report::{StageTiming, SuiteReport};
pub use runner::{BenchRunner, TimingStats, TrialResult, Validation};
pub use sink::Sink;
pub use timer::{Clock, MonotonicClock, PlatformClock, Stopwatch};
