//! ilp-kernels: micro-benchmarks for instruction-level parallelism.
//!
//! Measures how loop unrolling, independent accumulators, element width and
//! loop-carried dependencies change the throughput of simple loops:
//! - **Summation kernels**: explicit unroll factors 1..32 and 4/8-way ILP
//! - **Width study**: the same kernels over f64, f32, f16, i32 and i16
//! - **Dependency chains**: a sequential recurrence next to independent
//!   stages, plus a naive dense matmul, with Amdahl/Gustafson projections
//!
//! # Quick Start
//!
//! ```no_run
//! use ilp_kernels::{BenchConfig, BenchRunner, KernelRegistry};
//!
//! let mut runner = BenchRunner::new(BenchConfig::default())?;
//! let report = runner.run_ones_suite("unrolling", &KernelRegistry::<f64>::unrolling_suite())?;
//! print!("{}", report.table_string());
//! # Ok::<(), ilp_kernels::BenchError>(())
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod kernels;
pub mod ops;
pub mod profiling;
pub mod traits;

pub use buffer::AlignedBuffer;
pub use config::{BenchConfig, ChainConfig, MatmulConfig, StreamConfig};
pub use error::{BenchError, BenchResult};
pub use kernels::{Accumulation, Kernel, KernelRegistry, SumFn};
pub use profiling::{BenchRunner, Clock, MonotonicClock, PlatformClock, Sink, SuiteReport};
pub use traits::{Accumulator, SumElement};

pub use half::f16;
