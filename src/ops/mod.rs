//! Single-run experiments outside the summation suites.

pub mod chain;
pub mod matmul;
pub mod streams;

pub use chain::{ChainOutcome, ChainPipeline};
pub use matmul::{run_matmul, Matrix, MatmulOutcome};
pub use streams::{run_streams, StreamTiming};
