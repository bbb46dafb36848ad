//! Scalar reference routines: `extern "C"` plain serial loops.
//!
//! These are the golden oracle for the `ilp-kernels` tests: one accumulator,
//! one element per iteration, no unrolling. The crate is compiled with
//! `opt-level = 1` (configured in the workspace root Cargo.toml) so the loop
//! shape stays close to what is written here.

pub mod blas;
pub mod chain;
pub mod reduce;
