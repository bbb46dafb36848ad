//! Loop unrolling and multiple-accumulator sums over one million doubles.
//!
//! Usage:
//!   cargo run --release --bin unroll_sum
//!   RUST_LOG=debug cargo run --release --bin unroll_sum

use std::process::ExitCode;

use ilp_kernels::{BenchConfig, BenchResult, BenchRunner, KernelRegistry};

fn run() -> BenchResult<()> {
    let config = BenchConfig::default();
    let mut runner = BenchRunner::new(config)?;

    println!("Loop Unrolling Benchmark");
    println!("========================\n");

    let report = runner.run_ones_suite("unrolling", &KernelRegistry::<f64>::unrolling_suite())?;

    print!("{}", report.header_string());
    println!("\nBenchmark Results:");
    print!("{}", report.table_string());
    println!();
    print!("{}", report.summary_string());
    println!(
        "\nSink checksum: {:.0} ({} results)",
        runner.sink().checksum(),
        runner.sink().observed()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("unroll_sum: {e}");
            ExitCode::FAILURE
        }
    }
}
