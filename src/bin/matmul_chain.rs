//! Naive dense matmul fed by a sequential noise vector.
//!
//! Usage:
//!   cargo run --release --bin matmul_chain

use std::process::ExitCode;

use ilp_kernels::ops::run_matmul;
use ilp_kernels::profiling::report::{scaling_table_string, stage_table_string};
use ilp_kernels::profiling::scaling::DEFAULT_PROCESSORS;
use ilp_kernels::profiling::timer::process_clock;
use ilp_kernels::{BenchResult, MatmulConfig, Sink};

fn run() -> BenchResult<()> {
    let config = MatmulConfig::default();
    let mut sink = Sink::new();

    println!("Matrix multiply: {0} x {0}\n", config.n);

    let outcome = run_matmul(&config, process_clock(), &mut sink)?;

    print!("{}", stage_table_string(&outcome.stages));
    println!("\nResult:    {:.6e}", outcome.checksum);
    println!(
        "Marginals: {:.6e} (relative error {:.2e})",
        outcome.reference,
        outcome.relative_error()
    );
    println!("Matmul:    {:.2} GFLOPS\n", outcome.matmul_gflops());
    print!("{}", scaling_table_string(outcome.serial_fraction(), &DEFAULT_PROCESSORS)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("matmul_chain: {e}");
            ExitCode::FAILURE
        }
    }
}
