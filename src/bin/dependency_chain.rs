//! Sequential recurrence next to independent array stages, with the
//! resulting Amdahl/Gustafson projections.
//!
//! Usage:
//!   cargo run --release --bin dependency_chain

use std::process::ExitCode;

use ilp_kernels::ops::ChainPipeline;
use ilp_kernels::profiling::report::{scaling_table_string, stage_table_string};
use ilp_kernels::profiling::scaling::DEFAULT_PROCESSORS;
use ilp_kernels::profiling::timer::process_clock;
use ilp_kernels::{BenchResult, ChainConfig, Sink};

fn run() -> BenchResult<()> {
    let config = ChainConfig::default();
    let mut pipeline = ChainPipeline::new(config)?;
    let mut sink = Sink::new();

    println!("Dependency chain: {} elements\n", config.len);

    let outcome = pipeline.run(process_clock(), &mut sink);

    print!("{}", stage_table_string(&outcome.stages));
    println!("\nAdd stage: {:.2} GB/s", outcome.add_bandwidth_gbs());
    println!("Result:   {:.6e}", outcome.result);
    println!(
        "Expected: {:.6e} (relative error {:.2e})\n",
        outcome.expected,
        outcome.relative_error()
    );
    print!("{}", scaling_table_string(outcome.serial_fraction(), &DEFAULT_PROCESSORS)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dependency_chain: {e}");
            ExitCode::FAILURE
        }
    }
}
