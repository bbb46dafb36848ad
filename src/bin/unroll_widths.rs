//! The width suite over every element type: double, float, half, int, short.
//!
//! Usage:
//!   cargo run --release --bin unroll_widths

use std::process::ExitCode;

use ilp_kernels::profiling::report::width_summary_string;
use ilp_kernels::{
    f16, BenchConfig, BenchResult, BenchRunner, KernelRegistry, SuiteReport, SumElement,
};

fn run_width<T: SumElement>(runner: &mut BenchRunner) -> BenchResult<SuiteReport> {
    let report = runner.run_ones_suite(T::NAME, &KernelRegistry::<T>::width_suite())?;
    print!("{}", report.type_banner_string());
    print!("{}", report.table_string());
    Ok(report)
}

fn run() -> BenchResult<()> {
    let config = BenchConfig::default();
    let mut runner = BenchRunner::new(config)?;

    println!("Loop Unrolling vs Data Type Width");
    println!("Array size: {} elements, {} iterations", config.len, config.iterations);

    let reports = vec![
        run_width::<f64>(&mut runner)?,
        run_width::<f32>(&mut runner)?,
        run_width::<f16>(&mut runner)?,
        run_width::<i32>(&mut runner)?,
        run_width::<i16>(&mut runner)?,
    ];

    print!("{}", width_summary_string(&reports));
    println!("\nSink checksum: {:.0}", runner.sink().checksum());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("unroll_widths: {e}");
            ExitCode::FAILURE
        }
    }
}
