//! Two independent multiply-add streams: naive loop vs hoisted product with
//! four accumulators per stream.
//!
//! Usage:
//!   cargo run --release --bin ilp_streams

use std::process::ExitCode;

use ilp_kernels::ops::run_streams;
use ilp_kernels::profiling::timer::process_clock;
use ilp_kernels::{BenchResult, Sink, StreamConfig};

fn run() -> BenchResult<()> {
    let config = StreamConfig::default();
    let mut sink = Sink::new();

    println!(
        "Dual-stream ILP ({} iterations, a = {}, b = {})\n",
        config.iterations, config.a, config.b
    );

    let [naive, manual] = run_streams(&config, process_clock(), &mut sink);
    for t in [&naive, &manual] {
        println!("{:<28} Time: {:.6} seconds", t.name, t.elapsed_secs());
        println!("{:<28} x = {:.6}, y = {:.6}", "", t.x, t.y);
    }
    if manual.elapsed_ns > 0 {
        println!("\nSpeedup: {:.2}x", naive.elapsed_ns as f64 / manual.elapsed_ns as f64);
    }
    if naive.x != manual.x || naive.y != manual.y {
        log::warn!(
            "stream results differ: naive ({}, {}), manual ({}, {})",
            naive.x,
            naive.y,
            manual.x,
            manual.y
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ilp_streams: {e}");
            ExitCode::FAILURE
        }
    }
}
