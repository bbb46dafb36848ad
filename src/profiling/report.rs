//! Fixed-width text tables and JSON export of benchmark results.
//!
//! All formatting is deterministic: the same results always render to the
//! same strings. Binaries print these to stdout.

use std::path::Path;

use serde::Serialize;

use crate::error::BenchResult;
use crate::profiling::counters::{mib, HwPeak, Workload};
use crate::profiling::runner::{TrialResult, Validation};
use crate::profiling::scaling;

const RULE_WIDTH: usize = 80;

/// Results of one suite run over one element type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    pub title: String,
    /// Element type name ("double", "float", ...).
    pub element: String,
    pub elem_bytes: usize,
    pub len: usize,
    /// Bytes streamed per kernel call.
    pub workload: Workload,
    pub peak: HwPeak,
    pub iterations: usize,
    pub warmup: usize,
    pub clock: String,
    pub results: Vec<TrialResult>,
}

impl SuiteReport {
    /// Average time of the first (baseline) kernel.
    pub fn baseline_ns(&self) -> f64 {
        self.results.first().map(|r| r.stats.avg_ns).unwrap_or(0.0)
    }

    /// Kernel with the lowest average time. Ties keep the earliest.
    pub fn best(&self) -> Option<&TrialResult> {
        self.results.iter().fold(None, |best: Option<&TrialResult>, r| match best {
            Some(b) if b.stats.avg_ns <= r.stats.avg_ns => Some(b),
            _ => Some(r),
        })
    }

    pub fn theoretical_min_ns(&self) -> f64 {
        self.peak.theoretical_min_ns(self.workload)
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.validation.passed())
    }

    /// Configuration and theoretical floor.
    pub fn header_string(&self) -> String {
        let mut s = String::with_capacity(512);
        s.push_str("Configuration:\n");
        s.push_str(&format!("  Array size N:        {} elements\n", self.len));
        s.push_str(&format!(
            "  Data type:           {} ({} bytes)\n",
            self.element, self.elem_bytes
        ));
        s.push_str(&format!("  Total data size:     {:.2} MB\n", mib(self.workload.bytes)));
        s.push_str(&format!(
            "  Iterations:          {} (+ {} warmup)\n",
            self.iterations, self.warmup
        ));
        s.push_str(&format!("  Expected sum:        {}\n", self.len));
        s.push_str(&format!("  Clock:               {}\n\n", self.clock));
        s.push_str("Theoretical Analysis:\n");
        s.push_str(&format!(
            "  Memory bandwidth:    {:.0} GB/s (M4 Max estimate)\n",
            self.peak.bandwidth_gbs
        ));
        s.push_str(&format!("  Data to transfer:    {:.2} MB\n", mib(self.workload.bytes)));
        s.push_str(&format!(
            "  Theoretical min:     {:.2} ns (memory-bound limit)\n",
            self.theoretical_min_ns()
        ));
        s
    }

    /// One row per kernel, followed by a warning line for each failed check.
    pub fn table_string(&self) -> String {
        let mut s = String::with_capacity(256 + 96 * self.results.len());
        s.push_str(&format!(
            "{:<25} {:>12} {:>12} {:>12} {:>10} {:>12}\n",
            "Method", "Avg (ns)", "Min (ns)", "Max (ns)", "Speedup", "BW (GB/s)"
        ));
        s.push_str(&format!("{:-<RULE_WIDTH$}\n", ""));
        for r in &self.results {
            s.push_str(&format!(
                "{:<25} {:>12.2} {:>12.2} {:>12.2} {:>9.2}x {:>11.2}\n",
                r.name,
                r.stats.avg_ns,
                r.stats.min_ns as f64,
                r.stats.max_ns as f64,
                r.speedup,
                r.bandwidth_gbs
            ));
            if let Validation::Mismatch { got, expected } = r.validation {
                s.push_str(&format!(
                    "WARNING: {} returned {got:.2}, expected {expected:.0}\n",
                    r.name
                ));
            }
        }
        s.push_str(&format!("{:-<RULE_WIDTH$}\n", ""));
        s
    }

    /// Baseline, best kernel and efficiency against the theoretical floor.
    pub fn summary_string(&self) -> String {
        let baseline = self.baseline_ns();
        let theoretical = self.theoretical_min_ns();
        let mut s = String::with_capacity(384);
        s.push_str("Summary:\n");
        s.push_str(&format!("  Baseline (U=1):      {baseline:.2} ns\n"));
        match self.best() {
            Some(best) => {
                let best_ns = best.stats.avg_ns;
                let speedup = if best_ns > 0.0 { baseline / best_ns } else { 0.0 };
                s.push_str(&format!("  Best method:         {}\n", best.name));
                s.push_str(&format!("  Best time:           {best_ns:.2} ns\n"));
                s.push_str(&format!("  Best speedup:        {speedup:.2}x\n"));
                s.push_str(&format!("  Theoretical min:     {theoretical:.2} ns\n"));
                s.push_str(&format!(
                    "  Efficiency:          {:.1}% of theoretical peak\n",
                    self.peak.efficiency(self.workload, best_ns) * 100.0
                ));
            }
            None => s.push_str("  (no kernels run)\n"),
        }
        s
    }

    /// Banner used when several element types are reported in one run.
    ///
    /// Carries the memory-bound floor of this width.
    pub fn type_banner_string(&self) -> String {
        let rule = format!("{:=<RULE_WIDTH$}", "");
        format!(
            "\n{rule}\nData Type: {} ({} bytes)\nData size: {:.2} MB\n\
             Min time {}: {:.2} ns (memory-bound limit)\n{rule}\n",
            self.element,
            self.elem_bytes,
            mib(self.workload.bytes),
            self.element,
            self.theoretical_min_ns(),
        )
    }

    pub fn to_json(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> BenchResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Cross-type table: baseline vs best time and efficiency for every width.
pub fn width_summary_string(reports: &[SuiteReport]) -> String {
    let mut s = String::with_capacity(256 + 96 * reports.len());
    s.push_str(&format!("\n{:=<RULE_WIDTH$}\nSUMMARY\n{:=<RULE_WIDTH$}\n", "", ""));
    s.push_str(&format!(
        "{:<12} {:>12} {:>13} {:>13} {:>10} {:>11}\n",
        "Type", "Size", "Baseline", "Best", "Speedup", "Efficiency"
    ));
    s.push_str(&format!("{:-<RULE_WIDTH$}\n", ""));
    for r in reports {
        let baseline = r.baseline_ns();
        let best = r.best().map(|b| b.stats.avg_ns).unwrap_or(0.0);
        let speedup = if best > 0.0 { baseline / best } else { 0.0 };
        let efficiency = r.peak.efficiency(r.workload, best) * 100.0;
        s.push_str(&format!(
            "{:<12} {:>10} B {:>10.2} ns {:>10.2} ns {:>9.2}x {:>10.1}%\n",
            r.element, r.elem_bytes, baseline, best, speedup, efficiency
        ));
    }
    s
}

/// Wall time of one stage of a multi-stage experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub name: String,
    pub elapsed_ns: u64,
    /// True when each iteration depends on the previous one.
    pub sequential: bool,
}

/// Share of total time spent in sequential stages (0 when nothing ran).
pub fn serial_fraction(stages: &[StageTiming]) -> f64 {
    let total: u64 = stages.iter().map(|s| s.elapsed_ns).sum();
    if total == 0 {
        return 0.0;
    }
    let serial: u64 = stages.iter().filter(|s| s.sequential).map(|s| s.elapsed_ns).sum();
    serial as f64 / total as f64
}

pub fn stage_table_string(stages: &[StageTiming]) -> String {
    let total: u64 = stages.iter().map(|s| s.elapsed_ns).sum();
    let mut s = String::with_capacity(128 + 64 * stages.len());
    s.push_str(&format!("{:<24} {:>12} {:>14} {:>8}\n", "Stage", "Kind", "Time (ms)", "Share"));
    s.push_str(&format!("{:-<61}\n", ""));
    for st in stages {
        let share = if total > 0 { st.elapsed_ns as f64 / total as f64 * 100.0 } else { 0.0 };
        s.push_str(&format!(
            "{:<24} {:>12} {:>14.3} {:>7.1}%\n",
            st.name,
            if st.sequential { "sequential" } else { "independent" },
            st.elapsed_ns as f64 / 1e6,
            share
        ));
    }
    s.push_str(&format!("{:-<61}\n", ""));
    s.push_str(&format!("{:<24} {:>12} {:>14.3}\n", "Total", "", total as f64 / 1e6));
    s
}

/// Amdahl and Gustafson predictions at each processor count.
pub fn scaling_table_string(serial_fraction: f64, processors: &[u32]) -> BenchResult<String> {
    let mut s = String::with_capacity(128 + 48 * processors.len());
    s.push_str(&format!("Serial fraction fs = {:.5}%\n", serial_fraction * 100.0));
    s.push_str(&format!("{:>6} {:>14} {:>14}\n", "p", "Amdahl", "Gustafson"));
    for &p in processors {
        s.push_str(&format!(
            "{:>6} {:>13.2}x {:>13.2}x\n",
            p,
            scaling::amdahl(p, serial_fraction)?,
            scaling::gustafson(p, serial_fraction)?
        ));
    }
    let max = scaling::max_speedup(serial_fraction)?;
    if max.is_finite() {
        s.push_str(&format!("Maximum speedup (1/fs): {max:.2}x\n"));
    } else {
        s.push_str("Maximum speedup (1/fs): unbounded\n");
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiling::counters::reduction_workload;
    use crate::profiling::runner::TimingStats;

    fn trial(name: &str, avg: f64, speedup: f64, validation: Validation) -> TrialResult {
        TrialResult {
            name: name.to_string(),
            unroll: 1,
            accumulators: 1,
            stats: TimingStats {
                avg_ns: avg,
                min_ns: avg as u64,
                max_ns: avg as u64 + 10,
                iterations: 100,
            },
            bandwidth_gbs: 8_000_000.0 / avg,
            speedup,
            validation,
        }
    }

    fn sample_report() -> SuiteReport {
        SuiteReport {
            title: "unroll".into(),
            element: "double".into(),
            elem_bytes: 8,
            len: 1_000_000,
            workload: reduction_workload(1_000_000, 8),
            peak: HwPeak::default(),
            iterations: 100,
            warmup: 10,
            clock: "monotonic".into(),
            results: vec![
                trial("U=1  (baseline)", 400_000.0, 1.0, Validation::Passed),
                trial("U=8  (8 accum, ILP)", 80_000.0, 5.0, Validation::Passed),
                trial("U=2", 100_000.0, 4.0, Validation::Mismatch { got: 3.0, expected: 4.0 }),
            ],
        }
    }

    #[test]
    fn test_best_and_baseline() {
        let r = sample_report();
        assert_eq!(r.baseline_ns(), 400_000.0);
        assert_eq!(r.best().unwrap().name, "U=8  (8 accum, ILP)");
        assert!(!r.all_passed());
    }

    #[test]
    fn test_table_rows_and_warning() {
        let table = sample_report().table_string();
        assert!(table.starts_with("Method"));
        assert!(table.contains("U=1  (baseline)              400000.00"));
        assert!(table.contains("     1.00x"));
        assert!(table.contains("WARNING: U=2 returned 3.00, expected 4"));
        assert_eq!(table.lines().count(), 1 + 1 + 3 + 1 + 1);
    }

    #[test]
    fn test_summary_efficiency() {
        let summary = sample_report().summary_string();
        assert!(summary.contains("Best method:         U=8  (8 accum, ILP)"));
        assert!(summary.contains("Best speedup:        5.00x"));
        // 20000 ns floor / 80000 ns best = 25%.
        assert!(summary.contains("Efficiency:          25.0% of theoretical peak"));
    }

    #[test]
    fn test_header() {
        let header = sample_report().header_string();
        assert!(header.contains("Array size N:        1000000 elements"));
        assert!(header.contains("Data type:           double (8 bytes)"));
        assert!(header.contains("Theoretical min:     20000.00 ns"));
    }

    #[test]
    fn test_width_summary() {
        let s = width_summary_string(&[sample_report()]);
        assert!(s.contains("double"));
        assert!(s.contains("     5.00x"));
        assert!(s.contains("Efficiency"));
        // 20000 ns floor / 80000 ns best.
        assert!(s.contains("      25.0%"));
    }

    #[test]
    fn test_type_banner_carries_floor() {
        let banner = sample_report().type_banner_string();
        assert!(banner.contains("Data Type: double (8 bytes)"));
        assert!(banner.contains("Min time double: 20000.00 ns (memory-bound limit)"));
    }

    #[test]
    fn test_json_round_trip_fields() {
        let json = sample_report().to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["element"], "double");
        assert_eq!(v["results"][0]["validation"]["status"], "passed");
        assert_eq!(v["results"][2]["validation"]["status"], "mismatch");
        assert_eq!(v["workload"]["bytes"], 8_000_000);
    }

    #[test]
    fn test_serial_fraction() {
        let stages = vec![
            StageTiming { name: "recurrence".into(), elapsed_ns: 263, sequential: true },
            StageTiming { name: "add".into(), elapsed_ns: 737, sequential: false },
        ];
        assert!((serial_fraction(&stages) - 0.263).abs() < 1e-12);
        assert_eq!(serial_fraction(&[]), 0.0);
        let table = stage_table_string(&stages);
        assert!(table.contains("sequential"));
        assert!(table.contains("26.3%"));
    }

    #[test]
    fn test_scaling_table() {
        let s = scaling_table_string(0.263, &[1, 2, 64]).unwrap();
        assert!(s.contains("Maximum speedup (1/fs): 3.80x"));
        assert!(scaling_table_string(0.0, &[1]).unwrap().contains("unbounded"));
        assert!(scaling_table_string(1.5, &[1]).is_err());
    }
}
