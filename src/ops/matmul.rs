//! Dense square matrix multiply over deterministically generated inputs.
//!
//! Naive ijk triple loop with no tiling or blocking: O(n^3) multiply-adds.
//! Inputs come from a sequential noise recurrence:
//!
//! ```text
//! noise[0] = 1, noise[i] = noise[i-1] * factor
//! A[i][j]  = noise[i] + i + j
//! B[i][j]  = noise[j] + i - j
//! ```

use serde::Serialize;

use crate::buffer::AlignedBuffer;
use crate::config::MatmulConfig;
use crate::error::{BenchError, BenchResult};
use crate::ops::chain::fill_recurrence;
use crate::profiling::report::{serial_fraction, StageTiming};
use crate::profiling::sink::Sink;
use crate::profiling::timer::{Clock, Stopwatch};

/// Row-major n x n matrix of f64.
pub struct Matrix {
    n: usize,
    data: AlignedBuffer<f64>,
}

impl Matrix {
    pub fn zeros(n: usize) -> BenchResult<Self> {
        let len = n
            .checked_mul(n)
            .ok_or_else(|| BenchError::Layout(format!("{n}x{n} matrix overflows usize")))?;
        Ok(Self { n, data: AlignedBuffer::filled(len, 0.0)? })
    }

    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> BenchResult<Self> {
        let mut m = Self::zeros(n)?;
        for (idx, slot) in m.data.iter_mut().enumerate() {
            *slot = f(idx / n, idx % n);
        }
        Ok(m)
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

impl std::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix").field("n", &self.n).finish()
    }
}

/// Sequential noise vector of length `n`.
pub fn generate_noise(n: usize, factor: f64) -> BenchResult<AlignedBuffer<f64>> {
    let mut noise = AlignedBuffer::filled(n, 0.0)?;
    fill_recurrence(&mut noise, 1.0, factor);
    Ok(noise)
}

/// Build A and B from `noise` (their size is `noise.len()`).
pub fn init_matrices(noise: &[f64]) -> BenchResult<(Matrix, Matrix)> {
    let n = noise.len();
    let a = Matrix::from_fn(n, |i, j| noise[i] + i as f64 + j as f64)?;
    let b = Matrix::from_fn(n, |i, j| noise[j] + i as f64 - j as f64)?;
    Ok((a, b))
}

/// `C = A * B`, accumulating each `C[i][j]` over k in order.
#[inline(never)]
pub fn matmul_naive(a: &Matrix, b: &Matrix, c: &mut Matrix) {
    let n = a.n;
    assert!(b.n == n && c.n == n, "matmul_naive: dimension mismatch");
    for i in 0..n {
        let a_row = a.row(i);
        for j in 0..n {
            let mut acc = 0.0;
            for (k, &a_ik) in a_row.iter().enumerate() {
                acc += a_ik * b.data[k * n + j];
            }
            c.data[i * n + j] = acc;
        }
    }
}

/// Sum of all entries in row-major order.
pub fn checksum(c: &Matrix) -> f64 {
    let mut sum = 0.0;
    for &x in c.as_slice() {
        sum += x;
    }
    sum
}

/// `sum(A * B)` without the multiply: `sum_k colsum(A)[k] * rowsum(B)[k]`.
///
/// O(n^2), so it can validate the O(n^3) result on inputs of any size.
pub fn checksum_by_marginals(a: &Matrix, b: &Matrix) -> f64 {
    let n = a.n;
    let mut col_sums = vec![0.0; n];
    for i in 0..n {
        for (s, &x) in col_sums.iter_mut().zip(a.row(i)) {
            *s += x;
        }
    }
    col_sums
        .iter()
        .enumerate()
        .map(|(k, &cs)| cs * b.row(k).iter().sum::<f64>())
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatmulOutcome {
    pub n: usize,
    pub checksum: f64,
    /// Checksum predicted from row/column sums of the inputs.
    pub reference: f64,
    pub stages: Vec<StageTiming>,
}

impl MatmulOutcome {
    pub fn serial_fraction(&self) -> f64 {
        serial_fraction(&self.stages)
    }

    pub fn relative_error(&self) -> f64 {
        if self.reference == 0.0 {
            self.checksum.abs()
        } else {
            ((self.checksum - self.reference) / self.reference).abs()
        }
    }

    /// Achieved GFLOPS of the multiply stage (2 n^3 flops).
    pub fn matmul_gflops(&self) -> f64 {
        let flops = 2.0 * (self.n as f64).powi(3);
        self.stages
            .iter()
            .find(|s| s.name == "matmul")
            .filter(|s| s.elapsed_ns > 0)
            .map(|s| flops / s.elapsed_ns as f64)
            .unwrap_or(0.0)
    }
}

/// Generate inputs, multiply and checksum, timing each stage.
pub fn run_matmul<C: Clock>(
    config: &MatmulConfig,
    clock: &C,
    sink: &mut Sink,
) -> BenchResult<MatmulOutcome> {
    config.validate()?;
    let n = config.n;
    let mut stages = Vec::with_capacity(4);

    let mut sw = Stopwatch::start(clock);
    let noise = generate_noise(n, config.factor)?;
    sw.stop(clock);
    stages.push(stage("noise", &sw, true));

    let mut sw = Stopwatch::start(clock);
    let (a, b) = init_matrices(&noise)?;
    sw.stop(clock);
    stages.push(stage("init", &sw, false));

    let mut c = Matrix::zeros(n)?;
    let mut sw = Stopwatch::start(clock);
    matmul_naive(std::hint::black_box(&a), std::hint::black_box(&b), &mut c);
    sw.stop(clock);
    stages.push(stage("matmul", &sw, false));

    let mut sw = Stopwatch::start(clock);
    let sum = checksum(std::hint::black_box(&c));
    sw.stop(clock);
    stages.push(stage("checksum", &sw, false));

    sink.observe(sum);
    log::debug!("matmul {n}x{n}: checksum {sum:.6e}");
    Ok(MatmulOutcome { n, checksum: sum, reference: checksum_by_marginals(&a, &b), stages })
}

fn stage(name: &str, sw: &Stopwatch, sequential: bool) -> StageTiming {
    StageTiming { name: name.to_string(), elapsed_ns: sw.elapsed_ns(), sequential }
}
