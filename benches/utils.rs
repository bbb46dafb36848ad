#![allow(dead_code)]

use rand::Rng;

/// Bytes read by one pass of a reduction over `n` elements.
pub fn reduction_bytes(n: usize, elem_bytes: usize) -> u64 {
    n as u64 * elem_bytes as u64
}

/// Matmul GFLOPS: 2*n^3 / duration / 1e9
pub fn matmul_gflops(n: usize, duration_secs: f64) -> f64 {
    2.0 * (n as f64).powi(3) / duration_secs / 1e9
}

/// Random f64 vector in [-1.0, 1.0)
pub fn random_f64_vec(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Random f32 vector in [-1.0, 1.0)
pub fn random_f32_vec(n: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Random i32 vector with small magnitudes, so sums stay exact
pub fn random_i32_vec(n: usize) -> Vec<i32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-1000..1000)).collect()
}

/// Random i16 vector
pub fn random_i16_vec(n: usize) -> Vec<i16> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(i16::MIN..=i16::MAX)).collect()
}

pub fn size_label(n: usize) -> String {
    match n {
        n if n >= 1 << 20 && n % (1 << 20) == 0 => format!("{}M", n >> 20),
        n if n >= 1 << 10 && n % (1 << 10) == 0 => format!("{}K", n >> 10),
        _ => format!("{n}"),
    }
}
