//! Parity against the golden scalar loops in scalar-ops.
//!
//! The references are plain C-ABI loops compiled at opt-level 1, so they keep
//! their single-accumulator evaluation order.

use ilp_kernels::kernels::{sum_ilp_8, sum_unroll_1, sum_unroll_32};
use ilp_kernels::ops::chain::{add_elementwise, fill_recurrence};
use ilp_kernels::ops::matmul::{
    checksum, checksum_by_marginals, generate_noise, init_matrices, matmul_naive, Matrix,
};

/// Deterministic data in [-1, 1).
fn generate(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
        })
        .collect()
}

#[test]
fn test_baseline_sum_bit_identical() {
    for n in [0, 1, 7, 1000, 65_537] {
        let data = generate(n, 42 + n as u64);
        let reference = unsafe { scalar_ops::reduce::scalar_sum_f64(data.as_ptr(), data.len()) };
        assert_eq!(sum_unroll_1(&data).to_bits(), reference.to_bits(), "n={n}");
    }
}

#[test]
fn test_f32_baseline_bit_identical() {
    let data: Vec<f32> = generate(10_001, 7).into_iter().map(|x| x as f32).collect();
    let reference = unsafe { scalar_ops::reduce::scalar_sum_f32(data.as_ptr(), data.len()) };
    assert_eq!(sum_unroll_1(&data).to_bits(), reference.to_bits());
}

#[test]
fn test_reordered_sums_close_to_reference() {
    let data = generate(1_000_003, 3);
    let reference = unsafe { scalar_ops::reduce::scalar_sum_f64(data.as_ptr(), data.len()) };
    let bound = 2.0 * data.len() as f64 * f64::EPSILON * data.iter().map(|x| x.abs()).sum::<f64>();
    assert!((sum_unroll_32(&data) - reference).abs() <= bound);
    assert!((sum_ilp_8(&data) - reference).abs() <= bound);
}

#[test]
fn test_integer_sums_match() {
    let ints: Vec<i32> = (0..50_000).map(|i| (i * 7919 % 20_001) - 10_000).collect();
    let shorts: Vec<i16> = (0..50_000).map(|i| (i * 31 % 65_536 - 32_768) as i16).collect();
    unsafe {
        assert_eq!(sum_ilp_8(&ints), scalar_ops::reduce::scalar_sum_i32(ints.as_ptr(), ints.len()));
        assert_eq!(
            sum_unroll_32(&shorts),
            scalar_ops::reduce::scalar_sum_i16(shorts.as_ptr(), shorts.len())
        );
    }
}

#[test]
fn test_recurrence_bit_identical() {
    let n = 100_000;
    let mut ours = vec![0.0; n];
    let mut reference = vec![0.0; n];
    fill_recurrence(&mut ours, 1.0, 1.0000001);
    unsafe { scalar_ops::chain::scalar_recurrence_f64(reference.as_mut_ptr(), n, 1.0, 1.0000001) };
    assert_eq!(ours, reference);
}

#[test]
fn test_elementwise_add_matches() {
    let a = generate(4099, 1);
    let b = generate(4099, 2);
    let mut ours = vec![0.0; a.len()];
    let mut reference = vec![0.0; a.len()];
    add_elementwise(&a, &b, &mut ours);
    unsafe {
        scalar_ops::blas::scalar_vec_add_f64(
            a.as_ptr(),
            b.as_ptr(),
            reference.as_mut_ptr(),
            a.len(),
        )
    };
    assert_eq!(ours, reference);
}

#[test]
fn test_matmul_matches_reference_and_marginals() {
    let n = 512;
    let noise = generate_noise(n, 1.0000001).unwrap();
    let (a, b) = init_matrices(&noise).unwrap();

    let mut ours = Matrix::zeros(n).unwrap();
    matmul_naive(&a, &b, &mut ours);

    let mut reference = vec![0.0; n * n];
    unsafe {
        scalar_ops::blas::scalar_matmul_f64(
            a.as_slice().as_ptr(),
            b.as_slice().as_ptr(),
            reference.as_mut_ptr(),
            n,
        )
    };

    assert_eq!(ours.as_slice(), &reference[..]);

    let sum = checksum(&ours);
    let marginals = checksum_by_marginals(&a, &b);
    assert!(((sum - marginals) / marginals).abs() < 1e-10, "{sum} vs {marginals}");
}
