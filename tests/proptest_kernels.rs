//! Property-based tests for the summation kernels.
//!
//! Uses proptest to verify invariants that must hold for all inputs:
//! - Arrays of ones sum exactly to their length
//! - Every tail length `len mod U` is folded in exactly once
//! - Reordered float sums stay within the classic rounding bound
//! - Integer sums are exact and widen instead of overflowing

use proptest::prelude::*;

use ilp_kernels::kernels::{sum_ilp, sum_unroll_1};
use ilp_kernels::{f16, Accumulator, AlignedBuffer, KernelRegistry, SumElement};

fn check_ones<T: SumElement>(len: usize) -> Result<(), TestCaseError> {
    let data = AlignedBuffer::<T>::ones(len).unwrap();
    for kernel in &KernelRegistry::<T>::width_suite() {
        prop_assert_eq!(kernel.call(&data).to_f64(), len as f64, "{} [{}]", kernel.name(), T::NAME);
    }
    Ok(())
}

/// Distinct small integers per index, so a dropped or doubled element
/// changes the sum.
fn indexed<T: SumElement>(len: usize) -> (Vec<T>, f64) {
    let values: Vec<i16> = (0..len).map(|i| (i % 61) as i16 + 1).collect();
    let expected = values.iter().map(|&v| v as f64).sum();
    (values.into_iter().map(T::from_i16).collect(), expected)
}

fn check_indexed<T: SumElement>(len: usize) -> Result<(), TestCaseError> {
    let (data, expected) = indexed::<T>(len);
    for kernel in &KernelRegistry::<T>::unrolling_suite() {
        prop_assert_eq!(
            kernel.call(&data).to_f64(),
            expected,
            "{} [{}] len={}",
            kernel.name(),
            T::NAME,
            len
        );
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Exact sums on ones and indexed data
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_ones_sum_to_len(len in 0usize..3000) {
        check_ones::<f64>(len)?;
        check_ones::<f32>(len)?;
        check_ones::<f16>(len)?;
        check_ones::<i32>(len)?;
        check_ones::<i16>(len)?;
    }

    #[test]
    fn prop_generic_ilp_matches_indexed(len in 0usize..500) {
        let (data, expected) = indexed::<f64>(len);
        prop_assert_eq!(sum_ilp::<f64, 2>(&data), expected);
        prop_assert_eq!(sum_ilp::<f64, 3>(&data), expected);
        prop_assert_eq!(sum_ilp::<f64, 16>(&data), expected);
    }
}

/// Every remainder class 0..U-1 for every U up to 32, plus a few full blocks.
#[test]
fn test_every_tail_length() {
    for len in 0..=(3 * 32 + 31) {
        check_indexed::<f64>(len).unwrap();
        check_indexed::<f32>(len).unwrap();
        check_indexed::<f16>(len).unwrap();
        check_indexed::<i32>(len).unwrap();
        check_indexed::<i16>(len).unwrap();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Rounding bound for reordered float sums
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    /// |sum_k - sum_1| <= 2 * n * eps * sum|x|: both orders are within
    /// n * eps * sum|x| of the exact sum.
    #[test]
    fn prop_f64_reorder_within_bound(data in prop::collection::vec(-1.0f64..1.0, 0..4000)) {
        let reference = sum_unroll_1(&data);
        let abs_sum = data.iter().map(|x| x.abs()).sum::<f64>();
        let bound = 2.0 * data.len() as f64 * f64::EPSILON * abs_sum;
        for kernel in &KernelRegistry::<f64>::unrolling_suite() {
            let got = kernel.call(&data);
            prop_assert!(
                (got - reference).abs() <= bound,
                "{}: {} vs {} (bound {})",
                kernel.name(),
                got,
                reference,
                bound
            );
        }
    }

    #[test]
    fn prop_f32_reorder_within_bound(data in prop::collection::vec(-1.0f32..1.0, 0..2000)) {
        let reference = sum_unroll_1(&data) as f64;
        let abs_sum = data.iter().map(|x| x.abs() as f64).sum::<f64>();
        let bound = 2.0 * data.len() as f64 * f32::EPSILON as f64 * abs_sum;
        for kernel in &KernelRegistry::<f32>::unrolling_suite() {
            let got = kernel.call(&data) as f64;
            prop_assert!(
                (got - reference).abs() <= bound,
                "{}: {} vs {}",
                kernel.name(),
                got,
                reference
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Integer sums are exact
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_i32_exact(data in prop::collection::vec(any::<i32>(), 0..2000)) {
        let expected: i64 = data.iter().map(|&x| x as i64).sum();
        for kernel in &KernelRegistry::<i32>::unrolling_suite() {
            prop_assert_eq!(kernel.call(&data), expected, "{}", kernel.name());
        }
    }

    #[test]
    fn prop_i16_exact(data in prop::collection::vec(any::<i16>(), 0..2000)) {
        let expected: i64 = data.iter().map(|&x| x as i64).sum();
        for kernel in &KernelRegistry::<i16>::width_suite() {
            prop_assert_eq!(kernel.call(&data), expected, "{}", kernel.name());
        }
    }
}
