//! Multi-accumulator summation (ILP variants).
//!
//! U independent partial sums break the single loop-carried dependency, so
//! up to U additions can be in flight per cycle. Partials are combined only
//! after the main loop; the tail goes into the first partial.

use crate::traits::SumElement;

/// U = 4 with 4 accumulators, combined as `s0 + s1 + s2 + s3`.
#[inline(never)]
pub fn sum_ilp_4<T: SumElement>(a: &[T]) -> T::Acc {
    let mut s0 = T::Acc::default();
    let mut s1 = T::Acc::default();
    let mut s2 = T::Acc::default();
    let mut s3 = T::Acc::default();
    let mut chunks = a.chunks_exact(4);
    for c in &mut chunks {
        s0 = s0 + c[0].widen();
        s1 = s1 + c[1].widen();
        s2 = s2 + c[2].widen();
        s3 = s3 + c[3].widen();
    }
    for &x in chunks.remainder() {
        s0 = s0 + x.widen();
    }
    s0 + s1 + s2 + s3
}

/// U = 8 with 8 accumulators, combined pairwise:
/// `(s0 + s1) + (s2 + s3) + (s4 + s5) + (s6 + s7)`.
#[inline(never)]
pub fn sum_ilp_8<T: SumElement>(a: &[T]) -> T::Acc {
    let mut s = [T::Acc::default(); 8];
    let mut chunks = a.chunks_exact(8);
    for c in &mut chunks {
        s[0] = s[0] + c[0].widen();
        s[1] = s[1] + c[1].widen();
        s[2] = s[2] + c[2].widen();
        s[3] = s[3] + c[3].widen();
        s[4] = s[4] + c[4].widen();
        s[5] = s[5] + c[5].widen();
        s[6] = s[6] + c[6].widen();
        s[7] = s[7] + c[7].widen();
    }
    for &x in chunks.remainder() {
        s[0] = s[0] + x.widen();
    }
    (s[0] + s[1]) + (s[2] + s[3]) + (s[4] + s[5]) + (s[6] + s[7])
}

/// Generic K-accumulator sum for experimenting with other widths.
///
/// Partials are reduced left to right after the main loop.
#[inline(never)]
pub fn sum_ilp<T: SumElement, const K: usize>(a: &[T]) -> T::Acc {
    assert!(K > 0, "sum_ilp needs at least one accumulator");
    let mut s = [T::Acc::default(); K];
    let mut chunks = a.chunks_exact(K);
    for c in &mut chunks {
        for (acc, &x) in s.iter_mut().zip(c) {
            *acc = *acc + x.widen();
        }
    }
    for &x in chunks.remainder() {
        s[0] = s[0] + x.widen();
    }
    s.iter().fold(T::Acc::default(), |total, &p| total + p)
}
