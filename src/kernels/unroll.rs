//! Single-accumulator summation with explicit unrolling.
//!
//! Every variant keeps one running sum, so the loop-carried dependency on
//! `sum` is the same for all of them; only the loop overhead per element
//! changes with U. Each body is written out element by element by the
//! macro below rather than left to the optimizer.

use crate::traits::SumElement;

macro_rules! define_unrolled_sum {
    ($(#[$meta:meta])* $name:ident, $u:literal, [$($idx:literal),+ $(,)?]) => {
        $(#[$meta])*
        #[inline(never)]
        pub fn $name<T: SumElement>(a: &[T]) -> T::Acc {
            let mut sum = T::Acc::default();
            let mut chunks = a.chunks_exact($u);
            for c in &mut chunks {
                $( sum = sum + c[$idx].widen(); )+
            }
            for &x in chunks.remainder() {
                sum = sum + x.widen();
            }
            sum
        }
    };
}

/// U = 1 (no unrolling, baseline).
#[inline(never)]
pub fn sum_unroll_1<T: SumElement>(a: &[T]) -> T::Acc {
    let mut sum = T::Acc::default();
    for &x in a {
        sum = sum + x.widen();
    }
    sum
}

define_unrolled_sum!(
    /// U = 2.
    sum_unroll_2, 2, [0, 1]
);

define_unrolled_sum!(
    /// U = 4.
    sum_unroll_4, 4, [0, 1, 2, 3]
);

define_unrolled_sum!(
    /// U = 8.
    sum_unroll_8, 8, [0, 1, 2, 3, 4, 5, 6, 7]
);

define_unrolled_sum!(
    /// U = 16.
    sum_unroll_16, 16, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
);

define_unrolled_sum!(
    /// U = 32.
    sum_unroll_32, 32, [
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
        16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31,
    ]
);
