use std::fmt::Debug;
use std::ops::Add;

use half::f16;

/// Running-sum type of a reduction.
///
/// Narrow integers accumulate into `i64` so a million-element sum never
/// overflows; `f16` accumulates in `f32`.
pub trait Accumulator:
    Debug + Copy + Default + PartialEq + Send + Sync + 'static + Add<Output = Self>
{
    fn to_f64(self) -> f64;
}

impl Accumulator for f64 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

impl Accumulator for f32 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Accumulator for i64 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Element type of a benchmark array.
///
/// Compile-time monomorphization: every kernel is instantiated once per
/// element type, so width effects show up in the generated loads.
pub trait SumElement: Debug + Copy + Send + Sync + 'static {
    type Acc: Accumulator;

    const ONE: Self;
    /// Display name used in report headers (C spelling, e.g. "double").
    const NAME: &'static str;

    fn widen(self) -> Self::Acc;

    /// Exact conversion for small test values (|v| <= 2048).
    fn from_i16(v: i16) -> Self;

    #[inline(always)]
    fn size_bytes() -> usize {
        std::mem::size_of::<Self>()
    }
}

macro_rules! impl_sum_element {
    ($t:ty, $acc:ty, $name:literal, $one:expr, |$x:ident| $widen:expr, |$v:ident| $from:expr) => {
        impl SumElement for $t {
            type Acc = $acc;
            const ONE: Self = $one;
            const NAME: &'static str = $name;

            #[inline(always)]
            fn widen(self) -> $acc {
                let $x = self;
                $widen
            }

            #[inline(always)]
            fn from_i16($v: i16) -> Self {
                $from
            }
        }
    };
}

impl_sum_element!(f64, f64, "double", 1.0, |x| x, |v| v as f64);
impl_sum_element!(f32, f32, "float", 1.0, |x| x, |v| v as f32);
impl_sum_element!(f16, f32, "half", f16::ONE, |x| x.to_f32(), |v| f16::from_f32(v as f32));
impl_sum_element!(i32, i64, "int", 1, |x| x as i64, |v| v as i32);
impl_sum_element!(i16, i64, "short", 1, |x| x as i64, |v| v);
