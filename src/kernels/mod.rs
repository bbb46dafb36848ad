//! Summation kernels and the ordered registry the runner iterates.
//!
//! All kernels share one signature, `fn(&[T]) -> T::Acc`, and compute the
//! same reduction. They differ only in unroll factor and in how many
//! independent accumulators carry the running sum.

pub mod ilp;
pub mod unroll;

use serde::Serialize;

use crate::traits::SumElement;

pub use ilp::{sum_ilp, sum_ilp_4, sum_ilp_8};
pub use unroll::{
    sum_unroll_1, sum_unroll_16, sum_unroll_2, sum_unroll_32, sum_unroll_4, sum_unroll_8,
};

/// Kernel function pointer for element type `T`.
pub type SumFn<T> = fn(&[T]) -> <T as SumElement>::Acc;

/// How a kernel carries its running sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Accumulation {
    /// One running sum (serial dependency chain).
    Single,
    /// N independent partial sums, combined at the end.
    Independent(usize),
}

impl Accumulation {
    pub fn accumulators(self) -> usize {
        match self {
            Accumulation::Single => 1,
            Accumulation::Independent(n) => n,
        }
    }
}

/// Immutable kernel descriptor.
#[derive(Clone, Copy)]
pub struct Kernel<T: SumElement> {
    name: &'static str,
    func: SumFn<T>,
    unroll: usize,
    accumulation: Accumulation,
}

impl<T: SumElement> Kernel<T> {
    pub fn new(
        name: &'static str,
        func: SumFn<T>,
        unroll: usize,
        accumulation: Accumulation,
    ) -> Self {
        Self { name, func, unroll, accumulation }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn unroll(&self) -> usize {
        self.unroll
    }

    #[inline]
    pub fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    #[inline(always)]
    pub fn call(&self, a: &[T]) -> T::Acc {
        (self.func)(a)
    }
}

impl<T: SumElement> std::fmt::Debug for Kernel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("unroll", &self.unroll)
            .field("accumulation", &self.accumulation)
            .finish()
    }
}

/// Ordered kernel list. The first registered kernel is the baseline.
#[derive(Debug, Clone)]
pub struct KernelRegistry<T: SumElement> {
    kernels: Vec<Kernel<T>>,
}

impl<T: SumElement> Default for KernelRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SumElement> KernelRegistry<T> {
    pub fn new() -> Self {
        Self { kernels: Vec::new() }
    }

    /// Append a kernel (builder style).
    pub fn register(
        mut self,
        name: &'static str,
        func: SumFn<T>,
        unroll: usize,
        accumulation: Accumulation,
    ) -> Self {
        self.kernels.push(Kernel::new(name, func, unroll, accumulation));
        self
    }

    /// Kernels for the unrolling study: U = 1..32 single-accumulator, then
    /// the 4- and 8-accumulator ILP variants.
    pub fn unrolling_suite() -> Self {
        Self::new()
            .register("U=1  (baseline)", sum_unroll_1, 1, Accumulation::Single)
            .register("U=2", sum_unroll_2, 2, Accumulation::Single)
            .register("U=4", sum_unroll_4, 4, Accumulation::Single)
            .register("U=8", sum_unroll_8, 8, Accumulation::Single)
            .register("U=16", sum_unroll_16, 16, Accumulation::Single)
            .register("U=32", sum_unroll_32, 32, Accumulation::Single)
            .register("U=4  (4 accum, ILP)", sum_ilp_4, 4, Accumulation::Independent(4))
            .register("U=8  (8 accum, ILP)", sum_ilp_8, 8, Accumulation::Independent(8))
    }

    /// Kernels for the element-width study.
    pub fn width_suite() -> Self {
        Self::new()
            .register("U=1", sum_unroll_1, 1, Accumulation::Single)
            .register("U=2", sum_unroll_2, 2, Accumulation::Single)
            .register("U=4", sum_unroll_4, 4, Accumulation::Single)
            .register("U=8", sum_unroll_8, 8, Accumulation::Single)
            .register("U=16", sum_unroll_16, 16, Accumulation::Single)
            .register("U=32", sum_unroll_32, 32, Accumulation::Single)
            .register("U=8 (ILP)", sum_ilp_8, 8, Accumulation::Independent(8))
    }

    pub fn baseline(&self) -> Option<&Kernel<T>> {
        self.kernels.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Kernel<T>> {
        self.kernels.iter()
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

impl<'a, T: SumElement> IntoIterator for &'a KernelRegistry<T> {
    type Item = &'a Kernel<T>;
    type IntoIter = std::slice::Iter<'a, Kernel<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrolling_suite_order() {
        let reg = KernelRegistry::<f64>::unrolling_suite();
        assert_eq!(reg.len(), 8);
        let unrolls: Vec<usize> = reg.iter().map(|k| k.unroll()).collect();
        assert_eq!(unrolls, vec![1, 2, 4, 8, 16, 32, 4, 8]);
        assert_eq!(reg.baseline().map(|k| k.unroll()), Some(1));
        assert_eq!(reg.iter().last().map(|k| k.accumulation()), Some(Accumulation::Independent(8)));
    }

    #[test]
    fn test_width_suite_for_every_type() {
        assert_eq!(KernelRegistry::<f32>::width_suite().len(), 7);
        assert_eq!(KernelRegistry::<half::f16>::width_suite().len(), 7);
        assert_eq!(KernelRegistry::<i32>::width_suite().len(), 7);
        let reg = KernelRegistry::<i16>::width_suite();
        let a = vec![1_i16; 333];
        for k in &reg {
            assert_eq!(k.call(&a), 333, "{}", k.name());
        }
    }

    #[test]
    fn test_builder_and_accumulators() {
        let reg = KernelRegistry::<f64>::new()
            .register("k3", sum_ilp::<f64, 3>, 3, Accumulation::Independent(3));
        assert_eq!(reg.len(), 1);
        assert!(!reg.is_empty());
        let k = reg.baseline().unwrap();
        assert_eq!(k.accumulation().accumulators(), 3);
        assert_eq!(k.call(&[1.0, 2.0, 3.0, 4.0]), 10.0);
        assert!(KernelRegistry::<f64>::new().baseline().is_none());
    }
}
