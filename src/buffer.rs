//! Cache-line aligned benchmark arrays.

use std::alloc::Layout;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{BenchError, BenchResult};
use crate::traits::SumElement;

/// Owned, 64-byte aligned, fixed-length array.
///
/// Allocation failure is reported as [`BenchError::Allocation`] instead of
/// aborting, so a binary can print the failure and exit non-zero.
pub struct AlignedBuffer<T: Copy> {
    ptr: NonNull<T>,
    len: usize,
}

// SAFETY: the buffer uniquely owns its allocation, like a Vec<T>.
unsafe impl<T: Copy + Send> Send for AlignedBuffer<T> {}
unsafe impl<T: Copy + Sync> Sync for AlignedBuffer<T> {}

impl<T: Copy> AlignedBuffer<T> {
    pub const ALIGN: usize = 64;

    /// Allocate `len` elements, each set to `value`.
    pub fn filled(len: usize, value: T) -> BenchResult<Self> {
        let layout = Self::layout(len)?;
        if layout.size() == 0 {
            return Ok(Self { ptr: NonNull::dangling(), len });
        }
        // SAFETY: layout has non-zero size.
        let raw = unsafe { std::alloc::alloc(layout) } as *mut T;
        let ptr = NonNull::new(raw).ok_or(BenchError::Allocation { bytes: layout.size() })?;
        for i in 0..len {
            // SAFETY: i < len, and the allocation holds len elements.
            unsafe { ptr.as_ptr().add(i).write(value) };
        }
        Ok(Self { ptr, len })
    }

    /// Allocate `len` elements produced by `f(index)`.
    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> T) -> BenchResult<Self> {
        let first = if len == 0 { return Self::empty() } else { f(0) };
        let mut buf = Self::filled(len, first)?;
        for (i, slot) in buf.iter_mut().enumerate().skip(1) {
            *slot = f(i);
        }
        Ok(buf)
    }

    fn empty() -> BenchResult<Self> {
        Ok(Self { ptr: NonNull::dangling(), len: 0 })
    }

    fn layout(len: usize) -> BenchResult<Layout> {
        let bytes = len
            .checked_mul(std::mem::size_of::<T>())
            .ok_or_else(|| BenchError::Layout(format!("{len} elements overflow usize")))?;
        Layout::from_size_align(bytes, Self::ALIGN.max(std::mem::align_of::<T>()))
            .map_err(|e| BenchError::Layout(format!("layout error: {e}")))
    }

    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.len * std::mem::size_of::<T>()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid (or dangling with len 0) and initialized for len elements.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: SumElement> AlignedBuffer<T> {
    /// Array of ones: the expected sum is exactly `len`.
    pub fn ones(len: usize) -> BenchResult<Self> {
        Self::filled(len, T::ONE)
    }
}

impl<T: Copy> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Copy> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if let Ok(layout) = Self::layout(self.len) {
            if layout.size() > 0 {
                // SAFETY: allocated in `filled` with this exact layout.
                unsafe { std::alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
            }
        }
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("bytes", &self.len_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ones_alignment() {
        let buf = AlignedBuffer::<f64>::ones(1000).unwrap();
        assert_eq!(buf.len(), 1000);
        assert_eq!(buf.len_bytes(), 8000);
        assert_eq!(buf.as_ptr() as usize % 64, 0);
        assert!(buf.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_from_fn() {
        let buf = AlignedBuffer::from_fn(5, |i| i as i32 * 2).unwrap();
        assert_eq!(&buf[..], &[0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_empty() {
        let buf = AlignedBuffer::<i16>::ones(0).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.len_bytes(), 0);
        let buf = AlignedBuffer::from_fn(0, |_| 1.0_f32).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_overflowing_len_is_layout_error() {
        let err = AlignedBuffer::<f64>::ones(usize::MAX).unwrap_err();
        assert!(matches!(err, BenchError::Layout(_)));
    }

    #[test]
    fn test_unsatisfiable_allocation_is_typed_error() {
        let bytes = isize::MAX as usize / 2;
        match AlignedBuffer::<u8>::filled(bytes, 0) {
            Err(BenchError::Allocation { bytes: got }) => assert_eq!(got, bytes),
            other => panic!("expected allocation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_mutation() {
        let mut buf = AlignedBuffer::<f32>::ones(4).unwrap();
        buf[2] = 5.0;
        assert_eq!(buf.iter().sum::<f32>(), 8.0);
    }
}
