//! Serial reductions over raw buffers.

/// Sum: `acc += x[i]` in index order, f64 accumulator.
///
/// # Safety
/// `x` must be valid for reads of `n` elements.
#[no_mangle]
#[inline(never)]
pub unsafe extern "C" fn scalar_sum_f64(x: *const f64, n: usize) -> f64 {
    let mut acc = 0.0_f64;
    for i in 0..n {
        acc += *x.add(i);
    }
    acc
}

/// Sum: `acc += x[i]` in index order, f32 accumulator.
///
/// # Safety
/// `x` must be valid for reads of `n` elements.
#[no_mangle]
#[inline(never)]
pub unsafe extern "C" fn scalar_sum_f32(x: *const f32, n: usize) -> f32 {
    let mut acc = 0.0_f32;
    for i in 0..n {
        acc += *x.add(i);
    }
    acc
}

/// Sum of i32 values widened into an i64 accumulator.
///
/// # Safety
/// `x` must be valid for reads of `n` elements.
#[no_mangle]
#[inline(never)]
pub unsafe extern "C" fn scalar_sum_i32(x: *const i32, n: usize) -> i64 {
    let mut acc = 0_i64;
    for i in 0..n {
        acc += *x.add(i) as i64;
    }
    acc
}

/// Sum of i16 values widened into an i64 accumulator.
///
/// # Safety
/// `x` must be valid for reads of `n` elements.
#[no_mangle]
#[inline(never)]
pub unsafe extern "C" fn scalar_sum_i16(x: *const i16, n: usize) -> i64 {
    let mut acc = 0_i64;
    for i in 0..n {
        acc += *x.add(i) as i64;
    }
    acc
}
