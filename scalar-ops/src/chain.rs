/// Recurrence: `x[0] = seed`, `x[i] = x[i-1] * factor`.
///
/// # Safety
/// `x` must be valid for writes of `n` elements.
#[no_mangle]
#[inline(never)]
pub unsafe extern "C" fn scalar_recurrence_f64(x: *mut f64, n: usize, seed: f64, factor: f64) {
    if n == 0 {
        return;
    }
    *x = seed;
    for i in 1..n {
        *x.add(i) = *x.add(i - 1) * factor;
    }
}
