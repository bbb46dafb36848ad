/// GEMM: `C[i][j] = sum_k A[i][k] * B[k][j]` (row-major, square n x n)
///
/// Naive triple loop accumulating directly into `C[i][j]` in k order,
/// the same summation order as the benchmarked multiply. C is overwritten.
///
/// # Safety
/// `a` and `b` must be valid for reads and `c` for writes of `n * n`
/// elements, and `c` must not alias `a` or `b`.
#[no_mangle]
#[inline(never)]
pub unsafe extern "C" fn scalar_matmul_f64(a: *const f64, b: *const f64, c: *mut f64, n: usize) {
    for i in 0..n {
        for j in 0..n {
            *c.add(i * n + j) = 0.0;
            for k in 0..n {
                *c.add(i * n + j) += *a.add(i * n + k) * *b.add(k * n + j);
            }
        }
    }
}

/// Vector add: `out[i] = a[i] + b[i]`
///
/// # Safety
/// All pointers must be valid for `n` elements; `out` must not alias inputs.
#[no_mangle]
#[inline(never)]
pub unsafe extern "C" fn scalar_vec_add_f64(a: *const f64, b: *const f64, out: *mut f64, n: usize) {
    for i in 0..n {
        *out.add(i) = *a.add(i) + *b.add(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matmul_identity() {
        let n = 3;
        let a: Vec<f64> = (0..n * n).map(|i| i as f64).collect();
        let mut id = vec![0.0_f64; n * n];
        for i in 0..n {
            id[i * n + i] = 1.0;
        }
        let mut c = vec![f64::NAN; n * n];
        unsafe { scalar_matmul_f64(a.as_ptr(), id.as_ptr(), c.as_mut_ptr(), n) };
        assert_eq!(c, a);
    }

    #[test]
    fn vec_add() {
        let a = [1.0, 2.0, 3.0];
        let b = [0.5, 0.5, 0.5];
        let mut out = [0.0; 3];
        unsafe { scalar_vec_add_f64(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), 3) };
        assert_eq!(out, [1.5, 2.5, 3.5]);
    }
}
