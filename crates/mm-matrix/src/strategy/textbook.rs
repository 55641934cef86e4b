use tracing::debug;

use crate::block::Offset;
use crate::element::Element;
use crate::error::Result;
use crate::matrix::Matrix;

use super::{check_inner, MultiplyStrategy, OpCounts};

/// Triple-loop product of the `m x k` block of `a` at `a_at` with the
/// `k x n` block of `b` at `b_at`.
///
/// Callers have already checked that both blocks fit.
pub(crate) fn kernel<T: Element>(
    a: &Matrix<T>,
    a_at: Offset,
    b: &Matrix<T>,
    b_at: Offset,
    m: usize,
    k: usize,
    n: usize,
) -> Matrix<T> {
    let b_data = b.as_slice();
    let ldb = b.cols();
    let mut c = Vec::with_capacity(m * n);
    for i in 0..m {
        let a_row = a.row_segment(a_at.row + i, a_at.col, k);
        for j in 0..n {
            let mut sum = T::zero();
            for (p, &x) in a_row.iter().enumerate() {
                sum += x * b_data[(b_at.row + p) * ldb + b_at.col + j];
            }
            c.push(sum);
        }
    }
    Matrix::from_vec(m, n, c)
}

/// Direct O(m·k·n) multiplication.
///
/// Works on any shapes with a matching inner dimension and is the reference
/// the recursive strategies are validated against.
#[derive(Debug, Clone, Copy)]
pub struct Textbook;

impl Textbook {
    pub fn new() -> Self {
        Textbook
    }
}

impl Default for Textbook {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> MultiplyStrategy<T> for Textbook {
    fn name(&self) -> &str {
        "textbook"
    }

    fn multiply_counted(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<(Matrix<T>, OpCounts)> {
        check_inner(a, b)?;
        let (m, k) = a.shape();
        let n = b.cols();
        debug!(strategy = "textbook", elem = T::NAME, m, k, n, "multiply");

        let c = kernel(a, Offset::ORIGIN, b, Offset::ORIGIN, m, k, n);
        let counts = OpCounts {
            scalar_products: (m * k * n) as u64,
            ..OpCounts::default()
        };
        Ok((c, counts))
    }
}
