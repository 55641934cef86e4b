use tracing::{debug, trace};

use crate::assemble::assemble;
use crate::block::{quadrant_offsets, BlockSpec, Offset};
use crate::config::RecursionConfig;
use crate::element::Element;
use crate::error::Result;
use crate::matrix::Matrix;

use super::{assert_recursive_operands, check_inner, MultiplyStrategy, OpCounts};

/// Strassen's algorithm.
///
/// Per level, seven recursive products
///
/// ```text
/// M1 = (A11 + A22)(B11 + B22)
/// M2 = (A21 + A22) B11
/// M3 = A11 (B12 - B22)
/// M4 = A22 (B21 - B11)
/// M5 = (A11 + A12) B22
/// M6 = (A21 - A11)(B11 + B12)
/// M7 = (A12 - A22)(B21 + B22)
/// ```
///
/// and eighteen block additions/subtractions recombine them:
///
/// ```text
/// C11 = M1 + M4 - M5 + M7    C12 = M3 + M5
/// C21 = M2 + M4              C22 = M1 - M2 + M3 + M6
/// ```
///
/// Factors that are plain quadrants are addressed in place; only sums and
/// differences are materialized.
#[derive(Debug, Clone, Default)]
pub struct Strassen {
    config: RecursionConfig,
}

impl Strassen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RecursionConfig) -> Self {
        Strassen { config }
    }

    pub fn config(&self) -> &RecursionConfig {
        &self.config
    }

    #[allow(clippy::too_many_arguments)]
    fn recurse<T: Element>(
        &self,
        a: &Matrix<T>,
        a_at: Offset,
        b: &Matrix<T>,
        b_at: Offset,
        size: usize,
        depth: usize,
        counts: &mut OpCounts,
    ) -> Result<Matrix<T>> {
        if size <= self.config.effective_cutoff() {
            return Ok(counts.base_product(a, b, BlockSpec::new(size, a_at, b_at)));
        }

        let half = size / 2;
        trace!(size, depth, "strassen split");
        let [a11, a12, a21, a22] = quadrant_offsets(a_at, half);
        let [b11, b12, b21, b22] = quadrant_offsets(b_at, half);
        let pair = |x: Offset, y: Offset| BlockSpec::new(half, x, y);
        let origin = Offset::ORIGIN;

        let s = counts.add_blocks(a, pair(a11, a22));
        let t = counts.add_blocks(b, pair(b11, b22));
        let m1 = self.product(&s, origin, &t, origin, half, depth, counts)?;

        let s = counts.add_blocks(a, pair(a21, a22));
        let m2 = self.product(&s, origin, b, b11, half, depth, counts)?;

        let t = counts.subtract_blocks(b, pair(b12, b22));
        let m3 = self.product(a, a11, &t, origin, half, depth, counts)?;

        let t = counts.subtract_blocks(b, pair(b21, b11));
        let m4 = self.product(a, a22, &t, origin, half, depth, counts)?;

        let s = counts.add_blocks(a, pair(a11, a12));
        let m5 = self.product(&s, origin, b, b22, half, depth, counts)?;

        let s = counts.subtract_blocks(a, pair(a21, a11));
        let t = counts.add_blocks(b, pair(b11, b12));
        let m6 = self.product(&s, origin, &t, origin, half, depth, counts)?;

        let s = counts.subtract_blocks(a, pair(a12, a22));
        let t = counts.add_blocks(b, pair(b21, b22));
        let m7 = self.product(&s, origin, &t, origin, half, depth, counts)?;

        let c11 = counts.add(&m1, &m4)?;
        let c11 = counts.subtract(&c11, &m5)?;
        let c11 = counts.add(&c11, &m7)?;

        let c12 = counts.add(&m3, &m5)?;
        let c21 = counts.add(&m2, &m4)?;

        let c22 = counts.subtract(&m1, &m2)?;
        let c22 = counts.add(&c22, &m3)?;
        let c22 = counts.add(&c22, &m6)?;

        assemble(&c11, &c12, &c21, &c22)
    }

    /// One recursive sub-product issued at `depth`.
    #[allow(clippy::too_many_arguments)]
    fn product<T: Element>(
        &self,
        x: &Matrix<T>,
        x_at: Offset,
        y: &Matrix<T>,
        y_at: Offset,
        half: usize,
        depth: usize,
        counts: &mut OpCounts,
    ) -> Result<Matrix<T>> {
        counts.block_products += 1;
        self.recurse(x, x_at, y, y_at, half, depth + 1, counts)
    }
}

impl<T: Element> MultiplyStrategy<T> for Strassen {
    fn name(&self) -> &str {
        "strassen"
    }

    fn multiply_counted(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<(Matrix<T>, OpCounts)> {
        check_inner(a, b)?;
        assert_recursive_operands("sb_multiply", a, b);
        let n = a.rows();
        debug!(
            strategy = "strassen",
            elem = T::NAME,
            n,
            cutoff = self.config.effective_cutoff(),
            "multiply"
        );

        let mut counts = OpCounts::default();
        let c = self.recurse(a, Offset::ORIGIN, b, Offset::ORIGIN, n, 0, &mut counts)?;
        Ok((c, counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::{random_f64, random_i64};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_level() {
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]);
        let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]);
        let (c, counts) = Strassen::new().multiply_counted(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
        assert_eq!(
            counts,
            OpCounts {
                block_products: 7,
                block_additions: 18,
                scalar_products: 7,
            }
        );
    }

    #[test]
    fn test_products_per_level() {
        let mut previous = 0;
        for (level, n) in [2usize, 4, 8, 16].into_iter().enumerate() {
            let a = random_i64(n, n, level as u64);
            let b = random_i64(n, n, 10 + level as u64);
            let (_, counts) = Strassen::new().multiply_counted(&a, &b).unwrap();
            let expected = 7u64.pow(level as u32 + 1);
            assert_eq!(counts.scalar_products, expected);
            assert_eq!(counts.block_products, previous + expected);
            previous += expected;
        }
    }

    #[test]
    fn test_cutoff_matches_textbook() {
        let a = random_i64(16, 16, 5);
        let b = random_i64(16, 16, 6);
        let strategy = Strassen::with_config(RecursionConfig::new(4));
        let (c, counts) = strategy.multiply_counted(&a, &b).unwrap();
        assert_eq!(c, a.tb_multiply(&b).unwrap());
        // 16 -> 8 -> 4: 7 + 49 products, then 49 textbook 4x4 blocks.
        assert_eq!(counts.block_products, 7 + 49);
        assert_eq!(counts.scalar_products, 49 * 64);
    }

    #[test]
    fn test_float_accuracy() {
        let a = random_f64(16, 16, 21);
        let b = random_f64(16, 16, 22);
        let c = Strassen::new().multiply(&a, &b).unwrap();
        let reference = a.tb_multiply(&b).unwrap();
        for (x, y) in c.as_slice().iter().zip(reference.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_operands_untouched() {
        let a = random_i64(8, 8, 31);
        let b = random_i64(8, 8, 32);
        let (a0, b0) = (a.clone(), b.clone());
        let _ = a.sb_multiply(&b).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    #[should_panic(expected = "sb_multiply: dimension 3 is not a power of two")]
    fn test_odd_size_panics() {
        let a = Matrix::<f64>::square(3);
        let _ = Strassen::new().multiply(&a, &a);
    }
}
