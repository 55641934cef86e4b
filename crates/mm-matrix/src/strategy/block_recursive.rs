use tracing::{debug, trace};

use crate::assemble::assemble;
use crate::block::{quadrant_offsets, BlockSpec, Offset};
use crate::config::RecursionConfig;
use crate::element::Element;
use crate::error::Result;
use crate::matrix::Matrix;

use super::{assert_recursive_operands, check_inner, MultiplyStrategy, OpCounts};

/// Divide-and-conquer product via the 2x2 block formula:
///
/// ```text
/// C11 = A11 B11 + A12 B21    C12 = A11 B12 + A12 B22
/// C21 = A21 B11 + A22 B21    C22 = A21 B12 + A22 B22
/// ```
///
/// Eight recursive products and four block additions per level. Quadrants
/// are addressed in place through offsets; only the products are allocated.
#[derive(Debug, Clone, Default)]
pub struct BlockRecursive {
    config: RecursionConfig,
}

impl BlockRecursive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RecursionConfig) -> Self {
        BlockRecursive { config }
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
        trace!(size, depth, "block-recursive split");
        let [a11, a12, a21, a22] = quadrant_offsets(a_at, half);
        let [b11, b12, b21, b22] = quadrant_offsets(b_at, half);

        let p1 = self.product(a, a11, b, b11, half, depth, counts)?;
        let p2 = self.product(a, a12, b, b21, half, depth, counts)?;
        let c11 = counts.add(&p1, &p2)?;

        let p1 = self.product(a, a11, b, b12, half, depth, counts)?;
        let p2 = self.product(a, a12, b, b22, half, depth, counts)?;
        let c12 = counts.add(&p1, &p2)?;

        let p1 = self.product(a, a21, b, b11, half, depth, counts)?;
        let p2 = self.product(a, a22, b, b21, half, depth, counts)?;
        let c21 = counts.add(&p1, &p2)?;

        let p1 = self.product(a, a21, b, b12, half, depth, counts)?;
        let p2 = self.product(a, a22, b, b22, half, depth, counts)?;
        let c22 = counts.add(&p1, &p2)?;

        assemble(&c11, &c12, &c21, &c22)
    }

    /// One recursive sub-product issued at `depth`.
    #[allow(clippy::too_many_arguments)]
    fn product<T: Element>(
        &self,
        a: &Matrix<T>,
        a_at: Offset,
        b: &Matrix<T>,
        b_at: Offset,
        half: usize,
        depth: usize,
        counts: &mut OpCounts,
    ) -> Result<Matrix<T>> {
        counts.block_products += 1;
        self.recurse(a, a_at, b, b_at, half, depth + 1, counts)
    }
}

impl<T: Element> MultiplyStrategy<T> for BlockRecursive {
    fn name(&self) -> &str {
        "block_recursive"
    }

    fn multiply_counted(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<(Matrix<T>, OpCounts)> {
        check_inner(a, b)?;
        assert_recursive_operands("bb_multiply", a, b);
        let n = a.rows();
        debug!(
            strategy = "block_recursive",
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
    use crate::strategy::testing::random_i64;

    #[test]
    fn test_single_level() {
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]);
        let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]);
        let (c, counts) = BlockRecursive::new().multiply_counted(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
        assert_eq!(
            counts,
            OpCounts {
                block_products: 8,
                block_additions: 4,
                scalar_products: 8,
            }
        );
    }

    #[test]
    fn test_one_by_one_is_base_case() {
        let a = Matrix::from_vec(1, 1, vec![6i64]);
        let b = Matrix::from_vec(1, 1, vec![-7i64]);
        let (c, counts) = BlockRecursive::new().multiply_counted(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[-42]);
        assert_eq!(counts.block_products, 0);
        assert_eq!(counts.scalar_products, 1);
    }

    #[test]
    fn test_cutoff_stops_recursion() {
        let a = random_i64(16, 16, 1);
        let b = random_i64(16, 16, 2);
        let strategy = BlockRecursive::with_config(RecursionConfig::new(4));
        let (c, counts) = strategy.multiply_counted(&a, &b).unwrap();
        assert_eq!(c, a.tb_multiply(&b).unwrap());
        // Two levels (16 -> 8 -> 4), then 64 textbook 4x4 blocks.
        assert_eq!(counts.block_products, 8 + 64);
        assert_eq!(counts.scalar_products, 64 * 64);
    }

    #[test]
    fn test_cutoff_above_size_is_textbook() {
        let a = random_i64(4, 4, 3);
        let b = random_i64(4, 4, 4);
        let strategy = BlockRecursive::with_config(RecursionConfig::new(32));
        let (c, counts) = strategy.multiply_counted(&a, &b).unwrap();
        assert_eq!(c, a.tb_multiply(&b).unwrap());
        assert_eq!(counts.block_products, 0);
        assert_eq!(counts.block_additions, 0);
    }

    #[test]
    #[should_panic(expected = "bb_multiply: operands must be square")]
    fn test_unequal_sizes_panic() {
        let a = Matrix::<i32>::new(4, 2);
        let b = Matrix::<i32>::new(2, 2);
        let _ = BlockRecursive::new().multiply(&a, &b);
    }
}
