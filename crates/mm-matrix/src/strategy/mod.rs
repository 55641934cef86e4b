pub mod block_recursive;
pub mod strassen;
pub mod textbook;

use std::fmt::Debug;

use crate::block::BlockSpec;
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

pub use block_recursive::BlockRecursive;
pub use strassen::Strassen;
pub use textbook::Textbook;

/// Work performed by one multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    /// Recursive block products issued by divide-and-conquer levels.
    pub block_products: u64,
    /// Block-level additions and subtractions.
    pub block_additions: u64,
    /// Element multiplications performed by base-case kernels.
    pub scalar_products: u64,
}

impl OpCounts {
    pub(crate) fn add<T: Element>(&mut self, x: &Matrix<T>, y: &Matrix<T>) -> Result<Matrix<T>> {
        self.block_additions += 1;
        x.add(y)
    }

    pub(crate) fn subtract<T: Element>(
        &mut self,
        x: &Matrix<T>,
        y: &Matrix<T>,
    ) -> Result<Matrix<T>> {
        self.block_additions += 1;
        x.subtract(y)
    }

    /// Sum of two blocks of the same matrix.
    pub(crate) fn add_blocks<T: Element>(&mut self, m: &Matrix<T>, spec: BlockSpec) -> Matrix<T> {
        self.block_additions += 1;
        m.add_blocks(m, spec)
    }

    /// Difference of two blocks of the same matrix.
    pub(crate) fn subtract_blocks<T: Element>(
        &mut self,
        m: &Matrix<T>,
        spec: BlockSpec,
    ) -> Matrix<T> {
        self.block_additions += 1;
        m.subtract_blocks(m, spec)
    }

    /// Base-case `size x size` block product.
    pub(crate) fn base_product<T: Element>(
        &mut self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        spec: BlockSpec,
    ) -> Matrix<T> {
        let n = spec.size as u64;
        self.scalar_products += n * n * n;
        a.multiply_blocks(b, spec)
    }
}

/// A matrix multiplication algorithm.
///
/// Every strategy computes `C = A @ B` for `A` of shape `[m, k]` and `B` of
/// shape `[k, n]` into a newly allocated `[m, n]` matrix, and reports an
/// inner-dimension mismatch as `MultiplyMismatch`. Strategies may impose
/// further shape preconditions, which panic.
pub trait MultiplyStrategy<T: Element>: Send + Sync + Debug {
    /// Returns the name of this strategy (e.g., "textbook", "strassen").
    fn name(&self) -> &str;

    /// Multiply and report the work performed.
    fn multiply_counted(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<(Matrix<T>, OpCounts)>;

    /// Multiply, discarding the operation counts.
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        self.multiply_counted(a, b).map(|(c, _)| c)
    }
}

pub(crate) fn check_inner<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(MatrixError::MultiplyMismatch {
            m: a.rows(),
            k: a.cols(),
            k2: b.rows(),
            n: b.cols(),
        });
    }
    Ok(())
}

/// Panics unless `a` and `b` are square, equally sized, with a power-of-two
/// dimension.
pub(crate) fn assert_recursive_operands<T: Element>(op: &str, a: &Matrix<T>, b: &Matrix<T>) {
    assert!(
        a.is_square() && a.dimensions_match(b),
        "{op}: operands must be square and of equal size, got {:?} and {:?}",
        a.shape(),
        b.shape()
    );
    assert!(
        a.rows().is_power_of_two(),
        "{op}: dimension {} is not a power of two",
        a.rows()
    );
}

impl<T: Element> Matrix<T> {
    /// Matrix product with the default (textbook) strategy.
    ///
    /// # Errors
    /// Returns `MultiplyMismatch` if `self.cols() != other.rows()`.
    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.tb_multiply(other)
    }

    /// Textbook triple-loop product. Any shapes with a matching inner dimension.
    pub fn tb_multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        Textbook::new().multiply(self, other)
    }

    /// Naive block-recursive product (eight sub-products per level).
    ///
    /// # Errors
    /// Returns `MultiplyMismatch` if the inner dimensions differ.
    ///
    /// # Panics
    /// Panics if the operands are not square, equally sized, with a
    /// power-of-two dimension.
    pub fn bb_multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        BlockRecursive::new().multiply(self, other)
    }

    /// Strassen product (seven sub-products per level).
    ///
    /// Same errors and panics as [`bb_multiply`](Self::bb_multiply).
    pub fn sb_multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        Strassen::new().multiply(self, other)
    }

    /// Matrix product with a caller-selected strategy.
    pub fn multiply_with(
        &self,
        other: &Matrix<T>,
        strategy: &dyn MultiplyStrategy<T>,
    ) -> Result<Matrix<T>> {
        strategy.multiply(self, other)
    }
}
