use std::ops::{Index, IndexMut};

use crate::block::{BlockSpec, Offset};
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::strategy::textbook;

/// A dense, row-major matrix that exclusively owns its element buffer.
///
/// Both dimensions are non-zero for the whole lifetime of the value. Element
/// `(i, j)` lives at `data[i * cols + j]`.
///
/// Operations fall into two groups:
/// - mutators (`set_*`) take `&mut self` and change the matrix in place;
/// - pure operations take `&self` and return a freshly allocated result.
#[derive(Debug, Clone)]
pub struct Matrix<T: Element> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

fn assert_dims(rows: usize, cols: usize) {
    assert!(
        rows > 0 && cols > 0,
        "matrix dimensions must be non-zero, got {rows}x{cols}"
    );
}

impl<T: Element> Matrix<T> {
    /// Create a zero-filled `rows x cols` matrix.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert_dims(rows, cols);
        Matrix {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Create a zero-filled `n x n` matrix.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Create a matrix from row-major data.
    ///
    /// # Panics
    /// Panics if either dimension is zero or `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_dims(rows, cols);
        assert_eq!(
            data.len(),
            rows * cols,
            "data length {} does not match shape {}x{}",
            data.len(),
            rows,
            cols
        );
        Matrix { data, rows, cols }
    }

    /// Create a matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        assert_dims(rows, cols);
        let data = (0..rows * cols).map(|idx| f(idx / cols, idx % cols)).collect();
        Matrix { data, rows, cols }
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::square(n);
        m.fill_diagonal();
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: both dimensions are non-zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major element buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn check_index(&self, i: usize, j: usize) -> Result<usize> {
        if i < self.rows && j < self.cols {
            Ok(i * self.cols + j)
        } else {
            Err(MatrixError::IndexOutOfBounds {
                i,
                j,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Element at `(i, j)`.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` if `i >= rows` or `j >= cols`.
    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        let idx = self.check_index(i, j)?;
        Ok(self.data[idx])
    }

    /// Overwrite the element at `(i, j)`.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` if `i >= rows` or `j >= cols`; the matrix is
    /// left untouched.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        let idx = self.check_index(i, j)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Element at `(i, j)` without bounds checking.
    ///
    /// # Safety
    /// The caller must guarantee `i < self.rows()` and `j < self.cols()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.rows && j < self.cols);
        *self.data.get_unchecked(i * self.cols + j)
    }

    /// Overwrite the element at `(i, j)` without bounds checking.
    ///
    /// # Safety
    /// The caller must guarantee `i < self.rows()` and `j < self.cols()`.
    #[inline]
    pub unsafe fn set_unchecked(&mut self, i: usize, j: usize, value: T) {
        debug_assert!(i < self.rows && j < self.cols);
        *self.data.get_unchecked_mut(i * self.cols + j) = value;
    }

    /// Contiguous run of `len` elements of row `row`, starting at column `col`.
    #[inline]
    pub(crate) fn row_segment(&self, row: usize, col: usize, len: usize) -> &[T] {
        let start = row * self.cols + col;
        &self.data[start..start + len]
    }

    fn fill_diagonal(&mut self) {
        let n = self.rows.min(self.cols);
        for i in 0..n {
            self.data[i * self.cols + i] = T::one();
        }
    }

    // ---- mutators ----

    /// Set every element to zero. The shape is unchanged.
    pub fn set_to_zero(&mut self) {
        self.data.fill(T::zero());
    }

    /// Turn a square matrix into the identity.
    ///
    /// # Errors
    /// Returns `NotSquare` if `rows != cols`; the matrix is left untouched.
    pub fn set_to_identity(&mut self) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                op: "set_to_identity",
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.set_to_zero();
        self.fill_diagonal();
        Ok(())
    }

    /// Reallocate as the `n x n` identity, whatever the previous shape was.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn set_to_identity_of(&mut self, n: usize) {
        *self = Self::identity(n);
    }

    /// Negate every element in place.
    pub fn set_to_negative(&mut self) {
        for x in &mut self.data {
            *x = -*x;
        }
    }

    /// Take the shape and a deep copy of the contents of `src`.
    pub fn set_to_copy(&mut self, src: &Matrix<T>) {
        self.clone_from(src);
    }

    /// Copy the `size x size` block of `src` at `spec.rhs` into this matrix
    /// at `spec.lhs`.
    ///
    /// # Panics
    /// Panics if either block does not fit its matrix.
    pub fn set_block_to_copy(&mut self, src: &Matrix<T>, spec: BlockSpec) {
        spec.assert_fits("set_block_to_copy", self.shape(), src.shape());
        let n = spec.size;
        for i in 0..n {
            let from = src.row_segment(spec.rhs.row + i, spec.rhs.col, n);
            let start = (spec.lhs.row + i) * self.cols + spec.lhs.col;
            self.data[start..start + n].copy_from_slice(from);
        }
    }

    // ---- queries ----

    /// True iff both matrices have the same number of rows and columns.
    pub fn dimensions_match(&self, other: &Matrix<T>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Compare two matrices cell by cell.
    ///
    /// Returns `Ok(false)` when the shapes differ, otherwise `Ok(true)` iff
    /// every `|self[i,j] - other[i,j]| <= tolerance`. A tolerance of `0.0`
    /// requests exact equality.
    ///
    /// # Errors
    /// - `InvalidTolerance` for a negative or NaN tolerance.
    /// - `IntegralTolerance` for a non-zero tolerance on an integer matrix.
    pub fn equals(&self, other: &Matrix<T>, tolerance: f64) -> Result<bool> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(MatrixError::InvalidTolerance(tolerance));
        }
        if T::INTEGRAL && tolerance != 0.0 {
            return Err(MatrixError::IntegralTolerance(tolerance));
        }
        if !self.dimensions_match(other) {
            return Ok(false);
        }
        let equal = if tolerance == 0.0 {
            self.data == other.data
        } else {
            self.data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| a.abs_diff(b) <= tolerance)
        };
        Ok(equal)
    }

    // ---- pure operations ----

    /// A new matrix holding the elementwise negation.
    pub fn get_negative(&self) -> Matrix<T> {
        Matrix {
            data: self.data.iter().map(|&x| -x).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn check_same_shape(&self, op: &'static str, other: &Matrix<T>) -> Result<()> {
        if self.dimensions_match(other) {
            Ok(())
        } else {
            Err(MatrixError::ShapeMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            })
        }
    }

    fn zip_map(&self, other: &Matrix<T>, f: impl Fn(T, T) -> T) -> Matrix<T> {
        Matrix {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Elementwise sum.
    ///
    /// For square operands this is `add_blocks` over the whole matrix.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if the shapes differ.
    pub fn add(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_shape("add", other)?;
        Ok(self.zip_map(other, |a, b| a + b))
    }

    /// Elementwise difference `self - other`.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if the shapes differ.
    pub fn subtract(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_shape("subtract", other)?;
        Ok(self.zip_map(other, |a, b| a - b))
    }

    fn zip_blocks(
        &self,
        other: &Matrix<T>,
        spec: BlockSpec,
        op: &str,
        f: impl Fn(T, T) -> T,
    ) -> Matrix<T> {
        spec.assert_fits(op, self.shape(), other.shape());
        let n = spec.size;
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            let a = self.row_segment(spec.lhs.row + i, spec.lhs.col, n);
            let b = other.row_segment(spec.rhs.row + i, spec.rhs.col, n);
            data.extend(a.iter().zip(b).map(|(&x, &y)| f(x, y)));
        }
        Matrix {
            data,
            rows: n,
            cols: n,
        }
    }

    /// Sum of the block of `self` at `spec.lhs` and the block of `other` at
    /// `spec.rhs`, as a new `size x size` matrix.
    ///
    /// # Panics
    /// Panics if either block does not fit its matrix.
    pub fn add_blocks(&self, other: &Matrix<T>, spec: BlockSpec) -> Matrix<T> {
        self.zip_blocks(other, spec, "add_blocks", |a, b| a + b)
    }

    /// Difference of two blocks, see [`add_blocks`](Self::add_blocks).
    pub fn subtract_blocks(&self, other: &Matrix<T>, spec: BlockSpec) -> Matrix<T> {
        self.zip_blocks(other, spec, "subtract_blocks", |a, b| a - b)
    }

    /// Product of the block of `self` at `spec.lhs` with the block of `other`
    /// at `spec.rhs`, computed with the textbook triple loop.
    ///
    /// # Panics
    /// Panics if either block does not fit its matrix.
    pub fn multiply_blocks(&self, other: &Matrix<T>, spec: BlockSpec) -> Matrix<T> {
        spec.assert_fits("multiply_blocks", self.shape(), other.shape());
        let n = spec.size;
        textbook::kernel(self, spec.lhs, other, spec.rhs, n, n, n)
    }

    /// Copy the `size x size` block at `at` out into its own matrix.
    ///
    /// # Panics
    /// Panics if the block does not fit.
    pub fn block(&self, at: Offset, size: usize) -> Matrix<T> {
        let mut out = Matrix::square(size);
        out.set_block_to_copy(self, BlockSpec::new(size, Offset::ORIGIN, at));
        out
    }
}

impl<T: Element> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions_match(other) && self.data == other.data
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}
