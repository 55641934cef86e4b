use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("{op}: shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    #[error("multiply dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    MultiplyMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("assemble: quadrant {quadrant} has shape {got:?}, expected ({size}, {size})")]
    AssembleMismatch {
        quadrant: &'static str,
        size: usize,
        got: (usize, usize),
    },
    #[error("{op}: matrix is not square: [{rows}x{cols}]")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },
    #[error("{op}: dimension {dim} is odd")]
    OddDimension { op: &'static str, dim: usize },
    #[error("index ({i}, {j}) out of bounds for [{rows}x{cols}] matrix")]
    IndexOutOfBounds {
        i: usize,
        j: usize,
        rows: usize,
        cols: usize,
    },
    #[error("non-zero tolerance {0} is not allowed for integral elements")]
    IntegralTolerance(f64),
    #[error("invalid tolerance {0}: must be a non-negative number")]
    InvalidTolerance(f64),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
