use thiserror::Error;

#[derive(Error, Debug)]
pub enum FillError {
    #[error("invalid range: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange { lower: i64, upper: i64 },
    #[error("bound {bound} is not representable as {elem}")]
    UnrepresentableBound { bound: i64, elem: &'static str },
    #[error("matrix error: {0}")]
    Matrix(#[from] mm_matrix::MatrixError),
}

pub type Result<T> = std::result::Result<T, FillError>;
