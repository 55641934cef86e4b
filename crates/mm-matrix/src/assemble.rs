use crate::block::{BlockSpec, Offset, Quadrant};
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// Build a `2s x 2s` matrix from four `s x s` quadrants given in top-left,
/// top-right, bottom-left, bottom-right order.
///
/// # Errors
/// Returns `AssembleMismatch` naming the first quadrant that is not square
/// with the same side as `m11`.
pub fn assemble<T: Element>(
    m11: &Matrix<T>,
    m12: &Matrix<T>,
    m21: &Matrix<T>,
    m22: &Matrix<T>,
) -> Result<Matrix<T>> {
    let size = m11.rows();
    let parts = [m11, m12, m21, m22];

    for (quadrant, part) in Quadrant::ALL.iter().zip(parts) {
        if part.shape() != (size, size) {
            return Err(MatrixError::AssembleMismatch {
                quadrant: quadrant.name(),
                size,
                got: part.shape(),
            });
        }
    }

    let mut out = Matrix::square(2 * size);
    for (quadrant, part) in Quadrant::ALL.iter().zip(parts) {
        out.set_block_to_copy(
            part,
            BlockSpec::new(size, quadrant.offset(size), Offset::ORIGIN),
        );
    }
    Ok(out)
}

/// Copy the four quadrants of an even-sized square matrix out, in the order
/// [`assemble`] takes them.
///
/// # Errors
/// Returns `NotSquare` or `OddDimension` if `x` has no quadrant partition.
pub fn split<T: Element>(x: &Matrix<T>) -> Result<[Matrix<T>; 4]> {
    if !x.is_square() {
        return Err(MatrixError::NotSquare {
            op: "split",
            rows: x.rows(),
            cols: x.cols(),
        });
    }
    if x.rows() % 2 != 0 {
        return Err(MatrixError::OddDimension {
            op: "split",
            dim: x.rows(),
        });
    }
    let half = x.rows() / 2;
    Ok(Quadrant::ALL.map(|q| x.block(q.offset(half), half)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(v: i32) -> Matrix<i32> {
        Matrix::from_vec(2, 2, vec![v, v + 1, v + 2, v + 3])
    }

    #[test]
    fn test_assemble_layout() {
        let m = assemble(&q(0), &q(10), &q(20), &q(30)).unwrap();
        assert_eq!(m.shape(), (4, 4));
        assert_eq!(
            m.as_slice(),
            &[
                0, 1, 10, 11, //
                2, 3, 12, 13, //
                20, 21, 30, 31, //
                22, 23, 32, 33,
            ]
        );
    }

    #[test]
    fn test_assemble_scalars() {
        let s = |v: f64| Matrix::from_vec(1, 1, vec![v]);
        let m = assemble(&s(1.0), &s(2.0), &s(3.0), &s(4.0)).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_assemble_mismatch() {
        let bad = Matrix::<i32>::new(2, 3);
        let err = assemble(&q(0), &q(0), &bad, &q(0)).unwrap_err();
        assert_eq!(
            err,
            MatrixError::AssembleMismatch {
                quadrant: "m21",
                size: 2,
                got: (2, 3),
            }
        );

        let err = assemble(&bad, &q(0), &q(0), &q(0)).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::AssembleMismatch { quadrant: "m11", .. }
        ));
    }

    #[test]
    fn test_split_assemble_round_trip() {
        for n in [2usize, 4, 6, 10] {
            let x = Matrix::from_fn(n, n, |i, j| (i * 31 + j * 7) as i64 - 40);
            let [m11, m12, m21, m22] = split(&x).unwrap();
            assert_eq!(m11.shape(), (n / 2, n / 2));
            let back = assemble(&m11, &m12, &m21, &m22).unwrap();
            assert!(back.equals(&x, 0.0).unwrap());
        }
    }

    #[test]
    fn test_split_rejects_bad_shapes() {
        assert!(matches!(
            split(&Matrix::<i32>::new(2, 4)),
            Err(MatrixError::NotSquare { .. })
        ));
        assert_eq!(
            split(&Matrix::<i32>::square(3)).unwrap_err(),
            MatrixError::OddDimension { op: "split", dim: 3 }
        );
    }
}
