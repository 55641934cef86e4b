use mm_matrix::{Element, Matrix};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::config::FillConfig;
use crate::error::{FillError, Result};
use crate::uniform::UniformElement;

/// A seeded stream of uniform values with an explicit draw count.
///
/// The generator is seeded once and every draw advances it, so matrices
/// filled one after another from the same stream receive consecutive,
/// non-overlapping stretches of generator output whatever their element
/// types.
#[derive(Debug, Clone)]
pub struct FillStream {
    config: FillConfig,
    rng: StdRng,
    discards: u64,
}

impl FillStream {
    /// Create a stream positioned after `config.initial_discards` draws.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `config.lower > config.upper`.
    pub fn new(config: FillConfig) -> Result<Self> {
        config.validate()?;
        let mut stream = FillStream {
            config,
            rng: StdRng::seed_from_u64(config.seed),
            discards: 0,
        };
        stream.discard(config.initial_discards);
        Ok(stream)
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Number of values drawn or skipped so far.
    pub fn discards(&self) -> u64 {
        self.discards
    }

    /// Skip `n` raw generator words.
    pub fn discard(&mut self, n: u64) {
        for _ in 0..n {
            self.rng.next_u64();
        }
        self.discards += n;
    }

    fn bounds<T: UniformElement>(&self) -> Result<(T, T)> {
        let convert = |bound: i64| {
            T::from_bound(bound).ok_or(FillError::UnrepresentableBound {
                bound,
                elem: <T as Element>::NAME,
            })
        };
        Ok((convert(self.config.lower)?, convert(self.config.upper)?))
    }

    /// Overwrite every element of `matrix` with the next `rows * cols` draws.
    ///
    /// # Errors
    /// Returns `UnrepresentableBound` if the configured range does not fit
    /// `T`; the matrix and the stream are left untouched.
    pub fn fill<T: UniformElement>(&mut self, matrix: &mut Matrix<T>) -> Result<()> {
        let (lower, upper) = self.bounds::<T>()?;
        for i in 0..matrix.rows() {
            for j in 0..matrix.cols() {
                matrix.set(i, j, T::sample_in(&mut self.rng, lower, upper))?;
            }
        }

        debug!(
            elem = <T as Element>::NAME,
            rows = matrix.rows(),
            cols = matrix.cols(),
            drawn_before = self.discards,
            "filled matrix"
        );
        self.discards += matrix.len() as u64;
        Ok(())
    }

    /// Allocate a `rows x cols` matrix and fill it from the stream.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn random_matrix<T: UniformElement>(
        &mut self,
        rows: usize,
        cols: usize,
    ) -> Result<Matrix<T>> {
        let mut m = Matrix::new(rows, cols);
        self.fill(&mut m)?;
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::collections::HashSet;

    fn stream() -> FillStream {
        FillStream::new(FillConfig::default().with_seed(7)).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_range() {
        assert!(matches!(
            FillStream::new(FillConfig::new(1, 0)),
            Err(FillError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_values_in_range() {
        let mut s = stream();
        let m: Matrix<i32> = s.random_matrix(8, 8).unwrap();
        assert!(m.as_slice().iter().all(|v| (-8..=8).contains(v)));
        let f: Matrix<f64> = s.random_matrix(8, 8).unwrap();
        assert!(f.as_slice().iter().all(|v| (-8.0..=8.0).contains(v)));
    }

    #[test]
    fn test_discard_count_advances() {
        let mut s = stream();
        assert_eq!(s.discards(), 100);
        let _: Matrix<i32> = s.random_matrix(3, 5).unwrap();
        assert_eq!(s.discards(), 115);
        s.discard(5);
        assert_eq!(s.discards(), 120);
    }

    #[test]
    fn test_successive_matrices_are_consecutive_draws() {
        let mut s = stream();
        let a: Matrix<i64> = s.random_matrix(2, 3).unwrap();
        let b: Matrix<i64> = s.random_matrix(2, 3).unwrap();
        let whole: Matrix<i64> = stream().random_matrix(1, 12).unwrap();

        assert_eq!(&whole.as_slice()[..6], a.as_slice());
        assert_eq!(&whole.as_slice()[6..], b.as_slice());
    }

    #[test]
    fn test_mixed_element_types_share_no_output() {
        let config = FillConfig::new(i32::MIN as i64, i32::MAX as i64).with_seed(7);
        let lo = config.lower;
        let mut s = FillStream::new(config).unwrap();
        let wide: Matrix<i64> = s.random_matrix(1, 400).unwrap();
        let narrow: Matrix<i32> = s.random_matrix(1, 400).unwrap();

        let seen: HashSet<u32> = wide.as_slice().iter().map(|&v| (v - lo) as u32).collect();
        let shared = narrow
            .as_slice()
            .iter()
            .filter(|&&v| seen.contains(&((v as i64 - lo) as u32)))
            .count();
        assert_eq!(shared, 0);
    }

    #[test]
    fn test_clone_continues_same_sequence() {
        let mut s = stream();
        let _: Matrix<f64> = s.random_matrix(2, 2).unwrap();
        let mut copy = s.clone();
        let a: Matrix<i32> = s.random_matrix(3, 3).unwrap();
        let b: Matrix<i32> = copy.random_matrix(3, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_discard_moves_stream() {
        let mut skipped = FillStream::new(FillConfig::symmetric(1000)).unwrap();
        skipped.discard(1);
        let a: Matrix<i64> = skipped.random_matrix(4, 4).unwrap();
        let b: Matrix<i64> = FillStream::new(FillConfig::symmetric(1000))
            .unwrap()
            .random_matrix(4, 4)
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_successive_matrices_differ() {
        let mut s = FillStream::new(FillConfig::symmetric(1000)).unwrap();
        let a: Matrix<i32> = s.random_matrix(4, 4).unwrap();
        let b: Matrix<i32> = s.random_matrix(4, 4).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_config_replays() {
        let a: Matrix<f32> = stream().random_matrix(3, 3).unwrap();
        let b: Matrix<f32> = stream().random_matrix(3, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unrepresentable_bound_leaves_state() {
        let mut s = FillStream::new(FillConfig::symmetric(1000)).unwrap();
        let mut m = Matrix::<i8>::new(2, 2);
        let err = s.fill(&mut m).unwrap_err();
        assert!(matches!(
            err,
            FillError::UnrepresentableBound { bound: -1000, elem: "i8" }
        ));
        assert_eq!(m, Matrix::new(2, 2));
        assert_eq!(s.discards(), 100);
    }

    #[test]
    fn test_float_mean_near_center() {
        let mut s = FillStream::new(FillConfig::new(-1, 1).with_seed(3)).unwrap();
        let m: Matrix<f64> = s.random_matrix(64, 64).unwrap();
        let mean = m.as_slice().iter().sum::<f64>() / m.len() as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 0.1);
    }

    #[test]
    fn test_filled_matrices_multiply_consistently() {
        let mut s = stream();
        let a: Matrix<i64> = s.random_matrix(8, 8).unwrap();
        let b: Matrix<i64> = s.random_matrix(8, 8).unwrap();
        let reference = a.tb_multiply(&b).unwrap();
        assert_eq!(a.bb_multiply(&b).unwrap(), reference);
        assert_eq!(a.sb_multiply(&b).unwrap(), reference);
    }
}
