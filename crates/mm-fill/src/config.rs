use crate::error::{FillError, Result};

/// Parameters of a fill stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillConfig {
    /// Inclusive lower bound of drawn values.
    pub lower: i64,
    /// Inclusive upper bound of drawn values.
    pub upper: i64,
    /// Seed of the underlying generator.
    pub seed: u64,
    /// Generator words skipped before the first matrix is filled.
    pub initial_discards: u64,
}

impl FillConfig {
    pub const DEFAULT_BOUND: i64 = 8;
    pub const DEFAULT_DISCARDS: u64 = 100;

    /// Config drawing from `[lower, upper]` with the default seed and discards.
    pub fn new(lower: i64, upper: i64) -> Self {
        FillConfig {
            lower,
            upper,
            ..Self::default()
        }
    }

    /// Config drawing from `[-bound, bound]`.
    pub fn symmetric(bound: i64) -> Self {
        Self::new(-bound, bound)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_initial_discards(mut self, discards: u64) -> Self {
        self.initial_discards = discards;
        self
    }

    /// Checks that the range is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.lower > self.upper {
            return Err(FillError::InvalidRange {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        FillConfig {
            lower: -Self::DEFAULT_BOUND,
            upper: Self::DEFAULT_BOUND,
            seed: 0,
            initial_discards: Self::DEFAULT_DISCARDS,
        }
    }
}
