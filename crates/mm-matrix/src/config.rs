/// Tuning for the divide-and-conquer strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionConfig {
    /// Block size at or below which recursion stops and the textbook kernel
    /// multiplies the block directly. `0` behaves like `1`.
    pub cutoff: usize,
}

impl RecursionConfig {
    /// Recurse all the way down to scalar products.
    pub const DEFAULT_CUTOFF: usize = 1;

    pub fn new(cutoff: usize) -> Self {
        RecursionConfig { cutoff }
    }

    /// The cutoff actually applied by the recursion (never below 1).
    pub fn effective_cutoff(&self) -> usize {
        self.cutoff.max(1)
    }
}

impl Default for RecursionConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CUTOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoff() {
        assert_eq!(RecursionConfig::default().cutoff, 1);
    }

    #[test]
    fn test_zero_cutoff_is_one() {
        assert_eq!(RecursionConfig::new(0).effective_cutoff(), 1);
        assert_eq!(RecursionConfig::new(16).effective_cutoff(), 16);
    }
}
