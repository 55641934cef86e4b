use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use half::f16;
use num_traits::{One, Zero};

/// Numeric field type that a [`Matrix`](crate::Matrix) can hold.
///
/// Overflow and rounding behavior are inherited from the implementing type;
/// the matrix code never checks or widens arithmetic.
pub trait Element:
    Copy
    + Debug
    + PartialOrd
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    /// True for integer types. Integral matrices only compare exactly.
    const INTEGRAL: bool;

    /// Short type name used in diagnostics (e.g. "i32", "f64").
    const NAME: &'static str;

    /// Absolute difference `|self - other|`, widened to f64 for tolerance checks.
    fn abs_diff(self, other: Self) -> f64;
}

macro_rules! impl_integral {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                const INTEGRAL: bool = true;
                const NAME: &'static str = stringify!($t);

                #[inline]
                fn abs_diff(self, other: Self) -> f64 {
                    <$t>::abs_diff(self, other) as f64
                }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, i128, isize);

impl Element for f32 {
    const INTEGRAL: bool = false;
    const NAME: &'static str = "f32";

    #[inline]
    fn abs_diff(self, other: Self) -> f64 {
        f64::from((self - other).abs())
    }
}

impl Element for f64 {
    const INTEGRAL: bool = false;
    const NAME: &'static str = "f64";

    #[inline]
    fn abs_diff(self, other: Self) -> f64 {
        (self - other).abs()
    }
}

impl Element for f16 {
    const INTEGRAL: bool = false;
    const NAME: &'static str = "f16";

    #[inline]
    fn abs_diff(self, other: Self) -> f64 {
        (self - other).to_f64().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_flags() {
        assert!(i32::INTEGRAL);
        assert!(i64::INTEGRAL);
        assert!(!f32::INTEGRAL);
        assert!(!f64::INTEGRAL);
        assert!(!f16::INTEGRAL);
    }

    #[test]
    fn test_abs_diff_integral() {
        assert_eq!(Element::abs_diff(3i32, 7i32), 4.0);
        assert_eq!(Element::abs_diff(7i32, 3i32), 4.0);
        // Would overflow if computed as i32 subtraction.
        assert_eq!(Element::abs_diff(i32::MIN, i32::MAX), u32::MAX as f64);
    }

    #[test]
    fn test_abs_diff_float() {
        assert_eq!(Element::abs_diff(1.0f64, 1.5f64), 0.5);
        assert_eq!(Element::abs_diff(-2.0f32, 2.0f32), 4.0);
        assert!(Element::abs_diff(f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn test_abs_diff_f16() {
        let a = f16::from_f32(1.0);
        let b = f16::from_f32(1.25);
        assert_eq!(Element::abs_diff(a, b), 0.25);
    }

    #[test]
    fn test_names() {
        assert_eq!(<i32 as Element>::NAME, "i32");
        assert_eq!(<f64 as Element>::NAME, "f64");
        assert_eq!(<f16 as Element>::NAME, "f16");
    }
}
