use half::f16;
use mm_matrix::Element;
use rand::Rng;

/// Element types that can be drawn uniformly from an inclusive range.
///
/// Integer types use a discrete distribution, floating-point types a
/// continuous one.
pub trait UniformElement: Element {
    /// Converts a configured bound into this type, if representable.
    fn from_bound(bound: i64) -> Option<Self>;

    /// Draws one value in `[lower, upper]`. Requires `lower <= upper`.
    fn sample_in<R: Rng + ?Sized>(rng: &mut R, lower: Self, upper: Self) -> Self;
}

macro_rules! impl_uniform_integral {
    ($($t:ty),*) => {
        $(
            impl UniformElement for $t {
                fn from_bound(bound: i64) -> Option<Self> {
                    <$t>::try_from(bound).ok()
                }

                fn sample_in<R: Rng + ?Sized>(rng: &mut R, lower: Self, upper: Self) -> Self {
                    rng.gen_range(lower..=upper)
                }
            }
        )*
    };
}

impl_uniform_integral!(i8, i16, i32, i64, i128, isize);

impl UniformElement for f32 {
    fn from_bound(bound: i64) -> Option<Self> {
        Some(bound as f32)
    }

    fn sample_in<R: Rng + ?Sized>(rng: &mut R, lower: Self, upper: Self) -> Self {
        rng.gen_range(lower..=upper)
    }
}

impl UniformElement for f64 {
    fn from_bound(bound: i64) -> Option<Self> {
        Some(bound as f64)
    }

    fn sample_in<R: Rng + ?Sized>(rng: &mut R, lower: Self, upper: Self) -> Self {
        rng.gen_range(lower..=upper)
    }
}

impl UniformElement for f16 {
    fn from_bound(bound: i64) -> Option<Self> {
        let v = f16::from_f64(bound as f64);
        v.is_finite().then_some(v)
    }

    fn sample_in<R: Rng + ?Sized>(rng: &mut R, lower: Self, upper: Self) -> Self {
        f16::from_f32(rng.gen_range(lower.to_f32()..=upper.to_f32()))
    }
}
