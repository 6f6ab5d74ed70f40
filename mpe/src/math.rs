use num_traits::{Float, FromPrimitive};

/// Converts an `f64` constant into `T`.
///
/// Every `Float` we care about (f32, f64) can represent these
/// constants, possibly with lost precision, so the NaN fallback is
/// never expected to be hit.
#[inline]
pub(crate) fn lit<T>(val: f64) -> T
where
    T: Float + FromPrimitive,
{
    T::from_f64(val).unwrap_or_else(T::nan)
}

/// Lossy conversion to `f64` for error and log reporting.
#[inline]
pub(crate) fn as_f64<T: Float>(val: T) -> f64 {
    val.to_f64().unwrap_or(f64::NAN)
}

/// Converts decibels to a linear power ratio.
#[inline]
pub(crate) fn db_to_ratio<T>(db: T) -> T
where
    T: Float + FromPrimitive,
{
    lit::<T>(10.0).powf(db / lit(10.0))
}
