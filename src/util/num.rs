/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts a length to `f64`.
///
/// Lengths of in-memory arrays stay far below `MAX_SAFE_U64_INT`, so the
/// conversion is exact.
///
/// ## Example
/// ```
/// use checklang::util::num::usize_to_f64;
///
/// assert_eq!(usize_to_f64(3), 3.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Converts an `f64` to an index if the value is finite, non-negative,
/// within range, and not fractional.
///
/// # Returns
/// - `Some(usize)`: The converted value if safe.
/// - `None`: If the value cannot be an index.
///
/// # Example
/// ```
/// use checklang::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(7.0), Some(7));
/// assert_eq!(f64_to_index(-1.0), None);
/// assert_eq!(f64_to_index(1.5), None);
/// assert_eq!(f64_to_index(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn f64_to_index(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    if value.fract() != 0.0 {
        return None;
    }
    usize::try_from(value as u64).ok()
}
