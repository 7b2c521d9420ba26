/// Numeric conversion helpers.
///
/// Conversions between array lengths and indices, which are `usize`, and
/// Check numbers, which are `f64`. Each one either converts exactly or
/// reports that it cannot.
pub mod num;
