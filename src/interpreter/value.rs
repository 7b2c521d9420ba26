/// Runtime values and their type tags.
///
/// Defines the `Value` enum, the `ValueType` tag used by every type check,
/// and `Argument`, a value paired with the variable it was read from.
pub mod core;
