/// The built-in function table and call dispatch.
///
/// Resolves a call to a built-in or a user-defined function, checks arity
/// and parameter types, and runs the body in its own scope.
pub mod core;
/// `printLn` and `concat`.
///
/// Both render their arguments and join them without separators.
pub mod print;
/// Array built-ins: `index`, `setIndex`, `push`, `pop` and `length`.
///
/// Arrays are immutable values. Built-ins that modify an array return a new
/// one and rebind it under the variable the array was read from.
pub mod array;
