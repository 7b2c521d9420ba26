use std::rc::Rc;

use crate::{ast::Position, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. A value's
/// [`ValueType`] never changes; assignments that would change the tag stored
/// in a variable are rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string of text.
    String(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison and logical operators, and required by the
    /// conditions of `if`, `while` and `for`.
    Boolean(bool),
    /// An array of `Value` elements. Arrays are immutable; built-ins that
    /// modify an array build a new one.
    Array(Rc<Vec<Self>>),
    /// The absence of a value, e.g. the result of a function without a
    /// `return`.
    Null,
}

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// [`Value::Number`]
    Number,
    /// [`Value::String`]
    String,
    /// [`Value::Boolean`]
    Boolean,
    /// [`Value::Array`]
    Array,
    /// [`Value::Null`]
    Null,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Array => "ARRAY",
            Self::Null => "NULL",
        };
        write!(f, "{name}")
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl Value {
    /// Returns the type tag of the value.
    ///
    /// # Example
    /// ```
    /// use checklang::interpreter::value::core::{Value, ValueType};
    ///
    /// assert_eq!(Value::from(1.5).value_type(), ValueType::Number);
    /// assert_eq!(Value::Null.value_type(), ValueType::Null);
    /// ```
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Array(_) => ValueType::Array,
            Self::Null => ValueType::Null,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not a number.
    ///
    /// # Parameters
    /// - `name`: The variable the value was read from, if any. Used to name
    ///   the operand in the error.
    /// - `pos`: Source position for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::ExpectedNumber)`: Otherwise.
    pub fn as_number(&self, name: Option<&str>, pos: Position) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { operand: self.label(name),
                                                    found: self.value_type(),
                                                    pos }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions and logical operators.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::ExpectedBoolean)`: If not boolean.
    pub const fn as_bool(&self, pos: Position) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { found: self.value_type(),
                                                     pos }),
        }
    }

    /// Borrows the elements of an array, or returns an error if not an array.
    ///
    /// # Parameters
    /// - `name`: The variable the value was read from, if any.
    /// - `pos`: Source position for error reporting.
    pub fn as_array(&self, name: Option<&str>, pos: Position) -> EvalResult<&Rc<Vec<Self>>> {
        match self {
            Self::Array(elements) => Ok(elements),
            _ => Err(RuntimeError::ExpectedArray { operand: self.label(name),
                                                   found: self.value_type(),
                                                   pos }),
        }
    }

    /// Names the value in diagnostics: its variable if known, else its
    /// rendering.
    fn label(&self, name: Option<&str>) -> String {
        name.map_or_else(|| self.to_string(), str::to_string)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Null => write!(f, "null"),
        }
    }
}

/// Writes a number the way Check programs print it: `-0` as `0`, the
/// non-finite values as `Infinity`, `-Infinity` and `NaN`, and magnitudes
/// from `1e21` up or below `1e-6` in exponent form (`1e+23`, `1e-7`).
fn write_number(f: &mut std::fmt::Formatter<'_>, n: f64) -> std::fmt::Result {
    if n == 0.0 {
        return write!(f, "0");
    }
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" });
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent = format!("{n:e}");
        return match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            },
            _ => write!(f, "{exponent}"),
        };
    }

    write!(f, "{n}")
}

/// An evaluated call argument.
///
/// Carries the name of the variable the argument was read from, if it was a
/// plain variable reference. Array built-ins use the name to rebind their
/// result in the caller's scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The evaluated value.
    pub value: Value,
    /// The variable the value was read from.
    pub name:  Option<String>,
}

impl Argument {
    /// Borrows the argument as an array, naming it in the error otherwise.
    pub fn as_array(&self, pos: Position) -> EvalResult<&Rc<Vec<Value>>> {
        self.value.as_array(self.name.as_deref(), pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_values() {
        let nested = Value::from(vec![Value::from(1.0),
                                      Value::from(vec![Value::from("a"), Value::from(true)]),
                                      Value::Null]);
        assert_eq!(nested.to_string(), "[1, [a, true], null]");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(vec![]).to_string(), "[]");
    }

    #[test]
    fn renders_extreme_numbers() {
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(1e23).to_string(), "1e+23");
        assert_eq!(Value::from(-2.5e30).to_string(), "-2.5e+30");
        assert_eq!(Value::from(1e-7).to_string(), "1e-7");
        assert_eq!(Value::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::from(0.000_001).to_string(), "0.000001");
    }

    #[test]
    fn expected_number_names_the_variable() {
        let err = Value::from("hi").as_number(Some("s"), Position::new(1, 1)).unwrap_err();
        assert!(matches!(err,
                         RuntimeError::ExpectedNumber { operand, found: ValueType::String, .. }
                         if operand == "s"));
    }

    #[test]
    fn expected_array_names_a_literal_by_its_value() {
        let err = Value::from(3.0).as_array(None, Position::new(1, 1)).unwrap_err();
        assert!(matches!(err, RuntimeError::ExpectedArray { operand, .. } if operand == "3"));
    }
}
