use crate::{
    ast::{ConditionalOperator, Position},
    error::ErrorKind,
    interpreter::value::core::ValueType,
};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source position where the error occurred.
        pos:  Position,
    },
    /// Called an unknown function.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Position,
    },
    /// Declared a variable twice in the same scope.
    VariableAlreadyDefined {
        /// The name of the variable.
        name: String,
        /// The source position where the error occurred.
        pos:  Position,
    },
    /// Declared a function twice in the same scope.
    FunctionAlreadyDefined {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Position,
    },
    /// Attempted to redefine a built-in function.
    BuiltinFunctionRedefinition {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Position,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source position where the error occurred.
        pos:     Position,
    },
    /// An assignment would change the type of a variable or array element.
    TypeChange {
        /// The variable being assigned.
        name:     String,
        /// The type currently stored.
        expected: ValueType,
        /// The type of the new value.
        found:    ValueType,
        /// The source position where the error occurred.
        pos:      Position,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The variable name or rendered value of the operand.
        operand: String,
        /// The type that was found instead.
        found:   ValueType,
        /// The source position where the error occurred.
        pos:     Position,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The type that was found instead.
        found: ValueType,
        /// The source position where the error occurred.
        pos:   Position,
    },
    /// An array value was expected, but not found.
    ExpectedArray {
        /// The variable name or rendered value of the operand.
        operand: String,
        /// The type that was found instead.
        found:   ValueType,
        /// The source position where the error occurred.
        pos:     Position,
    },
    /// An argument does not match the declared type of its parameter.
    ParameterTypeMismatch {
        /// The function being called.
        function:  String,
        /// The parameter name.
        parameter: String,
        /// The declared type.
        expected:  ValueType,
        /// The type of the argument.
        found:     ValueType,
        /// The source position where the error occurred.
        pos:       Position,
    },
    /// The operator does not apply to operands of these types.
    UnsupportedComparison {
        /// The operator.
        op:    ConditionalOperator,
        /// The type of the left operand.
        left:  ValueType,
        /// The type of the right operand.
        right: ValueType,
        /// The source position where the error occurred.
        pos:   Position,
    },
    /// Array index out of range.
    IndexOutOfBounds {
        /// The variable name or rendered value of the array.
        array: String,
        /// The index that was accessed.
        index: usize,
        /// The length of the array.
        len:   usize,
        /// The source position where the error occurred.
        pos:   Position,
    },
    /// An index that is not a non-negative whole number.
    InvalidIndex {
        /// The rendered index value.
        index: String,
        /// The source position where the error occurred.
        pos:   Position,
    },
    /// A function was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The function being called.
        name:     String,
        /// A description of the accepted count, e.g. `2` or `at least 1`.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source position where the error occurred.
        pos:      Position,
    },
    /// Division or remainder by zero.
    DivisionByZero {
        /// The source position where the error occurred.
        pos: Position,
    },
}

impl RuntimeError {
    /// The source position of the error.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnknownVariable { pos, .. }
            | Self::UnknownFunction { pos, .. }
            | Self::VariableAlreadyDefined { pos, .. }
            | Self::FunctionAlreadyDefined { pos, .. }
            | Self::BuiltinFunctionRedefinition { pos, .. }
            | Self::TypeError { pos, .. }
            | Self::TypeChange { pos, .. }
            | Self::ExpectedNumber { pos, .. }
            | Self::ExpectedBoolean { pos, .. }
            | Self::ExpectedArray { pos, .. }
            | Self::ParameterTypeMismatch { pos, .. }
            | Self::UnsupportedComparison { pos, .. }
            | Self::IndexOutOfBounds { pos, .. }
            | Self::InvalidIndex { pos, .. }
            | Self::ArgumentCountMismatch { pos, .. }
            | Self::DivisionByZero { pos } => *pos,
        }
    }

    /// The category the error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVariable { .. }
            | Self::UnknownFunction { .. }
            | Self::VariableAlreadyDefined { .. }
            | Self::FunctionAlreadyDefined { .. }
            | Self::BuiltinFunctionRedefinition { .. } => ErrorKind::Name,
            Self::TypeError { .. }
            | Self::TypeChange { .. }
            | Self::ExpectedNumber { .. }
            | Self::ExpectedBoolean { .. }
            | Self::ExpectedArray { .. }
            | Self::ParameterTypeMismatch { .. }
            | Self::UnsupportedComparison { .. } => ErrorKind::Type,
            Self::IndexOutOfBounds { .. } | Self::InvalidIndex { .. } => ErrorKind::Index,
            Self::ArgumentCountMismatch { .. } => ErrorKind::Arity,
            Self::DivisionByZero { .. } => ErrorKind::Division,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pos = self.position();
        write!(f, "Error on {pos}: ")?;
        match self {
            Self::UnknownVariable { name, .. } => write!(f, "Unknown variable '{name}'."),
            Self::UnknownFunction { name, .. } => write!(f, "Unknown function '{name}'."),
            Self::VariableAlreadyDefined { name, .. } => {
                write!(f, "Variable '{name}' is already defined in this scope.")
            },
            Self::FunctionAlreadyDefined { name, .. } => {
                write!(f, "Function '{name}' is already defined in this scope.")
            },
            Self::BuiltinFunctionRedefinition { name, .. } => {
                write!(f, "Cannot redefine built-in function '{name}'.")
            },
            Self::TypeError { details, .. } => write!(f, "Type error: {details}."),
            Self::TypeChange { name, expected, found, .. } => write!(f,
                                                                    "Cannot assign a value of type {found} to '{name}', which holds {expected}."),
            Self::ExpectedNumber { operand, found, .. } => {
                write!(f, "Expected a NUMBER, but '{operand}' is {found}.")
            },
            Self::ExpectedBoolean { found, .. } => {
                write!(f, "Expected a BOOLEAN condition, found {found}.")
            },
            Self::ExpectedArray { operand, found, .. } => {
                write!(f, "Expected an ARRAY, but '{operand}' is {found}.")
            },
            Self::ParameterTypeMismatch { function,
                                          parameter,
                                          expected,
                                          found,
                                          .. } => write!(f,
                                                         "Parameter '{parameter}' of '{function}' expects {expected}, got {found}."),
            Self::UnsupportedComparison { op, left, right, .. } => {
                write!(f, "Operator '{op}' is not supported between {left} and {right}.")
            },
            Self::IndexOutOfBounds { array, index, len, .. } => {
                write!(f, "Index {index} is out of bounds for '{array}' of length {len}.")
            },
            Self::InvalidIndex { index, .. } => {
                write!(f, "Index '{index}' is not a non-negative whole number.")
            },
            Self::ArgumentCountMismatch { name, expected, found, .. } => write!(f,
                                                                               "Function '{name}' expects {expected} argument(s), got {found}."),
            Self::DivisionByZero { .. } => write!(f, "Division by zero."),
        }
    }
}

impl std::error::Error for RuntimeError {}
