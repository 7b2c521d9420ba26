use std::fmt;

use crate::interpreter::value::core::ValueType;

/// A location in the source text.
///
/// Lines and columns are 1-based. Columns count bytes from the start of the
/// line, which matches what editors report for ASCII source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The column within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Identifies a single node of a parsed tree.
///
/// Ids are only unique within one parse. They carry no meaning for
/// evaluation and exist for tooling and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Hands out [`NodeId`]s in increasing order.
///
/// The parser owns one generator per parse, so the same source always yields
/// the same ids. Tests may start the sequence anywhere with
/// [`NodeIds::starting_at`].
///
/// # Example
/// ```
/// use checklang::ast::{NodeId, NodeIds};
///
/// let mut ids = NodeIds::starting_at(10);
///
/// assert_eq!(ids.next_id(), NodeId(10));
/// assert_eq!(ids.next_id(), NodeId(11));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NodeIds {
    next: u32,
}

impl NodeIds {
    /// Creates a generator whose first id is `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Creates a generator whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Returns the next id and advances the sequence.
    pub const fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// An arithmetic operator. Both operands must be numbers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
}

/// A comparison or logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConditionalOperator {
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

/// A type name usable in a parameter declaration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// `string`
    String,
    /// `number`
    Number,
    /// `bool`
    Bool,
}

impl TypeName {
    /// The runtime tag an argument must carry to match this type.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::String => ValueType::String,
            Self::Number => ValueType::Number,
            Self::Bool => ValueType::Boolean,
        }
    }
}

/// An expression node.
///
/// Expressions produce a value and never bind names. Every variant carries
/// its [`NodeId`] and the [`Position`] of its first token (or of its
/// operator, for binary nodes).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Arithmetic on two numbers.
    BinaryOp {
        /// Node id.
        id:    NodeId,
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Position of the operator.
        pos:   Position,
    },
    /// A comparison or a logical combination of two operands.
    Conditional {
        /// Node id.
        id:    NodeId,
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    ConditionalOperator,
        /// Right operand.
        right: Box<Self>,
        /// Position of the operator.
        pos:   Position,
    },
    /// A number literal.
    Number {
        /// Node id.
        id:    NodeId,
        /// The literal value.
        value: f64,
        /// Source position.
        pos:   Position,
    },
    /// A string literal.
    String {
        /// Node id.
        id:    NodeId,
        /// The raw characters between the quotes.
        value: String,
        /// Source position.
        pos:   Position,
    },
    /// `true` or `false`.
    Boolean {
        /// Node id.
        id:    NodeId,
        /// The literal value.
        value: bool,
        /// Source position.
        pos:   Position,
    },
    /// An array literal such as `[1, 2, 3]`.
    Array {
        /// Node id.
        id:       NodeId,
        /// Element expressions in order.
        elements: Vec<Self>,
        /// Source position.
        pos:      Position,
    },
    /// Indexing into an array, e.g. `a[0]` or `[1, 2][1]`.
    Index {
        /// Node id.
        id:    NodeId,
        /// The expression producing the array.
        array: Box<Self>,
        /// The index expression.
        index: Box<Self>,
        /// Position of the opening bracket.
        pos:   Position,
    },
    /// A variable reference.
    Name {
        /// Node id.
        id:   NodeId,
        /// The variable name.
        name: String,
        /// Source position.
        pos:  Position,
    },
    /// A call to a built-in or user-defined function.
    FunctionCall {
        /// Node id.
        id:        NodeId,
        /// The function name.
        name:      String,
        /// Argument expressions in order.
        arguments: Vec<Self>,
        /// Source position.
        pos:       Position,
    },
}

impl Expr {
    /// Gets the source position of `self`.
    ///
    /// ## Example
    /// ```
    /// use checklang::ast::{Expr, NodeId, Position};
    ///
    /// let expr = Expr::Name { id:   NodeId(0),
    ///                         name: "x".to_string(),
    ///                         pos:  Position::new(5, 3), };
    ///
    /// assert_eq!(expr.position(), Position::new(5, 3));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::BinaryOp { pos, .. }
            | Self::Conditional { pos, .. }
            | Self::Number { pos, .. }
            | Self::String { pos, .. }
            | Self::Boolean { pos, .. }
            | Self::Array { pos, .. }
            | Self::Index { pos, .. }
            | Self::Name { pos, .. }
            | Self::FunctionCall { pos, .. } => *pos,
        }
    }

    /// Gets the node id of `self`.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::BinaryOp { id, .. }
            | Self::Conditional { id, .. }
            | Self::Number { id, .. }
            | Self::String { id, .. }
            | Self::Boolean { id, .. }
            | Self::Array { id, .. }
            | Self::Index { id, .. }
            | Self::Name { id, .. }
            | Self::FunctionCall { id, .. } => *id,
        }
    }

    /// The variable name a value produced by this expression is bound to.
    ///
    /// Only plain variable references carry a name. Built-ins that rebuild an
    /// array use it to rebind the result in the caller's scope.
    #[must_use]
    pub fn tracked_name(&self) -> Option<&str> {
        match self {
            Self::Name { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A typed parameter in a function declaration, e.g. `number a`.
///
/// Parameter declarations are never evaluated on their own. Their types are
/// checked against the arguments when the function is called.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    /// Node id.
    pub id:         NodeId,
    /// The declared type.
    pub param_type: TypeName,
    /// The parameter name.
    pub name:       String,
    /// Source position.
    pub pos:        Position,
}

/// A user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Node id.
    pub id:     NodeId,
    /// The name the function is called by.
    pub name:   String,
    /// Parameters in declaration order.
    pub params: Vec<ParameterDeclaration>,
    /// The statements of the function body.
    pub body:   Vec<Statement>,
    /// Source position of the `function` keyword.
    pub pos:    Position,
}

/// A statement node.
///
/// Statements are the units the parser hands to the evaluator. Blocks are
/// plain `Vec<Statement>`s owned by the enclosing node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its effects, e.g. `printLn(x);`.
    Expression {
        /// Node id.
        id:   NodeId,
        /// The expression.
        expr: Expr,
        /// Source position.
        pos:  Position,
    },
    /// `name = value;`
    Assignment {
        /// Node id.
        id:    NodeId,
        /// The variable being assigned.
        name:  String,
        /// The new value.
        value: Expr,
        /// Source position.
        pos:   Position,
    },
    /// `name[i][j] = value;`
    IndexAssignment {
        /// Node id.
        id:      NodeId,
        /// The array variable.
        name:    String,
        /// Index expressions, outermost first.
        indexes: Vec<Expr>,
        /// The value stored at the final index.
        value:   Expr,
        /// Source position.
        pos:     Position,
    },
    /// `var name = value;`
    Initialization {
        /// Node id.
        id:    NodeId,
        /// The variable being declared.
        name:  String,
        /// The initial value.
        value: Expr,
        /// Source position.
        pos:   Position,
    },
    /// `if (condition) { ... } else { ... }`
    If {
        /// Node id.
        id:          NodeId,
        /// The condition. Must evaluate to a boolean.
        condition:   Expr,
        /// Statements run when the condition holds.
        then_branch: Vec<Self>,
        /// Statements run otherwise, if present.
        else_branch: Option<Vec<Self>>,
        /// Source position.
        pos:         Position,
    },
    /// `while (condition) { ... }`
    While {
        /// Node id.
        id:        NodeId,
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Vec<Self>,
        /// Source position.
        pos:       Position,
    },
    /// `for (var i = 0; condition; step) { ... }`
    For {
        /// Node id.
        id:        NodeId,
        /// The initializer, run once before the first check.
        init:      Box<Self>,
        /// The loop condition.
        condition: Expr,
        /// The step, run after every pass through the body.
        step:      Box<Self>,
        /// The loop body.
        body:      Vec<Self>,
        /// Source position.
        pos:       Position,
    },
    /// `return value;` or `return;`
    Return {
        /// Node id.
        id:    NodeId,
        /// The returned expression. `None` returns null.
        value: Option<Expr>,
        /// Source position.
        pos:   Position,
    },
    /// `function name(type a, ...) { ... }`
    FunctionDeclaration(FunctionDef),
}

impl Statement {
    /// Gets the source position of `self`.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Expression { pos, .. }
            | Self::Assignment { pos, .. }
            | Self::IndexAssignment { pos, .. }
            | Self::Initialization { pos, .. }
            | Self::If { pos, .. }
            | Self::While { pos, .. }
            | Self::For { pos, .. }
            | Self::Return { pos, .. }
            | Self::FunctionDeclaration(FunctionDef { pos, .. }) => *pos,
        }
    }

    /// Gets the node id of `self`.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Expression { id, .. }
            | Self::Assignment { id, .. }
            | Self::IndexAssignment { id, .. }
            | Self::Initialization { id, .. }
            | Self::If { id, .. }
            | Self::While { id, .. }
            | Self::For { id, .. }
            | Self::Return { id, .. }
            | Self::FunctionDeclaration(FunctionDef { id, .. }) => *id,
        }
    }

    /// Returns `true` for `return` statements.
    #[must_use]
    pub const fn is_return(&self) -> bool {
        matches!(self, Self::Return { .. })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for ConditionalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConditionalOperator::{And, Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual, Or};
        let operator = match self {
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
        };
        write!(f, "{name}")
    }
}
