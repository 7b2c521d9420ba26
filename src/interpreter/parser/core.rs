use crate::{
    ast::{Expr, NodeId, NodeIds, Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token, TokenKind},
        parser::{conditional::parse_conditional_expr, statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A recursive-descent parser over a [`Lexer`].
///
/// The parser holds at most one token of lookahead. Rules that need more
/// clone the parser, explore the clone and drop it, leaving `self` where it
/// was.
///
/// # Example
/// ```
/// use checklang::interpreter::parser::core::Parser;
///
/// let mut parser = Parser::new("var x = 1; x = x + 1;");
/// let program = parser.parse_program().unwrap();
///
/// assert_eq!(program.len(), 2);
/// assert!(parser.at_end().unwrap());
/// ```
#[derive(Clone)]
pub struct Parser<'a> {
    lexer:    Lexer<'a>,
    peeked:   Option<Token>,
    ids:      NodeIds,
    returned: bool,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `source` whose node ids start at `0`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_ids(source, NodeIds::new())
    }

    /// Creates a parser for `source` drawing node ids from `ids`.
    #[must_use]
    pub fn with_ids(source: &'a str, ids: NodeIds) -> Self {
        Self { lexer: Lexer::new(source),
               peeked: None,
               ids,
               returned: false }
    }

    /// Returns `true` once only the end of input remains.
    ///
    /// # Errors
    /// Returns a lexing error if the next token cannot be scanned.
    pub fn at_end(&mut self) -> ParseResult<bool> {
        Ok(self.peek_kind()? == TokenKind::Eof)
    }

    /// Parses the next top-level statement.
    ///
    /// After a top-level `return`, any further statement is rejected as
    /// unreachable.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the statement is malformed or unreachable.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        if self.returned {
            let pos = self.peek_position()?;
            return Err(ParseError::UnreachableStatement { pos });
        }

        let statement = statement::parse_statement(self)?;
        self.returned = statement.is_return();

        Ok(statement)
    }

    /// Parses statements until the end of input.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_program(&mut self) -> ParseResult<Vec<Statement>> {
        let mut program = Vec::new();
        while !self.at_end()? {
            program.push(self.parse_statement()?);
        }

        Ok(program)
    }

    pub(in crate::interpreter::parser) fn peek(&mut self) -> ParseResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };

        Ok(self.peeked.insert(token))
    }

    pub(in crate::interpreter::parser) fn peek_kind(&mut self) -> ParseResult<TokenKind> {
        Ok(self.peek()?.kind)
    }

    pub(in crate::interpreter::parser) fn peek_position(&mut self) -> ParseResult<Position> {
        Ok(self.peek()?.position())
    }

    /// Consumes and returns the next token.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> ParseResult<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => Ok(self.lexer.next_token()?),
        }
    }

    /// Consumes the next token, which must be of the given kind.
    pub(in crate::interpreter::parser) fn expect(&mut self, kind: TokenKind)
                                                 -> ParseResult<Token> {
        let token = self.advance()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(token, &kind.to_string()))
        }
    }

    /// Consumes the next token if it is of the given kind.
    pub(in crate::interpreter::parser) fn eat(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.peek_kind()? == kind {
            self.advance()?;
            return Ok(true);
        }

        Ok(false)
    }

    pub(in crate::interpreter::parser) const fn next_id(&mut self) -> NodeId {
        self.ids.next_id()
    }
}

/// Builds the error for `token` appearing where `expected` was required.
pub(in crate::interpreter::parser) fn unexpected(token: Token, expected: &str) -> ParseError {
    let pos = token.position();
    let expected = expected.to_string();
    if token.kind == TokenKind::Eof {
        ParseError::UnexpectedEndOfInput { expected, pos }
    } else {
        ParseError::UnexpectedToken { found: token.text,
                                      expected,
                                      pos }
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := conditional_expr`
pub fn parse_expression(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    parse_conditional_expr(parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(statement: &Statement) -> Vec<NodeId> {
        let Statement::Expression { expr, .. } = statement else {
            panic!("expected an expression statement");
        };
        let Expr::BinaryOp { left, right, .. } = expr else {
            panic!("expected a binary operation");
        };
        vec![statement.id(), expr.id(), left.id(), right.id()]
    }

    #[test]
    fn same_source_gets_same_ids() {
        let source = "var x = [1, 2]; x[0] = x[1] * 3; printLn(x);";
        let first = Parser::new(source).parse_program().unwrap();
        let second = Parser::new(source).parse_program().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.iter().map(Statement::id).collect::<Vec<_>>(),
                   second.iter().map(Statement::id).collect::<Vec<_>>());
    }

    #[test]
    fn ids_come_from_the_given_generator() {
        let mut parser = Parser::with_ids("1 + 2;", NodeIds::starting_at(100));
        let mut found = ids(&parser.parse_statement().unwrap());
        found.sort();
        found.dedup();

        assert_eq!(found, [NodeId(100), NodeId(101), NodeId(102), NodeId(103)]);
    }
}
