use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser},
            factor::parse_factor,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `expr := term (("+" | "-") term)*`
///
/// # Parameters
/// - `parser`: The parser positioned at the first operand.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    let mut left = parse_multiplicative(parser)?;
    loop {
        if let Some(op) = token_to_binary_operator(parser.peek_kind()?)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let pos = parser.advance()?.position();
            let right = parse_multiplicative(parser)?;
            left = Expr::BinaryOp { id: parser.next_id(),
                                    left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/` and `%`.
///
/// The rule is: `term := factor (("*" | "/" | "%") factor)*`
///
/// # Parameters
/// - `parser`: The parser positioned at the first operand.
///
/// # Returns
/// A binary expression tree combining factor-level nodes.
pub fn parse_multiplicative(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    let mut left = parse_factor(parser)?;
    loop {
        if let Some(op) = token_to_binary_operator(parser.peek_kind()?)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            let pos = parser.advance()?.position();
            let right = parse_factor(parser)?;
            left = Expr::BinaryOp { id: parser.next_id(),
                                    left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token kind to its corresponding arithmetic operator.
///
/// # Parameters
/// - `kind`: The token kind to convert.
///
/// # Returns
/// - `Some(BinaryOperator)` if the token is an arithmetic operator.
/// - `None` otherwise.
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse_expression;

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse_expression(&mut Parser::new("x + y * 2")).unwrap();
        let Expr::BinaryOp { op, right, .. } = expr else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*right,
                         Expr::BinaryOp { op: BinaryOperator::Mul,
                                          .. }));
    }

    #[test]
    fn operators_are_left_associative() {
        let expr = parse_expression(&mut Parser::new("8 - 4 - 2")).unwrap();
        let Expr::BinaryOp { left, .. } = expr else {
            panic!("expected a binary operation");
        };
        assert!(matches!(*left,
                         Expr::BinaryOp { op: BinaryOperator::Sub,
                                          .. }));
    }
}
