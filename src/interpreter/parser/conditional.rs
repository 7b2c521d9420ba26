use crate::{
    ast::{ConditionalOperator, Expr},
    interpreter::{
        lexer::TokenKind,
        parser::{
            binary::parse_additive,
            core::{ParseResult, Parser},
        },
    },
};

/// Parses logical OR expressions.
///
/// The rule is: `conditional_expr := conditional_term ("||" conditional_term)*`
pub fn parse_conditional_expr(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    let mut left = parse_conditional_term(parser)?;
    while parser.peek_kind()? == TokenKind::Or {
        let pos = parser.advance()?.position();
        let right = parse_conditional_term(parser)?;
        left = Expr::Conditional { id: parser.next_id(),
                                   left: Box::new(left),
                                   op: ConditionalOperator::Or,
                                   right: Box::new(right),
                                   pos };
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `conditional_term := conditional_factor ("&&"
/// conditional_factor)*`
pub fn parse_conditional_term(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    let mut left = parse_comparison(parser)?;
    while parser.peek_kind()? == TokenKind::And {
        let pos = parser.advance()?.position();
        let right = parse_comparison(parser)?;
        left = Expr::Conditional { id: parser.next_id(),
                                   left: Box::new(left),
                                   op: ConditionalOperator::And,
                                   right: Box::new(right),
                                   pos };
    }
    Ok(left)
}

/// Parses at most one comparison between two arithmetic expressions.
///
/// Comparisons do not chain: `a < b < c` stops after `a < b` and leaves `<`
/// for the caller to reject.
///
/// The rule is: `conditional_factor := expr (cmp_op expr)?`
pub fn parse_comparison(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    let left = parse_additive(parser)?;

    let Some(op) = token_to_comparison_operator(parser.peek_kind()?) else {
        return Ok(left);
    };
    let pos = parser.advance()?.position();
    let right = parse_additive(parser)?;

    Ok(Expr::Conditional { id: parser.next_id(),
                           left: Box::new(left),
                           op,
                           right: Box::new(right),
                           pos })
}

/// Maps a token kind to its comparison operator.
///
/// # Returns
/// `Some(ConditionalOperator)` for the six comparison tokens, `None`
/// otherwise. Logical operators are handled by their own precedence levels.
#[must_use]
pub const fn token_to_comparison_operator(kind: TokenKind) -> Option<ConditionalOperator> {
    match kind {
        TokenKind::EqualEqual => Some(ConditionalOperator::Equal),
        TokenKind::BangEqual => Some(ConditionalOperator::NotEqual),
        TokenKind::Less => Some(ConditionalOperator::Less),
        TokenKind::LessEqual => Some(ConditionalOperator::LessEqual),
        TokenKind::Greater => Some(ConditionalOperator::Greater),
        TokenKind::GreaterEqual => Some(ConditionalOperator::GreaterEqual),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse_expression;

    fn parse(source: &str) -> Expr {
        parse_expression(&mut Parser::new(source)).unwrap()
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let Expr::Conditional { op, right, .. } = parse("a || b && c") else {
            panic!("expected a conditional");
        };
        assert_eq!(op, ConditionalOperator::Or);
        assert!(matches!(*right,
                         Expr::Conditional { op: ConditionalOperator::And,
                                             .. }));
    }

    #[test]
    fn comparison_operands_are_arithmetic() {
        let Expr::Conditional { op, left, .. } = parse("1 + 2 <= 3") else {
            panic!("expected a conditional");
        };
        assert_eq!(op, ConditionalOperator::LessEqual);
        assert!(matches!(*left, Expr::BinaryOp { .. }));
    }
}
