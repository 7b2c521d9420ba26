use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser, parse_expression, unexpected},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a primary expression.
///
/// Grammar:
/// ```text
/// factor := NUMBER | BOOLEAN | '"' STRING '"'
///         | NAME index*
///         | CALL '(' expr_list ')'
///         | '(' expression ')'
///         | '[' expr_list ']' index*
/// ```
///
/// A parenthesized group may hold a full conditional expression, so
/// `(a == b)` and `(a + b) * 2` both parse here.
///
/// # Errors
/// - `UnexpectedToken` / `UnexpectedEndOfInput` if no expression starts here.
/// - `InvalidNumber` if a number literal cannot be converted.
pub fn parse_factor(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    let token = parser.advance()?;
    let pos = token.position();

    let expr = match token.kind {
        TokenKind::Number => {
            let value = token.text
                             .parse::<f64>()
                             .map_err(|_| ParseError::InvalidNumber { literal: token.text.clone(),
                                                                       pos })?;
            Expr::Number { id: parser.next_id(),
                           value,
                           pos }
        },
        TokenKind::Boolean => Expr::Boolean { id: parser.next_id(),
                                              value: token.text == "true",
                                              pos },
        TokenKind::Quote => {
            let contents = parser.expect(TokenKind::String)?;
            parser.expect(TokenKind::CloseQuote)?;
            Expr::String { id: parser.next_id(),
                           value: contents.text,
                           pos }
        },
        TokenKind::Name => {
            let name = Expr::Name { id: parser.next_id(),
                                    name: token.text,
                                    pos };
            return parse_index_suffixes(parser, name);
        },
        TokenKind::Call => {
            parser.expect(TokenKind::LParen)?;
            let arguments = parse_comma_separated(parser, parse_expression, TokenKind::RParen)?;
            Expr::FunctionCall { id: parser.next_id(),
                                 name: token.text,
                                 arguments,
                                 pos }
        },
        TokenKind::LParen => {
            let inner = parse_expression(parser)?;
            parser.expect(TokenKind::RParen)?;
            inner
        },
        TokenKind::LBracket => {
            let elements = parse_comma_separated(parser, parse_expression, TokenKind::RBracket)?;
            let array = Expr::Array { id: parser.next_id(),
                                      elements,
                                      pos };
            return parse_index_suffixes(parser, array);
        },
        _ => return Err(unexpected(token, "an expression")),
    };

    Ok(expr)
}

/// Applies any number of `[expr]` suffixes to `target`, left to right.
///
/// `m[1][0]` becomes `Index { array: Index { array: m, index: 1 }, index: 0 }`.
fn parse_index_suffixes(parser: &mut Parser<'_>, mut target: Expr) -> ParseResult<Expr> {
    while parser.peek_kind()? == TokenKind::LBracket {
        let pos = parser.advance()?.position();
        let index = parse_expression(parser)?;
        parser.expect(TokenKind::RBracket)?;
        target = Expr::Index { id: parser.next_id(),
                               array: Box::new(target),
                               index: Box::new(index),
                               pos };
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParseResult<Expr> {
        parse_factor(&mut Parser::new(source))
    }

    #[test]
    fn literals() {
        assert!(matches!(parse("2.5"), Ok(Expr::Number { value, .. }) if value == 2.5));
        assert!(matches!(parse("false"), Ok(Expr::Boolean { value: false, .. })));
        assert!(matches!(parse("\"a b\""), Ok(Expr::String { value, .. }) if value == "a b"));
    }

    #[test]
    fn array_literal_with_index_suffixes() {
        let Ok(Expr::Index { array, index, .. }) = parse("[[1, 2], [3]][0][1]") else {
            panic!("expected an index expression");
        };
        assert!(matches!(*index, Expr::Number { value, .. } if value == 1.0));
        assert!(matches!(*array, Expr::Index { .. }));
    }

    #[test]
    fn call_with_arguments() {
        let Ok(Expr::FunctionCall { name, arguments, .. }) = parse("concat(a, \"b\", 1 + 2)") else {
            panic!("expected a call");
        };
        assert_eq!(name, "concat");
        assert_eq!(arguments.len(), 3);
    }

    #[test]
    fn missing_operand() {
        assert!(matches!(parse(";"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(parse(""), Err(ParseError::UnexpectedEndOfInput { .. })));
    }
}
