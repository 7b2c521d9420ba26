use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser, unexpected},
            statement::parse_statement,
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until the
/// closing `}`. Any statement after a `return` in the same block is
/// rejected; nested blocks are checked when they are parsed.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Errors
/// - `UnreachableStatement` for a statement following `return`.
/// - `UnexpectedEndOfInput` if the closing brace is missing.
pub fn parse_block(parser: &mut Parser<'_>) -> ParseResult<Vec<Statement>> {
    parser.expect(TokenKind::LBrace)?;

    let mut statements = Vec::new();
    let mut returned = false;

    loop {
        match parser.peek_kind()? {
            TokenKind::RBrace => {
                parser.advance()?;
                break;
            },
            TokenKind::Eof => {
                let token = parser.advance()?;
                return Err(unexpected(token, &TokenKind::RBrace.to_string()));
            },
            _ if returned => {
                let pos = parser.peek_position()?;
                return Err(ParseError::UnreachableStatement { pos });
            },
            _ => {},
        }

        let statement = parse_statement(parser)?;
        returned = statement.is_return();
        statements.push(statement);
    }

    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_after_return_is_unreachable() {
        let result = parse_block(&mut Parser::new("{ return 1; printLn(2); }"));
        assert!(matches!(result, Err(ParseError::UnreachableStatement { .. })));
    }

    #[test]
    fn return_in_nested_block_does_not_end_outer_block() {
        let block = parse_block(&mut Parser::new("{ if (true) { return 1; } return 2; }")).unwrap();
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn missing_closing_brace() {
        let result = parse_block(&mut Parser::new("{ var x = 1;"));
        assert!(matches!(result, Err(ParseError::UnexpectedEndOfInput { .. })));
    }
}
