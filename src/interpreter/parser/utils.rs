use crate::interpreter::{
    lexer::{Token, TokenKind},
    parser::core::{ParseResult, Parser, unexpected},
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call argument lists and
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `parser`: Parser positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list (e.g., `]` or `)`).
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the input ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, T>(
    parser: &mut Parser<'a>,
    parse_item: impl Fn(&mut Parser<'a>) -> ParseResult<T>,
    closing: TokenKind)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if parser.eat(closing)? {
        return Ok(items);
    }
    loop {
        items.push(parse_item(parser)?);
        let token = parser.advance()?;
        match token.kind {
            TokenKind::Comma => {},
            kind if kind == closing => break,
            _ => return Err(unexpected(token, &format!("',' or {closing}"))),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its token.
///
/// The next token must be [`TokenKind::Name`]. Keywords never lex as names,
/// so no reserved-word check is needed here.
///
/// # Errors
/// Returns a `ParseError` if the next token is not a name.
pub(in crate::interpreter::parser) fn parse_identifier(parser: &mut Parser<'_>)
                                                       -> ParseResult<Token> {
    parser.expect(TokenKind::Name)
}
