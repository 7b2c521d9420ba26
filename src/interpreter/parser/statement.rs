use crate::{
    ast::{Expr, FunctionDef, ParameterDeclaration, Statement, TypeName},
    interpreter::{
        lexer::TokenKind,
        parser::{
            block::parse_block,
            core::{ParseResult, Parser, parse_expression, unexpected},
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// The leading token selects the construct:
/// - `if`, `while`, `for`: control flow.
/// - `function`: a function declaration.
/// - `var`: an initialization.
/// - `return`: a return statement.
/// - a name followed (after any `[...]` groups) by `=`: an assignment.
/// - anything else: an expression statement terminated by `;`.
///
/// # Parameters
/// - `parser`: Parser positioned at the first token of the statement.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    match parser.peek_kind()? {
        TokenKind::If => parse_if(parser),
        TokenKind::While => parse_while(parser),
        TokenKind::For => parse_for(parser),
        TokenKind::Function => parse_function_declaration(parser),
        TokenKind::Var => parse_initialization(parser),
        TokenKind::Return => parse_return(parser),
        _ => parse_simple_statement(parser, true),
    }
}

/// Parses an assignment, an index assignment or an expression statement.
///
/// When `terminated` is `false` the trailing `;` is optional, which is what
/// the step clause of a `for` loop needs.
fn parse_simple_statement(parser: &mut Parser<'_>, terminated: bool) -> ParseResult<Statement> {
    let statement = match assignment_shape(parser)? {
        Some(false) => parse_assignment(parser)?,
        Some(true) => parse_index_assignment(parser)?,
        None => {
            let pos = parser.peek_position()?;
            let expr = parse_expression(parser)?;
            Statement::Expression { id: parser.next_id(),
                                    expr,
                                    pos }
        },
    };

    if terminated {
        parser.expect(TokenKind::Semicolon)?;
    } else {
        parser.eat(TokenKind::Semicolon)?;
    }

    Ok(statement)
}

/// Looks ahead to classify a statement that starts with a name.
///
/// # Returns
/// - `Some(false)` for `name = ...`.
/// - `Some(true)` for `name[...]... = ...`.
/// - `None` if the statement is not an assignment.
fn assignment_shape(parser: &Parser<'_>) -> ParseResult<Option<bool>> {
    let mut ahead = parser.clone();
    if ahead.advance()?.kind != TokenKind::Name {
        return Ok(None);
    }

    let mut indexed = false;
    while ahead.eat(TokenKind::LBracket)? {
        indexed = true;
        let mut depth = 1_usize;
        while depth > 0 {
            match ahead.advance()?.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => depth -= 1,
                TokenKind::Eof => return Ok(None),
                _ => {},
            }
        }
    }

    Ok((ahead.peek_kind()? == TokenKind::Equals).then_some(indexed))
}

/// Parses `name = expr`, without the trailing `;`.
fn parse_assignment(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let name = parse_identifier(parser)?;
    parser.expect(TokenKind::Equals)?;
    let value = parse_expression(parser)?;

    Ok(Statement::Assignment { id: parser.next_id(),
                               pos: name.position(),
                               name: name.text,
                               value })
}

/// Parses `name[expr][expr]... = expr`, without the trailing `;`.
fn parse_index_assignment(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let name = parse_identifier(parser)?;

    let mut indexes = Vec::new();
    while parser.eat(TokenKind::LBracket)? {
        indexes.push(parse_expression(parser)?);
        parser.expect(TokenKind::RBracket)?;
    }

    parser.expect(TokenKind::Equals)?;
    let value = parse_expression(parser)?;

    Ok(Statement::IndexAssignment { id: parser.next_id(),
                                    pos: name.position(),
                                    name: name.text,
                                    indexes,
                                    value })
}

/// Parses `var name = expr;`.
fn parse_initialization(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let pos = parser.expect(TokenKind::Var)?.position();
    let name = parse_identifier(parser)?;
    parser.expect(TokenKind::Equals)?;
    let value = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Initialization { id: parser.next_id(),
                                   name: name.text,
                                   value,
                                   pos })
}

/// Parses `return expr;` or `return;`.
fn parse_return(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let pos = parser.expect(TokenKind::Return)?.position();

    let value = if parser.eat(TokenKind::Semicolon)? {
        None
    } else {
        let value = parse_expression(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        Some(value)
    };

    Ok(Statement::Return { id: parser.next_id(),
                           value,
                           pos })
}

/// Parses an `if` statement with an optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if (<condition>) { ... }
///     else if (<condition>) { ... }
///     else { ... }
/// ```
/// An `else if` becomes an else-branch holding a single nested `If`.
fn parse_if(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let pos = parser.expect(TokenKind::If)?.position();
    let condition = parse_condition(parser)?;
    let then_branch = parse_block(parser)?;

    let else_branch = if parser.eat(TokenKind::Else)? {
        if parser.peek_kind()? == TokenKind::If {
            Some(vec![parse_if(parser)?])
        } else {
            Some(parse_block(parser)?)
        }
    } else {
        None
    };

    Ok(Statement::If { id: parser.next_id(),
                       condition,
                       then_branch,
                       else_branch,
                       pos })
}

/// Parses `while (<condition>) { ... }`.
fn parse_while(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let pos = parser.expect(TokenKind::While)?.position();
    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Statement::While { id: parser.next_id(),
                          condition,
                          body,
                          pos })
}

/// Parses `for (var i = <expr>; <condition>; <step>) { ... }`.
///
/// The initializer must be a `var` initialization. The step is an
/// assignment, index assignment or expression; its `;` is optional.
fn parse_for(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let pos = parser.expect(TokenKind::For)?.position();
    parser.expect(TokenKind::LParen)?;

    let init = parse_initialization(parser)?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    let step = parse_simple_statement(parser, false)?;

    parser.expect(TokenKind::RParen)?;
    let body = parse_block(parser)?;

    Ok(Statement::For { id: parser.next_id(),
                        init: Box::new(init),
                        condition,
                        step: Box::new(step),
                        body,
                        pos })
}

/// Parses a parenthesized condition.
fn parse_condition(parser: &mut Parser<'_>) -> ParseResult<Expr> {
    parser.expect(TokenKind::LParen)?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::RParen)?;

    Ok(condition)
}

/// Parses a function declaration.
///
/// Syntax: `function name(type a, type b) { ... }`, where each type is one of
/// `string`, `number` or `bool`.
fn parse_function_declaration(parser: &mut Parser<'_>) -> ParseResult<Statement> {
    let pos = parser.expect(TokenKind::Function)?.position();

    let name = parser.advance()?;
    if !matches!(name.kind, TokenKind::Name | TokenKind::Call) {
        return Err(unexpected(name, "a function name"));
    }

    parser.expect(TokenKind::LParen)?;
    let params = parse_comma_separated(parser, parse_parameter, TokenKind::RParen)?;
    let body = parse_block(parser)?;

    Ok(Statement::FunctionDeclaration(FunctionDef { id: parser.next_id(),
                                                    name: name.text,
                                                    params,
                                                    body,
                                                    pos }))
}

/// Parses one typed parameter, e.g. `number a`.
fn parse_parameter(parser: &mut Parser<'_>) -> ParseResult<ParameterDeclaration> {
    let token = parser.advance()?;
    let param_type = match token.kind {
        TokenKind::StringType => TypeName::String,
        TokenKind::NumberType => TypeName::Number,
        TokenKind::BoolType => TypeName::Bool,
        _ => return Err(unexpected(token, "a parameter type")),
    };
    let name = parse_identifier(parser)?;

    Ok(ParameterDeclaration { id: parser.next_id(),
                              param_type,
                              name: name.text,
                              pos: token.position() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn parse(source: &str) -> ParseResult<Statement> {
        parse_statement(&mut Parser::new(source))
    }

    #[test]
    fn assignment_and_index_assignment() {
        assert!(matches!(parse("x = 1;"), Ok(Statement::Assignment { .. })));
        let Ok(Statement::IndexAssignment { name, indexes, .. }) = parse("m[i + 1][0] = 5;") else {
            panic!("expected an index assignment");
        };
        assert_eq!(name, "m");
        assert_eq!(indexes.len(), 2);
    }

    #[test]
    fn indexed_read_is_an_expression() {
        let Ok(Statement::Expression { expr, .. }) = parse("m[0] == 1;") else {
            panic!("expected an expression statement");
        };
        assert!(matches!(expr, Expr::Conditional { .. }));
    }

    #[test]
    fn else_if_chain() {
        let Ok(Statement::If { else_branch: Some(branch), .. }) =
            parse("if (a) { } else if (b) { } else { x = 1; }")
        else {
            panic!("expected an if statement");
        };
        assert!(matches!(branch.as_slice(),
                         [Statement::If { else_branch: Some(_),
                                          .. }]));
    }

    #[test]
    fn for_loop_parts() {
        let Ok(Statement::For { init, step, .. }) =
            parse("for (var i = 0; i < 3; i = i + 1) { printLn(i); }")
        else {
            panic!("expected a for loop");
        };
        assert!(matches!(*init, Statement::Initialization { .. }));
        assert!(matches!(*step, Statement::Assignment { .. }));
    }

    #[test]
    fn function_declaration_with_typed_parameters() {
        let Ok(Statement::FunctionDeclaration(def)) =
            parse("function add(number a, number b) { return a + b; }")
        else {
            panic!("expected a function declaration");
        };
        assert_eq!(def.name, "add");
        let types: Vec<TypeName> = def.params.iter().map(|p| p.param_type).collect();
        assert_eq!(types, [TypeName::Number, TypeName::Number]);
    }

    #[test]
    fn bare_return() {
        assert!(matches!(parse("return;"), Ok(Statement::Return { value: None, .. })));
    }

    #[test]
    fn missing_semicolon() {
        assert!(matches!(parse("x = 1"), Err(ParseError::UnexpectedEndOfInput { .. })));
    }

    #[test]
    fn untyped_parameter_is_rejected() {
        assert!(matches!(parse("function f(a) { }"),
                         Err(ParseError::UnexpectedToken { .. })));
    }
}
