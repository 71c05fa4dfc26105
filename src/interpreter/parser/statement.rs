use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Keyword, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect_keyword, expect_token, parse_identifier, parse_metadata},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - an assignment (`make`/`set`/`let`),
/// - an output statement (`talk`/`show`/`wetin be`),
/// - an `@anchor` declaration,
/// - a `relational` declaration,
/// - an anchor query (`list anchors`, `describe anchor`),
/// - a `when` clause with its `@action` body.
///
/// The dispatch runs entirely on canonical keywords; by the time tokens
/// arrive here, the lexer has already collapsed every synonymous phrasing.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// `UnexpectedToken` when the statement does not start with a statement
/// keyword, plus any error from the sub-parsers.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.peek() {
        Some((token, line)) => (token, *line),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    match token {
        Token::Keyword(Keyword::Make) => parse_make(tokens, line),
        Token::Keyword(Keyword::Set) => parse_set(tokens, line),
        Token::Keyword(Keyword::Let) => parse_let(tokens, line),
        Token::Keyword(Keyword::Talk | Keyword::Show | Keyword::WetinBe) => {
            parse_output(tokens, line)
        },
        Token::Keyword(Keyword::AnchorDecl) => parse_anchor_decl(tokens, line),
        Token::Keyword(Keyword::Relational) => parse_relational_decl(tokens, line),
        Token::Keyword(Keyword::ListAnchors) => {
            tokens.next();
            Ok(Statement::ListAnchors { line })
        },
        Token::Keyword(Keyword::DescribeAnchor) => {
            tokens.next();
            let name = parse_identifier(tokens, line)?;
            Ok(Statement::DescribeAnchor { name, line })
        },
        Token::Keyword(Keyword::When) => parse_when(tokens, line),

        tok => Err(ParseError::UnexpectedToken { token: format!("Expected a statement, found {tok:?}"),
                                                 line }),
    }
}

/// Parses `make <ident> be <expr>`.
fn parse_make<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let name = parse_identifier(tokens, line)?;
    expect_keyword(tokens, Keyword::Be, "'be' after the variable name", line)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assign { name, value, line })
}

/// Parses `set <ident> to <expr>`.
fn parse_set<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let name = parse_identifier(tokens, line)?;
    expect_keyword(tokens, Keyword::To, "'to' after the variable name", line)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assign { name, value, line })
}

/// Parses `let <ident> be <expr>` and `let <ident> be equal to <expr>`.
///
/// The two connectors arrive as distinct keyword tokens (`be equal to` is
/// folded by the lexer), so accepting either is a one-token choice here.
fn parse_let<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let name = parse_identifier(tokens, line)?;

    match tokens.next() {
        Some((Token::Keyword(Keyword::Be | Keyword::BeEqualTo), _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'be' or 'be equal to', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let value = parse_expression(tokens)?;
    Ok(Statement::Assign { name, value, line })
}

/// Parses an output statement: `talk <expr>`, `show <expr>`, or
/// `wetin be <expr>`. All three lower to the same `Print` node.
fn parse_output<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let expr = parse_expression(tokens)?;

    Ok(Statement::Print { expr, line })
}

/// Parses `@anchor <ident> = <expr> <meta>*`.
///
/// Metadata entries may follow on the same line or on subsequent indented
/// lines.
fn parse_anchor_decl<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let name = parse_identifier(tokens, line)?;
    expect_token(tokens, &Token::Equals, "'=' after the anchor name", line)?;
    let value = parse_expression(tokens)?;
    let metadata = parse_metadata(tokens)?;

    Ok(Statement::AnchorDecl { name,
                               value,
                               metadata,
                               line })
}

/// Parses a relational declaration:
///
/// ```text
/// relational <ident> = <expr> relative to [ <ident> (, <ident>)* ] <meta>*
/// ```
///
/// The anchor list is required and non-empty; a relational value without
/// anchors has no position to render.
fn parse_relational_decl<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let name = parse_identifier(tokens, line)?;
    expect_token(tokens, &Token::Equals, "'=' after the variable name", line)?;
    let value = parse_expression(tokens)?;
    expect_keyword(tokens, Keyword::RelativeTo, "'relative to' after the value", line)?;
    expect_token(tokens, &Token::LBracket, "'[' to start the anchor list", line)?;

    let mut anchors = vec![parse_identifier(tokens, line)?];
    loop {
        match tokens.next() {
            Some((Token::Comma, _)) => anchors.push(parse_identifier(tokens, line)?),
            Some((Token::RBracket, _)) => break,
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or ']' in the anchor list, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    let metadata = parse_metadata(tokens)?;

    Ok(Statement::RelationalDecl { name,
                                   value,
                                   anchors,
                                   metadata,
                                   line })
}

/// Parses a `when` clause:
///
/// ```text
/// when <expr> is <string> <ident> :
///     @action <statement>
/// ```
///
/// Body statements may sit inline after the colon or on subsequent indented
/// lines; each one is introduced by `@action`. The body ends at the first
/// line that does not continue it. End of input is a valid terminator and
/// leaves whatever was parsed as the body.
fn parse_when<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let subject = parse_expression(tokens)?;
    expect_keyword(tokens, Keyword::Is, "'is' after the subject", line)?;

    let qualifier = match tokens.next() {
        Some((Token::Str(text), _)) => text.clone(),
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected a quoted qualifier, found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    let reference = parse_identifier(tokens, line)?;
    expect_token(tokens, &Token::Colon, "':' after the condition", line)?;

    let mut body = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Keyword(Keyword::Action), _)) => {
                tokens.next();
                body.push(parse_statement(tokens)?);
            },

            Some((Token::Line { indented: true }, _)) => {
                let mut lookahead = tokens.clone();
                lookahead.next();

                if matches!(lookahead.peek(), Some((Token::Keyword(Keyword::Action), _))) {
                    tokens.next(); // consume the line break
                } else {
                    break;
                }
            },

            _ => break,
        }
    }

    Ok(Statement::When { subject,
                         qualifier,
                         reference,
                         body,
                         line })
}
