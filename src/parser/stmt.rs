use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::IdentifierExpr,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::{Parser, StatementValues};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_handler(parser.current_token_kind()) {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    // Semicolons terminate statements but may be left out.
    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span::between(&start_token.span, &parser.current_token().span),
        token: start_token,
        expression,
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();

    let name = IdentifierExpr::new(parser.expect_peek(TokenKind::Identifier)?);
    parser.expect_peek(TokenKind::Assignment)?;

    let value = match parser.config().statement_values {
        StatementValues::Parse => {
            parser.advance();
            Some(parse_value(parser)?)
        }
        StatementValues::Skip => {
            skip_to_semicolon(parser);
            None
        }
    };

    Ok(Stmt::Let(LetStmt {
        span: Span::between(&start_token.span, &parser.current_token().span),
        token: start_token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance();

    let value = match parser.config().statement_values {
        StatementValues::Parse if parser.current_token_kind() == TokenKind::Semicolon => None,
        StatementValues::Parse => Some(parse_value(parser)?),
        StatementValues::Skip => {
            skip_to_semicolon(parser);
            None
        }
    };

    Ok(Stmt::Return(ReturnStmt {
        span: Span::between(&start_token.span, &parser.current_token().span),
        token: start_token,
        value,
    }))
}

/// Right-hand side of `let`/`return`, with its optional `;`.
fn parse_value(parser: &mut Parser) -> Result<Expr, Error> {
    let value = parse_expr(parser, BindingPower::Lowest)?;

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(value)
}

/// Discards tokens until `current` is the terminating `;`, or `EOF` when the
/// statement is never terminated.
pub fn skip_to_semicolon(parser: &mut Parser) {
    while !parser
        .current_token()
        .is_one_of_many(&[TokenKind::Semicolon, TokenKind::EOF])
    {
        parser.advance();
    }
}
