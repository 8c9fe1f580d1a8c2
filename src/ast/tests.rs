//! Unit tests for AST re-serialization and node accessors.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    ast::{Expr, Node, Program, Stmt},
    expressions::{IdentifierExpr, InfixExpr, IntegerExpr, PrefixExpr},
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

fn span(start: u32, end: u32) -> Span {
    let file = Rc::new("test.cok".to_string());
    Span {
        start: Position(start, Rc::clone(&file)),
        end: Position(end, file),
    }
}

fn token(kind: TokenKind, literal: &str, start: u32) -> Token {
    Token {
        kind,
        literal: literal.to_string(),
        span: span(start, start + literal.len() as u32),
    }
}

fn ident(name: &str, start: u32) -> IdentifierExpr {
    IdentifierExpr::new(token(TokenKind::Identifier, name, start))
}

#[test]
fn test_let_statement_string() {
    let program = Program {
        statements: vec![Stmt::Let(LetStmt {
            token: token(TokenKind::Let, "let", 0),
            name: ident("myVar", 4),
            value: Some(Expr::Identifier(ident("anotherVar", 12))),
            span: span(0, 23),
        })],
    };

    assert_eq!(program.to_string(), "let myVar = anotherVar;");
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_statements_without_values() {
    let let_stmt = Stmt::Let(LetStmt {
        token: token(TokenKind::Let, "let", 0),
        name: ident("x", 4),
        value: None,
        span: span(0, 10),
    });
    let return_stmt = Stmt::Return(ReturnStmt {
        token: token(TokenKind::Return, "return", 11),
        value: None,
        span: span(11, 21),
    });

    assert_eq!(let_stmt.to_string(), "let x = ;");
    assert_eq!(return_stmt.to_string(), "return ;");
    assert_eq!(return_stmt.token_literal(), "return");
}

#[test]
fn test_nested_expression_string() {
    // -a * 5
    let prefix = Expr::Prefix(PrefixExpr {
        operator: token(TokenKind::Dash, "-", 0),
        right: Box::new(Expr::Identifier(ident("a", 1))),
        span: span(0, 2),
    });
    let infix = Expr::Infix(InfixExpr {
        left: Box::new(prefix),
        operator: token(TokenKind::Star, "*", 3),
        right: Box::new(Expr::Integer(IntegerExpr {
            token: token(TokenKind::Integer, "5", 5),
            value: 5,
        })),
        span: span(0, 6),
    });

    assert_eq!(infix.to_string(), "((-a) * 5)");
    assert_eq!(infix.token_literal(), "*");
    assert_eq!(infix.get_span(), &span(0, 6));

    let stmt = Stmt::Expression(ExpressionStmt {
        token: token(TokenKind::Dash, "-", 0),
        expression: infix,
        span: span(0, 6),
    });
    assert_eq!(stmt.to_string(), "((-a) * 5)");
    assert_eq!(stmt.token_literal(), "-");
}

#[test]
fn test_program_concatenates_statements() {
    let program = Program {
        statements: vec![
            Stmt::Expression(ExpressionStmt {
                token: token(TokenKind::Identifier, "a", 0),
                expression: Expr::Identifier(ident("a", 0)),
                span: span(0, 1),
            }),
            Stmt::Return(ReturnStmt {
                token: token(TokenKind::Return, "return", 3),
                value: Some(Expr::Identifier(ident("b", 10))),
                span: span(3, 12),
            }),
        ],
    };

    assert_eq!(program.to_string(), "areturn b;");
    assert_eq!(program.len(), 2);
    assert_eq!(program.iter().count(), 2);
}

#[test]
fn test_empty_program() {
    let program = Program::default();

    assert!(program.is_empty());
    assert_eq!(program.token_literal(), "");
    assert_eq!(program.to_string(), "");
}
