//! Parser implementation for building the Abstract Syntax Tree.
//!
//! The parser pulls tokens from a [`Lexer`] through a two-token window
//! (`current` and `peek`) and uses a Pratt parser approach with NUD/LED
//! handlers for expressions.
//!
//! It maintains lookup tables, indexed by token kind, for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Malformed input never aborts a parse. Each failed statement leaves an
//! [`Error`] behind and parsing resumes with the next statement.

use std::mem;

use crate::{
    ast::ast::{Node, Program},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind, TOKEN_KIND_COUNT},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::{parse_stmt, skip_to_semicolon},
};

/// What the parser does with the right-hand side of `let` and `return`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementValues {
    /// Parse the value expression and keep it on the statement.
    #[default]
    Parse,
    /// Skip every token up to the terminating `;` and leave the value empty.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    pub statement_values: StatementValues,
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// Token under examination
    current: Token,
    /// Token after `current`
    peek: Token,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    config: ParserConfig,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser::with_config(lexer, ParserConfig::default())
    }

    /// Creates a parser and primes its `current`/`peek` window.
    pub fn with_config(mut lexer: Lexer, config: ParserConfig) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            config,
            stmt_lookup: [None; TOKEN_KIND_COUNT],
            nud_lookup: [None; TOKEN_KIND_COUNT],
            led_lookup: [None; TOKEN_KIND_COUNT],
            binding_power_lookup: [BindingPower::Lowest; TOKEN_KIND_COUNT],
        };
        create_token_lookups(&mut parser);

        parser
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts the window by one token and returns the previous current token.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let previous_peek = mem::replace(&mut self.peek, next);
        mem::replace(&mut self.current, previous_peek)
    }

    /// Advances only if the next token is `expected_kind`.
    ///
    /// # Returns
    ///
    /// The new current token, or an `ExpectedToken` error pointing at the
    /// unexpected token. The window does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: expected_kind,
                    got: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ));
        }

        self.advance();
        Ok(self.current.clone())
    }

    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup[self.current.kind.index()]
    }

    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_lookup[self.peek.kind.index()]
    }

    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup[kind.index()]
    }

    pub fn get_nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup[kind.index()]
    }

    pub fn get_led_handler(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup[kind.index()]
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup[kind.index()] = binding_power;
        self.led_lookup[kind.index()] = Some(led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers leave the binding power alone, so a token that is both
    /// prefix and infix (`-`) keeps its infix precedence.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup[kind.index()] = Some(nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup[kind.index()] = Some(stmt_fn);
    }

    /// Diagnostics accumulated so far, in source order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn record_error(&mut self, error: Error) {
        debug!("parse error at offset {}: {}", error.get_position().0, error);
        self.errors.push(error);
    }

    /// Parses statements until `EOF`.
    ///
    /// A statement that fails to parse is dropped and its error recorded.
    /// Parsing then resumes after the `;` that ends the broken statement.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while self.current_token_kind() != TokenKind::EOF {
            match parse_stmt(self) {
                Ok(stmt) => {
                    debug!("parsed statement `{}` at offset {}", stmt, stmt.get_span().start.0);
                    program.statements.push(stmt);
                }
                Err(error) => {
                    self.record_error(error);
                    skip_to_semicolon(self);
                }
            }

            self.advance();
        }

        program
    }
}

/// Parses a source buffer into a [`Program`].
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, whose `errors()` must be checked by the caller
/// - The parsed Program
pub fn parse(source: String, file: Option<String>) -> (Parser, Program) {
    parse_with_config(source, file, ParserConfig::default())
}

pub fn parse_with_config(
    source: String,
    file: Option<String>,
    config: ParserConfig,
) -> (Parser, Program) {
    let mut parser = Parser::with_config(Lexer::new(source, file), config);
    let program = parser.parse_program();

    (parser, program)
}
