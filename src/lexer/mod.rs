//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Pull-based tokenization driven by anchored regex rules
//! - Recognition of keywords, identifiers, integers and operators
//! - Token position tracking for error reporting
//! - Illegal characters, which become tokens rather than errors

pub mod lexer;
pub mod tokens;
