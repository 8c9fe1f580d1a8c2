use std::{iter::FusedIterator, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN, SHELL_FILE};

use super::tokens::{Token, TokenKind};

/// Handles a rule match. `None` means the matched text produces no token.
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Every rule is anchored at the cursor. Two-character operators come before
// their one-character prefixes.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[ \\t\\r\\n]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_]+").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: integer_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
    ];
}

/// Pull-based tokenizer over a single source buffer.
///
/// Each call to [`Lexer::next_token`] consumes exactly one token's worth of
/// input. Once the input is exhausted every further call yields `EOF`.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
    exhausted: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = match file {
            Some(file) => Rc::new(file),
            None => Rc::new(String::from(SHELL_FILE)),
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
            exhausted: false,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    /// Span from `start` up to the current cursor.
    pub fn span_from(&self, start: usize) -> Span {
        Span {
            start: self.position(start),
            end: self.position(self.pos),
        }
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::new(), self.span_from(self.pos));
            }

            let mut matched = None;
            for pattern in PATTERNS.iter() {
                if let Some(found) = pattern.regex.find(self.remainder()) {
                    matched = Some((pattern.handler, found.as_str().to_string()));
                    break;
                }
            }

            let token = match matched {
                Some((handler, text)) => handler(self, &text),
                None => Some(self.illegal_token()),
            };

            if let Some(token) = token {
                trace!("lexed {}", token);
                return token;
            }
        }
    }

    fn illegal_token(&mut self) -> Token {
        let start = self.pos;
        let ch = match self.remainder().chars().next() {
            Some(ch) => ch,
            None => return MK_TOKEN!(TokenKind::EOF, String::new(), self.span_from(start)),
        };

        self.advance_n(ch.len_utf8());
        MK_TOKEN!(TokenKind::Illegal, ch.to_string(), self.span_from(start))
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token before `EOF`, then stops for good.
    fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            self.exhausted = true;
            return None;
        }

        Some(token)
    }
}

impl FusedIterator for Lexer {}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn integer_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let start = lexer.pos();
    lexer.advance_n(matched.len());

    Some(MK_TOKEN!(TokenKind::Integer, matched.to_string(), lexer.span_from(start)))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let start = lexer.pos();
    lexer.advance_n(matched.len());

    Some(MK_TOKEN!(TokenKind::lookup_ident(matched), matched.to_string(), lexer.span_from(start)))
}

/// Lexes a whole source, including the trailing `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let is_eof = token.kind == TokenKind::EOF;
        tokens.push(token);

        if is_eof {
            return tokens;
        }
    }
}
