//! Integration tests for the front end.
//!
//! These tests drive whole programs through tokenization, parsing and
//! diagnostic rendering using only the public API of the crate.

use std::{fs::read_to_string, io::Cursor, path::PathBuf};

use coklang::{
    ast::ast::{Expr, Node, Stmt},
    errors::errors::ErrorImpl,
    format_error,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::{parse, parse_with_config, ParserConfig, StatementValues},
    repl::{self, ReplMode},
};
use pretty_assertions::assert_eq;

fn program_source(name: &str) -> (String, String) {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("programs")
        .join(name);
    let source = read_to_string(&path).unwrap();

    (source, path.display().to_string())
}

#[test]
fn test_parse_sample_program() {
    let (source, file) = program_source("sample.cok");
    let (parser, program) = parse(source, Some(file));

    assert!(!parser.has_errors(), "{:?}", parser.error_messages());

    let rendered: Vec<String> = program.iter().map(|stmt| stmt.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "let five = 5;",
            "let ten = 10;",
            "let total = (five + (ten * 2));",
            "((!total) == (-five))",
            "return ((total / 3) - 1);",
        ]
    );
}

#[test]
fn test_sample_program_tokens_end_with_eof() {
    let (source, file) = program_source("sample.cok");
    let tokens = tokenize(source, Some(file.clone()));

    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::EOF);
    assert_eq!(last.literal, "");
    assert_eq!(*last.span.start.1, file);

    assert!(tokens.iter().all(|token| token.kind != TokenKind::Illegal));
    assert_eq!(
        tokens.iter().filter(|token| token.kind == TokenKind::Semicolon).count(),
        5
    );
}

#[test]
fn test_sample_program_statements_carry_file() {
    let (source, file) = program_source("sample.cok");
    let (_, program) = parse(source, Some(file.clone()));

    for stmt in &program {
        assert_eq!(*stmt.get_span().start.1, file);
    }
}

#[test]
fn test_broken_program_recovers_per_statement() {
    let (source, file) = program_source("broken.cok");
    let (parser, program) = parse(source, Some(file));

    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be Identifier, got Assignment instead",
            "expected next token to be Assignment, got Integer instead",
            "no prefix parse function for Star found",
        ]
    );

    let kinds: Vec<&ErrorImpl> = parser.errors().iter().map(|error| error.get_kind()).collect();
    assert_eq!(
        kinds[2],
        &ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Star
        }
    );

    let offsets: Vec<u32> = parser
        .errors()
        .iter()
        .map(|error| error.get_position().0)
        .collect();
    assert_eq!(offsets, vec![4, 15, 31]);

    assert_eq!(program.len(), 1);
    assert_eq!(program.to_string(), "let ok = y;");
}

#[test]
fn test_broken_program_diagnostics_point_at_lines() {
    let (source, file) = program_source("broken.cok");
    let (parser, _) = parse(source.clone(), Some(file.clone()));

    let rendered: Vec<String> = parser
        .errors()
        .iter()
        .map(|error| format_error(error, &source))
        .collect();

    assert!(rendered[0].contains(&format!("-> {}\n", file)));
    assert!(rendered[0].contains("1 | let = 5;\n"));
    assert!(rendered[1].contains("2 | let x 10;\n"));
    assert!(rendered[2].contains("3 | let y = 3 * * 4;\n"));
    assert!(rendered[2].starts_with(
        "Error: NoPrefixParseFn (no prefix parse function for Star found)\n"
    ));
}

#[test]
fn test_skip_values_keeps_statement_shape() {
    let (source, file) = program_source("sample.cok");
    let config = ParserConfig {
        statement_values: StatementValues::Skip,
    };
    let (parser, program) = parse_with_config(source, Some(file), config);

    assert!(!parser.has_errors());
    assert_eq!(program.len(), 5);

    match &program.statements[2] {
        Stmt::Let(stmt) => {
            assert_eq!(stmt.name.value, "total");
            assert!(stmt.value.is_none());
        }
        other => panic!("expected let statement, got {}", other),
    }

    match &program.statements[3] {
        Stmt::Expression(stmt) => assert!(matches!(stmt.expression, Expr::Infix(_))),
        other => panic!("expected expression statement, got {}", other),
    }

    assert!(matches!(&program.statements[4], Stmt::Return(stmt) if stmt.value.is_none()));
}

#[test]
fn test_reparsing_display_output_is_stable() {
    let (source, file) = program_source("sample.cok");
    let (_, program) = parse(source, Some(file));

    let printed = program.to_string();
    let (parser, reparsed) = parse(printed.clone(), None);

    assert!(!parser.has_errors(), "{:?}", parser.error_messages());
    assert_eq!(reparsed.to_string(), printed);
}

#[test]
fn test_repl_session() {
    let input = "let a = 1;\nlet = 2;\n-a + 3\n";
    let mut output = Vec::new();

    repl::start(
        Cursor::new(input.to_string()),
        &mut output,
        ReplMode::Ast,
        ParserConfig::default(),
    )
    .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with(">> let a = 1;\n>> Error: ExpectedToken"));
    assert!(output.ends_with(">> ((-a) + 3)\n>> "));
}
