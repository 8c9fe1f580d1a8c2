//! Interactive read loop over the lexer and parser.
//!
//! Every input line is handled on its own: in token mode it is lexed and each
//! token printed, in AST mode it is parsed and the program (or its
//! diagnostics) printed.

use std::io::{self, BufRead, Write};

use crate::{
    format_error,
    lexer::lexer::Lexer,
    parser::parser::{parse_with_config, ParserConfig},
};

pub const PROMPT: &str = ">> ";

pub const LOGO: &str = r"
_________  ________   ____  __. .____       _____    _______    ________
\_   ___ \ \_____  \ |    |/ _| |    |     /  _  \   \      \  /  _____/
/    \  \/  /   |   \|      <   |    |    /  /_\  \  /   |   \/   \  ___
\     \____/    |    \    |  \  |    |___/    |    \/    |    \    \_\  \
 \______  /\_______  /____|__ \ |_______ \____|__  /\____|__  /\______  /
        \/         \/        \/         \/       \/         \/        \/
";

/// Banner and greeting printed before the first prompt.
pub fn welcome(user: &str) -> String {
    format!(
        "{}\nhello {}! welcome to the COKLang REPL v{}\nFeel free to type commands\n",
        LOGO,
        user,
        env!("CARGO_PKG_VERSION")
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplMode {
    /// Print every token of the line.
    #[default]
    Tokens,
    /// Print the parsed program, or the errors found while parsing it.
    Ast,
}

/// Runs the loop until `input` is exhausted.
pub fn start<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    mode: ReplMode,
    config: ParserConfig,
) -> io::Result<()> {
    info!("starting REPL in {:?} mode", mode);
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        match mode {
            ReplMode::Tokens => print_tokens(&line, &mut output)?,
            ReplMode::Ast => print_program(&line, &mut output, config)?,
        }
    }
}

fn print_tokens<W: Write>(line: &str, output: &mut W) -> io::Result<()> {
    for token in Lexer::new(line.to_string(), None) {
        writeln!(output, "{}", token)?;
    }

    Ok(())
}

fn print_program<W: Write>(line: &str, output: &mut W, config: ParserConfig) -> io::Result<()> {
    let (parser, program) = parse_with_config(line.to_string(), None, config);

    if parser.has_errors() {
        for error in parser.errors() {
            write!(output, "{}", format_error(error, line))?;
        }
        return Ok(());
    }

    writeln!(output, "{}", program)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::{start, welcome, ReplMode, LOGO};
    use crate::parser::parser::{ParserConfig, StatementValues};

    fn run(input: &str, mode: ReplMode, config: ParserConfig) -> String {
        let mut output = Vec::new();
        start(Cursor::new(input.to_string()), &mut output, mode, config).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_token_mode_prints_each_token() {
        let output = run("let x = 5;\n", ReplMode::Tokens, ParserConfig::default());

        assert_eq!(
            output,
            concat!(
                ">> Token { kind: Let, literal: \"let\" }\n",
                "Token { kind: Identifier, literal: \"x\" }\n",
                "Token { kind: Assignment, literal: \"=\" }\n",
                "Token { kind: Integer, literal: \"5\" }\n",
                "Token { kind: Semicolon, literal: \";\" }\n",
                ">> "
            )
        );
    }

    #[test]
    fn test_token_mode_handles_each_line_separately() {
        let output = run("a\n\n#\n", ReplMode::Tokens, ParserConfig::default());

        assert_eq!(
            output,
            concat!(
                ">> Token { kind: Identifier, literal: \"a\" }\n",
                ">> ",
                ">> Token { kind: Illegal, literal: \"#\" }\n",
                ">> "
            )
        );
    }

    #[test]
    fn test_ast_mode_prints_program() {
        let output = run("-a * b + c\n", ReplMode::Ast, ParserConfig::default());

        assert_eq!(output, ">> (((-a) * b) + c)\n>> ");
    }

    #[test]
    fn test_ast_mode_respects_statement_values() {
        let config = ParserConfig {
            statement_values: StatementValues::Skip,
        };
        let output = run("let x = 1 + 2;\n", ReplMode::Ast, config);

        assert_eq!(output, ">> let x = ;\n>> ");
    }

    #[test]
    fn test_ast_mode_prints_diagnostics() {
        let output = run("let = 5;\n", ReplMode::Ast, ParserConfig::default());

        assert!(output.starts_with(
            ">> Error: ExpectedToken (expected next token to be Identifier, got Assignment instead)\n"
        ));
        assert!(output.contains("1 | let = 5;\n"));
        assert!(output.contains("  | ----^\n"));
        assert!(output.ends_with(">> "));
    }

    #[test]
    fn test_welcome_prints_logo_before_greeting() {
        let text = welcome("ada");

        assert!(text.starts_with(LOGO));
        assert!(LOGO.contains(r"\_   ___ \ \_____  \"));
        assert!(text.ends_with(&format!(
            "\nhello ada! welcome to the COKLang REPL v{}\nFeel free to type commands\n",
            env!("CARGO_PKG_VERSION")
        )));
    }

    #[test]
    fn test_empty_input_prints_single_prompt() {
        let output = run("", ReplMode::Tokens, ParserConfig::default());

        assert_eq!(output, ">> ");
    }
}
