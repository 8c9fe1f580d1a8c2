#[macro_use]
extern crate log;

use std::{
    env,
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use coklang::{
    format_error,
    parser::parser::{parse_with_config, ParserConfig, StatementValues},
    repl::{self, ReplMode},
};

/// Lexer and parser front end for COKLang.
///
/// Without a file, starts an interactive prompt that prints the tokens of every line.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Source file to parse
    file: Option<PathBuf>,

    /// In the prompt, print the parsed program instead of tokens
    #[clap(long)]
    ast: bool,

    /// Discard the right-hand side of `let` and `return` instead of parsing it
    #[clap(long)]
    skip_values: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u8,
}

impl Args {
    fn parser_config(&self) -> ParserConfig {
        let statement_values = if self.skip_values {
            StatementValues::Skip
        } else {
            StatementValues::Parse
        };

        ParserConfig { statement_values }
    }

    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_builder()
        .filter_level(args.log_level())
        .init();
    debug!("{args:#?}");

    match &args.file {
        Some(file) => parse_file(file, args.parser_config()),
        None => run_repl(&args),
    }
}

fn parse_file(file: &Path, config: ParserConfig) -> Result<()> {
    if !file.is_file() {
        anyhow::bail!("Input file must be a file!");
    }

    let source = read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file.display().to_string();

    let start = Instant::now();
    let (parser, program) = parse_with_config(source.clone(), Some(file_name), config);
    info!("Parsed {} statement(s) in {:?}", program.len(), start.elapsed());

    if parser.has_errors() {
        for error in parser.errors() {
            eprint!("{}", format_error(error, &source));
        }
        anyhow::bail!("{} error(s) found while parsing", parser.errors().len());
    }

    println!("{}", program);
    Ok(())
}

fn run_repl(args: &Args) -> Result<()> {
    let user = env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .context("could not resolve the current user")?;

    print!("{}", repl::welcome(&user));

    let mode = if args.ast { ReplMode::Ast } else { ReplMode::Tokens };
    let stdin = io::stdin();
    repl::start(stdin.lock(), io::stdout(), mode, args.parser_config())?;

    Ok(())
}
