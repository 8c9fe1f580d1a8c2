#![allow(clippy::module_inception)]

#[macro_use]
extern crate log;

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod repl;

extern crate regex;

/// Name used for sources that do not come from a file.
pub const SHELL_FILE: &str = "shell";

/// Byte offset into a source plus the name of that source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span running from the start of `start` to the end of `end`.
    pub fn between(start: &Span, end: &Span) -> Self {
        Span {
            start: start.start.clone(),
            end: end.end.clone(),
        }
    }
}

/// Maps a byte offset to `(line number, line text, column)`.
///
/// Offsets equal to the source length resolve to the end of the last line, which is
/// where EOF diagnostics point. Offsets past the end return `None`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 0;

    for line in source.split_inclusive('\n') {
        line_number += 1;
        let end = start + line.len();

        if pos < end || (pos == end && !line.ends_with('\n')) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
    }

    Some((line_number + 1, String::new(), 0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::get_line_at_position;

    const SOURCE: &str = "Hello, world!\nlet x = 5;\n\n    Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(SOURCE, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "    Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_source() {
        let (line_number, line, line_pos) = get_line_at_position("a + b", 5).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "a + b");
        assert_eq!(line_pos, 5);

        let (line_number, line, _) = get_line_at_position("a;\n", 3).unwrap();
        assert_eq!(line_number, 2);
        assert_eq!(line, "");

        assert!(get_line_at_position("a", 2).is_none());
    }
}

/// Renders a diagnostic against the source it was produced from.
///
/// ```text
/// Error: NoPrefixParseFn (no prefix parse function for Star found)
/// -> shell
///   |
/// 1 | let a = * 5;
///   | --------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut output = String::new();

    output.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error));
    output.push_str(&format!("-> {}\n", position.1));

    if let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) {
        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        output.push_str(&format!("{:>padding$}\n", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

        // The caret column counts characters, not bytes.
        let column = line_text
            .get(..line_pos)
            .map_or(line_pos, |before| before.chars().count());
        let arrows = column.saturating_sub(removed_whitespace) + 1;
        output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        output.push_str(&format!("tip: {}\n", tip));
    }

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
