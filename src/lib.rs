#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::statements::BlockStmt,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based line/column location in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }

    pub fn start() -> Self {
        Position { line: 1, col: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Scans and parses a whole source unit.
///
/// The file name is only used to label errors.
pub fn parse_source(source: &str, file: Option<String>) -> Result<BlockStmt, Error> {
    let tokens = tokenize(source, file.clone())?;
    parse(tokens, file)
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Renders an error for humans.
///
/// ```text
/// File "main.ail", line 3, col 9
///     x = 0x;
/// ScanError: invalid number: missing digits after base prefix
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let mut result = match error.get_column() {
        Some(col) => format!(
            "File \"{}\", line {}, col {}\n",
            error.get_file(),
            error.get_line(),
            col
        ),
        None => format!("File \"{}\", line {}\n", error.get_file(), error.get_line()),
    };

    if let Some(line_text) = get_line_at_position(source, error.get_line()) {
        result.push_str(&format!("    {}\n", line_text.trim_start()));
    }

    result.push_str(&format!("{}: {}", error.get_category(), error.kind()));
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        result.push_str(&format!(" ({})", tip));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\r\nsecond\n\nTesting { }\n";

        assert_eq!(get_line_at_position(source, 1), Some("Hello, world!"));
        assert_eq!(get_line_at_position(source, 2), Some("second"));
        assert_eq!(get_line_at_position(source, 3), Some(""));
        assert_eq!(get_line_at_position(source, 4), Some("Testing { }"));
        assert_eq!(get_line_at_position(source, 0), None);
        assert_eq!(get_line_at_position(source, 9), None);
    }

    #[test]
    fn test_parse_source_pipeline() {
        let block = parse_source("a = 1; b = a + 2;", None).unwrap();
        assert_eq!(block.body.len(), 2);
    }

    #[test]
    fn test_format_scan_error() {
        let source = "x = 1;\n  y = 7.2.6;\n";
        let error = parse_source(source, Some(String::from("main.ail"))).unwrap_err();
        let rendered = format_error(&error, source);

        assert!(rendered.starts_with("File \"main.ail\", line 2, col"));
        assert!(rendered.contains("\n    y = 7.2.6;\n"));
        assert!(rendered.contains("ScanError: invalid number"));
    }

    #[test]
    fn test_format_comment_error_has_no_column() {
        let source = "x = 1; /* never closed";
        let error = parse_source(source, Some(String::from("main.ail"))).unwrap_err();
        let rendered = format_error(&error, source);

        assert!(rendered.starts_with("File \"main.ail\", line 1\n"));
        assert!(rendered.contains("EOF while scanning comment block"));
    }

    #[test]
    fn test_format_syntax_error() {
        let source = "if a {\n  b;\n";
        let error = parse_source(source, None).unwrap_err();
        let rendered = format_error(&error, source);

        assert!(rendered.starts_with("File \"<stdin>\""));
        assert!(rendered.contains("SyntaxError:"));
        assert!(error.is_expecting_more());
    }
}
