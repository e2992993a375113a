//! Lexical analysis module for the front end.
//!
//! This module contains the scanner that converts source text into a stream
//! of tokens for parsing. It handles:
//!
//! - Multi-base and scientific number literals
//! - Quoted strings with escape decoding, and `#` doc strings
//! - Keyword and logical-operator recognition
//! - Doubled and compound operators (`**`, `<<=`, `+=`, ...)
//! - Comments and whitespace
//! - Line/column tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
