use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A scan or syntax failure, located in a named source unit.
///
/// Errors are plain return values: the first failure aborts the whole unit
/// and travels back to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    file: String,
    expecting_more: bool,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, file: &str) -> Self {
        Error {
            internal_error: error_impl,
            position,
            file: String::from(file),
            expecting_more: false,
        }
    }

    /// Marks the error as one that more input could plausibly fix.
    pub fn expecting_more(mut self) -> Self {
        self.expecting_more = true;
        self
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.line
    }

    /// The column, when the failure has a meaningful one. Running off the end
    /// of a block comment only reports a line.
    pub fn get_column(&self) -> Option<u32> {
        match self.internal_error {
            ErrorImpl::UnterminatedComment => None,
            _ => Some(self.position.col),
        }
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    pub fn is_expecting_more(&self) -> bool {
        self.expecting_more
    }

    pub fn get_category(&self) -> ErrorCategory {
        self.internal_error.category()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::InvalidNumber { .. } => "InvalidNumber",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::Expected { .. } => "Expected",
            ErrorImpl::UnpackOrder => "UnpackOrder",
            ErrorImpl::InvalidParameters { .. } => "InvalidParameters",
            ErrorImpl::TooDeeplyNested { .. } => "TooDeeplyNested",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "close the literal with the quote character that opened it",
            )),
            ErrorImpl::UnrecognisedCharacter { ch: '!' } => {
                ErrorTip::Suggestion(String::from("use `not` for logical negation"))
            }
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::InvalidNumber { .. } => ErrorTip::None,
            ErrorImpl::InvalidEscape { .. } => ErrorTip::Suggestion(String::from(
                "write `\\\\` for a literal backslash",
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("block comments end with `*/`"))
            }
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::None,
            ErrorImpl::Expected { expected, .. } if expected == "';'" => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::Expected { .. } => ErrorTip::None,
            ErrorImpl::UnpackOrder => ErrorTip::Suggestion(String::from(
                "move `*` arguments before the first `**` argument",
            )),
            ErrorImpl::InvalidParameters { .. } => ErrorTip::None,
            ErrorImpl::TooDeeplyNested { .. } => ErrorTip::Suggestion(String::from(
                "split the expression or block into smaller pieces",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get_column() {
            Some(col) => write!(
                f,
                "{}:{}:{}: {}",
                self.file, self.position.line, col, self.internal_error
            ),
            None => write!(
                f,
                "{}:{}: {}",
                self.file, self.position.line, self.internal_error
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// The two families of failure: the scanner's and the parser's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Scan,
    Syntax,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Scan => write!(f, "ScanError"),
            ErrorCategory::Syntax => write!(f, "SyntaxError"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("EOF while scanning a string literal")]
    UnterminatedString,
    #[error("unknown character: {ch:?}")]
    UnrecognisedCharacter { ch: char },
    #[error("invalid number: {reason}")]
    InvalidNumber { reason: String },
    #[error("invalid escape: {reason}")]
    InvalidEscape { reason: String },
    #[error("EOF while scanning comment block")]
    UnterminatedComment,
    #[error("unexpected token: {token}")]
    UnexpectedToken { token: String },
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },
    #[error("iterable argument unpacking follows keyword argument unpacking")]
    UnpackOrder,
    #[error("invalid parameter list: {reason}")]
    InvalidParameters { reason: String },
    #[error("too many nested levels (limit is {limit})")]
    TooDeeplyNested { limit: usize },
}

impl ErrorImpl {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorImpl::UnterminatedString
            | ErrorImpl::UnrecognisedCharacter { .. }
            | ErrorImpl::InvalidNumber { .. }
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::UnterminatedComment => ErrorCategory::Scan,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::Expected { .. }
            | ErrorImpl::UnpackOrder
            | ErrorImpl::InvalidParameters { .. }
            | ErrorImpl::TooDeeplyNested { .. } => ErrorCategory::Syntax,
        }
    }
}
