//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a plain Token instance
//! - `MK_OPERATOR_TOKEN!` - Creates an operator Token instance
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance with no operator or number payload.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$position` - Where the token starts
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Comma, String::from(","), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        Token {
            kind: $kind,
            op: None,
            value: $value,
            position: $position,
            num_base: 10,
            num_flags: NumFlags::NONE,
            num_exponent: None,
        }
    };
}

/// Creates an operator Token. The value is the operator's canonical spelling.
///
/// # Example
///
/// ```ignore
/// let token = MK_OPERATOR_TOKEN!(Operator::Power, position);
/// ```
#[macro_export]
macro_rules! MK_OPERATOR_TOKEN {
    ($op:expr, $position:expr) => {
        Token {
            kind: TokenKind::Operator,
            op: Some($op),
            value: String::from($op.spelling()),
            position: $position,
            num_base: 10,
            num_flags: NumFlags::NONE,
            num_exponent: None,
        }
    };
}
