use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_OPERATOR_TOKEN, MK_TOKEN,
};

use super::tokens::{NumFlags, Operator, Token, TokenKind, LOGICAL_LOOKUP, RESERVED_LOOKUP};

/// Label used when the caller gives no file name.
pub const DEFAULT_FILE: &str = "<stdin>";

lazy_static! {
    /// Letters, Han ideographs and `_`, anchored at the cursor.
    static ref IDENTIFIER_PATTERN: Regex = Regex::new(r"^[\p{L}\p{Han}_]+").unwrap();
}

/// Character-level scanner over one source buffer.
///
/// Each instance owns its cursor and file label; nothing is shared between
/// scanners, so independent instances may run on separate threads.
#[derive(Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: u32,
    col: u32,
    file: String,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            col: 1,
            file: file.unwrap_or_else(|| String::from(DEFAULT_FILE)),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().nth(1)
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// Consumes the current character and returns it.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.at()?;
        self.pos += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }

        Some(ch)
    }

    fn error(&self, error_impl: ErrorImpl, position: Position) -> Error {
        Error::new(error_impl, position, &self.file)
    }

    /// Scans exactly one token. Past the end of input every call yields EOF.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            let ch = match self.at() {
                Some(ch) => ch,
                None => {
                    return Ok(MK_TOKEN!(
                        TokenKind::EOF,
                        String::from("EOF"),
                        self.get_position()
                    ))
                }
            };

            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            let start = self.get_position();

            if ch.is_ascii_digit() {
                return self.scan_number(start);
            }

            if let Some(len) = IDENTIFIER_PATTERN.find(self.remainder()).map(|m| m.end()) {
                return Ok(self.scan_identifier(start, len));
            }

            let kind = match ch {
                '/' if self.peek() == Some('/') => {
                    self.skip_line_comment();
                    continue;
                }
                '/' if self.peek() == Some('*') => {
                    self.advance();
                    self.advance();
                    self.skip_block_comment()?;
                    continue;
                }
                '\'' | '"' => return self.scan_string(start),
                '#' => return Ok(self.scan_doc_string(start)),
                '(' => TokenKind::OpenParen,
                '[' => TokenKind::OpenBracket,
                '{' => TokenKind::OpenCurly,
                ')' => TokenKind::CloseParen,
                ']' => TokenKind::CloseBracket,
                '}' => TokenKind::CloseCurly,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '.' => TokenKind::Dot,
                ':' => TokenKind::Colon,
                '@' => TokenKind::At,
                _ => return self.scan_operator(ch, start),
            };

            self.advance();
            return Ok(MK_TOKEN!(kind, ch.to_string(), start));
        }
    }

    fn scan_operator(&mut self, ch: char, start: Position) -> Result<Token, Error> {
        self.advance();

        let op = match ch {
            '/' => self.check_assign(Operator::Divi),
            '*' => {
                if self.at() == Some('*') {
                    self.advance();
                    self.check_assign(Operator::Power)
                } else {
                    self.check_assign(Operator::Mult)
                }
            }
            '%' => self.check_assign(Operator::Mod),
            '^' => self.check_assign(Operator::Xor),
            '&' => self.check_assign(Operator::Band),
            '|' => self.check_assign(Operator::Bor),
            '+' => self.check_assign(Operator::Plus),
            '-' => self.check_assign(Operator::Sub),
            '~' => self.check_assign(Operator::Bng),
            '<' => match self.at() {
                Some('<') => {
                    self.advance();
                    self.check_assign(Operator::Lshift)
                }
                Some('=') => {
                    self.advance();
                    Operator::Leq
                }
                _ => Operator::Lth,
            },
            '>' => match self.at() {
                Some('>') => {
                    self.advance();
                    self.check_assign(Operator::Rshift)
                }
                Some('=') => {
                    self.advance();
                    Operator::Geq
                }
                _ => Operator::Gth,
            },
            '!' => {
                if self.at() == Some('=') {
                    self.advance();
                    Operator::Ueq
                } else {
                    return Err(self.error(ErrorImpl::UnrecognisedCharacter { ch }, start));
                }
            }
            '=' => {
                if self.at() == Some('=') {
                    self.advance();
                    Operator::Eq
                } else {
                    Operator::Assign
                }
            }
            _ => return Err(self.error(ErrorImpl::UnrecognisedCharacter { ch }, start)),
        };

        Ok(MK_OPERATOR_TOKEN!(op, start))
    }

    /// Promotes `op` to its compound-assignment form when `=` follows.
    fn check_assign(&mut self, op: Operator) -> Operator {
        match op.compound() {
            Some(compound) if self.at() == Some('=') => {
                self.advance();
                compound
            }
            _ => op,
        }
    }

    fn scan_identifier(&mut self, start: Position, len: usize) -> Token {
        let word = &self.remainder()[..len];
        for _ in word.chars() {
            self.advance();
        }

        if let Some(&op) = LOGICAL_LOOKUP.get(word) {
            return MK_OPERATOR_TOKEN!(op, start);
        }

        let kind = RESERVED_LOOKUP
            .get(word)
            .copied()
            .unwrap_or(TokenKind::Identifier);

        MK_TOKEN!(kind, String::from(word), start)
    }

    fn invalid_number(&self, reason: &str) -> Error {
        self.error(
            ErrorImpl::InvalidNumber {
                reason: String::from(reason),
            },
            self.get_position(),
        )
    }

    fn scan_number(&mut self, start: Position) -> Result<Token, Error> {
        let mut mantissa = String::new();
        let mut exponent: Option<String> = None;
        let mut is_float = false;

        if self.at() == Some('0') {
            self.advance();

            match self.at() {
                Some('x') => return self.scan_prefixed_number(16, start),
                Some('o') => return self.scan_prefixed_number(8, start),
                Some('b') => return self.scan_prefixed_number(2, start),
                Some('.') => {
                    self.advance();
                    mantissa.push_str("0.");
                    is_float = true;
                }
                Some('e') | Some('E') => {
                    self.advance();
                    mantissa.push('0');
                    exponent = Some(String::new());
                }
                _ => mantissa.push('0'),
            }
        }

        loop {
            match self.at() {
                Some(ch) if ch.is_ascii_digit() => {
                    exponent.as_mut().unwrap_or(&mut mantissa).push(ch);
                    self.advance();
                }
                Some('.') => {
                    if exponent.is_some() {
                        return Err(self.invalid_number("'.' inside an exponent"));
                    }
                    if is_float {
                        return Err(self.invalid_number("second '.'"));
                    }
                    is_float = true;
                    mantissa.push('.');
                    self.advance();
                }
                Some('e') | Some('E') => {
                    if exponent.is_some() {
                        return Err(self.invalid_number("second exponent marker"));
                    }
                    exponent = Some(String::new());
                    self.advance();
                }
                Some('-') if exponent.as_deref() == Some("") => {
                    if let Some(exponent) = exponent.as_mut() {
                        exponent.push('-');
                    }
                    self.advance();
                }
                _ => break,
            }
        }

        if let Some(exponent) = &exponent {
            if exponent.is_empty() || exponent == "-" {
                return Err(self.invalid_number("missing exponent digits"));
            }
        }

        let mut num_flags = if is_float {
            NumFlags::FLOAT
        } else {
            NumFlags::INTEGER
        };
        if exponent.is_some() {
            num_flags = num_flags | NumFlags::SCIENTIFIC;
        }

        let mut token = MK_TOKEN!(TokenKind::Number, mantissa, start);
        token.num_flags = num_flags;
        token.num_exponent = exponent;
        Ok(token)
    }

    /// Scans the digits after `0x`, `0o` or `0b`. The cursor is on the prefix letter.
    fn scan_prefixed_number(&mut self, base: u32, start: Position) -> Result<Token, Error> {
        self.advance();

        let mut digits = String::new();
        while let Some(ch) = self.at().filter(|ch| ch.is_digit(base)) {
            digits.push(ch);
            self.advance();
        }

        if digits.is_empty() {
            return Err(self.invalid_number("missing digits after base prefix"));
        }

        match self.at() {
            Some('.') => return Err(self.invalid_number("only base-10 numbers may have a '.'")),
            Some(ch) if ch.is_ascii_digit() => {
                return Err(self.invalid_number("digit out of range for the base"))
            }
            _ => {}
        }

        let mut token = MK_TOKEN!(TokenKind::Number, digits, start);
        token.num_base = base;
        token.num_flags = NumFlags::INTEGER;
        Ok(token)
    }

    fn scan_string(&mut self, start: Position) -> Result<Token, Error> {
        let delimiter = self.advance();
        let mut value = String::new();

        loop {
            match self.at() {
                None => {
                    return Err(self
                        .error(ErrorImpl::UnterminatedString, start)
                        .expecting_more())
                }
                Some(ch) if Some(ch) == delimiter => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let ch = self.scan_escape(start)?;
                    value.push(ch);
                }
                Some(ch) => {
                    self.advance();
                    value.push(ch);
                }
            }
        }

        Ok(MK_TOKEN!(TokenKind::String, value, start))
    }

    /// Decodes one escape sequence; the cursor is just past the backslash.
    fn scan_escape(&mut self, literal_start: Position) -> Result<char, Error> {
        let ch = match self.at() {
            Some(ch) => ch,
            None => {
                return Err(self
                    .error(ErrorImpl::UnterminatedString, literal_start)
                    .expecting_more())
            }
        };

        let decoded = match ch {
            '\'' => '\'',
            '"' => '"',
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '\\' => '\\',
            '0'..='7' => return self.scan_octal_escape(),
            'x' => return self.scan_hex_escape(2, 'x'),
            'u' => return self.scan_hex_escape(4, 'u'),
            'U' => return self.scan_hex_escape(8, 'U'),
            other => {
                return Err(self.error(
                    ErrorImpl::InvalidEscape {
                        reason: format!("unknown escape sequence \\{}", other),
                    },
                    self.get_position(),
                ))
            }
        };

        self.advance();
        Ok(decoded)
    }

    /// `\N`, `\NN` or `\NNN` in octal.
    fn scan_octal_escape(&mut self) -> Result<char, Error> {
        let position = self.get_position();
        let mut digits = String::new();

        while digits.len() < 3 {
            match self.at() {
                Some(ch @ '0'..='7') => {
                    digits.push(ch);
                    self.advance();
                }
                _ => break,
            }
        }

        u32::from_str_radix(&digits, 8)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                self.error(
                    ErrorImpl::InvalidEscape {
                        reason: format!("cannot decode \\{}", digits),
                    },
                    position,
                )
            })
    }

    /// `\xHH`, `\uHHHH` or `\UHHHHHHHH`; the cursor is on the escape letter.
    fn scan_hex_escape(&mut self, count: usize, letter: char) -> Result<char, Error> {
        let position = self.get_position();
        self.advance();

        let mut digits = String::new();
        while digits.len() < count {
            match self.at() {
                Some(ch) if ch.is_ascii_hexdigit() => {
                    digits.push(ch);
                    self.advance();
                }
                _ => {
                    return Err(self.error(
                        ErrorImpl::InvalidEscape {
                            reason: format!("\\{} needs exactly {} hex digits", letter, count),
                        },
                        position,
                    ))
                }
            }
        }

        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                self.error(
                    ErrorImpl::InvalidEscape {
                        reason: format!("\\{}{} is not a valid code point", letter, digits),
                    },
                    position,
                )
            })
    }

    /// `#` lines. Each directly following line that starts with `#` continues
    /// the same string.
    fn scan_doc_string(&mut self, start: Position) -> Token {
        self.advance();
        let mut value = String::new();

        while let Some(ch) = self.at() {
            if ch == '\n' {
                if value.ends_with('\r') {
                    value.pop();
                }
                self.advance();
                if self.at() != Some('#') {
                    break;
                }
                self.advance();
                value.push('\n');
            } else {
                value.push(ch);
                self.advance();
            }
        }

        MK_TOKEN!(TokenKind::String, value, start)
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.at() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skips to the matching `*/`; the opening `/*` is already consumed.
    fn skip_block_comment(&mut self) -> Result<(), Error> {
        loop {
            match self.at() {
                None => {
                    return Err(self
                        .error(ErrorImpl::UnterminatedComment, self.get_position())
                        .expecting_more())
                }
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Scans a whole buffer, failing on the first error. The returned sequence
/// always ends with a single EOF token.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    loop {
        let token = match lex.next_token() {
            Ok(token) => token,
            Err(error) => {
                debug!(file = %lex.file, error = error.get_error_name(), line = error.get_line(), "scan failed");
                return Err(error);
            }
        };

        let is_eof = token.kind == TokenKind::EOF;
        lex.push(token);
        if is_eof {
            break;
        }
    }

    debug!(file = %lex.file, tokens = lex.tokens.len(), "tokenized");
    Ok(lex.tokens)
}
