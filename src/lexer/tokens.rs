use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, ops::BitOr};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("elif", TokenKind::Elif);
        map.insert("import", TokenKind::Import);
        map.insert("class", TokenKind::Class);
        map.insert("fun", TokenKind::Fun);
        map.insert("return", TokenKind::Return);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("finally", TokenKind::Finally);
        map.insert("for", TokenKind::For);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("throw", TokenKind::Throw);
        map.insert("assert", TokenKind::Assert);
        map.insert("print", TokenKind::Print);
        map.insert("input", TokenKind::Input);
        map.insert("extends", TokenKind::Extends);
        map
    };

    /// Words that scan as operators rather than identifiers.
    pub static ref LOGICAL_LOOKUP: HashMap<&'static str, Operator> = {
        let mut map = HashMap::new();
        map.insert("and", Operator::And);
        map.insert("or", Operator::Or);
        map.insert("not", Operator::Not);
        map
    };

    /// Every operator spelling, including the word operators.
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, Operator> = Operator::ALL
        .iter()
        .map(|op| (op.spelling(), *op))
        .collect();

    pub static ref PRECEDENCE_LOOKUP: HashMap<Operator, u8> = {
        let mut map = HashMap::new();
        for op in Operator::ALL.iter().filter(|op| op.is_assignment()) {
            map.insert(*op, ASSIGNMENT_PRECEDENCE);
        }
        map.insert(Operator::Or, 30);
        map.insert(Operator::And, 40);
        map.insert(Operator::Bor, 50);
        map.insert(Operator::Xor, 60);
        map.insert(Operator::Band, 70);
        map.insert(Operator::Eq, 80);
        map.insert(Operator::Ueq, 80);
        map.insert(Operator::Lth, 90);
        map.insert(Operator::Leq, 90);
        map.insert(Operator::Gth, 90);
        map.insert(Operator::Geq, 90);
        map.insert(Operator::Lshift, 100);
        map.insert(Operator::Rshift, 100);
        map.insert(Operator::Plus, 110);
        map.insert(Operator::Sub, 110);
        map.insert(Operator::Mult, 120);
        map.insert(Operator::Divi, 130);
        map.insert(Operator::Mod, 140);
        map.insert(Operator::Power, 150);
        map
    };
}

/// Precedence shared by `=` and every compound assignment.
pub const ASSIGNMENT_PRECEDENCE: u8 = 10;

/// Distance between an arithmetic/bitwise operator and its `op=` form.
pub const ASSIGN_OFFSET: u8 = 22;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Operator,

    OpenParen,
    OpenBracket,
    OpenCurly,

    CloseParen,
    CloseBracket,
    CloseCurly,

    Comma,
    Semicolon,
    Dot,
    Colon,
    At,

    Identifier,
    Number,
    String,

    // Reserved
    Else,
    Elif,
    If,
    Import,
    Class,
    Fun,
    Return,
    Try,
    Catch,
    Finally,
    Break,
    Continue,
    Throw,
    Assert,
    For,
    Print,
    Input,
    Extends,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Operator codes. The numbering matters: `op=` is `op + ASSIGN_OFFSET`.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Operator {
    Mult,
    Divi,
    Mod,
    Xor,
    Band,
    Bor,
    Lshift,
    Rshift,
    Plus,
    Sub,
    Power,

    Eq,
    Ueq,
    Gth,
    Lth,
    Geq,
    Leq,

    Or,
    And,

    Bng,
    Not,

    Assign,

    AssiMult,
    AssiDivi,
    AssiMod,
    AssiXor,
    AssiBand,
    AssiBor,
    AssiLshift,
    AssiRshift,
    AssiPlus,
    AssiSub,
    AssiPower,
}

impl Operator {
    /// All operators, indexed by code.
    pub const ALL: [Operator; 33] = [
        Operator::Mult,
        Operator::Divi,
        Operator::Mod,
        Operator::Xor,
        Operator::Band,
        Operator::Bor,
        Operator::Lshift,
        Operator::Rshift,
        Operator::Plus,
        Operator::Sub,
        Operator::Power,
        Operator::Eq,
        Operator::Ueq,
        Operator::Gth,
        Operator::Lth,
        Operator::Geq,
        Operator::Leq,
        Operator::Or,
        Operator::And,
        Operator::Bng,
        Operator::Not,
        Operator::Assign,
        Operator::AssiMult,
        Operator::AssiDivi,
        Operator::AssiMod,
        Operator::AssiXor,
        Operator::AssiBand,
        Operator::AssiBor,
        Operator::AssiLshift,
        Operator::AssiRshift,
        Operator::AssiPlus,
        Operator::AssiSub,
        Operator::AssiPower,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Operator> {
        Operator::ALL.get(code as usize).copied()
    }

    /// The `op=` form of an arithmetic, shift or bitwise operator.
    pub fn compound(self) -> Option<Operator> {
        if self.code() <= Operator::Power.code() {
            Operator::from_code(self.code() + ASSIGN_OFFSET)
        } else {
            None
        }
    }

    pub fn is_assignment(self) -> bool {
        self == Operator::Assign || self.code() >= ASSIGN_OFFSET
    }

    /// Binary precedence, or `None` for operators that only appear as prefixes.
    pub fn precedence(self) -> Option<u8> {
        PRECEDENCE_LOOKUP.get(&self).copied()
    }

    pub fn spelling(self) -> &'static str {
        match self {
            Operator::Mult => "*",
            Operator::Divi => "/",
            Operator::Mod => "%",
            Operator::Xor => "^",
            Operator::Band => "&",
            Operator::Bor => "|",
            Operator::Lshift => "<<",
            Operator::Rshift => ">>",
            Operator::Plus => "+",
            Operator::Sub => "-",
            Operator::Power => "**",
            Operator::Eq => "==",
            Operator::Ueq => "!=",
            Operator::Gth => ">",
            Operator::Lth => "<",
            Operator::Geq => ">=",
            Operator::Leq => "<=",
            Operator::Or => "or",
            Operator::And => "and",
            Operator::Bng => "~",
            Operator::Not => "not",
            Operator::Assign => "=",
            Operator::AssiMult => "*=",
            Operator::AssiDivi => "/=",
            Operator::AssiMod => "%=",
            Operator::AssiXor => "^=",
            Operator::AssiBand => "&=",
            Operator::AssiBor => "|=",
            Operator::AssiLshift => "<<=",
            Operator::AssiRshift => ">>=",
            Operator::AssiPlus => "+=",
            Operator::AssiSub => "-=",
            Operator::AssiPower => "**=",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// Number literal flags: exactly one of `INTEGER`/`FLOAT`, plus `SCIENTIFIC`
/// when an exponent was written.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct NumFlags(u8);

impl NumFlags {
    pub const NONE: NumFlags = NumFlags(0);
    pub const FLOAT: NumFlags = NumFlags(1);
    pub const INTEGER: NumFlags = NumFlags(2);
    pub const SCIENTIFIC: NumFlags = NumFlags(4);

    pub fn contains(self, other: NumFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_integer(self) -> bool {
        self.contains(NumFlags::INTEGER)
    }

    pub fn is_float(self) -> bool {
        self.contains(NumFlags::FLOAT)
    }

    pub fn is_scientific(self) -> bool {
        self.contains(NumFlags::SCIENTIFIC)
    }
}

impl BitOr for NumFlags {
    type Output = NumFlags;

    fn bitor(self, rhs: NumFlags) -> NumFlags {
        NumFlags(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Set only for `TokenKind::Operator`.
    pub op: Option<Operator>,
    /// Decoded text: identifier name, string payload, number mantissa digits
    /// (base prefix stripped), or the operator spelling.
    pub value: String,
    pub position: Position,
    pub num_base: u32,
    pub num_flags: NumFlags,
    /// Raw exponent digits, only for scientific numbers.
    pub num_exponent: Option<String>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Position { line, col } = self.position;
        match self.kind {
            TokenKind::Number if self.num_flags.is_scientific() => write!(
                f,
                "<Token sci number '{}', line: {}, col: {}, e: {}>",
                self.value,
                line,
                col,
                self.num_exponent.as_deref().unwrap_or("")
            ),
            TokenKind::Number => write!(
                f,
                "<Token number '{}', line: {}, col: {}, base: {}, type: {}>",
                self.value,
                line,
                col,
                self.num_base,
                self.num_flags.bits()
            ),
            TokenKind::Operator => match self.op {
                Some(op) => write!(f, "<Token operator {:?}, line: {}, col: {}>", op, line, col),
                None => write!(f, "<Token operator ?, line: {}, col: {}>", line, col),
            },
            TokenKind::EOF => write!(f, "<Token EOF>"),
            _ => write!(
                f,
                "<Token '{}', line: {}, col: {}, type: {}>",
                self.value, line, col, self.kind
            ),
        }
    }
}

impl Token {
    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator && self.op == Some(op)
    }

    /// Short human form used in "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from("EOF"),
            TokenKind::String => format!("string {:?}", self.value),
            _ => format!("'{}'", self.value),
        }
    }
}
