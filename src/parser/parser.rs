//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Expressions are parsed by precedence climbing over the operator table in
//! `lexer::tokens`; statements dispatch on their first token.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for cells
//! - Postfix handlers for calls, subscripts and attribute access

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::statements::BlockStmt,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::DEFAULT_FILE,
        tokens::{NumFlags, Operator, Token, TokenKind},
    },
    Position, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, NUDHandler, NUDLookup, PostfixHandler, PostfixLookup, StmtHandler,
        StmtLookup,
    },
    stmt::parse_stmt,
};

/// How deep blocks and expressions may nest before parsing gives up.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// The token list always ends with an EOF token, so reading the current
/// token never runs off the end.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Index of the current token
    pos: usize,
    /// Blocks and expressions currently open
    depth: usize,
    /// The name of the source file being parsed
    file: String,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for cell handlers
    nud_lookup: NUDLookup,
    /// Lookup table for postfix handlers
    postfix_lookup: PostfixLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `file` - The source file name, `<stdin>` when absent
    pub fn new(mut tokens: Vec<Token>, file: Option<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.position)
                .unwrap_or_else(Position::start);
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), position));
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            file: file.unwrap_or_else(|| String::from(DEFAULT_FILE)),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            postfix_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token after the current one without advancing.
    pub fn peek_token(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.current_token().is_operator(op)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Builds an error at the current token. Errors raised at EOF are marked
    /// as expecting more input.
    pub fn error(&self, kind: ErrorImpl) -> Error {
        let error = Error::new(kind, self.get_position(), &self.file);
        if self.has_tokens() {
            error
        } else {
            error.expecting_more()
        }
    }

    /// Builds an "expected X, found Y" error at the current token.
    pub fn expected(&self, expected: &str) -> Error {
        self.error(ErrorImpl::Expected {
            expected: String::from(expected),
            found: self.current_token().describe(),
        })
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - How the expected token is named in the error message
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            Ok(self.advance())
        } else {
            Err(self.expected(expected))
        }
    }

    /// Opens one nesting level, failing once `MAX_NESTING_DEPTH` levels are
    /// open.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ErrorImpl::TooDeeplyNested {
                limit: MAX_NESTING_DEPTH,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the postfix lookup table.
    pub fn get_postfix_lookup(&self) -> &PostfixLookup {
        &self.postfix_lookup
    }

    /// Registers a handler for a token that starts a cell.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a handler for a token that continues a postfix chain.
    pub fn postfix(&mut self, kind: TokenKind, postfix_fn: PostfixHandler) {
        self.postfix_lookup.insert(kind, postfix_fn);
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().position
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses all statements until EOF.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse, as produced by `tokenize`
/// * `file` - The source file name used in errors
///
/// # Returns
///
/// Result containing either the root BlockStmt or the first Error
pub fn parse(tokens: Vec<Token>, file: Option<String>) -> Result<BlockStmt, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let position = parser.get_position();
    let mut body = vec![];

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => {
                trace!(?stmt, "parsed statement");
                body.push(stmt);
            }
            Err(error) => {
                debug!(file = parser.get_file(), %error, "parsing failed");
                return Err(error);
            }
        }
    }

    debug!(
        file = parser.get_file(),
        statements = body.len(),
        "parsing finished"
    );

    Ok(BlockStmt { body, position })
}
