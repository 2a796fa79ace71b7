// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for AutoHotkey v2 scripts.
//!
//! This parser builds a [`Program`] from a stream of tokens. It is designed
//! for editor use: a syntax error in one statement never stops the parse.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** - the parser always produces a program
//! - **Multiple errors** - every failed statement is reported, not just the first
//! - **Synchronization points** - recovery resumes after the next newline or
//!   at a statement keyword (`class`, `if`, `while`, `for`, `return`)
//!
//! Each statement parser returns `Result<Statement, ParseError>`. The
//! statement loop records the error, calls [`Parser::synchronize`] and
//! carries on.
//!
//! # Statements
//!
//! Statement forms are recognised by their first token. Function
//! declarations have no keyword, so they are told apart from calls by
//! looking past the closing parenthesis for a `{`.
//!
//! Bodies of `if`, `else`, loops and hotkeys are either a braced block or
//! run until the next `}`, `else` or `elseif`.
//!
//! # Binary Operator Precedence
//!
//! Binary operators are parsed with precedence climbing over a binding power
//! table:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 10 | `or` | Left |
//! | 20 | `and` | Left |
//! | 30 | `=` `!=` | Left |
//! | 40 | `<` `>` `<=` `>=` `~=` `!~` `is` | Left |
//! | 50 | `+` `-` | Left |
//! | 60 | `*` `/` `mod` | Left |
//! | 70 | `**` | Right |
//!
//! Assignment (`:=`) sits below `or` and is right-recursive. Prefix `-` and
//! `not` bind tighter than every binary operator except `**`.
//!
//! # Usage
//!
//! ```
//! use ahk_core::source_analysis::parse;
//!
//! let output = parse("x := 3 + 4").unwrap();
//! assert!(output.errors.is_empty());
//! assert_eq!(output.program.body.len(), 1);
//! ```

use ecow::EcoString;
use serde::Serialize;

use crate::ast::{BinaryOperator, Location, Program};
use crate::source_analysis::{LexError, ParseError, Position, Span, Token, TokenKind, tokenize};

// Submodules with additional impl blocks for Parser
mod expressions;
mod statements;


// ============================================================================
// Binding Powers for Binary Operator Precedence
// ============================================================================

/// Binding power for binary operators.
///
/// Higher values bind tighter. Left and right binding powers differ
/// for associativity:
/// - Left-associative: `left_bp == right_bp - 1` (e.g., `+`, `-`)
/// - Right-associative: `left_bp == right_bp + 1` (e.g., `**`)
#[derive(Debug, Clone, Copy)]
pub(super) struct BindingPower {
    /// Left binding power (how tightly this operator binds to its left operand).
    pub(super) left: u8,
    /// Right binding power (how tightly this operator binds to its right operand).
    pub(super) right: u8,
}

impl BindingPower {
    /// Creates a left-associative binding power.
    const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }

    /// Creates a right-associative binding power.
    const fn right_assoc(precedence: u8) -> Self {
        Self {
            left: precedence + 1,
            right: precedence,
        }
    }
}

/// Precedence of `**`; the operand of a prefix operator is parsed at this level.
pub(super) const POWER_PRECEDENCE: u8 = 70;

/// Gets the binding power and operator for a binary operator token.
///
/// Returns `None` for any other token, which ends the expression.
pub(super) fn binary_binding_power(kind: TokenKind) -> Option<(BindingPower, BinaryOperator)> {
    let entry = match kind {
        TokenKind::Or => (BindingPower::left_assoc(10), BinaryOperator::Or),
        TokenKind::And => (BindingPower::left_assoc(20), BinaryOperator::And),

        TokenKind::Equals => (BindingPower::left_assoc(30), BinaryOperator::Equal),
        TokenKind::NotEquals => (BindingPower::left_assoc(30), BinaryOperator::NotEqual),

        TokenKind::Less => (BindingPower::left_assoc(40), BinaryOperator::Less),
        TokenKind::Greater => (BindingPower::left_assoc(40), BinaryOperator::Greater),
        TokenKind::LessEqual => (BindingPower::left_assoc(40), BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => (BindingPower::left_assoc(40), BinaryOperator::GreaterEqual),
        TokenKind::Match => (BindingPower::left_assoc(40), BinaryOperator::RegexMatch),
        TokenKind::NotMatch => (BindingPower::left_assoc(40), BinaryOperator::RegexNotMatch),
        TokenKind::Is => (BindingPower::left_assoc(40), BinaryOperator::Is),

        TokenKind::Plus => (BindingPower::left_assoc(50), BinaryOperator::Add),
        TokenKind::Minus => (BindingPower::left_assoc(50), BinaryOperator::Subtract),

        TokenKind::Multiply => (BindingPower::left_assoc(60), BinaryOperator::Multiply),
        TokenKind::Divide => (BindingPower::left_assoc(60), BinaryOperator::Divide),
        TokenKind::Modulo => (BindingPower::left_assoc(60), BinaryOperator::Modulo),

        TokenKind::Power => (
            BindingPower::right_assoc(POWER_PRECEDENCE),
            BinaryOperator::Power,
        ),

        _ => return None,
    };
    Some(entry)
}

// ============================================================================
// Entry points
// ============================================================================

/// The result of parsing: a program plus every recoverable error.
///
/// `program` is always present, even when `errors` is not empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    /// The parsed program.
    pub program: Program,
    /// Errors for statements that were skipped during recovery.
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    /// Returns true if every statement parsed cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenizes and parses `source`.
///
/// # Errors
///
/// Returns a [`LexError`] if the source contains an unterminated string.
/// Syntax errors are not failures; they are collected in
/// [`ParseOutput::errors`].
pub fn parse(source: &str) -> Result<ParseOutput, LexError> {
    let tokens = tokenize(source)?;
    Ok(parse_tokens(tokens))
}

/// Parses an already tokenized script.
///
/// Whitespace and comment tokens are dropped first. A missing EOF token is
/// supplied.
#[must_use]
pub fn parse_tokens(tokens: Vec<Token>) -> ParseOutput {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    tracing::trace!(
        statements = program.body.len(),
        errors = parser.errors.len(),
        "parsed program"
    );
    ParseOutput {
        program,
        errors: parser.errors,
    }
}

/// Maximum nesting depth for statements and expressions before the parser
/// bails out.
///
/// Prevents stack overflow on deeply nested input (e.g., `(((((...)))))`).
/// 64 is generous enough for any realistic script while staying safe.
///
/// As a second line of defence, `stacker::maybe_grow` is used at the
/// recursive entry points so the stack is extended on the heap if needed.
const MAX_NESTING_DEPTH: usize = 64;

/// The parser state.
pub(super) struct Parser {
    /// Significant tokens, always ending with EOF.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Errors of statements skipped so far.
    pub(super) errors: Vec<ParseError>,
    /// Current statement plus expression nesting depth.
    nesting_depth: usize,
}

impl Parser {
    /// Creates a new parser, dropping trivia tokens.
    fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !t.kind().is_trivia())
            .collect();
        if !tokens.last().is_some_and(|t| t.kind().is_eof()) {
            let (end, at) = tokens.last().map_or((0, Position::default()), |t| {
                (t.span().end(), t.position().shifted(t.char_len()))
            });
            tokens.push(Token::new(TokenKind::Eof, "", Span::point(end), at));
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            nesting_depth: 0,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    pub(super) fn current_token(&self) -> &Token {
        // `new` guarantees a trailing EOF, and `advance` never moves past it.
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Returns the current token kind.
    pub(super) fn current_kind(&self) -> TokenKind {
        self.current_token().kind()
    }

    /// Returns the kind `offset` tokens ahead of the current one.
    pub(super) fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.current + offset).map(Token::kind)
    }

    /// Returns the most recently consumed token.
    pub(super) fn previous(&self) -> Option<&Token> {
        self.current.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Returns the span of the most recently consumed token.
    pub(super) fn previous_span(&self) -> Span {
        self.previous()
            .map_or_else(|| self.current_token().span(), Token::span)
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    /// Advances to the next token and returns the one consumed.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Checks if the current token matches the given kind. Always false at EOF.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current_kind() == kind
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match the given kind, advancing if it does.
    pub(super) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    /// Skips any newline tokens.
    pub(super) fn skip_newlines(&mut self) {
        while self.match_token(TokenKind::Newline) {}
    }

    /// Returns true at a token that ends an implicit body.
    pub(super) fn check_block_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::RightBrace | TokenKind::Else | TokenKind::ElseIf
        )
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    /// Builds an error located at the current token.
    pub(super) fn error(&self, message: impl Into<EcoString>) -> ParseError {
        let token = self.current_token();
        ParseError::new(message, token.position(), token.span())
    }

    /// Increments the nesting depth and fails if it exceeds
    /// [`MAX_NESTING_DEPTH`]. Call [`Parser::leave_nesting`] on every exit
    /// path when this returns `Ok(())`.
    pub(super) fn enter_nesting(&mut self) -> Result<(), ParseError> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "Nesting is too deep (maximum {MAX_NESTING_DEPTH} levels)"
            )));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Parser::enter_nesting`]).
    pub(super) fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Runs `parse` one nesting level deeper, on a grown stack if needed.
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        // 32 KiB red zone, 256 KiB new segment. The depth guard caps
        // recursion, so few segments are ever needed.
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            self.enter_nesting()?;
            let result = parse(self);
            self.leave_nesting();
            result
        })
    }

    /// Synchronizes the parser after a failed statement.
    ///
    /// Always consumes at least one token, then stops right after a newline
    /// or in front of a statement keyword.
    pub(super) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self
                .previous()
                .is_some_and(|t| t.kind() == TokenKind::Newline)
            {
                return;
            }

            if matches!(
                self.current_kind(),
                TokenKind::Class
                    | TokenKind::If
                    | TokenKind::While
                    | TokenKind::For
                    | TokenKind::Return
            ) {
                return;
            }

            self.advance();
        }
    }

    // ========================================================================
    // Program Parsing
    // ========================================================================

    /// Parses the whole token stream.
    fn parse_program(&mut self) -> Program {
        let mut body = Vec::new();

        while !self.is_at_end() {
            if self.match_token(TokenKind::Newline) {
                continue;
            }
            if let Some(stmt) = self.statement() {
                body.push(stmt);
            }
        }

        let end = self.current_token().span().end();
        Program::new(
            body,
            Location::new(Span::new(0, end), Position::new(1, 1)),
        )
    }
}
