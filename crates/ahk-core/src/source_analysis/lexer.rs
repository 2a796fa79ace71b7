// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for AutoHotkey v2 scripts.
//!
//! This module converts source text into a sequence of [`Token`]s in a single
//! left-to-right pass. The lexer is hand-written so that every character of
//! the input ends up in exactly one token.
//!
//! # Design Principles
//!
//! - **Totality**: unknown characters become single-character
//!   [`TokenKind::Identifier`] tokens; the only failure is an unterminated
//!   string literal ([`LexError`])
//! - **Lossless**: whitespace, comments and newlines are tokens, so the token
//!   texts concatenate back to the input
//! - **Precise positions**: every token records the byte span and the
//!   1-based line/column of its first character
//!
//! # Hotkeys
//!
//! A `::` ends a hotkey or hotstring trigger. Trigger syntax such as `^j` or
//! `~LButton & a` is not expression syntax, so when the lexer meets `::` it
//! folds everything already scanned on the current line into one
//! [`TokenKind::Hotkey`] token.
//!
//! # Example
//!
//! ```
//! use ahk_core::source_analysis::{TokenKind, tokenize};
//!
//! let tokens = tokenize("F1::MsgBox(1)").unwrap();
//! assert_eq!(tokens[0].kind(), TokenKind::Hotkey);
//! assert_eq!(tokens[0].text(), "F1::");
//! assert_eq!(tokens[1].text(), "MsgBox");
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use super::{LexError, Position, Span, Token, TokenKind};

/// A lexer that tokenizes AutoHotkey v2 source code.
///
/// A lexer is single-use: [`Lexer::tokenize`] consumes it.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column, in characters.
    column: u32,
    /// Tokens produced so far.
    tokens: Vec<Token>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("line", &self.line)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Scans the whole input. The last token is always [`TokenKind::Eof`].
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if a string literal is not closed before the
    /// end of input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek_char() {
            self.lex_token(c)?;
        }
        let eof_at = self.location();
        let end = self.current_position();
        self.tokens
            .push(Token::new(TokenKind::Eof, "", Span::point(end), eof_at));
        Ok(self.tokens)
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is same as `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, c)| c)
    }

    /// Consumes the next character, keeping line and column in step.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Returns the current line/column.
    fn location(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Pushes a token covering `start..current`.
    fn push(&mut self, kind: TokenKind, start: u32, at: Position) {
        let span = self.span_from(start);
        let text = self.text_for(span);
        self.tokens.push(Token::new(kind, text, span, at));
    }

    /// Lexes one token starting with `c`.
    fn lex_token(&mut self, c: char) -> Result<(), LexError> {
        let start = self.current_position();
        let at = self.location();

        if c == ':' && self.peek_char_n(1) == Some(':') {
            self.lex_hotkey(start, at);
            return Ok(());
        }

        let kind = self.lex_token_kind(c, start)?;
        self.push(kind, start, at);
        Ok(())
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char, start: u32) -> Result<TokenKind, LexError> {
        let kind = match c {
            ' ' | '\t' | '\r' => {
                self.advance_while(|c| matches!(c, ' ' | '\t' | '\r'));
                TokenKind::Whitespace
            }
            '\n' => {
                self.advance();
                TokenKind::Newline
            }

            'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier_or_keyword(start),
            '0'..='9' => self.lex_number(start),
            '"' => self.lex_string(start)?,
            ';' => {
                self.advance_while(|c| c != '\n');
                TokenKind::Comment
            }
            '#' => {
                self.advance();
                self.advance_while(|c| c.is_ascii_alphanumeric());
                TokenKind::Directive
            }

            ':' => self.lex_pair(':', &[('=', TokenKind::Assign)], TokenKind::Colon),
            '*' => self.lex_pair('*', &[('*', TokenKind::Power)], TokenKind::Multiply),
            '<' => self.lex_pair('<', &[('=', TokenKind::LessEqual)], TokenKind::Less),
            '>' => self.lex_pair('>', &[('=', TokenKind::GreaterEqual)], TokenKind::Greater),
            // A lone `!` or `~` is a hotkey modifier, not an operator.
            '!' => self.lex_pair(
                '!',
                &[('=', TokenKind::NotEquals), ('~', TokenKind::NotMatch)],
                TokenKind::Identifier,
            ),
            '~' => self.lex_pair('~', &[('=', TokenKind::Match)], TokenKind::Identifier),

            _ => {
                self.advance();
                single_char_kind(c)
            }
        };
        Ok(kind)
    }

    /// Lexes `first` optionally followed by one of `seconds` (maximal munch).
    fn lex_pair(
        &mut self,
        first: char,
        seconds: &[(char, TokenKind)],
        single: TokenKind,
    ) -> TokenKind {
        debug_assert_eq!(self.peek_char(), Some(first));
        self.advance();
        let next = self.peek_char();
        for &(second, kind) in seconds {
            if next == Some(second) {
                self.advance();
                return kind;
            }
        }
        single
    }

    /// Lexes an identifier, keyword, built-in variable or `mod` operator.
    fn lex_identifier_or_keyword(&mut self, start: u32) -> TokenKind {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = self.text_for(self.span_from(start));

        if let Some(keyword) = TokenKind::keyword(text) {
            keyword
        } else if text.starts_with("A_") {
            TokenKind::BuiltinVar
        } else if text.eq_ignore_ascii_case("mod") {
            TokenKind::Modulo
        } else {
            TokenKind::Identifier
        }
    }

    /// Lexes a number: digits, an optional `.digits` part, or `0x` hex.
    fn lex_number(&mut self, start: u32) -> TokenKind {
        self.advance_while(|c| c.is_ascii_digit());

        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
        }

        // Hex needs the `x` right after a lone leading `0`: `0x41`, not `10x1`.
        let single_zero = self.text_for(self.span_from(start)) == "0";
        if single_zero && self.peek_char() == Some('x') {
            self.advance(); // x
            self.advance_while(|c| c.is_ascii_hexdigit());
        }

        TokenKind::Number
    }

    /// Lexes a double-quoted string, which may span lines and ends at the
    /// next `"`. Backticks get no special treatment.
    fn lex_string(&mut self, start: u32) -> Result<TokenKind, LexError> {
        debug_assert_eq!(self.peek_char(), Some('"'));
        self.advance(); // opening quote

        loop {
            match self.advance() {
                None => {
                    return Err(LexError::unterminated_string(
                        self.span_from(start),
                        self.location(),
                    ));
                }
                Some('"') => return Ok(TokenKind::String),
                Some(_) => {}
            }
        }
    }

    /// Folds the current line into a hotkey token ending at `::`.
    ///
    /// Leading indentation stays a separate whitespace token.
    fn lex_hotkey(&mut self, colon_start: u32, colon_at: Position) {
        self.advance(); // :
        self.advance(); // :

        let line_begin = self
            .tokens
            .iter()
            .rposition(|t| t.kind() == TokenKind::Newline)
            .map_or(0, |i| i + 1);
        let first = self.tokens[line_begin..]
            .iter()
            .position(|t| t.kind() != TokenKind::Whitespace)
            .map(|i| line_begin + i);

        let (start, at) = match first {
            Some(index) => {
                let token = &self.tokens[index];
                let folded = (token.span().start(), token.position());
                self.tokens.truncate(index);
                folded
            }
            None => (colon_start, colon_at),
        };

        self.push(TokenKind::Hotkey, start, at);
    }
}

/// Maps a single character that starts no longer token to its kind.
fn single_char_kind(c: char) -> TokenKind {
    match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '/' => TokenKind::Divide,
        '=' => TokenKind::Equals,
        '?' => TokenKind::Question,
        '&' => TokenKind::Ampersand,
        '|' => TokenKind::Pipe,
        // Unknown characters degrade to one-character identifiers.
        _ => TokenKind::Identifier,
    }
}

/// Tokenizes `source` into a lossless token stream ending with EOF.
///
/// # Errors
///
/// Returns a [`LexError`] if a string literal is not closed before the end
/// of input.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Drops whitespace tokens, keeping comments, newlines and EOF.
///
/// This is the stream the linter and the semantic token classifier inspect.
#[must_use]
pub fn significant_tokens(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| t.kind() != TokenKind::Whitespace)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to lex and extract the kinds of significant tokens (EOF excluded).
    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind())
            .filter(|k| !matches!(k, TokenKind::Whitespace | TokenKind::Eof))
            .collect()
    }

    /// Helper to lex and extract significant token texts (EOF excluded).
    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| !matches!(t.kind(), TokenKind::Whitespace | TokenKind::Eof))
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn lex_empty() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].kind().is_eof());
        assert_eq!(tokens[0].text(), "");
        assert_eq!(tokens[0].position(), Position::new(1, 1));
    }

    #[test]
    fn lex_keywords_case_insensitive() {
        assert_eq!(
            kinds("if Else ELSEIF while For loop"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::ElseIf,
                TokenKind::While,
                TokenKind::For,
                TokenKind::Loop,
            ]
        );
        // original spelling is preserved
        assert_eq!(texts("RETURN True"), vec!["RETURN", "True"]);
    }

    #[test]
    fn lex_identifier_classes() {
        assert_eq!(
            kinds("count A_ScriptDir mod MOD _tmp x1"),
            vec![
                TokenKind::Identifier,
                TokenKind::BuiltinVar,
                TokenKind::Modulo,
                TokenKind::Modulo,
                TokenKind::Identifier,
                TokenKind::Identifier,
            ]
        );
        // prefix test is case-sensitive, keyword test is not
        assert_eq!(kinds("a_foo"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("modulus"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn lex_two_char_operators() {
        assert_eq!(
            kinds(":= != <= >= ** ~= !~"),
            vec![
                TokenKind::Assign,
                TokenKind::NotEquals,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Power,
                TokenKind::Match,
                TokenKind::NotMatch,
            ]
        );
    }

    #[test]
    fn lex_single_char_operators_and_delimiters() {
        assert_eq!(
            kinds("= < > + - * / . ( ) { } [ ] , : ? & |"),
            vec![
                TokenKind::Equals,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Multiply,
                TokenKind::Divide,
                TokenKind::Dot,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Question,
                TokenKind::Ampersand,
                TokenKind::Pipe,
            ]
        );
    }

    #[test]
    fn lex_double_equals_is_two_tokens() {
        assert_eq!(kinds("=="), vec![TokenKind::Equals, TokenKind::Equals]);
    }

    #[test]
    fn lex_lone_bang_and_tilde_are_identifiers() {
        assert_eq!(
            kinds("! ~"),
            vec![TokenKind::Identifier, TokenKind::Identifier]
        );
    }

    #[test]
    fn lex_unknown_characters_are_identifiers() {
        assert_eq!(texts("%x% @ é"), vec!["%", "x", "%", "@", "é"]);
        assert_eq!(
            kinds("@"),
            vec![TokenKind::Identifier],
            "unknown characters must not fail"
        );
    }

    #[test]
    fn lex_numbers() {
        assert_eq!(texts("42 3.14 0x41 0xFF"), vec!["42", "3.14", "0x41", "0xFF"]);
        assert!(kinds("42 3.14 0x41").iter().all(|k| *k == TokenKind::Number));
    }

    #[test]
    fn lex_number_without_fraction_digits() {
        // `1.` is a number followed by a dot
        assert_eq!(kinds("1.x"), vec![TokenKind::Number, TokenKind::Dot, TokenKind::Identifier]);
    }

    #[test]
    fn lex_hex_requires_leading_zero_digit() {
        assert_eq!(texts("10x1"), vec!["10", "x1"]);
        assert_eq!(texts("a0x1"), vec!["a0x1"]);
    }

    #[test]
    fn lex_strings() {
        assert_eq!(texts(r#"x := "hello world""#), vec!["x", ":=", "\"hello world\""]);
        assert_eq!(kinds(r#""""#), vec![TokenKind::String]);
    }

    #[test]
    fn lex_string_ends_at_first_quote_after_backtick() {
        assert_eq!(
            texts("x := \"C:\\dir`\"\nMsgBox(x)"),
            vec!["x", ":=", "\"C:\\dir`\"", "\n", "MsgBox", "(", "x", ")"]
        );
    }

    #[test]
    fn lex_multiline_string_reports_start_position() {
        let tokens = tokenize("  \"a\nb\" x").unwrap();
        let string = tokens.iter().find(|t| t.kind() == TokenKind::String).unwrap();
        assert_eq!(string.position(), Position::new(1, 3));
        let x = tokens.iter().find(|t| t.text() == "x").unwrap();
        assert_eq!(x.position(), Position::new(2, 4));
    }

    #[test]
    fn lex_unterminated_string_fails() {
        let err = tokenize("x := 1\ny := \"abc\nmore").unwrap_err();
        assert_eq!(err.line, 3, "error is reported where input ended");
        assert_eq!(err.span.start(), 12);
        assert_eq!(err.to_string(), "Unterminated string at line 3");
    }

    #[test]
    fn lex_comments_and_directives() {
        let tokens = tokenize("#Requires AutoHotkey v2.0 ; note\n").unwrap();
        let kinds: Vec<_> = tokens
            .iter()
            .map(Token::kind)
            .filter(|k| *k != TokenKind::Whitespace)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Directive,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Number,
                TokenKind::Comment,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[0].text(), "#Requires");
        let comment = tokens.iter().find(|t| t.kind() == TokenKind::Comment).unwrap();
        assert_eq!(comment.text(), "; note");
    }

    #[test]
    fn lex_directive_stops_at_non_alphanumeric() {
        assert_eq!(texts("#Include <lib>"), vec!["#Include", "<", "lib", ">"]);
        assert_eq!(texts("#"), vec!["#"]);
    }

    #[test]
    fn lex_hotkey_folds_trigger() {
        let tokens = tokenize("F1::MsgBox(1)").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Hotkey);
        assert_eq!(tokens[0].text(), "F1::");
        assert_eq!(tokens[0].hotkey_trigger(), Some("F1"));
        assert_eq!(
            kinds("F1::MsgBox(1)"),
            vec![
                TokenKind::Hotkey,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Number,
                TokenKind::RightParen,
            ]
        );
    }

    #[test]
    fn lex_hotkey_with_modifiers_and_indent() {
        let tokens = tokenize("x := 1\n  ^!j ::\n").unwrap();
        let hotkey = tokens.iter().find(|t| t.kind() == TokenKind::Hotkey).unwrap();
        assert_eq!(hotkey.text(), "^!j ::");
        assert_eq!(hotkey.hotkey_trigger(), Some("^!j"));
        assert_eq!(hotkey.position(), Position::new(2, 3));
        // the indentation stays a separate token
        let before = &tokens[tokens.iter().position(|t| t == hotkey).unwrap() - 1];
        assert_eq!(before.kind(), TokenKind::Whitespace);
    }

    #[test]
    fn lex_hotstring_folds_into_one_token() {
        assert_eq!(texts("::btw::by the way")[0], "::btw::");
        assert_eq!(kinds("::btw::")[..], [TokenKind::Hotkey]);
    }

    #[test]
    fn lex_positions() {
        let tokens = tokenize("a := 1\n  bb").unwrap();
        let significant = significant_tokens(&tokens);
        let positions: Vec<_> = significant.iter().map(Token::position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(1, 1),
                Position::new(1, 3),
                Position::new(1, 6),
                Position::new(1, 7),
                Position::new(2, 3),
                Position::new(2, 5),
            ]
        );
    }

    #[test]
    fn lex_round_trips_source() {
        let source = "#Requires AutoHotkey v2\r\n\tx := \"a\nb\" ; c\n^j::Send(\"hi\")\n@é";
        let tokens = tokenize(source).unwrap();
        let rebuilt: String = tokens.iter().map(Token::text).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn significant_tokens_drop_only_whitespace() {
        let tokens = tokenize("a ; c\n").unwrap();
        let kinds: Vec<_> = significant_tokens(&tokens).iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Comment,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }
}
