// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing for AutoHotkey v2.
//!
//! This module contains the statement-level methods of the `Parser`:
//!
//! - Control flow (`if`/`elseif`/`else`, `while`, `for`, `loop`)
//! - Class and function declarations
//! - `return`, `break` and `continue`
//! - Hotkeys and directives
//! - Scope declarations (`global`, `local`, `static`)
//! - Expression statements
//!
//! Every parser here returns `Result`; [`Parser::statement`] is the single
//! place where a failed statement is recorded and recovered from.

use ecow::EcoString;

use crate::ast::{
    Alternate, BreakStatement, ClassDeclaration, ContinueStatement, DirectiveStatement,
    ExpressionStatement, ForStatement, FunctionDeclaration, HotkeyStatement, Identifier,
    IfStatement, Location, LoopStatement, ReturnStatement, Statement, WhileStatement,
};
use crate::source_analysis::{ParseError, Token, TokenKind};

use super::Parser;

impl Parser {
    // ========================================================================
    // Statement Dispatch
    // ========================================================================

    /// Parses one statement, recovering on failure.
    ///
    /// Returns `None` when the statement failed (the error is recorded and
    /// the parser resynchronized) or declared nothing.
    pub(super) fn statement(&mut self) -> Option<Statement> {
        match self.nested(Self::parse_statement) {
            Ok(stmt) => stmt,
            Err(error) => {
                self.errors.push(error);
                self.synchronize();
                None
            }
        }
    }

    /// Parses the statement starting at the current token.
    fn parse_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        let stmt = match self.current_kind() {
            TokenKind::If => {
                let keyword = self.advance();
                Statement::If(self.parse_if(&keyword)?)
            }
            TokenKind::While => self.parse_while()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Loop => self.parse_loop()?,
            TokenKind::Class => self.parse_class()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Break => Statement::Break(BreakStatement {
                location: Location::of(&self.advance()),
            }),
            TokenKind::Continue => Statement::Continue(ContinueStatement {
                location: Location::of(&self.advance()),
            }),
            TokenKind::Hotkey => self.parse_hotkey()?,
            TokenKind::Directive => self.parse_directive(),
            _ if self.is_at_function_declaration() => self.parse_function_declaration()?,
            TokenKind::Global | TokenKind::Local | TokenKind::Static => {
                return self.parse_scope_declaration();
            }
            _ => self.parse_expression_statement()?,
        };
        Ok(Some(stmt))
    }

    // ========================================================================
    // Bodies
    // ========================================================================

    /// Parses statements until `stop` holds or input ends.
    fn parse_statements_until(&mut self, stop: fn(&Self) -> bool) -> Vec<Statement> {
        let mut body = Vec::new();
        while !self.is_at_end() && !stop(self) {
            if self.match_token(TokenKind::Newline) {
                continue;
            }
            if let Some(stmt) = self.statement() {
                body.push(stmt);
            }
        }
        body
    }

    /// Parses `{ ... }`. The current token must be `{`.
    fn parse_braced_block(&mut self, close_message: &str) -> Result<Vec<Statement>, ParseError> {
        self.expect(TokenKind::LeftBrace, "Expected '{'")?;
        let body = self.parse_statements_until(|p| p.check(TokenKind::RightBrace));
        self.expect(TokenKind::RightBrace, close_message)?;
        Ok(body)
    }

    /// Parses the body of `if`, `else`, `while`, `for` or `loop`: a braced
    /// block, or statements up to the next `}`, `else` or `elseif`.
    fn parse_clause_body(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.skip_newlines();
        if self.check(TokenKind::LeftBrace) {
            self.parse_braced_block("Expected '}' after block")
        } else {
            Ok(self.parse_statements_until(Self::check_block_end))
        }
    }

    /// Skips newlines only if one of `kinds` follows them.
    fn skip_newlines_before(&mut self, kinds: &[TokenKind]) {
        let mut offset = 0;
        while self.peek_kind_at(offset) == Some(TokenKind::Newline) {
            offset += 1;
        }
        if self.peek_kind_at(offset).is_some_and(|k| kinds.contains(&k)) {
            self.skip_newlines();
        }
    }

    // ========================================================================
    // Control Flow
    // ========================================================================

    /// Parses the rest of an `if` or `elseif` after its keyword.
    fn parse_if(&mut self, keyword: &Token) -> Result<IfStatement, ParseError> {
        let test = self.parse_expression()?;
        let consequent = self.parse_clause_body()?;

        self.skip_newlines_before(&[TokenKind::ElseIf, TokenKind::Else]);
        let alternate = match self.current_kind() {
            TokenKind::ElseIf => {
                let keyword = self.advance();
                let chained = self.nested(|p| p.parse_if(&keyword))?;
                Some(Alternate::ElseIf(Box::new(chained)))
            }
            TokenKind::Else => {
                self.advance();
                Some(Alternate::Else(self.parse_clause_body()?))
            }
            _ => None,
        };

        Ok(IfStatement {
            test,
            consequent,
            alternate,
            location: Location::of(keyword).through(self.previous_span()),
        })
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let test = self.parse_expression()?;
        let body = self.parse_clause_body()?;
        Ok(Statement::While(WhileStatement {
            test,
            body,
            location: Location::of(&keyword).through(self.previous_span()),
        }))
    }

    /// Parses `for test` or `for k [, v] in test`.
    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();

        let mut variables = Vec::new();
        if self.is_at_for_variables() {
            loop {
                variables.push(Identifier::from_token(&self.advance()));
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::In, "Expected 'in' after loop variables")?;
        }

        let test = self.parse_expression()?;
        let body = self.parse_clause_body()?;
        Ok(Statement::For(ForStatement {
            variables,
            test,
            body,
            location: Location::of(&keyword).through(self.previous_span()),
        }))
    }

    /// Returns true at `ident [, ident]* in`.
    fn is_at_for_variables(&self) -> bool {
        let mut offset = 0;
        loop {
            if self.peek_kind_at(offset) != Some(TokenKind::Identifier) {
                return false;
            }
            match self.peek_kind_at(offset + 1) {
                Some(TokenKind::Comma) => offset += 2,
                Some(TokenKind::In) => return true,
                _ => return false,
            }
        }
    }

    /// Parses `loop [test]`; the test is absent before a newline or `{`.
    fn parse_loop(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let test = if self.check(TokenKind::Newline)
            || self.check(TokenKind::LeftBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let body = self.parse_clause_body()?;
        Ok(Statement::Loop(LoopStatement {
            test,
            body,
            location: Location::of(&keyword).through(self.previous_span()),
        }))
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let value = if self.check(TokenKind::Newline)
            || self.check(TokenKind::RightBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        Ok(Statement::Return(ReturnStatement {
            value,
            location: Location::of(&keyword).through(self.previous_span()),
        }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Parses `class Name [extends Base] { ... }`.
    fn parse_class(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let name = self.expect(TokenKind::Identifier, "Expected class name")?;

        let mut superclass = None;
        if self.check(TokenKind::Identifier)
            && self.current_token().text().eq_ignore_ascii_case("extends")
        {
            self.advance();
            let base = self.expect(TokenKind::Identifier, "Expected superclass name")?;
            superclass = Some(EcoString::from(base.text()));
        }

        self.skip_newlines();
        if !self.check(TokenKind::LeftBrace) {
            return Err(self.error("Expected '{' after class declaration"));
        }
        let body = self.parse_braced_block("Expected '}' after class body")?;

        Ok(Statement::Class(ClassDeclaration {
            name: name.text().into(),
            superclass,
            body,
            location: Location::of(&keyword).through(self.previous_span()),
        }))
    }

    /// Returns true at `[static] Name(...)` whose closing parenthesis is
    /// followed, possibly after newlines, by `{`.
    ///
    /// The scan gives up at a newline or brace inside the parentheses, so a
    /// call statement is never mistaken for a declaration.
    pub(super) fn is_at_function_declaration(&self) -> bool {
        let offset = usize::from(self.current_kind() == TokenKind::Static);
        if self.peek_kind_at(offset) != Some(TokenKind::Identifier)
            || self.peek_kind_at(offset + 1) != Some(TokenKind::LeftParen)
        {
            return false;
        }

        let open = self.current + offset + 1;
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind() {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.tokens[index + 1..]
                            .iter()
                            .find(|t| t.kind() != TokenKind::Newline)
                            .is_some_and(|t| t.kind() == TokenKind::LeftBrace);
                    }
                }
                TokenKind::Newline
                | TokenKind::LeftBrace
                | TokenKind::RightBrace
                | TokenKind::Eof => return false,
                _ => {}
            }
        }
        false
    }

    /// Parses `[static] Name(params) { ... }`.
    ///
    /// The declaration is located at its name, not at `static`.
    fn parse_function_declaration(&mut self) -> Result<Statement, ParseError> {
        let is_static = self.match_token(TokenKind::Static);
        let name = self.expect(TokenKind::Identifier, "Expected function name")?;

        self.expect(TokenKind::LeftParen, "Expected '(' after function name")?;
        let params = self.parse_parameters()?;
        self.expect(TokenKind::RightParen, "Expected ')' after parameters")?;

        self.skip_newlines();
        if !self.check(TokenKind::LeftBrace) {
            return Err(self.error("Expected '{' before function body"));
        }
        let body = self.parse_braced_block("Expected '}' after function body")?;

        Ok(Statement::Function(FunctionDeclaration {
            name: name.text().into(),
            params,
            body,
            is_static,
            location: Location::of(&name).through(self.previous_span()),
        }))
    }

    /// Parses a parameter list up to (not including) `)`.
    ///
    /// Accepts `&name`, `name := default`, `name?` and `name*`; only the
    /// names are kept.
    fn parse_parameters(&mut self) -> Result<Vec<EcoString>, ParseError> {
        let mut params = Vec::new();
        if self.check(TokenKind::RightParen) {
            return Ok(params);
        }

        loop {
            self.match_token(TokenKind::Ampersand);
            let name = self.expect(TokenKind::Identifier, "Expected parameter name")?;
            params.push(name.text().into());

            if self.match_token(TokenKind::Assign) {
                self.parse_expression()?;
            } else {
                self.match_token(TokenKind::Multiply);
                self.match_token(TokenKind::Question);
            }

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// Parses `global`/`local`/`static` followed by optional declarations.
    ///
    /// The first declared expression becomes the statement, located at the
    /// keyword. A bare keyword declares nothing.
    fn parse_scope_declaration(&mut self) -> Result<Option<Statement>, ParseError> {
        let keyword = self.advance();
        if self.check(TokenKind::Newline) || self.check(TokenKind::RightBrace) || self.is_at_end()
        {
            return Ok(None);
        }

        let expression = self.parse_expression()?;
        while self.match_token(TokenKind::Comma) {
            self.parse_expression()?;
        }

        Ok(Some(Statement::Expression(ExpressionStatement {
            expression,
            location: Location::of(&keyword).through(self.previous_span()),
        })))
    }

    // ========================================================================
    // Hotkeys, Directives and Expressions
    // ========================================================================

    /// Parses a hotkey and the statements it runs.
    ///
    /// An action on the same line is a single statement. Otherwise the body
    /// is a braced block, or runs to the next block end or hotkey.
    fn parse_hotkey(&mut self) -> Result<Statement, ParseError> {
        let trigger = self.advance();

        let body = if self.check(TokenKind::Newline) || self.is_at_end() {
            self.skip_newlines();
            if self.check(TokenKind::LeftBrace) {
                self.parse_braced_block("Expected '}' after hotkey body")?
            } else {
                self.parse_statements_until(|p| {
                    p.check_block_end() || p.check(TokenKind::Hotkey)
                })
            }
        } else if self.check(TokenKind::LeftBrace) {
            self.parse_braced_block("Expected '}' after hotkey body")?
        } else {
            self.statement().into_iter().collect()
        };

        Ok(Statement::Hotkey(HotkeyStatement {
            trigger: trigger.text().into(),
            body,
            location: Location::of(&trigger).through(self.previous_span()),
        }))
    }

    /// Parses a directive, keeping the rest of the line as raw text.
    ///
    /// Tokens separated in the source are joined with a single space.
    fn parse_directive(&mut self) -> Statement {
        let directive = self.advance();

        let mut value = String::new();
        let mut last_end = None;
        while !self.check(TokenKind::Newline) && !self.is_at_end() {
            let part = self.advance();
            if last_end.is_some_and(|end| end < part.span().start()) {
                value.push(' ');
            }
            value.push_str(part.text());
            last_end = Some(part.span().end());
        }

        Statement::Directive(DirectiveStatement {
            directive: directive.text().into(),
            value: value.trim().into(),
            location: Location::of(&directive).through(self.previous_span()),
        })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let expression = self.parse_expression()?;
        let location = expression.location();
        Ok(Statement::Expression(ExpressionStatement {
            expression,
            location,
        }))
    }
}
