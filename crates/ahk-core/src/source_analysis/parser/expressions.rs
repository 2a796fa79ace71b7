// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for AutoHotkey v2.
//!
//! Assignment is right-recursive; binary operators use precedence climbing
//! over [`binary_binding_power`]; prefix operators, calls and member access
//! sit on top of the primaries.

use crate::ast::{
    AssignmentExpression, AssignmentOperator, BinaryExpression, CallExpression, Expression,
    Identifier, Literal, LiteralValue, Location, MemberExpression, UnaryExpression,
    UnaryOperator,
};
use crate::source_analysis::{ParseError, Token, TokenKind};

use super::{POWER_PRECEDENCE, Parser, binary_binding_power};

impl Parser {
    /// Parses a full expression, including assignment.
    pub(super) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.nested(Self::parse_assignment)
    }

    /// Parses `target := value` or falls through to a binary expression.
    fn parse_assignment(&mut self) -> Result<Expression, ParseError> {
        let left = self.parse_binary(0)?;

        if self.match_token(TokenKind::Assign) {
            let right = self.nested(Self::parse_assignment)?;
            let location = left.location().through(right.span());
            return Ok(Expression::Assignment(AssignmentExpression {
                left: Box::new(left),
                operator: AssignmentOperator::Assign,
                right: Box::new(right),
                location,
            }));
        }

        Ok(left)
    }

    /// Parses binary operators binding at least as tightly as `min_bp`.
    fn parse_binary(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some((bp, operator)) = binary_binding_power(self.current_kind()) {
            if bp.left < min_bp {
                break;
            }
            self.advance();

            let right = self.nested(|p| p.parse_binary(bp.right))?;
            let location = left.location().through(right.span());
            left = Expression::Binary(BinaryExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                location,
            });
        }

        Ok(left)
    }

    /// Parses `not x` and `-x`. The operand may contain `**` but no other
    /// binary operator, so `-2 ** 2` is `-(2 ** 2)`.
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let operator = match self.current_kind() {
            TokenKind::Not => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => return self.parse_postfix(),
        };

        let token = self.advance();
        let argument = self.nested(|p| p.parse_binary(POWER_PRECEDENCE))?;
        let location = Location::of(&token).through(argument.span());
        Ok(Expression::Unary(UnaryExpression {
            operator,
            argument: Box::new(argument),
            location,
        }))
    }

    /// Parses a primary followed by any number of calls and member accesses.
    fn parse_postfix(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_token(TokenKind::Dot) {
                let name = self.expect(TokenKind::Identifier, "Expected property name after '.'")?;
                let location = expr.location().through(name.span());
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    property: Identifier::from_token(&name),
                    location,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses call arguments after `(`.
    fn finish_call(&mut self, callee: Expression) -> Result<Expression, ParseError> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.expect(TokenKind::RightParen, "Expected ')' after arguments")?;
        let location = callee.location().through(paren.span());
        Ok(Expression::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
            location,
        }))
    }

    /// Parses a literal, a name or a parenthesized expression.
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let token = self.current_token().clone();

        let expr = match token.kind() {
            TokenKind::True => literal(&token, LiteralValue::Boolean(true)),
            TokenKind::False => literal(&token, LiteralValue::Boolean(false)),
            TokenKind::Null => literal(&token, LiteralValue::Null),
            TokenKind::Number => literal(&token, LiteralValue::Number(parse_number(token.text()))),
            TokenKind::String => {
                let text = token.text();
                let contents = text
                    .strip_prefix('"')
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(text);
                literal(&token, LiteralValue::String(contents.into()))
            }
            TokenKind::Identifier | TokenKind::BuiltinVar => {
                Expression::Identifier(Identifier::from_token(&token))
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
                return Ok(expr);
            }
            _ => {
                return Err(self.error(format!("Unexpected token: {}", describe(&token))));
            }
        };

        self.advance();
        Ok(expr)
    }
}

fn literal(token: &Token, value: LiteralValue) -> Expression {
    Expression::Literal(Literal {
        value,
        raw: token.text().into(),
        location: Location::of(token),
    })
}

/// Names a token in an error message.
fn describe(token: &Token) -> &str {
    match token.kind() {
        TokenKind::Newline => "end of line",
        TokenKind::Eof => "end of input",
        _ => token.text(),
    }
}

/// Evaluates a number literal. `0x` prefixes are hexadecimal; malformed
/// text evaluates to zero.
fn parse_number(text: &str) -> f64 {
    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return digits
            .chars()
            .try_fold(0.0, |acc, c| c.to_digit(16).map(|d| acc * 16.0 + f64::from(d)))
            .unwrap_or(0.0);
    }
    text.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_evaluate() {
        assert!((parse_number("42") - 42.0).abs() < f64::EPSILON);
        assert!((parse_number("0xFF") - 255.0).abs() < f64::EPSILON);
        assert!((parse_number("1.25") - 1.25).abs() < f64::EPSILON);
        assert!(parse_number("0x").abs() < f64::EPSILON);
        assert!(parse_number("1.2.3").abs() < f64::EPSILON);
    }

    #[test]
    fn unexpected_end_of_line_is_named() {
        let output = crate::source_analysis::parse("x :=\ny := 1").unwrap();
        assert_eq!(output.errors[0].message, "Unexpected token: end of line");
        assert_eq!(output.program.body.len(), 1);
    }

    #[test]
    fn unexpected_end_of_input_is_named() {
        let output = crate::source_analysis::parse("f(").unwrap();
        assert_eq!(output.errors[0].message, "Unexpected token: end of input");
    }
}
