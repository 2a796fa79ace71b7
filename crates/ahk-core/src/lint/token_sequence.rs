// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: check adjacent tokens for invalid operator pairs and for `=` used
//! as assignment.
//!
//! Two operators in a row are an error unless together they spell one of
//! `:=`, `>=`, `<=`, `!=`, `==`, `**`, `!~` or `~=`. In v2 `=` compares, so
//! a name followed directly by `=` is probably a v1-style assignment:
//!
//! ```text
//! x = 5       ; warning, use `x := 5`
//! ```

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::{Token, TokenKind};

/// Operator pairs that read as one operator.
const VALID_SEQUENCES: &[&str] = &[":=", ">=", "<=", "!=", "==", "**", "!~", "~="];

/// Lint pass over pairs of adjacent significant tokens.
pub(crate) struct TokenSequencePass;

impl LintPass for TokenSequencePass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for pair in cx.tokens.windows(2) {
            let [current, next] = pair else {
                continue;
            };

            if is_sequence_operator(current) && is_sequence_operator(next) {
                let sequence = format!("{}{}", current.text(), next.text());
                if !VALID_SEQUENCES.contains(&sequence.as_str()) {
                    diagnostics.push(Diagnostic::error(
                        DiagnosticCode::InvalidOperatorSequence,
                        format!("Invalid operator sequence: {sequence}"),
                        Range::new(current.position(), Range::of_token(next).end),
                    ));
                }
            }

            if current.kind() == TokenKind::Identifier && next.kind() == TokenKind::Equals {
                diagnostics.push(Diagnostic::warning(
                    DiagnosticCode::UseAssignmentOperator,
                    "Use \":=\" for assignment in AutoHotkey v2, \"=\" is for comparison",
                    Range::at(next.position(), 1),
                ));
            }
        }
    }
}

fn is_sequence_operator(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Multiply
            | TokenKind::Divide
            | TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEqual
            | TokenKind::GreaterEqual
            | TokenKind::Assign
    )
}
