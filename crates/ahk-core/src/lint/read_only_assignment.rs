// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: flag assignments to read-only built-in variables.
//!
//! ```text
//! A_ScriptDir := "C:\"   ; error
//! ```

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::TokenKind;

/// Built-in variables scripts cannot assign.
const READ_ONLY_VARIABLES: &[&str] = &[
    "A_ScriptName",
    "A_ScriptDir",
    "A_WorkingDir",
    "A_ComputerName",
    "A_UserName",
    "A_Now",
    "A_TickCount",
    "A_ScreenWidth",
    "A_ScreenHeight",
];

/// Lint pass that flags `:=` after a read-only built-in variable.
pub(crate) struct ReadOnlyAssignmentPass;

impl LintPass for ReadOnlyAssignmentPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for (index, token) in cx.tokens.iter().enumerate() {
            if token.kind() != TokenKind::BuiltinVar || !READ_ONLY_VARIABLES.contains(&token.text())
            {
                continue;
            }
            if cx
                .next_on_any_line(index)
                .is_some_and(|next| next.kind() == TokenKind::Assign)
            {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::ReadOnlyAssignment,
                    format!(
                        "Cannot assign to read-only built-in variable: {}",
                        token.text()
                    ),
                    Range::of_token(token),
                ));
            }
        }
    }
}
