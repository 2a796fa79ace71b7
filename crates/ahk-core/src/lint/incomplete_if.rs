// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: flag an `if` with nothing after it on its line.

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::TokenKind;

/// Lint pass that flags `if` directly followed by a newline.
pub(crate) struct IncompleteIfPass;

impl LintPass for IncompleteIfPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for pair in cx.tokens.windows(2) {
            if pair[0].kind() == TokenKind::If && pair[1].kind() == TokenKind::Newline {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::IncompleteIfStatement,
                    "Incomplete if statement - missing condition",
                    Range::of_token(&pair[0]),
                ));
            }
        }
    }
}
