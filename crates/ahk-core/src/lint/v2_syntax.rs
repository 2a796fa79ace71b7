// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: leftovers from AutoHotkey v1.
//!
//! - A script without `#Requires AutoHotkey v2` gets one note on line 1.
//! - `%var%` inside a string is v1 interpolation; v2 uses expressions.

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::{Position, TokenKind};

const REQUIRES_V2: &str = "#Requires AutoHotkey v2";

/// Lint pass for v1 syntax and the `#Requires` directive.
pub(crate) struct V2SyntaxPass;

impl LintPass for V2SyntaxPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let has_content = cx.tokens.iter().any(|t| !t.kind().is_eof());
        if has_content && !cx.source.contains(REQUIRES_V2) {
            diagnostics.push(Diagnostic::info(
                DiagnosticCode::MissingRequires,
                "Consider adding \"#Requires AutoHotkey v2\" at the top of your script",
                Range::at(Position::new(1, 1), 0),
            ));
        }

        for token in cx.tokens {
            if token.kind() == TokenKind::String && token.text().contains('%') {
                diagnostics.push(Diagnostic::warning(
                    DiagnosticCode::OldVariableSyntax,
                    "Use expression syntax instead of % variable references in v2",
                    Range::of_token(token),
                ));
            }
        }
    }
}
