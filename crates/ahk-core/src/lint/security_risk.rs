// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: built-ins that run programs or change files.

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::TokenKind;

const RISKY_BUILTINS: &[&str] = &["Run", "RunWait", "FileAppend", "FileDelete"];

/// Lint pass that asks for input validation around risky built-ins.
pub(crate) struct SecurityRiskPass;

impl LintPass for SecurityRiskPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for token in cx.tokens {
            if token.kind() == TokenKind::Identifier && RISKY_BUILTINS.contains(&token.text()) {
                diagnostics.push(Diagnostic::warning(
                    DiagnosticCode::PotentialSecurityRisk,
                    format!("Be careful with {} - ensure input is validated", token.text()),
                    Range::of_token(token),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lint::test_support::lint_code;
    use crate::lint::{Diagnostic, DiagnosticCode, Range};
    use crate::source_analysis::Position;

    fn lint(source: &str) -> Vec<Diagnostic> {
        lint_code(source, &DiagnosticCode::PotentialSecurityRisk)
    }

    #[test]
    fn run_is_flagged() {
        let diags = lint("Run(target)");
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "Be careful with Run - ensure input is validated"
        );
        assert_eq!(diags[0].range, Range::at(Position::new(1, 1), 3));
    }

    #[test]
    fn names_must_match_exactly() {
        assert!(lint("Runner(target)\nrun := 1\n").is_empty());
    }
}
