// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: warn about loops nested more than three deep.
//!
//! The depth is a token-level approximation: `loop`, `while` and `for` add a
//! level and every `}` removes one, whichever block it closes. A warning is
//! raised at the loop keyword that takes the depth past three.

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::TokenKind;

const MAX_LOOP_DEPTH: usize = 3;

/// Lint pass that approximates loop nesting depth.
pub(crate) struct NestedLoopPass;

impl LintPass for NestedLoopPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let mut depth = 0usize;

        for token in cx.tokens {
            match token.kind() {
                TokenKind::Loop | TokenKind::While | TokenKind::For => {
                    depth += 1;
                    if depth == MAX_LOOP_DEPTH + 1 {
                        diagnostics.push(Diagnostic::warning(
                            DiagnosticCode::DeeplyNestedLoop,
                            "Consider refactoring deeply nested loops for better performance",
                            Range::of_token(token),
                        ));
                    }
                }
                TokenKind::RightBrace => depth = depth.saturating_sub(1),
                _ => {}
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
        lint_code(source, &DiagnosticCode::DeeplyNestedLoop)
    }

    const FOUR_DEEP: &str = "loop 2 {\n    while a {\n        for k in m {\n            loop 3 {\n                n := 1\n            }\n        }\n    }\n}\n";

    #[test]
    fn fourth_loop_is_flagged_at_its_keyword() {
        let diags = lint(FOUR_DEEP);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range, Range::at(Position::new(4, 13), 4));
    }

    #[test]
    fn three_levels_are_fine() {
        let source = "loop 2 {\n    while a {\n        for k in m {\n            n := 1\n        }\n    }\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn sibling_loops_do_not_accumulate() {
        let source = "loop 2 {\n}\nloop 2 {\n}\nloop 2 {\n}\nloop 2 {\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn reported_once_per_excursion() {
        let source = format!("{FOUR_DEEP}{FOUR_DEEP}");
        assert_eq!(lint(&source).len(), 2);
    }
}
