// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: flag the first statement after a `return` in the same block.
//!
//! ```text
//! Foo() {
//!     return 1
//!     MsgBox("never")   ; unreachable
//! }
//! ```
//!
//! Only the first unreachable statement of each block is reported.

use crate::ast::Statement;
use crate::ast_walker::for_each_statement_list;
use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};

/// Lint pass that flags code following a `return`.
pub(crate) struct UnreachableCodePass;

impl LintPass for UnreachableCodePass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for_each_statement_list(cx.program, |statements| {
            let unreachable = statements
                .windows(2)
                .find(|pair| matches!(pair[0], Statement::Return(_)))
                .map(|pair| &pair[1]);

            if let Some(stmt) = unreachable {
                diagnostics.push(Diagnostic::warning(
                    DiagnosticCode::UnreachableCode,
                    "Unreachable code after return statement",
                    Range::at(stmt.position(), 1),
                ));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::lint::test_support::lint_code;
    use crate::lint::{Diagnostic, DiagnosticCode};
    use crate::source_analysis::Position;

    fn lint(source: &str) -> Vec<Diagnostic> {
        lint_code(source, &DiagnosticCode::UnreachableCode)
    }

    #[test]
    fn statement_after_return_is_flagged() {
        let diags = lint("Foo() {\n  return 1\n  x := 2\n}\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start, Position::new(3, 3));
        assert_eq!(diags[0].message, "Unreachable code after return statement");
    }

    #[test]
    fn only_first_unreachable_statement_is_reported() {
        let diags = lint("Foo() {\n  return\n  a := 1\n  b := 2\n  return\n  c := 3\n}\n");
        assert_eq!(diags.len(), 1, "one report per block");
    }

    #[test]
    fn final_return_is_fine() {
        assert!(lint("Foo() {\n  x := 1\n  return x\n}\n").is_empty());
    }

    #[test]
    fn each_block_is_checked() {
        let source = "Foo() {\n  if a {\n    return\n    b := 1\n  }\n  return\n  c := 2\n}\n";
        assert_eq!(lint(source).len(), 2);
    }
}
