// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: flag top-level functions declared more than once.
//!
//! Names are compared case-sensitively, and every declaration of a repeated
//! name is reported.

use std::collections::HashMap;

use crate::ast::Statement;
use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range, text_width};

/// Lint pass that flags duplicate top-level function declarations.
pub(crate) struct DuplicateFunctionPass;

impl LintPass for DuplicateFunctionPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let functions: Vec<_> = cx
            .program
            .body
            .iter()
            .filter_map(|stmt| match stmt {
                Statement::Function(func) => Some(func),
                _ => None,
            })
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for func in &functions {
            *counts.entry(func.name.as_str()).or_default() += 1;
        }

        for func in functions {
            if counts.get(func.name.as_str()).copied().unwrap_or(0) > 1 {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::DuplicateFunction,
                    format!("Duplicate function declaration: {}", func.name),
                    Range::at(func.location.position, text_width(&func.name)),
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
        lint_code(source, &DiagnosticCode::DuplicateFunction)
    }

    #[test]
    fn every_duplicate_declaration_is_flagged() {
        let diags = lint("Foo() {\n}\nBar() {\n}\nFoo() {\n}\n");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].message, "Duplicate function declaration: Foo");
        assert_eq!(diags[0].range, Range::at(Position::new(1, 1), 3));
        assert_eq!(diags[1].range.start, Position::new(5, 1));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(lint("Foo() {\n}\nfoo() {\n}\n").is_empty());
    }

    #[test]
    fn methods_are_not_top_level() {
        assert!(lint("Foo() {\n}\nclass A {\n  Foo() {\n  }\n}\n").is_empty());
    }
}
