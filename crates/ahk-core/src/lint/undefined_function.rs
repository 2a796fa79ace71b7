// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: flag calls to functions that are neither declared nor built in.
//!
//! Names are collected flat from the whole program: a function or class
//! declared anywhere, including inside a class body, counts as declared
//! everywhere. Only direct calls by name are checked, not method calls.

use std::collections::HashSet;

use ecow::EcoString;

use crate::ast::{Expression, Statement};
use crate::ast_walker::{walk_program, walk_statements};
use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};

/// Built-in functions that are always defined.
const BUILTIN_FUNCTIONS: &[&str] = &[
    "MsgBox",
    "Send",
    "Click",
    "Sleep",
    "WinActivate",
    "WinExist",
    "FileRead",
    "FileWrite",
    "StrSplit",
    "StrReplace",
    "SubStr",
    "Array",
    "Map",
    "Object",
    "Gui",
    "ToolTip",
    "SetTimer",
];

/// Lint pass that reports each undefined called name once.
pub(crate) struct UndefinedFunctionPass;

impl LintPass for UndefinedFunctionPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let mut declared = HashSet::new();
        walk_statements(&cx.program.body, &mut |stmt| match stmt {
            Statement::Function(func) => {
                declared.insert(func.name.clone());
            }
            Statement::Class(class) => {
                declared.insert(class.name.clone());
            }
            _ => {}
        });

        let mut called: Vec<EcoString> = Vec::new();
        walk_program(cx.program, &mut |expr| {
            let Expression::Call(call) = expr else {
                return;
            };
            if let Some(name) = call.callee.as_identifier() {
                if !called.iter().any(|c| c.as_str() == name) {
                    called.push(name.into());
                }
            }
        });

        for name in &called {
            let name = name.as_str();
            if declared.contains(name) || BUILTIN_FUNCTIONS.contains(&name) {
                continue;
            }
            // The first token spelling the name; none if it only appears
            // inside a folded hotkey trigger.
            let Some(token) = cx.tokens.iter().find(|t| t.text() == name) else {
                continue;
            };
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::UndefinedFunction,
                format!("Undefined function: {name}"),
                Range::of_token(token),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lint::test_support::lint_code;
    use crate::lint::{Diagnostic, DiagnosticCode, Range};
    use crate::source_analysis::Position;

    fn lint(source: &str) -> Vec<Diagnostic> {
        lint_code(source, &DiagnosticCode::UndefinedFunction)
    }

    #[test]
    fn unknown_call_is_reported_at_first_mention() {
        let diags = lint("Helper()\nHelper()\n");
        assert_eq!(diags.len(), 1, "each name is reported once");
        assert_eq!(diags[0].message, "Undefined function: Helper");
        assert_eq!(diags[0].range, Range::at(Position::new(1, 1), 6));
    }

    #[test]
    fn declared_functions_and_classes_are_defined() {
        let source = "Helper() {\n}\nclass Point {\n}\nHelper()\np := Point()\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn methods_count_as_declared_names() {
        let source = "class A {\n  Run2() {\n  }\n}\nRun2()\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn builtins_are_defined() {
        assert!(lint("MsgBox(\"hi\")\nSleep(10)\n").is_empty());
    }

    #[test]
    fn calls_in_nested_bodies_are_checked() {
        let diags = lint("Foo() {\n  if x\n    Bar(1)\n}\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Undefined function: Bar");
    }

    #[test]
    fn method_calls_are_not_checked() {
        assert!(lint("obj.Unknown()\n").is_empty());
    }

    #[test]
    fn distinct_names_reported_in_call_order() {
        let diags = lint("Zeta(Alpha(1))\nwhile x\n  Zeta(2)\nAlpha(3)\n");
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Undefined function: Zeta", "Undefined function: Alpha"]
        );
    }
}
