// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: a brace-depth indentation heuristic.
//!
//! Each open `{` expects the following lines four spaces deeper; a line
//! starting with `}` is expected at the outer depth. Lines at depth zero,
//! blank lines and comment lines are never reported. This is a hint, not a
//! formatter: braces inside strings and implicit bodies are not modelled.

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::Position;

const INDENT_WIDTH: u32 = 4;

/// Lint pass that compares each line's indentation to its brace depth.
pub(crate) struct IndentationPass;

impl LintPass for IndentationPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let mut expected: u32 = 0;

        for (number, line) in (1u32..).zip(cx.source.split('\n')) {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }

            let closes_first = trimmed.starts_with('}');
            if closes_first {
                expected = expected.saturating_sub(INDENT_WIDTH);
            }

            let actual = leading_width(line);
            if expected > 0 && actual != expected {
                diagnostics.push(Diagnostic::info(
                    DiagnosticCode::InconsistentIndentation,
                    format!("Expected {expected} spaces, found {actual}"),
                    Range::new(Position::new(number, 1), Position::new(number, actual + 1)),
                ));
            }

            if trimmed.contains('{') {
                expected += INDENT_WIDTH;
            }
            if trimmed.contains('}') && !closes_first {
                expected = expected.saturating_sub(INDENT_WIDTH);
            }
        }
    }
}

/// Width of the leading whitespace, one column per character.
fn leading_width(line: &str) -> u32 {
    let width = line.chars().take_while(|c| c.is_whitespace()).count();
    u32::try_from(width).unwrap_or(u32::MAX)
}
