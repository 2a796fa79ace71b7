// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: flag unmatched closing brackets and unclosed opening ones.
//!
//! A closer that does not match the innermost open bracket is reported as
//! unmatched, whatever kind that open bracket is:
//!
//! ```text
//! (a + b}     ; `}` is an unmatched closing brace, `(` is unclosed
//! ```

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::{Token, TokenKind};

/// Lint pass that checks bracket nesting.
pub(crate) struct BracketMatchingPass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Brace,
    Paren,
    Square,
}

impl Bracket {
    fn name(self) -> &'static str {
        match self {
            Self::Brace => "brace",
            Self::Paren => "parenthesis",
            Self::Square => "bracket",
        }
    }

    fn unmatched_code(self) -> DiagnosticCode {
        match self {
            Self::Brace => DiagnosticCode::UnmatchedBrace,
            Self::Paren => DiagnosticCode::UnmatchedParen,
            Self::Square => DiagnosticCode::UnmatchedBracket,
        }
    }
}

impl LintPass for BracketMatchingPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let mut open: Vec<(Bracket, &Token)> = Vec::new();

        for token in cx.tokens {
            let (bracket, is_opener) = match token.kind() {
                TokenKind::LeftBrace => (Bracket::Brace, true),
                TokenKind::RightBrace => (Bracket::Brace, false),
                TokenKind::LeftParen => (Bracket::Paren, true),
                TokenKind::RightParen => (Bracket::Paren, false),
                TokenKind::LeftBracket => (Bracket::Square, true),
                TokenKind::RightBracket => (Bracket::Square, false),
                _ => continue,
            };

            if is_opener {
                open.push((bracket, token));
            } else if open.last().is_some_and(|(top, _)| *top == bracket) {
                open.pop();
            } else {
                diagnostics.push(Diagnostic::error(
                    bracket.unmatched_code(),
                    format!("Unmatched closing {}", bracket.name()),
                    Range::at(token.position(), 1),
                ));
            }
        }

        for (bracket, token) in open {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::UnclosedBracket,
                format!("Unclosed {}", bracket.name()),
                Range::at(token.position(), 1),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lint::{Diagnostic, DiagnosticCode, lint as lint_all};
    use crate::source_analysis::Position;

    fn lint(source: &str) -> Vec<Diagnostic> {
        lint_all(source)
            .into_iter()
            .filter(|d| {
                matches!(
                    d.code,
                    DiagnosticCode::UnmatchedBrace
                        | DiagnosticCode::UnmatchedParen
                        | DiagnosticCode::UnmatchedBracket
                        | DiagnosticCode::UnclosedBracket
                )
            })
            .collect()
    }

    #[test]
    fn unclosed_brace_is_reported_once() {
        let diags = lint("{{}");
        assert_eq!(diags.len(), 1, "got {diags:?}");
        assert_eq!(diags[0].code, DiagnosticCode::UnclosedBracket);
        assert_eq!(diags[0].message, "Unclosed brace");
        assert_eq!(diags[0].range.start, Position::new(1, 1));
    }

    #[test]
    fn stray_closing_brace_is_unmatched() {
        let diags = lint("}");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::UnmatchedBrace);
        assert_eq!(diags[0].message, "Unmatched closing brace");
    }

    #[test]
    fn wrong_closer_is_unmatched_not_mismatched() {
        let diags = lint("x := (1 + 2}");
        let codes: Vec<_> = diags.iter().map(|d| d.code.clone()).collect();
        assert_eq!(
            codes,
            vec![DiagnosticCode::UnmatchedBrace, DiagnosticCode::UnclosedBracket]
        );
        assert_eq!(diags[1].message, "Unclosed parenthesis");
    }

    #[test]
    fn square_brackets_are_tracked() {
        let diags = lint("arr := [1, 2]]");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::UnmatchedBracket);
        assert_eq!(diags[0].message, "Unmatched closing bracket");
        assert_eq!(diags[0].range.start, Position::new(1, 14));
    }

    #[test]
    fn balanced_input_is_clean() {
        assert!(lint("Foo(a) {\n  return [a, (a + 1)]\n}\n").is_empty());
    }

    #[test]
    fn brackets_inside_strings_and_comments_are_ignored() {
        assert!(lint("MsgBox(\"(\") ; )\n").is_empty());
    }
}
