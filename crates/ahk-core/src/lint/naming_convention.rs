// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: naming suggestions for identifiers.
//!
//! - Hungarian prefixes (`strName`, `intCount`, `bAr` is fine)
//! - One-letter names other than the usual `i`, `j`, `k`, `x`, `y`, `z`

use crate::lint::{Diagnostic, DiagnosticCode, LintContext, LintPass, Range};
use crate::source_analysis::TokenKind;

/// Type prefixes that mark Hungarian notation when followed by a capital.
const HUNGARIAN_PREFIXES: &[&str] = &["str", "int", "bool", "obj", "arr"];

/// One-letter names that are conventional for counters and coordinates.
const CONVENTIONAL_SHORT_NAMES: &[char] = &['i', 'j', 'k', 'x', 'y', 'z'];

/// Lint pass that checks identifier names.
pub(crate) struct NamingConventionPass;

impl LintPass for NamingConventionPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for token in cx.tokens {
            if token.kind() != TokenKind::Identifier {
                continue;
            }
            let name = token.text();

            if is_hungarian(name) {
                diagnostics.push(Diagnostic::info(
                    DiagnosticCode::HungarianNotation,
                    "Consider avoiding Hungarian notation in favor of descriptive names",
                    Range::of_token(token),
                ));
            }

            if is_short_name(name) {
                diagnostics.push(Diagnostic::info(
                    DiagnosticCode::ShortVariableName,
                    "Consider using more descriptive variable names",
                    Range::at(token.position(), 1),
                ));
            }
        }
    }
}

fn is_hungarian(name: &str) -> bool {
    HUNGARIAN_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    })
}

/// A one-letter name. Punctuation the lexer passes through as a
/// one-character identifier (`!`, `~`, `^`) is not a name.
fn is_short_name(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            c.is_alphabetic() && !CONVENTIONAL_SHORT_NAMES.contains(&c.to_ascii_lowercase())
        }
        _ => false,
    }
}
