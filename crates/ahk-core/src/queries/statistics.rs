// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Size and complexity figures for a script.
//!
//! The complexity score starts at 1 and adds, for every statement at any
//! depth:
//!
//! | Statement | Weight |
//! |-----------|--------|
//! | `if` (each `elseif` counts again), `while`, `for`, `loop`, `class` | 2 |
//! | function declaration | 1 |
//! | anything else | 0.5 |
//!
//! The total is rounded half away from zero.

use serde::Serialize;

use crate::ast::{Program, Statement};
use crate::ast_walker::{if_chain, walk_statements};
use crate::source_analysis::{LexError, TokenKind, parse_tokens, significant_tokens, tokenize};

/// Aggregate figures for one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    /// Number of `\n`-separated lines.
    pub lines: usize,
    /// Significant tokens, end of input included.
    pub tokens: usize,
    /// Function declarations at any depth.
    pub functions: usize,
    /// Class declarations at any depth.
    pub classes: usize,
    pub comments: usize,
    pub complexity: u32,
}

/// Computes [`Statistics`] for `source`.
///
/// # Errors
///
/// Returns a [`LexError`] if the source contains an unterminated string.
pub fn statistics(source: &str) -> Result<Statistics, LexError> {
    let tokens = tokenize(source)?;
    let significant = significant_tokens(&tokens);
    let output = parse_tokens(tokens);

    let mut stats = Statistics {
        lines: source.split('\n').count(),
        tokens: significant.len(),
        comments: significant
            .iter()
            .filter(|t| t.kind() == TokenKind::Comment)
            .count(),
        complexity: complexity(&output.program),
        ..Statistics::default()
    };
    walk_statements(&output.program.body, &mut |stmt| match stmt {
        Statement::Function(_) => stats.functions += 1,
        Statement::Class(_) => stats.classes += 1,
        _ => {}
    });
    Ok(stats)
}

/// Complexity in half points, so the 0.5 weight stays integral.
fn complexity(program: &Program) -> u32 {
    let mut halves: u32 = 2;
    walk_statements(&program.body, &mut |stmt| {
        halves += match stmt {
            Statement::If(if_stmt) => {
                let links = u32::try_from(if_chain(if_stmt).len()).unwrap_or(u32::MAX);
                links.saturating_mul(4)
            }
            Statement::While(_) | Statement::For(_) | Statement::Loop(_) | Statement::Class(_) => 4,
            Statement::Function(_) => 2,
            _ => 1,
        };
    });
    // Positive, so rounding half up is rounding away from zero.
    halves.div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(source: &str) -> Statistics {
        statistics(source).unwrap()
    }

    #[test]
    fn empty_script() {
        let s = stats("");
        assert_eq!(s.lines, 1);
        assert_eq!(s.tokens, 1, "only end of input");
        assert_eq!(s.complexity, 1);
    }

    #[test]
    fn counts_lines_tokens_and_comments() {
        let s = stats("; setup\nx := 1\n");
        assert_eq!(s.lines, 3);
        // comment, newline, x, :=, 1, newline, eof
        assert_eq!(s.tokens, 7);
        assert_eq!(s.comments, 1);
    }

    #[test]
    fn declarations_at_any_depth() {
        let source = "class A {\n    Run() {\n    }\n}\nTop() {\n}\n";
        let s = stats(source);
        assert_eq!(s.classes, 1);
        assert_eq!(s.functions, 2);
        // 1 + class 2 + two functions 1 each
        assert_eq!(s.complexity, 5);
    }

    #[test]
    fn half_points_round_away_from_zero() {
        // 1 + 0.5 = 1.5 -> 2
        assert_eq!(stats("x := 1").complexity, 2);
        // 1 + 1.0 = 2
        assert_eq!(stats("x := 1\ny := 2").complexity, 2);
        // 1 + 1.5 = 2.5 -> 3
        assert_eq!(stats("x := 1\ny := 2\nz := 3").complexity, 3);
    }

    #[test]
    fn elseif_links_count_as_branches() {
        let source = "if a {\n    x := 1\n} elseif b {\n    x := 2\n} else {\n    x := 3\n}\n";
        // 1 + if 2 + elseif 2 + three assignments 1.5 = 6.5 -> 7
        assert_eq!(stats(source).complexity, 7);
    }

    #[test]
    fn loops_weigh_two() {
        let source = "loop 3 {\n    while a {\n        break\n    }\n}\n";
        // 1 + 2 + 2 + 0.5 = 5.5 -> 6
        assert_eq!(stats(source).complexity, 6);
    }

    #[test]
    fn lexical_failure_is_an_error() {
        assert!(statistics("x := \"open").is_err());
    }
}
