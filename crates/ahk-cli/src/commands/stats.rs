// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ahk stats` - print size and complexity figures for a script.

use ahk_core::queries::statistics::{Statistics, statistics};
use camino::Utf8Path;
use miette::Result;

use super::{OutputFormat, lex_failure, print_json, read_script};

/// Computes statistics for `path`.
pub fn run(path: &Utf8Path, format: OutputFormat) -> Result<()> {
    let source = read_script(path)?;
    let stats = statistics(&source).map_err(|e| lex_failure(e, path, &source))?;

    match format {
        OutputFormat::Text => print!("{}", format_stats(&stats)),
        OutputFormat::Json => print_json(&stats)?,
    }
    Ok(())
}

fn format_stats(stats: &Statistics) -> String {
    format!(
        "lines: {}\ntokens: {}\nfunctions: {}\nclasses: {}\ncomments: {}\ncomplexity: {}\n",
        stats.lines, stats.tokens, stats.functions, stats.classes, stats.comments, stats.complexity
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_figure_per_line() {
        let stats = statistics("Foo() {\n}\n").unwrap();
        let text = format_stats(&stats);
        assert!(text.starts_with("lines: 3\n"));
        assert!(text.contains("functions: 1\n"));
        assert_eq!(text.lines().count(), 6);
    }
}
