// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.
//!
//! Every command reads one script, runs one facade call and prints the
//! result to stdout. Failures are returned as `miette` reports.

pub mod analyze;
pub mod lint;
pub mod parse;
pub mod semantic_tokens;
pub mod stats;
pub mod tokenize;

use std::fs;

use ahk_core::source_analysis::LexError;
use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, NamedSource, Result};
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}': expected 'text' or 'json'"
            )),
        }
    }
}

/// Reads a script from disk.
pub(crate) fn read_script(path: &Utf8Path) -> Result<String> {
    if !path.is_file() {
        miette::bail!("File '{path}' does not exist");
    }
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{path}'"))
}

/// Attaches the script to a lexical error so the report shows where the
/// unterminated string starts.
pub(crate) fn lex_failure(error: LexError, path: &Utf8Path, source: &str) -> miette::Report {
    miette::Report::new(error).with_source_code(NamedSource::new(path.as_str(), source.to_string()))
}

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .into_diagnostic()
        .wrap_err("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
