// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ahk parse` - print the syntax tree of a script.
//!
//! Exits non-zero when the parser had to skip any statement.

use ahk_core::source_analysis::parse;
use camino::Utf8Path;
use miette::Result;

use super::{OutputFormat, lex_failure, print_json, read_script};

/// Parses `path` and prints the tree and every parse error.
pub fn run(path: &Utf8Path, format: OutputFormat) -> Result<()> {
    let source = read_script(path)?;
    let output = parse(&source).map_err(|e| lex_failure(e, path, &source))?;

    match format {
        OutputFormat::Text => {
            println!("{:#?}", output.program);
            for error in &output.errors {
                println!("{path}:{}: {}", error.position(), error.message);
            }
        }
        OutputFormat::Json => print_json(&output)?,
    }

    if !output.is_clean() {
        let count = output.errors.len();
        let plural = if count == 1 { "" } else { "s" };
        miette::bail!("{count} parse error{plural} in '{path}'");
    }
    Ok(())
}
