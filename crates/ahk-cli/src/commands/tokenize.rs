// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ahk tokenize` - print the token stream of a script.

use ahk_core::compiler::Compiler;
use ahk_core::source_analysis::Token;
use camino::Utf8Path;
use miette::Result;

use super::{OutputFormat, lex_failure, print_json, read_script};

/// Tokenizes `path` and prints one token per line, or a JSON array.
pub fn run(path: &Utf8Path, format: OutputFormat) -> Result<()> {
    let source = read_script(path)?;
    let tokens = ahk_core::source_analysis::tokenize(&source)
        .map_err(|e| lex_failure(e, path, &source))?;
    tracing::debug!(count = tokens.len(), %path, "tokenized");

    match format {
        OutputFormat::Text => {
            for token in &tokens {
                println!("{}", format_token(token));
            }
        }
        OutputFormat::Json => print_json(&Compiler::new().tokenize(&source))?,
    }
    Ok(())
}

/// `LINE:COL KIND text`, with the text escaped.
fn format_token(token: &Token) -> String {
    format!("{} {} {:?}", token.position(), token.kind(), token.text())
}
