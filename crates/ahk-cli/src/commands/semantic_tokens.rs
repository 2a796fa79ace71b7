// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ahk semantic-tokens` - print highlighting categories for a script.

use ahk_core::queries::semantic_tokens::{SemanticToken, semantic_tokens};
use camino::Utf8Path;
use miette::Result;

use super::{OutputFormat, lex_failure, print_json, read_script};

/// Classifies every token of `path`.
pub fn run(path: &Utf8Path, format: OutputFormat) -> Result<()> {
    let source = read_script(path)?;
    let tokens = semantic_tokens(&source).map_err(|e| lex_failure(e, path, &source))?;

    match format {
        OutputFormat::Text => {
            for token in &tokens {
                println!("{}", format_token(token));
            }
        }
        OutputFormat::Json => print_json(&tokens)?,
    }
    Ok(())
}

/// `LINE:CHAR+LEN type [modifiers]`, with the 0-based line.
fn format_token(token: &SemanticToken) -> String {
    let mut line = format!(
        "{}:{}+{} {}",
        token.line,
        token.character,
        token.length,
        token.token_type.as_str()
    );
    if !token.token_modifiers.is_empty() {
        let modifiers: Vec<_> = token.token_modifiers.iter().map(|m| m.as_str()).collect();
        line.push_str(&format!(" [{}]", modifiers.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_type_and_modifiers() {
        let tokens = semantic_tokens("Foo() {\n}\nx := true").unwrap();
        assert_eq!(format_token(&tokens[0]), "0:1+3 function [declaration]");
        let last = tokens.last().unwrap();
        assert_eq!(format_token(last), "2:6+4 keyword [readonly]");
    }
}
