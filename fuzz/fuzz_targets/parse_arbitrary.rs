// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for analysis crash safety testing.
//!
//! Feeds arbitrary UTF-8 to every phase and asserts that none of them
//! panics. An unterminated string is an expected `Err` from the lexer; the
//! linter must still turn it into a diagnostic.
//!
//! # Success Criteria
//!
//! - Tokenizing, parsing, linting and classifying never panic
//! - Token texts concatenate back to the input whenever lexing succeeds
//! - Linting always returns at least one diagnostic for a lexical failure

#![no_main]

use ahk_core::lint::lint;
use ahk_core::queries::semantic_tokens::classify_tokens;
use ahk_core::source_analysis::{parse_tokens, tokenize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let diagnostics = lint(source);

    match tokenize(source) {
        Ok(tokens) => {
            let rebuilt: String = tokens.iter().map(|t| t.text()).collect();
            assert_eq!(rebuilt, source);
            let _highlights = classify_tokens(&tokens);
            let _output = parse_tokens(tokens);
        }
        Err(_) => assert!(!diagnostics.is_empty()),
    }
});
