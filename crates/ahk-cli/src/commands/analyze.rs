// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ahk analyze` - run every phase and print the combined JSON.
//!
//! A lexical failure is part of the output (`success: false` on the failed
//! phases), so this command only fails on I/O or configuration errors.

use ahk_core::compiler::Compiler;
use camino::Utf8Path;
use miette::Result;

use super::{print_json, read_script};
use crate::config::lint_config_for;

/// Analyzes `path` with the lint configuration that applies to it.
pub fn run(path: &Utf8Path) -> Result<()> {
    let source = read_script(path)?;
    let config = lint_config_for(path, &[])?;
    let analysis = Compiler::new().with_config(config).analyze(&source);
    print_json(&analysis)
}
