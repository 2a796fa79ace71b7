// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ahk lint` - run every lint rule on a script.
//!
//! Codes disabled in the nearest `ahk.toml` or with `--disable` are not
//! reported. Exits non-zero if any error-severity diagnostic remains.

use ahk_core::compiler::Compiler;
use ahk_core::lint::Diagnostic;
use camino::Utf8Path;
use miette::Result;

use super::{OutputFormat, read_script};
use crate::config::lint_config_for;
use crate::diagnostic::LintReport;

/// Lints `path` and prints each diagnostic.
pub fn run(path: &Utf8Path, format: OutputFormat, disabled: &[String]) -> Result<()> {
    let source = read_script(path)?;
    let config = lint_config_for(path, disabled)?;
    let compiler = Compiler::new().with_config(config);
    let diagnostics = compiler.lint(&source).data.unwrap_or_default();

    for diag in &diagnostics {
        match format {
            OutputFormat::Text => {
                let report = LintReport::from_core_diagnostic(diag, path.as_str(), &source);
                eprintln!("{:?}", miette::Report::new(report));
            }
            OutputFormat::Json => println!("{}", json_line(path, diag)),
        }
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        let plural = if errors == 1 { "" } else { "s" };
        miette::bail!("{errors} error{plural} found in '{path}'");
    }
    if format == OutputFormat::Text && diagnostics.is_empty() {
        println!("No issues found.");
    }
    Ok(())
}

/// One JSON object per diagnostic, tagged with the file.
fn json_line(path: &Utf8Path, diag: &Diagnostic) -> serde_json::Value {
    serde_json::json!({
        "file": path.as_str(),
        "code": diag.code,
        "severity": diag.severity,
        "message": diag.message.as_str(),
        "range": diag.range,
    })
}
