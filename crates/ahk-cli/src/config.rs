// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ahk.toml` discovery and parsing.
//!
//! The configuration file is looked up from the script's directory upwards;
//! the nearest one wins. Only the `[lint]` table is read:
//!
//! ```toml
//! [lint]
//! disabled = ["ShortVariableName", "MissingRequires"]
//! ```

use std::fs;

use ahk_core::lint::LintConfig;
use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;

/// File name searched for next to scripts.
pub const CONFIG_FILE: &str = "ahk.toml";

/// The top-level structure of `ahk.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// The `[lint]` table.
    pub lint: LintConfig,
}

/// Parses an `ahk.toml` file.
pub fn parse_manifest(path: &Utf8Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read config '{path}'"))?;

    toml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse config '{path}'"))
}

/// Finds the nearest `ahk.toml` in `start` or one of its ancestors.
pub fn find_config(start: &Utf8Path) -> Option<Utf8PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Builds the lint configuration for `script`: the nearest `ahk.toml`, with
/// `extra_disabled` codes added on top.
pub fn lint_config_for(script: &Utf8Path, extra_disabled: &[String]) -> Result<LintConfig> {
    let dir = script.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut config = match find_config(dir) {
        Some(path) => {
            tracing::debug!(%path, "using config");
            parse_manifest(&path)?.lint
        }
        None => LintConfig::default(),
    };
    for code in extra_disabled {
        config.disable(code.clone());
    }
    Ok(config)
}
