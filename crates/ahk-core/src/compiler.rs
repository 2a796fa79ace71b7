// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Compiler facade.
//!
//! **DDD Context:** Language Service
//!
//! [`Compiler`] is the single entry point tools call through. It performs no
//! analysis of its own: each method runs one phase and wraps the outcome in a
//! [`CompilerResult`], turning the only fatal condition (an unterminated
//! string) into `success = false` instead of an `Err`.
//!
//! A compiler value is immutable once built, so it can be shared between
//! threads.
//!
//! # Usage
//!
//! ```
//! use ahk_core::compiler::Compiler;
//! use ahk_core::lint::LintConfig;
//!
//! let mut config = LintConfig::default();
//! config.disable("MissingRequires");
//! let compiler = Compiler::new().with_config(config);
//!
//! let result = compiler.lint("x := 1\n");
//! assert!(result.success);
//! assert_eq!(result.data.map(|d| d.len()), Some(0));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::lint::{self, Diagnostic, LintConfig, Severity};
use crate::queries::semantic_tokens::{SemanticToken, classify_tokens};
use crate::queries::statistics::{self, Statistics};
use crate::source_analysis::{LexError, ParseOutput, Token, parse_tokens, tokenize};
use crate::standards::{StandardsEngine, violation_to_diagnostic};

/// A failure reported by a facade call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl From<&LexError> for CompilerError {
    fn from(error: &LexError) -> Self {
        Self {
            message: error.to_string(),
            line: error.line,
            column: error.column,
        }
    }
}

/// The outcome of one facade call.
///
/// `data` is present exactly when `success` is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilerResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub errors: Vec<CompilerError>,
}

impl<T> CompilerResult<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    fn failed(error: &LexError) -> Self {
        Self {
            success: false,
            data: None,
            errors: vec![CompilerError::from(error)],
        }
    }
}

impl<T> From<Result<T, LexError>> for CompilerResult<T> {
    fn from(result: Result<T, LexError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failed(&error),
        }
    }
}

/// Every artifact for one script.
///
/// Each phase succeeds or fails on its own: a lexical failure empties
/// `tokens`, `ast` and `semantic_tokens`, but `diagnostics` still reports it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub tokens: CompilerResult<Vec<Token>>,
    pub ast: CompilerResult<ParseOutput>,
    pub diagnostics: CompilerResult<Vec<Diagnostic>>,
    pub semantic_tokens: CompilerResult<Vec<SemanticToken>>,
}

/// Entry point for tokenizing, parsing, linting and classifying scripts.
#[derive(Clone, Default)]
pub struct Compiler {
    config: LintConfig,
    standards: Option<Arc<dyn StandardsEngine>>,
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("config", &self.config)
            .field("standards", &self.standards.is_some())
            .finish()
    }
}

impl Compiler {
    /// Creates a compiler with every rule enabled and no standards engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the lint configuration.
    #[must_use]
    pub fn with_config(mut self, config: LintConfig) -> Self {
        self.config = config;
        self
    }

    /// Merges the violations of `engine` into lint output.
    #[must_use]
    pub fn with_standards(mut self, engine: impl StandardsEngine + 'static) -> Self {
        self.standards = Some(Arc::new(engine));
        self
    }

    /// Returns the lint configuration.
    #[must_use]
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Tokenizes `source`, whitespace included.
    #[must_use]
    pub fn tokenize(&self, source: &str) -> CompilerResult<Vec<Token>> {
        let result = tokenize(source);
        tracing::debug!(ok = result.is_ok(), "tokenize");
        result.into()
    }

    /// Parses `source`. Syntax errors are part of the data, not failures.
    #[must_use]
    pub fn parse(&self, source: &str) -> CompilerResult<ParseOutput> {
        let result = tokenize(source).map(parse_tokens);
        if let Ok(output) = &result {
            tracing::debug!(
                statements = output.program.body.len(),
                errors = output.errors.len(),
                "parse"
            );
        }
        result.into()
    }

    /// Lints `source`. Always succeeds; a lexical failure is reported as a
    /// diagnostic.
    #[must_use]
    pub fn lint(&self, source: &str) -> CompilerResult<Vec<Diagnostic>> {
        CompilerResult::ok(self.diagnostics(source))
    }

    /// Classifies every token of `source` for highlighting.
    #[must_use]
    pub fn semantic_tokens(&self, source: &str) -> CompilerResult<Vec<SemanticToken>> {
        tokenize(source).map(|tokens| classify_tokens(&tokens)).into()
    }

    /// Runs every phase.
    #[must_use]
    pub fn analyze(&self, source: &str) -> Analysis {
        let diagnostics = self.lint(source);
        match tokenize(source) {
            Ok(tokens) => {
                let semantic_tokens = classify_tokens(&tokens);
                let ast = parse_tokens(tokens.clone());
                tracing::debug!(
                    tokens = tokens.len(),
                    statements = ast.program.body.len(),
                    semantic_tokens = semantic_tokens.len(),
                    "analyze"
                );
                Analysis {
                    tokens: CompilerResult::ok(tokens),
                    ast: CompilerResult::ok(ast),
                    diagnostics,
                    semantic_tokens: CompilerResult::ok(semantic_tokens),
                }
            }
            Err(error) => {
                tracing::debug!(%error, "analyze stopped at lexical error");
                Analysis {
                    tokens: CompilerResult::failed(&error),
                    ast: CompilerResult::failed(&error),
                    diagnostics,
                    semantic_tokens: CompilerResult::failed(&error),
                }
            }
        }
    }

    /// Computes size and complexity figures.
    #[must_use]
    pub fn statistics(&self, source: &str) -> CompilerResult<Statistics> {
        statistics::statistics(source).into()
    }

    /// Returns true when `source` lexes and lints without error-severity
    /// diagnostics.
    #[must_use]
    pub fn validate(&self, source: &str) -> bool {
        tokenize(source).is_ok() && !self.diagnostics(source).iter().any(Diagnostic::is_error)
    }

    fn diagnostics(&self, source: &str) -> Vec<Diagnostic> {
        let mut diagnostics = lint::run_passes(source);
        if let Some(engine) = &self.standards {
            let violations = engine.validate_code(source);
            tracing::debug!(count = violations.len(), "standards violations");
            diagnostics.extend(violations.iter().map(violation_to_diagnostic));
        }
        diagnostics.retain(|d| self.config.is_enabled(&d.code));
        tracing::debug!(count = diagnostics.len(), "lint");
        diagnostics
    }
}

/// Runs every phase with the default configuration.
#[must_use]
pub fn analyze(source: &str) -> Analysis {
    Compiler::new().analyze(source)
}

/// Checks `source` with the default configuration.
#[must_use]
pub fn validate(source: &str) -> bool {
    Compiler::new().validate(source)
}

/// Renders diagnostics as a plain-text report grouped by severity.
#[must_use]
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "No issues found.".to_string();
    }

    let mut output = format!("Found {} issue(s):\n", diagnostics.len());
    for (severity, heading) in [
        (Severity::Error, "Errors"),
        (Severity::Warning, "Warnings"),
        (Severity::Info, "Info"),
    ] {
        let group: Vec<_> = diagnostics.iter().filter(|d| d.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        output.push_str(&format!("\n{heading} ({}):\n", group.len()));
        for (i, diag) in group.iter().enumerate() {
            output.push_str(&format!(
                "{}. Line {}, Col {}: {}\n",
                i + 1,
                diag.range.start.line,
                diag.range.start.column,
                diag.message
            ));
        }
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{DiagnosticCode, Range};
    use crate::source_analysis::Position;
    use crate::standards::Violation;

    struct FixedEngine;

    impl StandardsEngine for FixedEngine {
        fn validate_code(&self, _source: &str) -> Vec<Violation> {
            vec![Violation {
                rule: "naming".to_string(),
                message: "bad name".to_string(),
                line: 1,
                column: 1,
                severity: "error".to_string(),
                suggestion: None,
            }]
        }
    }

    const CLEAN: &str = "#Requires AutoHotkey v2.0\nx := 1\n";

    #[test]
    fn compiler_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compiler>();
    }

    #[test]
    fn lexical_failure_is_unsuccessful() {
        let result = Compiler::new().tokenize("x := \"open\n");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].line, 2);
        assert_eq!(result.errors[0].message, "Unterminated string at line 2");
    }

    #[test]
    fn parse_errors_are_data() {
        let result = Compiler::new().parse("x :=\n");
        assert!(result.success);
        assert_eq!(result.data.map(|o| o.errors.len()), Some(1));
    }

    #[test]
    fn lint_always_succeeds() {
        let result = Compiler::new().lint("x := \"open");
        assert!(result.success);
        let diags = result.data.unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::ParseError);
    }

    #[test]
    fn analyze_keeps_lint_after_lexical_failure() {
        let analysis = analyze("x := \"open");
        assert!(!analysis.tokens.success);
        assert!(!analysis.ast.success);
        assert!(!analysis.semantic_tokens.success);
        assert!(analysis.diagnostics.success);
    }

    #[test]
    fn analyze_runs_every_phase() {
        let analysis = analyze(CLEAN);
        assert!(analysis.tokens.success && analysis.ast.success);
        assert_eq!(analysis.diagnostics.data, Some(Vec::new()));
        assert!(!analysis.semantic_tokens.data.unwrap_or_default().is_empty());
    }

    #[test]
    fn standards_are_merged_and_configurable() {
        let compiler = Compiler::new().with_standards(FixedEngine);
        let diags = compiler.lint(CLEAN).data.unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.as_str(), "standards.naming");
        assert!(!compiler.validate(CLEAN));

        let mut config = LintConfig::default();
        config.disable("standards.naming");
        let compiler = compiler.with_config(config);
        assert!(compiler.lint(CLEAN).data.unwrap().is_empty());
        assert!(compiler.validate(CLEAN));
    }

    #[test]
    fn validate_rejects_error_diagnostics() {
        assert!(validate(CLEAN));
        assert!(!validate("#Requires AutoHotkey v2.0\nx := (1\n"));
        assert!(!validate("x := \"open"));
    }

    #[test]
    fn warnings_do_not_fail_validation() {
        assert!(validate("#Requires AutoHotkey v2.0\nx = 1\n"));
    }

    #[test]
    fn format_empty() {
        assert_eq!(format_diagnostics(&[]), "No issues found.");
    }

    #[test]
    fn format_groups_by_severity() {
        let diags = vec![
            Diagnostic::warning(
                DiagnosticCode::UseAssignmentOperator,
                "use :=",
                Range::at(Position::new(2, 3), 1),
            ),
            Diagnostic::error(
                DiagnosticCode::UnmatchedBrace,
                "Unmatched closing brace",
                Range::at(Position::new(4, 1), 1),
            ),
            Diagnostic::warning(
                DiagnosticCode::ShortVariableName,
                "short",
                Range::at(Position::new(5, 1), 1),
            ),
        ];
        assert_eq!(
            format_diagnostics(&diags),
            "Found 3 issue(s):\n\
             \n\
             Errors (1):\n\
             1. Line 4, Col 1: Unmatched closing brace\n\
             \n\
             Warnings (2):\n\
             1. Line 2, Col 3: use :=\n\
             2. Line 5, Col 1: short"
        );
    }

    #[test]
    fn statistics_through_facade() {
        let result = Compiler::new().statistics(CLEAN);
        assert!(result.success);
        assert_eq!(result.data.map(|s| s.lines), Some(3));
    }

    #[test]
    fn result_json_omits_missing_data() {
        let json = serde_json::to_value(Compiler::new().tokenize("\"")).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["errors"][0]["line"], 1);
    }
}
