// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Static analysis for AutoHotkey v2 scripts.
//!
//! **DDD Context:** Compilation
//!
//! [`lint`] tokenizes and parses a script, then runs every [`LintPass`] in a
//! fixed order and returns the findings as [`Diagnostic`] values. Nothing in
//! here fails: the only fatal condition, an unterminated string, becomes a
//! single `ParseError` diagnostic.
//!
//! Passes run in four groups, and the order of [`all_passes`] decides the
//! order of the output:
//!
//! 1. **Syntax**: bracket matching, operator sequences, incomplete `if`
//! 2. **Semantic**: undefined functions, unreachable code, duplicate
//!    functions, read-only built-in variables
//! 3. **Style**: naming conventions, indentation
//! 4. **Best practice**: v1 syntax and `#Requires`, nested loops, risky
//!    built-ins
//!
//! Recoverable parse errors are reported ahead of all groups.
//!
//! # Adding a New Lint
//!
//! 1. Create `crates/ahk-core/src/lint/<your_lint>.rs`.
//! 2. Declare `pub(crate) struct YourLintPass;` implementing [`LintPass`].
//! 3. Add `mod your_lint;` below (keep alphabetical).
//! 4. Push `Box::new(your_lint::YourLintPass)` into `all_passes()` at the
//!    end of its group.

mod bracket_matching;
mod duplicate_function;
mod incomplete_if;
mod indentation;
mod naming_convention;
mod nested_loop;
mod read_only_assignment;
mod security_risk;
mod token_sequence;
mod undefined_function;
mod unreachable_code;
mod v2_syntax;
// ── add new lint modules here (alphabetical) ──────────────────────────────


use std::fmt;

use ecow::EcoString;
use serde::{Deserialize, Serialize, Serializer};

use crate::ast::Program;
use crate::source_analysis::{
    LexError, ParseError, Position, Token, TokenKind, parse_tokens, significant_tokens, tokenize,
};

// ============================================================================
// Diagnostics
// ============================================================================

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Invalid code.
    Error,
    /// Probably a mistake.
    Warning,
    /// A style or best-practice suggestion.
    Info,
}

impl Severity {
    /// Returns the lowercase name used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the rule that produced a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// A syntax error found while parsing, or an unterminated string.
    ParseError,
    UnmatchedBrace,
    UnmatchedParen,
    UnmatchedBracket,
    UnclosedBracket,
    InvalidOperatorSequence,
    UseAssignmentOperator,
    IncompleteIfStatement,
    UndefinedFunction,
    UnreachableCode,
    DuplicateFunction,
    ReadOnlyAssignment,
    HungarianNotation,
    ShortVariableName,
    InconsistentIndentation,
    OldVariableSyntax,
    MissingRequires,
    DeeplyNestedLoop,
    PotentialSecurityRisk,
    /// A finding from an external standards engine, e.g. `standards.naming`.
    External(EcoString),
}

impl DiagnosticCode {
    /// Every code produced by the built-in rules.
    pub const BUILTIN: [Self; 19] = [
        Self::ParseError,
        Self::UnmatchedBrace,
        Self::UnmatchedParen,
        Self::UnmatchedBracket,
        Self::UnclosedBracket,
        Self::InvalidOperatorSequence,
        Self::UseAssignmentOperator,
        Self::IncompleteIfStatement,
        Self::UndefinedFunction,
        Self::UnreachableCode,
        Self::DuplicateFunction,
        Self::ReadOnlyAssignment,
        Self::HungarianNotation,
        Self::ShortVariableName,
        Self::InconsistentIndentation,
        Self::OldVariableSyntax,
        Self::MissingRequires,
        Self::DeeplyNestedLoop,
        Self::PotentialSecurityRisk,
    ];

    /// Returns the code's name as it appears in output and configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ParseError => "ParseError",
            Self::UnmatchedBrace => "UnmatchedBrace",
            Self::UnmatchedParen => "UnmatchedParen",
            Self::UnmatchedBracket => "UnmatchedBracket",
            Self::UnclosedBracket => "UnclosedBracket",
            Self::InvalidOperatorSequence => "InvalidOperatorSequence",
            Self::UseAssignmentOperator => "UseAssignmentOperator",
            Self::IncompleteIfStatement => "IncompleteIfStatement",
            Self::UndefinedFunction => "UndefinedFunction",
            Self::UnreachableCode => "UnreachableCode",
            Self::DuplicateFunction => "DuplicateFunction",
            Self::ReadOnlyAssignment => "ReadOnlyAssignment",
            Self::HungarianNotation => "HungarianNotation",
            Self::ShortVariableName => "ShortVariableName",
            Self::InconsistentIndentation => "InconsistentIndentation",
            Self::OldVariableSyntax => "OldVariableSyntax",
            Self::MissingRequires => "MissingRequires",
            Self::DeeplyNestedLoop => "DeeplyNestedLoop",
            Self::PotentialSecurityRisk => "PotentialSecurityRisk",
            Self::External(code) => code,
        }
    }

    /// Looks up a built-in code by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        Self::BUILTIN.into_iter().find(|code| code.as_str() == name)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A source range between two 1-based positions.
///
/// Serialized as `{ "start": [line, column], "end": [line, column] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    #[serde(serialize_with = "serialize_pair")]
    pub start: Position,
    #[serde(serialize_with = "serialize_pair")]
    pub end: Position,
}

fn serialize_pair<S: Serializer>(position: &Position, serializer: S) -> Result<S::Ok, S::Error> {
    (position.line, position.column).serialize(serializer)
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A range starting at `start` and `width` columns wide.
    #[must_use]
    pub const fn at(start: Position, width: u32) -> Self {
        Self::new(start, start.shifted(width))
    }

    /// The range covering a token's text on its first line.
    #[must_use]
    pub fn of_token(token: &Token) -> Self {
        Self::at(token.position(), token.char_len())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    /// The rule that produced it.
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: EcoString,
    pub range: Range,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        code: DiagnosticCode,
        severity: Severity,
        message: impl Into<EcoString>,
        range: Range,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            range,
        }
    }

    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(code: DiagnosticCode, message: impl Into<EcoString>, range: Range) -> Self {
        Self::new(code, Severity::Error, message, range)
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(code: DiagnosticCode, message: impl Into<EcoString>, range: Range) -> Self {
        Self::new(code, Severity::Warning, message, range)
    }

    /// Creates an informational diagnostic.
    #[must_use]
    pub fn info(code: DiagnosticCode, message: impl Into<EcoString>, range: Range) -> Self {
        Self::new(code, Severity::Info, message, range)
    }

    /// Returns true for error-severity diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        Self::error(
            DiagnosticCode::ParseError,
            error.message.clone(),
            Range::at(error.position(), 1),
        )
    }
}

impl From<&LexError> for Diagnostic {
    fn from(error: &LexError) -> Self {
        Self::error(
            DiagnosticCode::ParseError,
            error.to_string(),
            Range::at(error.position(), 1),
        )
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Selects which diagnostics are reported.
///
/// Read from the `[lint]` table of `ahk.toml`:
///
/// ```toml
/// [lint]
/// disabled = ["ShortVariableName", "standards.naming"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Codes whose diagnostics are dropped.
    pub disabled: Vec<String>,
}

impl LintConfig {
    /// Returns true unless `code` is disabled.
    #[must_use]
    pub fn is_enabled(&self, code: &DiagnosticCode) -> bool {
        !self.disabled.iter().any(|d| d == code.as_str())
    }

    /// Disables another code.
    pub fn disable(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.disabled.contains(&code) {
            self.disabled.push(code);
        }
    }
}

// ============================================================================
// Passes
// ============================================================================

/// Width of `text` in columns (Unicode scalar values).
pub(crate) fn text_width(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

/// Everything a lint pass may inspect.
pub(crate) struct LintContext<'a> {
    /// The raw script.
    pub source: &'a str,
    /// Significant tokens (whitespace dropped; comments and newlines kept).
    pub tokens: &'a [Token],
    /// The parsed program, which may be partial.
    pub program: &'a Program,
}

impl LintContext<'_> {
    /// Returns the first token after `index` that is not a newline.
    pub fn next_on_any_line(&self, index: usize) -> Option<&Token> {
        self.tokens[index + 1..]
            .iter()
            .find(|t| t.kind() != TokenKind::Newline)
    }
}

/// A single lint pass.
///
/// Implementors inspect the context and push any [`Diagnostic`]s they find.
pub(crate) trait LintPass {
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>);
}

/// Construct the ordered list of all lint passes.
fn all_passes() -> Vec<Box<dyn LintPass>> {
    vec![
        // Syntax
        Box::new(bracket_matching::BracketMatchingPass),
        Box::new(token_sequence::TokenSequencePass),
        Box::new(incomplete_if::IncompleteIfPass),
        // Semantic
        Box::new(undefined_function::UndefinedFunctionPass),
        Box::new(unreachable_code::UnreachableCodePass),
        Box::new(duplicate_function::DuplicateFunctionPass),
        Box::new(read_only_assignment::ReadOnlyAssignmentPass),
        // Style
        Box::new(naming_convention::NamingConventionPass),
        Box::new(indentation::IndentationPass),
        // Best practice
        Box::new(v2_syntax::V2SyntaxPass),
        Box::new(nested_loop::NestedLoopPass),
        Box::new(security_risk::SecurityRiskPass),
    ]
}

/// Lints a script with every rule enabled.
#[must_use]
pub fn lint(source: &str) -> Vec<Diagnostic> {
    lint_with_config(source, &LintConfig::default())
}

/// Lints a script, dropping diagnostics whose code `config` disables.
#[must_use]
pub fn lint_with_config(source: &str, config: &LintConfig) -> Vec<Diagnostic> {
    let mut diagnostics = run_passes(source);
    let before = diagnostics.len();
    diagnostics.retain(|d| config.is_enabled(&d.code));
    tracing::debug!(
        reported = diagnostics.len(),
        suppressed = before - diagnostics.len(),
        "lint finished"
    );
    diagnostics
}

/// Runs every pass without applying any configuration.
pub(crate) fn run_passes(source: &str) -> Vec<Diagnostic> {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => {
            tracing::debug!(%error, "lint stopped at lexical error");
            return vec![Diagnostic::from(&error)];
        }
    };

    let significant = significant_tokens(&tokens);
    let output = parse_tokens(tokens);
    let mut diagnostics: Vec<Diagnostic> = output.errors.iter().map(Diagnostic::from).collect();

    let cx = LintContext {
        source,
        tokens: &significant,
        program: &output.program,
    };
    for pass in all_passes() {
        pass.check(&cx, &mut diagnostics);
    }
    diagnostics
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_serializes_as_pairs() {
        let range = Range::at(Position::new(2, 5), 3);
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json, serde_json::json!({ "start": [2, 5], "end": [2, 8] }));
    }

    #[test]
    fn diagnostic_serializes_code_and_severity() {
        let diag = Diagnostic::warning(
            DiagnosticCode::UndefinedFunction,
            "Undefined function: Foo",
            Range::at(Position::new(1, 1), 3),
        );
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["code"], "UndefinedFunction");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["message"], "Undefined function: Foo");
    }

    #[test]
    fn builtin_codes_round_trip_by_name() {
        for code in DiagnosticCode::BUILTIN {
            assert_eq!(DiagnosticCode::builtin(code.as_str()), Some(code.clone()));
        }
        assert_eq!(DiagnosticCode::builtin("standards.naming"), None);
    }

    #[test]
    fn unterminated_string_is_a_single_parse_error() {
        let diags = lint("x := \"abc\ny := 1");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::ParseError);
        assert_eq!(diags[0].range.start.line, 2, "reported where input ended");
        assert_eq!(diags[0].message, "Unterminated string at line 2");
    }

    #[test]
    fn parse_errors_come_first() {
        let diags = lint("#Requires AutoHotkey v2\nx := )\n");
        assert_eq!(diags[0].code, DiagnosticCode::ParseError);
        assert_eq!(diags[0].message, "Unexpected token: )");
        assert_eq!(diags[0].range, Range::at(Position::new(2, 6), 1));
    }

    #[test]
    fn malformed_if_still_lints() {
        let diags = lint("if (\nreturn 1");
        assert!(diags.iter().any(|d| d.code == DiagnosticCode::ParseError));
        assert!(diags.iter().any(|d| d.code == DiagnosticCode::UnclosedBracket));
    }

    #[test]
    fn config_disables_codes() {
        let source = "x = 5\n";
        assert!(
            lint(source)
                .iter()
                .any(|d| d.code == DiagnosticCode::UseAssignmentOperator)
        );

        let mut config = LintConfig::default();
        config.disable("UseAssignmentOperator");
        config.disable("UseAssignmentOperator");
        assert_eq!(config.disabled.len(), 1);
        assert!(
            lint_with_config(source, &config)
                .iter()
                .all(|d| d.code != DiagnosticCode::UseAssignmentOperator)
        );
    }

    #[test]
    fn lint_is_idempotent() {
        let source = "Foo(a) {\n  return a\n  b := 1\n}\nBar()\n";
        assert_eq!(lint(source), lint(source));
    }

    #[test]
    fn clean_script_has_no_findings() {
        let source = "#Requires AutoHotkey v2.0\n\nGreet(name) {\n    MsgBox(name)\n}\n\nGreet(\"World\")\n";
        let diags = lint(source);
        assert!(diags.is_empty(), "unexpected: {diags:?}");
    }
}
