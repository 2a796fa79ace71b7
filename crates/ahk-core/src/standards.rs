// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Boundary to an external coding standards engine.
//!
//! **DDD Context:** Compilation
//!
//! A [`StandardsEngine`] checks a script against house rules that live
//! outside this crate. Its [`Violation`]s are converted into ordinary
//! [`Diagnostic`]s with the code `standards.<rule>`, so configuration can
//! disable them like any built-in rule.

use serde::{Deserialize, Serialize};

use crate::lint::{Diagnostic, DiagnosticCode, Range, Severity};
use crate::source_analysis::Position;

/// A rule violation reported by a standards engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule identifier, e.g. `naming`.
    pub rule: String,
    pub message: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
    /// `error`, `warning` or `info`; anything else is treated as a warning.
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// An external rule engine whose findings are merged into lint output.
pub trait StandardsEngine: Send + Sync {
    /// Checks `source` and returns every violation found.
    fn validate_code(&self, source: &str) -> Vec<Violation>;
}

/// Converts a [`Violation`] into a one-column [`Diagnostic`].
#[must_use]
pub fn violation_to_diagnostic(violation: &Violation) -> Diagnostic {
    let severity = match violation.severity.as_str() {
        "error" => Severity::Error,
        "info" => Severity::Info,
        _ => Severity::Warning,
    };
    let message = match &violation.suggestion {
        Some(suggestion) => format!("{} (suggestion: {suggestion})", violation.message),
        None => violation.message.clone(),
    };
    Diagnostic::new(
        DiagnosticCode::External(format!("standards.{}", violation.rule).into()),
        severity,
        message,
        Range::at(Position::new(violation.line, violation.column), 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: &str, suggestion: Option<&str>) -> Violation {
        Violation {
            rule: "naming".to_string(),
            message: "Use PascalCase for functions".to_string(),
            line: 3,
            column: 5,
            severity: severity.to_string(),
            suggestion: suggestion.map(str::to_string),
        }
    }

    #[test]
    fn converts_code_and_range() {
        let diag = violation_to_diagnostic(&violation("error", None));
        assert_eq!(diag.code.as_str(), "standards.naming");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "Use PascalCase for functions");
        assert_eq!(diag.range.start, Position::new(3, 5));
        assert_eq!(diag.range.end, Position::new(3, 6));
    }

    #[test]
    fn maps_severities() {
        let severity = |s| violation_to_diagnostic(&violation(s, None)).severity;
        assert_eq!(severity("warning"), Severity::Warning);
        assert_eq!(severity("info"), Severity::Info);
        assert_eq!(severity("fatal"), Severity::Warning, "unknown maps to warning");
    }

    #[test]
    fn appends_suggestion() {
        let diag = violation_to_diagnostic(&violation("info", Some("rename to DoWork")));
        assert_eq!(
            diag.message,
            "Use PascalCase for functions (suggestion: rename to DoWork)"
        );
    }

    #[test]
    fn deserializes_without_suggestion() {
        let json = r#"{"rule":"r","message":"m","line":1,"column":2,"severity":"info"}"#;
        let parsed: Violation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.suggestion, None);
    }
}
