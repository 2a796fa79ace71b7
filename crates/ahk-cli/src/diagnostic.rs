// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint findings rendered with miette.
//!
//! Converts ahk-core diagnostics into miette reports with:
//! - The script as named source, with the finding's range labelled
//! - The diagnostic code (`UnmatchedBrace`, `standards.naming`, ...)
//! - miette's severity, so warnings and notes render as such

use std::fmt;

use ahk_core::lint::{Diagnostic as CoreDiagnostic, Severity};
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};

/// A lint finding with its source context.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct LintReport {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub src: NamedSource<String>,
    pub span: SourceSpan,
}

impl LintReport {
    /// Creates a report for `diagnostic` found in `source`.
    pub fn from_core_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        let start = diagnostic.range.start.to_byte_offset(source);
        let end = diagnostic.range.end.to_byte_offset(source).max(start);

        Self {
            code: diagnostic.code.to_string(),
            severity: diagnostic.severity,
            message: diagnostic.message.to_string(),
            src: NamedSource::new(source_path, source.to_string()),
            span: (start, end - start).into(),
        }
    }

    fn label(&self) -> &'static str {
        match self.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
            Severity::Info => "note",
        }
    }
}

impl Diagnostic for LintReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label().to_string()),
            self.span,
        ))))
    }
}
