// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! AutoHotkey v2 analysis core.
//!
//! This crate contains the front end of an AutoHotkey v2 toolchain:
//! - Lexical analysis (tokenization, hotkey folding)
//! - Parsing (AST construction with error recovery)
//! - Linting (a catalog of syntax, semantic, style and best-practice rules)
//! - Semantic tokens and statistics for editors and reports
//!
//! Everything here is a pure function of the source text: no I/O, no
//! shared state. A script with syntax errors still yields tokens, a partial
//! AST, diagnostics and highlighting; only an unterminated string stops
//! tokenization.
//!
//! ```
//! use ahk_core::compiler::Compiler;
//!
//! let analysis = Compiler::new().analyze("#Requires AutoHotkey v2.0\nMsgBox(\"hi\")\n");
//! assert!(analysis.ast.success);
//! assert_eq!(analysis.diagnostics.data.map(|d| d.len()), Some(0));
//! ```

pub mod ast;
pub(crate) mod ast_walker;
pub mod compiler;
pub mod lint;
pub mod queries;
pub mod source_analysis;
pub mod standards;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Expression, Program, Statement};
    pub use crate::compiler::{Analysis, Compiler, CompilerResult, format_diagnostics};
    pub use crate::lint::{Diagnostic, DiagnosticCode, LintConfig, Range, Severity};
    pub use crate::queries::semantic_tokens::SemanticToken;
    pub use crate::queries::statistics::Statistics;
    pub use crate::source_analysis::{LexError, ParseError, Position, Span, Token, TokenKind};
}
