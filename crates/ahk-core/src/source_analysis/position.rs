// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Line/column positions.
//!
//! Lexer and linter positions are 1-based on both axes; columns count
//! characters (Unicode scalar values), not bytes.

use serde::Serialize;

/// A 1-based line/column position in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// Line number (1-based).
    pub line: u32,
    /// Column number (1-based, in characters).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the position `n` columns to the right on the same line.
    #[must_use]
    pub const fn shifted(self, n: u32) -> Self {
        Self {
            line: self.line,
            column: self.column + n,
        }
    }

    /// Converts this position back into a byte offset into `source`.
    ///
    /// Columns past the end of the line clamp to the line end; lines past the
    /// end of the file clamp to `source.len()`.
    #[must_use]
    pub fn to_byte_offset(self, source: &str) -> usize {
        let mut line = 1;
        let mut line_start = 0;
        if self.line > 1 {
            for (i, ch) in source.char_indices() {
                if ch == '\n' {
                    line += 1;
                    if line == self.line {
                        line_start = i + 1;
                        break;
                    }
                }
            }
            if line < self.line {
                return source.len();
            }
        }

        let rest = &source[line_start..];
        let skip = self.column.saturating_sub(1) as usize;
        rest.char_indices()
            .take_while(|&(_, ch)| ch != '\n')
            .nth(skip)
            .map_or_else(
                || line_start + rest.find('\n').unwrap_or(rest.len()),
                |(i, _)| line_start + i,
            )
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
