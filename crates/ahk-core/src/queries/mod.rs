// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Queries that editors and reporting tools run over a script.
//!
//! **DDD Context:** Language Service
//!
//! - [`semantic_tokens`] - Per-token highlighting categories
//! - [`statistics`] - Size and complexity figures for a script
//!
//! Like the linter, each query works from source text alone and keeps no
//! state between calls.

pub mod semantic_tokens;
pub mod statistics;
