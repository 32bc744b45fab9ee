// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured-logging hooks for effects

/// Gives an effect a stable name and loggable fields for tracing spans.
pub trait TracedEffect {
    fn name(&self) -> &'static str;
    fn fields(&self) -> Vec<(&'static str, String)>;
}
