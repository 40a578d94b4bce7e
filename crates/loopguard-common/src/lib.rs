//! Common types and utilities for the loopguard linter.
//!
//! This crate provides foundational types used across all loopguard crates:
//! - Source spans (`Span`)
//! - Line maps for line/column source locations
//! - Diagnostics and the message table
//! - Limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Line maps for line/column source locations
pub mod position;
pub use position::LineMap;

// Diagnostics shared by the parser, the rule and the CLI reporter
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, format_message,
    get_message_template,
};

// Centralized limits and thresholds
pub mod limits;
