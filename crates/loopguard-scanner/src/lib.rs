//! JavaScript/TypeScript scanner/tokenizer for the loopguard linter.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod scanner_impl;
pub use scanner_impl::{ScanError, ScannerSnapshot, ScannerState};
