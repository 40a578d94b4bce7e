//! JavaScript/TypeScript parser for the loopguard linter.
//!
//! This crate provides the syntax tree the binder and the rule work on:
//! - `NodeArena` - Flat node storage with parent links
//! - `NodeData` - ESTree-shaped node payloads
//! - `ParserState` - Recursive descent parser producing the arena

pub mod parser;
pub use parser::{NodeArena, NodeIndex, ParseDiagnostic, ParserState};
