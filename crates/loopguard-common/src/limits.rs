//! Centralized limits and thresholds.
//!
//! The parser recurses on nested expressions and statements; the binder and
//! the rule walk parent chains. These bounds keep pathological inputs from
//! overflowing the stack or spinning forever.

/// Maximum nesting depth the parser descends into before giving up on a
/// construct and reporting an error.
///
/// ```javascript
/// ((((((((((((((((((((((((((((((( /* ... thousands of levels ... */ x
/// ```
pub const MAX_PARSE_DEPTH: u32 = 1_000;

/// Maximum number of parent links followed when walking up from a node.
///
/// Parent chains are acyclic by construction; the bound only guards against
/// a corrupted arena.
pub const MAX_PARENT_WALK: usize = 10_000;

/// Maximum number of scopes visited while resolving one identifier.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;
