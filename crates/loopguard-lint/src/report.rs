//! Findings and their messages.

use loopguard_common::{Diagnostic, DiagnosticCategory, format_message};
use loopguard_parser::NodeIndex;
use serde::Serialize;

/// Rule id carried by every diagnostic this crate produces.
pub const RULE_NAME: &str = "no-loop-func";

const UNSAFE_REFS_TEMPLATE: &str =
    "Function declared in a loop contains unsafe references to variable(s) {0}.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    UnsafeRefs,
}

impl MessageId {
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageId::UnsafeRefs => "unsafeRefs",
        }
    }

    pub const fn template(self) -> &'static str {
        match self {
            MessageId::UnsafeRefs => UNSAFE_REFS_TEMPLATE,
        }
    }
}

/// A closure inside a loop that captures at least one unsafe binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopFuncFinding {
    pub node: NodeIndex,
    /// ESTree type of the closure (`FunctionExpression`, ...)
    pub node_kind: &'static str,
    pub message_id: MessageId,
    /// Unsafe names in first-capture order, without duplicates
    pub variable_names: Vec<String>,
    pub pos: u32,
    pub end: u32,
}

impl LoopFuncFinding {
    /// `'a', 'b'`
    pub fn quoted_names(&self) -> String {
        let quoted: Vec<String> = self
            .variable_names
            .iter()
            .map(|name| format!("'{name}'"))
            .collect();
        quoted.join(", ")
    }

    pub fn message(&self) -> String {
        format_message(self.message_id.template(), &[&self.quoted_names()])
    }

    pub fn to_diagnostic(&self, file: &str, category: DiagnosticCategory) -> Diagnostic {
        Diagnostic::lint(
            RULE_NAME,
            category,
            file.to_string(),
            self.pos,
            self.end.saturating_sub(self.pos),
            self.message(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(names: &[&str]) -> LoopFuncFinding {
        LoopFuncFinding {
            node: NodeIndex(3),
            node_kind: "FunctionExpression",
            message_id: MessageId::UnsafeRefs,
            variable_names: names.iter().map(|name| name.to_string()).collect(),
            pos: 10,
            end: 25,
        }
    }

    #[test]
    fn test_message_lists_names_in_order() {
        assert_eq!(
            finding(&["i", "j"]).message(),
            "Function declared in a loop contains unsafe references to variable(s) 'i', 'j'."
        );
        assert_eq!(finding(&["current"]).quoted_names(), "'current'");
    }

    #[test]
    fn test_to_diagnostic_covers_closure() {
        let diagnostic = finding(&["i"]).to_diagnostic("a.js", DiagnosticCategory::Warning);
        assert_eq!(diagnostic.rule, Some(RULE_NAME));
        assert_eq!(diagnostic.start, 10);
        assert_eq!(diagnostic.length, 15);
        assert_eq!(diagnostic.category, DiagnosticCategory::Warning);
        assert!(!diagnostic.is_error());
    }
}
