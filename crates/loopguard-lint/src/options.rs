//! Rule configuration.

use loopguard_binder::BinderOptions;
use loopguard_common::DiagnosticCategory;
use serde::{Deserialize, Serialize};

/// Severity of a rule, written as `"off" | "warn" | "error"` or `0 | 1 | 2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSeverity", rename_all = "lowercase")]
pub enum RuleSeverity {
    Off,
    Warn,
    #[default]
    Error,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeverity {
    Level(u64),
    Name(String),
}

impl TryFrom<RawSeverity> for RuleSeverity {
    type Error = String;

    fn try_from(raw: RawSeverity) -> Result<Self, String> {
        match raw {
            RawSeverity::Level(0) => Ok(RuleSeverity::Off),
            RawSeverity::Level(1) => Ok(RuleSeverity::Warn),
            RawSeverity::Level(2) => Ok(RuleSeverity::Error),
            RawSeverity::Name(name) => match name.as_str() {
                "off" => Ok(RuleSeverity::Off),
                "warn" => Ok(RuleSeverity::Warn),
                "error" => Ok(RuleSeverity::Error),
                other => Err(format!(
                    "'{other}' is not a valid severity; expected \"off\", \"warn\" or \"error\""
                )),
            },
            RawSeverity::Level(level) => Err(format!(
                "{level} is not a valid severity; expected 0, 1 or 2"
            )),
        }
    }
}

impl RuleSeverity {
    /// Diagnostic category of findings, `None` when the rule is off.
    pub fn category(self) -> Option<DiagnosticCategory> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Warn => Some(DiagnosticCategory::Warning),
            RuleSeverity::Error => Some(DiagnosticCategory::Error),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LintOptions {
    pub no_loop_func: RuleSeverity,
    pub binder: BinderOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_names_and_levels() {
        let parsed: Vec<RuleSeverity> =
            serde_json::from_str(r#"["off", "warn", "error", 0, 1, 2]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                RuleSeverity::Off,
                RuleSeverity::Warn,
                RuleSeverity::Error,
                RuleSeverity::Off,
                RuleSeverity::Warn,
                RuleSeverity::Error,
            ]
        );
    }

    #[test]
    fn test_severity_rejects_unknown_values() {
        let err = serde_json::from_str::<RuleSeverity>(r#""fatal""#).unwrap_err();
        assert!(err.to_string().contains("not a valid severity"));
        assert!(serde_json::from_str::<RuleSeverity>("3").is_err());
    }

    #[test]
    fn test_severity_category() {
        assert_eq!(RuleSeverity::Off.category(), None);
        assert_eq!(RuleSeverity::Warn.category(), Some(DiagnosticCategory::Warning));
        assert_eq!(RuleSeverity::default(), RuleSeverity::Error);
    }
}
