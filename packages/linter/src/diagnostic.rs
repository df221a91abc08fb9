use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic. Lint findings never block adoption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Warning,
    Info,
}

/// Advisory finding about an outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// The rule that generated this diagnostic
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// Dotted numbering of the section involved; empty for outline-wide findings
    pub numbering: String,

    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl Diagnostic {
    fn at(
        level: DiagnosticLevel,
        rule: impl Into<String>,
        message: impl Into<String>,
        numbering: impl Into<String>,
    ) -> Self {
        Self {
            level,
            rule: rule.into(),
            message: message.into(),
            numbering: numbering.into(),
            suggestion: None,
        }
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>, numbering: impl Into<String>) -> Self {
        Self::at(DiagnosticLevel::Warning, rule, message, numbering)
    }

    pub fn info(rule: impl Into<String>, message: impl Into<String>, numbering: impl Into<String>) -> Self {
        Self::at(DiagnosticLevel::Info, rule, message, numbering)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
