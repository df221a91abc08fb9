mod duplicate_names;
mod empty_content;
mod min_sections;

pub use duplicate_names::DuplicateNamesRule;
pub use empty_content::EmptyContentRule;
pub use min_sections::MinSectionsRule;

use crate::diagnostic::Diagnostic;
use reportcraft_common::Position;
use reportcraft_parser::ast::{Section, DEFAULT_MIN_SECTIONS};
use std::sync::Arc;

/// Project-level settings visible to every rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintContext {
    /// Minimum expected number of top-level sections
    pub min_sections: usize,
}

impl Default for LintContext {
    fn default() -> Self {
        Self {
            min_sections: DEFAULT_MIN_SECTIONS,
        }
    }
}

/// Trait for implementing outline lint rules
pub trait OutlineRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check the outline as a whole (runs once)
    fn check_outline(&self, _forest: &[Arc<Section>], _context: &LintContext) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check a single section (runs for every section, depth-first)
    fn check_section(&self, _section: &Section, _position: Position<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn OutlineRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(MinSectionsRule),
                Box::new(DuplicateNamesRule),
                Box::new(EmptyContentRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn OutlineRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn OutlineRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
