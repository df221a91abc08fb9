//! # Reportcraft Linter
//!
//! Gatekeeping and advice for report outlines.
//!
//! - [`validate_outline`] / [`validate_outline_value`] accept or reject a
//!   candidate outline from an external generator
//! - [`lint_outline`] reports advisory [`Diagnostic`]s and never rejects

mod diagnostic;
mod linter;
mod rules;
mod validator;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use linter::{lint_outline, lint_project, LintOptions};
pub use rules::{
    DuplicateNamesRule, EmptyContentRule, LintContext, MinSectionsRule, OutlineRule, RuleRegistry,
};
pub use validator::{validate_outline, validate_outline_value, Violation, ViolationRule};

#[cfg(test)]
mod tests {
    use super::*;
    use reportcraft_parser::ast::{Project, SectionPatch};
    use reportcraft_parser::parse_text_outline;
    use std::sync::Arc;

    #[test]
    fn test_lint_collects_all_rules() {
        let forest = parse_text_outline("Introduction\n  Background\n  background\nResults");
        let diagnostics = lint_outline(&forest, LintOptions::default());

        let rules: Vec<&str> = diagnostics.iter().map(|d| d.rule.as_str()).collect();
        assert_eq!(
            rules,
            vec![
                "min-sections",
                "duplicate-sibling-name",
                "empty-content",
                "empty-content",
                "empty-content"
            ]
        );
        assert_eq!(diagnostics[1].numbering, "1.2");
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = RuleRegistry::empty();
        registry.add_rule(Box::new(MinSectionsRule));

        let forest = parse_text_outline("A\nB");
        let diagnostics = lint_outline(
            &forest,
            LintOptions {
                registry: Some(registry),
                context: LintContext { min_sections: 2 },
            },
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lint_project_uses_project_minimum() {
        let mut forest = parse_text_outline("A\nB");
        for section in forest.iter_mut() {
            SectionPatch::content("Body").apply_to(Arc::make_mut(section));
        }
        let mut project = Project::new("Thesis").with_sections(forest);
        project.min_sections = 2;

        assert!(lint_project(&project).is_empty());
    }

    #[test]
    fn test_registry_debug() {
        assert_eq!(
            format!("{:?}", RuleRegistry::new()),
            "RuleRegistry { rules: \"3 rules\" }"
        );
    }
}
