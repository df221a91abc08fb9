use super::{LintContext, OutlineRule};
use crate::diagnostic::Diagnostic;
use reportcraft_parser::ast::Section;
use std::sync::Arc;

/// Warns when the outline has fewer top-level sections than the project expects
pub struct MinSectionsRule;

impl OutlineRule for MinSectionsRule {
    fn name(&self) -> &'static str {
        "min-sections"
    }

    fn description(&self) -> &'static str {
        "Outline should have at least the project's minimum number of top-level sections"
    }

    fn check_outline(&self, forest: &[Arc<Section>], context: &LintContext) -> Vec<Diagnostic> {
        if forest.len() >= context.min_sections {
            return Vec::new();
        }

        vec![Diagnostic::warning(
            self.name(),
            format!(
                "Outline has {} top-level section(s); at least {} expected",
                forest.len(),
                context.min_sections
            ),
            "",
        )
        .with_suggestion(format!(
            "Add {} more top-level section(s)",
            context.min_sections - forest.len()
        ))]
    }
}
