use super::OutlineRule;
use crate::diagnostic::Diagnostic;
use reportcraft_common::Position;
use reportcraft_parser::ast::Section;

/// Notes leaf sections whose content has never been generated or written
pub struct EmptyContentRule;

impl OutlineRule for EmptyContentRule {
    fn name(&self) -> &'static str {
        "empty-content"
    }

    fn description(&self) -> &'static str {
        "Leaf sections should have content"
    }

    fn check_section(&self, section: &Section, position: Position<'_>) -> Vec<Diagnostic> {
        if !section.is_leaf() || !section.content.trim().is_empty() || section.last_generated.is_some() {
            return Vec::new();
        }

        let numbering = position.numbering();
        vec![Diagnostic::info(
            self.name(),
            format!("Section {} '{}' has no content yet", numbering, section.name),
            numbering,
        )]
    }
}
