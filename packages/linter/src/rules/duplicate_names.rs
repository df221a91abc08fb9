use super::{LintContext, OutlineRule};
use crate::diagnostic::Diagnostic;
use reportcraft_common::{numbering_from_path, Position};
use reportcraft_parser::ast::Section;
use std::collections::HashMap;
use std::sync::Arc;

/// Flags siblings that share a name (case and surrounding whitespace ignored)
pub struct DuplicateNamesRule;

impl OutlineRule for DuplicateNamesRule {
    fn name(&self) -> &'static str {
        "duplicate-sibling-name"
    }

    fn description(&self) -> &'static str {
        "Sibling sections should have distinct names"
    }

    fn check_outline(&self, forest: &[Arc<Section>], _context: &LintContext) -> Vec<Diagnostic> {
        check_siblings(self.name(), forest, &[])
    }

    fn check_section(&self, section: &Section, position: Position<'_>) -> Vec<Diagnostic> {
        check_siblings(self.name(), &section.sub_sections, position.path)
    }
}

fn check_siblings(rule: &str, siblings: &[Arc<Section>], parent_path: &[usize]) -> Vec<Diagnostic> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut diagnostics = Vec::new();

    for (index, sibling) in siblings.iter().enumerate() {
        let key = sibling.name.trim().to_lowercase();
        match first_seen.get(&key) {
            Some(&first) => {
                let mut path = parent_path.to_vec();
                path.push(index);
                let numbering = numbering_from_path(&path);
                path.pop();
                path.push(first);

                diagnostics.push(
                    Diagnostic::info(
                        rule,
                        format!(
                            "Section {} repeats the name '{}' used by section {}",
                            numbering,
                            sibling.name.trim(),
                            numbering_from_path(&path)
                        ),
                        numbering,
                    )
                    .with_suggestion("Rename or merge one of the sections"),
                );
            }
            None => {
                first_seen.insert(key, index);
            }
        }
    }

    diagnostics
}
