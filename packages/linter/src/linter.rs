use crate::diagnostic::Diagnostic;
use crate::rules::{LintContext, RuleRegistry};
use reportcraft_common::{walk_section, Position, Visitor};
use reportcraft_parser::ast::{Project, Section};
use std::sync::Arc;

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,

    /// Project settings passed to outline-wide rules
    pub context: LintContext,
}

impl LintOptions {
    /// Options carrying a project's own settings
    pub fn for_project(project: &Project) -> Self {
        Self {
            registry: None,
            context: LintContext {
                min_sections: project.min_sections,
            },
        }
    }
}

/// Lint a section forest and return advisory diagnostics
pub fn lint_outline(forest: &[Arc<Section>], options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_outline(forest, &options.context));
    }

    let mut sections = SectionLinter {
        registry: &registry,
        diagnostics: &mut diagnostics,
    };
    sections.visit_forest(forest);

    tracing::debug!("lint produced {} diagnostic(s)", diagnostics.len());
    diagnostics
}

/// Lint a project's outline with its own settings
pub fn lint_project(project: &Project) -> Vec<Diagnostic> {
    lint_outline(&project.sections, LintOptions::for_project(project))
}

struct SectionLinter<'a> {
    registry: &'a RuleRegistry,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl Visitor for SectionLinter<'_> {
    fn visit_section(&mut self, section: &Section, position: Position<'_>) {
        for rule in self.registry.rules() {
            self.diagnostics.extend(rule.check_section(section, position));
        }
        walk_section(self, section, position);
    }
}
