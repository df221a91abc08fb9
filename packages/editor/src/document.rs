//! # Project Document
//!
//! Editing handle for a single report project.
//!
//! A `ProjectDocument` owns the project's history (the current project is
//! always the history's current entry), the id generator for new sections,
//! and optionally the file it was loaded from.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit (mutations / adopted outlines) → Undo/Redo → Save
//!   ↓          ↓                                   ↓         ↓
//! JSON     History entries                    Cursor moves  JSON
//! ```
//!
//! Not internally synchronized: a host that shares one document between
//! writers must serialize mutations, e.g. behind a `Mutex`.

use crate::history::{HistoryManager, RecordOutcome, DEFAULT_MAX_ENTRIES};
use crate::mutations::{Mutation, MutationError, MutationResult};
use crate::tree::{self, OutlineEntry};
use crate::{EditorError, EditorResult};
use chrono::Utc;
use reportcraft_common::{load_json, save_json};
use reportcraft_linter::{validate_outline, validate_outline_value};
use reportcraft_parser::ast::{
    materialize_forest, CandidateSection, Forest, Project, SectionId, SectionPatch,
};
use reportcraft_parser::IDGenerator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Project-level fields a caller may change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sections: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sub_sections_per_section: Option<usize>,
}

impl ProjectPatch {
    fn apply_to(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(context) = &self.context {
            project.context = context.clone();
        }
        if let Some(team_name) = &self.team_name {
            project.team_name = team_name.clone();
        }
        if let Some(team_members) = &self.team_members {
            project.team_members = team_members.clone();
        }
        if let Some(institute) = &self.institute {
            project.institute = institute.clone();
        }
        if let Some(guide) = &self.guide {
            project.guide = guide.clone();
        }
        if let Some(min_sections) = self.min_sections {
            project.min_sections = min_sections;
        }
        if let Some(max_depth) = self.max_sub_sections_per_section {
            project.max_sub_sections_per_section = max_depth;
        }
    }
}

/// Editable report project with undo history
#[derive(Debug)]
pub struct ProjectDocument {
    /// File the project was loaded from (if any)
    pub path: Option<PathBuf>,

    /// Current version number (increments on each recorded change)
    pub version: u64,

    history: HistoryManager<Project>,
    ids: IDGenerator,
    dirty: bool,
}

impl ProjectDocument {
    /// Create a memory-backed document
    pub fn new(project: Project) -> Self {
        Self::with_history_limit(project, DEFAULT_MAX_ENTRIES)
    }

    /// Create a memory-backed document retaining at most `limit` snapshots
    pub fn with_history_limit(project: Project, limit: usize) -> Self {
        let ids = generator_for(&project.sections);
        Self {
            path: None,
            version: 0,
            history: HistoryManager::with_max_entries(project, limit),
            ids,
            dirty: false,
        }
    }

    /// Wrap an existing project, refusing one that repeats section ids
    pub fn from_project(project: Project) -> EditorResult<Self> {
        if let Some(duplicate) = tree::find_duplicate_id(&project.sections) {
            tracing::warn!("project repeats section id {}", duplicate);
            return Err(MutationError::DuplicateId(duplicate).into());
        }
        Ok(Self::new(project))
    }

    /// Parse a project from JSON (memory-backed)
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Self::from_project(serde_json::from_str(json)?)
    }

    /// Load a project from a JSON file (file-backed)
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let mut document = Self::from_project(load_json(path)?)?;
        document.path = Some(path.to_path_buf());
        tracing::debug!("loaded project from {}", path.display());
        Ok(document)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self.project())?)
    }

    /// Write the current project back to its file
    pub fn save(&mut self) -> EditorResult<()> {
        let path = self.path.as_ref().ok_or(EditorError::NotFileBacked)?;
        save_json(path, self.history.current())?;
        self.dirty = false;
        Ok(())
    }

    /// Write to `path` and make it the document's file
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> EditorResult<()> {
        self.path = Some(path.into());
        self.save()
    }

    /// Current project state
    pub fn project(&self) -> &Project {
        self.history.current()
    }

    pub fn sections(&self) -> &Forest {
        &self.project().sections
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply a mutation, recording it in history
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<MutationResult> {
        let project = self.history.current();
        let max_depth = Some(project.max_sub_sections_per_section);
        let applied = mutation.apply(&project.sections, &mut self.ids, max_depth)?;

        if applied.sections == project.sections {
            tracing::debug!("mutation left the outline unchanged");
            return Ok(MutationResult {
                version: self.version,
                inserted: applied.inserted,
            });
        }

        let mut next = project.clone();
        next.sections = applied.sections;
        self.commit(next, mutation.is_significant());

        Ok(MutationResult {
            version: self.version,
            inserted: applied.inserted,
        })
    }

    /// Keystroke-level content edit; coalesces into the current history entry
    pub fn edit_content(
        &mut self,
        section_id: &SectionId,
        content: impl Into<String>,
    ) -> EditorResult<MutationResult> {
        self.apply(Mutation::UpdateSection {
            section_id: section_id.clone(),
            patch: SectionPatch::content(content),
        })
    }

    /// Store freshly generated content as its own undo step
    pub fn set_generated_content(
        &mut self,
        section_id: &SectionId,
        content: impl Into<String>,
    ) -> EditorResult<MutationResult> {
        self.apply(Mutation::UpdateSection {
            section_id: section_id.clone(),
            patch: SectionPatch::generated(content),
        })
    }

    /// Change project-level fields.
    ///
    /// Lowering the depth ceiling below the current outline depth is refused.
    pub fn update_project(&mut self, patch: &ProjectPatch) -> EditorResult<u64> {
        let project = self.history.current();

        if let (Some(max_depth), Some(outline_depth)) = (
            patch.max_sub_sections_per_section,
            tree::forest_depth(&project.sections),
        ) {
            if outline_depth > max_depth {
                tracing::warn!(
                    "refusing depth ceiling {} for outline of depth {}",
                    max_depth,
                    outline_depth
                );
                return Err(EditorError::CeilingBelowOutline {
                    max_depth,
                    outline_depth,
                });
            }
        }

        let mut next = project.clone();
        patch.apply_to(&mut next);
        if next != *project {
            self.commit(next, true);
        }
        Ok(self.version)
    }

    /// Validate a generated outline and, if accepted, replace the current one.
    ///
    /// The whole candidate forest is accepted or rejected; the current outline
    /// is untouched on rejection.
    pub fn adopt_outline(&mut self, candidates: &[CandidateSection]) -> EditorResult<MutationResult> {
        let max_depth = self.project().max_sub_sections_per_section;
        validate_outline(candidates, Some(max_depth))?;
        self.replace_with(candidates)
    }

    /// Like [`adopt_outline`](Self::adopt_outline) for raw generator JSON.
    ///
    /// `null` means the generator produced nothing: the outline is left as is
    /// and `Ok(None)` is returned.
    pub fn adopt_outline_value(&mut self, value: &Value) -> EditorResult<Option<MutationResult>> {
        let max_depth = self.project().max_sub_sections_per_section;
        let candidates = validate_outline_value(value, Some(max_depth))?;
        if candidates.is_empty() {
            return Ok(None);
        }
        self.replace_with(&candidates).map(Some)
    }

    fn replace_with(&mut self, candidates: &[CandidateSection]) -> EditorResult<MutationResult> {
        let sections = materialize_forest(candidates, &mut self.ids);
        self.apply(Mutation::ReplaceOutline { sections })
    }

    /// Step back one history entry. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo().is_some();
        if moved {
            self.version += 1;
            self.dirty = true;
        }
        moved
    }

    /// Step forward one history entry. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo().is_some();
        if moved {
            self.version += 1;
            self.dirty = true;
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryManager<Project> {
        &self.history
    }

    /// Dotted numbering of a section, or an empty string if absent
    pub fn numbering(&self, section_id: &SectionId) -> String {
        tree::compute_numbering(self.sections(), section_id)
    }

    pub fn numbered_outline(&self) -> Vec<OutlineEntry> {
        tree::numbered_outline(self.sections())
    }

    fn commit(&mut self, mut next: Project, significant: bool) {
        next.updated_at = Some(Utc::now());
        let outcome = self.history.record(next, significant);
        if outcome != RecordOutcome::Unchanged {
            self.version += 1;
            self.dirty = true;
        }
        tracing::debug!(
            "recorded version {} ({:?}, {} history entries)",
            self.version,
            outcome,
            self.history.len()
        );
    }
}

/// Fresh generator whose ids cannot collide with any id already in `forest`
fn generator_for(forest: &Forest) -> IDGenerator {
    let existing = tree::collect_ids(forest);
    loop {
        let ids = IDGenerator::fresh();
        let prefix = format!("{}-", ids.seed());
        if !existing.iter().any(|id| id.as_str().starts_with(&prefix)) {
            return ids;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportcraft_parser::ast::SectionDraft;
    use reportcraft_parser::parse_text_outline;

    fn document() -> ProjectDocument {
        let sections = parse_text_outline("Introduction\n  Background\nMethodology");
        ProjectDocument::new(Project::new("Smart Irrigation").with_sections(sections))
    }

    #[test]
    fn test_create_memory_document() {
        let doc = document();
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(!doc.can_undo());
        assert_eq!(doc.project().section_count(), 3);
    }

    #[test]
    fn test_document_version_increments() {
        let mut doc = document();
        let parent = doc.sections()[0].id.clone();

        let result = doc
            .apply(Mutation::InsertSection {
                parent_id: Some(parent),
                draft: SectionDraft::named("Objectives"),
            })
            .unwrap();

        assert_eq!(result.version, 1);
        assert_eq!(doc.numbering(&result.inserted.unwrap()), "1.2");
        assert!(doc.is_dirty());
        assert!(doc.can_undo());
    }

    #[test]
    fn test_failed_mutation_leaves_state_alone() {
        let mut doc = document();
        let err = doc.apply(Mutation::UpdateSection {
            section_id: SectionId::from("missing"),
            patch: SectionPatch::rename("X"),
        });

        assert!(matches!(err, Err(EditorError::Mutation(_))));
        assert_eq!(doc.version, 0);
        assert_eq!(doc.history().len(), 1);
    }

    #[test]
    fn test_removing_absent_id_records_nothing() {
        let mut doc = document();
        let result = doc
            .apply(Mutation::RemoveSection {
                section_id: SectionId::from("missing"),
            })
            .unwrap();

        assert_eq!(result.version, 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_update_project_refuses_low_ceiling() {
        let mut doc = document();
        let patch = ProjectPatch {
            max_sub_sections_per_section: Some(0),
            ..ProjectPatch::default()
        };

        assert!(matches!(
            doc.update_project(&patch),
            Err(EditorError::CeilingBelowOutline {
                max_depth: 0,
                outline_depth: 1
            })
        ));

        let patch = ProjectPatch {
            title: Some("Drip Irrigation".into()),
            max_sub_sections_per_section: Some(1),
            ..ProjectPatch::default()
        };
        assert_eq!(doc.update_project(&patch).unwrap(), 1);
        assert_eq!(doc.project().title, "Drip Irrigation");
        assert_eq!(doc.project().max_sub_sections_per_section, 1);
    }

    #[test]
    fn test_save_requires_path() {
        let mut doc = document();
        assert!(matches!(doc.save(), Err(EditorError::NotFileBacked)));
    }

    #[test]
    fn test_generator_avoids_existing_seed() {
        let doc = document();
        let fresh = generator_for(doc.sections());
        let prefix = format!("{}-", fresh.seed());
        assert!(tree::collect_ids(doc.sections())
            .iter()
            .all(|id| !id.as_str().starts_with(&prefix)));
    }
}
