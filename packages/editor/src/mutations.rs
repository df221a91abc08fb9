//! # Outline Mutations
//!
//! Serializable editing commands applied to a project's section forest.
//!
//! ## Mutation Semantics
//!
//! ### UpdateSection
//! - Merges name/prompt/content/lastGenerated into one section
//! - Never touches `id` or `subSections`
//! - Content-only edits are transient (typing); everything else is a commit
//!
//! ### InsertSection
//! - Appends a fresh section as the last child of the parent (or last
//!   top-level section when no parent is given)
//! - Fails if the parent is missing or already at the depth ceiling
//!
//! ### RemoveSection
//! - Removes the section and all descendants
//! - Removing an id that does not exist is a no-op
//!
//! ### MoveSection
//! - Relocates a section with its id and subtree intact
//! - Fails if it would create a cycle or exceed the depth ceiling
//!
//! ### ReplaceOutline
//! - Swaps the whole forest (e.g. a freshly generated outline)
//! - Fails on duplicate ids or depth violations

use crate::tree;
use reportcraft_parser::ast::{Forest, SectionDraft, SectionId, SectionPatch};
use reportcraft_parser::IDGenerator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic edits on a section forest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Merge fields into an existing section
    UpdateSection {
        section_id: SectionId,
        patch: SectionPatch,
    },

    /// Append a new section under `parent_id` (top level when `None`)
    InsertSection {
        parent_id: Option<SectionId>,
        draft: SectionDraft,
    },

    /// Remove a section and its subtree
    RemoveSection { section_id: SectionId },

    /// Move a section under a new parent at index
    MoveSection {
        section_id: SectionId,
        new_parent_id: Option<SectionId>,
        index: usize,
    },

    /// Replace the whole outline
    ReplaceOutline { sections: Forest },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    NodeNotFound(SectionId),

    #[error("Parent not found: {0}")]
    ParentNotFound(SectionId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Section {section_id} would exceed the maximum nesting depth of {max_depth}")]
    DepthExceeded {
        section_id: SectionId,
        max_depth: usize,
    },

    #[error("Section name must not be empty")]
    EmptyName,

    #[error("Duplicate section id: {0}")]
    DuplicateId(SectionId),
}

/// Forest produced by a successful mutation
#[derive(Debug, Clone)]
pub struct Applied {
    pub sections: Forest,

    /// Id assigned by `InsertSection`
    pub inserted: Option<SectionId>,
}

impl Applied {
    fn sections(sections: Forest) -> Self {
        Self {
            sections,
            inserted: None,
        }
    }
}

impl Mutation {
    /// Apply to `forest`, returning the new forest. `forest` itself is not modified.
    pub fn apply(
        &self,
        forest: &Forest,
        ids: &mut IDGenerator,
        max_depth: Option<usize>,
    ) -> Result<Applied, MutationError> {
        match self {
            Mutation::UpdateSection { section_id, patch } => {
                tree::update_by_id(forest, section_id, patch).map(Applied::sections)
            }

            Mutation::InsertSection { parent_id, draft } => {
                let (sections, id) = match parent_id {
                    Some(parent_id) => {
                        tree::insert_child(forest, parent_id, draft.clone(), ids, max_depth)?
                    }
                    None => tree::insert_top_level(forest, draft.clone(), ids)?,
                };
                Ok(Applied {
                    sections,
                    inserted: Some(id),
                })
            }

            Mutation::RemoveSection { section_id } => {
                Ok(Applied::sections(tree::delete_by_id(forest, section_id)))
            }

            Mutation::MoveSection {
                section_id,
                new_parent_id,
                index,
            } => tree::move_section(forest, section_id, new_parent_id.as_ref(), *index, max_depth)
                .map(Applied::sections),

            Mutation::ReplaceOutline { sections } => {
                Self::validate_replacement(sections, max_depth)?;
                Ok(Applied::sections(sections.clone()))
            }
        }
    }

    fn validate_replacement(sections: &Forest, max_depth: Option<usize>) -> Result<(), MutationError> {
        if let Some(duplicate) = tree::find_duplicate_id(sections) {
            return Err(MutationError::DuplicateId(duplicate));
        }

        for row in tree::numbered_outline(sections) {
            if row.name.trim().is_empty() {
                return Err(MutationError::EmptyName);
            }
            if let Some(max_depth) = max_depth {
                if row.depth > max_depth {
                    return Err(MutationError::DepthExceeded {
                        section_id: row.id,
                        max_depth,
                    });
                }
            }
        }

        Ok(())
    }

    /// Whether the edit deserves its own undo step.
    ///
    /// Plain content edits without a generation stamp are keystroke-level
    /// and coalesce into the current history entry.
    pub fn is_significant(&self) -> bool {
        match self {
            Mutation::UpdateSection { patch, .. } => {
                patch.name.is_some() || patch.prompt.is_some() || patch.last_generated.is_some()
            }
            _ => true,
        }
    }
}

/// Result of applying a mutation to a document
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Id assigned to an inserted section
    pub inserted: Option<SectionId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportcraft_parser::parse_text_outline_with;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateSection {
            section_id: SectionId::from("s-1"),
            patch: SectionPatch::rename("Background"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_patch_with_id_is_rejected_on_deserialize() {
        let json = r#"{"UpdateSection":{"section_id":"s-1","patch":{"id":"s-2"}}}"#;
        assert!(serde_json::from_str::<Mutation>(json).is_err());
    }

    #[test]
    fn test_significance() {
        let id = SectionId::from("s-1");
        let typing = Mutation::UpdateSection {
            section_id: id.clone(),
            patch: SectionPatch::content("a"),
        };
        let generated = Mutation::UpdateSection {
            section_id: id.clone(),
            patch: SectionPatch::generated("a"),
        };
        let rename = Mutation::UpdateSection {
            section_id: id.clone(),
            patch: SectionPatch::rename("b"),
        };

        assert!(!typing.is_significant());
        assert!(generated.is_significant());
        assert!(rename.is_significant());
        assert!(Mutation::RemoveSection { section_id: id }.is_significant());
    }

    #[test]
    fn test_insert_reports_new_id() {
        let mut ids = IDGenerator::new("mutations");
        let forest = parse_text_outline_with("Introduction", &mut ids);

        let applied = Mutation::InsertSection {
            parent_id: Some(forest[0].id.clone()),
            draft: SectionDraft::named("Background"),
        }
        .apply(&forest, &mut ids, Some(1))
        .unwrap();

        let inserted = applied.inserted.unwrap();
        assert_eq!(tree::compute_numbering(&applied.sections, &inserted), "1.1");
    }

    #[test]
    fn test_replace_outline_rejects_duplicates_and_depth() {
        let mut ids = IDGenerator::new("mutations");
        let forest = parse_text_outline_with("A\n  B\n    C", &mut ids);

        let too_deep = Mutation::ReplaceOutline {
            sections: forest.clone(),
        };
        assert!(matches!(
            too_deep.apply(&Vec::new(), &mut ids, Some(1)),
            Err(MutationError::DepthExceeded { .. })
        ));

        let mut doubled = forest.clone();
        doubled.push(forest[0].clone());
        let duplicate = Mutation::ReplaceOutline { sections: doubled };
        assert!(matches!(
            duplicate.apply(&Vec::new(), &mut ids, None),
            Err(MutationError::DuplicateId(_))
        ));

        assert!(Mutation::ReplaceOutline { sections: forest }
            .apply(&Vec::new(), &mut ids, Some(2))
            .is_ok());
    }
}
