//! # Tree Surgery
//!
//! Id-addressed find/update/insert/delete/move over a section forest.
//!
//! Every structural operation takes the current forest by reference and
//! returns a new one. Sections on the path from a root to the changed node
//! are fresh copies; every other subtree is the same `Arc` as before, so
//! callers can detect what changed with `Arc::ptr_eq`.
//!
//! ## Depth ceiling
//!
//! Top-level sections are at depth 0. With a ceiling of `max_depth`, a
//! section at depth `max_depth` may not have children. `insert_child` and
//! `move_section` enforce this when a ceiling is supplied; the outline
//! validator applies the same rule to externally generated forests.

use crate::mutations::MutationError;
use reportcraft_common::{numbering_from_path, walk_section, Position, Visitor};
use reportcraft_parser::ast::{Forest, Section, SectionDraft, SectionId, SectionPatch};
use reportcraft_parser::IDGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Depth-first search, parents before children
pub fn find_by_id<'a>(forest: &'a [Arc<Section>], id: &SectionId) -> Option<&'a Arc<Section>> {
    for section in forest {
        if &section.id == id {
            return Some(section);
        }
        if let Some(found) = find_by_id(&section.sub_sections, id) {
            return Some(found);
        }
    }
    None
}

/// 0-based sibling indices from the root down to `id`
pub fn path_to(forest: &[Arc<Section>], id: &SectionId) -> Option<Vec<usize>> {
    for (index, section) in forest.iter().enumerate() {
        if &section.id == id {
            return Some(vec![index]);
        }
        if let Some(mut rest) = path_to(&section.sub_sections, id) {
            rest.insert(0, index);
            return Some(rest);
        }
    }
    None
}

/// Depth of `id` (0 for top-level sections)
pub fn depth_of(forest: &[Arc<Section>], id: &SectionId) -> Option<usize> {
    path_to(forest, id).map(|path| path.len() - 1)
}

/// Dotted 1-based numbering of `id`, or an empty string if absent
pub fn compute_numbering(forest: &[Arc<Section>], id: &SectionId) -> String {
    path_to(forest, id)
        .map(|path| numbering_from_path(&path))
        .unwrap_or_default()
}

/// Levels below `section` (0 for a leaf)
pub fn subtree_height(section: &Section) -> usize {
    section
        .sub_sections
        .iter()
        .map(|child| 1 + subtree_height(child))
        .max()
        .unwrap_or(0)
}

/// Deepest depth present in the forest, `None` when empty
pub fn forest_depth(forest: &[Arc<Section>]) -> Option<usize> {
    forest.iter().map(|section| subtree_height(section)).max()
}

/// Every id in depth-first order
pub fn collect_ids(forest: &[Arc<Section>]) -> Vec<SectionId> {
    struct Ids(Vec<SectionId>);

    impl Visitor for Ids {
        fn visit_section(&mut self, section: &Section, position: Position<'_>) {
            self.0.push(section.id.clone());
            walk_section(self, section, position);
        }
    }

    let mut ids = Ids(Vec::new());
    ids.visit_forest(forest);
    ids.0
}

/// First id that occurs more than once
pub fn find_duplicate_id(forest: &[Arc<Section>]) -> Option<SectionId> {
    let mut seen = HashSet::new();
    collect_ids(forest)
        .into_iter()
        .find(|id| !seen.insert(id.clone()))
}

/// One row of a rendered outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub id: SectionId,
    pub numbering: String,
    pub depth: usize,
    pub name: String,
}

/// Numbered rows in display order
pub fn numbered_outline(forest: &[Arc<Section>]) -> Vec<OutlineEntry> {
    struct Rows(Vec<OutlineEntry>);

    impl Visitor for Rows {
        fn visit_section(&mut self, section: &Section, position: Position<'_>) {
            self.0.push(OutlineEntry {
                id: section.id.clone(),
                numbering: position.numbering(),
                depth: position.depth(),
                name: section.name.clone(),
            });
            walk_section(self, section, position);
        }
    }

    let mut rows = Rows(Vec::new());
    rows.visit_forest(forest);
    rows.0
}

/// Rebuild the path down to `id`, replacing that node with `edit(node)`.
/// Returns `None` when `id` is absent.
fn map_node<F>(children: &[Arc<Section>], id: &SectionId, edit: &mut F) -> Option<Forest>
where
    F: FnMut(&Section) -> Section,
{
    for (index, child) in children.iter().enumerate() {
        let replacement = if &child.id == id {
            Some(edit(child))
        } else {
            map_node(&child.sub_sections, id, edit).map(|sub_sections| Section {
                sub_sections,
                ..Section::clone(child)
            })
        };

        if let Some(node) = replacement {
            let mut rebuilt = children.to_vec();
            rebuilt[index] = Arc::new(node);
            return Some(rebuilt);
        }
    }
    None
}

/// Cut `id` (with its subtree) out of the forest
fn remove_node(children: &[Arc<Section>], id: &SectionId) -> Option<(Forest, Arc<Section>)> {
    if let Some(index) = children.iter().position(|child| &child.id == id) {
        let mut rebuilt = children.to_vec();
        let removed = rebuilt.remove(index);
        return Some((rebuilt, removed));
    }

    for (index, child) in children.iter().enumerate() {
        if let Some((sub_sections, removed)) = remove_node(&child.sub_sections, id) {
            let mut rebuilt = children.to_vec();
            rebuilt[index] = Arc::new(Section {
                sub_sections,
                ..Section::clone(child)
            });
            return Some((rebuilt, removed));
        }
    }
    None
}

fn check_name(name: &str) -> Result<(), MutationError> {
    if name.trim().is_empty() {
        Err(MutationError::EmptyName)
    } else {
        Ok(())
    }
}

/// Merge `patch` into the section `id`, stamping its update time.
///
/// A patch that would leave every field as it is returns the forest untouched.
pub fn update_by_id(
    forest: &[Arc<Section>],
    id: &SectionId,
    patch: &SectionPatch,
) -> Result<Forest, MutationError> {
    if let Some(name) = &patch.name {
        check_name(name)?;
    }

    if let Some(section) = find_by_id(forest, id) {
        if !patch.changes(section) {
            tracing::debug!("update_by_id: patch leaves section {} unchanged", id);
            return Ok(forest.to_vec());
        }
    }

    map_node(forest, id, &mut |section: &Section| {
        let mut updated = section.clone();
        patch.apply_to(&mut updated);
        updated
    })
    .ok_or_else(|| {
        tracing::warn!("update_by_id: section {} not found", id);
        MutationError::NodeNotFound(id.clone())
    })
}

/// Append a new section as the last child of `parent_id`
pub fn insert_child(
    forest: &[Arc<Section>],
    parent_id: &SectionId,
    draft: SectionDraft,
    ids: &mut IDGenerator,
    max_depth: Option<usize>,
) -> Result<(Forest, SectionId), MutationError> {
    check_name(&draft.name)?;

    let parent_depth = depth_of(forest, parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;

    if let Some(max_depth) = max_depth {
        if parent_depth >= max_depth {
            return Err(MutationError::DepthExceeded {
                section_id: parent_id.clone(),
                max_depth,
            });
        }
    }

    let new_id = ids.new_id();
    let mut draft = Some(draft);
    let rebuilt = map_node(forest, parent_id, &mut |parent: &Section| {
        let mut parent = parent.clone();
        if let Some(draft) = draft.take() {
            let child = draft.into_section(new_id.clone(), Some(parent.name.as_str()));
            parent.sub_sections.push(Arc::new(child));
        }
        parent
    })
    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;

    tracing::debug!("inserted section {} under {}", new_id, parent_id);
    Ok((rebuilt, new_id))
}

/// Append a new top-level section
pub fn insert_top_level(
    forest: &[Arc<Section>],
    draft: SectionDraft,
    ids: &mut IDGenerator,
) -> Result<(Forest, SectionId), MutationError> {
    check_name(&draft.name)?;

    let new_id = ids.new_id();
    let mut rebuilt = forest.to_vec();
    rebuilt.push(Arc::new(draft.into_section(new_id.clone(), None)));

    tracing::debug!("inserted top-level section {}", new_id);
    Ok((rebuilt, new_id))
}

/// Remove `id` and its whole subtree. Absent ids leave the forest unchanged.
pub fn delete_by_id(forest: &[Arc<Section>], id: &SectionId) -> Forest {
    match remove_node(forest, id) {
        Some((rebuilt, removed)) => {
            tracing::debug!(
                "deleted section {} ({} sections removed)",
                id,
                removed.subtree_len()
            );
            rebuilt
        }
        None => forest.to_vec(),
    }
}

/// Relocate `id` (keeping its id and subtree) under `new_parent` at `index`.
///
/// `new_parent = None` moves it to the top level. `index` is clamped to the
/// number of siblings at the destination, counted after removal.
pub fn move_section(
    forest: &[Arc<Section>],
    id: &SectionId,
    new_parent: Option<&SectionId>,
    index: usize,
    max_depth: Option<usize>,
) -> Result<Forest, MutationError> {
    let moving = find_by_id(forest, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

    let target_depth = match new_parent {
        Some(parent_id) => {
            if parent_id == id || find_by_id(&moving.sub_sections, parent_id).is_some() {
                return Err(MutationError::CycleDetected);
            }
            depth_of(forest, parent_id)
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?
                + 1
        }
        None => 0,
    };

    if let Some(max_depth) = max_depth {
        if target_depth + subtree_height(moving) > max_depth {
            return Err(MutationError::DepthExceeded {
                section_id: id.clone(),
                max_depth,
            });
        }
    }

    let (without, moved) =
        remove_node(forest, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

    let rebuilt = match new_parent {
        Some(parent_id) => {
            let mut moved = Some(moved);
            map_node(&without, parent_id, &mut |parent: &Section| {
                let mut parent = parent.clone();
                if let Some(node) = moved.take() {
                    let at = index.min(parent.sub_sections.len());
                    parent.sub_sections.insert(at, node);
                }
                parent
            })
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?
        }
        None => {
            let mut rebuilt = without;
            let at = index.min(rebuilt.len());
            rebuilt.insert(at, moved);
            rebuilt
        }
    };

    tracing::debug!("moved section {} to index {}", id, index);
    Ok(rebuilt)
}
