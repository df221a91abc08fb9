//! Tests for mutation sequences against a project document
//!
//! This tests:
//! - Id uniqueness across insert/delete chains
//! - Numbering after structural edits
//! - Subtree removal and restoration through undo
//! - Structural sharing of untouched subtrees

use reportcraft_editor::{find_by_id, tree, Mutation, MutationError, ProjectDocument};
use reportcraft_parser::ast::{Project, SectionDraft, SectionId, SectionPatch};
use reportcraft_parser::{parse_text_outline_with, IDGenerator};
use std::collections::HashSet;
use std::sync::Arc;

fn document(outline: &str) -> ProjectDocument {
    let mut ids = IDGenerator::new("mutation-sequences");
    let sections = parse_text_outline_with(outline, &mut ids);
    ProjectDocument::new(Project::new("Library Portal").with_sections(sections))
}

fn id_at(doc: &ProjectDocument, path: &[usize]) -> SectionId {
    let mut section = &doc.sections()[path[0]];
    for &index in &path[1..] {
        section = &section.sub_sections[index];
    }
    section.id.clone()
}

fn assert_unique_ids(doc: &ProjectDocument) {
    let ids = tree::collect_ids(doc.sections());
    let distinct: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), distinct.len(), "duplicate ids in {:?}", ids);
}

#[test]
fn test_ids_stay_unique_through_insert_delete_chain() {
    let mut doc = document("Introduction\n  Background\nDesign\nResults");

    for round in 0..5 {
        let parent = id_at(&doc, &[0]);
        let inserted = doc
            .apply(Mutation::InsertSection {
                parent_id: Some(parent),
                draft: SectionDraft::named(format!("Note {}", round)),
            })
            .unwrap()
            .inserted
            .unwrap();
        assert_unique_ids(&doc);

        if round % 2 == 0 {
            doc.apply(Mutation::RemoveSection { section_id: inserted }).unwrap();
            assert_unique_ids(&doc);
        }

        doc.apply(Mutation::InsertSection {
            parent_id: None,
            draft: SectionDraft::named(format!("Appendix {}", round)),
        })
        .unwrap();
        assert_unique_ids(&doc);
    }

    // Undo back past some inserts and insert again: old ids are never reissued
    doc.undo();
    doc.undo();
    doc.apply(Mutation::InsertSection {
        parent_id: None,
        draft: SectionDraft::named("Glossary"),
    })
    .unwrap();
    assert_unique_ids(&doc);
}

#[test]
fn test_numbering_follows_structure() {
    let doc = document("A\n  A1\n  A2\nB");

    assert_eq!(doc.numbering(&id_at(&doc, &[0, 1])), "1.2");
    assert_eq!(doc.numbering(&id_at(&doc, &[1])), "2");
    assert_eq!(doc.numbering(&SectionId::from("missing")), "");
}

#[test]
fn test_move_then_delete_sequence() {
    let mut doc = document("Introduction\n  Background\n  Scope\nDesign\n  Architecture");

    let scope = id_at(&doc, &[0, 1]);
    let design = id_at(&doc, &[1]);
    let architecture = id_at(&doc, &[1, 0]);

    // Move Scope under Design, in front of Architecture
    doc.apply(Mutation::MoveSection {
        section_id: scope.clone(),
        new_parent_id: Some(design.clone()),
        index: 0,
    })
    .unwrap();
    assert_eq!(doc.numbering(&scope), "2.1");
    assert_eq!(doc.numbering(&architecture), "2.2");

    // Delete Design (takes Scope and Architecture along)
    doc.apply(Mutation::RemoveSection {
        section_id: design.clone(),
    })
    .unwrap();
    for id in [&design, &scope, &architecture] {
        assert!(find_by_id(doc.sections(), id).is_none());
    }

    // Undo delete restores the whole subtree
    assert!(doc.undo());
    for id in [&design, &scope, &architecture] {
        assert!(find_by_id(doc.sections(), id).is_some());
    }

    // Undo move puts Scope back
    assert!(doc.undo());
    assert_eq!(doc.numbering(&scope), "1.2");
    assert!(!doc.can_undo());

    assert!(doc.redo());
    assert_eq!(doc.numbering(&scope), "2.1");
}

#[test]
fn test_cycle_and_depth_are_refused() {
    let mut doc = document("A\n  B\n    C\nD");
    let a = id_at(&doc, &[0]);
    let c = id_at(&doc, &[0, 0, 0]);
    let d = id_at(&doc, &[1]);

    assert!(matches!(
        doc.apply(Mutation::MoveSection {
            section_id: a.clone(),
            new_parent_id: Some(c.clone()),
            index: 0,
        }),
        Err(reportcraft_editor::EditorError::Mutation(MutationError::CycleDetected))
    ));

    // C sits at the default ceiling (depth 2) and may not take children
    assert!(matches!(
        doc.apply(Mutation::InsertSection {
            parent_id: Some(c),
            draft: SectionDraft::named("Too deep"),
        }),
        Err(reportcraft_editor::EditorError::Mutation(
            MutationError::DepthExceeded { max_depth: 2, .. }
        ))
    ));

    // Moving A (height 2) under D would put C at depth 3
    assert!(doc
        .apply(Mutation::MoveSection {
            section_id: a,
            new_parent_id: Some(d),
            index: 0,
        })
        .is_err());

    assert_eq!(doc.version, 0);
}

#[test]
fn test_update_shares_untouched_subtrees() {
    let mut doc = document("A\n  A1\n    A1a\n  A2\nB\n  B1");
    let before = doc.sections().clone();
    let target = id_at(&doc, &[0, 0, 0]);

    doc.apply(Mutation::UpdateSection {
        section_id: target.clone(),
        patch: SectionPatch::rename("A1a revised"),
    })
    .unwrap();
    let after = doc.sections();

    // Off-path subtrees are the very same allocations
    assert!(Arc::ptr_eq(&before[1], &after[1]));
    assert!(Arc::ptr_eq(&before[0].sub_sections[1], &after[0].sub_sections[1]));

    // The path to the edit is rebuilt
    assert!(!Arc::ptr_eq(&before[0], &after[0]));
    assert!(!Arc::ptr_eq(&before[0].sub_sections[0], &after[0].sub_sections[0]));
    assert_eq!(find_by_id(after, &target).unwrap().name, "A1a revised");

    // The previous snapshot is intact
    assert_eq!(find_by_id(&before, &target).unwrap().name, "A1a");
}

#[test]
fn test_typing_coalesces_into_one_undo_step() {
    let mut doc = document("Introduction\nDesign");
    let intro = id_at(&doc, &[0]);

    doc.apply(Mutation::UpdateSection {
        section_id: intro.clone(),
        patch: SectionPatch::rename("1. Introduction"),
    })
    .unwrap();

    for text in ["T", "Th", "The"] {
        doc.edit_content(&intro, text).unwrap();
    }

    assert_eq!(doc.history().len(), 2);
    assert_eq!(find_by_id(doc.sections(), &intro).unwrap().content, "The");

    assert!(doc.undo());
    let restored = find_by_id(doc.sections(), &intro).unwrap();
    assert_eq!(restored.name, "Introduction");
    assert_eq!(restored.content, "");

    assert!(doc.redo());
    assert_eq!(find_by_id(doc.sections(), &intro).unwrap().content, "The");
}

#[test]
fn test_generated_content_is_its_own_step() {
    let mut doc = document("Introduction");
    let intro = id_at(&doc, &[0]);

    doc.set_generated_content(&intro, "Generated text").unwrap();

    let section = find_by_id(doc.sections(), &intro).unwrap();
    assert!(section.last_generated.is_some());
    assert_eq!(doc.history().len(), 2);

    assert!(doc.undo());
    assert!(find_by_id(doc.sections(), &intro).unwrap().last_generated.is_none());
}

#[test]
fn test_same_value_edits_add_no_undo_step() {
    let mut doc = document("Intro\nDesign");
    let intro = id_at(&doc, &[0]);

    for _ in 0..2 {
        doc.apply(Mutation::UpdateSection {
            section_id: intro.clone(),
            patch: SectionPatch::rename("Intro"),
        })
        .unwrap();
    }
    doc.edit_content(&intro, "").unwrap();

    assert_eq!(doc.history().len(), 1);
    assert!(!doc.can_undo());
    assert!(!doc.is_dirty());
    assert_eq!(doc.version, 0);
}
