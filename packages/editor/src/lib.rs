//! # Reportcraft Editor
//!
//! Outline editing engine for report projects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: text outline → section forest       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: ProjectDocument + mutations         │
//! │  - Load/save projects                       │
//! │  - Apply mutations with depth enforcement   │
//! │  - Validate and adopt generated outlines    │
//! │  - Undo/redo over project snapshots         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: renders numbering, calls generators   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Forest is source of truth**: numbering is always derived
//! 2. **Pure tree surgery**: every edit returns a new forest sharing untouched subtrees
//! 3. **No side channels**: failures come back as values, never notifications
//!
//! ## Usage
//!
//! ```rust
//! use reportcraft_editor::{Mutation, ProjectDocument};
//! use reportcraft_parser::ast::{Project, SectionDraft};
//! use reportcraft_parser::parse_text_outline;
//!
//! let sections = parse_text_outline("Introduction\nMethodology");
//! let mut doc = ProjectDocument::new(Project::new("Smart Irrigation").with_sections(sections));
//!
//! let parent = doc.sections()[0].id.clone();
//! let result = doc
//!     .apply(Mutation::InsertSection {
//!         parent_id: Some(parent),
//!         draft: SectionDraft::named("Background"),
//!     })
//!     .unwrap();
//!
//! let id = result.inserted.unwrap();
//! assert_eq!(doc.numbering(&id), "1.1");
//!
//! assert!(doc.undo());
//! assert_eq!(doc.numbering(&id), "");
//! ```

mod document;
mod errors;
mod history;
mod mutations;
pub mod tree;

pub use document::{ProjectDocument, ProjectPatch};
pub use errors::{EditorError, EditorResult};
pub use history::{HistoryManager, RecordOutcome, DEFAULT_MAX_ENTRIES};
pub use mutations::{Applied, Mutation, MutationError, MutationResult};
pub use tree::{
    compute_numbering, delete_by_id, depth_of, find_by_id, insert_child, insert_top_level,
    move_section, numbered_outline, update_by_id, OutlineEntry,
};

// Re-export common types for convenience
pub use reportcraft_parser::ast::{Forest, Project, Section, SectionId};
