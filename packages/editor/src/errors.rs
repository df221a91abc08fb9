//! Error types for the editor

use reportcraft_linter::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Outline rejected: {0}")]
    Rejected(#[from] Violation),

    #[error("Maximum depth {max_depth} is below the current outline depth {outline_depth}")]
    CeilingBelowOutline {
        max_depth: usize,
        outline_depth: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    Persist(#[from] reportcraft_common::CommonError),

    #[error("Document is not file-backed")]
    NotFileBacked,
}

pub type EditorResult<T> = Result<T, EditorError>;
