//! # Reportcraft Parser
//!
//! Section tree model plus the indentation-based text-outline parser.
//!
//! ```rust
//! use reportcraft_parser::parse_text_outline;
//!
//! let forest = parse_text_outline("1. Introduction\n  1.1 Background\n2. Methodology");
//! assert_eq!(forest.len(), 2);
//! assert_eq!(forest[0].sub_sections[0].name, "1.1 Background");
//! ```

pub mod ast;
pub mod id_generator;
pub mod parser;
pub mod serializer;
pub mod tokenizer;

pub use ast::{
    materialize_forest, CandidateSection, Forest, Project, Section, SectionDraft, SectionId,
    SectionPatch,
};
pub use id_generator::IDGenerator;
pub use parser::{parse_text_outline, parse_text_outline_with, IndentUnit, OutlineParser};
pub use serializer::{serialize_outline, Serializer};
pub use tokenizer::{split_marker, LineMarker};
