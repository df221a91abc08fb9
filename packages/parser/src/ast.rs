//! # Outline Model
//!
//! Section tree and project types shared by every Reportcraft package.
//!
//! A report outline is a [`Forest`]: an ordered list of top-level
//! [`Section`]s, each owning an ordered list of children. Children are held
//! behind [`Arc`] so that tree surgery can hand back a new forest that reuses
//! every untouched subtree by reference.
//!
//! Numbering ("1.2.3") is never stored. It is derived from position by the
//! editor whenever it is needed.

use crate::id_generator::IDGenerator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Ordered sequence of top-level sections
pub type Forest = Vec<Arc<Section>>;

/// Opaque, immutable section identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A node in the report outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,

    /// Display name; may embed a number or a `Figure N:` style prefix
    pub name: String,

    /// Instruction handed to the content generator
    #[serde(default)]
    pub prompt: String,

    /// Generated or user-authored body
    #[serde(default)]
    pub content: String,

    /// Set only when content is (re)generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<DateTime<Utc>>,

    /// Stamped by every field update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Ordered children. Empty means leaf; omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_sections: Forest,
}

impl Section {
    /// Create a leaf section with a derived prompt
    pub fn new(id: SectionId, name: impl Into<String>, parent_name: Option<&str>) -> Self {
        let name = name.into();
        let prompt = default_prompt(&name, parent_name);
        Self {
            id,
            name,
            prompt,
            content: String::new(),
            last_generated: None,
            updated_at: None,
            sub_sections: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_sections.is_empty()
    }

    pub fn with_children(mut self, children: Forest) -> Self {
        self.sub_sections = children;
        self
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self
            .sub_sections
            .iter()
            .map(|child| child.subtree_len())
            .sum::<usize>()
    }
}

/// Prompt used when none is supplied: name plus parent name
pub fn default_prompt(name: &str, parent_name: Option<&str>) -> String {
    match parent_name {
        Some(parent) => format!("Write the '{}' section of '{}'", name, parent),
        None => format!("Write the '{}' section", name),
    }
}

/// Fields a caller supplies when inserting a new section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDraft {
    pub name: String,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl SectionDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Materialize into a leaf section
    pub fn into_section(self, id: SectionId, parent_name: Option<&str>) -> Section {
        let mut section = Section::new(id, self.name, parent_name);
        if let Some(prompt) = self.prompt {
            section.prompt = prompt;
        }
        if let Some(content) = self.content {
            section.content = content;
        }
        section
    }
}

/// Partial update merged into an existing section.
///
/// `id` and `subSections` cannot be expressed here. Unknown JSON fields are
/// refused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<DateTime<Utc>>,
}

impl SectionPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Content produced by the generator, stamped with the generation time
    pub fn generated(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            last_generated: Some(Utc::now()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.prompt.is_none()
            && self.content.is_none()
            && self.last_generated.is_none()
    }

    /// Whether merging into `section` would alter any of its fields
    pub fn changes(&self, section: &Section) -> bool {
        self.name.as_ref().is_some_and(|name| *name != section.name)
            || self.prompt.as_ref().is_some_and(|prompt| *prompt != section.prompt)
            || self.content.as_ref().is_some_and(|content| *content != section.content)
            || self
                .last_generated
                .is_some_and(|at| section.last_generated != Some(at))
    }

    /// Merge into `section`, stamping `updated_at`
    pub fn apply_to(&self, section: &mut Section) {
        if let Some(name) = &self.name {
            section.name = name.clone();
        }
        if let Some(prompt) = &self.prompt {
            section.prompt = prompt.clone();
        }
        if let Some(content) = &self.content {
            section.content = content.clone();
        }
        if let Some(at) = self.last_generated {
            section.last_generated = Some(at);
        }
        section.updated_at = Some(Utc::now());
    }
}

/// Section shape proposed by an external outline generator (no ids yet)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_sections: Vec<CandidateSection>,
}

impl CandidateSection {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<CandidateSection>) -> Self {
        self.sub_sections = children;
        self
    }

    /// Turn an accepted candidate into a section with fresh ids throughout
    pub fn materialize(&self, ids: &mut IDGenerator, parent_name: Option<&str>) -> Section {
        let name = self.name.trim();
        let mut section = Section::new(ids.new_id(), name, parent_name);
        if let Some(prompt) = self.prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            section.prompt = prompt.to_string();
        }
        if let Some(content) = &self.content {
            section.content = content.clone();
        }
        section.sub_sections = self
            .sub_sections
            .iter()
            .map(|child| Arc::new(child.materialize(ids, Some(name))))
            .collect();
        section
    }
}

/// Materialize a whole candidate forest
pub fn materialize_forest(candidates: &[CandidateSection], ids: &mut IDGenerator) -> Forest {
    candidates
        .iter()
        .map(|candidate| Arc::new(candidate.materialize(ids, None)))
        .collect()
}

/// Aggregate root: the report being authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,

    /// Free-text description of the student project
    #[serde(default)]
    pub context: String,

    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub institute: String,
    #[serde(default)]
    pub guide: String,

    /// Soft floor on top-level section count
    #[serde(default = "default_min_sections")]
    pub min_sections: usize,

    /// Hard ceiling on nesting depth (0 = top-level only)
    #[serde(default = "default_max_sub_sections")]
    pub max_sub_sections_per_section: usize,

    #[serde(default)]
    pub sections: Forest,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub const DEFAULT_MIN_SECTIONS: usize = 5;
pub const DEFAULT_MAX_SUB_SECTIONS: usize = 2;

fn default_min_sections() -> usize {
    DEFAULT_MIN_SECTIONS
}

fn default_max_sub_sections() -> usize {
    DEFAULT_MAX_SUB_SECTIONS
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            context: String::new(),
            team_name: String::new(),
            team_members: Vec::new(),
            institute: String::new(),
            guide: String::new(),
            min_sections: DEFAULT_MIN_SECTIONS,
            max_sub_sections_per_section: DEFAULT_MAX_SUB_SECTIONS,
            sections: Vec::new(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_sections(mut self, sections: Forest) -> Self {
        self.sections = sections;
        self
    }

    /// Total number of sections at every depth
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(|s| s.subtree_len()).sum()
    }
}
