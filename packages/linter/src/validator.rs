//! # Outline Validator
//!
//! Accepts or rejects a candidate outline proposed by an external generator
//! before it is merged into a project.
//!
//! Rules, checked depth-first from depth 0:
//!
//! - the outline must contain at least one section
//! - every section needs a non-empty name
//! - a section at the depth ceiling may not carry children
//! - `subSections`, when present, must be a list of section objects
//!
//! Rejection is all-or-nothing and reports the first violation found. Nothing
//! is coerced or dropped.

use reportcraft_common::numbering_from_path;
use reportcraft_parser::ast::CandidateSection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Which rule a rejected outline broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationRule {
    EmptyOutline,
    EmptyName,
    DepthExceeded,
    MalformedNode,
    MalformedSubSections,
}

impl ViolationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationRule::EmptyOutline => "empty-outline",
            ViolationRule::EmptyName => "empty-name",
            ViolationRule::DepthExceeded => "depth-exceeded",
            ViolationRule::MalformedNode => "malformed-node",
            ViolationRule::MalformedSubSections => "malformed-sub-sections",
        }
    }
}

impl fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First violation found in a rejected outline
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("[{rule}] {message}")]
pub struct Violation {
    pub rule: ViolationRule,

    /// Name of the offending section; empty when it has none
    pub name: String,

    /// 0 for top-level sections
    pub depth: usize,

    /// Positional numbering of the offending section, e.g. "2.1"
    pub path: String,

    pub message: String,
}

impl Violation {
    fn new(rule: ViolationRule, name: &str, path: &[usize], message: impl Into<String>) -> Self {
        Self {
            rule,
            name: name.to_string(),
            depth: path.len().saturating_sub(1),
            path: numbering_from_path(path),
            message: message.into(),
        }
    }

    fn empty_outline() -> Self {
        Self::new(
            ViolationRule::EmptyOutline,
            "",
            &[],
            "Outline contains no sections",
        )
    }
}

/// Validate a typed candidate forest
pub fn validate_outline(
    candidates: &[CandidateSection],
    max_depth: Option<usize>,
) -> Result<(), Violation> {
    if candidates.is_empty() {
        return Err(reject(Violation::empty_outline()));
    }

    let mut path = Vec::new();
    check_candidates(candidates, max_depth, &mut path).map_err(reject)
}

fn check_candidates(
    candidates: &[CandidateSection],
    max_depth: Option<usize>,
    path: &mut Vec<usize>,
) -> Result<(), Violation> {
    for (index, candidate) in candidates.iter().enumerate() {
        path.push(index);
        check_shape(&candidate.name, !candidate.sub_sections.is_empty(), max_depth, path)?;
        check_candidates(&candidate.sub_sections, max_depth, path)?;
        path.pop();
    }
    Ok(())
}

/// Name and depth rules shared by typed and raw validation
fn check_shape(
    name: &str,
    has_children: bool,
    max_depth: Option<usize>,
    path: &[usize],
) -> Result<(), Violation> {
    let depth = path.len().saturating_sub(1);

    if name.trim().is_empty() {
        return Err(Violation::new(
            ViolationRule::EmptyName,
            name,
            path,
            format!("Section {} has an empty name", numbering_from_path(path)),
        ));
    }

    if let Some(max_depth) = max_depth {
        if has_children && depth >= max_depth {
            return Err(Violation::new(
                ViolationRule::DepthExceeded,
                name,
                path,
                format!(
                    "Section '{}' at depth {} may not have sub-sections (maximum depth {})",
                    name, depth, max_depth
                ),
            ));
        }
    }

    Ok(())
}

/// Validate raw JSON from a generator and decode it into candidates.
///
/// `null` means the generator produced nothing and yields an empty list; an
/// empty array is a rejection.
pub fn validate_outline_value(
    value: &Value,
    max_depth: Option<usize>,
) -> Result<Vec<CandidateSection>, Violation> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        _ => {
            return Err(reject(Violation::new(
                ViolationRule::MalformedSubSections,
                "",
                &[],
                "Outline must be a list of sections",
            )))
        }
    };

    if items.is_empty() {
        return Err(reject(Violation::empty_outline()));
    }

    let mut path = Vec::new();
    decode_list(items, max_depth, &mut path).map_err(reject)
}

fn decode_list(
    items: &[Value],
    max_depth: Option<usize>,
    path: &mut Vec<usize>,
) -> Result<Vec<CandidateSection>, Violation> {
    let mut candidates = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        path.push(index);
        candidates.push(decode_node(item, max_depth, path)?);
        path.pop();
    }
    Ok(candidates)
}

fn decode_node(
    item: &Value,
    max_depth: Option<usize>,
    path: &mut Vec<usize>,
) -> Result<CandidateSection, Violation> {
    let Value::Object(fields) = item else {
        return Err(Violation::new(
            ViolationRule::MalformedNode,
            "",
            path,
            format!("Section {} is not an object", numbering_from_path(path)),
        ));
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) => name.as_str(),
        None | Some(Value::Null) => "",
        Some(_) => {
            return Err(Violation::new(
                ViolationRule::MalformedNode,
                "",
                path,
                format!("Section {} has a non-string name", numbering_from_path(path)),
            ))
        }
    };

    let prompt = optional_string(fields, "prompt", name, path)?;
    let content = optional_string(fields, "content", name, path)?;

    let children = match fields.get("subSections") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(children)) => children.as_slice(),
        Some(_) => {
            return Err(Violation::new(
                ViolationRule::MalformedSubSections,
                name,
                path,
                format!("Sub-sections of '{}' must be a list", name),
            ))
        }
    };

    check_shape(name, !children.is_empty(), max_depth, path)?;

    Ok(CandidateSection {
        name: name.to_string(),
        prompt,
        content,
        sub_sections: decode_list(children, max_depth, path)?,
    })
}

fn optional_string(
    fields: &Map<String, Value>,
    key: &str,
    name: &str,
    path: &[usize],
) -> Result<Option<String>, Violation> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(Violation::new(
            ViolationRule::MalformedNode,
            name,
            path,
            format!("Field '{}' of '{}' must be a string", key, name),
        )),
    }
}

fn reject(violation: Violation) -> Violation {
    tracing::warn!(
        rule = %violation.rule,
        path = %violation.path,
        "candidate outline rejected: {}",
        violation.message
    );
    violation
}
