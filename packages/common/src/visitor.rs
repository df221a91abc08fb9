use reportcraft_parser::ast::Section;
use std::sync::Arc;

/// Where a section sits in the forest while it is being visited
#[derive(Debug, Clone, Copy)]
pub struct Position<'a> {
    /// 0-based sibling index at every level from the root down to this node
    pub path: &'a [usize],
}

impl<'a> Position<'a> {
    /// 0 for top-level sections
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Dotted 1-based numbering, e.g. "2.1.3"
    pub fn numbering(&self) -> String {
        numbering_from_path(self.path)
    }
}

/// Format a 0-based index path as 1-based dotted numbering
pub fn numbering_from_path(path: &[usize]) -> String {
    path.iter()
        .map(|index| (index + 1).to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Visitor pattern for traversing a section forest depth-first
///
/// The default implementations walk the entire tree, parents before
/// children, siblings in order. Override `visit_section` to act on nodes;
/// call [`walk_section`] from the override to keep descending.
pub trait Visitor: Sized {
    fn visit_forest(&mut self, forest: &[Arc<Section>]) {
        walk_forest(self, forest);
    }

    fn visit_section(&mut self, section: &Section, position: Position<'_>) {
        walk_section(self, section, position);
    }
}

pub fn walk_forest<V: Visitor>(visitor: &mut V, forest: &[Arc<Section>]) {
    let mut path = Vec::new();
    walk_children(visitor, forest, &mut path);
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section, position: Position<'_>) {
    let mut path = position.path.to_vec();
    walk_children(visitor, &section.sub_sections, &mut path);
}

fn walk_children<V: Visitor>(visitor: &mut V, children: &[Arc<Section>], path: &mut Vec<usize>) {
    for (index, child) in children.iter().enumerate() {
        path.push(index);
        visitor.visit_section(child, Position { path: path.as_slice() });
        path.pop();
    }
}
