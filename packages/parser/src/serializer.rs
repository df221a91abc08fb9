use crate::ast::*;
use std::sync::Arc;

/// Serializer converts a section forest back to indented outline text
///
/// One section per line, each nesting level indented by `indent_string`.
/// Only names are written; feeding the output back through the outline
/// parser reproduces the same names and shape (with fresh ids).
pub struct Serializer {
    indent_level: usize,
    indent_string: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            indent_string: "  ".to_string(), // 2 spaces
        }
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent_level: 0,
            indent_string: indent.to_string(),
        }
    }

    /// Serialize a forest to outline text
    pub fn serialize(&mut self, forest: &[Arc<Section>]) -> String {
        let mut output = String::new();
        for section in forest {
            self.serialize_section(section, &mut output);
        }
        output
    }

    fn serialize_section(&mut self, section: &Section, output: &mut String) {
        self.write_indent(output);
        output.push_str(section.name.trim());
        output.push('\n');

        self.indent_level += 1;
        for child in &section.sub_sections {
            self.serialize_section(child, output);
        }
        self.indent_level -= 1;
    }

    fn write_indent(&self, output: &mut String) {
        for _ in 0..self.indent_level {
            output.push_str(&self.indent_string);
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a forest with two-space indentation
pub fn serialize_outline(forest: &Forest) -> String {
    Serializer::new().serialize(forest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_text_outline;

    fn shape(forest: &Forest) -> Vec<(String, usize)> {
        forest
            .iter()
            .map(|s| (s.name.clone(), s.sub_sections.len()))
            .collect()
    }

    #[test]
    fn test_serialize_nested_outline() {
        let forest = parse_text_outline("Introduction\n  Background\n    History\nDesign");
        let text = serialize_outline(&forest);

        assert_eq!(text, "Introduction\n  Background\n    History\nDesign\n");
    }

    #[test]
    fn test_custom_indent() {
        let forest = parse_text_outline("A\n  B");
        let text = Serializer::with_indent("\t").serialize(&forest);

        assert_eq!(text, "A\n\tB\n");
    }

    #[test]
    fn test_reparse_preserves_shape() {
        let source = "1. Introduction\n    1.1 Motivation\n    1.2 Objectives\n2. System Design\n    2.1 Architecture\n        Figure 1: Block Diagram\n3. Conclusion";
        let forest = parse_text_outline(source);
        let reparsed = parse_text_outline(&serialize_outline(&forest));

        assert_eq!(shape(&forest), shape(&reparsed));
        assert_eq!(
            reparsed[1].sub_sections[0].sub_sections[0].name,
            "Figure 1: Block Diagram"
        );
    }

    #[test]
    fn test_empty_forest() {
        assert_eq!(serialize_outline(&Vec::new()), "");
    }
}
