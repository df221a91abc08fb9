//! # Text-Outline Parser
//!
//! Turns freeform indented text (one item per line) into a section forest.
//!
//! ```text
//! 1. Introduction          → "1. Introduction"
//!   1.1 Background         →   "1.1 Background"
//!   - Problem Statement    →   "Problem Statement"
//! 2. Methodology           → "2. Methodology"
//! ```
//!
//! Nesting comes only from indentation. The indent unit is inferred once per
//! input: tabs if any line is tab-indented, otherwise the width of the first
//! indented line (4 if it is a multiple of 4, else 2 if even, else the exact
//! width), falling back to 2 spaces when nothing is indented.
//!
//! The parser never fails. Blank lines and lines that are nothing but a list
//! marker are skipped, and input with no usable lines yields an empty forest.

use crate::ast::{Forest, Section};
use crate::id_generator::IDGenerator;
use crate::tokenizer::split_marker;
use std::sync::Arc;

/// How many columns make one nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    /// One tab per level
    Tabs,
    /// N spaces per level
    Spaces(usize),
}

impl IndentUnit {
    pub const DEFAULT: IndentUnit = IndentUnit::Spaces(2);

    /// Infer the unit from a set of lines
    pub fn infer<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut first_space_run = None;

        for line in lines {
            let leading = leading_whitespace(line);
            if leading.contains('\t') {
                return IndentUnit::Tabs;
            }
            if first_space_run.is_none() && !leading.is_empty() {
                first_space_run = Some(leading.len());
            }
        }

        match first_space_run {
            Some(run) if run % 4 == 0 => IndentUnit::Spaces(4),
            Some(run) if run % 2 == 0 => IndentUnit::Spaces(2),
            Some(run) => IndentUnit::Spaces(run),
            None => IndentUnit::DEFAULT,
        }
    }

    /// Nesting level of a line under this unit
    pub fn level_of(self, line: &str) -> usize {
        let leading = leading_whitespace(line);
        match self {
            IndentUnit::Tabs => leading.chars().filter(|c| *c == '\t').count(),
            IndentUnit::Spaces(width) => leading.len() / width.max(1),
        }
    }
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Section name for a line: indentation and one list marker removed, trimmed
pub fn extract_name(line: &str) -> &str {
    let (_, rest) = split_marker(line.trim_start_matches([' ', '\t']));
    rest.trim()
}

/// A non-blank input line with its computed level and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine<'src> {
    pub level: usize,
    pub name: &'src str,
    /// 1-based line number in the original text
    pub line_number: usize,
}

/// Indentation-based outline parser
#[derive(Debug)]
pub struct OutlineParser<'src> {
    lines: Vec<OutlineLine<'src>>,
    indent_unit: IndentUnit,
    skipped: usize,
}

impl<'src> OutlineParser<'src> {
    pub fn new(text: &'src str) -> Self {
        let raw: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        let indent_unit = IndentUnit::infer(raw.iter().map(|(_, line)| *line));

        let mut lines = Vec::with_capacity(raw.len());
        let mut skipped = 0;
        for (line_number, line) in raw {
            let name = extract_name(line);
            if name.is_empty() {
                skipped += 1;
                continue;
            }
            lines.push(OutlineLine {
                level: indent_unit.level_of(line),
                name,
                line_number,
            });
        }

        Self {
            lines,
            indent_unit,
            skipped,
        }
    }

    pub fn indent_unit(&self) -> IndentUnit {
        self.indent_unit
    }

    /// Lines that will become sections, in input order
    pub fn lines(&self) -> &[OutlineLine<'src>] {
        &self.lines
    }

    /// Non-blank lines dropped because no name remained after marker removal
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Assemble the forest, drawing a fresh id for every section
    pub fn parse(&self, ids: &mut IDGenerator) -> Forest {
        // Path from a root to the most recently created section. A section is
        // attached to its parent only once it is popped, so children are
        // complete by then.
        let mut stack: Vec<(usize, Section)> = Vec::new();
        let mut roots: Forest = Vec::new();

        for line in &self.lines {
            while stack
                .last()
                .is_some_and(|(level, _)| *level >= line.level)
            {
                close_top(&mut stack, &mut roots);
            }

            let parent_name = stack.last().map(|(_, parent)| parent.name.as_str());
            let section = Section::new(ids.new_id(), line.name, parent_name);
            stack.push((line.level, section));
        }

        while !stack.is_empty() {
            close_top(&mut stack, &mut roots);
        }

        tracing::debug!(
            "parsed outline: {} sections from {} lines ({} skipped, indent {:?})",
            self.lines.len(),
            self.lines.len() + self.skipped,
            self.skipped,
            self.indent_unit
        );

        roots
    }
}

/// Pop the top of the stack and attach it to the new top, or to the roots
fn close_top(stack: &mut Vec<(usize, Section)>, roots: &mut Forest) {
    if let Some((_, section)) = stack.pop() {
        let node = Arc::new(section);
        match stack.last_mut() {
            Some((_, parent)) => parent.sub_sections.push(node),
            None => roots.push(node),
        }
    }
}

/// Parse an indented text outline using a fresh id generator
pub fn parse_text_outline(text: &str) -> Forest {
    let mut ids = IDGenerator::fresh();
    parse_text_outline_with(text, &mut ids)
}

/// Parse an indented text outline, drawing ids from `ids`
pub fn parse_text_outline_with(text: &str, ids: &mut IDGenerator) -> Forest {
    OutlineParser::new(text).parse(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(forest: &Forest) -> Vec<&str> {
        forest.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_numbered_outline_with_two_space_indent() {
        let text = "1. Introduction\n  1.1 Background\n  1.2 Problem Statement\n2. Methodology\n";
        let forest = parse_text_outline(text);

        assert_eq!(names(&forest), vec!["1. Introduction", "2. Methodology"]);
        assert_eq!(
            names(&forest[0].sub_sections),
            vec!["1.1 Background", "1.2 Problem Statement"]
        );
        assert!(forest[1].is_leaf());
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_text_outline("").is_empty());
        assert!(parse_text_outline("\n\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_marker_only_lines_are_skipped() {
        let parser = OutlineParser::new("- \nIntroduction\n  *\n  Scope");
        assert_eq!(parser.skipped(), 2);

        let forest = parser.parse(&mut IDGenerator::new("test"));
        assert_eq!(names(&forest), vec!["Introduction"]);
        assert_eq!(names(&forest[0].sub_sections), vec!["Scope"]);
    }

    #[test]
    fn test_names_starting_with_marker_characters_survive() {
        let forest = parse_text_outline("- Results\n  -5 Degrees\n  *Note*");
        assert_eq!(names(&forest), vec!["Results"]);
        assert_eq!(names(&forest[0].sub_sections), vec!["-5 Degrees", "*Note*"]);
    }

    #[test]
    fn test_tab_indentation() {
        let text = "Introduction\n\tBackground\n\t\tHistory\nConclusion";
        let parser = OutlineParser::new(text);
        assert_eq!(parser.indent_unit(), IndentUnit::Tabs);

        let forest = parser.parse(&mut IDGenerator::new("test"));
        assert_eq!(names(&forest), vec!["Introduction", "Conclusion"]);
        assert_eq!(forest[0].sub_sections[0].sub_sections[0].name, "History");
    }

    #[test]
    fn test_indent_unit_inference() {
        assert_eq!(IndentUnit::infer(["A", "    B"]), IndentUnit::Spaces(4));
        assert_eq!(IndentUnit::infer(["A", "        B"]), IndentUnit::Spaces(4));
        assert_eq!(IndentUnit::infer(["A", "      B"]), IndentUnit::Spaces(2));
        assert_eq!(IndentUnit::infer(["A", "   B"]), IndentUnit::Spaces(3));
        assert_eq!(IndentUnit::infer(["A", "B"]), IndentUnit::DEFAULT);
        assert_eq!(IndentUnit::infer(["A", "  B", "\tC"]), IndentUnit::Tabs);
    }

    #[test]
    fn test_four_space_outline_with_bullets() {
        let text = "- Literature Review\n    - Existing Systems\n        - Limitations\n    - Gaps\n- Design";
        let forest = parse_text_outline(text);

        assert_eq!(names(&forest), vec!["Literature Review", "Design"]);
        let review = &forest[0];
        assert_eq!(names(&review.sub_sections), vec!["Existing Systems", "Gaps"]);
        assert_eq!(names(&review.sub_sections[0].sub_sections), vec!["Limitations"]);
        assert!(review.sub_sections[1].is_leaf());
    }

    #[test]
    fn test_dedent_past_several_levels() {
        let text = "A\n  B\n    C\n      D\nE";
        let forest = parse_text_outline(text);

        assert_eq!(names(&forest), vec!["A", "E"]);
        assert_eq!(forest[0].sub_sections[0].sub_sections[0].sub_sections[0].name, "D");
    }

    #[test]
    fn test_indented_first_line_becomes_root() {
        let forest = parse_text_outline("    Overview\n    Scope\nAppendix");
        assert_eq!(names(&forest), vec!["Overview", "Scope", "Appendix"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let forest = parse_text_outline("Introduction\r\n  Background\r\n");
        assert_eq!(forest[0].sub_sections[0].name, "Background");
    }

    #[test]
    fn test_child_prompt_mentions_parent() {
        let forest = parse_text_outline("Introduction\n  Background");
        assert_eq!(
            forest[0].sub_sections[0].prompt,
            "Write the 'Background' section of 'Introduction'"
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let forest = parse_text_outline("A\n  B\n  C\nD\n  E");
        let mut ids = Vec::new();
        for root in &forest {
            ids.push(root.id.clone());
            for child in &root.sub_sections {
                ids.push(child.id.clone());
            }
        }
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(count, 5);
    }
}
