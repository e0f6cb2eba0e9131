// BaseExtractor: shared state and text helpers for every language extractor
//
// Holds the file being extracted (path, language, borrowed content) and the
// comment/signature helpers all extractors use.

use anyhow::Result;
use tracing::debug;
use tree_sitter::Node;

use crate::language::Language;
use crate::syntax::{self, Capture};

/// Base implementation for language extractors
pub struct BaseExtractor<'a> {
    pub language: Language,
    pub file_path: &'a str,
    pub content: &'a str,
}

/// Run one extraction step; a failing step is logged and extraction continues.
pub fn run_step<F>(file_path: &str, step: &str, f: F)
where
    F: FnOnce() -> Result<()>,
{
    if let Err(e) = f() {
        debug!("skipping {} for {}: {}", step, file_path, e);
    }
}

impl<'a> BaseExtractor<'a> {
    pub fn new(language: Language, file_path: &'a str, content: &'a str) -> Self {
        Self {
            language,
            file_path,
            content,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Structural query over `node` with this file's grammar and content
    pub fn query<'t>(&self, node: Node<'t>, pattern: &str) -> Result<Vec<Capture<'t>>> {
        syntax::query(node, pattern, self.language, self.content.as_bytes())
    }

    /// Whether the current file is a C-family header
    pub fn is_header(&self) -> bool {
        is_header_path(self.file_path)
    }

    /// Find documentation comment for a node.
    ///
    /// Collects the contiguous run of comments directly above the node (no blank
    /// line in between) and strips their markers. Falls back to the wrapping
    /// node for decorated/templated declarations.
    pub fn find_doc_comment(&self, node: &Node) -> Option<String> {
        let mut comments = Vec::new();
        let mut expected_row = node.start_position().row;
        let mut current = node.prev_sibling();
        while let Some(sibling) = current {
            if !sibling.kind().contains("comment") {
                break;
            }
            // Comment must end on the line directly above (or the same line)
            if sibling.end_position().row + 1 < expected_row {
                break;
            }
            comments.push(self.get_node_text(&sibling));
            expected_row = sibling.start_position().row;
            current = sibling.prev_sibling();
        }

        if comments.is_empty() {
            if let Some(parent) = node.parent() {
                if matches!(
                    parent.kind(),
                    "template_declaration" | "decorated_definition" | "export_declaration"
                ) {
                    return self.find_doc_comment(&parent);
                }
            }
            return None;
        }

        // Reverse to get original order (top to bottom)
        comments.reverse();
        let cleaned = comments
            .iter()
            .map(|c| clean_comment(c))
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    /// Declaration text up to the body: stops before `{` or after `;`,
    /// lines joined by single spaces.
    pub fn signature_until_body(&self, node: &Node) -> String {
        let text = self.get_node_text(node);
        let cut = match (text.find('{'), text.find(';')) {
            (Some(brace), Some(semi)) if semi < brace => &text[..=semi],
            (Some(brace), _) => &text[..brace],
            (None, Some(semi)) => &text[..=semi],
            (None, None) => text.as_str(),
        };
        collapse_whitespace(cut)
    }

    /// Declaration text before the child in `field` (usually `body`), whitespace collapsed
    pub fn text_before_field(&self, node: &Node, field: &str) -> Option<String> {
        let body = node.child_by_field_name(field)?;
        let text = self.content.get(node.start_byte()..body.start_byte())?;
        Some(collapse_whitespace(text))
    }

    /// First line of the declaration with a trailing `{` removed
    pub fn first_line_signature(&self, node: &Node) -> String {
        let text = self.get_node_text(node);
        let first = text.lines().next().unwrap_or("").trim();
        first.trim_end_matches('{').trim_end().to_string()
    }
}

/// Headers pair with implementation units in the matcher
pub fn is_header_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    [".h", ".hpp", ".hh", ".hxx"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip comment markers from a single comment node's text
pub fn clean_comment(text: &str) -> String {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut line = raw.trim();
        for prefix in ["/**", "/*!", "/*", "///", "//!", "//", "#"] {
            if let Some(rest) = line.strip_prefix(prefix) {
                line = rest;
                break;
            }
        }
        line = line.trim_end();
        if let Some(rest) = line.strip_suffix("*/") {
            line = rest;
        }
        let line = line.trim();
        let line = line.strip_prefix('*').map(str::trim_start).unwrap_or(line);
        lines.push(line.to_string());
    }

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Strip quote delimiters (and string prefixes) from a Python docstring literal
pub fn clean_docstring(text: &str) -> String {
    let trimmed = text
        .trim()
        .trim_start_matches(|c: char| matches!(c, 'r' | 'R' | 'u' | 'U' | 'b' | 'B' | 'f' | 'F'));
    let inner = ["\"\"\"", "'''", "\"", "'"]
        .iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(trimmed);
    inner
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_block_comment() {
        let text = "/**\n * Draws the widget.\n * @param x offset\n */";
        assert_eq!(clean_comment(text), "Draws the widget.\n@param x offset");
    }

    #[test]
    fn test_clean_line_comments() {
        assert_eq!(clean_comment("/// Returns the size"), "Returns the size");
        assert_eq!(clean_comment("//! crate docs"), "crate docs");
        assert_eq!(clean_comment("// Hello greets"), "Hello greets");
        assert_eq!(clean_comment("/*! Qt style */"), "Qt style");
    }

    #[test]
    fn test_clean_docstring() {
        assert_eq!(clean_docstring("\"\"\"Compute things.\"\"\""), "Compute things.");
        assert_eq!(
            clean_docstring("'''\n    First line.\n    Second.\n    '''"),
            "First line.\nSecond."
        );
        assert_eq!(clean_docstring("r\"raw\""), "raw");
    }

    #[test]
    fn test_header_detection() {
        assert!(is_header_path("include/Widget.HPP"));
        assert!(is_header_path("a/b.h"));
        assert!(!is_header_path("a/b.cpp"));
        assert!(!is_header_path("a/b.mm"));
    }

    #[test]
    fn test_run_step_swallows_errors() {
        let mut ran_after = false;
        run_step("a.go", "failing", || Err(anyhow::anyhow!("boom")));
        run_step("a.go", "next", || {
            ran_after = true;
            Ok(())
        });
        assert!(ran_after);
    }
}
