//! Syntax Provider - tree-sitter parsing and structural queries
//!
//! Grammar tables are loaded once into a process-wide read-only map. Every
//! parse builds its own `Parser`, so workers never share mutable parser
//! state. Compiled queries are cached per (language, pattern).

use crate::language::Language;
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use tree_sitter::{Node, Parser, Query, QueryCursor, StreamingIterator, Tree};

static GRAMMARS: Lazy<HashMap<Language, tree_sitter::Language>> = Lazy::new(|| {
    Language::ALL
        .iter()
        .map(|lang| (*lang, lang.tree_sitter_language()))
        .collect()
});

static QUERY_CACHE: Lazy<RwLock<HashMap<(Language, String), Arc<Query>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Recoverable or catastrophic syntax problem reported by [`parse`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// 1-based position of the first error or missing node
    pub line: Option<u32>,
    pub column: Option<u32>,
}

/// Result of a parse: the tree may be present even when `error` is set
#[derive(Debug)]
pub struct ParseOutcome {
    pub tree: Option<Tree>,
    pub error: Option<SyntaxError>,
}

/// One captured node of a structural query
#[derive(Debug, Clone)]
pub struct Capture<'tree> {
    pub node: Node<'tree>,
    pub index: u32,
    pub name: String,
}

fn grammar(language: Language) -> tree_sitter::Language {
    GRAMMARS
        .get(&language)
        .cloned()
        .unwrap_or_else(|| language.tree_sitter_language())
}

/// Parse `content` with the grammar for `language`.
pub fn parse(content: &str, language: Language) -> ParseOutcome {
    if content.is_empty() {
        return ParseOutcome {
            tree: None,
            error: Some(SyntaxError {
                message: "empty content provided".to_string(),
                line: None,
                column: None,
            }),
        };
    }

    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&grammar(language)) {
        return ParseOutcome {
            tree: None,
            error: Some(SyntaxError {
                message: format!("failed to load {} grammar: {}", language.display_name(), e),
                line: None,
                column: None,
            }),
        };
    }

    let Some(tree) = parser.parse(content, None) else {
        return ParseOutcome {
            tree: None,
            error: Some(SyntaxError {
                message: "parser returned no tree".to_string(),
                line: None,
                column: None,
            }),
        };
    };

    let error = if tree.root_node().has_error() {
        let first = first_error_node(tree.root_node());
        Some(SyntaxError {
            message: "parse tree contains errors".to_string(),
            line: first.map(|n| n.start_position().row as u32 + 1),
            column: first.map(|n| n.start_position().column as u32 + 1),
        })
    } else {
        None
    };

    ParseOutcome {
        tree: Some(tree),
        error,
    }
}

/// First ERROR or MISSING node in document order.
///
/// Walks with a single cursor so nesting depth never grows the call stack.
pub fn first_error_node(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    loop {
        let current = cursor.node();
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        // Clean subtrees are skipped whole
        if current.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn compiled_query(language: Language, pattern: &str) -> Result<Arc<Query>> {
    let key = (language, pattern.to_string());
    if let Some(query) = QUERY_CACHE.read().get(&key) {
        return Ok(Arc::clone(query));
    }

    let query = Query::new(&grammar(language), pattern)
        .map_err(|e| anyhow!("invalid {} query: {}", language.display_name(), e))?;
    let query = Arc::new(query);
    debug!("compiled {} query ({} patterns)", language, query.pattern_count());
    QUERY_CACHE.write().insert(key, Arc::clone(&query));
    Ok(query)
}

/// Run a structural pattern query under `node`.
///
/// Captures are returned in match order, then capture order within a match.
pub fn query<'tree>(
    node: Node<'tree>,
    pattern: &str,
    language: Language,
    source: &[u8],
) -> Result<Vec<Capture<'tree>>> {
    let query = compiled_query(language, pattern)?;
    let names = query.capture_names();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, node, source);

    let mut captures = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            captures.push(Capture {
                node: capture.node,
                index: capture.index,
                name: names
                    .get(capture.index as usize)
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            });
        }
    }
    Ok(captures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_source_has_no_error() {
        let outcome = parse("package main\n", Language::Go);
        assert!(outcome.tree.is_some());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_empty_content_yields_no_tree() {
        let outcome = parse("", Language::Python);
        assert!(outcome.tree.is_none());
        assert_eq!(outcome.error.unwrap().message, "empty content provided");
    }

    #[test]
    fn test_broken_source_keeps_tree_and_reports_location() {
        let outcome = parse("def ok():\n    pass\n\ndef broken(:\n", Language::Python);
        assert!(outcome.tree.is_some());
        let error = outcome.error.expect("syntax error expected");
        assert!(error.line.unwrap() >= 1);
        assert!(error.column.unwrap() >= 1);
    }

    #[test]
    fn test_first_error_node_finds_error_or_missing() {
        let source = "def ok():\n    pass\n\nx = (1 +\ny = [\n";
        let tree = parse(source, Language::Python).tree.unwrap();
        let first = first_error_node(tree.root_node()).unwrap();
        assert!(first.is_error() || first.is_missing());

        let clean = parse("x = 1\n", Language::Python).tree.unwrap();
        assert!(first_error_node(clean.root_node()).is_none());
    }

    #[test]
    fn test_deeply_nested_error_is_located() {
        let source = format!("x = {}1\n", "(".repeat(5_000));
        let outcome = parse(&source, Language::Python);
        let error = outcome.error.expect("unbalanced parentheses");
        assert!(error.line.is_some());
        assert!(error.column.is_some());
    }

    #[test]
    fn test_query_returns_named_captures() {
        let source = "import os\nimport sys\n";
        let outcome = parse(source, Language::Python);
        let tree = outcome.tree.unwrap();
        let captures = query(
            tree.root_node(),
            "(import_statement name: (dotted_name) @module)",
            Language::Python,
            source.as_bytes(),
        )
        .unwrap();
        let names: Vec<&str> = captures
            .iter()
            .map(|c| c.node.utf8_text(source.as_bytes()).unwrap())
            .collect();
        assert_eq!(names, vec!["os", "sys"]);
        assert!(captures.iter().all(|c| c.name == "module" && c.index == 0));
    }

    #[test]
    fn test_invalid_query_is_an_error() {
        let outcome = parse("x = 1\n", Language::Python);
        let tree = outcome.tree.unwrap();
        assert!(query(tree.root_node(), "(not_a_node", Language::Python, b"x = 1\n").is_err());
    }
}
