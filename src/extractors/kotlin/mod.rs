//! Kotlin Extractor
//!
//! This extractor handles Kotlin symbol extraction including:
//! - Package header (or a package inferred from the source root) and imports
//! - Classes (data, sealed, enum), interfaces, objects and companion objects
//! - Functions: plain, extension and suspend; methods and suspend methods
//! - Properties, including `val`/`var` primary constructor parameters
//! - Supertypes from delegation specifiers, KDoc, call relationships
//!
//! Names are fully qualified with the package, members with their owner.

mod declarations;
mod relationships;
mod types;

use crate::extractors::base::imports::{package_from_source_root, ImportContext};
use crate::extractors::base::tree_methods::{children, find_child_by_type};
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::{Node, Tree};

const SOURCE_ROOTS: &[&str] = &[
    "src/main/kotlin/",
    "src/test/kotlin/",
    "src/main/java/",
    "src/",
    "kotlin/",
];

pub struct KotlinExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> KotlinExtractor<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::Kotlin, file_path, content),
        }
    }

    pub fn extract(&self, tree: &Tree) -> ExtractionResults {
        let root = tree.root_node();
        let path = self.base.file_path;
        let mut results = ExtractionResults::default();

        let package = self.package_name(root);
        let context = ImportContext::new(package.clone());

        run_step(path, "package", || {
            self.extract_package(root, package.as_deref(), &mut results.symbols)
        });
        run_step(path, "imports", || {
            self.extract_imports(root, &context, &mut results.dependencies)
        });
        run_step(path, "functions", || {
            self.extract_functions(root, package.as_deref(), &mut results.symbols)
        });
        run_step(path, "properties", || {
            self.extract_properties(root, package.as_deref(), &mut results.symbols)
        });
        run_step(path, "types", || {
            self.extract_types(root, package.as_deref(), &mut results)
        });
        run_step(path, "calls", || {
            self.extract_calls(root, &results.symbols, &mut results.dependencies)
        });

        results
    }

    fn package_name(&self, root: Node) -> Option<String> {
        let declared = find_child_by_type(&root, "package_header").map(|header| {
            let text = self.base.get_node_text(&header);
            let text = text.trim();
            text.strip_prefix("package")
                .unwrap_or(text)
                .trim()
                .trim_end_matches(';')
                .trim()
                .to_string()
        });
        declared
            .filter(|p| !p.is_empty())
            .or_else(|| package_from_source_root(self.base.file_path, SOURCE_ROOTS))
    }

    /// Declaration name: the `name` field, else the first identifier child
    fn declaration_name(&self, node: &Node) -> Option<String> {
        node.child_by_field_name("name")
            .or_else(|| {
                children(node)
                    .into_iter()
                    .find(|c| matches!(c.kind(), "identifier" | "simple_identifier" | "type_identifier"))
            })
            .map(|n| self.base.get_node_text(&n))
    }

    /// Whitespace-separated words of the `modifiers` child
    fn has_modifier(&self, node: &Node, modifier: &str) -> bool {
        find_child_by_type(node, "modifiers").is_some_and(|m| {
            self.base
                .get_node_text(&m)
                .split_whitespace()
                .any(|word| word == modifier)
        })
    }
}

/// Top-level declarations of `kinds`, including those a syntax error wrapped
fn top_level<'t>(root: &Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    for child in children(root) {
        if kinds.contains(&child.kind()) {
            found.push(child);
        } else if child.is_error() {
            found.extend(top_level(&child, kinds));
        }
    }
    found
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}.{}", prefix, name),
        None => name.to_string(),
    }
}
