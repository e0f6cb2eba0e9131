//! Swift Extractor
//!
//! Handles:
//! - Imports (module is the first word, framework imports are external)
//! - Classes, structs, enums (with cases), protocols and extensions
//! - Methods, initializers, properties and properties with observers
//! - Superclass (`extends`) and protocol conformance (`conforms`) edges
//! - Top-level functions and properties, call relationships

mod declarations;
mod members;
mod relationships;
mod types;

use crate::extractors::base::imports::ImportContext;
use crate::extractors::base::tree_methods::children;
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::{Node, Tree};

pub struct SwiftExtractor<'a> {
    base: BaseExtractor<'a>,
    context: ImportContext,
}

impl<'a> SwiftExtractor<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::Swift, file_path, content),
            context: ImportContext::default(),
        }
    }

    pub fn extract(&self, tree: &Tree) -> ExtractionResults {
        let root = tree.root_node();
        let path = self.base.file_path;
        let mut results = ExtractionResults::default();

        run_step(path, "imports", || {
            self.extract_imports(root, &mut results.dependencies)
        });
        run_step(path, "types", || self.extract_types(root, &mut results));
        run_step(path, "functions", || {
            self.extract_functions(root, &mut results.symbols)
        });
        run_step(path, "properties", || {
            self.extract_properties(root, &mut results.symbols)
        });
        run_step(path, "calls", || {
            self.extract_calls(root, &results.symbols, &mut results.dependencies)
        });

        results
    }
}

/// File-scope nodes of `kinds`, looking inside ERROR wrappers
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
