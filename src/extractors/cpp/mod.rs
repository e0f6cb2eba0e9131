//! C++ Extractor
//!
//! Handles:
//! - `#include` directives (standard library and local headers are internal)
//! - Namespaces, with their declarations as children
//! - Classes, structs and unions with methods, constructors, operators and fields
//! - Class and function templates
//! - Free functions, function declarations and out-of-class member definitions
//! - `extends` from base-class clauses and `overrides` from the `override` specifier
//! - Call relationships (implementation files only)

mod classes;
mod declarations;
mod functions;
mod relationships;

use crate::extractors::base::extractor::collapse_whitespace;
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::{Node, Tree};

pub struct CppExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> CppExtractor<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::Cpp, file_path, content),
        }
    }

    pub fn extract(&self, tree: &Tree) -> ExtractionResults {
        let root = tree.root_node();
        let path = self.base.file_path;
        let mut results = ExtractionResults::default();

        run_step(path, "includes", || {
            self.extract_includes(root, &mut results.dependencies)
        });
        run_step(path, "declarations", || {
            self.extract_declarations(root, &mut results)
        });
        // Headers only declare; their inline bodies are attributed to the implementation unit
        if !self.base.is_header() {
            run_step(path, "calls", || {
                self.extract_calls(root, &results.symbols, &mut results.dependencies)
            });
        }

        results
    }

    /// Declaration text from `outer` up to the start of `body`
    fn text_until(&self, outer: &Node, body: &Node) -> String {
        self.base
            .content
            .get(outer.start_byte()..body.start_byte())
            .map(collapse_whitespace)
            .unwrap_or_default()
    }
}

/// `std::vector<int>` -> `std::vector`
fn raw_type_name(text: &str) -> String {
    text.split('<').next().unwrap_or(text).trim().to_string()
}
