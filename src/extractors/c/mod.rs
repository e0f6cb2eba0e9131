//! C Extractor
//!
//! Handles:
//! - `#include` directives, object-like and function-like macros
//! - Function prototypes, definitions (`static` ones apart) and global/extern variables
//! - Structs and unions with fields, enums with their constants, typedefs
//! - Call relationships (implementation files only)

mod declarations;
mod relationships;
mod types;

use crate::extractors::base::tree_methods::children;
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::{Node, Tree};

pub struct CExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> CExtractor<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::C, file_path, content),
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
            self.extract_declarations(root, &mut results.symbols)
        });
        if !self.base.is_header() {
            run_step(path, "calls", || {
                self.extract_calls(root, &results.symbols, &mut results.dependencies)
            });
        }

        results
    }
}

/// File-scope items, looking through `#if`/`#ifdef` blocks and ERROR wrappers
fn file_scope<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut items = Vec::new();
    for child in children(node) {
        match child.kind() {
            "preproc_if" | "preproc_ifdef" | "preproc_else" | "preproc_elif" => {
                items.extend(file_scope(&child));
            }
            _ if child.is_error() => items.extend(file_scope(&child)),
            _ => items.push(child),
        }
    }
    items
}

/// Follow a declarator chain (`*p`, `a[4]`, `x = 1`, `(f)`) down to its identifier node
fn declared_name<'t>(declarator: &Node<'t>) -> Option<Node<'t>> {
    let mut current = *declarator;
    loop {
        match current.kind() {
            "identifier" | "field_identifier" | "type_identifier" => return Some(current),
            "init_declarator" | "pointer_declarator" | "array_declarator"
            | "parenthesized_declarator" | "function_declarator" | "attributed_declarator" => {
                current = current
                    .child_by_field_name("declarator")
                    .or_else(|| current.named_child(0))?;
            }
            _ => return None,
        }
    }
}
