//! Python Extractor
//!
//! Handles:
//! - Module docstring (`__module__` symbol)
//! - `import` / `from ... import` statements
//! - Top-level functions (sync and async) with decorators in the signature
//! - Classes with methods classified by decorator (static/class/async)
//! - Base classes as `extends` edges, call relationships

mod decorators;
mod functions;
mod imports;
mod relationships;

use crate::extractors::base::imports::{python_package_from_path, ImportContext};
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::{Node, Tree};

pub struct PythonExtractor<'a> {
    base: BaseExtractor<'a>,
    context: ImportContext,
}

impl<'a> PythonExtractor<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::Python, file_path, content),
            context: ImportContext::new(python_package_from_path(file_path)),
        }
    }

    pub fn extract(&self, tree: &Tree) -> ExtractionResults {
        let root = tree.root_node();
        let path = self.base.file_path;
        let mut results = ExtractionResults::default();

        run_step(path, "module docstring", || {
            self.extract_module_docstring(root, &mut results.symbols)
        });
        run_step(path, "imports", || {
            self.extract_imports(root, &mut results.dependencies)
        });
        run_step(path, "functions", || {
            self.extract_functions(root, &mut results.symbols)
        });
        run_step(path, "classes", || self.extract_classes(root, &mut results));
        run_step(path, "calls", || {
            self.extract_calls(root, &results.symbols, &mut results.dependencies)
        });

        results
    }

    /// Definitions at module scope, looking through `if`/`try`/`with` blocks but
    /// never into another function or class.
    fn top_level_definitions<'t>(&self, node: Node<'t>, kind: &str, out: &mut Vec<Node<'t>>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                k if k == kind => out.push(child),
                "decorated_definition" => {
                    if let Some(def) = child.child_by_field_name("definition") {
                        if def.kind() == kind {
                            out.push(def);
                        }
                    }
                }
                "function_definition" | "class_definition" => {}
                _ => self.top_level_definitions(child, kind, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{DependencyKind, SymbolKind};
    use crate::syntax;

    fn extract(path: &str, source: &str) -> ExtractionResults {
        let tree = syntax::parse(source, Language::Python).tree.unwrap();
        PythonExtractor::new(path, source).extract(&tree)
    }

    const SOURCE: &str = r#""""Inventory helpers."""
import os
import requests.adapters
from .models import Item
from app.core import settings

@cache
def load(path: str) -> str:
    """Read a file."""
    return open(path).read()

async def fetch(url):
    return await requests.get(url)

class Store(Base, mixins.Auditable):
    """Holds items."""

    def add(self, item):
        self.items.append(item)
        validate(item)

    @staticmethod
    def create():
        return Store()

    @classmethod
    def default(cls):
        return cls()

    async def sync(self):
        pass

    def outer(self):
        def inner():
            pass
        return inner
"#;

    #[test]
    fn test_module_docstring_and_functions() {
        let results = extract("app/inventory/store.py", SOURCE);
        let module = &results.symbols[0];
        assert_eq!(module.name, "__module__");
        assert_eq!(module.kind, SymbolKind::Module);
        assert_eq!(module.docstring.as_deref(), Some("Inventory helpers."));

        let load = results.symbols.iter().find(|s| s.name == "load").unwrap();
        assert_eq!(load.kind, SymbolKind::Function);
        assert_eq!(load.signature, "@cache\ndef load(path: str) -> str:");
        assert_eq!(load.docstring.as_deref(), Some("Read a file."));

        let fetch = results.symbols.iter().find(|s| s.name == "fetch").unwrap();
        assert_eq!(fetch.kind, SymbolKind::AsyncFunction);
    }

    #[test]
    fn test_class_methods_are_classified() {
        let results = extract("app/inventory/store.py", SOURCE);
        let store = results.symbols.iter().find(|s| s.name == "Store").unwrap();
        assert_eq!(store.kind, SymbolKind::Class);
        assert_eq!(store.signature, "class Store(Base, mixins.Auditable)");
        assert_eq!(store.docstring.as_deref(), Some("Holds items."));

        let kinds: Vec<(&str, SymbolKind)> = store
            .children
            .iter()
            .map(|m| (m.name.as_str(), m.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("add", SymbolKind::Method),
                ("create", SymbolKind::StaticMethod),
                ("default", SymbolKind::ClassMethod),
                ("sync", SymbolKind::AsyncMethod),
                ("outer", SymbolKind::Method),
            ]
        );
        // Nested functions are never promoted to the top level
        assert!(results.symbols.iter().all(|s| s.name != "inner"));
    }

    #[test]
    fn test_imports_extends_and_calls() {
        let results = extract("app/inventory/store.py", SOURCE);
        let imports: Vec<(&str, bool)> = results
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Import)
            .map(|d| (d.target.as_str(), d.is_external))
            .collect();
        assert_eq!(
            imports,
            vec![
                ("os", false),
                ("requests.adapters", true),
                (".models", false),
                ("app.core", false),
            ]
        );

        let extends: Vec<(&str, &str)> = results
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Extends)
            .map(|d| (d.source.as_str(), d.target.as_str()))
            .collect();
        assert_eq!(
            extends,
            vec![("Store", "Base"), ("Store", "mixins.Auditable")]
        );

        let calls: Vec<(&str, &str)> = results
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Call)
            .map(|d| (d.source.as_str(), d.target.as_str()))
            .collect();
        assert!(calls.contains(&("add", "self.items.append")));
        assert!(calls.contains(&("add", "validate")));
        assert!(calls.contains(&("create", "Store")));
        assert!(calls.contains(&("load", "open")));
    }
}
