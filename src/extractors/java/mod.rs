/// Java extractor
///
/// This module is organized into focused sub-modules:
/// - imports_packages: package declaration (or path inference) and imports
/// - classes: class, interface, enum, record and annotation types with members
/// - annotations: `annotated_with` edges from modifiers
/// - relationships: method invocations and object creation as calls
///
/// Type and member names are fully qualified: `com.acme.Outer.Inner.method`.
mod annotations;
mod classes;
mod imports_packages;
mod relationships;

use crate::extractors::base::imports::ImportContext;
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::Tree;

pub struct JavaExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> JavaExtractor<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::Java, file_path, content),
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
        run_step(path, "types", || {
            self.extract_types(root, package.as_deref(), &mut results)
        });
        run_step(path, "calls", || {
            self.extract_calls(root, &results.symbols, &mut results.dependencies)
        });

        results
    }
}

/// `Base<T>` and `java.util.List<String>` name the raw type
fn raw_type_name(text: &str) -> String {
    let head = text.split('<').next().unwrap_or(text);
    head.trim().to_string()
}

/// `prefix.name`, or `name` when there is no package
fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}.{}", prefix, name),
        None => name.to_string(),
    }
}
