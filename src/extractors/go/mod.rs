mod declarations;
mod relationships;
mod types;

use crate::extractors::base::imports::{infer_go_module, ImportContext};
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::Tree;

/// Go language extractor that handles Go-specific constructs including:
/// - Package clause and imports (module-aware internal/external split)
/// - Functions and methods with receivers
/// - Structs (with fields), interfaces (with method sets) and other type specs
/// - Call relationships from functions and methods
pub struct GoExtractor<'a> {
    base: BaseExtractor<'a>,
    context: ImportContext,
}

impl<'a> GoExtractor<'a> {
    pub fn new(file_path: &'a str, abs_path: &str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::Go, file_path, content),
            context: ImportContext::new(infer_go_module(abs_path)),
        }
    }

    /// Extract symbols and dependencies; each step is independent and a failing
    /// step never aborts the file.
    pub fn extract(&self, tree: &Tree) -> ExtractionResults {
        let root = tree.root_node();
        let path = self.base.file_path;
        let mut results = ExtractionResults::default();

        run_step(path, "package", || self.extract_package(root, &mut results.symbols));
        run_step(path, "imports", || self.extract_imports(root, &mut results));
        run_step(path, "functions", || self.extract_functions(root, &mut results.symbols));
        run_step(path, "methods", || self.extract_methods(root, &mut results.symbols));
        run_step(path, "types", || self.extract_type_specs(root, &mut results.symbols));
        run_step(path, "calls", || {
            self.extract_calls(root, &results.symbols, &mut results.dependencies)
        });

        results
    }
}
