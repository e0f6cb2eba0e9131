use crate::extractors::base::imports::is_external_import;
use crate::extractors::base::tree_methods::find_child_by_type;
use crate::extractors::base::extractor::clean_docstring;
use crate::extractors::base::{ParsedDependency, ParsedSymbol, SymbolKind, SymbolOptions};
use anyhow::Result;
use tree_sitter::Node;

/// Module docstring and import extraction for Python
impl super::PythonExtractor<'_> {
    pub(super) fn extract_module_docstring(
        &self,
        root: Node,
        symbols: &mut Vec<ParsedSymbol>,
    ) -> Result<()> {
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "comment" => continue,
                "expression_statement" => {
                    if let Some(string) = find_child_by_type(&child, "string") {
                        symbols.push(self.base.create_symbol(
                            &string,
                            "__module__",
                            SymbolKind::Module,
                            SymbolOptions {
                                signature: Some(String::new()),
                                docstring: Some(clean_docstring(&self.base.get_node_text(&string))),
                                ..Default::default()
                            },
                        ));
                    }
                    break;
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// `import a.b` then `from x import y`; file-level edges carry no source
    pub(super) fn extract_imports(
        &self,
        root: Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        let patterns = [
            "(import_statement name: [(dotted_name) (aliased_import name: (dotted_name))] @import.name)",
            "(import_from_statement module_name: (_) @import.module)",
        ];
        for pattern in patterns {
            for capture in self.base.query(root, pattern)? {
                let mut module = self.base.get_node_text(&capture.node);
                if capture.node.kind() == "aliased_import" {
                    if let Some(name) = capture.node.child_by_field_name("name") {
                        module = self.base.get_node_text(&name);
                    }
                }
                let is_external = is_external_import(self.base.language, &module, &self.context);
                dependencies.push(ParsedDependency::import(
                    "",
                    module.clone(),
                    module,
                    is_external,
                ));
            }
        }
        Ok(())
    }
}
