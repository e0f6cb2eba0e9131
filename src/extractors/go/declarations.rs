use crate::extractors::base::imports::is_external_import;
use crate::extractors::base::tree_methods::find_child_by_type;
use crate::extractors::base::{
    ExtractionResults, ParsedDependency, ParsedSymbol, SymbolKind, SymbolOptions,
};
use anyhow::{anyhow, Result};
use tree_sitter::Node;

/// Package, import, function and method extraction for Go
impl super::GoExtractor<'_> {
    pub(super) fn extract_package(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        let clause = find_child_by_type(&root, "package_clause")
            .ok_or_else(|| anyhow!("no package clause"))?;
        let name_node = find_child_by_type(&clause, "package_identifier")
            .ok_or_else(|| anyhow!("package clause without a name"))?;
        let name = self.base.get_node_text(&name_node);

        symbols.push(self.base.create_symbol(
            &clause,
            name.clone(),
            SymbolKind::Package,
            SymbolOptions {
                signature: Some(format!("package {}", name)),
                docstring: self.base.find_doc_comment(&clause),
                ..Default::default()
            },
        ));
        Ok(())
    }

    /// Imports use the package name as source for file-level edges
    pub(super) fn extract_imports(&self, root: Node, results: &mut ExtractionResults) -> Result<()> {
        let package = results
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Package)
            .map(|s| s.name.clone())
            .unwrap_or_default();

        for capture in self.base.query(root, "(import_spec path: (_) @import.path)")? {
            let import_path = self
                .base
                .get_node_text(&capture.node)
                .trim_matches(|c| c == '"' || c == '`')
                .to_string();
            if import_path.is_empty() {
                continue;
            }
            let is_external = is_external_import(self.base.language, &import_path, &self.context);
            results.dependencies.push(ParsedDependency::import(
                package.clone(),
                import_path.clone(),
                import_path,
                is_external,
            ));
        }
        Ok(())
    }

    pub(super) fn extract_functions(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        for capture in self.base.query(root, "(function_declaration) @func.def")? {
            let node = capture.node;
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            symbols.push(self.base.create_symbol(
                &node,
                self.base.get_node_text(&name_node),
                SymbolKind::Function,
                SymbolOptions {
                    signature: Some(self.base.first_line_signature(&node)),
                    docstring: self.base.find_doc_comment(&node),
                    ..Default::default()
                },
            ));
        }
        Ok(())
    }

    /// Methods keep their bare name; the receiver shows in the signature
    pub(super) fn extract_methods(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        for capture in self.base.query(root, "(method_declaration) @method.def")? {
            let node = capture.node;
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            symbols.push(self.base.create_symbol(
                &node,
                self.base.get_node_text(&name_node),
                SymbolKind::Method,
                SymbolOptions {
                    signature: Some(self.base.first_line_signature(&node)),
                    docstring: self.base.find_doc_comment(&node),
                    ..Default::default()
                },
            ));
        }
        Ok(())
    }
}
