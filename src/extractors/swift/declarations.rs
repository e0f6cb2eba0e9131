use super::top_level;
use crate::extractors::base::imports::is_external_import;
use crate::extractors::base::{ParsedDependency, ParsedSymbol, SymbolKind, SymbolOptions};
use anyhow::Result;
use tree_sitter::Node;

/// `import struct Foundation.Date` names a declaration kind before the module
const IMPORT_KINDS: &[&str] = &[
    "typealias", "struct", "class", "enum", "protocol", "let", "var", "func",
];

/// Imports plus file-scope functions and properties
impl super::SwiftExtractor<'_> {
    /// Swift has no package statement; imports have an empty source
    pub(super) fn extract_imports(
        &self,
        root: Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for decl in top_level(&root, &["import_declaration"]) {
            let Some(target) = import_target(&self.base.get_node_text(&decl)) else {
                continue;
            };
            let module = target.split('.').next().unwrap_or(&target).to_string();
            let is_external = is_external_import(self.base.language, &target, &self.context);
            dependencies.push(ParsedDependency::import("", target, module, is_external));
        }
        Ok(())
    }

    pub(super) fn extract_functions(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        for node in top_level(&root, &["function_declaration"]) {
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            symbols.push(self.base.create_symbol(
                &node,
                self.base.get_node_text(&name_node),
                SymbolKind::Function,
                SymbolOptions {
                    docstring: self.base.find_doc_comment(&node),
                    ..Default::default()
                },
            ));
        }
        Ok(())
    }

    pub(super) fn extract_properties(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        for node in top_level(&root, &["property_declaration"]) {
            symbols.extend(self.property_symbol(&node));
        }
        Ok(())
    }
}

/// `@testable import struct UIKit.UIView` -> `UIKit.UIView`
fn import_target(declaration: &str) -> Option<String> {
    declaration
        .split_whitespace()
        .skip_while(|word| *word != "import")
        .skip(1)
        .find(|word| !IMPORT_KINDS.contains(word))
        .map(|word| word.trim_end_matches(';').to_string())
        .filter(|word| !word.is_empty())
}
