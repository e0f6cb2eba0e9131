use super::{declared_name, file_scope};
use crate::extractors::base::imports::is_external_c_include;
use crate::extractors::base::tree_methods::find_nodes_by_types;
use crate::extractors::base::{ParsedDependency, ParsedSymbol, SymbolKind, SymbolOptions};
use anyhow::Result;
use tree_sitter::Node;

/// Includes, macros, functions and variables
impl super::CExtractor<'_> {
    pub(super) fn extract_includes(
        &self,
        root: Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for include in find_nodes_by_types(&root, &["preproc_include"]) {
            let Some(path) = include.child_by_field_name("path") else {
                continue;
            };
            let is_system = path.kind() == "system_lib_string";
            let text = self.base.get_node_text(&path);
            let target = text.trim_matches(|c| matches!(c, '<' | '>' | '"'));
            if !target.is_empty() {
                dependencies.push(ParsedDependency::import(
                    "",
                    target,
                    target,
                    is_external_c_include(target, is_system),
                ));
            }
        }
        Ok(())
    }

    pub(super) fn extract_declarations(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        for item in file_scope(&root) {
            match item.kind() {
                "preproc_def" => symbols.extend(self.macro_symbol(&item, SymbolKind::Macro)),
                "preproc_function_def" => {
                    symbols.extend(self.macro_symbol(&item, SymbolKind::FunctionMacro))
                }
                "function_definition" => symbols.extend(self.function_symbol(&item)),
                "declaration" => symbols.extend(self.declaration_symbols(&item)),
                "type_definition" => symbols.extend(self.typedef_symbols(&item)),
                "struct_specifier" | "union_specifier" | "enum_specifier" => {
                    symbols.extend(self.type_symbol(&item))
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn macro_symbol(&self, node: &Node, kind: SymbolKind) -> Option<ParsedSymbol> {
        let name = node.child_by_field_name("name")?;
        Some(self.base.create_symbol(
            node,
            self.base.get_node_text(&name),
            kind,
            SymbolOptions {
                signature: Some(self.base.get_node_text(node).trim().to_string()),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    fn function_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let declarator = self.function_declarator(node)?;
        let name = declared_name(&declarator)?;
        let kind = if self.has_storage_class(node, "static") {
            SymbolKind::StaticFunction
        } else {
            SymbolKind::Function
        };
        let signature = self
            .base
            .text_before_field(node, "body")
            .unwrap_or_else(|| self.base.signature_until_body(node));
        Some(self.base.create_symbol(
            node,
            self.base.get_node_text(&name),
            kind,
            SymbolOptions {
                signature: Some(signature),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// Prototypes, or global variables (one per declarator); a struct body in the
    /// declared type is recorded as well
    fn declaration_symbols(&self, node: &Node) -> Vec<ParsedSymbol> {
        let mut symbols = Vec::new();
        if let Some(specifier) = node.child_by_field_name("type") {
            if matches!(
                specifier.kind(),
                "struct_specifier" | "union_specifier" | "enum_specifier"
            ) {
                symbols.extend(self.type_symbol(&specifier));
            }
        }

        let signature = self
            .base
            .signature_until_body(node)
            .trim_end_matches(';')
            .trim_end()
            .to_string();
        let docstring = self.base.find_doc_comment(node);

        if let Some(declarator) = self.function_declarator(node) {
            if let Some(name) = declared_name(&declarator) {
                symbols.push(self.base.create_symbol(
                    node,
                    self.base.get_node_text(&name),
                    SymbolKind::FunctionDeclaration,
                    SymbolOptions {
                        signature: Some(signature),
                        docstring,
                        ..Default::default()
                    },
                ));
            }
            return symbols;
        }

        let kind = if self.has_storage_class(node, "extern") {
            SymbolKind::ExternVariable
        } else {
            SymbolKind::GlobalVariable
        };
        let mut cursor = node.walk();
        let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        for declarator in declarators {
            if let Some(name) = declared_name(&declarator) {
                symbols.push(self.base.create_symbol(
                    node,
                    self.base.get_node_text(&name),
                    kind,
                    SymbolOptions {
                        signature: Some(signature.clone()),
                        docstring: docstring.clone(),
                        ..Default::default()
                    },
                ));
            }
        }
        symbols
    }

    /// The function declarator under pointer/parenthesized wrappers, if this declares a function
    fn function_declarator<'t>(&self, node: &Node<'t>) -> Option<Node<'t>> {
        let mut current = node.child_by_field_name("declarator")?;
        loop {
            match current.kind() {
                "function_declarator" => return Some(current),
                "pointer_declarator" | "parenthesized_declarator" | "attributed_declarator" => {
                    current = current
                        .child_by_field_name("declarator")
                        .or_else(|| current.named_child(0))?;
                }
                _ => return None,
            }
        }
    }

    fn has_storage_class(&self, node: &Node, keyword: &str) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .filter(|c| c.kind() == "storage_class_specifier")
            .any(|c| self.base.get_node_text(&c) == keyword);
        found
    }
}
