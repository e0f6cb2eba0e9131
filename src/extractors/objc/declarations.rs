use super::top_level;
use crate::extractors::base::imports::{is_external_import, ImportContext};
use crate::extractors::base::tree_methods::{children, find_nodes_by_types};
use crate::extractors::base::{
    relation_edges, DependencyKind, ExtractionResults, ParsedDependency, ParsedSymbol, SymbolKind,
    SymbolOptions,
};
use anyhow::Result;
use tree_sitter::Node;

const DECLARATION_KINDS: &[&str] = &["class_interface", "class_implementation", "protocol_declaration"];

/// Imports, interfaces, categories, protocols and implementations
impl super::ObjCExtractor<'_> {
    pub(super) fn extract_imports(
        &self,
        root: Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        let context = ImportContext::default();
        for include in find_nodes_by_types(&root, &["preproc_include", "preproc_import"]) {
            let Some(path) = include
                .child_by_field_name("path")
                .or_else(|| {
                    children(&include)
                        .into_iter()
                        .find(|c| matches!(c.kind(), "system_lib_string" | "string_literal"))
                })
            else {
                continue;
            };
            let text = self.base.get_node_text(&path);
            let target = text.trim_matches(|c| matches!(c, '<' | '>' | '"'));
            if target.is_empty() {
                continue;
            }
            let is_external = is_external_import(self.base.language, target, &context);
            dependencies.push(ParsedDependency::import("", target, target, is_external));
        }
        Ok(())
    }

    /// Interfaces come from headers and implementations from implementation
    /// files; categories and protocols from both
    pub(super) fn extract_declarations(&self, root: Node, results: &mut ExtractionResults) -> Result<()> {
        let is_header = self.base.is_header();
        for node in top_level(&root, DECLARATION_KINDS) {
            let symbol = match node.kind() {
                "class_interface" => match self.category_name(&node) {
                    Some(category) => self.category_symbol(&node, &category, &mut results.dependencies),
                    None if is_header && !self.is_class_extension(&node) => {
                        self.interface_symbol(&node, &mut results.dependencies)
                    }
                    None => None,
                },
                "class_implementation" if !is_header => {
                    self.implementation_symbol(&node, &mut results.dependencies)
                }
                "protocol_declaration" => self.protocol_symbol(&node),
                _ => None,
            };
            results.symbols.extend(symbol);
        }
        Ok(())
    }

    fn interface_symbol(
        &self,
        node: &Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let name = self.class_name(node)?;
        if let Some(superclass) = self.superclass(node) {
            dependencies.push(ParsedDependency::new(DependencyKind::Extends, name.as_str(), superclass));
        }
        dependencies.extend(relation_edges(
            DependencyKind::Conforms,
            &name,
            &self.adopted_protocols(node),
        ));
        Some(self.base.create_symbol(
            node,
            name,
            SymbolKind::Interface,
            SymbolOptions {
                signature: Some(self.base.first_line_signature(node)),
                docstring: self.base.find_doc_comment(node),
                children: self.interface_members(node),
            },
        ))
    }

    /// `@interface Person (Greeting)` is named `Person(Greeting)` and extends `Person`
    fn category_symbol(
        &self,
        node: &Node,
        category: &str,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let class = self.class_name(node)?;
        let name = format!("{}({})", class, category);
        dependencies.push(ParsedDependency::new(DependencyKind::Extends, name.as_str(), class));
        dependencies.extend(relation_edges(
            DependencyKind::Conforms,
            &name,
            &self.adopted_protocols(node),
        ));
        Some(self.base.create_symbol(
            node,
            name,
            SymbolKind::Category,
            SymbolOptions {
                signature: Some(self.base.first_line_signature(node)),
                docstring: self.base.find_doc_comment(node),
                children: self.interface_members(node),
            },
        ))
    }

    fn protocol_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let name = self.class_name(node)?;
        Some(self.base.create_symbol(
            node,
            name,
            SymbolKind::Protocol,
            SymbolOptions {
                signature: Some(self.base.first_line_signature(node)),
                docstring: self.base.find_doc_comment(node),
                children: self.interface_members(node),
            },
        ))
    }

    /// The implementation also links itself to the interface of the same name
    fn implementation_symbol(
        &self,
        node: &Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let name = self.class_name(node)?;
        dependencies.push(ParsedDependency::new(
            DependencyKind::ImplementsHeader,
            name.as_str(),
            name.as_str(),
        ));
        Some(self.base.create_symbol(
            node,
            name,
            SymbolKind::Implementation,
            SymbolOptions {
                signature: Some(self.base.first_line_signature(node)),
                docstring: self.base.find_doc_comment(node),
                children: self.implementation_members(node),
            },
        ))
    }

    fn class_name(&self, node: &Node) -> Option<String> {
        node.child_by_field_name("name")
            .or_else(|| children(node).into_iter().find(|c| c.kind() == "identifier"))
            .map(|n| self.base.get_node_text(&n))
    }

    /// Identifier inside `( ... )` after the class name
    fn category_name(&self, node: &Node) -> Option<String> {
        if let Some(category) = node.child_by_field_name("category") {
            return Some(self.base.get_node_text(&category));
        }
        children(node)
            .into_iter()
            .skip_while(|c| c.kind() != "(")
            .take_while(|c| c.kind() != ")")
            .find(|c| c.kind() == "identifier")
            .map(|c| self.base.get_node_text(&c))
    }

    /// `@interface Person ()` declares private members of the implementation
    fn is_class_extension(&self, node: &Node) -> bool {
        children(node).iter().any(|c| c.kind() == "(")
    }

    /// Name following `:`
    fn superclass(&self, node: &Node) -> Option<String> {
        let reference = node.child_by_field_name("superclass").or_else(|| {
            children(node)
                .into_iter()
                .skip_while(|c| c.kind() != ":")
                .find(|c| c.is_named())
        })?;
        let name = match reference.kind() {
            "identifier" | "type_identifier" => reference,
            _ => find_nodes_by_types(&reference, &["identifier", "type_identifier"])
                .into_iter()
                .next()?,
        };
        Some(self.base.get_node_text(&name))
    }

    /// `<NSCoding, NSCopying>` in declaration order
    fn adopted_protocols(&self, node: &Node) -> Vec<String> {
        children(node)
            .iter()
            .filter(|c| {
                matches!(
                    c.kind(),
                    "protocol_qualifiers" | "parameterized_arguments" | "protocol_reference_list"
                )
            })
            .flat_map(|list| find_nodes_by_types(list, &["identifier", "type_identifier"]))
            .map(|n| self.base.get_node_text(&n))
            .collect()
    }
}
