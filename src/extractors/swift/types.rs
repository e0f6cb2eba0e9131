use super::top_level;
use crate::extractors::base::tree_methods::{children, find_child_by_type, find_child_by_types};
use crate::extractors::base::{
    relation_edges, DependencyKind, ExtractionResults, ParsedDependency, ParsedSymbol, SymbolKind,
    SymbolOptions,
};
use anyhow::Result;
use tree_sitter::Node;

const BODY_KINDS: &[&str] = &["class_body", "enum_class_body", "protocol_body"];

/// Classes, structs, enums, extensions (all `class_declaration`) and protocols
impl super::SwiftExtractor<'_> {
    pub(super) fn extract_types(&self, root: Node, results: &mut ExtractionResults) -> Result<()> {
        for node in top_level(&root, &["class_declaration", "protocol_declaration"]) {
            if let Some(symbol) = self.type_symbol(&node, &mut results.dependencies) {
                results.symbols.push(symbol);
            }
        }
        Ok(())
    }

    pub(super) fn type_symbol(
        &self,
        node: &Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let kind = self.declaration_kind(node);
        let inherited = self.inheritance(node);

        let name = if kind == SymbolKind::Extension {
            let extended = find_child_by_types(node, &["user_type", "type_identifier"])
                .map(|t| type_name(&self.base.get_node_text(&t)))?;
            dependencies.push(ParsedDependency::new(
                DependencyKind::Extends,
                format!("extension_{}", extended),
                extended.as_str(),
            ));
            format!("extension_{}", extended)
        } else {
            let name_node = node
                .child_by_field_name("name")
                .or_else(|| find_child_by_type(node, "type_identifier"))?;
            self.base.get_node_text(&name_node)
        };

        match kind {
            // First entry may be the superclass; every entry is a conformance candidate
            SymbolKind::Class => {
                dependencies.extend(relation_edges(
                    DependencyKind::Extends,
                    &name,
                    &inherited[..inherited.len().min(1)],
                ));
                dependencies.extend(relation_edges(DependencyKind::Conforms, &name, &inherited));
            }
            SymbolKind::Protocol => {
                dependencies.extend(relation_edges(DependencyKind::Extends, &name, &inherited));
            }
            _ => {
                dependencies.extend(relation_edges(DependencyKind::Conforms, &name, &inherited));
            }
        }

        let members = find_child_by_types(node, BODY_KINDS)
            .map(|body| self.members(&body, dependencies))
            .unwrap_or_default();

        Some(self.base.create_symbol(
            node,
            name,
            kind,
            SymbolOptions {
                docstring: self.base.find_doc_comment(node),
                children: members,
                ..Default::default()
            },
        ))
    }

    /// The keyword token decides what a `class_declaration` declares
    fn declaration_kind(&self, node: &Node) -> SymbolKind {
        if node.kind() == "protocol_declaration" {
            return SymbolKind::Protocol;
        }
        let keyword = node
            .child_by_field_name("declaration_kind")
            .map(|k| k.kind().to_string())
            .or_else(|| {
                children(node)
                    .iter()
                    .map(|c| c.kind())
                    .find(|k| matches!(*k, "struct" | "enum" | "extension" | "class" | "actor"))
                    .map(str::to_string)
            });
        match keyword.as_deref() {
            Some("struct") => SymbolKind::Struct,
            Some("enum") => SymbolKind::Enum,
            Some("extension") => SymbolKind::Extension,
            _ => SymbolKind::Class,
        }
    }

    /// Inherited type names in declaration order
    fn inheritance(&self, node: &Node) -> Vec<String> {
        children(node)
            .iter()
            .filter(|c| c.kind() == "inheritance_specifier")
            .filter_map(|spec| {
                spec.child_by_field_name("inherits_from")
                    .or_else(|| find_child_by_types(spec, &["user_type", "type_identifier"]))
            })
            .map(|t| type_name(&self.base.get_node_text(&t)))
            .collect()
    }
}

/// `Array<Int>` -> `Array`
fn type_name(text: &str) -> String {
    text.split('<').next().unwrap_or(text).trim().to_string()
}
