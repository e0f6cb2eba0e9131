use crate::extractors::base::tree_methods::{children, find_child_by_type, find_nodes_by_types};
use crate::extractors::base::{ParsedDependency, ParsedSymbol, SymbolKind, SymbolOptions};
use tree_sitter::Node;

/// Members of type bodies: methods, initializers, properties, enum cases
impl super::SwiftExtractor<'_> {
    pub(super) fn members(
        &self,
        body: &Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Vec<ParsedSymbol> {
        let mut members = Vec::new();
        for member in children(body) {
            match member.kind() {
                "function_declaration" | "protocol_function_declaration" => {
                    members.extend(self.method_symbol(&member));
                }
                "init_declaration" => {
                    members.push(self.base.create_symbol(
                        &member,
                        "init",
                        SymbolKind::Constructor,
                        SymbolOptions {
                            docstring: self.base.find_doc_comment(&member),
                            ..Default::default()
                        },
                    ));
                }
                "property_declaration" | "protocol_property_declaration" => {
                    members.extend(self.property_symbol(&member));
                }
                "enum_entry" => members.extend(self.enum_cases(&member)),
                "class_declaration" | "protocol_declaration" => {
                    members.extend(self.type_symbol(&member, dependencies));
                }
                _ => {}
            }
        }
        members
    }

    fn method_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let name = node
            .child_by_field_name("name")
            .or_else(|| find_child_by_type(node, "simple_identifier"))?;
        Some(self.base.create_symbol(
            node,
            self.base.get_node_text(&name),
            SymbolKind::Method,
            SymbolOptions {
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// Stored or computed property; `willSet`/`didSet` make it an observer
    pub(super) fn property_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let pattern = node
            .child_by_field_name("name")
            .or_else(|| find_child_by_type(node, "pattern"))?;
        let name = find_nodes_by_types(&pattern, &["simple_identifier"])
            .into_iter()
            .next()
            .map(|n| self.base.get_node_text(&n))?;

        let text = self.base.get_node_text(node);
        let kind = if text.contains("willSet") || text.contains("didSet") {
            SymbolKind::PropertyObserver
        } else {
            SymbolKind::Property
        };

        Some(self.base.create_symbol(
            node,
            name,
            kind,
            SymbolOptions {
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// `case a, b(Int)` declares one case per name
    fn enum_cases(&self, entry: &Node) -> Vec<ParsedSymbol> {
        let signature = self.base.get_node_text(entry).trim().to_string();
        let docstring = self.base.find_doc_comment(entry);
        children(entry)
            .into_iter()
            .filter(|c| c.kind() == "simple_identifier")
            .map(|name| {
                self.base.create_symbol(
                    entry,
                    self.base.get_node_text(&name),
                    SymbolKind::EnumCase,
                    SymbolOptions {
                        signature: Some(signature.clone()),
                        docstring: docstring.clone(),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }
}
