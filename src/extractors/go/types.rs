use crate::extractors::base::tree_methods::{find_child_by_type, find_children_by_type};
use crate::extractors::base::{ParsedSymbol, SymbolKind, SymbolOptions};
use anyhow::Result;
use tree_sitter::Node;

/// Struct, interface and named type extraction for Go
impl super::GoExtractor<'_> {
    pub(super) fn extract_type_specs(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        for decl in find_children_by_type(&root, "type_declaration") {
            let mut specs = find_children_by_type(&decl, "type_spec");
            specs.extend(find_children_by_type(&decl, "type_alias"));
            specs.sort_by_key(|n| n.start_byte());

            for spec in specs {
                if let Some(symbol) = self.extract_type_spec(&spec, &decl) {
                    symbols.push(symbol);
                }
            }
        }
        Ok(())
    }

    /// Grouped specs (`type ( ... )`) fall back to the doc comment above `type`
    fn extract_type_spec(&self, spec: &Node, decl: &Node) -> Option<ParsedSymbol> {
        let name = self.base.get_node_text(&spec.child_by_field_name("name")?);
        let type_node = spec.child_by_field_name("type");
        let docstring = self
            .base
            .find_doc_comment(spec)
            .or_else(|| self.base.find_doc_comment(decl));
        let signature = format!("type {}", self.base.first_line_signature(spec));

        let (kind, children) = match type_node.map(|t| t.kind()) {
            Some("struct_type") => (
                SymbolKind::Struct,
                type_node.map(|t| self.struct_fields(&t)).unwrap_or_default(),
            ),
            Some("interface_type") => (
                SymbolKind::Interface,
                type_node.map(|t| self.interface_methods(&t)).unwrap_or_default(),
            ),
            _ => (SymbolKind::Type, Vec::new()),
        };

        Some(self.base.create_symbol(
            spec,
            name,
            kind,
            SymbolOptions {
                signature: Some(signature),
                docstring,
                children,
            },
        ))
    }

    fn struct_fields(&self, struct_type: &Node) -> Vec<ParsedSymbol> {
        let Some(list) = find_child_by_type(struct_type, "field_declaration_list") else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        for decl in find_children_by_type(&list, "field_declaration") {
            let type_text = decl
                .child_by_field_name("type")
                .map(|t| self.base.get_node_text(&t))
                .unwrap_or_default();
            let names = find_children_by_type(&decl, "field_identifier");

            // Embedded field: the type is the name
            if names.is_empty() {
                let embedded = type_text.trim_start_matches('*').to_string();
                if !embedded.is_empty() {
                    fields.push(self.base.create_symbol(
                        &decl,
                        embedded,
                        SymbolKind::Field,
                        SymbolOptions {
                            signature: Some(type_text.clone()),
                            ..Default::default()
                        },
                    ));
                }
                continue;
            }

            for name_node in names {
                let name = self.base.get_node_text(&name_node);
                fields.push(self.base.create_symbol(
                    &decl,
                    name.clone(),
                    SymbolKind::Field,
                    SymbolOptions {
                        signature: Some(format!("{} {}", name, type_text)),
                        docstring: self.base.find_doc_comment(&decl),
                        ..Default::default()
                    },
                ));
            }
        }
        fields
    }

    fn interface_methods(&self, interface_type: &Node) -> Vec<ParsedSymbol> {
        let mut cursor = interface_type.walk();
        interface_type
            .children(&mut cursor)
            .filter(|c| c.kind() == "method_elem" || c.kind() == "method_spec")
            .filter_map(|elem| {
                let name_node = elem
                    .child_by_field_name("name")
                    .or_else(|| find_child_by_type(&elem, "field_identifier"))?;
                Some(self.base.create_symbol(
                    &elem,
                    self.base.get_node_text(&name_node),
                    SymbolKind::Method,
                    SymbolOptions {
                        signature: Some(self.base.get_node_text(&elem).trim().to_string()),
                        docstring: self.base.find_doc_comment(&elem),
                        ..Default::default()
                    },
                ))
            })
            .collect()
    }
}
