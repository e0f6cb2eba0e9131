use super::declared_name;
use crate::extractors::base::extractor::collapse_whitespace;
use crate::extractors::base::tree_methods::{children, find_nodes_by_types};
use crate::extractors::base::{ParsedSymbol, SymbolKind, SymbolOptions};
use tree_sitter::Node;

/// Structs, unions, enums and typedefs
impl super::CExtractor<'_> {
    /// Named struct/union/enum with a body; forward declarations are skipped
    pub(super) fn type_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let name = node.child_by_field_name("name")?;
        let body = node.child_by_field_name("body")?;
        let kind = match node.kind() {
            "union_specifier" => SymbolKind::Union,
            "enum_specifier" => SymbolKind::Enum,
            _ => SymbolKind::Struct,
        };
        let signature = self
            .base
            .content
            .get(node.start_byte()..body.start_byte())
            .map(collapse_whitespace)
            .unwrap_or_default();
        Some(self.base.create_symbol(
            node,
            self.base.get_node_text(&name),
            kind,
            SymbolOptions {
                signature: Some(signature),
                docstring: self.base.find_doc_comment(node),
                children: self.body_members(&body),
            },
        ))
    }

    /// `typedef struct {...} point_t;` keeps the anonymous struct's fields as children
    pub(super) fn typedef_symbols(&self, node: &Node) -> Vec<ParsedSymbol> {
        let mut symbols = Vec::new();
        let specifier = node.child_by_field_name("type");
        let mut members = Vec::new();
        if let Some(specifier) = specifier {
            if matches!(
                specifier.kind(),
                "struct_specifier" | "union_specifier" | "enum_specifier"
            ) {
                match specifier.child_by_field_name("name") {
                    Some(_) => symbols.extend(self.type_symbol(&specifier)),
                    None => {
                        if let Some(body) = specifier.child_by_field_name("body") {
                            members = self.body_members(&body);
                        }
                    }
                }
            }
        }

        let signature = self
            .base
            .signature_until_body(node)
            .trim_end_matches(';')
            .trim_end()
            .to_string();
        let docstring = self.base.find_doc_comment(node);
        let mut cursor = node.walk();
        let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        for declarator in declarators {
            // `typedef int (*cmp_fn)(...)`: the alias is the first type identifier
            let name = declared_name(&declarator).or_else(|| {
                find_nodes_by_types(&declarator, &["type_identifier"])
                    .into_iter()
                    .next()
            });
            let Some(name) = name else {
                continue;
            };
            symbols.push(self.base.create_symbol(
                node,
                self.base.get_node_text(&name),
                SymbolKind::Typedef,
                SymbolOptions {
                    signature: Some(signature.clone()),
                    docstring: docstring.clone(),
                    children: members.clone(),
                },
            ));
        }
        symbols
    }

    /// Fields of a struct/union body or constants of an enum body
    fn body_members(&self, body: &Node) -> Vec<ParsedSymbol> {
        let mut members = Vec::new();
        for member in children(body) {
            match member.kind() {
                "field_declaration" => {
                    let signature = self
                        .base
                        .get_node_text(&member)
                        .trim()
                        .trim_end_matches(';')
                        .trim_end()
                        .to_string();
                    let mut cursor = member.walk();
                    let declarators: Vec<Node> =
                        member.children_by_field_name("declarator", &mut cursor).collect();
                    for declarator in declarators {
                        if let Some(name) = declared_name(&declarator) {
                            members.push(self.base.create_symbol(
                                &member,
                                self.base.get_node_text(&name),
                                SymbolKind::Field,
                                SymbolOptions {
                                    signature: Some(collapse_whitespace(&signature)),
                                    docstring: self.base.find_doc_comment(&member),
                                    ..Default::default()
                                },
                            ));
                        }
                    }
                }
                "enumerator" => {
                    if let Some(name) = member.child_by_field_name("name") {
                        members.push(self.base.create_symbol(
                            &member,
                            self.base.get_node_text(&name),
                            SymbolKind::EnumConstant,
                            SymbolOptions {
                                signature: Some(self.base.get_node_text(&member)),
                                docstring: self.base.find_doc_comment(&member),
                                ..Default::default()
                            },
                        ));
                    }
                }
                _ => {}
            }
        }
        members
    }
}
