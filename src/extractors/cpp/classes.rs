use super::declarations::PREPROC_BLOCKS;
use super::functions::function_declarator;
use super::raw_type_name;
use crate::extractors::base::tree_methods::{children, find_nodes_by_types, named_children};
use crate::extractors::base::{
    relation_edges, DependencyKind, ParsedDependency, ParsedSymbol, SymbolKind, SymbolOptions,
};
use tree_sitter::Node;

/// Classes, structs and unions with their members
impl super::CppExtractor<'_> {
    /// `template` is the wrapping `template_declaration` of a class template
    pub(super) fn class_symbol(
        &self,
        node: &Node,
        template: Option<&Node>,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let name_node = node.child_by_field_name("name")?;
        // Forward declarations have no body
        let body = node.child_by_field_name("body")?;
        let name = match name_node.kind() {
            "template_type" => name_node
                .child_by_field_name("name")
                .map(|n| self.base.get_node_text(&n))
                .unwrap_or_else(|| raw_type_name(&self.base.get_node_text(&name_node))),
            _ => self.base.get_node_text(&name_node),
        };

        let kind = match (template, node.kind()) {
            (Some(_), _) => SymbolKind::ClassTemplate,
            (None, "struct_specifier") => SymbolKind::Struct,
            (None, "union_specifier") => SymbolKind::Union,
            _ => SymbolKind::Class,
        };

        dependencies.extend(relation_edges(
            DependencyKind::Extends,
            &name,
            &self.base_classes(node),
        ));

        let members = self.members(&body, &name, dependencies);
        let outer = template.unwrap_or(node);
        Some(self.base.create_symbol(
            outer,
            name,
            kind,
            SymbolOptions {
                signature: Some(self.text_until(outer, &body)),
                docstring: self.base.find_doc_comment(outer),
                children: members,
            },
        ))
    }

    /// Base class names in declaration order, access specifiers and template arguments dropped
    fn base_classes(&self, node: &Node) -> Vec<String> {
        let Some(clause) = children(node)
            .into_iter()
            .find(|c| c.kind() == "base_class_clause")
        else {
            return Vec::new();
        };
        named_children(&clause)
            .iter()
            .filter(|c| {
                matches!(
                    c.kind(),
                    "type_identifier" | "qualified_identifier" | "template_type"
                )
            })
            .map(|c| raw_type_name(&self.base.get_node_text(c)))
            .collect()
    }

    fn members(
        &self,
        body: &Node,
        class_name: &str,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Vec<ParsedSymbol> {
        let mut members = Vec::new();
        for member in children(body) {
            match member.kind() {
                "function_definition" | "declaration" => {
                    members.extend(self.method_symbol(&member, class_name, dependencies));
                }
                "field_declaration" => {
                    if function_declarator(&member).is_some() {
                        members.extend(self.method_symbol(&member, class_name, dependencies));
                        continue;
                    }
                    if let Some(nested) = member.child_by_field_name("type") {
                        match nested.kind() {
                            "class_specifier" | "struct_specifier" | "union_specifier" => {
                                members.extend(self.class_symbol(&nested, None, dependencies));
                            }
                            "enum_specifier" => members.extend(self.enum_symbol(&nested)),
                            _ => {}
                        }
                    }
                    members.extend(self.field_symbols(&member));
                }
                "template_declaration" => {
                    members.extend(self.template_symbol(&member, dependencies));
                }
                kind if PREPROC_BLOCKS.contains(&kind) => {
                    members.extend(self.members(&member, class_name, dependencies));
                }
                _ => {}
            }
        }
        members
    }

    /// In-class method definition or declaration; `override` also records an `overrides` edge
    fn method_symbol(
        &self,
        node: &Node,
        class_name: &str,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let declarator = function_declarator(node)?;
        let name = self.declarator_name(&declarator)?;
        let words = self.leading_words(node, &declarator);
        let is_override = self.is_override(&declarator);

        let kind = if name == class_name {
            SymbolKind::Constructor
        } else if self.is_operator(&declarator) {
            SymbolKind::Operator
        } else if words.iter().any(|w| w == "virtual") {
            SymbolKind::VirtualMethod
        } else {
            SymbolKind::Method
        };

        if is_override {
            dependencies.push(ParsedDependency::new(
                DependencyKind::Overrides,
                format!("{}::{}", class_name, name),
                name.as_str(),
            ));
        }

        let signature = match node.child_by_field_name("body") {
            Some(body) => self.text_until(node, &body),
            None => self.declaration_signature(node),
        };
        Some(self.base.create_symbol(
            node,
            name,
            kind,
            SymbolOptions {
                signature: Some(signature),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// `int width_, height_;` declares one field per name
    fn field_symbols(&self, node: &Node) -> Vec<ParsedSymbol> {
        let signature = self.declaration_signature(node);
        let docstring = self.base.find_doc_comment(node);
        let mut cursor = node.walk();
        let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        declarators
            .iter()
            .flat_map(|d| find_nodes_by_types(d, &["field_identifier"]).into_iter().take(1))
            .map(|name| {
                self.base.create_symbol(
                    node,
                    self.base.get_node_text(&name),
                    SymbolKind::Field,
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
