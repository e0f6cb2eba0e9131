use super::{qualify, top_level};
use crate::extractors::base::tree_methods::{children, find_child_by_type, find_child_by_types};
use crate::extractors::base::{
    relation_edges, DependencyKind, ExtractionResults, ParsedDependency, ParsedSymbol, SymbolKind,
    SymbolOptions,
};
use anyhow::Result;
use tree_sitter::Node;

const TYPE_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "object_declaration",
];

/// Classes, interfaces, enums and objects with their members
impl super::KotlinExtractor<'_> {
    pub(super) fn extract_types(
        &self,
        root: Node,
        package: Option<&str>,
        results: &mut ExtractionResults,
    ) -> Result<()> {
        for node in top_level(&root, TYPE_KINDS) {
            if let Some(symbol) = self.extract_type(&node, package, &mut results.dependencies) {
                results.symbols.push(symbol);
            }
        }
        Ok(())
    }

    fn extract_type(
        &self,
        node: &Node,
        prefix: Option<&str>,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let name = match node.kind() {
            // `companion object` may be anonymous
            "companion_object" => self
                .declaration_name(node)
                .unwrap_or_else(|| "Companion".to_string()),
            _ => self.declaration_name(node)?,
        };
        let fqn = qualify(prefix, &name);
        let kind = self.type_kind(node);

        let supertypes = self.supertypes(node);
        dependencies.extend(relation_edges(DependencyKind::Extends, &fqn, &supertypes));

        let mut members = self.constructor_properties(node, &fqn);
        if let Some(body) = find_child_by_types(node, &["class_body", "enum_class_body"]) {
            members.extend(self.members(&body, &fqn, dependencies));
        }

        Some(self.base.create_symbol(
            node,
            fqn,
            kind,
            SymbolOptions {
                docstring: self.base.find_doc_comment(node),
                children: members,
                ..Default::default()
            },
        ))
    }

    fn type_kind(&self, node: &Node) -> SymbolKind {
        match node.kind() {
            "object_declaration" | "companion_object" => return SymbolKind::Object,
            "interface_declaration" => return SymbolKind::Interface,
            _ => {}
        }
        let keywords: Vec<String> = children(node)
            .iter()
            .filter(|c| !c.is_named())
            .map(|c| self.base.get_node_text(c))
            .collect();
        if keywords.iter().any(|k| k == "interface") {
            SymbolKind::Interface
        } else if keywords.iter().any(|k| k == "enum") || self.has_modifier(node, "enum") {
            SymbolKind::Enum
        } else {
            // data and sealed classes are classes
            SymbolKind::Class
        }
    }

    fn members(
        &self,
        body: &Node,
        owner: &str,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Vec<ParsedSymbol> {
        let mut members = Vec::new();
        for member in children(body) {
            match member.kind() {
                "function_declaration" => {
                    let kind = if self.has_modifier(&member, "suspend") {
                        SymbolKind::SuspendMethod
                    } else {
                        SymbolKind::Method
                    };
                    members.extend(self.function_symbol(&member, Some(owner), kind));
                }
                "property_declaration" => {
                    members.extend(self.property_symbol(&member, Some(owner)));
                }
                "enum_entry" => {
                    if let Some(name) = self.declaration_name(&member) {
                        members.push(self.base.create_symbol(
                            &member,
                            qualify(Some(owner), &name),
                            SymbolKind::EnumConstant,
                            SymbolOptions {
                                signature: Some(self.base.get_node_text(&member).trim().to_string()),
                                docstring: self.base.find_doc_comment(&member),
                                ..Default::default()
                            },
                        ));
                    }
                }
                kind if TYPE_KINDS.contains(&kind) || kind == "companion_object" => {
                    members.extend(self.extract_type(&member, Some(owner), dependencies));
                }
                _ => {}
            }
        }
        members
    }

    /// `class User(val id: Long, name: String)`: only `val`/`var` parameters are properties
    fn constructor_properties(&self, node: &Node, owner: &str) -> Vec<ParsedSymbol> {
        let Some(parameters) = find_child_by_type(node, "primary_constructor")
            .and_then(|ctor| find_child_by_type(&ctor, "class_parameters"))
        else {
            return Vec::new();
        };

        children(&parameters)
            .into_iter()
            .filter(|p| p.kind() == "class_parameter")
            .filter(|p| {
                children(p).iter().any(|c| {
                    matches!(c.kind(), "val" | "var" | "binding_pattern_kind")
                })
            })
            .filter_map(|param| {
                let name = self.declaration_name(&param)?;
                Some(self.base.create_symbol(
                    &param,
                    qualify(Some(owner), &name),
                    SymbolKind::Property,
                    SymbolOptions {
                        signature: Some(self.base.get_node_text(&param).trim().to_string()),
                        ..Default::default()
                    },
                ))
            })
            .collect()
    }

    /// Supertype names from delegation specifiers, in declaration order
    fn supertypes(&self, node: &Node) -> Vec<String> {
        let specifiers = match find_child_by_type(node, "delegation_specifiers") {
            Some(container) => children(&container)
                .into_iter()
                .filter(|c| c.is_named())
                .collect::<Vec<_>>(),
            None => children(node)
                .into_iter()
                .filter(|c| c.kind() == "delegation_specifier")
                .collect(),
        };
        specifiers
            .iter()
            .filter(|s| !s.kind().contains("comment"))
            .map(|s| supertype_name(&self.base.get_node_text(s)))
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// `Base<T>()` -> `Base`, `Drawable by impl` -> `Drawable`
fn supertype_name(specifier: &str) -> String {
    let text = specifier.split(" by ").next().unwrap_or(specifier);
    let text = text.split('(').next().unwrap_or(text);
    let text = text.split('<').next().unwrap_or(text);
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supertype_name() {
        assert_eq!(supertype_name("Entity()"), "Entity");
        assert_eq!(supertype_name("Repo<User>"), "Repo");
        assert_eq!(supertype_name("Drawable by drawable"), "Drawable");
        assert_eq!(supertype_name("Named"), "Named");
    }
}
