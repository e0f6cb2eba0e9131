use super::{qualify, raw_type_name};
use crate::extractors::base::tree_methods::{children, find_child_by_type, find_children_by_type, named_children};
use crate::extractors::base::{
    relation_edges, DependencyKind, ExtractionResults, ParsedDependency, ParsedSymbol, SymbolKind,
    SymbolOptions,
};
use anyhow::Result;
use tree_sitter::Node;

const TYPE_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Type declarations and their members
impl super::JavaExtractor<'_> {
    pub(super) fn extract_types(
        &self,
        root: Node,
        package: Option<&str>,
        results: &mut ExtractionResults,
    ) -> Result<()> {
        for node in top_level_types(&root) {
            if let Some(symbol) = self.extract_type(&node, package, &mut results.dependencies) {
                results.symbols.push(symbol);
            }
        }
        Ok(())
    }

    /// One type with its members; nested types become children named `Outer.Inner`
    fn extract_type(
        &self,
        node: &Node,
        prefix: Option<&str>,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let name = self.base.get_node_text(&node.child_by_field_name("name")?);
        let fqn = qualify(prefix, &name);
        let kind = match node.kind() {
            "interface_declaration" => SymbolKind::Interface,
            "enum_declaration" => SymbolKind::Enum,
            "annotation_type_declaration" => SymbolKind::Annotation,
            _ => SymbolKind::Class,
        };

        self.record_supertypes(node, &fqn, dependencies);
        self.record_annotations(node, &fqn, dependencies);

        let members = node
            .child_by_field_name("body")
            .map(|body| self.members(&body, &fqn, dependencies))
            .unwrap_or_default();

        Some(self.base.create_symbol(
            node,
            fqn,
            kind,
            SymbolOptions {
                signature: Some(self.declaration_signature(node)),
                docstring: self.base.find_doc_comment(node),
                children: members,
            },
        ))
    }

    fn members(
        &self,
        body: &Node,
        owner: &str,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Vec<ParsedSymbol> {
        let mut nodes = Vec::new();
        for child in children(body) {
            // Enum members after the constant list
            if child.kind() == "enum_body_declarations" {
                nodes.extend(children(&child));
            } else {
                nodes.push(child);
            }
        }

        let mut members = Vec::new();
        for member in nodes {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    members.extend(self.fields(&member, owner, dependencies));
                }
                "method_declaration" | "annotation_type_element_declaration" => {
                    members.extend(self.callable(&member, owner, SymbolKind::Method, dependencies));
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    members.extend(self.callable(&member, owner, SymbolKind::Constructor, dependencies));
                }
                "enum_constant" => {
                    members.extend(self.callable(&member, owner, SymbolKind::EnumConstant, dependencies));
                }
                kind if TYPE_KINDS.contains(&kind) => {
                    members.extend(self.extract_type(&member, Some(owner), dependencies));
                }
                _ => {}
            }
        }
        members
    }

    /// Methods, constructors and enum constants: one named node each
    fn callable(
        &self,
        node: &Node,
        owner: &str,
        kind: SymbolKind,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let name = self.base.get_node_text(&node.child_by_field_name("name")?);
        let fqn = qualify(Some(owner), &name);
        self.record_annotations(node, &fqn, dependencies);
        Some(self.base.create_symbol(
            node,
            fqn,
            kind,
            SymbolOptions {
                signature: Some(self.declaration_signature(node)),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// `int a = 1, b;` declares two fields sharing one signature
    fn fields(
        &self,
        node: &Node,
        owner: &str,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Vec<ParsedSymbol> {
        let signature = self.base.signature_until_body(node);
        let docstring = self.base.find_doc_comment(node);
        find_children_by_type(node, "variable_declarator")
            .into_iter()
            .filter_map(|declarator| {
                let name = self.base.get_node_text(&declarator.child_by_field_name("name")?);
                let fqn = qualify(Some(owner), &name);
                self.record_annotations(node, &fqn, dependencies);
                Some(self.base.create_symbol(
                    node,
                    fqn,
                    SymbolKind::Field,
                    SymbolOptions {
                        signature: Some(signature.clone()),
                        docstring: docstring.clone(),
                        ..Default::default()
                    },
                ))
            })
            .collect()
    }

    /// `extends`/`implements` clauses; interfaces list their parents under `extends`
    fn record_supertypes(&self, node: &Node, source: &str, dependencies: &mut Vec<ParsedDependency>) {
        if let Some(superclass) = node.child_by_field_name("superclass") {
            let targets: Vec<String> = named_children(&superclass)
                .iter()
                .map(|t| raw_type_name(&self.base.get_node_text(t)))
                .collect();
            dependencies.extend(relation_edges(DependencyKind::Extends, source, &targets));
        }

        if let Some(interfaces) = node
            .child_by_field_name("interfaces")
            .or_else(|| find_child_by_type(node, "super_interfaces"))
        {
            let targets = self.type_list(&interfaces);
            dependencies.extend(relation_edges(DependencyKind::Implements, source, &targets));
        }

        if let Some(parents) = find_child_by_type(node, "extends_interfaces") {
            let targets = self.type_list(&parents);
            dependencies.extend(relation_edges(DependencyKind::Extends, source, &targets));
        }
    }

    fn type_list(&self, clause: &Node) -> Vec<String> {
        find_child_by_type(clause, "type_list")
            .map(|list| {
                named_children(&list)
                    .iter()
                    .map(|t| raw_type_name(&self.base.get_node_text(t)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Header text before the body; bodiless declarations keep their `;`
    fn declaration_signature(&self, node: &Node) -> String {
        self.base
            .text_before_field(node, "body")
            .unwrap_or_else(|| self.base.signature_until_body(node))
    }
}

/// Types at file scope, including those a syntax error wrapped in an ERROR node
fn top_level_types<'t>(root: &Node<'t>) -> Vec<Node<'t>> {
    let mut types = Vec::new();
    for child in children(root) {
        if TYPE_KINDS.contains(&child.kind()) {
            types.push(child);
        } else if child.is_error() {
            types.extend(top_level_types(&child));
        }
    }
    types
}
