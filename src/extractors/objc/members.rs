use crate::extractors::base::tree_methods::{children, find_nodes_by_types};
use crate::extractors::base::{ParsedSymbol, SymbolKind, SymbolOptions};
use tree_sitter::Node;

/// `@required`/`@optional` sections and implementation bodies hold members one level down
const MEMBER_SECTIONS: &[&str] = &["qualified_protocol_interface_declaration", "implementation_definition"];

/// Properties and methods, named by selector
impl super::ObjCExtractor<'_> {
    pub(super) fn interface_members(&self, node: &Node) -> Vec<ParsedSymbol> {
        member_nodes(node, &["property_declaration", "method_declaration"])
            .iter()
            .filter_map(|member| match member.kind() {
                "property_declaration" => self.property_symbol(member),
                _ => self.method_symbol(member, SymbolKind::Method),
            })
            .collect()
    }

    pub(super) fn implementation_members(&self, node: &Node) -> Vec<ParsedSymbol> {
        member_nodes(node, &["method_definition"])
            .iter()
            .filter_map(|member| self.method_symbol(member, SymbolKind::MethodImplementation))
            .collect()
    }

    fn method_symbol(&self, node: &Node, kind: SymbolKind) -> Option<ParsedSymbol> {
        let selector = self.selector(node)?;
        let signature = self
            .base
            .signature_until_body(node)
            .trim_end_matches(';')
            .trim_end()
            .to_string();
        Some(self.base.create_symbol(
            node,
            selector,
            kind,
            SymbolOptions {
                signature: Some(signature),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// `- (id)initWithName:(NSString *)n age:(int)a` -> `initWithName:age:`
    fn selector(&self, node: &Node) -> Option<String> {
        let tokens = selector_tokens(node);
        let keywords: String = tokens
            .windows(2)
            .filter(|pair| {
                pair[0].kind() == "identifier" && matches!(pair[1].kind(), ":" | "method_parameter")
            })
            .map(|pair| format!("{}:", self.base.get_node_text(&pair[0])))
            .collect();
        if !keywords.is_empty() {
            return Some(keywords);
        }
        tokens
            .iter()
            .find(|t| t.kind() == "identifier")
            .map(|t| self.base.get_node_text(t))
    }

    /// The declared name is the identifier of the property's declarator
    fn property_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let scope = find_nodes_by_types(node, &["struct_declarator"])
            .into_iter()
            .next()
            .unwrap_or(*node);
        let name = find_nodes_by_types(&scope, &["identifier"]).into_iter().last()?;
        Some(self.base.create_symbol(
            node,
            self.base.get_node_text(&name),
            SymbolKind::Property,
            SymbolOptions {
                signature: Some(self.base.get_node_text(node).trim().to_string()),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }
}

/// Children of `node` with keyword/selector wrapper nodes flattened in place
pub(super) fn selector_tokens<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut tokens = Vec::new();
    for child in children(node) {
        if child.kind().contains("keyword") || child.kind().contains("selector") {
            tokens.extend(selector_tokens(&child));
        } else {
            tokens.push(child);
        }
    }
    tokens
}

/// Direct children of `kinds`, plus those inside member sections, in source order
fn member_nodes<'t>(node: &Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut members = Vec::new();
    for child in children(node) {
        if kinds.contains(&child.kind()) {
            members.push(child);
        } else if MEMBER_SECTIONS.contains(&child.kind()) {
            members.extend(member_nodes(&child, kinds));
        }
    }
    members
}
