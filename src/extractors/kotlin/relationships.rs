use crate::extractors::base::tree_methods::{children, find_nodes_by_types};
use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

const CALL_SCOPES: &[&str] = &["function_declaration"];

/// Call relationships for Kotlin
impl super::KotlinExtractor<'_> {
    pub(super) fn extract_calls(
        &self,
        root: Node,
        symbols: &[ParsedSymbol],
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for call in find_nodes_by_types(&root, &["call_expression"]) {
            let Some(callee) = call.named_child(0) else {
                continue;
            };
            if let Some(target) = self.callee_name(&callee) {
                self.base
                    .record_call(&call, &target, CALL_SCOPES, symbols, dependencies);
            }
        }
        Ok(())
    }

    /// `foo()` names `foo`; `a.b.foo()` names the member `foo`
    fn callee_name(&self, callee: &Node) -> Option<String> {
        match callee.kind() {
            "identifier" | "simple_identifier" => Some(self.base.get_node_text(callee)),
            "navigation_expression" => rightmost_identifier(callee)
                .map(|n| self.base.get_node_text(&n)),
            _ => None,
        }
    }
}

fn rightmost_identifier<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut found = None;
    for child in children(node) {
        match child.kind() {
            "identifier" | "simple_identifier" => found = Some(child),
            "navigation_suffix" => found = rightmost_identifier(&child).or(found),
            _ => {}
        }
    }
    found
}
