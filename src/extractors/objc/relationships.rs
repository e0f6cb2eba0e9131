use super::members::selector_tokens;
use crate::extractors::base::tree_methods::find_nodes_by_types;
use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

const CALL_SCOPES: &[&str] = &["method_definition", "function_definition"];

/// Message sends (`[obj doThing:x with:y]` -> `doThing:with:`) and plain C calls
impl super::ObjCExtractor<'_> {
    pub(super) fn extract_calls(
        &self,
        root: Node,
        symbols: &[ParsedSymbol],
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for node in find_nodes_by_types(&root, &["message_expression", "call_expression"]) {
            let target = match node.kind() {
                "message_expression" => self.message_selector(&node),
                _ => node
                    .child_by_field_name("function")
                    .filter(|f| f.kind() == "identifier")
                    .map(|f| self.base.get_node_text(&f)),
            };
            if let Some(target) = target {
                self.base
                    .record_call(&node, &target, CALL_SCOPES, symbols, dependencies);
            }
        }
        Ok(())
    }

    /// Keyword parts are identifiers followed by `:`; a unary send is the identifier before `]`
    fn message_selector(&self, node: &Node) -> Option<String> {
        let parts = selector_tokens(node);
        let keywords: String = parts
            .windows(2)
            .filter(|pair| pair[0].kind() == "identifier" && pair[1].kind() == ":")
            .map(|pair| format!("{}:", self.base.get_node_text(&pair[0])))
            .collect();
        if !keywords.is_empty() {
            return Some(keywords);
        }
        // `[ receiver selector ]`: the selector cannot be the receiver right after `[`
        let close = parts.iter().rposition(|c| c.kind() == "]")?;
        let selector = parts.get(close.checked_sub(1)?)?;
        (close >= 3 && selector.kind() == "identifier").then(|| self.base.get_node_text(selector))
    }
}
