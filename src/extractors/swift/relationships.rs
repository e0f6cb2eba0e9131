use crate::extractors::base::tree_methods::{find_child_by_type, find_nodes_by_types};
use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

const CALL_SCOPES: &[&str] = &["function_declaration", "init_declaration"];

/// Call relationships for Swift
impl super::SwiftExtractor<'_> {
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
            let target = match callee.kind() {
                "simple_identifier" => Some(self.base.get_node_text(&callee)),
                // `a.b.method()` and `a?.method()` record the member name
                "navigation_expression" => callee
                    .child_by_field_name("suffix")
                    .or_else(|| find_child_by_type(&callee, "navigation_suffix"))
                    .and_then(|suffix| {
                        suffix
                            .child_by_field_name("suffix")
                            .or_else(|| find_child_by_type(&suffix, "simple_identifier"))
                    })
                    .map(|name| self.base.get_node_text(&name)),
                _ => None,
            };
            if let Some(target) = target {
                self.base
                    .record_call(&call, &target, CALL_SCOPES, symbols, dependencies);
            }
        }
        Ok(())
    }
}
