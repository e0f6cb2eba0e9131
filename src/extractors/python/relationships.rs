use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

const CALL_SCOPES: &[&str] = &["function_definition"];

/// Call relationships for Python
impl super::PythonExtractor<'_> {
    pub(super) fn extract_calls(
        &self,
        root: Node,
        symbols: &[ParsedSymbol],
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for capture in self.base.query(root, "(call function: (_) @call.target)")? {
            let node = capture.node;
            if node.kind() != "identifier" && node.kind() != "attribute" {
                continue;
            }
            let target = self.base.get_node_text(&node);
            self.base
                .record_call(&node, &target, CALL_SCOPES, symbols, dependencies);
        }
        Ok(())
    }
}
