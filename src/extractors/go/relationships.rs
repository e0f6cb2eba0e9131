use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

const CALL_SCOPES: &[&str] = &["function_declaration", "method_declaration"];

/// Call relationships for Go
impl super::GoExtractor<'_> {
    pub(super) fn extract_calls(
        &self,
        root: Node,
        symbols: &[ParsedSymbol],
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        let pattern =
            "(call_expression function: [(identifier) (selector_expression)] @call.target)";
        for capture in self.base.query(root, pattern)? {
            let target = self.base.get_node_text(&capture.node);
            self.base
                .record_call(&capture.node, &target, CALL_SCOPES, symbols, dependencies);
        }
        Ok(())
    }
}
