use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

const CALL_SCOPES: &[&str] = &["function_definition"];

/// `ops->run(x)` calls through a function-pointer field and records the field name
const CALL_QUERY: &str = r#"
(call_expression function: (identifier) @call.target)
(call_expression function: (field_expression field: (field_identifier) @call.member))
"#;

impl super::CExtractor<'_> {
    pub(super) fn extract_calls(
        &self,
        root: Node,
        symbols: &[ParsedSymbol],
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for capture in self.base.query(root, CALL_QUERY)? {
            let target = self.base.get_node_text(&capture.node);
            self.base
                .record_call(&capture.node, &target, CALL_SCOPES, symbols, dependencies);
        }
        Ok(())
    }
}
