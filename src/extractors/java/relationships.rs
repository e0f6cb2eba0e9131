use super::raw_type_name;
use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

const CALL_SCOPES: &[&str] = &["method_declaration", "constructor_declaration"];

const CALL_QUERY: &str = r#"
(method_invocation name: (identifier) @call.target)
(object_creation_expression type: (_) @call.constructor)
"#;

/// Method invocations and `new T(...)` as calls
impl super::JavaExtractor<'_> {
    pub(super) fn extract_calls(
        &self,
        root: Node,
        symbols: &[ParsedSymbol],
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for capture in self.base.query(root, CALL_QUERY)? {
            let text = self.base.get_node_text(&capture.node);
            let target = match capture.name.as_str() {
                "call.constructor" => raw_type_name(&text),
                _ => text,
            };
            self.base
                .record_call(&capture.node, &target, CALL_SCOPES, symbols, dependencies);
        }
        Ok(())
    }
}
