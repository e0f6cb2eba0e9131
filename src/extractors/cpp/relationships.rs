use crate::extractors::base::{ParsedDependency, ParsedSymbol};
use anyhow::Result;
use tree_sitter::Node;

/// Function templates are recorded on the `template_declaration` wrapper
const CALL_SCOPES: &[&str] = &["function_definition", "template_declaration"];

const CALL_QUERY: &str = r#"
(call_expression function: (identifier) @call.target)
(call_expression function: (qualified_identifier) @call.qualified)
(call_expression function: (template_function name: (identifier) @call.target))
(call_expression function: (field_expression field: (field_identifier) @call.member))
"#;

/// Plain, qualified and member calls; `obj.f()` and `ptr->f()` record `f`
impl super::CppExtractor<'_> {
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
