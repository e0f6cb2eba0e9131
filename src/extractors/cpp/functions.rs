use crate::extractors::base::extractor::collapse_whitespace;
use crate::extractors::base::tree_methods::{find_child_by_type, find_nodes_by_types};
use crate::extractors::base::{ParsedSymbol, SymbolKind, SymbolOptions};
use tree_sitter::Node;

/// Walk the `declarator` chain (pointers, references, parentheses) to the function declarator
pub(super) fn function_declarator<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut current = node.child_by_field_name("declarator")?;
    loop {
        match current.kind() {
            "function_declarator" => return Some(current),
            "pointer_declarator" | "reference_declarator" | "parenthesized_declarator" => {
                current = current
                    .child_by_field_name("declarator")
                    .or_else(|| current.named_child(current.named_child_count().checked_sub(1)?))?;
            }
            _ => return None,
        }
    }
}

/// Free functions, function declarations and out-of-class member definitions
impl super::CppExtractor<'_> {
    /// Rendered name of a function declarator: `draw`, `Widget::draw`, `~Widget`, `operator==`
    pub(super) fn declarator_name(&self, declarator: &Node) -> Option<String> {
        let name = declarator.child_by_field_name("declarator")?;
        let name = match name.kind() {
            "template_function" => name.child_by_field_name("name").unwrap_or(name),
            _ => name,
        };
        let text = collapse_whitespace(&self.base.get_node_text(&name));
        // `operator ==` and `operator==` render the same
        let text = match text.find("operator ") {
            Some(at) => format!("{}{}", &text[..at + "operator".len()], &text[at + "operator ".len()..]),
            None => text,
        };
        Some(text).filter(|t| !t.is_empty())
    }

    /// Words before the declarator (`static`, `inline`, `virtual`, return type)
    pub(super) fn leading_words(&self, node: &Node, declarator: &Node) -> Vec<String> {
        self.base
            .content
            .get(node.start_byte()..declarator.start_byte())
            .map(|prefix| prefix.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub(super) fn is_operator(&self, declarator: &Node) -> bool {
        declarator
            .child_by_field_name("declarator")
            .is_some_and(|name| !find_nodes_by_types(&name, &["operator_name"]).is_empty())
    }

    /// `override` after the parameter list
    pub(super) fn is_override(&self, declarator: &Node) -> bool {
        if find_nodes_by_types(declarator, &["virtual_specifier"])
            .iter()
            .any(|s| self.base.get_node_text(s) == "override")
        {
            return true;
        }
        let Some(params) = declarator
            .child_by_field_name("parameters")
            .or_else(|| find_child_by_type(declarator, "parameter_list"))
        else {
            return false;
        };
        self.base
            .content
            .get(params.end_byte()..declarator.end_byte())
            .is_some_and(|rest| rest.split_whitespace().any(|w| w == "override"))
    }

    /// A file-scope `function_definition`
    pub(super) fn function_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let declarator = function_declarator(node)?;
        let name = self.declarator_name(&declarator)?;
        let words = self.leading_words(node, &declarator);

        let kind = if self.is_operator(&declarator) {
            SymbolKind::Operator
        } else if is_qualified_constructor(&name) {
            SymbolKind::Constructor
        } else if words.iter().any(|w| w == "static") {
            SymbolKind::StaticFunction
        } else if words.iter().any(|w| w == "inline") {
            SymbolKind::InlineFunction
        } else {
            SymbolKind::Function
        };

        let signature = match node.child_by_field_name("body") {
            Some(body) => self.text_until(node, &body),
            None => self.declaration_signature(node),
        };
        Some(self.base.create_symbol(
            node,
            name,
            kind,
            SymbolOptions {
                signature: Some(signature),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// A file-scope `declaration` that declares a function (prototypes in headers)
    pub(super) fn function_declaration_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let declarator = function_declarator(node)?;
        let name = self.declarator_name(&declarator)?;
        Some(self.base.create_symbol(
            node,
            name,
            SymbolKind::FunctionDeclaration,
            SymbolOptions {
                signature: Some(self.declaration_signature(node)),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }
}

/// `Widget::Widget`
fn is_qualified_constructor(name: &str) -> bool {
    let mut segments = name.rsplit("::");
    match (segments.next(), segments.next()) {
        (Some(member), Some(scope)) => member == super::raw_type_name(scope),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_constructor_names() {
        assert!(is_qualified_constructor("Widget::Widget"));
        assert!(is_qualified_constructor("gfx::Box<T>::Box"));
        assert!(!is_qualified_constructor("Widget::draw"));
        assert!(!is_qualified_constructor("Widget"));
        assert!(!is_qualified_constructor("Widget::~Widget"));
    }
}
