// Symbol and dependency creation methods for BaseExtractor
//
// Also hosts the call-site helper every extractor shares: find the enclosing
// recorded symbol of a call and emit a `call` dependency from it.

use tree_sitter::Node;

use super::extractor::BaseExtractor;
use super::tree_methods::find_symbol_for_node;
use super::types::{
    DependencyKind, NodeHandle, ParsedDependency, ParsedSpan, ParsedSymbol, SymbolKind,
};

/// Optional parts of a new symbol
#[derive(Debug, Default, Clone)]
pub struct SymbolOptions {
    pub signature: Option<String>,
    pub docstring: Option<String>,
    pub children: Vec<ParsedSymbol>,
}

impl<'a> BaseExtractor<'a> {
    /// Create a symbol for `node`; the signature defaults to the declaration
    /// text up to its body.
    pub fn create_symbol(
        &self,
        node: &Node,
        name: impl Into<String>,
        kind: SymbolKind,
        options: SymbolOptions,
    ) -> ParsedSymbol {
        ParsedSymbol {
            name: name.into(),
            kind,
            signature: options
                .signature
                .unwrap_or_else(|| self.signature_until_body(node)),
            span: ParsedSpan::from_node(node),
            docstring: options.docstring,
            children: options.children,
            node: Some(NodeHandle::of(node)),
        }
    }

    /// Record a `call` dependency from the nearest enclosing recorded callable.
    ///
    /// `scope_kinds` are the node kinds that can own a call (function and
    /// method declarations of the grammar). Calls outside any recorded symbol
    /// produce nothing.
    pub fn record_call(
        &self,
        call_node: &Node,
        target: &str,
        scope_kinds: &[&str],
        symbols: &[ParsedSymbol],
        dependencies: &mut Vec<ParsedDependency>,
    ) {
        let target = target.trim();
        if target.is_empty() {
            return;
        }
        if let Some(caller) = enclosing_symbol(call_node, scope_kinds, symbols) {
            dependencies.push(ParsedDependency::new(
                DependencyKind::Call,
                caller.name.clone(),
                target,
            ));
        }
    }
}

/// Walk ancestors of `node` until one of `scope_kinds` maps to a recorded symbol
pub fn enclosing_symbol<'s>(
    node: &Node,
    scope_kinds: &[&str],
    symbols: &'s [ParsedSymbol],
) -> Option<&'s ParsedSymbol> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if scope_kinds.contains(&ancestor.kind()) {
            if let Some(symbol) = find_symbol_for_node(symbols, &ancestor) {
                return Some(symbol);
            }
        }
        current = ancestor.parent();
    }
    None
}

/// `extends`/`conforms` style edges from one declaring symbol, in declaration order
pub fn relation_edges(
    kind: DependencyKind,
    source: &str,
    targets: &[String],
) -> Vec<ParsedDependency> {
    targets
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| ParsedDependency::new(kind, source, t.as_str()))
        .collect()
}
