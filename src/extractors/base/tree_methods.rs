// Tree navigation helpers shared by the extractors
//
// Free functions over tree-sitter nodes, plus symbol lookup by node handle.

use tree_sitter::Node;

use super::types::ParsedSymbol;

/// Find first child by type
pub fn find_child_by_type<'t>(node: &Node<'t>, child_type: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == child_type);
    found
}

/// Find first child matching any of `types`
pub fn find_child_by_types<'t>(node: &Node<'t>, types: &[&str]) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| types.contains(&c.kind()));
    found
}

/// Find children by type
pub fn find_children_by_type<'t>(node: &Node<'t>, child_type: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == child_type)
        .collect()
}

pub fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Find nearest ancestor of any of `parent_types`
pub fn find_parent_of_type<'t>(node: &Node<'t>, parent_types: &[&str]) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent_types.contains(&parent.kind()) {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// All descendants (including `node`) whose kind is in `node_types`, document order
pub fn find_nodes_by_types<'t>(node: &Node<'t>, node_types: &[&str]) -> Vec<Node<'t>> {
    let mut nodes = Vec::new();
    collect_nodes(node, node_types, &mut nodes);
    nodes
}

fn collect_nodes<'t>(node: &Node<'t>, node_types: &[&str], nodes: &mut Vec<Node<'t>>) {
    if node_types.contains(&node.kind()) {
        nodes.push(*node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_nodes(&child, node_types, nodes);
    }
}

/// Find the recorded symbol created for `node`, searching nested children
pub fn find_symbol_for_node<'s>(symbols: &'s [ParsedSymbol], node: &Node) -> Option<&'s ParsedSymbol> {
    symbols.iter().find_map(|symbol| {
        symbol.find(&|s: &ParsedSymbol| s.node.is_some_and(|h| h.matches(node)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::syntax;

    #[test]
    fn test_navigation_helpers() {
        let source = "package p\nfunc A() { b() }\nfunc C() {}\n";
        let tree = syntax::parse(source, Language::Go).tree.unwrap();
        let root = tree.root_node();

        assert_eq!(find_children_by_type(&root, "function_declaration").len(), 2);
        assert!(find_child_by_type(&root, "package_clause").is_some());

        let calls = find_nodes_by_types(&root, &["call_expression"]);
        assert_eq!(calls.len(), 1);
        let func = find_parent_of_type(&calls[0], &["function_declaration"]).unwrap();
        assert_eq!(func.start_position().row, 1);
    }
}
