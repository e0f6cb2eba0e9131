use tree_sitter::Node;

/// Decorator handling for Python definitions
impl super::PythonExtractor<'_> {
    /// Decorator lines (`@name(...)`) of a definition wrapped in `decorated_definition`
    pub(super) fn extract_decorators(&self, def: &Node) -> Vec<String> {
        let Some(parent) = def.parent().filter(|p| p.kind() == "decorated_definition") else {
            return Vec::new();
        };
        let mut cursor = parent.walk();
        let decorators = parent
            .children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
            .map(|c| self.base.get_node_text(&c).trim().to_string())
            .collect();
        decorators
    }

    /// Prefix the signature with its decorator block
    pub(super) fn decorated_signature(&self, decorators: &[String], signature: String) -> String {
        if decorators.is_empty() {
            signature
        } else {
            format!("{}\n{}", decorators.join("\n"), signature)
        }
    }
}

pub(super) fn has_decorator(decorators: &[String], name: &str) -> bool {
    let marker = format!("@{}", name);
    decorators.iter().any(|d| d.contains(&marker))
}

pub(super) fn is_async(def: &Node) -> bool {
    let mut cursor = def.walk();
    let found = def.children(&mut cursor).any(|c| c.kind() == "async");
    found
}
