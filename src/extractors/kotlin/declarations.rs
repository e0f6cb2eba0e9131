use super::{qualify, top_level};
use crate::extractors::base::imports::{is_external_import, ImportContext};
use crate::extractors::base::tree_methods::{children, find_child_by_type, find_nodes_by_types};
use crate::extractors::base::{ParsedDependency, ParsedSpan, ParsedSymbol, SymbolKind, SymbolOptions};
use anyhow::Result;
use tree_sitter::Node;

/// Package, import, top-level function and property extraction for Kotlin
impl super::KotlinExtractor<'_> {
    pub(super) fn extract_package(
        &self,
        root: Node,
        package: Option<&str>,
        symbols: &mut Vec<ParsedSymbol>,
    ) -> Result<()> {
        let Some(package) = package else {
            return Ok(());
        };
        let signature = format!("package {}", package);
        let symbol = match find_child_by_type(&root, "package_header") {
            Some(header) => self.base.create_symbol(
                &header,
                package,
                SymbolKind::Package,
                SymbolOptions {
                    signature: Some(signature),
                    docstring: self.base.find_doc_comment(&header),
                    ..Default::default()
                },
            ),
            None => ParsedSymbol {
                name: package.to_string(),
                kind: SymbolKind::Package,
                signature,
                span: ParsedSpan::default(),
                docstring: None,
                children: Vec::new(),
                node: None,
            },
        };
        symbols.push(symbol);
        Ok(())
    }

    pub(super) fn extract_imports(
        &self,
        root: Node,
        context: &ImportContext,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        let source = context.package.clone().unwrap_or_default();
        // The `import` keyword token shares the node kind; only named nodes are headers
        for header in find_nodes_by_types(&root, &["import", "import_header"]) {
            if !header.is_named() {
                continue;
            }
            let import_path = import_path(&self.base.get_node_text(&header));
            if import_path.is_empty() {
                continue;
            }
            let is_external = is_external_import(self.base.language, &import_path, context);
            dependencies.push(ParsedDependency::import(
                source.clone(),
                import_path.clone(),
                import_path,
                is_external,
            ));
        }
        Ok(())
    }

    pub(super) fn extract_functions(
        &self,
        root: Node,
        package: Option<&str>,
        symbols: &mut Vec<ParsedSymbol>,
    ) -> Result<()> {
        for node in top_level(&root, &["function_declaration"]) {
            let kind = if self.has_modifier(&node, "suspend") {
                SymbolKind::SuspendFunction
            } else if self.is_extension(&node) {
                SymbolKind::ExtensionFunction
            } else {
                SymbolKind::Function
            };
            symbols.extend(self.function_symbol(&node, package, kind));
        }
        Ok(())
    }

    pub(super) fn extract_properties(
        &self,
        root: Node,
        package: Option<&str>,
        symbols: &mut Vec<ParsedSymbol>,
    ) -> Result<()> {
        for node in top_level(&root, &["property_declaration"]) {
            symbols.extend(self.property_symbol(&node, package));
        }
        Ok(())
    }

    pub(super) fn function_symbol(
        &self,
        node: &Node,
        owner: Option<&str>,
        kind: SymbolKind,
    ) -> Option<ParsedSymbol> {
        let name = self.declaration_name(node)?;
        Some(self.base.create_symbol(
            node,
            qualify(owner, &name),
            kind,
            SymbolOptions {
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    pub(super) fn property_symbol(&self, node: &Node, owner: Option<&str>) -> Option<ParsedSymbol> {
        let name_node = find_child_by_type(node, "variable_declaration")
            .and_then(|decl| {
                children(&decl)
                    .into_iter()
                    .find(|c| matches!(c.kind(), "identifier" | "simple_identifier"))
            })
            .or_else(|| find_child_by_type(node, "identifier"))?;
        let name = self.base.get_node_text(&name_node);
        Some(self.base.create_symbol(
            node,
            qualify(owner, &name),
            SymbolKind::Property,
            SymbolOptions {
                signature: Some(self.property_signature(node)),
                docstring: self.base.find_doc_comment(node),
                ..Default::default()
            },
        ))
    }

    /// `val x: Int = compute()` keeps its initializer; accessor bodies are cut
    fn property_signature(&self, node: &Node) -> String {
        let text = self.base.get_node_text(node);
        let first = text.lines().next().unwrap_or("");
        first.trim().trim_end_matches('{').trim_end().to_string()
    }

    /// `fun Receiver.name()`: a `.` token appears before the function name
    fn is_extension(&self, node: &Node) -> bool {
        let Some(name) = self.declaration_name(node) else {
            return false;
        };
        let mut saw_dot = false;
        for child in children(node) {
            let text = self.base.get_node_text(&child);
            if saw_dot && text == name {
                return true;
            }
            if child.kind() == "function_value_parameters" {
                return false;
            }
            if text == "." {
                saw_dot = true;
            }
        }
        false
    }
}

/// `import a.b.C as D` -> `a.b.C`; wildcards keep their `.*`
fn import_path(header: &str) -> String {
    let text = header.trim();
    let text = text.strip_prefix("import").unwrap_or(text);
    let text = text.split(" as ").next().unwrap_or(text);
    text.trim_end_matches(';')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_path() {
        assert_eq!(import_path("import kotlinx.coroutines.launch"), "kotlinx.coroutines.launch");
        assert_eq!(import_path("import com.acme.Repo as R"), "com.acme.Repo");
        assert_eq!(import_path("import com.acme.util.*"), "com.acme.util.*");
    }
}
