use crate::extractors::base::imports::{is_external_import, package_from_source_root, ImportContext};
use crate::extractors::base::tree_methods::{find_child_by_type, find_child_by_types, find_children_by_type};
use crate::extractors::base::{ParsedDependency, ParsedSpan, ParsedSymbol, SymbolKind, SymbolOptions};
use anyhow::Result;
use tree_sitter::Node;

/// Conventional source roots, most specific first
const SOURCE_ROOTS: &[&str] = &["src/main/java/", "src/test/java/", "src/", "java/"];

impl super::JavaExtractor<'_> {
    /// Declared package, else the directory below a source root
    pub(super) fn package_name(&self, root: Node) -> Option<String> {
        find_child_by_type(&root, "package_declaration")
            .and_then(|decl| find_child_by_types(&decl, &["scoped_identifier", "identifier"]))
            .map(|name| self.base.get_node_text(&name))
            .or_else(|| package_from_source_root(self.base.file_path, SOURCE_ROOTS))
    }

    pub(super) fn extract_package(
        &self,
        root: Node,
        package: Option<&str>,
        symbols: &mut Vec<ParsedSymbol>,
    ) -> Result<()> {
        let Some(package) = package else {
            return Ok(());
        };

        let symbol = match find_child_by_type(&root, "package_declaration") {
            Some(decl) => self.base.create_symbol(
                &decl,
                package,
                SymbolKind::Package,
                SymbolOptions {
                    signature: Some(format!("package {}", package)),
                    docstring: self.base.find_doc_comment(&decl),
                    ..Default::default()
                },
            ),
            // Inferred from the path: nothing in the tree to point at
            None => ParsedSymbol {
                name: package.to_string(),
                kind: SymbolKind::Package,
                signature: format!("package {}", package),
                span: ParsedSpan::default(),
                docstring: None,
                children: Vec::new(),
                node: None,
            },
        };
        symbols.push(symbol);
        Ok(())
    }

    /// Single-type, wildcard and static imports; the package is the source
    pub(super) fn extract_imports(
        &self,
        root: Node,
        context: &ImportContext,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        let source = context.package.clone().unwrap_or_default();
        for decl in find_children_by_type(&root, "import_declaration") {
            let import_path = import_path(&self.base.get_node_text(&decl));
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
}

/// `import static a.b.C.*;` -> `a.b.C.*`
fn import_path(declaration: &str) -> String {
    let text = declaration.trim();
    let text = text.strip_prefix("import").unwrap_or(text).trim_start();
    let text = text.strip_prefix("static ").unwrap_or(text);
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
        assert_eq!(import_path("import java.util.List;"), "java.util.List");
        assert_eq!(import_path("import static org.junit.Assert.*;"), "org.junit.Assert.*");
        assert_eq!(import_path("import com.acme .util.*;"), "com.acme.util.*");
    }
}
