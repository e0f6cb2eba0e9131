use crate::extractors::base::imports::is_external_include;
use crate::extractors::base::tree_methods::{children, find_nodes_by_types};
use crate::extractors::base::{
    ExtractionResults, ParsedDependency, ParsedSymbol, SymbolKind, SymbolOptions,
};
use anyhow::Result;
use tree_sitter::Node;

/// Conditional-compilation wrappers whose contents belong to the enclosing scope
pub(super) const PREPROC_BLOCKS: &[&str] = &["preproc_if", "preproc_ifdef", "preproc_else", "preproc_elif"];

/// Includes and the declaration tree of the translation unit
impl super::CppExtractor<'_> {
    /// `<...>` includes are system includes; imports have an empty source
    pub(super) fn extract_includes(
        &self,
        root: Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Result<()> {
        for include in find_nodes_by_types(&root, &["preproc_include"]) {
            let Some(path) = include.child_by_field_name("path") else {
                continue;
            };
            let is_system = path.kind() == "system_lib_string";
            let text = self.base.get_node_text(&path);
            let target = text.trim_matches(|c| matches!(c, '<' | '>' | '"'));
            if target.is_empty() {
                continue;
            }
            dependencies.push(ParsedDependency::import(
                "",
                target,
                target,
                is_external_include(target, is_system),
            ));
        }
        Ok(())
    }

    pub(super) fn extract_declarations(&self, root: Node, results: &mut ExtractionResults) -> Result<()> {
        let symbols = self.scope_items(&root, &mut results.dependencies);
        results.symbols.extend(symbols);
        Ok(())
    }

    /// Declarations directly inside a translation unit, namespace body or `extern "C"` block
    pub(super) fn scope_items(
        &self,
        scope: &Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Vec<ParsedSymbol> {
        let mut symbols = Vec::new();
        for item in children(scope) {
            match item.kind() {
                "namespace_definition" => match item.child_by_field_name("name") {
                    Some(name) => symbols.push(self.namespace_symbol(&item, &name, dependencies)),
                    // Anonymous namespace members have file scope
                    None => {
                        if let Some(body) = item.child_by_field_name("body") {
                            symbols.extend(self.scope_items(&body, dependencies));
                        }
                    }
                },
                "class_specifier" | "struct_specifier" | "union_specifier" => {
                    symbols.extend(self.class_symbol(&item, None, dependencies));
                }
                "enum_specifier" => symbols.extend(self.enum_symbol(&item)),
                "template_declaration" => symbols.extend(self.template_symbol(&item, dependencies)),
                "function_definition" => symbols.extend(self.function_symbol(&item)),
                "declaration" => symbols.extend(self.function_declaration_symbol(&item)),
                "linkage_specification" => {
                    if let Some(body) = item.child_by_field_name("body") {
                        if body.kind() == "declaration_list" {
                            symbols.extend(self.scope_items(&body, dependencies));
                        } else {
                            symbols.extend(self.scope_items(&item, dependencies));
                        }
                    }
                }
                kind if PREPROC_BLOCKS.contains(&kind) || item.is_error() => {
                    symbols.extend(self.scope_items(&item, dependencies));
                }
                _ => {}
            }
        }
        symbols
    }

    fn namespace_symbol(
        &self,
        node: &Node,
        name: &Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> ParsedSymbol {
        let name = self.base.get_node_text(name);
        let members = node
            .child_by_field_name("body")
            .map(|body| self.scope_items(&body, dependencies))
            .unwrap_or_default();
        self.base.create_symbol(
            node,
            name.clone(),
            SymbolKind::Namespace,
            SymbolOptions {
                signature: Some(format!("namespace {}", name)),
                docstring: self.base.find_doc_comment(node),
                children: members,
            },
        )
    }

    /// `template <...>` followed by a class, function definition or function declaration
    pub(super) fn template_symbol(
        &self,
        node: &Node,
        dependencies: &mut Vec<ParsedDependency>,
    ) -> Option<ParsedSymbol> {
        let inner = children(node).into_iter().find(|c| {
            matches!(
                c.kind(),
                "class_specifier" | "struct_specifier" | "function_definition" | "declaration"
            )
        })?;
        match inner.kind() {
            "class_specifier" | "struct_specifier" => self.class_symbol(&inner, Some(node), dependencies),
            _ => {
                let declarator = super::functions::function_declarator(&inner)?;
                let name = self.declarator_name(&declarator)?;
                let signature = match inner.child_by_field_name("body") {
                    Some(body) => self.text_until(node, &body),
                    None => self.declaration_signature(node),
                };
                Some(self.base.create_symbol(
                    node,
                    name,
                    SymbolKind::FunctionTemplate,
                    SymbolOptions {
                        signature: Some(signature),
                        docstring: self.base.find_doc_comment(node),
                        ..Default::default()
                    },
                ))
            }
        }
    }

    /// `enum Color { Red, Green }` with one `enum_constant` child per enumerator
    pub(super) fn enum_symbol(&self, node: &Node) -> Option<ParsedSymbol> {
        let name = node.child_by_field_name("name")?;
        let body = node.child_by_field_name("body")?;
        let constants = children(&body)
            .into_iter()
            .filter(|c| c.kind() == "enumerator")
            .filter_map(|enumerator| {
                let name = enumerator.child_by_field_name("name")?;
                Some(self.base.create_symbol(
                    &enumerator,
                    self.base.get_node_text(&name),
                    SymbolKind::EnumConstant,
                    SymbolOptions {
                        signature: Some(self.base.get_node_text(&enumerator)),
                        docstring: self.base.find_doc_comment(&enumerator),
                        ..Default::default()
                    },
                ))
            })
            .collect();
        Some(self.base.create_symbol(
            node,
            self.base.get_node_text(&name),
            SymbolKind::Enum,
            SymbolOptions {
                signature: Some(self.text_until(node, &body)),
                docstring: self.base.find_doc_comment(node),
                children: constants,
            },
        ))
    }

    /// Declaration text without its trailing `;`
    pub(super) fn declaration_signature(&self, node: &Node) -> String {
        self.base
            .signature_until_body(node)
            .trim_end_matches(';')
            .trim_end()
            .to_string()
    }
}
