use super::decorators::{has_decorator, is_async};
use crate::extractors::base::extractor::clean_docstring;
use crate::extractors::base::tree_methods::find_child_by_type;
use crate::extractors::base::{
    relation_edges, DependencyKind, ExtractionResults, ParsedSymbol, SymbolKind, SymbolOptions,
};
use anyhow::Result;
use tree_sitter::Node;

/// Function, class and method extraction for Python
impl super::PythonExtractor<'_> {
    pub(super) fn extract_functions(&self, root: Node, symbols: &mut Vec<ParsedSymbol>) -> Result<()> {
        let mut defs = Vec::new();
        self.top_level_definitions(root, "function_definition", &mut defs);

        for def in defs {
            let Some(name_node) = def.child_by_field_name("name") else {
                continue;
            };
            let kind = if is_async(&def) {
                SymbolKind::AsyncFunction
            } else {
                SymbolKind::Function
            };
            symbols.push(self.create_callable(&def, self.base.get_node_text(&name_node), kind));
        }
        Ok(())
    }

    pub(super) fn extract_classes(&self, root: Node, results: &mut ExtractionResults) -> Result<()> {
        let mut defs = Vec::new();
        self.top_level_definitions(root, "class_definition", &mut defs);

        for def in defs {
            let Some(name_node) = def.child_by_field_name("name") else {
                continue;
            };
            let name = self.base.get_node_text(&name_node);
            let bases = self.base_classes(&def);

            let signature = if bases.is_empty() {
                format!("class {}", name)
            } else {
                format!("class {}({})", name, bases.join(", "))
            };
            let decorators = self.extract_decorators(&def);

            results.symbols.push(self.base.create_symbol(
                &def,
                name.clone(),
                SymbolKind::Class,
                SymbolOptions {
                    signature: Some(self.decorated_signature(&decorators, signature)),
                    docstring: self.body_docstring(&def),
                    children: self.class_methods(&def),
                },
            ));
            results
                .dependencies
                .extend(relation_edges(DependencyKind::Extends, &name, &bases));
        }
        Ok(())
    }

    fn class_methods(&self, class: &Node) -> Vec<ParsedSymbol> {
        let Some(body) = class.child_by_field_name("body") else {
            return Vec::new();
        };

        let mut methods = Vec::new();
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            let def = match child.kind() {
                "function_definition" => child,
                "decorated_definition" => match child.child_by_field_name("definition") {
                    Some(def) if def.kind() == "function_definition" => def,
                    _ => continue,
                },
                _ => continue,
            };
            let Some(name_node) = def.child_by_field_name("name") else {
                continue;
            };

            let decorators = self.extract_decorators(&def);
            let kind = if has_decorator(&decorators, "classmethod") {
                SymbolKind::ClassMethod
            } else if has_decorator(&decorators, "staticmethod") {
                SymbolKind::StaticMethod
            } else if is_async(&def) {
                SymbolKind::AsyncMethod
            } else {
                SymbolKind::Method
            };
            methods.push(self.create_callable(&def, self.base.get_node_text(&name_node), kind));
        }
        methods
    }

    fn create_callable(&self, def: &Node, name: String, kind: SymbolKind) -> ParsedSymbol {
        let decorators = self.extract_decorators(def);
        let signature = self
            .base
            .text_before_field(def, "body")
            .unwrap_or_else(|| self.base.first_line_signature(def));

        self.base.create_symbol(
            def,
            name,
            kind,
            SymbolOptions {
                signature: Some(self.decorated_signature(&decorators, signature)),
                docstring: self.body_docstring(def),
                ..Default::default()
            },
        )
    }

    /// Plain and dotted base class names; keyword arguments (`metaclass=`) are skipped
    fn base_classes(&self, class: &Node) -> Vec<String> {
        let Some(args) = class.child_by_field_name("superclasses") else {
            return Vec::new();
        };
        let mut cursor = args.walk();
        let bases = args
            .children(&mut cursor)
            .filter(|c| c.kind() == "identifier" || c.kind() == "attribute")
            .map(|c| self.base.get_node_text(&c))
            .collect();
        bases
    }

    /// First statement of the body when it is a string literal
    fn body_docstring(&self, def: &Node) -> Option<String> {
        let body = def.child_by_field_name("body")?;
        let first = body.named_child(0)?;
        if first.kind() != "expression_statement" {
            return None;
        }
        let string = find_child_by_type(&first, "string")?;
        Some(clean_docstring(&self.base.get_node_text(&string)))
    }
}
