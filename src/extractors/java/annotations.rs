use crate::extractors::base::tree_methods::{children, find_child_by_type};
use crate::extractors::base::{DependencyKind, ParsedDependency};
use tree_sitter::Node;

impl super::JavaExtractor<'_> {
    /// One `annotated_with` edge per annotation in the declaration's modifiers
    pub(super) fn record_annotations(
        &self,
        declaration: &Node,
        source: &str,
        dependencies: &mut Vec<ParsedDependency>,
    ) {
        let Some(modifiers) = find_child_by_type(declaration, "modifiers") else {
            return;
        };
        for annotation in children(&modifiers) {
            if annotation.kind() != "marker_annotation" && annotation.kind() != "annotation" {
                continue;
            }
            if let Some(name) = annotation.child_by_field_name("name") {
                dependencies.push(ParsedDependency::new(
                    DependencyKind::AnnotatedWith,
                    source,
                    self.base.get_node_text(&name),
                ));
            }
        }
    }
}
