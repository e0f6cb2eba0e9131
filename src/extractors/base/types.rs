// Uniform symbol/dependency model shared by every extractor
//
// - ParsedFile: one per source file, owns content and syntax tree
// - ParsedSymbol: declarations, children owned exclusively by their parent
// - ParsedDependency: best-effort named edges (imports, calls, inheritance, pairing)
// - NodeHandle: non-owning back-reference into the owning file's tree

use crate::language::Language;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

/// Source location: 1-based lines, byte offsets into the file content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSpan {
    pub start_line: u32,
    pub end_line: u32,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl ParsedSpan {
    pub fn from_node(node: &Node) -> Self {
        Self {
            start_line: node.start_position().row as u32 + 1,
            end_line: node.end_position().row as u32 + 1,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
        }
    }
}

/// Symbol kinds emitted by the extractors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    // Scopes
    Module,
    Package,
    Namespace,
    // Types
    Class,
    ClassTemplate,
    Struct,
    Union,
    Interface,
    Protocol,
    Extension,
    Category,
    Implementation,
    Enum,
    Object,
    Annotation,
    Type,
    Typedef,
    // Callables
    Function,
    FunctionTemplate,
    FunctionDeclaration,
    StaticFunction,
    InlineFunction,
    AsyncFunction,
    SuspendFunction,
    ExtensionFunction,
    Method,
    VirtualMethod,
    StaticMethod,
    ClassMethod,
    AsyncMethod,
    SuspendMethod,
    MethodImplementation,
    Constructor,
    Operator,
    // Members and values
    Field,
    Property,
    PropertyObserver,
    EnumCase,
    EnumConstant,
    GlobalVariable,
    ExternVariable,
    Macro,
    FunctionMacro,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Module => "module",
            SymbolKind::Package => "package",
            SymbolKind::Namespace => "namespace",
            SymbolKind::Class => "class",
            SymbolKind::ClassTemplate => "class_template",
            SymbolKind::Struct => "struct",
            SymbolKind::Union => "union",
            SymbolKind::Interface => "interface",
            SymbolKind::Protocol => "protocol",
            SymbolKind::Extension => "extension",
            SymbolKind::Category => "category",
            SymbolKind::Implementation => "implementation",
            SymbolKind::Enum => "enum",
            SymbolKind::Object => "object",
            SymbolKind::Annotation => "annotation",
            SymbolKind::Type => "type",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Function => "function",
            SymbolKind::FunctionTemplate => "function_template",
            SymbolKind::FunctionDeclaration => "function_declaration",
            SymbolKind::StaticFunction => "static_function",
            SymbolKind::InlineFunction => "inline_function",
            SymbolKind::AsyncFunction => "async_function",
            SymbolKind::SuspendFunction => "suspend_function",
            SymbolKind::ExtensionFunction => "extension_function",
            SymbolKind::Method => "method",
            SymbolKind::VirtualMethod => "virtual_method",
            SymbolKind::StaticMethod => "static_method",
            SymbolKind::ClassMethod => "class_method",
            SymbolKind::AsyncMethod => "async_method",
            SymbolKind::SuspendMethod => "suspend_method",
            SymbolKind::MethodImplementation => "method_implementation",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Operator => "operator",
            SymbolKind::Field => "field",
            SymbolKind::Property => "property",
            SymbolKind::PropertyObserver => "property_observer",
            SymbolKind::EnumCase => "enum_case",
            SymbolKind::EnumConstant => "enum_constant",
            SymbolKind::GlobalVariable => "global_variable",
            SymbolKind::ExternVariable => "extern_variable",
            SymbolKind::Macro => "macro",
            SymbolKind::FunctionMacro => "function_macro",
        }
    }

    /// Convert from string representation
    pub fn from_string(s: &str) -> Option<Self> {
        ALL_SYMBOL_KINDS.iter().copied().find(|kind| kind.as_str() == s)
    }

    /// Kinds that carry a body and count as definitions when pairing with declarations
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            SymbolKind::Function
                | SymbolKind::StaticFunction
                | SymbolKind::InlineFunction
                | SymbolKind::Method
                | SymbolKind::VirtualMethod
                | SymbolKind::Constructor
                | SymbolKind::Operator
                | SymbolKind::FunctionTemplate
                | SymbolKind::MethodImplementation
        )
    }

    /// Kinds a definition may be paired against in a declaration file
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            SymbolKind::FunctionDeclaration
                | SymbolKind::Function
                | SymbolKind::Method
                | SymbolKind::VirtualMethod
                | SymbolKind::Constructor
                | SymbolKind::Operator
                | SymbolKind::FunctionTemplate
        )
    }
}

const ALL_SYMBOL_KINDS: [SymbolKind; 43] = [
    SymbolKind::Module,
    SymbolKind::Package,
    SymbolKind::Namespace,
    SymbolKind::Class,
    SymbolKind::ClassTemplate,
    SymbolKind::Struct,
    SymbolKind::Union,
    SymbolKind::Interface,
    SymbolKind::Protocol,
    SymbolKind::Extension,
    SymbolKind::Category,
    SymbolKind::Implementation,
    SymbolKind::Enum,
    SymbolKind::Object,
    SymbolKind::Annotation,
    SymbolKind::Type,
    SymbolKind::Typedef,
    SymbolKind::Function,
    SymbolKind::FunctionTemplate,
    SymbolKind::FunctionDeclaration,
    SymbolKind::StaticFunction,
    SymbolKind::InlineFunction,
    SymbolKind::AsyncFunction,
    SymbolKind::SuspendFunction,
    SymbolKind::ExtensionFunction,
    SymbolKind::Method,
    SymbolKind::VirtualMethod,
    SymbolKind::StaticMethod,
    SymbolKind::ClassMethod,
    SymbolKind::AsyncMethod,
    SymbolKind::SuspendMethod,
    SymbolKind::MethodImplementation,
    SymbolKind::Constructor,
    SymbolKind::Operator,
    SymbolKind::Field,
    SymbolKind::Property,
    SymbolKind::PropertyObserver,
    SymbolKind::EnumCase,
    SymbolKind::EnumConstant,
    SymbolKind::GlobalVariable,
    SymbolKind::ExternVariable,
    SymbolKind::Macro,
    SymbolKind::FunctionMacro,
];

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dependency (edge) kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    Import,
    Call,
    Extends,
    Implements,
    Conforms,
    Overrides,
    AnnotatedWith,
    ImplementsHeader,
    ImplementsDeclaration,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Import => "import",
            DependencyKind::Call => "call",
            DependencyKind::Extends => "extends",
            DependencyKind::Implements => "implements",
            DependencyKind::Conforms => "conforms",
            DependencyKind::Overrides => "overrides",
            DependencyKind::AnnotatedWith => "annotated_with",
            DependencyKind::ImplementsHeader => "implements_header",
            DependencyKind::ImplementsDeclaration => "implements_declaration",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-owning reference to a syntax node of the owning `ParsedFile`'s tree.
///
/// Only meaningful while that file (and its tree) is alive; resolve through
/// [`ParsedFile::node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub id: usize,
    pub kind: &'static str,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl NodeHandle {
    pub fn of(node: &Node) -> Self {
        Self {
            id: node.id(),
            kind: node.kind(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.id == node.id()
    }
}

/// A declared entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub signature: String,
    pub span: ParsedSpan,
    pub docstring: Option<String>,
    pub children: Vec<ParsedSymbol>,
    #[serde(skip)]
    pub node: Option<NodeHandle>,
}

impl ParsedSymbol {
    /// Depth-first search through this symbol and its children
    pub fn find(&self, predicate: &dyn Fn(&ParsedSymbol) -> bool) -> Option<&ParsedSymbol> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    pub fn child(&self, name: &str) -> Option<&ParsedSymbol> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Last segment of a qualified name (`pkg.Outer.Inner` -> `Inner`, `A::b` -> `b`)
    pub fn short_name(&self) -> &str {
        let after_scope = self.name.rsplit("::").next().unwrap_or(&self.name);
        after_scope.rsplit('.').next().unwrap_or(after_scope)
    }
}

/// A directed, best-effort named edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDependency {
    pub kind: DependencyKind,
    pub source: String,
    pub target: String,
    pub target_module: Option<String>,
    pub is_external: bool,
}

impl ParsedDependency {
    pub fn new(kind: DependencyKind, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            target: target.into(),
            target_module: None,
            is_external: false,
        }
    }

    pub fn import(
        source: impl Into<String>,
        target: impl Into<String>,
        module: impl Into<String>,
        is_external: bool,
    ) -> Self {
        Self {
            kind: DependencyKind::Import,
            source: source.into(),
            target: target.into(),
            target_module: Some(module.into()),
            is_external,
        }
    }
}

/// Symbols and dependencies produced by one extractor run
#[derive(Debug, Clone, Default)]
pub struct ExtractionResults {
    pub symbols: Vec<ParsedSymbol>,
    pub dependencies: Vec<ParsedDependency>,
}

/// File descriptor handed in by file discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Display path (usually relative to the scanned root)
    pub path: String,
    pub abs_path: String,
    /// Language tag, see [`Language::from_tag`]
    pub language: String,
    pub size: u64,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, abs_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            abs_path: abs_path.into(),
            language: language.into(),
            size: 0,
        }
    }
}

/// Extraction result for one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedFile {
    pub path: String,
    pub language: Language,
    pub content: String,
    /// blake3 hex digest of `content`, empty when the file was never read
    pub checksum: String,
    #[serde(skip)]
    pub tree: Option<Tree>,
    pub symbols: Vec<ParsedSymbol>,
    pub dependencies: Vec<ParsedDependency>,
}

impl ParsedFile {
    /// Path and language only, used when the file could not be read
    pub fn empty(path: impl Into<String>, language: Language) -> Self {
        Self {
            path: path.into(),
            language,
            content: String::new(),
            checksum: String::new(),
            tree: None,
            symbols: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_content(path: impl Into<String>, language: Language, content: String) -> Self {
        let checksum = blake3::hash(content.as_bytes()).to_hex().to_string();
        Self {
            checksum,
            content,
            ..Self::empty(path, language)
        }
    }

    /// Resolve a symbol's node handle against this file's tree
    pub fn node(&self, handle: &NodeHandle) -> Option<Node<'_>> {
        let tree = self.tree.as_ref()?;
        let mut current = tree
            .root_node()
            .descendant_for_byte_range(handle.start_byte, handle.end_byte)?;
        loop {
            if handle.matches(&current) {
                return Some(current);
            }
            if current.start_byte() != handle.start_byte || current.end_byte() != handle.end_byte {
                return None;
            }
            current = current.parent()?;
        }
    }

    /// Find a symbol by name anywhere in the symbol tree
    pub fn find_symbol(&self, name: &str) -> Option<&ParsedSymbol> {
        self.symbols
            .iter()
            .find_map(|symbol| symbol.find(&|s: &ParsedSymbol| s.name == name))
    }

    /// Every symbol, depth-first, parents before children
    pub fn all_symbols(&self) -> Vec<&ParsedSymbol> {
        fn collect<'a>(symbols: &'a [ParsedSymbol], out: &mut Vec<&'a ParsedSymbol>) {
            for symbol in symbols {
                out.push(symbol);
                collect(&symbol.children, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.symbols, &mut out);
        out
    }

    pub fn dependencies_of(&self, kind: DependencyKind) -> impl Iterator<Item = &ParsedDependency> {
        self.dependencies.iter().filter(move |d| d.kind == kind)
    }

    /// Path without extension, used to pair headers with implementation units
    pub fn path_stem(&self) -> &str {
        match self.path.rfind('.') {
            Some(dot) if !self.path[dot..].contains('/') => &self.path[..dot],
            _ => &self.path,
        }
    }

    pub fn extension(&self) -> &str {
        let stem = self.path_stem();
        self.path[stem.len()..].trim_start_matches('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str, kind: SymbolKind, children: Vec<ParsedSymbol>) -> ParsedSymbol {
        ParsedSymbol {
            name: name.to_string(),
            kind,
            signature: String::new(),
            span: ParsedSpan::default(),
            docstring: None,
            children,
            node: None,
        }
    }

    #[test]
    fn test_symbol_kind_string_forms() {
        assert_eq!(SymbolKind::ClassTemplate.to_string(), "class_template");
        assert_eq!(
            SymbolKind::from_string("property_observer"),
            Some(SymbolKind::PropertyObserver)
        );
        assert_eq!(SymbolKind::from_string("nonsense"), None);
        let json = serde_json::to_string(&SymbolKind::VirtualMethod).unwrap();
        assert_eq!(json, "\"virtual_method\"");
    }

    #[test]
    fn test_dependency_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DependencyKind::ImplementsDeclaration).unwrap();
        assert_eq!(json, "\"implements_declaration\"");
    }

    #[test]
    fn test_find_symbol_searches_children() {
        let mut file = ParsedFile::with_content("a.hpp", Language::Cpp, "x".into());
        file.symbols.push(symbol(
            "Widget",
            SymbolKind::Class,
            vec![symbol("draw", SymbolKind::Method, vec![])],
        ));
        assert_eq!(file.find_symbol("draw").map(|s| s.kind), Some(SymbolKind::Method));
        assert_eq!(file.all_symbols().len(), 2);
        assert!(file.find_symbol("missing").is_none());
    }

    #[test]
    fn test_checksum_is_blake3_of_content() {
        let file = ParsedFile::with_content("a.go", Language::Go, "package a".into());
        assert_eq!(file.checksum, blake3::hash(b"package a").to_hex().to_string());
        assert!(ParsedFile::empty("a.go", Language::Go).checksum.is_empty());
    }

    #[test]
    fn test_path_stem_and_extension() {
        let file = ParsedFile::empty("src/v1.2/widget.hpp", Language::Cpp);
        assert_eq!(file.path_stem(), "src/v1.2/widget");
        assert_eq!(file.extension(), "hpp");
        let bare = ParsedFile::empty("src/v1.2/Makefile", Language::C);
        assert_eq!(bare.extension(), "");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(symbol("com.acme.Outer.Inner", SymbolKind::Class, vec![]).short_name(), "Inner");
        assert_eq!(symbol("Widget::draw", SymbolKind::Method, vec![]).short_name(), "draw");
    }
}
