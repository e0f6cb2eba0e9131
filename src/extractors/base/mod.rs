// Base extractor types and shared helpers
//
// - types.rs: the uniform model (ParsedFile, ParsedSymbol, ParsedDependency, ...)
// - errors.rs: DetailedParseError and its kinds
// - extractor.rs: BaseExtractor, step runner, comment/signature helpers
// - creation_methods.rs: symbol creation and call-site recording
// - tree_methods.rs: tree navigation and symbol lookup by node
// - imports.rs: internal/external import classification

pub mod creation_methods;
pub mod errors;
pub mod extractor;
pub mod imports;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use creation_methods::{enclosing_symbol, relation_edges, SymbolOptions};
pub use errors::{DetailedParseError, ParseErrorKind};
pub use extractor::{run_step, BaseExtractor};
pub use imports::ImportContext;
pub use types::{
    DependencyKind, ExtractionResults, NodeHandle, ParsedDependency, ParsedFile, ParsedSpan, ParsedSymbol,
    SourceFile, SymbolKind,
};
