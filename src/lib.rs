// Polyglot Core - tree-sitter powered symbol and dependency extraction
//
// Source files in C, C++, Objective-C, Objective-C++, Go, Python, Java, Kotlin
// and Swift are turned into one language-agnostic model of symbols and
// dependencies. Batches run on a rayon worker pool; declaration/definition
// pairs are linked afterwards by the cross-reference matcher.

pub mod config;
pub mod extractors;
pub mod language;
pub mod matcher;
pub mod pool;
pub mod syntax;

pub use config::ExtractorConfig;
pub use extractors::base::{
    DependencyKind, DetailedParseError, ParseErrorKind, ParsedDependency, ParsedFile, ParsedSpan,
    ParsedSymbol, SourceFile, SymbolKind,
};
pub use extractors::factory::{extract_file, extract_source};
pub use language::Language;
pub use matcher::{associate, find_header_impl_pairs, match_files};
pub use pool::{optimal_worker_count, ParserPool, ProgressLogger, TracingProgressLogger};
