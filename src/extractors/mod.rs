//! Language Extractors Module
//!
//! Tree-sitter based extractors, one per supported language. Each turns a
//! syntax tree into the uniform model of symbols and dependencies defined in
//! `base`.
//!
//! # Architecture
//!
//! - `base` - model types, diagnostics and helpers shared by every extractor
//! - `factory` - reads a file, resolves its language once and dispatches
//! - `objcpp` - Objective-C++ on top of the C++ and Objective-C extractors
//! - Language modules (c, cpp, go, java, kotlin, objc, python, swift)

pub mod base;
pub mod factory;
pub mod objcpp;

pub mod c;
pub mod cpp;
pub mod go;
pub mod java;
pub mod kotlin;
pub mod objc;
pub mod python;
pub mod swift;

// Re-export the public API
pub use base::{
    DependencyKind, DetailedParseError, ExtractionResults, ParseErrorKind, ParsedDependency, ParsedFile,
    ParsedSymbol, SourceFile, SymbolKind,
};
pub use factory::{extract_file, extract_source};
