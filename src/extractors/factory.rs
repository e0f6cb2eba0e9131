//! Shared extractor factory - single entry point for every supported language
//!
//! `extract_file` reads one `SourceFile`, resolves its language once, parses it
//! and runs the matching extractor. It never fails: every outcome is a
//! (possibly partial) `ParsedFile` plus an optional per-file diagnostic.

use crate::extractors::base::{DetailedParseError, ExtractionResults, ParsedFile, SourceFile};
use crate::extractors::{
    c::CExtractor, cpp::CppExtractor, go::GoExtractor, java::JavaExtractor,
    kotlin::KotlinExtractor, objc::ObjCExtractor, objcpp, python::PythonExtractor,
    swift::SwiftExtractor,
};
use crate::language::Language;
use crate::syntax;
use tracing::debug;
use tree_sitter::Tree;

/// Outcome of one extraction job.
///
/// The file is `None` only when the language tag is unknown; the error is set
/// for unreadable files, missing trees and recoverable syntax errors.
pub type FileOutcome = (Option<ParsedFile>, Option<DetailedParseError>);

/// Extract symbols and dependencies from one source file on disk
///
/// # Example
/// ```no_run
/// use polyglot_core::extractors::base::SourceFile;
/// use polyglot_core::extractors::factory::extract_file;
///
/// let file = SourceFile::new("src/app.py", "/repo/src/app.py", "python");
/// let (parsed, error) = extract_file(&file);
/// assert!(parsed.is_some() || error.is_some());
/// ```
pub fn extract_file(file: &SourceFile) -> FileOutcome {
    let Some(language) = Language::from_tag(&file.language) else {
        return (
            None,
            Some(DetailedParseError::mapping(
                &file.path,
                format!("unsupported language: {}", file.language),
            )),
        );
    };

    let content = match std::fs::read(&file.abs_path) {
        // Invalid UTF-8 is replaced rather than rejected
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            return (
                Some(ParsedFile::empty(&file.path, language)),
                Some(DetailedParseError::filesystem(&file.path, &e)),
            );
        }
    };

    let (parsed, error) = extract_source(&file.path, &file.abs_path, language, content);
    debug!(
        "extracted {} ({}): {} symbols, {} dependencies",
        parsed.path,
        language,
        parsed.symbols.len(),
        parsed.dependencies.len()
    );
    (Some(parsed), error)
}

/// Extract from in-memory content. `abs_path` only feeds module inference (Go).
pub fn extract_source(
    path: &str,
    abs_path: &str,
    language: Language,
    content: String,
) -> (ParsedFile, Option<DetailedParseError>) {
    match language {
        Language::ObjCpp => objcpp::extract(path, abs_path, content),
        _ => extract_with(path, abs_path, language, content),
    }
}

/// Parse with `language`'s grammar and run its extractor
pub(crate) fn extract_with(
    path: &str,
    abs_path: &str,
    language: Language,
    content: String,
) -> (ParsedFile, Option<DetailedParseError>) {
    let outcome = syntax::parse(&content, language);
    let mut file = ParsedFile::with_content(path, language, content);

    let Some(tree) = outcome.tree else {
        let reason = outcome
            .error
            .map(|e| e.message)
            .unwrap_or_else(|| "parser returned no tree".to_string());
        let error = DetailedParseError::parse(
            path,
            format!("failed to parse {} file: {}", language.display_name(), reason),
        );
        return (file, Some(error));
    };

    let results = run_extractor(language, path, abs_path, &file.content, &tree);
    file.symbols = results.symbols;
    file.dependencies = results.dependencies;
    file.tree = Some(tree);

    let error = outcome.error.map(|syntax_error| {
        let error = DetailedParseError::parse(
            path,
            format!(
                "syntax error in {} file: {}",
                language.display_name(),
                syntax_error.message
            ),
        );
        match (syntax_error.line, syntax_error.column) {
            (Some(line), Some(column)) => error.at(line, column),
            _ => error,
        }
    });
    (file, error)
}

/// Single dispatch over the closed language set
fn run_extractor(
    language: Language,
    path: &str,
    abs_path: &str,
    content: &str,
    tree: &Tree,
) -> ExtractionResults {
    match language {
        Language::C => CExtractor::new(path, content).extract(tree),
        Language::Cpp | Language::ObjCpp => CppExtractor::new(path, content).extract(tree),
        Language::ObjC => ObjCExtractor::new(path, content).extract(tree),
        Language::Go => GoExtractor::new(path, abs_path, content).extract(tree),
        Language::Python => PythonExtractor::new(path, content).extract(tree),
        Language::Java => JavaExtractor::new(path, content).extract(tree),
        Language::Kotlin => KotlinExtractor::new(path, content).extract(tree),
        Language::Swift => SwiftExtractor::new(path, content).extract(tree),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{DependencyKind, ParseErrorKind, SymbolKind};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> SourceFile {
        let abs = dir.path().join(name);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&abs, content).unwrap();
        SourceFile::new(name, abs.to_string_lossy(), "")
    }

    fn source(dir: &TempDir, name: &str, language: &str, content: &str) -> SourceFile {
        SourceFile {
            language: language.to_string(),
            ..write(dir, name, content)
        }
    }

    #[test]
    fn test_every_language_reaches_an_extractor() {
        let dir = TempDir::new().unwrap();
        let cases = [
            ("a.c", "c", "int main(void) { return 0; }\n"),
            ("a.cpp", "cpp", "int main() { return 0; }\n"),
            ("a.m", "objc", "@interface A : NSObject\n@end\n"),
            ("a.mm", "objcpp", "class A {};\n"),
            ("a.go", "go", "package a\n"),
            ("a.py", "python", "def a():\n    pass\n"),
            ("A.java", "java", "class A {}\n"),
            ("a.kt", "kotlin", "fun a() {}\n"),
            ("a.swift", "swift", "func a() {}\n"),
        ];
        for (name, tag, content) in cases {
            let (parsed, error) = extract_file(&source(&dir, name, tag, content));
            let parsed = parsed.unwrap_or_else(|| panic!("{} produced no file", tag));
            assert!(error.is_none(), "{}: {:?}", tag, error);
            assert_eq!(parsed.language.as_str(), tag);
            assert!(parsed.tree.is_some());
            assert!(!parsed.checksum.is_empty());
        }
    }

    #[test]
    fn test_valid_go_file() {
        let dir = TempDir::new().unwrap();
        let file = source(
            &dir,
            "main.go",
            "go",
            "package main\nfunc Hello() string { return \"hello\" }",
        );
        let (parsed, error) = extract_file(&file);
        let parsed = parsed.unwrap();
        assert!(error.is_none());
        assert_eq!(parsed.symbols.len(), 2);
        assert!(parsed.dependencies.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_a_filesystem_error() {
        let file = SourceFile::new("missing.py", "/definitely/not/here/missing.py", "python");
        let (parsed, error) = extract_file(&file);
        let parsed = parsed.unwrap();
        let error = error.unwrap();
        assert_eq!(error.kind, ParseErrorKind::Filesystem);
        assert!(error.message.starts_with("failed to read file:"));
        assert_eq!(parsed.path, "missing.py");
        assert_eq!(parsed.language, Language::Python);
        assert!(parsed.symbols.is_empty());
        assert!(parsed.tree.is_none());
    }

    #[test]
    fn test_unknown_language_is_a_mapping_error() {
        let dir = TempDir::new().unwrap();
        let file = source(&dir, "main.rs", "rust", "fn main() {}\n");
        let (parsed, error) = extract_file(&file);
        assert!(parsed.is_none());
        let error = error.unwrap();
        assert_eq!(error.kind, ParseErrorKind::Mapping);
        assert_eq!(error.message, "unsupported language: rust");
    }

    #[test]
    fn test_empty_file_has_no_tree() {
        let dir = TempDir::new().unwrap();
        let file = source(&dir, "empty.kt", "kotlin", "");
        let (parsed, error) = extract_file(&file);
        let parsed = parsed.unwrap();
        let error = error.unwrap();
        assert_eq!(error.kind, ParseErrorKind::Parse);
        assert_eq!(
            error.message,
            "failed to parse Kotlin file: empty content provided"
        );
        assert!(parsed.tree.is_none());
        assert!(parsed.symbols.is_empty());
    }

    #[test]
    fn test_broken_file_keeps_partial_results() {
        let dir = TempDir::new().unwrap();
        let file = source(
            &dir,
            "broken.py",
            "python",
            "def ok():\n    return 1\n\ndef broken(:\n    pass\n",
        );
        let (parsed, error) = extract_file(&file);
        let parsed = parsed.unwrap();
        let error = error.unwrap();
        assert_eq!(error.kind, ParseErrorKind::Parse);
        assert_eq!(
            error.message,
            "syntax error in Python file: parse tree contains errors"
        );
        assert!(error.line.is_some() && error.column.is_some());
        assert!(parsed.symbols.iter().any(|s| s.name == "ok"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = TempDir::new().unwrap();
        let abs = dir.path().join("latin.py");
        fs::write(&abs, b"# caf\xe9\ndef f():\n    pass\n").unwrap();
        let file = SourceFile::new("latin.py", abs.to_string_lossy(), "py");
        let (parsed, error) = extract_file(&file);
        assert!(error.is_none());
        let parsed = parsed.unwrap();
        assert!(parsed.content.contains('\u{FFFD}'));
        assert_eq!(parsed.symbols[0].name, "f");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = source(
            &dir,
            "src/main/java/com/acme/App.java",
            "java",
            "package com.acme;\nimport org.slf4j.Logger;\npublic class App extends Base {\n  void run() { start(); }\n}\n",
        );
        let (first, _) = extract_file(&file);
        let (second, _) = extract_file(&file);
        let first = serde_json::to_string(&first.unwrap()).unwrap();
        let second = serde_json::to_string(&second.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_base_class_yields_one_extends() {
        let dir = TempDir::new().unwrap();
        let file = source(&dir, "shapes.py", "python", "class Circle(Shape):\n    pass\n");
        let (parsed, _) = extract_file(&file);
        let parsed = parsed.unwrap();
        let extends: Vec<_> = parsed.dependencies_of(DependencyKind::Extends).collect();
        assert_eq!(extends.len(), 1);
        assert_eq!(extends[0].source, "Circle");
        assert_eq!(extends[0].target, "Shape");
        assert_eq!(parsed.symbols[0].kind, SymbolKind::Class);
    }

    #[test]
    fn test_node_handles_resolve_against_the_owned_tree() {
        let dir = TempDir::new().unwrap();
        let file = source(&dir, "w.cpp", "cpp", "class W {\n  void draw();\n};\n");
        let (parsed, _) = extract_file(&file);
        let parsed = parsed.unwrap();
        let draw = parsed.find_symbol("draw").unwrap();
        let node = parsed.node(&draw.node.unwrap()).unwrap();
        assert_eq!(node.kind(), "field_declaration");
    }
}
