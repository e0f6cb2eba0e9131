//! Objective-C++ Extractor
//!
//! There is no dedicated grammar for `.mm` files. The C++ grammar goes first;
//! when it produces nothing usable the Objective-C grammar gets a turn. Either
//! way the resulting file is tagged as Objective-C++.
//!
//! [`extract_merged`] runs both grammars instead. When both parse cleanly
//! their findings are combined by [`merge_results`]; otherwise the clean side
//! is returned as is.

use crate::extractors::base::{DetailedParseError, ParsedFile, SymbolKind};
use crate::extractors::factory::extract_with;
use crate::language::Language;
use std::collections::HashSet;
use tracing::debug;

/// Kinds where the Objective-C view of a symbol is more faithful than the C++ one
const OBJC_PREFERRED: &[SymbolKind] = &[
    SymbolKind::Class,
    SymbolKind::Interface,
    SymbolKind::Implementation,
    SymbolKind::Protocol,
    SymbolKind::Category,
];

pub fn extract(
    path: &str,
    abs_path: &str,
    content: String,
) -> (ParsedFile, Option<DetailedParseError>) {
    let (cpp, cpp_error) = extract_with(path, abs_path, Language::Cpp, content);
    let usable = cpp_error.is_none() || !cpp.symbols.is_empty() || !cpp.dependencies.is_empty();

    let (mut file, error) = if usable {
        (cpp, cpp_error)
    } else {
        debug!("{}: C++ grammar found nothing, retrying as Objective-C", path);
        let ParsedFile { content, .. } = cpp;
        extract_with(path, abs_path, Language::ObjC, content)
    };
    file.language = Language::ObjCpp;
    (file, error.map(|e| retag(e, Language::ObjCpp)))
}

/// Run both grammars and merge what each one found.
///
/// - both report an error: the C++ view and its error
/// - one reports an error: the other view alone, unmerged
/// - both clean: the merged view
pub fn extract_merged(
    path: &str,
    abs_path: &str,
    content: String,
) -> (ParsedFile, Option<DetailedParseError>) {
    let (cpp, cpp_error) = extract_with(path, abs_path, Language::Cpp, content.clone());
    let (objc, objc_error) = extract_with(path, abs_path, Language::ObjC, content);

    let (mut file, error) = match (cpp_error, objc_error) {
        (Some(error), Some(_)) => (cpp, Some(retag(error, Language::ObjCpp))),
        (Some(_), None) => {
            debug!("{}: only the Objective-C grammar parsed cleanly", path);
            (objc, None)
        }
        (None, Some(_)) => {
            debug!("{}: only the C++ grammar parsed cleanly", path);
            (cpp, None)
        }
        (None, None) => (merge_results(cpp, objc), None),
    };
    file.language = Language::ObjCpp;
    (file, error)
}

/// Union of two extractions of the same file.
///
/// Symbols are keyed by `kind:name` and dependencies by `kind:source:target`;
/// the first occurrence keeps its position. For class-like kinds the
/// Objective-C symbol replaces a C++ symbol with the same key.
pub fn merge_results(cpp: ParsedFile, objc: ParsedFile) -> ParsedFile {
    let ParsedFile {
        path,
        content,
        checksum,
        tree,
        symbols: cpp_symbols,
        dependencies: cpp_dependencies,
        ..
    } = cpp;

    let mut symbols = cpp_symbols;
    for symbol in objc.symbols {
        let existing = symbols
            .iter()
            .position(|s| s.kind == symbol.kind && s.name == symbol.name);
        match existing {
            Some(index) if OBJC_PREFERRED.contains(&symbol.kind) => symbols[index] = symbol,
            Some(_) => {}
            None => symbols.push(symbol),
        }
    }

    let mut seen = HashSet::new();
    let dependencies = cpp_dependencies
        .into_iter()
        .chain(objc.dependencies)
        .filter(|d| seen.insert(format!("{}:{}:{}", d.kind, d.source, d.target)))
        .collect();

    ParsedFile {
        path,
        language: Language::ObjCpp,
        content,
        checksum,
        // Node handles of replaced symbols point into the other tree; only the
        // C++ tree is kept
        tree,
        symbols,
        dependencies,
    }
}

fn retag(mut error: DetailedParseError, language: Language) -> DetailedParseError {
    for name in [Language::Cpp.display_name(), Language::ObjC.display_name()] {
        let from = format!(" {} file", name);
        if error.message.contains(&from) {
            error.message = error
                .message
                .replacen(&from, &format!(" {} file", language.display_name()), 1);
            break;
        }
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{DependencyKind, ParseErrorKind, ParsedDependency, ParsedSpan, ParsedSymbol};

    fn symbol(name: &str, kind: SymbolKind, signature: &str) -> ParsedSymbol {
        ParsedSymbol {
            name: name.to_string(),
            kind,
            signature: signature.to_string(),
            span: ParsedSpan::default(),
            docstring: None,
            children: Vec::new(),
            node: None,
        }
    }

    fn file(language: Language, symbols: Vec<ParsedSymbol>, dependencies: Vec<ParsedDependency>) -> ParsedFile {
        let mut file = ParsedFile::with_content("View.mm", language, "x".to_string());
        file.symbols = symbols;
        file.dependencies = dependencies;
        file
    }

    #[test]
    fn test_cpp_grammar_wins_for_cpp_content() {
        let source = "#include <vector>\nclass Buffer {\n public:\n  void flush();\n};\n";
        let (parsed, error) = extract("Buffer.mm", "/repo/Buffer.mm", source.to_string());
        assert!(error.is_none());
        assert_eq!(parsed.language, Language::ObjCpp);
        assert_eq!(parsed.symbols[0].name, "Buffer");
        assert_eq!(parsed.symbols[0].kind, SymbolKind::Class);
        assert!(parsed.dependencies.iter().any(|d| d.target == "vector"));
    }

    #[test]
    fn test_empty_content_reports_objcpp() {
        let (parsed, error) = extract("Empty.mm", "/repo/Empty.mm", String::new());
        let error = error.unwrap();
        assert_eq!(error.kind, ParseErrorKind::Parse);
        assert_eq!(
            error.message,
            "failed to parse Objective-C++ file: empty content provided"
        );
        assert_eq!(parsed.language, Language::ObjCpp);
        assert!(parsed.symbols.is_empty());
    }

    fn names(file: &ParsedFile) -> Vec<(String, SymbolKind)> {
        file.symbols.iter().map(|s| (s.name.clone(), s.kind)).collect()
    }

    #[test]
    fn test_extract_merged_combines_clean_views() {
        let source = "#include <stdint.h>\nint add(int a, int b) { return a + b; }\n";
        let (_, cpp_error) = extract_with("math.mm", "/repo/math.mm", Language::Cpp, source.to_string());
        let (_, objc_error) = extract_with("math.mm", "/repo/math.mm", Language::ObjC, source.to_string());
        assert!(cpp_error.is_none() && objc_error.is_none());

        let (merged, error) = extract_merged("math.mm", "/repo/math.mm", source.to_string());
        assert!(error.is_none());
        assert_eq!(merged.language, Language::ObjCpp);
        assert_eq!(merged.symbols.iter().filter(|s| s.name == "add").count(), 1);
        let includes: Vec<&str> = merged
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Import)
            .map(|d| d.target.as_str())
            .collect();
        assert_eq!(includes, vec!["stdint.h"]);
        assert!(merged.tree.is_some());
    }

    #[test]
    fn test_extract_merged_keeps_objc_view_when_cpp_fails() {
        let source = "@implementation Person\n- (void)greet {\n}\n@end\n";
        let (objc_only, objc_error) =
            extract_with("Person.mm", "/repo/Person.mm", Language::ObjC, source.to_string());
        assert!(objc_error.is_none());
        assert!(!objc_only.symbols.is_empty());

        let (parsed, error) = extract_merged("Person.mm", "/repo/Person.mm", source.to_string());
        assert!(error.is_none());
        assert_eq!(parsed.language, Language::ObjCpp);
        assert_eq!(names(&parsed), names(&objc_only));
        assert_eq!(parsed.dependencies.len(), objc_only.dependencies.len());
    }

    #[test]
    fn test_extract_merged_keeps_cpp_view_when_objc_fails() {
        let source = "namespace gfx {\ntemplate <typename T>\nclass Box {\n  T value;\n};\n}\n";
        let (cpp_only, cpp_error) =
            extract_with("Box.mm", "/repo/Box.mm", Language::Cpp, source.to_string());
        assert!(cpp_error.is_none());

        let (parsed, error) = extract_merged("Box.mm", "/repo/Box.mm", source.to_string());
        assert!(error.is_none());
        assert_eq!(parsed.language, Language::ObjCpp);
        assert_eq!(names(&parsed), names(&cpp_only));
    }

    #[test]
    fn test_extract_merged_reports_cpp_error_when_both_fail() {
        let (parsed, error) = extract_merged("Empty.mm", "/repo/Empty.mm", String::new());
        assert_eq!(
            error.unwrap().message,
            "failed to parse Objective-C++ file: empty content provided"
        );
        assert_eq!(parsed.language, Language::ObjCpp);
        assert!(parsed.symbols.is_empty());

        let source = "class Broken {\n  void f( {\n}\n@end\n";
        let (cpp_only, _) = extract_with("Broken.mm", "/repo/Broken.mm", Language::Cpp, source.to_string());
        let (parsed, error) = extract_merged("Broken.mm", "/repo/Broken.mm", source.to_string());
        let error = error.unwrap();
        assert_eq!(error.kind, ParseErrorKind::Parse);
        assert!(error.message.starts_with("syntax error in Objective-C++ file"));
        assert!(error.line.is_some());
        assert_eq!(names(&parsed), names(&cpp_only));
    }

    #[test]
    fn test_merge_prefers_objc_for_class_like_symbols() {
        let cpp = file(
            Language::Cpp,
            vec![
                symbol("Renderer", SymbolKind::Class, "class Renderer"),
                symbol("helper", SymbolKind::Function, "void helper()"),
            ],
            vec![ParsedDependency::import("", "vector", "vector", false)],
        );
        let objc = file(
            Language::ObjC,
            vec![
                symbol("Renderer", SymbolKind::Class, "@interface Renderer"),
                symbol("helper", SymbolKind::Function, "helper()"),
                symbol("Canvas", SymbolKind::Implementation, "@implementation Canvas"),
            ],
            vec![
                ParsedDependency::import("", "vector", "vector", false),
                ParsedDependency::new(DependencyKind::ImplementsHeader, "Canvas", "Canvas"),
            ],
        );

        let merged = merge_results(cpp, objc);
        assert_eq!(merged.language, Language::ObjCpp);
        let symbols: Vec<(&str, &str)> = merged
            .symbols
            .iter()
            .map(|s| (s.name.as_str(), s.signature.as_str()))
            .collect();
        assert_eq!(
            symbols,
            vec![
                ("Renderer", "@interface Renderer"),
                ("helper", "void helper()"),
                ("Canvas", "@implementation Canvas"),
            ]
        );
        assert_eq!(merged.dependencies.len(), 2);
        assert_eq!(merged.dependencies[0].target, "vector");
        assert_eq!(merged.dependencies[1].kind, DependencyKind::ImplementsHeader);
    }

    #[test]
    fn test_merge_keeps_same_name_with_different_kinds() {
        let cpp = file(Language::Cpp, vec![symbol("Point", SymbolKind::Struct, "")], vec![]);
        let objc = file(Language::ObjC, vec![symbol("Point", SymbolKind::Typedef, "")], vec![]);
        let merged = merge_results(cpp, objc);
        assert_eq!(merged.symbols.len(), 2);
    }

    #[test]
    fn test_retag_rewrites_grammar_name() {
        let error = DetailedParseError::parse("a.mm", "syntax error in C++ file: parse tree contains errors");
        assert_eq!(
            retag(error, Language::ObjCpp).message,
            "syntax error in Objective-C++ file: parse tree contains errors"
        );
    }
}
