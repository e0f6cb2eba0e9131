//! Language Support - Shared tree-sitter language configuration
//!
//! Central registry for the languages polyglot extracts. ALL language-specific
//! tree-sitter configuration lives here:
//! - `Language` - closed set of supported languages, resolved once per file
//! - tag/extension detection with the common aliases
//! - grammar lookup for the syntax provider

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Every language an extractor exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    ObjC,
    ObjCpp,
    Go,
    Python,
    Java,
    Kotlin,
    Swift,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::C,
        Language::Cpp,
        Language::ObjC,
        Language::ObjCpp,
        Language::Go,
        Language::Python,
        Language::Java,
        Language::Kotlin,
        Language::Swift,
    ];

    /// Resolve a language tag as supplied by file discovery (case-insensitive, aliases allowed)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "c" => Some(Language::C),
            "cpp" | "c++" | "cc" | "cxx" => Some(Language::Cpp),
            "objc" | "objective-c" | "objectivec" => Some(Language::ObjC),
            "objcpp" | "objc++" | "objective-c++" | "objectivecpp" => Some(Language::ObjCpp),
            "go" | "golang" => Some(Language::Go),
            "python" | "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "kotlin" | "kt" => Some(Language::Kotlin),
            "swift" => Some(Language::Swift),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        detect_language_from_extension(extension).and_then(Self::from_tag)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::ObjC => "objc",
            Language::ObjCpp => "objcpp",
            Language::Go => "go",
            Language::Python => "python",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
        }
    }

    /// Human readable name used in diagnostics ("syntax error in Go file")
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::ObjC => "Objective-C",
            Language::ObjCpp => "Objective-C++",
            Language::Go => "Go",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
            Language::Swift => "Swift",
        }
    }

    /// Grammar backing this language.
    ///
    /// Objective-C++ has no grammar of its own; it is parsed with the C++ grammar
    /// first and the Objective-C grammar as fallback.
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Cpp | Language::ObjCpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::ObjC => tree_sitter_objc::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Kotlin => tree_sitter_kotlin_ng::LANGUAGE.into(),
            Language::Swift => tree_sitter_swift::LANGUAGE.into(),
        }
    }

    /// C-family languages that split declarations into header files
    pub fn uses_headers(&self) -> bool {
        matches!(
            self,
            Language::C | Language::Cpp | Language::ObjC | Language::ObjCpp
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get tree-sitter language parser for a given language name
///
/// Accepts any tag understood by [`Language::from_tag`].
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    Language::from_tag(language)
        .map(|lang| lang.tree_sitter_language())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported language: '{}'. Supported languages: c, cpp, objc, objcpp, go, python, java, kotlin, swift",
                language
            )
        })
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "c" | "h" => Some("c"),
        "cpp" | "cc" | "cxx" | "c++" | "hpp" | "hh" | "hxx" => Some("cpp"),
        "m" => Some("objc"),
        "mm" => Some("objcpp"),
        "go" => Some("go"),
        "py" | "pyi" => Some("python"),
        "java" => Some("java"),
        "kt" | "kts" => Some("kotlin"),
        "swift" => Some("swift"),
        _ => None,
    }
}
