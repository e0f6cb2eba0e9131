//! Internal vs. external import classification
//!
//! A deliberate heuristic, not ground truth:
//! - no dot in the path: standard library, internal
//! - dotted path: external, unless it shares the current file's base package
//! - per-language overlays (JVM standard library prefixes, Apple frameworks,
//!   C/C++ standard headers)
//!
//! Every function here is pure: same (path, language, context) in, same answer out.

use crate::language::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Module context of the file issuing the import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportContext {
    /// Declared or inferred package/module of the current file
    pub package: Option<String>,
}

impl ImportContext {
    pub fn new(package: Option<String>) -> Self {
        Self { package }
    }
}

/// First `depth` dotted segments (`com.example.module` -> `com.example` for depth 2)
pub fn base_package(package: &str, depth: usize) -> String {
    package
        .split('.')
        .take(depth)
        .collect::<Vec<_>>()
        .join(".")
}

/// Shared rule for dotted import paths
pub fn is_external_dotted(import_path: &str, context: &ImportContext, depth: usize) -> bool {
    if !import_path.contains('.') {
        return false;
    }
    if let Some(current) = context.package.as_deref().filter(|p| !p.is_empty()) {
        let current_base = base_package(current, depth);
        let import_base = base_package(import_path, depth);
        if !current_base.is_empty() && current_base == import_base {
            return false;
        }
    }
    true
}

/// Classify an import statement path for `language`.
///
/// C-family includes go through [`is_external_include`] or
/// [`is_external_c_include`] instead, since they also depend on the include syntax.
pub fn is_external_import(language: Language, import_path: &str, context: &ImportContext) -> bool {
    match language {
        Language::Java => {
            if import_path.starts_with("java.") || import_path.starts_with("javax.") {
                return false;
            }
            is_external_dotted(import_path, context, 2)
        }
        Language::Kotlin => {
            if ["kotlin.", "kotlinx.", "java.", "javax."]
                .iter()
                .any(|prefix| import_path.starts_with(prefix))
            {
                return false;
            }
            is_external_dotted(import_path, context, 2)
        }
        Language::Python => {
            // Relative imports stay inside the package
            if import_path.starts_with('.') {
                return false;
            }
            is_external_dotted(import_path, context, 1)
        }
        Language::Go => is_external_go(import_path, context),
        Language::Swift => SWIFT_FRAMEWORKS
            .iter()
            .any(|fw| import_path == *fw || import_path.starts_with(&format!("{}.", fw))),
        Language::ObjC | Language::ObjCpp => is_apple_framework_header(import_path),
        // Without the include syntax the path alone decides
        Language::C => is_external_c_header(import_path),
        Language::Cpp => is_external_include(import_path, true),
    }
}

/// Go: dotted module paths are third party unless under the current module
fn is_external_go(import_path: &str, context: &ImportContext) -> bool {
    if !import_path.contains('.') {
        return false;
    }
    match context.package.as_deref().filter(|m| !m.is_empty()) {
        Some(module) => !(import_path == module || import_path.starts_with(&format!("{}/", module))),
        None => true,
    }
}

/// `host.tld/owner/repo/` followed by at least the file name
static GO_MODULE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[/\\])([^./\\][^/\\]*\.[^/\\]+)[/\\]([^/\\]+)[/\\]([^/\\]+)[/\\].+")
        .expect("valid Go module path pattern")
});

/// Infer a Go module path (`host/owner/repo`) from a file path laid out under a
/// code host directory, e.g. `.../src/github.com/user/project/cmd/main.go`.
pub fn infer_go_module(file_path: &str) -> Option<String> {
    let captures = GO_MODULE_PATH.captures(file_path)?;
    Some(format!("{}/{}/{}", &captures[1], &captures[2], &captures[3]))
}

/// Dotted package for a Python file from its directory (`pkg/sub/mod.py` -> `pkg.sub`)
pub fn python_package_from_path(file_path: &str) -> Option<String> {
    let normalized = file_path.replace('\\', "/");
    let dir = normalized.rsplit_once('/')?.0;
    let package = dir
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "src")
        .collect::<Vec<_>>()
        .join(".");
    if package.is_empty() {
        None
    } else {
        Some(package)
    }
}

/// Dotted package of a JVM source file below the first matching source root
/// (`src/main/java/com/example/App.java` -> `com.example`). A file sitting
/// directly in the root belongs to the default package.
pub fn package_from_source_root(file_path: &str, source_roots: &[&str]) -> Option<String> {
    let normalized = file_path.replace('\\', "/");
    let (idx, source_root) = source_roots
        .iter()
        .find_map(|root| normalized.find(root).map(|idx| (idx, *root)))?;
    let relative = &normalized[idx + source_root.len()..];
    let (dir, _file) = relative.rsplit_once('/')?;
    Some(dir.replace('/', "."))
}

const SWIFT_FRAMEWORKS: &[&str] = &[
    "Foundation",
    "UIKit",
    "SwiftUI",
    "Combine",
    "CoreData",
    "CoreGraphics",
    "CoreLocation",
    "MapKit",
    "AVFoundation",
    "WebKit",
    "AppKit",
    "Cocoa",
];

const OBJC_FRAMEWORKS: &[&str] = &[
    "Foundation",
    "UIKit",
    "CoreData",
    "CoreGraphics",
    "CoreLocation",
    "MapKit",
    "AVFoundation",
    "WebKit",
    "AppKit",
    "Cocoa",
    "QuartzCore",
    "CoreAnimation",
    "CoreText",
    "Security",
    "SystemConfiguration",
];

/// `Foundation/Foundation.h` or `UIKit.h` style framework headers
pub fn is_apple_framework_header(import_path: &str) -> bool {
    OBJC_FRAMEWORKS.iter().any(|fw| {
        import_path.starts_with(&format!("{}/", fw)) || import_path == format!("{}.h", fw)
    })
}

const CPP_STD_HEADERS: &[&str] = &[
    "iostream", "fstream", "sstream", "iomanip", "string", "string_view", "vector", "list",
    "map", "unordered_map", "set", "unordered_set", "queue", "stack", "deque", "array",
    "algorithm", "iterator", "functional", "memory", "utility", "tuple", "optional",
    "variant", "any", "chrono", "thread", "mutex", "condition_variable", "atomic", "future",
    "exception", "stdexcept", "typeinfo", "type_traits", "limits", "numeric", "cmath",
    "cstdlib", "cstdio", "cstring", "ctime", "cassert", "cerrno", "cctype", "cwchar",
    "cwctype", "cstdint", "cstddef", "regex", "random", "bitset", "complex", "valarray",
    "locale", "codecvt", "filesystem",
];

const C_STD_HEADERS: &[&str] = &[
    "stdio.h", "stdlib.h", "string.h", "math.h", "time.h", "ctype.h", "stddef.h",
    "stdint.h", "stdbool.h", "assert.h", "errno.h", "limits.h", "float.h", "stdarg.h",
    "setjmp.h", "signal.h", "locale.h", "wchar.h", "wctype.h", "complex.h", "fenv.h",
    "inttypes.h", "iso646.h", "stdalign.h", "stdatomic.h", "stdnoreturn.h", "threads.h",
    "uchar.h",
];

const THIRD_PARTY_INCLUDES: &[&str] = &[
    "boost/", "Qt", "wx/", "gtk/", "SDL", "SFML/", "eigen", "opencv", "curl/", "json/",
    "yaml-cpp/", "protobuf/", "grpc/",
];

const SYSTEM_INCLUDES: &[&str] = &[
    "sys/", "linux/", "unix/", "windows.h", "pthread.h", "unistd.h", "fcntl.h", "dirent.h",
];

/// Classify a C++ include. `is_system` is true for `<...>` includes.
pub fn is_external_include(include_path: &str, is_system: bool) -> bool {
    if CPP_STD_HEADERS.contains(&include_path) || C_STD_HEADERS.contains(&include_path) {
        return false;
    }

    if is_system {
        if THIRD_PARTY_INCLUDES
            .iter()
            .any(|prefix| include_path.contains(prefix))
        {
            return true;
        }
        if SYSTEM_INCLUDES
            .iter()
            .any(|prefix| include_path.starts_with(prefix))
        {
            return true;
        }
    }

    // Local header next to the including file
    let local_header = [".h", ".hpp", ".hh", ".hxx"]
        .iter()
        .any(|ext| include_path.ends_with(ext));
    if local_header && !include_path.contains('/') {
        return false;
    }

    true
}

/// Classify a C include. Angle-bracket includes are always internal; quoted
/// ones are external unless they name a standard or bare local header, with
/// POSIX and platform headers counted as external.
pub fn is_external_c_include(include_path: &str, is_system: bool) -> bool {
    !is_system && is_external_c_header(include_path)
}

fn is_external_c_header(include_path: &str) -> bool {
    if C_STD_HEADERS.contains(&include_path) {
        return false;
    }
    if SYSTEM_INCLUDES
        .iter()
        .any(|prefix| include_path.starts_with(prefix))
    {
        return true;
    }
    !(include_path.ends_with(".h") && !include_path.contains('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(package: &str) -> ImportContext {
        ImportContext::new(Some(package.to_string()))
    }

    #[test]
    fn test_undotted_import_is_internal() {
        assert!(!is_external_import(Language::Go, "fmt", &ImportContext::default()));
        assert!(!is_external_import(Language::Go, "net/http", &ImportContext::default()));
        assert!(!is_external_import(Language::Python, "os", &ImportContext::default()));
    }

    #[test]
    fn test_dotted_import_from_other_base_package_is_external() {
        let context = ctx("com.example.controller");
        assert!(is_external_import(
            Language::Java,
            "org.springframework.boot.SpringApplication",
            &context
        ));
        assert!(!is_external_import(
            Language::Java,
            "com.example.service.UserService",
            &context
        ));
        assert!(!is_external_import(Language::Java, "java.util.List", &context));
    }

    #[test]
    fn test_kotlin_stdlib_prefixes_are_internal() {
        let context = ctx("com.acme.app");
        assert!(!is_external_import(Language::Kotlin, "kotlinx.coroutines.launch", &context));
        assert!(!is_external_import(Language::Kotlin, "javax.inject.Inject", &context));
        assert!(is_external_import(Language::Kotlin, "io.ktor.server.Application", &context));
    }

    #[test]
    fn test_go_module_context() {
        let module = infer_go_module("/home/user/go/src/github.com/user/project/cmd/main.go");
        assert_eq!(module.as_deref(), Some("github.com/user/project"));
        let context = ImportContext::new(module);
        assert!(!is_external_import(
            Language::Go,
            "github.com/user/project/pkg/service",
            &context
        ));
        assert!(is_external_import(Language::Go, "github.com/other/library", &context));
        assert!(is_external_import(Language::Go, "go.uber.org/zap", &context));
        assert_eq!(infer_go_module("/home/user/myproject/service.go"), None);
    }

    #[test]
    fn test_python_relative_and_package_imports() {
        let package = python_package_from_path("app/services/users.py");
        assert_eq!(package.as_deref(), Some("app.services"));
        let context = ImportContext::new(package);
        assert!(!is_external_import(Language::Python, ".models", &context));
        assert!(!is_external_import(Language::Python, "app.models.user", &context));
        assert!(is_external_import(Language::Python, "requests.adapters", &context));
    }

    #[test]
    fn test_package_from_source_root() {
        let roots = ["src/main/java/", "src/test/java/", "src/", "java/"];
        assert_eq!(
            package_from_source_root("app/src/test/java/com/acme/AppTest.java", &roots).as_deref(),
            Some("com.acme")
        );
        assert_eq!(
            package_from_source_root("src\\org\\demo\\Main.java", &roots).as_deref(),
            Some("org.demo")
        );
        assert_eq!(package_from_source_root("src/main/java/Main.java", &roots), None);
        assert_eq!(package_from_source_root("Main.java", &roots), None);
    }

    #[test]
    fn test_swift_frameworks() {
        let context = ImportContext::default();
        assert!(is_external_import(Language::Swift, "UIKit", &context));
        assert!(is_external_import(Language::Swift, "Foundation.NSString", &context));
        assert!(!is_external_import(Language::Swift, "MyAppCore", &context));
    }

    #[test]
    fn test_include_classification() {
        assert!(!is_external_include("vector", true));
        assert!(!is_external_include("stdio.h", true));
        assert!(is_external_include("boost/asio.hpp", true));
        assert!(is_external_include("sys/socket.h", true));
        assert!(!is_external_include("widget.hpp", false));
        assert!(is_external_include("third_party/lib.h", false));
        assert!(is_apple_framework_header("Foundation/Foundation.h"));
        assert!(!is_apple_framework_header("MyView.h"));
    }

    #[test]
    fn test_c_angle_includes_are_internal() {
        assert!(!is_external_c_include("sys/socket.h", true));
        assert!(!is_external_c_include("curl/curl.h", true));
        assert!(!is_external_c_include("stdio.h", true));
    }

    #[test]
    fn test_c_quoted_includes() {
        assert!(!is_external_c_include("stdio.h", false));
        assert!(!is_external_c_include("list.h", false));
        assert!(is_external_c_include("sys/queue.h", false));
        assert!(is_external_c_include("unistd.h", false));
        assert!(is_external_c_include("vendor/zlib.h", false));
        assert!(is_external_c_include("config.inc", false));
        // C++ standard names carry no special meaning in C
        assert!(is_external_c_include("vector", false));

        let context = ImportContext::default();
        assert!(is_external_import(Language::C, "sys/socket.h", &context));
        assert!(!is_external_import(Language::C, "list.h", &context));
    }
}
