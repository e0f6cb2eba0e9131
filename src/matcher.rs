//! Cross-Reference Matcher - links declarations to their definitions
//!
//! Runs after extraction as a sequential pass over header/implementation
//! pairs. The only mutation is appending dependencies to the definition file.
//! Unmatched symbols on either side are expected (template instantiations,
//! platform-specific overloads) and never reported.

use crate::extractors::base::{DependencyKind, ParsedDependency, ParsedFile, ParsedSymbol, SymbolKind};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hh", "hxx"];

/// Checked in this order; the first existing sibling wins
const IMPLEMENTATION_EXTENSIONS: &[&str] = &["c", "cpp", "cc", "cxx", "m", "mm"];

/// Symbol kinds that own members, so their name qualifies member names
const SCOPE_KINDS: &[SymbolKind] = &[
    SymbolKind::Class,
    SymbolKind::ClassTemplate,
    SymbolKind::Struct,
    SymbolKind::Union,
    SymbolKind::Interface,
    SymbolKind::Protocol,
    SymbolKind::Category,
    SymbolKind::Implementation,
];

/// A declaration-side candidate with the scopes that enclose it
struct Declaration<'a> {
    symbol: &'a ParsedSymbol,
    /// Enclosing namespace and type names joined with `::`
    scope: String,
    /// Innermost enclosing type, if the declaration is a member
    owner: Option<&'a str>,
}

impl Declaration<'_> {
    fn rendered(&self) -> String {
        match self.owner {
            Some(owner) => format!("{}::{}", owner, self.symbol.name),
            None => self.symbol.name.clone(),
        }
    }

    /// `Widget` matches scope `gfx::Widget`, and so does `gfx::Widget`
    fn in_scope(&self, qualifier: &str) -> bool {
        self.owner.is_some()
            && (self.scope == qualifier || self.scope.ends_with(&format!("::{}", qualifier)))
    }
}

/// A definition-side symbol split into qualifier and member name
struct Definition<'a> {
    symbol: &'a ParsedSymbol,
    qualifier: Option<String>,
    name: String,
}

impl Definition<'_> {
    fn rendered(&self) -> String {
        match &self.qualifier {
            Some(qualifier) if !self.symbol.name.contains("::") => {
                format!("{}::{}", qualifier, self.symbol.name)
            }
            _ => self.symbol.name.clone(),
        }
    }
}

/// Link `def` (implementation unit) to `decl` (header).
///
/// Appends one `implements_header` edge for the file pair and one
/// `implements_declaration` edge per matched definition. Edges already present
/// are not added twice. Returns the number of declaration links recorded.
pub fn match_files(decl: &ParsedFile, def: &mut ParsedFile) -> usize {
    let mut edges = vec![ParsedDependency::new(
        DependencyKind::ImplementsHeader,
        def.path.as_str(),
        decl.path.as_str(),
    )];

    let declarations = collect_declarations(&decl.symbols);
    let mut used = vec![false; declarations.len()];

    let mut definitions = Vec::new();
    collect_definitions(&def.symbols, None, &mut definitions);

    for definition in &definitions {
        let Some(index) = find_declaration(&declarations, &used, definition) else {
            debug!(
                "{}: no declaration for {} in {}",
                def.path,
                definition.rendered(),
                decl.path
            );
            continue;
        };
        used[index] = true;
        edges.push(ParsedDependency::new(
            DependencyKind::ImplementsDeclaration,
            definition.rendered(),
            declarations[index].rendered(),
        ));
    }

    edges.extend(type_pairs(decl, def));

    let mut added = 0;
    for edge in edges {
        if def.dependencies.contains(&edge) {
            continue;
        }
        if edge.kind == DependencyKind::ImplementsDeclaration {
            added += 1;
        }
        def.dependencies.push(edge);
    }
    added
}

/// First unused declaration for `definition`, in declaration order
fn find_declaration(
    declarations: &[Declaration],
    used: &[bool],
    definition: &Definition,
) -> Option<usize> {
    let mut candidates = declarations.iter().enumerate().filter(|(index, candidate)| {
        !used[*index]
            && candidate.symbol.kind.is_declaration()
            && candidate.symbol.name == definition.name
    });

    match &definition.qualifier {
        Some(qualifier) => candidates
            .find(|(_, candidate)| candidate.in_scope(qualifier))
            .map(|(index, _)| index),
        // Free functions first, then any member with the same name
        None => {
            let first = candidates.clone().next().map(|(index, _)| index);
            candidates
                .find(|(_, candidate)| candidate.owner.is_none())
                .map(|(index, _)| index)
                .or(first)
        }
    }
}

/// Objective-C `@implementation X` pairs with `@interface X` (or a category of that name)
fn type_pairs(decl: &ParsedFile, def: &ParsedFile) -> Vec<ParsedDependency> {
    let interfaces: HashSet<&str> = decl
        .symbols
        .iter()
        .filter(|s| matches!(s.kind, SymbolKind::Interface | SymbolKind::Category))
        .map(|s| s.name.as_str())
        .collect();
    def.symbols
        .iter()
        .filter(|s| s.kind == SymbolKind::Implementation && interfaces.contains(s.name.as_str()))
        .map(|s| ParsedDependency::new(DependencyKind::ImplementsDeclaration, s.name.as_str(), s.name.as_str()))
        .collect()
}

fn collect_declarations(symbols: &[ParsedSymbol]) -> Vec<Declaration<'_>> {
    fn walk<'a>(
        symbols: &'a [ParsedSymbol],
        scope: &str,
        owner: Option<&'a str>,
        out: &mut Vec<Declaration<'a>>,
    ) {
        for symbol in symbols {
            out.push(Declaration {
                symbol,
                scope: scope.to_string(),
                owner,
            });
            if symbol.children.is_empty() {
                continue;
            }
            let nested = if scope.is_empty() {
                symbol.name.clone()
            } else {
                format!("{}::{}", scope, symbol.name)
            };
            let nested_owner = SCOPE_KINDS
                .contains(&symbol.kind)
                .then_some(symbol.name.as_str());
            walk(&symbol.children, &nested, nested_owner, out);
        }
    }
    let mut out = Vec::new();
    walk(symbols, "", None, &mut out);
    out
}

/// Definition-kind symbols at any depth. A qualified name (`Widget::draw`)
/// carries its own qualifier; otherwise an enclosing type supplies one.
fn collect_definitions<'a>(
    symbols: &'a [ParsedSymbol],
    owner: Option<&'a str>,
    out: &mut Vec<Definition<'a>>,
) {
    for symbol in symbols {
        if symbol.kind.is_definition() {
            let (qualifier, name) = match symbol.name.rsplit_once("::") {
                Some((qualifier, name)) => (Some(qualifier.to_string()), name.to_string()),
                None => (owner.map(str::to_string), symbol.name.clone()),
            };
            out.push(Definition {
                symbol,
                qualifier,
                name,
            });
        }
        let nested_owner = if SCOPE_KINDS.contains(&symbol.kind) {
            Some(symbol.name.as_str())
        } else {
            owner
        };
        collect_definitions(&symbol.children, nested_owner, out);
    }
}

fn is_header(path: &str) -> bool {
    extension_of(path).is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext.as_str()))
}

fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// `(header, implementation)` index pairs: same directory and basename,
/// C-family languages only
pub fn find_header_impl_pairs(files: &[ParsedFile]) -> Vec<(usize, usize)> {
    let by_path: HashMap<&str, usize> = files
        .iter()
        .enumerate()
        .map(|(index, file)| (file.path.as_str(), index))
        .collect();

    files
        .iter()
        .enumerate()
        .filter(|(_, file)| file.language.uses_headers() && is_header(&file.path))
        .filter_map(|(header, file)| {
            IMPLEMENTATION_EXTENSIONS.iter().find_map(|ext| {
                let candidate = Path::new(&file.path).with_extension(ext);
                let candidate = candidate.to_string_lossy();
                by_path
                    .get(candidate.as_ref())
                    .filter(|&&index| files[index].language.uses_headers())
                    .map(|&implementation| (header, implementation))
            })
        })
        .collect()
}

/// Pair headers with implementation files and match every pair.
/// Returns the total number of declaration links recorded.
pub fn associate(files: &mut [ParsedFile]) -> usize {
    let pairs = find_header_impl_pairs(files);
    info!("associating {} header/implementation pairs", pairs.len());

    let mut linked = 0;
    for (header, implementation) in pairs {
        let Some((decl, def)) = pair_mut(files, header, implementation) else {
            continue;
        };
        linked += match_files(decl, def);
    }
    info!("recorded {} declaration links", linked);
    linked
}

/// Shared reference to `files[a]` alongside a mutable one to `files[b]`
fn pair_mut(files: &mut [ParsedFile], a: usize, b: usize) -> Option<(&ParsedFile, &mut ParsedFile)> {
    if a == b || a >= files.len() || b >= files.len() {
        return None;
    }
    if a < b {
        let (left, right) = files.split_at_mut(b);
        Some((&left[a], &mut right[0]))
    } else {
        let (left, right) = files.split_at_mut(a);
        Some((&right[0], &mut left[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::factory::extract_source;
    use crate::language::Language;

    fn parse(path: &str, language: Language, source: &str) -> ParsedFile {
        let (file, error) = extract_source(path, path, language, source.to_string());
        assert!(error.is_none(), "{}: {:?}", path, error);
        file
    }

    fn links(file: &ParsedFile) -> Vec<(&str, &str)> {
        file.dependencies_of(DependencyKind::ImplementsDeclaration)
            .map(|d| (d.source.as_str(), d.target.as_str()))
            .collect()
    }

    #[test]
    fn test_out_of_line_member_definition() {
        let header = parse(
            "src/widget.hpp",
            Language::Cpp,
            "class Widget {\n public:\n  void draw() const;\n};\n",
        );
        let mut source = parse(
            "src/widget.cpp",
            Language::Cpp,
            "#include \"widget.hpp\"\n\nvoid Widget::draw() const {\n}\n",
        );

        assert_eq!(match_files(&header, &mut source), 1);
        assert_eq!(links(&source), vec![("Widget::draw", "Widget::draw")]);
        let headers: Vec<_> = source
            .dependencies_of(DependencyKind::ImplementsHeader)
            .map(|d| (d.source.as_str(), d.target.as_str()))
            .collect();
        assert_eq!(headers, vec![("src/widget.cpp", "src/widget.hpp")]);
    }

    #[test]
    fn test_namespaced_members_and_overloads() {
        let header = parse(
            "gfx/canvas.hpp",
            Language::Cpp,
            r#"namespace gfx {
class Canvas {
 public:
  Canvas();
  void set(int value);
  void set(double value);
  void clear();
};
}
"#,
        );
        let mut source = parse(
            "gfx/canvas.cpp",
            Language::Cpp,
            r#"namespace gfx {
Canvas::Canvas() {}
void Canvas::set(int value) {}
void Canvas::set(double value) {}
void Canvas::resize() {}
}
"#,
        );

        assert_eq!(match_files(&header, &mut source), 3);
        assert_eq!(
            links(&source),
            vec![
                ("Canvas::Canvas", "Canvas::Canvas"),
                ("Canvas::set", "Canvas::set"),
                ("Canvas::set", "Canvas::set"),
            ]
        );
    }

    #[test]
    fn test_free_functions() {
        let header = parse(
            "include/list.h",
            Language::C,
            "int list_push(int value);\nint list_pop(void);\n",
        );
        let mut source = parse(
            "include/list.c",
            Language::C,
            "static int grow(void) { return 0; }\nint list_push(int value) { return grow(); }\n",
        );

        match_files(&header, &mut source);
        assert_eq!(links(&source), vec![("list_push", "list_push")]);
    }

    #[test]
    fn test_objc_interface_and_implementation() {
        let header = parse(
            "Sources/Person.h",
            Language::ObjC,
            "@interface Person : NSObject\n- (void)greet;\n- (void)walkTo:(int)x y:(int)y;\n@end\n",
        );
        let mut source = parse(
            "Sources/Person.m",
            Language::ObjC,
            "#import \"Person.h\"\n@implementation Person\n- (void)greet {\n}\n- (void)walkTo:(int)x y:(int)y {\n}\n@end\n",
        );

        assert_eq!(match_files(&header, &mut source), 3);
        assert_eq!(
            links(&source),
            vec![
                ("Person::greet", "Person::greet"),
                ("Person::walkTo:y:", "Person::walkTo:y:"),
                ("Person", "Person"),
            ]
        );
    }

    #[test]
    fn test_matching_twice_adds_nothing() {
        let header = parse("a.h", Language::C, "void run(void);\n");
        let mut source = parse("a.c", Language::C, "void run(void) {}\n");
        assert_eq!(match_files(&header, &mut source), 1);
        let count = source.dependencies.len();
        assert_eq!(match_files(&header, &mut source), 0);
        assert_eq!(source.dependencies.len(), count);
    }

    #[test]
    fn test_find_header_impl_pairs() {
        let files = vec![
            ParsedFile::empty("src/a.h", Language::C),
            ParsedFile::empty("src/a.m", Language::ObjC),
            ParsedFile::empty("src/a.c", Language::C),
            ParsedFile::empty("src/b.HPP", Language::Cpp),
            ParsedFile::empty("src/b.cc", Language::Cpp),
            ParsedFile::empty("lib/c.h", Language::C),
            ParsedFile::empty("src/c.c", Language::C),
            ParsedFile::empty("tools/gen.h", Language::Python),
            ParsedFile::empty("tools/gen.c", Language::C),
        ];
        assert_eq!(find_header_impl_pairs(&files), vec![(0, 2), (3, 4)]);
    }

    #[test]
    fn test_associate_links_every_pair() {
        let mut files = vec![
            parse("src/shape.c", Language::C, "int area(int w) { return w; }\n"),
            parse("src/shape.h", Language::C, "int area(int w);\n"),
            parse("src/util.h", Language::C, "void noop(void);\n"),
        ];
        assert_eq!(associate(&mut files), 1);
        assert_eq!(links(&files[0]), vec![("area", "area")]);
        assert!(files[1].dependencies.is_empty());
    }

    #[test]
    fn test_pair_mut_rejects_same_index() {
        let mut files = vec![ParsedFile::empty("a.h", Language::C)];
        assert!(pair_mut(&mut files, 0, 0).is_none());
        assert!(pair_mut(&mut files, 0, 1).is_none());
    }
}
