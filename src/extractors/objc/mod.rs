//! Objective-C Extractor
//!
//! Handles:
//! - `#import`/`#include` (Apple framework headers are external)
//! - `@interface` with properties and methods (headers), `@implementation` with
//!   method implementations (implementation files)
//! - Categories (`Class(Category)`) and protocols in either kind of file
//! - Superclass (`extends`), adopted protocols (`conforms`) and
//!   `implements_header` from an implementation to its interface
//! - Message sends and C calls as call relationships
//!
//! Method names are full selectors: `initWithName:age:`, `greet`.

mod declarations;
mod members;
mod relationships;

use crate::extractors::base::tree_methods::children;
use crate::extractors::base::{run_step, BaseExtractor, ExtractionResults};
use crate::language::Language;
use tree_sitter::{Node, Tree};

pub struct ObjCExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> ObjCExtractor<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(Language::ObjC, file_path, content),
        }
    }

    pub fn extract(&self, tree: &Tree) -> ExtractionResults {
        let root = tree.root_node();
        let path = self.base.file_path;
        let mut results = ExtractionResults::default();

        run_step(path, "imports", || {
            self.extract_imports(root, &mut results.dependencies)
        });
        run_step(path, "declarations", || {
            self.extract_declarations(root, &mut results)
        });
        run_step(path, "calls", || {
            self.extract_calls(root, &results.symbols, &mut results.dependencies)
        });

        results
    }
}

/// File-scope nodes of `kinds`, looking through `#if` blocks and ERROR wrappers
fn top_level<'t>(root: &Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    for child in children(root) {
        if kinds.contains(&child.kind()) {
            found.push(child);
        } else if child.is_error()
            || matches!(child.kind(), "preproc_if" | "preproc_ifdef" | "preproc_else")
        {
            found.extend(top_level(&child, kinds));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{DependencyKind, ParsedSymbol, SymbolKind};
    use crate::syntax;

    fn extract(path: &str, source: &str) -> ExtractionResults {
        let tree = syntax::parse(source, Language::ObjC).tree.unwrap();
        ObjCExtractor::new(path, source).extract(&tree)
    }

    fn edges(results: &ExtractionResults, kind: DependencyKind) -> Vec<(&str, &str)> {
        results
            .dependencies
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| (d.source.as_str(), d.target.as_str()))
            .collect()
    }

    fn names(symbol: &ParsedSymbol) -> Vec<(&str, SymbolKind)> {
        symbol
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.kind))
            .collect()
    }

    const HEADER: &str = r#"#import <Foundation/Foundation.h>
#import "Animal.h"

/** A person. */
@interface Person : NSObject <NSCoding, NSCopying>
@property (nonatomic, strong) NSString *name;
@property (nonatomic) NSInteger age;
- (instancetype)initWithName:(NSString *)name age:(NSInteger)age;
- (void)greet;
@end

@interface Person (Greeting)
- (NSString *)greeting;
@end

@protocol Walker <NSObject>
- (void)walk;
@end
"#;

    #[test]
    fn test_imports() {
        let results = extract("Sources/Person.h", HEADER);
        let imports: Vec<(&str, bool)> = results
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Import)
            .map(|d| (d.target.as_str(), d.is_external))
            .collect();
        assert_eq!(
            imports,
            vec![("Foundation/Foundation.h", true), ("Animal.h", false)]
        );
    }

    #[test]
    fn test_interface_category_and_protocol() {
        let results = extract("Sources/Person.h", HEADER);
        let top: Vec<(&str, SymbolKind)> = results
            .symbols
            .iter()
            .map(|s| (s.name.as_str(), s.kind))
            .collect();
        assert_eq!(
            top,
            vec![
                ("Person", SymbolKind::Interface),
                ("Person(Greeting)", SymbolKind::Category),
                ("Walker", SymbolKind::Protocol),
            ]
        );

        let person = &results.symbols[0];
        assert_eq!(person.docstring.as_deref(), Some("A person."));
        assert_eq!(
            names(person),
            vec![
                ("name", SymbolKind::Property),
                ("age", SymbolKind::Property),
                ("initWithName:age:", SymbolKind::Method),
                ("greet", SymbolKind::Method),
            ]
        );
        assert_eq!(names(&results.symbols[1]), vec![("greeting", SymbolKind::Method)]);
        assert_eq!(names(&results.symbols[2]), vec![("walk", SymbolKind::Method)]);
    }

    #[test]
    fn test_superclass_and_protocols() {
        let results = extract("Sources/Person.h", HEADER);
        assert_eq!(
            edges(&results, DependencyKind::Extends),
            vec![("Person", "NSObject"), ("Person(Greeting)", "Person")]
        );
        assert_eq!(
            edges(&results, DependencyKind::Conforms),
            vec![("Person", "NSCoding"), ("Person", "NSCopying")]
        );
    }

    const SOURCE: &str = r#"#import "Person.h"

@implementation Person

- (instancetype)initWithName:(NSString *)name age:(NSInteger)age {
    self = [super init];
    if (self) {
        [self setName:name];
        [self.logger log:@"init" level:2];
    }
    return self;
}

- (void)greet {
    NSLog(@"Hi %@", [self greeting]);
}

@end
"#;

    #[test]
    fn test_implementation() {
        let results = extract("Sources/Person.m", SOURCE);
        assert_eq!(results.symbols.len(), 1);
        let person = &results.symbols[0];
        assert_eq!(person.kind, SymbolKind::Implementation);
        assert_eq!(
            names(person),
            vec![
                ("initWithName:age:", SymbolKind::MethodImplementation),
                ("greet", SymbolKind::MethodImplementation),
            ]
        );
        assert_eq!(
            person.children[1].signature,
            "- (void)greet"
        );
        assert_eq!(
            edges(&results, DependencyKind::ImplementsHeader),
            vec![("Person", "Person")]
        );
    }

    #[test]
    fn test_interfaces_only_come_from_headers() {
        let results = extract("Sources/Person.m", HEADER);
        assert!(results.symbols.iter().all(|s| s.kind != SymbolKind::Interface));
        let results = extract("Sources/Person.h", SOURCE);
        assert!(results.symbols.is_empty());
    }

    #[test]
    fn test_message_sends() {
        let results = extract("Sources/Person.m", SOURCE);
        let calls = edges(&results, DependencyKind::Call);
        assert!(calls.contains(&("initWithName:age:", "init")));
        assert!(calls.contains(&("initWithName:age:", "setName:")));
        assert!(calls.contains(&("initWithName:age:", "log:level:")));
        assert!(calls.contains(&("greet", "greeting")));
        assert!(calls.contains(&("greet", "NSLog")));
    }
}
