//! Name resolution through the public host API.

use crate::helpers::host_helpers::*;
use rstest::rstest;
use tact::hir::{Decl, Declaration};
use tact::syntax::DeclKind;

// =============================================================================
// LOCAL SCOPES
// =============================================================================

#[test]
fn test_nested_block_shadows_outer_variable() {
    let source = "fun f() { let x = 1; if (true) { let x = 2; x; } x; }";
    let host = host_with(&[("/p/a.tact", source)]);
    let db = host.analysis().db();

    let outer = node_at(&host, "/p/a.tact", "x", 1);
    let inner = node_at(&host, "/p/a.tact", "x", 2);

    let inside = db.resolve(&node_at(&host, "/p/a.tact", "x", 3)).unwrap();
    assert_eq!(inside.node(), &inner);

    let after = db.resolve(&node_at(&host, "/p/a.tact", "x", 4)).unwrap();
    assert_eq!(after.node(), &outer);
}

#[test]
fn test_catch_binding_is_visible_in_handler_only() {
    let source = "fun f() { try { } catch (err) { err; } err; }";
    let host = host_with(&[("/p/a.tact", source)]);
    let db = host.analysis().db();
    assert!(db.resolve(&node_at(&host, "/p/a.tact", "err", 2)).is_some());
    assert!(db.resolve(&node_at(&host, "/p/a.tact", "err", 3)).is_none());
}

// =============================================================================
// INHERITANCE
// =============================================================================

#[test]
fn test_method_inherited_through_two_traits() {
    let source = "trait A { fun f() {} }\n\
                  trait B with A {}\n\
                  contract C with B { fun g() { self.f(); } }";
    let host = host_with(&[("/p/a.tact", source)]);
    let db = host.analysis().db();

    let decl = db.resolve(&node_at(&host, "/p/a.tact", "f", 2)).unwrap();
    assert!(matches!(decl, Declaration::Function(_)));
    assert_eq!(decl.owner().unwrap().name(), "A");
}

#[test]
fn test_first_listed_trait_wins_for_conflicting_members() {
    let source = "trait A { fun f() {} }\n\
                  trait B { fun f() {} }\n\
                  contract C with B, A { fun g() { self.f(); } }";
    let host = host_with(&[("/p/a.tact", source)]);
    let db = host.analysis().db();

    let decl = db.resolve(&node_at(&host, "/p/a.tact", "f", 3)).unwrap();
    assert_eq!(decl.owner().unwrap().name(), "B");
}

#[test]
fn test_own_member_beats_inherited_one() {
    let source = "trait A { virtual fun f() {} }\n\
                  contract C with A { override fun f() {} fun g() { self.f(); } }";
    let host = host_with(&[("/p/a.tact", source)]);
    let db = host.analysis().db();

    let decl = db.resolve(&node_at(&host, "/p/a.tact", "f", 3)).unwrap();
    assert_eq!(decl.owner().unwrap().name(), "C");
}

// =============================================================================
// CROSS-FILE
// =============================================================================

#[rstest]
#[case("import \"./lib\";\nfun f() { helper(); }")]
#[case("import \"./lib.tact\";\nfun f() { helper(); }")]
fn test_imported_function_resolves(#[case] main: &str) {
    let host = host_with(&[("/p/main.tact", main), ("/p/lib.tact", "fun helper() {}")]);
    let db = host.analysis().db();
    let decl = db.resolve(&node_at(&host, "/p/main.tact", "helper", 1)).unwrap();
    assert_eq!(decl.kind(), DeclKind::Function);
    assert_eq!(decl.node().file().uri().as_str(), "/p/lib.tact");
}

#[test]
fn test_struct_type_reference_resolves_across_files() {
    let host = host_with(&[
        ("/p/types.tact", "struct Point { x: Int; }"),
        ("/p/main.tact", "import \"./types\";\nfun f(p: Point): Int { return p.x; }"),
    ]);
    let db = host.analysis().db();
    let ty = db.resolve(&node_at(&host, "/p/main.tact", "Point", 1)).unwrap();
    assert!(matches!(ty, Declaration::MessageType(_)));
    let field = db.resolve(&node_at(&host, "/p/main.tact", "x", 1)).unwrap();
    assert!(matches!(field, Declaration::Field(_)));
}

#[test]
fn test_file_with_license_header_is_indexed_and_resolves() {
    let lib = "// SPDX-License-Identifier: MIT\n/* Helpers. */\nfun helper() {}";
    let main = "import \"./lib\";\nfun f() {\n    helper();\n}";
    let host = host_with(&[("/p/lib.tact", lib), ("/p/main.tact", main)]);

    assert!(host.index().has_declaration("helper"));
    let db = host.analysis().db();
    let decl = db.resolve(&node_at(&host, "/p/main.tact", "helper", 1)).unwrap();
    assert_eq!(decl.node().file().uri().as_str(), "/p/lib.tact");

    let targets = host
        .analysis()
        .goto_definition(&uri("/p/main.tact"), position_of(main, "helper", 1))
        .unwrap()
        .targets;
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].uri, uri("/p/lib.tact"));
}
