//! Memoization and index consistency across edits.

use crate::helpers::host_helpers::*;
use tact::Position;
use tact::hir::Decl;

#[test]
fn test_repeated_resolution_is_memoized() {
    let source = "fun helper() {}\nfun f() { helper(); }";
    let host = host_with(&[("/p/a.tact", source)]);
    let db = host.analysis().db();
    let call = node_at(&host, "/p/a.tact", "helper", 2);

    let first = db.resolve(&call).unwrap();
    let before = host.cache_stats();
    let second = db.resolve(&call).unwrap();
    let after = host.cache_stats();

    assert_eq!(first.node(), second.node());
    assert_eq!(after.misses, before.misses);
    assert_eq!(after.hits, before.hits + 1);
}

#[test]
fn test_edit_is_seen_by_dependent_files() {
    let main = "import \"./lib\";\nfun f() { helper(); }";
    let mut host = host_with(&[("/p/lib.tact", "fun helper() {}"), ("/p/main.tact", main)]);
    {
        let db = host.analysis().db();
        assert!(db.resolve(&node_at(&host, "/p/main.tact", "helper", 1)).is_some());
    }

    host.open_or_update(&uri("/p/lib.tact"), "fun renamed() {}");
    let db = host.analysis().db();
    assert!(db.resolve(&node_at(&host, "/p/main.tact", "helper", 1)).is_none());
}

#[test]
fn test_removed_declaration_leaves_no_stale_entries() {
    let mut host = host_with(&[
        ("/p/x.tact", "fun foo() {}\ntrait T {}"),
        ("/p/y.tact", "fun foo() {}"),
        ("/p/z.tact", "import \"./x\";\ncontract C with T {}"),
    ]);
    assert!(host.index().has_several_declarations("foo"));

    let z = "import \"./x\";\ncontract C with T {}";
    let trait_pos = position_of(z, "T", 1);
    let before = host.analysis().implementations(&uri("/p/z.tact"), trait_pos).unwrap();
    assert_eq!(before.targets.len(), 1);

    host.open_or_update(&uri("/p/x.tact"), "trait T {}");
    assert!(!host.index().has_several_declarations("foo"));
    assert!(host.index().has_declaration("foo"));

    host.open_or_update(&uri("/p/z.tact"), "import \"./x\";\ncontract C {}");
    let x_pos = Position::new(0, 6);
    let after = host.analysis().implementations(&uri("/p/x.tact"), x_pos).unwrap();
    assert!(after.is_empty());
}

#[test]
fn test_closing_a_file_drops_its_declarations() {
    let mut host = host_with(&[("/p/a.tact", "struct Gone {}"), ("/p/b.tact", "fun f(g: Gone) {}")]);
    let gone = host
        .analysis()
        .db()
        .resolve(&node_at(&host, "/p/b.tact", "Gone", 1));
    assert_eq!(gone.unwrap().name(), "Gone");

    host.close(&uri("/p/a.tact"));
    let db = host.analysis().db();
    assert!(db.resolve(&node_at(&host, "/p/b.tact", "Gone", 1)).is_none());
}
