//! Symbol and file rename through the host.

use crate::helpers::host_helpers::*;
use tact::AnalysisError;
use tact::hir::Decl;
use tact::ide::apply_edits;

#[test]
fn test_file_rename_rewrites_importers_only() {
    let b = "import \"./a\";\nfun f() { helper(); }";
    let mut host = host_with(&[
        ("/p/a.tact", "fun helper() {}"),
        ("/p/b.tact", b),
        ("/p/c.tact", "fun unrelated() {}"),
    ]);

    let change = host.rename_file(&uri("/p/a.tact"), &uri("/p/a2.tact")).unwrap();

    assert_eq!(change.len(), 1);
    assert_eq!(
        apply_edits(b, change.edits_for(&uri("/p/b.tact"))),
        "import \"./a2\";\nfun f() { helper(); }"
    );
    assert!(change.edits_for(&uri("/p/c.tact")).is_empty());
}

#[test]
fn test_file_rename_then_apply_keeps_resolution() {
    let b = "import \"./a\";\nfun f() { helper(); }";
    let mut host = host_with(&[("/p/a.tact", "fun helper() {}"), ("/p/b.tact", b)]);

    let change = host.rename_file(&uri("/p/a.tact"), &uri("/p/lib/a.tact")).unwrap();
    let edited = apply_edits(b, change.edits_for(&uri("/p/b.tact")));
    assert_eq!(edited, "import \"./lib/a\";\nfun f() { helper(); }");
    host.open_or_update(&uri("/p/b.tact"), edited.as_str());

    let db = host.analysis().db();
    let decl = db.resolve(&node_at(&host, "/p/b.tact", "helper", 1)).unwrap();
    assert_eq!(decl.node().file().uri().as_str(), "/p/lib/a.tact");
}

#[test]
fn test_symbol_rename_across_files() {
    let a = "fun helper(): Int { return 1; }";
    let b = "import \"./a\";\nfun f(): Int { return helper() + helper(); }";
    let host = host_with(&[("/p/a.tact", a), ("/p/b.tact", b)]);

    let change = host
        .analysis()
        .rename_symbol(&uri("/p/b.tact"), position_of(b, "helper", 1), "compute")
        .unwrap();

    assert_eq!(
        apply_edits(a, change.edits_for(&uri("/p/a.tact"))),
        "fun compute(): Int { return 1; }"
    );
    assert_eq!(
        apply_edits(b, change.edits_for(&uri("/p/b.tact"))),
        "import \"./a\";\nfun f(): Int { return compute() + compute(); }"
    );
}

#[test]
fn test_symbol_rename_rejects_keywords() {
    let a = "fun helper() {}";
    let host = host_with(&[("/p/a.tact", a)]);
    let err = host
        .analysis()
        .rename_symbol(&uri("/p/a.tact"), position_of(a, "helper", 1), "contract")
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidIdentifier(name) if name == "contract"));
}
