//! Type inference through the public host API.

use crate::helpers::host_helpers::*;
use rstest::rstest;
use tact::hir::Ty;

fn infer_at(source: &str, word: &str, nth: usize) -> Ty {
    let host = host_with(&[("/p/a.tact", source)]);
    let node = node_at(&host, "/p/a.tact", word, nth);
    host.analysis().db().infer(&node)
}

#[test]
fn test_unknown_propagates_from_unresolved_call() {
    let source = "fun f() { let x = missing(); let y = x.field; let z = y + 1; x; y; z; }";
    assert!(infer_at(source, "x", 3).is_unknown());
    assert!(infer_at(source, "y", 3).is_unknown());
    assert!(infer_at(source, "z", 2).is_unknown());
}

#[rstest]
#[case("let v = 42;", "Int")]
#[case("let v = true;", "Bool")]
#[case("let v = \"text\";", "String")]
#[case("let v = 1 == 2;", "Bool")]
#[case("let v: Int as uint32 = 7;", "Int as uint32")]
fn test_let_types(#[case] statement: &str, #[case] expected: &str) {
    let source = format!("fun f() {{ {statement} v; }}");
    assert_eq!(infer_at(&source, "v", 2).to_string(), expected);
}

#[test]
fn test_field_access_through_struct_chain() {
    let source = "struct Inner { flag: Bool; }\n\
                  struct Outer { inner: Inner; }\n\
                  fun f(o: Outer) { let b = o.inner.flag; b; }";
    assert_eq!(infer_at(source, "b", 2), Ty::bool());
}

#[test]
fn test_contract_field_via_self() {
    let source = "contract C { owner: Address; fun f() { let o = self.owner; o; } }";
    assert_eq!(infer_at(source, "o", 2), Ty::primitive("Address"));
}

#[test]
fn test_optional_is_never_nested() {
    assert_eq!(Ty::option(Ty::option(Ty::int())), Ty::option(Ty::int()));
    assert!(Ty::option(Ty::Unknown).is_unknown());
}
