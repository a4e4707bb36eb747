//! Parsing whole programs through the public parser entry point.

use std::sync::Arc;

use rstest::rstest;
use tact::TextSize;
use tact::parser::{SyntaxKind, parse};
use tact::syntax::{Generation, SyntaxTree};

fn tree(source: &str) -> (SyntaxTree, usize) {
    let parsed = parse(source);
    let errors = parsed.errors.len();
    (
        SyntaxTree::new(Generation(1), Arc::from(source), parsed.tree),
        errors,
    )
}

fn sexp(source: &str) -> String {
    let (tree, errors) = tree(source);
    assert_eq!(errors, 0, "unexpected errors in {source:?}");
    tree.root().to_sexp()
}

// =============================================================================
// VALID PROGRAMS
// =============================================================================

#[rstest]
#[case("import \"@stdlib/deploy\";", "stdlib import")]
#[case("primitive Int;", "primitive")]
#[case("struct Point { x: Int; y: Int as uint8 = 0; }", "struct with default")]
#[case("message(0x7362d09c) Transfer { amount: Int as coins; to: Address?; }", "message with opcode")]
#[case("const MAX: Int = 10;", "global constant")]
#[case("fun add(a: Int, b: Int): Int { return a + b; }", "global function")]
#[case("extends mutates fun inc(self: Int) { self += 1; }", "extension function")]
#[case("@name(store_uint) native storeUint(self: Builder, v: Int, bits: Int): Builder;", "native function")]
#[case("asm fun cellHash(c: Cell): Int { HASHCU }", "asm function")]
#[case("trait Ownable { owner: Address; abstract fun check(); virtual const FEE: Int = 1; }", "trait members")]
#[case("contract Counter with Ownable { value: Int = 0; owner: Address; init(o: Address) { self.owner = o; } receive(\"inc\") { self.value += 1; } get fun value(): Int { return self.value; } }", "contract members")]
#[case("contract Wallet(owner: Address, seqno: Int) {}", "contract parameters")]
fn test_items_parse_cleanly(#[case] source: &str, #[case] desc: &str) {
    let (_, errors) = tree(source);
    assert_eq!(errors, 0, "{desc}: {source}");
}

#[rstest]
#[case("let x: Int = 1;")]
#[case("let P { x, y: other, .. } = p;")]
#[case("if (a > 1) { return; } else if (a < 0) { a = 0; } else { a -= 1; }")]
#[case("while (i < 10) { i += 1; }")]
#[case("repeat (3) { dump(i); }")]
#[case("do { i -= 1; } until (i == 0);")]
#[case("foreach (key, value in m) { sum += value; }")]
#[case("try { risky(); } catch (e) { dump(e); }")]
#[case("let s = P { x: 1, y }; let r = s.x!! + m.get(1)!!;")]
#[case("let st = initOf Counter(sender());")]
fn test_statements_parse_cleanly(#[case] statements: &str) {
    let source = format!("fun f(p: P, m: map<Int, Int>, a: Int, i: Int, sum: Int) {{ {statements} }}");
    let (_, errors) = tree(&source);
    assert_eq!(errors, 0, "{source}");
}

// =============================================================================
// TREE SHAPE
// =============================================================================

#[test]
fn test_import_path_is_library_field() {
    assert_eq!(
        sexp("import \"./utils\";"),
        "(source_file (import library: (string)))"
    );
}

#[test]
fn test_struct_fields_are_named() {
    let sexp = sexp("struct Point { x: Int; }");
    assert!(sexp.starts_with("(source_file (struct name: (type_identifier)"), "{sexp}");
    assert!(sexp.contains("(field name: (identifier)"), "{sexp}");
}

#[test]
fn test_trait_list_holds_type_identifiers() {
    let sexp = sexp("contract C with A, B {}");
    assert!(
        sexp.contains("traits: (trait_list (type_identifier) (type_identifier))"),
        "{sexp}"
    );
}

#[test]
fn test_comments_are_kept_as_leaves() {
    let (tree, _) = tree("/// Adds.\nfun f() {}");
    let first = tree.root().children().next().unwrap();
    assert_eq!(first.kind(), SyntaxKind::COMMENT);
    assert_eq!(first.text(), "/// Adds.");
}

#[rstest]
#[case("// SPDX-License-Identifier: MIT\nfun f() {}")]
#[case("/* header\n * spanning lines */\nfun f() {}")]
#[case("/// Doc.\n\n// another\nfun f() {}")]
fn test_leading_comments_stay_inside_the_root(#[case] source: &str) {
    let (tree, errors) = tree(source);
    assert_eq!(errors, 0);
    let root = tree.root();
    assert_eq!(root.kind(), SyntaxKind::SOURCE_FILE);
    assert_eq!(u32::from(root.text_range().start()), 0);
    assert_eq!(usize::from(root.text_range().end()), source.len());
    let sexp = root.to_sexp();
    assert!(sexp.starts_with("(source_file (global_function name: (identifier)"), "{sexp}");
    assert_eq!(root.named_children().count(), 1);
}

#[test]
fn test_block_comment_inside_body_is_not_an_error() {
    let source = "fun g(): Int { /* note */ return 1; }";
    let (tree, errors) = tree(source);
    assert_eq!(errors, 0);
    assert!(
        tree.root()
            .to_sexp()
            .contains("(return_statement"),
        "{}",
        tree.root().to_sexp()
    );
}

// =============================================================================
// ERROR RECOVERY
// =============================================================================

#[test]
fn test_parsing_never_fails() {
    let source = "contract C { fun f( { let = ; } }\nfun g() {}";
    let (tree, errors) = tree(source);
    assert!(errors > 0);
    // the item after the broken contract is still recovered
    let sexp = tree.root().to_sexp();
    assert!(sexp.contains("global_function"), "{sexp}");
    assert_eq!(
        usize::from(tree.root().text_range().end()),
        source.len()
    );
}

#[test]
fn test_leaf_at_offset_prefers_names() {
    let (tree, _) = tree("fun foo() {}");
    // right after `foo`, before `(`
    let leaf = tree.leaf_at_offset(TextSize::new(7)).unwrap();
    assert_eq!(leaf.text(), "foo");
}
