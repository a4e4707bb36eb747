//! Inspections run through `Analysis::diagnostics`.

use crate::helpers::host_helpers::*;
use rstest::rstest;
use tact::hir::codes;
use tact::ide::AnalysisHost;
use tact::{AnalysisConfig, FileUri};

fn codes_in(host: &AnalysisHost, path: &str, code: &str) -> Vec<String> {
    let file = host.file(&uri(path)).unwrap();
    host.analysis()
        .diagnostics(&uri(path))
        .unwrap()
        .into_iter()
        .filter(|d| d.code.as_deref() == Some(code))
        .map(|d| file.text()[std::ops::Range::<usize>::from(d.range)].to_string())
        .collect()
}

#[test]
fn test_unused_variable_reported_once_at_declaration() {
    let host = host_with(&[("/p/a.tact", "fun f() { let unused = 1; let used = 2; dump(used); }")]);
    assert_eq!(codes_in(&host, "/p/a.tact", codes::UNUSED_VARIABLE), ["unused"]);
}

#[rstest]
#[case("struct S { a: Int; }\nfun f(s: S): Int { let S { a } = s; return a; }")]
#[case("struct S { a: Int; }\nfun f(): Int { let v = S { a: 1 }; let S { a: n } = v; return n; }")]
#[case("fun f(): Int { let x = 1; if (x > 0) { return x; } return 0; }")]
fn test_referenced_variables_are_not_unused(#[case] source: &str) {
    let host = host_with(&[("/p/a.tact", source)]);
    assert!(codes_in(&host, "/p/a.tact", codes::UNUSED_VARIABLE).is_empty());
}

#[test]
fn test_disabled_inspection_is_skipped() {
    let config = AnalysisConfig::default().with_disabled_inspection(codes::UNUSED_VARIABLE);
    let mut host = AnalysisHost::with_config(config);
    host.open_or_update(&FileUri::new("/p/a.tact"), "fun f() { let unused = 1; }");
    assert!(codes_in(&host, "/p/a.tact", codes::UNUSED_VARIABLE).is_empty());
}

#[test]
fn test_syntax_errors_are_reported() {
    let host = host_with(&[("/p/a.tact", "fun f( {")]);
    let diagnostics = host.analysis().diagnostics(&uri("/p/a.tact")).unwrap();
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code.as_deref() == Some(codes::PARSER_ERROR))
    );
}

#[test]
fn test_not_imported_symbol_is_flagged() {
    let host = host_with(&[
        ("/p/a.tact", "fun f(p: Point) {}"),
        ("/p/types.tact", "struct Point { x: Int; }"),
    ]);
    assert_eq!(
        codes_in(&host, "/p/a.tact", codes::NOT_IMPORTED_SYMBOL),
        ["Point"]
    );
}
