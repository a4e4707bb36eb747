//! Hover, goto and references addressed by line/column.

use crate::helpers::host_helpers::*;
use tact::{AnalysisError, Position};

#[test]
fn test_hover_on_struct_reports_size() {
    let source = "struct Pair { a: Int as uint8; b: Bool; }\nfun f(p: Pair) {}";
    let host = host_with(&[("/p/a.tact", source)]);
    let hover = host
        .analysis()
        .hover(&uri("/p/a.tact"), position_of(source, "Pair", 2))
        .unwrap()
        .unwrap();
    assert!(hover.contents.starts_with("```tact\nstruct Pair\n```"), "{}", hover.contents);
}

#[test]
fn test_type_at_reports_inferred_type() {
    let source = "fun f() {\n    let flag = 1 > 2;\n}";
    let host = host_with(&[("/p/a.tact", source)]);
    let ty = host
        .analysis()
        .type_at(&uri("/p/a.tact"), position_of(source, "flag", 1))
        .unwrap()
        .unwrap();
    assert_eq!(ty.to_string(), "Bool");
}

#[test]
fn test_goto_definition_by_position() {
    let source = "fun helper() {}\nfun f() {\n    helper();\n}";
    let host = host_with(&[("/p/a.tact", source)]);
    let result = host
        .analysis()
        .goto_definition(&uri("/p/a.tact"), Position::new(2, 6))
        .unwrap();
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].span.start, Position::new(0, 4));
}

#[test]
fn test_references_include_declaration_first() {
    let source = "fun helper() {}\nfun f() { helper(); helper(); }";
    let host = host_with(&[("/p/a.tact", source)]);
    let refs = host
        .analysis()
        .find_references(&uri("/p/a.tact"), position_of(source, "helper", 2), true)
        .unwrap();
    assert_eq!(refs.len(), 3);
    assert!(refs.references[0].is_definition);
}

#[test]
fn test_position_past_end_is_an_error() {
    let host = host_with(&[("/p/a.tact", "fun f() {}")]);
    let err = host
        .analysis()
        .goto_definition(&uri("/p/a.tact"), Position::new(0, 99))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::PositionOutOfRange { line: 0, column: 99 }));
}
