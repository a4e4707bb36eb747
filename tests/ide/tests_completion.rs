//! Completion through `Analysis::completions`.

use crate::helpers::host_helpers::*;
use tact::Position;

fn complete_labels(files: &[(&str, &str)], path: &str, position: Position) -> Vec<String> {
    let host = host_with(files);
    host.analysis()
        .completions(&uri(path), position)
        .unwrap()
        .into_iter()
        .map(|item| item.label.to_string())
        .collect()
}

fn after(text: &str, word: &str) -> Position {
    let mut position = position_of(text, word, 1);
    position.column += word.len();
    position
}

#[test]
fn test_global_functions_from_other_files() {
    let main = "fun f() { hel }";
    let found = complete_labels(
        &[("/p/main.tact", main), ("/p/lib.tact", "fun helper() {}")],
        "/p/main.tact",
        after(main, "hel"),
    );
    assert!(found.iter().any(|l| l == "helper"), "{found:?}");
}

#[test]
fn test_locals_and_keywords_in_function_body() {
    let main = "fun f(amount: Int) {\n    let total = 1;\n    to\n}";
    let found = complete_labels(&[("/p/main.tact", main)], "/p/main.tact", after(main, "to"));
    assert!(found.iter().any(|l| l == "total"), "{found:?}");
    assert!(found.iter().any(|l| l == "amount"), "{found:?}");
    assert!(found.iter().any(|l| l == "let"), "{found:?}");
}

#[test]
fn test_fields_after_self_dot() {
    let main = "contract C {\n    balance: Int;\n    fun f() { self.b }\n}";
    let mut position = position_of(main, "b", 1);
    position.column += 1;
    let found = complete_labels(&[("/p/main.tact", main)], "/p/main.tact", position);
    assert!(found.iter().any(|l| l == "balance"), "{found:?}");
}
