//! Helpers for setting up analysis hosts and locating names in sources.

use std::sync::Arc;

use tact::hir::{File, Node};
use tact::ide::AnalysisHost;
use tact::{FileUri, Position, TextSize};

/// Creates an AnalysisHost with the given workspace files.
pub fn host_with(files: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, text) in files {
        host.open_or_update(&FileUri::new(path), *text)
            .unwrap_or_else(|| panic!("no language for {path}"));
    }
    host
}

pub fn uri(path: &str) -> FileUri {
    FileUri::new(path)
}

/// Byte offset of the `nth` (1-based) whole-word occurrence of `word`.
pub fn offset_of(text: &str, word: &str, nth: usize) -> usize {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(word)
        .filter(|(start, _)| {
            let before = text[..*start].chars().next_back();
            let after = text[start + word.len()..].chars().next();
            !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
        })
        .nth(nth - 1)
        .map(|(start, _)| start)
        .unwrap_or_else(|| panic!("occurrence {nth} of {word:?} not found"))
}

/// Zero-based line/column of the `nth` occurrence of `word`.
pub fn position_of(text: &str, word: &str, nth: usize) -> Position {
    let offset = offset_of(text, word, nth);
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let column = before.len() - before.rfind('\n').map_or(0, |i| i + 1);
    Position::new(line, column)
}

/// Leaf node at the `nth` occurrence of `word` in the loaded file `path`.
pub fn node_at(host: &AnalysisHost, path: &str, word: &str, nth: usize) -> Node {
    let file: Arc<File> = host.file(&uri(path)).expect("file is loaded");
    let offset = offset_of(file.text(), word, nth);
    let leaf = file
        .tree()
        .leaf_at_offset(TextSize::new(offset as u32))
        .expect("leaf at offset")
        .index();
    Node::new(file, leaf)
}
