//! Find references and document highlights.

use std::sync::Arc;

use crate::base::{FileUri, Span, TextRange, TextSize};
use crate::hir::{Db, Decl, File, Node, ReferenceOptions, Referent};
use crate::parser::{Field as NodeField, SyntaxKind};

use super::leaf_at;

/// Result of a find-references request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceResult {
    /// All references found.
    pub references: Vec<Reference>,
    /// Include the definition in the results.
    pub include_declaration: bool,
}

impl ReferenceResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }
}

/// A reference to a symbol.
#[derive(Clone, Debug)]
pub struct Reference {
    pub uri: FileUri,
    pub range: TextRange,
    pub span: Span,
    /// Whether this is the definition (vs a reference).
    pub is_definition: bool,
}

impl Reference {
    fn new(node: &Node, is_definition: bool) -> Self {
        Self {
            uri: node.file().uri().clone(),
            range: node.range(),
            span: node.span(),
            is_definition,
        }
    }
}

/// Every usage of the declaration under the cursor, workspace-wide.
pub fn find_references(
    db: Db<'_>,
    file: &Arc<File>,
    offset: TextSize,
    include_declaration: bool,
) -> ReferenceResult {
    let Some(referent) = leaf_at(file, offset).and_then(|leaf| Referent::at(db, &leaf)) else {
        return ReferenceResult::empty();
    };
    let definition = referent.declaration().name_node();
    let mut options = ReferenceOptions::default();
    if include_declaration {
        options = options.with_definition();
    }
    let references = referent
        .find_references(options)
        .iter()
        .map(|node| Reference::new(node, Some(node) == definition.as_ref()))
        .collect();
    ReferenceResult {
        references,
        include_declaration,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightKind {
    Read,
    /// Declaration or assignment target.
    Write,
}

impl HighlightKind {
    /// Convert to LSP document highlight kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            HighlightKind::Read => 2,
            HighlightKind::Write => 3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Highlight {
    pub range: TextRange,
    pub span: Span,
    pub kind: HighlightKind,
}

/// Occurrences of the symbol under the cursor within its file, including
/// `self` for contracts and traits.
pub fn document_highlights(db: Db<'_>, file: &Arc<File>, offset: TextSize) -> Vec<Highlight> {
    let Some(referent) = leaf_at(file, offset).and_then(|leaf| Referent::at(db, &leaf)) else {
        return Vec::new();
    };
    let definition = referent.declaration().name_node();
    referent
        .find_references(
            ReferenceOptions::default()
                .with_definition()
                .same_file_only()
                .with_self(),
        )
        .into_iter()
        .filter(|node| node.file().uri() == file.uri())
        .map(|node| {
            let is_write = Some(&node) == definition.as_ref() || is_assignment_target(&node);
            Highlight {
                range: node.range(),
                span: node.span(),
                kind: if is_write {
                    HighlightKind::Write
                } else {
                    HighlightKind::Read
                },
            }
        })
        .collect()
}

fn is_assignment_target(node: &Node) -> bool {
    let mut current = node.clone();
    // `a.b = …` writes through the whole access chain
    while let Some(parent) = current.parent() {
        match parent.kind() {
            SyntaxKind::FIELD_ACCESS_EXPRESSION => current = parent,
            SyntaxKind::ASSIGNMENT_STATEMENT | SyntaxKind::AUGMENTED_ASSIGNMENT_STATEMENT => {
                return current.field() == Some(NodeField::Left);
            }
            _ => return false,
        }
    }
    false
}
