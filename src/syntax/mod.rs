//! Syntax layer: immutable trees, traversal and language hooks.
//!
//! - [`SyntaxTree`] / [`SyntaxNode`] - generation-tagged arena and node handles
//! - [`visit`] / [`TreeCursor`] - the single traversal primitive
//! - [`LanguageSupport`] - parse + classification table per language

mod language;
mod tree;
mod visitor;

pub use language::{
    DeclKind, LanguageId, LanguageRegistry, LanguageSupport, TactLanguage, TextOnlyLanguage,
};
pub use tree::{Children, Generation, NodeId, SyntaxNode, SyntaxTree};
pub use visitor::{TreeCursor, visit};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
