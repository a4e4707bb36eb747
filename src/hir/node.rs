//! Owned node handles.
//!
//! [`SyntaxNode`] borrows its tree, which is fine inside one walk but not for
//! values that outlive it (cache entries, index entries, resolve results).
//! [`Node`] keeps the owning [`File`] alive instead and re-borrows on demand.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::base::{Span, TextRange};
use crate::parser::{Field, NodeIndex, SyntaxKind};
use crate::syntax::{NodeId, SyntaxNode};

use super::file::File;

#[derive(Clone)]
pub struct Node {
    file: Arc<File>,
    index: NodeIndex,
}

impl Node {
    /// `index` must come from `file`'s own tree.
    pub fn new(file: Arc<File>, index: NodeIndex) -> Self {
        Self { file, index }
    }

    pub fn root(file: Arc<File>) -> Self {
        Self::new(file, NodeIndex::ROOT)
    }

    pub fn file(&self) -> &Arc<File> {
        &self.file
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn syntax(&self) -> SyntaxNode<'_> {
        self.file.tree().node_at(self.index)
    }

    /// Wraps another node of the same tree.
    pub fn with_syntax(&self, syntax: SyntaxNode<'_>) -> Node {
        Node::new(Arc::clone(&self.file), syntax.index())
    }

    pub fn id(&self) -> NodeId {
        self.syntax().id()
    }

    pub fn kind(&self) -> SyntaxKind {
        self.syntax().kind()
    }

    pub fn field(&self) -> Option<Field> {
        self.syntax().field()
    }

    pub fn text(&self) -> &str {
        self.syntax().text()
    }

    pub fn range(&self) -> TextRange {
        self.syntax().text_range()
    }

    pub fn span(&self) -> Span {
        self.syntax().span()
    }

    pub fn parent(&self) -> Option<Node> {
        self.syntax().parent().map(|p| self.with_syntax(p))
    }

    pub fn child_by_field(&self, field: Field) -> Option<Node> {
        self.syntax()
            .child_by_field(field)
            .map(|c| self.with_syntax(c))
    }

    pub fn children_of_kind(&self, kind: SyntaxKind) -> Vec<Node> {
        self.syntax()
            .children()
            .filter(|c| c.kind() == kind)
            .map(|c| self.with_syntax(c))
            .collect()
    }

    pub fn named_children(&self) -> Vec<Node> {
        self.syntax()
            .named_children()
            .map(|c| self.with_syntax(c))
            .collect()
    }

    pub fn parent_of_kind(&self, kinds: &[SyntaxKind]) -> Option<Node> {
        self.syntax()
            .parent_of_kind(kinds)
            .map(|p| self.with_syntax(p))
    }

    /// Text of the `name` child, empty when the node has none.
    pub fn name_text(&self) -> &str {
        self.syntax()
            .child_by_field(Field::Name)
            .map(|n| n.text())
            .unwrap_or("")
    }

    pub fn contains(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.file, &other.file) && self.syntax().contains(&other.syntax())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}@{:?}",
            self.file.uri().file_name(),
            self.kind().as_str(),
            self.range()
        )
    }
}
