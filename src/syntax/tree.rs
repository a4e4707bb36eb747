//! Generation-tagged syntax trees.
//!
//! A [`SyntaxTree`] is the immutable result of one parse of one file. It owns
//! the source text and a flat arena of nodes; [`SyntaxNode`] is a cheap `Copy`
//! handle borrowing the tree. Every tree carries the [`Generation`] it was
//! created with, so node identities ([`NodeId`]) from an older parse never
//! compare equal to nodes of the current one.

use std::fmt;
use std::sync::Arc;

use crate::base::{LineIndex, Span, TextRange, TextSize};
use crate::parser::{Field, NodeIndex, RawNode, RawTree, SyntaxKind};

/// Monotonic tag of one parse. Allocated by the file cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u32);

impl Generation {
    pub fn next(self) -> Generation {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Identity of a node across the whole workspace.
///
/// Generations are allocated from one counter for all files, so the pair is
/// unique even without the file URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub generation: Generation,
    pub index: NodeIndex,
}

/// One parse of one source text.
pub struct SyntaxTree {
    generation: Generation,
    text: Arc<str>,
    nodes: Vec<RawNode>,
    line_index: LineIndex,
}

impl SyntaxTree {
    pub fn new(generation: Generation, text: Arc<str>, raw: RawTree) -> Self {
        let line_index = LineIndex::new(&text);
        Self {
            generation,
            text,
            nodes: raw.nodes,
            line_index,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Number of nodes, tokens included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            index: NodeIndex::ROOT,
        }
    }

    pub fn node(&self, index: NodeIndex) -> Option<SyntaxNode<'_>> {
        (index.as_usize() < self.nodes.len()).then_some(SyntaxNode { tree: self, index })
    }

    /// Handle for an index taken from this same tree.
    pub(crate) fn node_at(&self, index: NodeIndex) -> SyntaxNode<'_> {
        debug_assert!(index.as_usize() < self.nodes.len());
        SyntaxNode { tree: self, index }
    }

    /// Deepest leaf touching `offset`.
    ///
    /// When the offset sits exactly between two leaves, a name or literal on
    /// the left wins over punctuation on the right, so a cursor placed right
    /// after `foo` still lands on `foo`.
    pub fn leaf_at_offset(&self, offset: TextSize) -> Option<SyntaxNode<'_>> {
        let mut containing: Option<SyntaxNode<'_>> = None;
        let mut left: Option<SyntaxNode<'_>> = None;
        for (i, raw) in self.nodes.iter().enumerate() {
            if raw.first_child.is_some() || raw.kind == SyntaxKind::COMMENT {
                continue;
            }
            let node = SyntaxNode {
                tree: self,
                index: NodeIndex(i as u32),
            };
            if raw.range.contains(offset) {
                containing.get_or_insert(node);
            } else if raw.range.end() == offset && !raw.range.is_empty() && !raw.kind.is_anonymous()
            {
                left = Some(node);
            }
        }
        match (containing, left) {
            (Some(right), Some(left)) if right.is_anonymous() => Some(left),
            (Some(right), _) => Some(right),
            (None, left) => left,
        }
    }

    fn raw(&self, index: NodeIndex) -> &RawNode {
        &self.nodes[index.as_usize()]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("generation", &self.generation)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Handle to a node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    index: NodeIndex,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl<'t> SyntaxNode<'t> {
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn id(&self) -> NodeId {
        NodeId {
            generation: self.tree.generation,
            index: self.index,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.tree.raw(self.index).kind
    }

    /// Field this node occupies in its parent.
    pub fn field(&self) -> Option<Field> {
        self.tree.raw(self.index).field
    }

    pub fn text_range(&self) -> TextRange {
        self.tree.raw(self.index).range
    }

    pub fn text(&self) -> &'t str {
        let range = self.text_range();
        &self.tree.text[usize::from(range.start())..usize::from(range.end())]
    }

    pub fn span(&self) -> Span {
        self.tree.line_index.span(self.text_range())
    }

    pub fn is_error(&self) -> bool {
        self.kind() == SyntaxKind::ERROR
    }

    /// Token leaves have no children; composite nodes usually do.
    pub fn is_leaf(&self) -> bool {
        self.tree.raw(self.index).first_child.is_none()
    }

    /// Keywords, punctuation and comments.
    pub fn is_anonymous(&self) -> bool {
        self.kind().is_anonymous()
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.tree.raw(self.index).parent)
    }

    pub fn first_child(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.tree.raw(self.index).first_child)
    }

    pub fn last_child(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.tree.raw(self.index).last_child)
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.tree.raw(self.index).next_sibling)
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.tree.raw(self.index).prev_sibling)
    }

    /// Next sibling that is not a comment.
    pub fn next_significant_sibling(&self) -> Option<SyntaxNode<'t>> {
        let mut next = self.next_sibling();
        while let Some(node) = next {
            if node.kind() != SyntaxKind::COMMENT {
                return Some(node);
            }
            next = node.next_sibling();
        }
        None
    }

    pub fn children(&self) -> Children<'t> {
        Children {
            next: self.first_child(),
        }
    }

    /// Children that are not keywords, punctuation or comments.
    pub fn named_children(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        self.children().filter(|c| !c.is_anonymous())
    }

    pub fn child_by_field(&self, field: Field) -> Option<SyntaxNode<'t>> {
        self.children().find(|c| c.field() == Some(field))
    }

    pub fn children_by_field(&self, field: Field) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        self.children().filter(move |c| c.field() == Some(field))
    }

    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// This node and every ancestor up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        std::iter::successors(Some(*self), |n| n.parent())
    }

    /// Nearest strict ancestor whose kind is in `kinds`.
    pub fn parent_of_kind(&self, kinds: &[SyntaxKind]) -> Option<SyntaxNode<'t>> {
        self.ancestors().skip(1).find(|n| kinds.contains(&n.kind()))
    }

    /// Whether `other` lies in the subtree rooted at this node.
    pub fn contains(&self, other: &SyntaxNode<'_>) -> bool {
        std::ptr::eq(self.tree, other.tree) && other.ancestors().any(|a| a.index == self.index)
    }

    /// Whether any node in this subtree is an `ERROR` node.
    pub fn has_error(&self) -> bool {
        let mut found = false;
        super::visit(Some(*self), |n| {
            if n.is_error() {
                found = true;
            }
            !found
        });
        found
    }

    /// Tree-sitter style s-expression of this subtree (named nodes only).
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind().as_str());
        for child in self.named_children() {
            out.push(' ');
            if let Some(field) = child.field() {
                out.push_str(field.as_str());
                out.push_str(": ");
            }
            child.write_sexp(out);
        }
        out.push(')');
    }

    fn wrap(&self, index: Option<NodeIndex>) -> Option<SyntaxNode<'t>> {
        index.map(|index| SyntaxNode {
            tree: self.tree,
            index,
        })
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.kind().as_str(), self.text_range())
    }
}

pub struct Children<'t> {
    next: Option<SyntaxNode<'t>>,
}

impl<'t> Iterator for Children<'t> {
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn tree(source: &str) -> SyntaxTree {
        SyntaxTree::new(Generation(1), Arc::from(source), parse(source).tree)
    }

    #[test]
    fn field_lookup_and_text() {
        let tree = tree("struct Point { x: Int; y: Int }");
        let strukt = tree.root().first_child().unwrap();
        assert_eq!(strukt.kind(), SyntaxKind::STRUCT);
        let name = strukt.child_by_field(Field::Name).unwrap();
        assert_eq!(name.text(), "Point");
        assert_eq!(name.kind(), SyntaxKind::TYPE_IDENTIFIER);
        let body = strukt.child_by_field(Field::Body).unwrap();
        let fields: Vec<_> = body
            .children()
            .filter(|c| c.kind() == SyntaxKind::FIELD)
            .map(|f| f.child_by_field(Field::Name).unwrap().text())
            .collect();
        assert_eq!(fields, vec!["x", "y"]);
    }

    #[test]
    fn leaf_at_offset_prefers_name_on_the_left() {
        let tree = tree("fun foo() {}");
        let leaf = tree.leaf_at_offset(TextSize::new(7)).unwrap();
        assert_eq!(leaf.text(), "foo");
        let inside = tree.leaf_at_offset(TextSize::new(5)).unwrap();
        assert_eq!(inside.text(), "foo");
        let start = tree.leaf_at_offset(TextSize::new(4)).unwrap();
        assert_eq!(start.text(), "foo");
    }

    #[test]
    fn leaf_at_offset_before_call_parens() {
        let tree = tree("fun f() { foo(1); }");
        let leaf = tree.leaf_at_offset(TextSize::new(13)).unwrap();
        assert_eq!(leaf.text(), "foo");
        let paren = tree.leaf_at_offset(TextSize::new(14)).unwrap();
        assert_eq!(paren.text(), "1");
    }

    #[test]
    fn ids_differ_between_generations() {
        let source = "const A: Int = 1;";
        let a = SyntaxTree::new(Generation(1), Arc::from(source), parse(source).tree);
        let b = SyntaxTree::new(Generation(2), Arc::from(source), parse(source).tree);
        assert_ne!(a.root().id(), b.root().id());
        assert_eq!(a.root().index(), b.root().index());
    }

    #[test]
    fn sexp_shows_fields() {
        let tree = tree("fun f() { let a = 1 + b; }");
        let sexp = tree.root().to_sexp();
        assert!(sexp.contains("(let_statement name: (identifier) value: (binary_expression left: (integer) right: (identifier)))"), "{sexp}");
    }
}
