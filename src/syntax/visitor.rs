//! Depth-first tree traversal.
//!
//! [`visit`] is the only walking primitive the analysis layers use. It keeps
//! an explicit cursor instead of recursing, so arbitrarily deep trees never
//! grow the call stack and no node list is materialized up front.

use super::tree::SyntaxNode;

/// Cursor over a subtree in document order.
///
/// `visited_children` records that the cursor came back up to `node` (or
/// chose to skip its subtree); the next step then moves to a sibling or
/// further up instead of descending again.
pub struct TreeCursor<'t> {
    root: SyntaxNode<'t>,
    node: SyntaxNode<'t>,
    visited_children: bool,
}

impl<'t> TreeCursor<'t> {
    pub fn new(root: SyntaxNode<'t>) -> Self {
        Self {
            root,
            node: root,
            visited_children: false,
        }
    }

    pub fn node(&self) -> SyntaxNode<'t> {
        self.node
    }

    /// Marks the current node's subtree as done.
    pub fn skip_children(&mut self) {
        self.visited_children = true;
    }

    /// Moves to the next node in pre-order, returning false at the end.
    pub fn advance(&mut self) -> bool {
        if !self.visited_children
            && let Some(child) = self.node.first_child()
        {
            self.node = child;
            return true;
        }
        loop {
            if self.node == self.root {
                return false;
            }
            if let Some(sibling) = self.node.next_sibling() {
                self.node = sibling;
                self.visited_children = false;
                return true;
            }
            match self.node.parent() {
                Some(parent) => {
                    self.node = parent;
                    self.visited_children = true;
                }
                None => return false,
            }
        }
    }
}

/// Pre-order walk of `root`'s subtree, `root` included.
///
/// Returning `false` from `callback` prunes the subtree of that node; its
/// siblings are still visited. A `None` root visits nothing.
pub fn visit<'t, F>(root: Option<SyntaxNode<'t>>, mut callback: F)
where
    F: FnMut(SyntaxNode<'t>) -> bool,
{
    let Some(root) = root else {
        return;
    };
    let mut cursor = TreeCursor::new(root);
    loop {
        if !callback(cursor.node()) {
            cursor.skip_children();
        }
        if !cursor.advance() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::parser::{SyntaxKind, parse};
    use crate::syntax::{Generation, SyntaxTree};

    fn tree(source: &str) -> SyntaxTree {
        SyntaxTree::new(Generation(1), Arc::from(source), parse(source).tree)
    }

    #[test]
    fn visits_in_document_order() {
        let tree = tree("fun a() { let x = 1; } fun b() {}");
        let mut names = Vec::new();
        visit(Some(tree.root()), |n| {
            if n.kind() == SyntaxKind::IDENTIFIER {
                names.push(n.text());
            }
            true
        });
        assert_eq!(names, vec!["a", "x", "b"]);
    }

    #[test]
    fn pruning_skips_subtree_but_not_siblings() {
        let tree = tree("fun a() { let x = 1; } fun b() { let y = 2; }");
        let mut names = Vec::new();
        visit(Some(tree.root()), |n| {
            if n.kind() == SyntaxKind::FUNCTION_BODY {
                return false;
            }
            if n.kind() == SyntaxKind::IDENTIFIER {
                names.push(n.text());
            }
            true
        });
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn none_root_is_a_no_op() {
        let mut calls = 0;
        visit(None, |_| {
            calls += 1;
            true
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn walk_stays_inside_the_subtree() {
        let tree = tree("fun a() { let x = 1; } fun b() { let y = 2; }");
        let first = tree.root().first_child().unwrap();
        let mut count = 0;
        let mut saw_b = false;
        visit(Some(first), |n| {
            count += 1;
            saw_b |= n.text() == "b";
            true
        });
        assert!(count > 1);
        assert!(!saw_b);
    }
}
