//! Flat tree construction.
//!
//! The parser emits start/token/finish events; [`TreeBuilder::finish`] turns
//! them into a [`RawTree`]: one vector of nodes linked by indices, root first.
//! Tokens are leaves of the same vector, so every token is addressable the
//! same way as a composite node. Whitespace never reaches the builder.

use text_size::{TextRange, TextSize};

use super::syntax_kind::{Field, SyntaxKind};

/// Index of a node inside one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    pub kind: SyntaxKind,
    pub field: Option<Field>,
    pub range: TextRange,
    pub parent: Option<NodeIndex>,
    pub first_child: Option<NodeIndex>,
    pub last_child: Option<NodeIndex>,
    pub next_sibling: Option<NodeIndex>,
    pub prev_sibling: Option<NodeIndex>,
}

/// Parser output before it is bound to a file generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTree {
    pub nodes: Vec<RawNode>,
}

impl RawTree {
    /// A tree holding only a root of `kind` that spans the whole text.
    pub fn single(kind: SyntaxKind, len: TextSize) -> Self {
        Self {
            nodes: vec![RawNode {
                kind,
                field: None,
                range: TextRange::up_to(len),
                parent: None,
                first_child: None,
                last_child: None,
                next_sibling: None,
                prev_sibling: None,
            }],
        }
    }
}

/// Position in the event stream that a node can later be wrapped at.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

#[derive(Debug)]
enum Event {
    Start {
        kind: SyntaxKind,
        field: Option<Field>,
    },
    Token {
        kind: SyntaxKind,
        field: Option<Field>,
        range: TextRange,
    },
    Finish,
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    events: Vec<Event>,
    pending_field: Option<Field>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next started node or token gets this field.
    pub fn field(&mut self, field: Field) {
        self.pending_field = Some(field);
    }

    /// Drops a field that was set for an element that never materialized.
    pub fn clear_field(&mut self) {
        self.pending_field = None;
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        let field = self.pending_field.take();
        self.events.push(Event::Start { kind, field });
    }

    pub fn token(&mut self, kind: SyntaxKind, range: TextRange) {
        let field = if kind == SyntaxKind::COMMENT {
            None
        } else {
            self.pending_field.take()
        };
        self.events.push(Event::Token { kind, field, range });
    }

    pub fn finish_node(&mut self) {
        self.events.push(Event::Finish);
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.events.len())
    }

    /// Wraps everything emitted since `checkpoint` in a new `kind` node.
    ///
    /// The wrapper takes over the field of the first wrapped element, which
    /// in turn receives `inner_field`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind, inner_field: Option<Field>) {
        let outer_field = match self.events.get_mut(checkpoint.0) {
            Some(Event::Start { field, .. }) | Some(Event::Token { field, .. }) => {
                std::mem::replace(field, inner_field)
            }
            _ => None,
        };
        self.events
            .insert(checkpoint.0, Event::Start { kind, field: outer_field });
    }

    pub fn finish(self) -> RawTree {
        let mut nodes: Vec<RawNode> = Vec::with_capacity(self.events.len() / 2 + 1);
        let mut stack: Vec<(NodeIndex, Option<TextSize>)> = Vec::new();
        let mut last_end = TextSize::new(0);

        for event in self.events {
            match event {
                Event::Start { kind, field } => {
                    let idx = push_node(&mut nodes, &stack, kind, field, TextRange::empty(last_end));
                    stack.push((idx, None));
                }
                Event::Token { kind, field, range } => {
                    push_node(&mut nodes, &stack, kind, field, range);
                    for (_, start) in stack.iter_mut().rev() {
                        if start.is_some() {
                            break;
                        }
                        *start = Some(range.start());
                    }
                    last_end = range.end();
                }
                Event::Finish => {
                    if let Some((idx, start)) = stack.pop() {
                        let start = start.unwrap_or(last_end);
                        nodes[idx.as_usize()].range = TextRange::new(start, last_end.max(start));
                    }
                }
            }
        }

        // Unbalanced events only happen on a parser bug; close what is open.
        while let Some((idx, start)) = stack.pop() {
            let start = start.unwrap_or(last_end);
            nodes[idx.as_usize()].range = TextRange::new(start, last_end.max(start));
        }

        if nodes.is_empty() {
            return RawTree::single(SyntaxKind::SOURCE_FILE, TextSize::new(0));
        }
        RawTree { nodes }
    }
}

fn push_node(
    nodes: &mut Vec<RawNode>,
    stack: &[(NodeIndex, Option<TextSize>)],
    kind: SyntaxKind,
    field: Option<Field>,
    range: TextRange,
) -> NodeIndex {
    let idx = NodeIndex(nodes.len() as u32);
    let parent = stack.last().map(|(p, _)| *p);
    let mut prev_sibling = None;
    if let Some(parent) = parent {
        let parent_node = &mut nodes[parent.as_usize()];
        prev_sibling = parent_node.last_child;
        if parent_node.first_child.is_none() {
            parent_node.first_child = Some(idx);
        }
        parent_node.last_child = Some(idx);
        if let Some(prev) = prev_sibling {
            nodes[prev.as_usize()].next_sibling = Some(idx);
        }
    }
    nodes.push(RawNode {
        kind,
        field,
        range,
        parent,
        first_child: None,
        last_child: None,
        next_sibling: None,
        prev_sibling,
    });
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn wraps_at_checkpoint() {
        let mut b = TreeBuilder::new();
        b.start_node(SyntaxKind::SOURCE_FILE);
        b.field(Field::Value);
        let cp = b.checkpoint();
        b.token(SyntaxKind::IDENTIFIER, range(0, 1));
        b.start_node_at(cp, SyntaxKind::BINARY_EXPRESSION, Some(Field::Left));
        b.token(SyntaxKind::PLUS, range(2, 3));
        b.field(Field::Right);
        b.token(SyntaxKind::INTEGER, range(4, 5));
        b.finish_node();
        b.finish_node();
        let tree = b.finish();

        assert_eq!(tree.nodes.len(), 5);
        let binary = &tree.nodes[1];
        assert_eq!(binary.kind, SyntaxKind::BINARY_EXPRESSION);
        assert_eq!(binary.field, Some(Field::Value));
        assert_eq!(binary.range, range(0, 5));
        assert_eq!(tree.nodes[2].field, Some(Field::Left));
        assert_eq!(tree.nodes[4].field, Some(Field::Right));
        assert_eq!(tree.nodes[3].prev_sibling, Some(NodeIndex(2)));
    }

    #[test]
    fn empty_node_sits_at_last_offset() {
        let mut b = TreeBuilder::new();
        b.start_node(SyntaxKind::SOURCE_FILE);
        b.token(SyntaxKind::IDENTIFIER, range(0, 3));
        b.start_node(SyntaxKind::ERROR);
        b.finish_node();
        b.finish_node();
        let tree = b.finish();
        assert_eq!(tree.nodes[2].range, TextRange::empty(3.into()));
        assert_eq!(tree.nodes[0].range, range(0, 3));
    }
}
