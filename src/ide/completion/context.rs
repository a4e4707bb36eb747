//! Where the cursor is, as far as completion cares.
//!
//! The file is reparsed with [`DUMMY_IDENTIFIER`] inserted at the cursor so
//! that an empty or half-typed name still becomes a node. The flags below are
//! read off that node's position in the scratch tree.

use std::sync::Arc;

use crate::base::TextSize;
use crate::hir::{Db, Declaration, File, Node, qualifier_of};
use crate::parser::{Field as NodeField, SyntaxKind};

pub const DUMMY_IDENTIFIER: &str = "DummyIdentifier";

pub struct CompletionContext<'a> {
    pub db: Db<'a>,
    /// The name under the cursor, in the scratch parse.
    pub element: Node,
    /// Text typed before the cursor.
    pub prefix: String,
    pub is_type: bool,
    pub is_expression: bool,
    /// A bare expression statement: `foo|`.
    pub is_statement: bool,
    pub after_dot: bool,
    /// Among top-level items.
    pub top_level: bool,
    /// Among the members of a contract or trait body.
    pub top_level_in_trait_or_contract: bool,
    pub inside_trait_or_contract: bool,
    pub inside_trait: bool,
    /// After `with` in a contract or trait header.
    pub inside_trait_list: bool,
    /// `Foo { na| }` or `let Foo { na| } = …`.
    pub in_name_of_field_init: bool,
    pub before_paren: bool,
    pub before_semicolon: bool,
}

impl<'a> CompletionContext<'a> {
    /// `None` when the cursor is not on a name (inside a string or comment,
    /// or past the end of the text).
    pub fn new(db: Db<'a>, file: &File, offset: TextSize) -> Option<Self> {
        let text = file.text();
        let at = usize::from(offset);
        if at > text.len() || !text.is_char_boundary(at) {
            return None;
        }

        let mut patched = String::with_capacity(text.len() + DUMMY_IDENTIFIER.len());
        patched.push_str(&text[..at]);
        patched.push_str(DUMMY_IDENTIFIER);
        patched.push_str(&text[at..]);
        let scratch = db
            .files
            .parse(file.uri().clone(), Arc::from(patched), file.origin())?
            .into_scratch();
        let scratch = Arc::new(scratch);

        let leaf = scratch.tree().leaf_at_offset(offset)?.index();
        let element = Node::new(Arc::clone(&scratch), leaf);
        if !matches!(
            element.kind(),
            SyntaxKind::IDENT | SyntaxKind::IDENTIFIER | SyntaxKind::TYPE_IDENTIFIER
        ) {
            return None;
        }
        let prefix = element.text().strip_suffix(DUMMY_IDENTIFIER)?.to_string();

        let after = text[at..].trim_start();
        Some(Self::classify(db, element, prefix, after))
    }

    fn classify(db: Db<'a>, element: Node, prefix: String, after: &str) -> Self {
        let parent = element.parent();
        let parent_kind = parent.as_ref().map(Node::kind);
        let grand_kind = parent.as_ref().and_then(Node::parent).map(|g| g.kind());
        let in_error = parent_kind == Some(SyntaxKind::ERROR);

        let owner = element.parent_of_kind(&[SyntaxKind::CONTRACT, SyntaxKind::TRAIT]);
        let inside_trait_list = parent_kind == Some(SyntaxKind::TRAIT_LIST);

        // a destructuring shorthand names a field before it binds a variable
        let declaring = parent_kind != Some(SyntaxKind::DESTRUCT_BIND)
            && Declaration::from_name(&element).is_some();

        let is_type = element.kind() == SyntaxKind::TYPE_IDENTIFIER
            && !declaring
            && !matches!(
                parent_kind,
                Some(SyntaxKind::INSTANCE_EXPRESSION | SyntaxKind::INIT_OF)
            );
        let is_expression = !declaring
            && match element.kind() {
                SyntaxKind::IDENTIFIER => parent_kind != Some(SyntaxKind::TLB_SERIALIZATION),
                SyntaxKind::TYPE_IDENTIFIER => {
                    parent_kind == Some(SyntaxKind::INSTANCE_EXPRESSION)
                }
                _ => false,
            };

        let names_field = element.field() == Some(NodeField::Name);
        let in_name_of_field_init = names_field
            && match (&parent, parent_kind) {
                (Some(arg), Some(SyntaxKind::INSTANCE_ARGUMENT)) => {
                    arg.child_by_field(NodeField::Value).is_none()
                }
                (Some(bind), Some(SyntaxKind::DESTRUCT_BIND)) => {
                    bind.child_by_field(NodeField::Bind).is_none()
                }
                _ => false,
            };

        Self {
            db,
            prefix,
            is_type,
            is_expression,
            is_statement: is_expression && parent_kind == Some(SyntaxKind::EXPRESSION_STATEMENT),
            after_dot: qualifier_of(&element).is_some(),
            top_level: in_error && grand_kind == Some(SyntaxKind::SOURCE_FILE),
            top_level_in_trait_or_contract: in_error
                && matches!(
                    grand_kind,
                    Some(SyntaxKind::CONTRACT_BODY | SyntaxKind::TRAIT_BODY)
                ),
            inside_trait_or_contract: owner.is_some(),
            inside_trait: owner.is_some_and(|o| o.kind() == SyntaxKind::TRAIT),
            inside_trait_list,
            in_name_of_field_init,
            before_paren: after.starts_with('('),
            before_semicolon: after.starts_with(';'),
            element,
        }
    }

    /// Contract or trait around the cursor.
    pub fn owner(&self) -> Option<Declaration> {
        self.element
            .parent_of_kind(&[SyntaxKind::CONTRACT, SyntaxKind::TRAIT])
            .and_then(Declaration::cast)
    }
}

impl std::fmt::Debug for CompletionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionContext")
            .field("element", &self.element)
            .field("prefix", &self.prefix)
            .field("is_type", &self.is_type)
            .field("is_expression", &self.is_expression)
            .field("is_statement", &self.is_statement)
            .field("after_dot", &self.after_dot)
            .field("top_level", &self.top_level)
            .field("top_level_in_trait_or_contract", &self.top_level_in_trait_or_contract)
            .field("inside_trait_list", &self.inside_trait_list)
            .field("in_name_of_field_init", &self.in_name_of_field_init)
            .finish()
    }
}
