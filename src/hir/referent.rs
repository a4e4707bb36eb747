//! Usage search.
//!
//! [`Referent`] finds every occurrence that resolves to a given declaration.
//! The search walks the smallest subtree the declaration can be used in
//! (a block for locals, the function for parameters, the whole workspace
//! otherwise) and confirms each same-named occurrence through the resolver:
//! equal names alone say nothing.

use std::sync::Arc;

use crate::parser::{Field as NodeField, SyntaxKind};
use crate::syntax::visit;

use super::db::Db;
use super::decls::{BindingKind, Decl, Declaration};
use super::file::File;
use super::node::Node;
use super::resolve::is_name_occurrence;

/// What [`Referent::find_references`] returns besides plain usages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceOptions {
    /// Put the declaration's own name first.
    pub include_definition: bool,
    /// Only search the declaration's file.
    pub same_file_only: bool,
    /// For contracts and traits, also report `self` occurrences.
    pub include_self: bool,
}

impl ReferenceOptions {
    pub fn with_definition(mut self) -> Self {
        self.include_definition = true;
        self
    }

    pub fn same_file_only(mut self) -> Self {
        self.same_file_only = true;
        self
    }

    pub fn with_self(mut self) -> Self {
        self.include_self = true;
        self
    }
}

/// Where the usages of a declaration can appear.
enum UseScope {
    /// A subtree of the declaring file.
    Subtree(Node),
    Files(Vec<Arc<File>>),
}

pub struct Referent<'a> {
    db: Db<'a>,
    decl: Declaration,
}

impl<'a> Referent<'a> {
    pub fn new(db: Db<'a>, decl: Declaration) -> Self {
        Self { db, decl }
    }

    /// Referent of whatever `node` names, if it resolves.
    pub fn at(db: Db<'a>, node: &Node) -> Option<Self> {
        db.resolve(node).map(|decl| Self::new(db, decl))
    }

    pub fn declaration(&self) -> &Declaration {
        &self.decl
    }

    /// Occurrences in document order, file by file.
    pub fn find_references(&self, options: ReferenceOptions) -> Vec<Node> {
        let Some(definition) = self.decl.name_node() else {
            return Vec::new();
        };
        let name = self.decl.name();
        let with_self = options.include_self
            && matches!(self.decl, Declaration::Contract(_) | Declaration::Trait(_));

        let mut result = Vec::new();
        if options.include_definition {
            result.push(definition.clone());
        }

        let mut scan = |root: &Node| {
            visit(Some(root.syntax()), |syntax| {
                let is_self = syntax.kind() == SyntaxKind::SELF;
                if !(syntax.text() == name.as_str() || (with_self && is_self)) {
                    return true;
                }
                let candidate = root.with_syntax(syntax);
                if candidate == definition || !is_name_occurrence(&candidate) {
                    return true;
                }
                if self.db.resolve(&candidate).as_ref() == Some(&self.decl) {
                    result.push(candidate);
                }
                true
            });
        };

        match self.use_scope(&options) {
            UseScope::Subtree(root) => scan(&root),
            UseScope::Files(files) => {
                for file in files {
                    scan(&Node::root(file));
                }
            }
        }
        result
    }

    /// Whether anything besides the definition refers to the declaration.
    pub fn has_references(&self) -> bool {
        !self.find_references(ReferenceOptions::default()).is_empty()
    }

    fn use_scope(&self, options: &ReferenceOptions) -> UseScope {
        if let Some(root) = self.local_scope() {
            return UseScope::Subtree(root);
        }
        let home = self.decl.node().file();
        if options.same_file_only {
            return UseScope::Files(vec![Arc::clone(home)]);
        }
        // the declaring file first, then everything else in cache order
        let mut files = vec![Arc::clone(home)];
        files.extend(
            self.db
                .files
                .iter()
                .filter(|f| f.uri() != home.uri() && f.language() == home.language())
                .cloned(),
        );
        UseScope::Files(files)
    }

    fn local_scope(&self) -> Option<Node> {
        match &self.decl {
            Declaration::Variable(var) => {
                let holder = var.declaration_node()?;
                match var.binding_kind()? {
                    BindingKind::Let => enclosing_block(&holder),
                    BindingKind::Destruct => {
                        let statement = holder.parent_of_kind(&[SyntaxKind::DESTRUCT_STATEMENT])?;
                        enclosing_block(&statement)
                    }
                    BindingKind::ForeachKey | BindingKind::ForeachValue => {
                        holder.child_by_field(NodeField::Body)
                    }
                    BindingKind::Catch => holder.child_by_field(NodeField::Body),
                }
            }
            Declaration::Parameter(param) => param.function(),
            _ => None,
        }
    }
}

/// Innermost block or function body holding `node`.
fn enclosing_block(node: &Node) -> Option<Node> {
    node.parent_of_kind(&[
        SyntaxKind::BLOCK_STATEMENT,
        SyntaxKind::FUNCTION_BODY,
        SyntaxKind::ASM_FUNCTION_BODY,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::test_db::TestDb;

    fn usages(t: &TestDb, path: &str, word: &str, nth: usize, options: ReferenceOptions) -> Vec<String> {
        let node = t.node_at(path, word, nth);
        let referent = Referent::at(t.db(), &node).expect("resolves");
        referent
            .find_references(options)
            .iter()
            .map(|n| format!("{}:{}", n.file().uri().file_name(), u32::from(n.range().start())))
            .collect()
    }

    #[test]
    fn same_name_in_other_function_is_not_a_usage() {
        let src = "fun f() { let x = 1; x; }\nfun g() { let x = 2; x; }";
        let t = TestDb::new(&[("/p/a.tact", src)]);
        let offset = crate::hir::test_db::word_offset(src, "x", 2).unwrap();
        assert_eq!(
            usages(&t, "/p/a.tact", "x", 1, ReferenceOptions::default()),
            vec![format!("a.tact:{offset}")]
        );
    }

    #[test]
    fn definition_comes_first_when_asked() {
        let src = "fun f(a: Int) { a; a; }";
        let t = TestDb::new(&[("/p/a.tact", src)]);
        let refs = usages(&t, "/p/a.tact", "a", 1, ReferenceOptions::default().with_definition());
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0], "a.tact:6");
    }

    #[test]
    fn global_usages_span_files() {
        let t = TestDb::new(&[
            ("/p/a.tact", "fun helper() {}"),
            ("/p/b.tact", "import \"./a\";\nfun f() { helper(); }"),
            ("/p/c.tact", "fun helper() {}\nfun g() { helper(); }"),
        ]);
        let refs = usages(&t, "/p/a.tact", "helper", 1, ReferenceOptions::default());
        assert_eq!(refs.len(), 1);
        assert!(refs[0].starts_with("b.tact:"));

        let same_file = usages(
            &t,
            "/p/a.tact",
            "helper",
            1,
            ReferenceOptions::default().same_file_only(),
        );
        assert!(same_file.is_empty());
    }

    #[test]
    fn self_counts_only_when_requested() {
        let src = "contract C { fun touch() { self; } }";
        let t = TestDb::new(&[("/p/a.tact", src)]);
        assert!(usages(&t, "/p/a.tact", "C", 1, ReferenceOptions::default()).is_empty());
        assert_eq!(
            usages(&t, "/p/a.tact", "C", 1, ReferenceOptions::default().with_self()).len(),
            1
        );
    }
}
