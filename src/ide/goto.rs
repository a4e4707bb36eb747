//! Go-to-definition, type definition and implementation.

use std::sync::Arc;

use crate::base::{FileUri, Span, TextRange, TextSize};
use crate::hir::{Db, Decl, Declaration, File, Node, implementations_of, unquote};
use crate::parser::SyntaxKind;
use crate::syntax::DeclKind;

use super::leaf_at;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    pub fn multiple(targets: Vec<GotoTarget>) -> Self {
        Self { targets }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug)]
pub struct GotoTarget {
    pub uri: FileUri,
    /// Name of the target, or the whole file for imports.
    pub range: TextRange,
    pub span: Span,
    /// `None` when the target is a file.
    pub kind: Option<DeclKind>,
    pub name: Arc<str>,
}

impl From<&Declaration> for GotoTarget {
    fn from(decl: &Declaration) -> Self {
        let anchor = decl.name_node().unwrap_or_else(|| decl.node().clone());
        Self {
            uri: anchor.file().uri().clone(),
            range: anchor.range(),
            span: anchor.span(),
            kind: Some(decl.kind()),
            name: Arc::from(decl.name().as_str()),
        }
    }
}

impl GotoTarget {
    fn file_start(file: &File) -> Self {
        let range = TextRange::empty(TextSize::new(0));
        Self {
            uri: file.uri().clone(),
            range,
            span: file.tree().line_index().span(range),
            kind: None,
            name: Arc::from(file.uri().file_name()),
        }
    }
}

/// Declaration of the name under the cursor, or the imported file when the
/// cursor is on an import path.
pub fn goto_definition(db: Db<'_>, file: &Arc<File>, offset: TextSize) -> GotoResult {
    let Some(leaf) = leaf_at(file, offset) else {
        return GotoResult::empty();
    };
    if let Some(target) = import_target(db, &leaf) {
        return GotoResult::single(GotoTarget::file_start(&target));
    }
    match db.resolve(&leaf) {
        Some(decl) => GotoResult::single(GotoTarget::from(&decl)),
        None => GotoResult::empty(),
    }
}

/// Declaration of the type of the expression under the cursor.
pub fn goto_type_definition(db: Db<'_>, file: &Arc<File>, offset: TextSize) -> GotoResult {
    let Some(leaf) = leaf_at(file, offset) else {
        return GotoResult::empty();
    };
    let ty = db.infer(&leaf);
    match ty.unwrap_option().anchor() {
        Some(decl) => GotoResult::single(GotoTarget::from(decl)),
        None => GotoResult::empty(),
    }
}

/// Implementers of the trait, or overriding methods of the trait method,
/// under the cursor.
pub fn goto_implementation(db: Db<'_>, file: &Arc<File>, offset: TextSize) -> GotoResult {
    let Some(decl) = leaf_at(file, offset).and_then(|leaf| db.resolve(&leaf)) else {
        return GotoResult::empty();
    };
    GotoResult::multiple(
        implementations_of(db, &decl)
            .iter()
            .map(GotoTarget::from)
            .collect(),
    )
}

fn import_target(db: Db<'_>, leaf: &Node) -> Option<Arc<File>> {
    if leaf.kind() != SyntaxKind::STRING {
        return None;
    }
    leaf.parent_of_kind(&[SyntaxKind::IMPORT])?;
    let uri = db.imports().resolve(leaf.file().uri(), unquote(leaf.text()))?;
    db.file(&uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::test_db::{TestDb, word_offset};

    fn offset(t: &TestDb, path: &str, word: &str, nth: usize) -> TextSize {
        let file = t.file(path);
        TextSize::new(word_offset(file.text(), word, nth).unwrap() as u32)
    }

    #[test]
    fn jumps_to_declaration_in_other_file() {
        let t = TestDb::new(&[
            ("/p/a.tact", "import \"./b\";\nfun f() { helper(); }"),
            ("/p/b.tact", "fun helper() {}"),
        ]);
        let file = t.file("/p/a.tact");
        let result = goto_definition(t.db(), &file, offset(&t, "/p/a.tact", "helper", 1));
        assert_eq!(result.targets.len(), 1);
        let target = &result.targets[0];
        assert_eq!(target.uri.as_str(), "/p/b.tact");
        assert_eq!(u32::from(target.range.start()), 4);
        assert_eq!(target.kind, Some(DeclKind::Function));
    }

    #[test]
    fn import_path_jumps_to_file() {
        let t = TestDb::new(&[
            ("/p/a.tact", "import \"./b\";"),
            ("/p/b.tact", "fun helper() {}"),
        ]);
        let file = t.file("/p/a.tact");
        let result = goto_definition(t.db(), &file, TextSize::new(9));
        assert_eq!(result.targets[0].uri.as_str(), "/p/b.tact");
        assert_eq!(result.targets[0].kind, None);
    }

    #[test]
    fn type_definition_of_variable() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "struct Point { x: Int; }\nfun f(p: Point?) { let q = p; }",
        )]);
        let file = t.file("/p/a.tact");
        let result = goto_type_definition(t.db(), &file, offset(&t, "/p/a.tact", "q", 1));
        assert_eq!(&*result.targets[0].name, "Point");
    }

    #[test]
    fn nothing_for_unresolved_names() {
        let t = TestDb::new(&[("/p/a.tact", "fun f() { missing(); }")]);
        let file = t.file("/p/a.tact");
        assert!(goto_definition(t.db(), &file, offset(&t, "/p/a.tact", "missing", 1)).is_empty());
    }

    #[test]
    fn implementations_of_trait() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "trait T {}\ncontract A with T {}\ncontract B with T {}",
        )]);
        let file = t.file("/p/a.tact");
        let result = goto_implementation(t.db(), &file, offset(&t, "/p/a.tact", "T", 1));
        let names: Vec<_> = result.targets.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, ["A", "B"]);
    }
}
