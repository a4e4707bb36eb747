//! Declarations used through another file's imports.
//!
//! A name resolves through the whole import tree, but only direct imports
//! and the implicitly visible standard library count as imported.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::base::FileUri;
use crate::hir::{
    Db, Decl, Declaration, Diagnostic, DiagnosticCollector, File, Node, RelatedInfo, codes,
};
use crate::parser::{Field as NodeField, SyntaxKind};
use crate::syntax::visit;

use super::Inspection;

pub struct NotImportedSymbolInspection;

impl Inspection for NotImportedSymbolInspection {
    fn id(&self) -> &'static str {
        codes::NOT_IMPORTED_SYMBOL
    }

    fn inspect(&self, db: Db<'_>, file: &Arc<File>, sink: &mut DiagnosticCollector) {
        let imported: FxHashSet<FileUri> = db
            .imports()
            .imported_files(file)
            .iter()
            .map(|f| f.uri().clone())
            .collect();

        let root = Node::root(Arc::clone(file));
        let mut candidates = Vec::new();
        visit(Some(root.syntax()), |syntax| {
            let is_candidate = match syntax.kind() {
                SyntaxKind::TYPE_IDENTIFIER => true,
                SyntaxKind::IDENTIFIER => {
                    syntax.field() == Some(NodeField::Name)
                        && syntax
                            .parent()
                            .is_some_and(|p| p.kind() == SyntaxKind::STATIC_CALL_EXPRESSION)
                }
                _ => false,
            };
            if is_candidate {
                candidates.push(root.with_syntax(syntax));
            }
            true
        });

        for name in candidates {
            if Declaration::from_name(&name).is_some() {
                continue;
            }
            let Some(decl) = db.resolve(&name) else {
                continue;
            };
            if matches!(
                decl,
                Declaration::Primitive(_) | Declaration::Contract(_) | Declaration::Field(_)
            ) || decl.is_local()
            {
                continue;
            }
            let home = decl.node().file();
            if home.uri() == file.uri()
                || home.is_imported_implicitly()
                || imported.contains(home.uri())
                || db.index.has_several_declarations(&decl.name())
            {
                continue;
            }
            let target = decl.name_node().unwrap_or_else(|| decl.node().clone());
            let declared_here = RelatedInfo::at(&target, format!("`{}` is declared here", decl.name()));
            sink.add(
                Diagnostic::warning(&name, "Symbol from another file should be imported explicitly")
                    .with_code(codes::NOT_IMPORTED_SYMBOL)
                    .with_related(declared_here),
            );
        }
    }
}
