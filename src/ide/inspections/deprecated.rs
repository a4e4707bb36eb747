use std::sync::Arc;

use crate::hir::{
    Db, Decl, Declaration, Diagnostic, DiagnosticCollector, DiagnosticTag, File, Node, codes,
    is_name_occurrence,
};
use crate::parser::SyntaxKind;
use crate::syntax::visit;

use super::Inspection;

/// Uses of declarations whose documentation says `Deprecated`.
pub struct DeprecatedSymbolUsageInspection;

impl Inspection for DeprecatedSymbolUsageInspection {
    fn id(&self) -> &'static str {
        codes::DEPRECATED_SYMBOL_USAGE
    }

    fn is_available(&self, _file: &File) -> bool {
        true
    }

    fn inspect(&self, db: Db<'_>, file: &Arc<File>, sink: &mut DiagnosticCollector) {
        let root = Node::root(Arc::clone(file));
        let mut occurrences = Vec::new();
        visit(Some(root.syntax()), |syntax| {
            if matches!(
                syntax.kind(),
                SyntaxKind::IDENTIFIER | SyntaxKind::TYPE_IDENTIFIER
            ) {
                occurrences.push(root.with_syntax(syntax));
            }
            true
        });

        for name in occurrences {
            if !is_name_occurrence(&name) || Declaration::from_name(&name).is_some() {
                continue;
            }
            let Some(decl) = db.resolve(&name) else {
                continue;
            };
            if decl.is_local() || !decl.is_deprecated() {
                continue;
            }
            sink.add(
                Diagnostic::hint(&name, format!("Symbol `{}` is deprecated", decl.name()))
                    .with_code(codes::DEPRECATED_SYMBOL_USAGE)
                    .with_tag(DiagnosticTag::Deprecated),
            );
        }
    }
}
