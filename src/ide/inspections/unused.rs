//! Locals and parameters that are never read.

use std::sync::Arc;

use crate::hir::{
    Db, Decl, Declaration, Diagnostic, DiagnosticCollector, DiagnosticTag, File, Function,
    IndexKey, Node, Referent, codes,
};
use crate::parser::{Field as NodeField, SyntaxKind};
use crate::syntax::visit;

use super::Inspection;

fn is_ignored(name: &str) -> bool {
    name.is_empty() || name == "_"
}

pub struct UnusedVariableInspection;

impl Inspection for UnusedVariableInspection {
    fn id(&self) -> &'static str {
        codes::UNUSED_VARIABLE
    }

    fn inspect(&self, db: Db<'_>, file: &Arc<File>, sink: &mut DiagnosticCollector) {
        let root = Node::root(Arc::clone(file));
        let mut names = Vec::new();
        visit(Some(root.syntax()), |syntax| {
            let bound = match syntax.kind() {
                SyntaxKind::LET_STATEMENT => syntax.child_by_field(NodeField::Name),
                SyntaxKind::DESTRUCT_BIND => syntax
                    .child_by_field(NodeField::Bind)
                    .or_else(|| syntax.child_by_field(NodeField::Name)),
                _ => None,
            };
            if let Some(name) = bound {
                names.push(root.with_syntax(name));
            }
            true
        });

        for name in names {
            if is_ignored(name.text()) {
                continue;
            }
            let Some(decl) = Declaration::from_name(&name) else {
                continue;
            };
            if Referent::new(db, decl).has_references() {
                continue;
            }
            sink.add(
                Diagnostic::hint(&name, format!("Variable '{}' is never used", name.text()))
                    .with_code(codes::UNUSED_VARIABLE)
                    .with_tag(DiagnosticTag::Unnecessary),
            );
        }
    }
}

pub struct UnusedParameterInspection;

impl Inspection for UnusedParameterInspection {
    fn id(&self) -> &'static str {
        codes::UNUSED_PARAMETER
    }

    fn inspect(&self, db: Db<'_>, file: &Arc<File>, sink: &mut DiagnosticCollector) {
        let index = db.file_index(file);
        let mut functions: Vec<Function> = Vec::new();
        for decl in index
            .elements(IndexKey::Funs)
            .iter()
            .chain(index.elements(IndexKey::Methods))
        {
            if let Declaration::Function(f) = decl {
                functions.push(f.clone());
            }
        }
        for key in [IndexKey::Contracts, IndexKey::Traits] {
            for decl in index.elements(key) {
                if let Some(owner) = decl.as_members_owner() {
                    functions.extend(owner.own_methods());
                }
            }
        }

        for function in functions {
            // abstract and native declarations have nothing to read them
            if !function.has_body() {
                continue;
            }
            for param in function.parameters() {
                let name = param.name();
                if is_ignored(&name) || name == "self" {
                    continue;
                }
                let Some(name_node) = param.name_node() else {
                    continue;
                };
                if Referent::new(db, Declaration::Parameter(param)).has_references() {
                    continue;
                }
                sink.add(
                    Diagnostic::hint(&name_node, format!("Parameter '{name}' is never used"))
                        .with_code(codes::UNUSED_PARAMETER)
                        .with_tag(DiagnosticTag::Unnecessary),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::FileOrigin;
    use crate::hir::test_db::TestDb;
    use crate::ide::inspections::test_support::findings;

    fn unused_variables(src: &str) -> Vec<String> {
        let t = TestDb::new(&[("/p/a.tact", src)]);
        findings(&t, "/p/a.tact", &UnusedVariableInspection)
            .into_iter()
            .map(|(_, text)| text)
            .collect()
    }

    #[test]
    fn unused_local_is_reported_once() {
        assert_eq!(unused_variables("fun f() { let x = 1; let y = 2; return y; }"), ["x"]);
    }

    #[test]
    fn use_in_destructuring_counts() {
        let src = "struct S { a: Int; }\n\
                   fun f() { let s = S { a: 1 }; let S { a } = s; return a; }";
        assert!(unused_variables(src).is_empty());
    }

    #[test]
    fn destructured_binds_are_checked() {
        let src = "struct S { a: Int; b: Int; }\n\
                   fun f(s: S): Int { let S { a, b: other } = s; return a; }";
        assert_eq!(unused_variables(src), ["other"]);
    }

    #[test]
    fn underscore_is_ignored() {
        assert!(unused_variables("fun f() { let _ = 1; }").is_empty());
    }

    #[test]
    fn unused_parameters_in_functions_and_methods() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "fun f(a: Int, b: Int): Int { return b; }\n\
             extends fun g(self: Int, c: Int) {}\n\
             trait T { abstract fun h(d: Int); }\n\
             contract C { fun m(e: Int) { let z = e; } }",
        )]);
        let found: Vec<_> = findings(&t, "/p/a.tact", &UnusedParameterInspection)
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        assert_eq!(found, ["a", "c"]);
    }

    #[test]
    fn stdlib_files_are_exempt() {
        let mut t = TestDb::new(&[]);
        t.add("/std/a.tact", "fun f() { let x = 1; }", FileOrigin::Stdlib);
        let file = t.file("/std/a.tact");
        assert!(!UnusedVariableInspection.is_available(&file));
    }
}
