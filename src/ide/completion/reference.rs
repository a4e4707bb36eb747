//! Names in scope: locals, members, globals and imported declarations.

use crate::hir::{
    Decl, Declaration, Function, ResolveState, Resolver, ScopeProcessor, type_ref_text,
};
use crate::parser::Field as NodeField;

use super::context::{CompletionContext, DUMMY_IDENTIFIER};
use super::item::{CompletionItem, CompletionKind, CompletionResult, weight};
use super::CompletionProvider;

const HIDDEN: &[&str] = &["AnyStruct", "AnyMessage"];
const STATIC_PREFIXES: &[&str] = &["AnyStruct_", "AnyMessage_"];

pub struct ReferenceCompletionProvider;

impl CompletionProvider for ReferenceCompletionProvider {
    fn is_available(&self, ctx: &CompletionContext<'_>) -> bool {
        ctx.is_type || ctx.is_expression || ctx.in_name_of_field_init
    }

    fn add_completion(&self, ctx: &CompletionContext<'_>, result: &mut CompletionResult) {
        let initialized = initialized_fields(ctx);
        let mut processor = ReferenceCompletionProcessor {
            ctx,
            result,
            initialized,
        };
        Resolver::new(ctx.db).process_resolve_variants(
            &ctx.element,
            &mut processor,
            &ResolveState::completion(),
        );
    }
}

struct ReferenceCompletionProcessor<'c, 'a> {
    ctx: &'c CompletionContext<'a>,
    result: &'c mut CompletionResult,
    /// Field names already written in the surrounding instance or destructuring.
    initialized: Vec<String>,
}

impl ScopeProcessor for ReferenceCompletionProcessor<'_, '_> {
    fn execute(&mut self, decl: &Declaration, state: &ResolveState) -> bool {
        let name = decl.name();
        if name.is_empty() || name.ends_with(DUMMY_IDENTIFIER) || HIDDEN.contains(&name.as_str())
        {
            return true;
        }
        let name = STATIC_PREFIXES
            .iter()
            .find_map(|p| name.strip_prefix(p))
            .unwrap_or(name.as_str())
            .to_string();
        if let Some(item) = self.item(decl, name, state.prefix.unwrap_or("")) {
            self.result.add(item);
        }
        true
    }
}

impl ReferenceCompletionProcessor<'_, '_> {
    fn item(&self, decl: &Declaration, name: String, prefix: &str) -> Option<CompletionItem> {
        let ctx = self.ctx;
        if ctx.inside_trait_list {
            return match decl {
                Declaration::Trait(t)
                    if !t.is_base_trait() && !t.node().contains(&ctx.element) =>
                {
                    Some(
                        CompletionItem::new(name, CompletionKind::Trait)
                            .with_weight(weight::CONTEXT_ELEMENT),
                    )
                }
                _ => None,
            };
        }
        if ctx.in_name_of_field_init {
            return self.field_init_item(decl, name, prefix);
        }

        let label = format!("{prefix}{name}");
        let item = match decl {
            Declaration::Function(f) => {
                if ctx.is_type {
                    return None;
                }
                self.function_item(f, label)
            }
            Declaration::MessageType(m) => {
                let kind = if m.is_message() {
                    CompletionKind::Message
                } else {
                    CompletionKind::Struct
                };
                let item = CompletionItem::new(label.as_str(), kind)
                    .with_detail(if m.is_message() { "message" } else { "struct" })
                    .with_weight(weight::STRUCT);
                if ctx.is_expression && !ctx.after_dot && !ctx.before_paren {
                    item.with_snippet(format!("{label}{{$0}}"))
                } else {
                    item
                }
            }
            Declaration::Primitive(_) => {
                if !ctx.is_type {
                    return None;
                }
                CompletionItem::new(label, CompletionKind::Primitive)
                    .with_detail("primitive")
                    .with_weight(weight::STRUCT)
            }
            _ if ctx.is_type => return None,
            Declaration::Trait(_) | Declaration::Contract(_) => return None,
            Declaration::Constant(c) => {
                let mut detail = type_ref_text(c.node(), NodeField::Type)
                    .map(|ty| format!(": {ty}"))
                    .unwrap_or_default();
                if let Some(value) = c.value() {
                    detail.push_str(" = ");
                    detail.push_str(value.text());
                }
                CompletionItem::new(label, CompletionKind::Constant)
                    .with_detail(detail)
                    .with_weight(weight::CONSTANT)
            }
            Declaration::Field(f) => {
                let detail = type_ref_text(f.node(), NodeField::Type)
                    .map(|ty| format!(": {ty}"))
                    .unwrap_or_default();
                CompletionItem::new(label, CompletionKind::Field)
                    .with_detail(detail)
                    .with_weight(weight::FIELD)
            }
            Declaration::Parameter(p) => CompletionItem::new(label, CompletionKind::Variable)
                .with_detail(p.presentation())
                .with_weight(weight::VARIABLE),
            Declaration::Variable(v) => {
                let ty = ctx.db.infer(v.node());
                let item = CompletionItem::new(label, CompletionKind::Variable)
                    .with_weight(weight::VARIABLE);
                if ty.is_unknown() {
                    item
                } else {
                    item.with_detail(format!(": {}", ty.name()))
                }
            }
        };
        let item = match decl.doc_comment() {
            Some(doc) if !decl.is_local() => item.with_documentation(doc),
            _ => item,
        };
        Some(item)
    }

    fn function_item(&self, f: &Function, label: String) -> CompletionItem {
        let ctx = self.ctx;
        let kind = if f.owner().is_some() || f.with_self() {
            CompletionKind::Method
        } else {
            CompletionKind::Function
        };
        let item = CompletionItem::new(label.as_str(), kind)
            .with_detail(f.signature())
            .with_weight(weight::FUNCTION);
        if ctx.before_paren {
            return item;
        }
        let has_args = f.parameters().len() > usize::from(f.with_self());
        let args = if has_args { "($1)" } else { "()" };
        let semicolon = if ctx.is_statement && !ctx.before_semicolon { ";" } else { "" };
        item.with_snippet(format!("{label}{args}{semicolon}$0"))
    }

    /// `Foo { na| }`: fields of `Foo` not yet written, then locals for the
    /// shorthand form.
    fn field_init_item(
        &self,
        decl: &Declaration,
        name: String,
        prefix: &str,
    ) -> Option<CompletionItem> {
        if !prefix.is_empty() {
            return None;
        }
        match decl {
            Declaration::Field(f) => {
                if self.initialized.contains(&name) {
                    return None;
                }
                let detail = type_ref_text(f.node(), NodeField::Type)
                    .map(|ty| format!(": {ty}"))
                    .unwrap_or_default();
                Some(
                    CompletionItem::new(name.as_str(), CompletionKind::Field)
                        .with_detail(detail)
                        .with_insert_text(format!("{name}: "))
                        .with_weight(weight::CONTEXT_ELEMENT),
                )
            }
            Declaration::Variable(_) | Declaration::Parameter(_) => Some(
                CompletionItem::new(name, CompletionKind::Variable)
                    .with_weight(weight::VARIABLE),
            ),
            _ => None,
        }
    }
}

fn initialized_fields(ctx: &CompletionContext<'_>) -> Vec<String> {
    if !ctx.in_name_of_field_init {
        return Vec::new();
    }
    let Some(arg) = ctx.element.parent() else {
        return Vec::new();
    };
    let Some(list) = arg.parent() else {
        return Vec::new();
    };
    let kind = arg.kind();
    list.children_of_kind(kind)
        .into_iter()
        .filter(|sibling| *sibling != arg)
        .filter_map(|sibling| sibling.child_by_field(NodeField::Name))
        .map(|name| name.text().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::ide::completion::test_support::*;
    use crate::ide::completion::CompletionKind;

    #[test]
    fn locals_parameters_and_globals() {
        let items = complete(
            "const LIMIT: Int = 10;\nfun helper(): Int { return 1; }\n\
             fun f(count: Int) { let total = 1; | }",
            &[],
        );
        let found = labels(&items);
        for expected in ["total", "count", "LIMIT", "helper"] {
            assert!(found.contains(&expected.to_string()), "{expected} in {found:?}");
        }
        assert_eq!(find(&items, "total").detail.as_deref(), Some(": Int"));
        assert_eq!(find(&items, "helper").insert(), "helper();$0");
    }

    #[test]
    fn function_with_arguments_gets_placeholder() {
        let items = complete(
            "fun add(a: Int, b: Int): Int { return a + b; }\nfun f() { let x = ad|; }",
            &[],
        );
        let add = find(&items, "add");
        assert_eq!(add.insert(), "add($1)$0");
        assert_eq!(add.detail.as_deref(), Some("fun add(a: Int, b: Int): Int"));
    }

    #[test]
    fn contract_members_come_with_self_prefix() {
        let items = complete(
            "contract C {\n  balance: Int;\n  fun touch() {}\n  fun f() { | }\n}",
            &[],
        );
        let found = labels(&items);
        assert!(found.contains(&"self.balance".to_string()), "{found:?}");
        assert!(found.contains(&"self.touch".to_string()), "{found:?}");
        assert!(!found.contains(&"balance".to_string()));
    }

    #[test]
    fn member_access_lists_fields_and_methods() {
        let items = complete(
            "struct Point { x: Int; y: Int; }\n\
             extends fun norm(self: Point): Int { return self.x; }\n\
             fun f(p: Point) { p.| }",
            &[],
        );
        let found = labels(&items);
        for expected in ["x", "y", "norm"] {
            assert!(found.contains(&expected.to_string()), "{expected} in {found:?}");
        }
        assert_eq!(find(&items, "norm").kind, CompletionKind::Method);
    }

    #[test]
    fn type_position_offers_types_only() {
        let items = complete(
            "primitive Int;\nstruct Point { x: Int; }\nfun helper() {}\nfun f() { let p: | = 1; }",
            &[],
        );
        let found = labels(&items);
        assert!(found.contains(&"Point".to_string()));
        assert!(found.contains(&"Int".to_string()));
        assert!(!found.contains(&"helper".to_string()));
        assert!(!found.contains(&"f".to_string()));
    }

    #[test]
    fn trait_list_offers_traits_only() {
        let items = complete(
            "trait Ownable {}\ntrait BaseTrait {}\nstruct S {}\ncontract C with | {}",
            &[],
        );
        assert_eq!(labels(&items), ["Ownable"]);
        assert_eq!(items[0].kind, CompletionKind::Trait);
    }

    #[test]
    fn field_init_offers_missing_fields() {
        let items = complete(
            "struct Point { x: Int; y: Int; }\nfun f(): Point { return Point { x: 1, | }; }",
            &[],
        );
        let found = labels(&items);
        assert!(found.contains(&"y".to_string()), "{found:?}");
        assert!(!found.contains(&"x".to_string()), "{found:?}");
        assert_eq!(find(&items, "y").insert(), "y: ");
    }

    #[test]
    fn declarations_from_other_files() {
        let items = complete(
            "import \"./lib\";\nfun f() { | }",
            &[("/p/lib.tact", "fun shared() {}")],
        );
        assert!(labels(&items).contains(&"shared".to_string()));
    }

    #[test]
    fn message_in_expression_inserts_instance() {
        let items = complete(
            "message Transfer { amount: Int; }\nfun f() { let m = Tra|; }",
            &[],
        );
        let transfer = find(&items, "Transfer");
        assert_eq!(transfer.kind, CompletionKind::Message);
        assert_eq!(transfer.insert(), "Transfer{$0}");
    }
}
