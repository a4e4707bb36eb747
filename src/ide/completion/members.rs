//! Member templates inside a contract or trait body, plus overrides of
//! inherited members.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::hir::{Decl, MembersOwner};

use super::context::CompletionContext;
use super::item::{CompletionItem, CompletionKind, CompletionResult, weight};
use super::CompletionProvider;

/// `(label, snippet)` offered in every contract and trait body.
const MEMBER_TEMPLATES: &[(&str, &str)] = &[
    ("fun", "fun $1($2)$3 {\n\t$0\n}"),
    ("inline fun", "inline fun $1($2)$3 {\n\t$0\n}"),
    ("get fun", "get fun $1($2)$3 {\n\t$0\n}"),
    ("const", "const $1: $2 = $0;"),
    ("receive", "receive($1) {\n\t$0\n}"),
    ("external", "external($1) {\n\t$0\n}"),
    ("bounced", "bounced($1) {\n\t$0\n}"),
];

const TRAIT_TEMPLATES: &[(&str, &str)] = &[
    ("abstract fun", "abstract fun $1($2)$3;"),
    ("virtual fun", "virtual fun $1($2)$3 {\n\t$0\n}"),
    ("abstract const", "abstract const $1: $0;"),
    ("virtual const", "virtual const $1: $2 = $0;"),
];

pub struct MemberCompletionProvider;

impl CompletionProvider for MemberCompletionProvider {
    fn is_available(&self, ctx: &CompletionContext<'_>) -> bool {
        ctx.top_level_in_trait_or_contract
    }

    fn add_completion(&self, ctx: &CompletionContext<'_>, result: &mut CompletionResult) {
        let Some(owner) = ctx.owner() else {
            return;
        };
        let Some(members) = owner.as_members_owner() else {
            return;
        };

        for (label, snippet) in MEMBER_TEMPLATES {
            result.add(template(label, snippet));
        }
        if ctx.inside_trait {
            for (label, snippet) in TRAIT_TEMPLATES {
                result.add(template(label, snippet));
            }
        }
        if !ctx.inside_trait && members.init_function().is_none() {
            result.add(template("init", "init($1) {\n\t$0\n}"));
        }

        add_overrides(ctx, members, result);
    }
}

fn template(label: &str, snippet: &str) -> CompletionItem {
    CompletionItem::new(label, CompletionKind::Snippet)
        .with_snippet(snippet)
        .with_weight(weight::KEYWORD)
}

/// Abstract, virtual and override members of inherited traits not yet
/// redefined in the body.
fn add_overrides(
    ctx: &CompletionContext<'_>,
    owner: &dyn MembersOwner,
    result: &mut CompletionResult,
) {
    let own: FxHashSet<SmolStr> = owner
        .own_methods()
        .iter()
        .map(|m| m.name())
        .chain(owner.own_constants().iter().map(|c| c.name()))
        .collect();
    let mut offered = FxHashSet::default();

    for parent in owner.inherited_traits(ctx.db) {
        for method in parent.methods(ctx.db) {
            let name = method.name();
            let overridable = method.is_abstract() || method.is_virtual() || method.is_override();
            if !overridable || own.contains(&name) || !offered.insert(name.clone()) {
                continue;
            }
            let signature = method.signature();
            let trait_name = method.owner().map(|o| o.name()).unwrap_or_default();
            result.add(
                CompletionItem::new(format!("override {signature}"), CompletionKind::Method)
                    .with_detail(format!("of {trait_name}"))
                    .with_snippet(format!("override {signature} {{\n\t$0\n}}"))
                    .with_weight(weight::CONTEXT_ELEMENT),
            );
        }
        for constant in parent.constants(ctx.db) {
            let name = constant.name();
            let overridable = constant.is_abstract() || constant.is_virtual();
            if !overridable || own.contains(&name) || !offered.insert(name.clone()) {
                continue;
            }
            let ty = constant
                .type_node()
                .map(|t| t.text().to_string())
                .unwrap_or_default();
            result.add(
                CompletionItem::new(format!("override const {name}"), CompletionKind::Constant)
                    .with_detail(ty.clone())
                    .with_snippet(format!("override const {name}: {ty} = $0;"))
                    .with_weight(weight::CONTEXT_ELEMENT),
            );
        }
    }
}
