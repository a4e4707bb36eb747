//! Keywords and statement templates.

use super::context::CompletionContext;
use super::item::{CompletionItem, CompletionKind, CompletionResult, weight};
use super::CompletionProvider;

const TOP_LEVEL: &[(&str, &str)] = &[
    ("import", "import \"$1\";"),
    ("primitive", "primitive $1;"),
    ("struct", "struct $1 {\n\t$0\n}"),
    ("message", "message $1 {\n\t$0\n}"),
    ("contract", "contract $1 {\n\t$0\n}"),
    ("trait", "trait $1 {\n\t$0\n}"),
    ("fun", "fun $1($2)$3 {\n\t$0\n}"),
    ("extends fun", "extends fun $1(self: $2)$3 {\n\t$0\n}"),
    ("asm fun", "asm fun $1($2)$3 {\n\t$0\n}"),
    ("const", "const $1: $2 = $0;"),
];

const STATEMENTS: &[(&str, &str)] = &[
    ("let", "let $1 = $0;"),
    ("return", "return $0;"),
    ("if", "if ($1) {\n\t$0\n}"),
    ("if else", "if ($1) {\n\t$2\n} else {\n\t$0\n}"),
    ("while", "while ($1) {\n\t$0\n}"),
    ("repeat", "repeat ($1) {\n\t$0\n}"),
    ("do", "do {\n\t$0\n} until ($1);"),
    ("foreach", "foreach ($1, $2 in $3) {\n\t$0\n}"),
    ("try", "try {\n\t$0\n}"),
    ("try catch", "try {\n\t$1\n} catch ($2) {\n\t$0\n}"),
];

const EXPRESSIONS: &[(&str, &str)] = &[
    ("true", "true"),
    ("false", "false"),
    ("null", "null"),
    ("initOf", "initOf $1($0)"),
];

pub struct KeywordCompletionProvider;

impl CompletionProvider for KeywordCompletionProvider {
    fn is_available(&self, ctx: &CompletionContext<'_>) -> bool {
        ctx.top_level || (ctx.is_expression && !ctx.after_dot && !ctx.in_name_of_field_init)
    }

    fn add_completion(&self, ctx: &CompletionContext<'_>, result: &mut CompletionResult) {
        let mut groups = Vec::new();
        if ctx.top_level {
            groups.push(TOP_LEVEL);
        }
        if ctx.is_statement {
            groups.push(STATEMENTS);
        }
        if ctx.is_expression && !ctx.after_dot && !ctx.in_name_of_field_init {
            groups.push(EXPRESSIONS);
        }
        for (label, text) in groups.into_iter().flatten() {
            let item = CompletionItem::new(*label, CompletionKind::Keyword)
                .with_weight(weight::KEYWORD);
            let item = if label == text {
                item
            } else {
                item.with_snippet(*text)
            };
            result.add(item);
        }
    }
}

/// `self` inside contract and trait members.
pub struct SelfCompletionProvider;

impl CompletionProvider for SelfCompletionProvider {
    fn is_available(&self, ctx: &CompletionContext<'_>) -> bool {
        ctx.is_expression
            && ctx.inside_trait_or_contract
            && !ctx.after_dot
            && !ctx.in_name_of_field_init
    }

    fn add_completion(&self, _ctx: &CompletionContext<'_>, result: &mut CompletionResult) {
        result.add(
            CompletionItem::new("self", CompletionKind::Keyword).with_weight(weight::LOWEST),
        );
    }
}
