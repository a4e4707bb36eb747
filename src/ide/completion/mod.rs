//! Code completion.
//!
//! A [`CompletionContext`] describes the cursor position; each
//! [`CompletionProvider`] that is available there adds items to one
//! [`CompletionResult`]. Providers run in a fixed order, and a label added
//! twice keeps the lighter item.

mod context;
mod item;
mod keywords;
mod members;
mod reference;

use tracing::debug;

use crate::base::TextSize;
use crate::hir::{Db, File};

pub use context::{CompletionContext, DUMMY_IDENTIFIER};
pub use item::{CompletionItem, CompletionKind, CompletionResult, weight};
pub use keywords::{KeywordCompletionProvider, SelfCompletionProvider};
pub use members::MemberCompletionProvider;
pub use reference::ReferenceCompletionProvider;

/// One source of completion items.
pub trait CompletionProvider: Sync {
    fn is_available(&self, ctx: &CompletionContext<'_>) -> bool;

    fn add_completion(&self, ctx: &CompletionContext<'_>, result: &mut CompletionResult);
}

/// Providers in the order they run.
pub static DEFAULT_PROVIDERS: &[&dyn CompletionProvider] = &[
    &ReferenceCompletionProvider,
    &MemberCompletionProvider,
    &SelfCompletionProvider,
    &KeywordCompletionProvider,
];

/// Completion items at `offset` in `file`, lightest first.
pub fn completions(db: Db<'_>, file: &File, offset: TextSize) -> Vec<CompletionItem> {
    completions_with(db, file, offset, DEFAULT_PROVIDERS)
}

pub fn completions_with(
    db: Db<'_>,
    file: &File,
    offset: TextSize,
    providers: &[&dyn CompletionProvider],
) -> Vec<CompletionItem> {
    let Some(ctx) = CompletionContext::new(db, file, offset) else {
        debug!(file = %file.uri(), ?offset, "no completion context");
        return Vec::new();
    };
    let mut result = CompletionResult::new();
    for provider in providers {
        if provider.is_available(&ctx) {
            provider.add_completion(&ctx, &mut result);
        }
    }
    debug!(file = %file.uri(), ?offset, items = result.len(), "completion");
    result.into_sorted()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;

    #[test]
    fn nothing_inside_comments() {
        let items = complete("// fo|\nfun foo() {}", &[]);
        assert!(items.is_empty());
    }

    #[test]
    fn locals_then_keywords() {
        let items = complete("fun f() { let value = 1; va| }", &[]);
        let found = labels(&items);
        let value = found.iter().position(|l| l == "value").unwrap();
        let keyword = found.iter().position(|l| l == "let").unwrap();
        assert!(value < keyword);
    }
}
