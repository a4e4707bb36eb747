//! Completion items and the weighted result set.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Function,
    /// Member function or extension function.
    Method,
    Field,
    Variable,
    Constant,
    Struct,
    Message,
    Trait,
    Contract,
    Primitive,
    Keyword,
    Snippet,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Method => 2,
            CompletionKind::Function => 3,
            CompletionKind::Field => 5,
            CompletionKind::Variable => 6,
            CompletionKind::Contract => 7,
            CompletionKind::Trait => 8,
            CompletionKind::Keyword => 14,
            CompletionKind::Snippet => 15,
            CompletionKind::Constant => 21,
            CompletionKind::Struct | CompletionKind::Message => 22,
            CompletionKind::Primitive => 25,
        }
    }
}

/// Sort groups, lower first.
pub mod weight {
    pub const CONTEXT_ELEMENT: u8 = 0;
    pub const FUNCTION: u8 = 1;
    pub const FIELD: u8 = 2;
    pub const STRUCT: u8 = 2;
    pub const VARIABLE: u8 = 3;
    pub const CONSTANT: u8 = 3;
    pub const TRAIT: u8 = 3;
    pub const KEYWORD: u8 = 4;
    pub const LOWEST: u8 = 9;
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// Text shown in the list; also the de-duplication key.
    pub label: Arc<str>,
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// `insert_text` uses `$1`/`$0` snippet placeholders.
    pub is_snippet: bool,
    pub weight: u8,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            is_snippet: false,
            weight: weight::LOWEST,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(snippet.into());
        self.is_snippet = true;
        self
    }

    pub fn with_weight(mut self, weight: u8) -> Self {
        self.weight = weight;
        self
    }

    /// `<weight><label>`, what editors sort on.
    pub fn sort_text(&self) -> String {
        format!("{}{}", self.weight, self.label)
    }

    /// Text the item inserts.
    pub fn insert(&self) -> &str {
        self.insert_text.as_deref().unwrap_or(&self.label)
    }
}

/// Items keyed by label. Adding a label twice keeps the lighter item, or the
/// first one on equal weight.
#[derive(Debug, Default)]
pub struct CompletionResult {
    items: IndexMap<Arc<str>, CompletionItem>,
}

impl CompletionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CompletionItem) {
        match self.items.entry(Arc::clone(&item.label)) {
            Entry::Occupied(mut slot) => {
                if item.weight < slot.get().weight {
                    slot.insert(item);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.items.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items by weight, insertion order within a weight.
    pub fn into_sorted(self) -> Vec<CompletionItem> {
        let mut items: Vec<CompletionItem> = self.items.into_values().collect();
        items.sort_by_key(|item| item.weight);
        items
    }
}
