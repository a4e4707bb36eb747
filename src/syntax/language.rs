//! Per-language parser hooks.
//!
//! The analysis core never calls a parser directly. Each language registers a
//! [`LanguageSupport`] that turns text into a tree and says which node kinds
//! declare something. Files in languages without semantic support are still
//! cached so imports and renames can see them.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::FileUri;
use crate::base::constants::{FIFT_EXTS, FUNC_EXTS, TACT_EXT, TLB_EXT};
use crate::parser::{self, Parse, RawTree, SyntaxKind, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Tact,
    Func,
    Fift,
    Tlb,
}

impl LanguageId {
    pub fn from_extension(ext: &str) -> Option<LanguageId> {
        if ext == TACT_EXT {
            Some(LanguageId::Tact)
        } else if FUNC_EXTS.contains(&ext) {
            Some(LanguageId::Func)
        } else if FIFT_EXTS.contains(&ext) {
            Some(LanguageId::Fift)
        } else if ext == TLB_EXT {
            Some(LanguageId::Tlb)
        } else {
            None
        }
    }

    pub fn from_uri(uri: &FileUri) -> Option<LanguageId> {
        uri.extension().and_then(Self::from_extension)
    }

    pub fn name(self) -> &'static str {
        match self {
            LanguageId::Tact => "tact",
            LanguageId::Func => "func",
            LanguageId::Fift => "fift",
            LanguageId::Tlb => "tlb",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declaration variant a node kind introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Function,
    Contract,
    Trait,
    Field,
    Constant,
    Parameter,
    Variable,
    MessageType,
    Primitive,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Function => "function",
            DeclKind::Contract => "contract",
            DeclKind::Trait => "trait",
            DeclKind::Field => "field",
            DeclKind::Constant => "constant",
            DeclKind::Parameter => "parameter",
            DeclKind::Variable => "variable",
            DeclKind::MessageType => "message type",
            DeclKind::Primitive => "primitive",
        }
    }
}

pub trait LanguageSupport: Send + Sync {
    fn language(&self) -> LanguageId;

    fn parse(&self, text: &str) -> Parse;

    /// Classification table: which declaration a node of `kind` introduces.
    fn classify(&self, kind: SyntaxKind) -> Option<DeclKind>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TactLanguage;

impl LanguageSupport for TactLanguage {
    fn language(&self) -> LanguageId {
        LanguageId::Tact
    }

    fn parse(&self, text: &str) -> Parse {
        parser::parse(text)
    }

    fn classify(&self, kind: SyntaxKind) -> Option<DeclKind> {
        let decl = match kind {
            SyntaxKind::GLOBAL_FUNCTION
            | SyntaxKind::NATIVE_FUNCTION
            | SyntaxKind::ASM_FUNCTION
            | SyntaxKind::STORAGE_FUNCTION
            | SyntaxKind::INIT_FUNCTION => DeclKind::Function,
            SyntaxKind::CONTRACT => DeclKind::Contract,
            SyntaxKind::TRAIT => DeclKind::Trait,
            SyntaxKind::FIELD | SyntaxKind::STORAGE_VARIABLE => DeclKind::Field,
            SyntaxKind::GLOBAL_CONSTANT | SyntaxKind::STORAGE_CONSTANT => DeclKind::Constant,
            SyntaxKind::PARAMETER => DeclKind::Parameter,
            SyntaxKind::LET_STATEMENT | SyntaxKind::DESTRUCT_BIND => DeclKind::Variable,
            SyntaxKind::STRUCT | SyntaxKind::MESSAGE => DeclKind::MessageType,
            SyntaxKind::PRIMITIVE => DeclKind::Primitive,
            _ => return None,
        };
        Some(decl)
    }
}

/// Holds the text of a file without analysing it.
#[derive(Debug, Clone, Copy)]
pub struct TextOnlyLanguage(pub LanguageId);

impl LanguageSupport for TextOnlyLanguage {
    fn language(&self) -> LanguageId {
        self.0
    }

    fn parse(&self, text: &str) -> Parse {
        Parse {
            tree: RawTree::single(SyntaxKind::SOURCE_FILE, TextSize::of(text)),
            errors: Vec::new(),
        }
    }

    fn classify(&self, _kind: SyntaxKind) -> Option<DeclKind> {
        None
    }
}

/// Registered languages, keyed by id.
#[derive(Clone)]
pub struct LanguageRegistry {
    supports: FxHashMap<LanguageId, Arc<dyn LanguageSupport>>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        let mut registry = Self {
            supports: FxHashMap::default(),
        };
        registry.register(Arc::new(TactLanguage));
        for id in [LanguageId::Func, LanguageId::Fift, LanguageId::Tlb] {
            registry.register(Arc::new(TextOnlyLanguage(id)));
        }
        registry
    }
}

impl LanguageRegistry {
    /// Replaces any support previously registered for the same language.
    pub fn register(&mut self, support: Arc<dyn LanguageSupport>) {
        self.supports.insert(support.language(), support);
    }

    pub fn get(&self, id: LanguageId) -> Option<&Arc<dyn LanguageSupport>> {
        self.supports.get(&id)
    }
}

impl fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.supports.keys().map(|id| id.name()).collect();
        ids.sort_unstable();
        f.debug_struct("LanguageRegistry").field("languages", &ids).finish()
    }
}
