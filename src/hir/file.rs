//! Parsed files.
//!
//! A [`File`] is one parse of one URI. It is replaced as a whole on every
//! edit; holders of an older `Arc<File>` keep a fully valid (but stale) tree.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileUri, TextRange};
use crate::parser::{Field, NodeIndex, Parse, SyntaxError, SyntaxKind};
use crate::syntax::{
    DeclKind, Generation, LanguageId, LanguageSupport, SyntaxNode, SyntaxTree,
};

/// Where a file comes from. Stdlib and stub files are imported implicitly;
/// library files (`@stdlib/...`) need an explicit import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOrigin {
    Workspace,
    Stdlib,
    Library,
    Stub,
}

/// An `import "...";` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Path without quotes.
    pub path: SmolStr,
    /// The string literal, quotes included.
    pub range: TextRange,
    pub node: NodeIndex,
}

pub struct File {
    uri: FileUri,
    language: LanguageId,
    origin: FileOrigin,
    tree: SyntaxTree,
    errors: Vec<SyntaxError>,
    imports: Vec<Import>,
    support: Arc<dyn LanguageSupport>,
    scratch: bool,
}

impl File {
    pub(crate) fn new(
        uri: FileUri,
        origin: FileOrigin,
        generation: Generation,
        text: Arc<str>,
        support: Arc<dyn LanguageSupport>,
    ) -> Self {
        let Parse { tree, errors } = support.parse(&text);
        let tree = SyntaxTree::new(generation, text, tree);
        let imports = collect_imports(&tree);
        Self {
            uri,
            language: support.language(),
            origin,
            tree,
            errors,
            imports,
            support,
            scratch: false,
        }
    }

    /// A throwaway parse that is never registered in the cache or index.
    pub(crate) fn into_scratch(mut self) -> Self {
        self.scratch = true;
        self
    }

    pub fn uri(&self) -> &FileUri {
        &self.uri
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn origin(&self) -> FileOrigin {
        self.origin
    }

    /// Part of the toolchain distribution, including `@stdlib/...` libraries.
    pub fn is_stdlib(&self) -> bool {
        matches!(self.origin, FileOrigin::Stdlib | FileOrigin::Library)
    }

    pub fn is_stub(&self) -> bool {
        self.origin == FileOrigin::Stub
    }

    /// Visible everywhere without an import statement.
    pub fn is_imported_implicitly(&self) -> bool {
        matches!(self.origin, FileOrigin::Stdlib | FileOrigin::Stub)
    }

    pub fn is_scratch(&self) -> bool {
        self.scratch
    }

    pub fn generation(&self) -> Generation {
        self.tree.generation()
    }

    pub fn text(&self) -> &str {
        self.tree.text()
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Declaration variant a node kind introduces in this file's language.
    pub fn classify(&self, kind: SyntaxKind) -> Option<DeclKind> {
        self.support.classify(kind)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("uri", &self.uri)
            .field("language", &self.language)
            .field("origin", &self.origin)
            .field("generation", &self.generation())
            .finish()
    }
}

fn collect_imports(tree: &SyntaxTree) -> Vec<Import> {
    tree.root()
        .children()
        .filter(|item| item.kind() == SyntaxKind::IMPORT)
        .filter_map(|item| item.child_by_field(Field::Library))
        .map(|library| Import {
            path: SmolStr::new(unquote(library.text())),
            range: library.text_range(),
            node: library.index(),
        })
        .collect()
}

pub(crate) fn unquote(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
