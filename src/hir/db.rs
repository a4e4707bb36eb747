//! Query handle.
//!
//! [`Db`] bundles read-only borrows of everything semantic queries need: the
//! file cache, the workspace index, the memo caches and the configuration.
//! It is `Copy`, so queries pass it by value and recurse freely.

use std::borrow::Cow;
use std::sync::Arc;

use crate::base::constants::BASE_TRAIT;
use crate::base::{AnalysisConfig, FileUri};

use super::cache::CacheManager;
use super::decls::{Declaration, Trait};
use super::file::File;
use super::files::FileCache;
use super::import::ImportResolver;
use super::index::{FileIndex, IndexKey, WorkspaceIndex};
use super::infer::TypeInferer;
use super::node::Node;
use super::resolve::Resolver;
use super::ty::Ty;

#[derive(Clone, Copy)]
pub struct Db<'a> {
    pub files: &'a FileCache,
    pub index: &'a WorkspaceIndex,
    pub caches: &'a CacheManager,
    pub config: &'a AnalysisConfig,
}

impl<'a> Db<'a> {
    pub fn new(
        files: &'a FileCache,
        index: &'a WorkspaceIndex,
        caches: &'a CacheManager,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            files,
            index,
            caches,
            config,
        }
    }

    /// Declaration `node` refers to. Memoized.
    pub fn resolve(self, node: &Node) -> Option<Declaration> {
        Resolver::new(self).resolve(node)
    }

    /// Type of the expression or declaration at `node`. Memoized.
    pub fn infer(self, node: &Node) -> Ty {
        TypeInferer::new(self).infer(node)
    }

    pub fn base_trait(self) -> Option<Trait> {
        match self.index.element_by_name(IndexKey::Traits, BASE_TRAIT)? {
            Declaration::Trait(t) => Some(t),
            _ => None,
        }
    }

    pub fn file(self, uri: &FileUri) -> Option<Arc<File>> {
        self.files.get(uri)
    }

    pub fn imports(self) -> ImportResolver<'a> {
        ImportResolver::new(self.files, self.config)
    }

    /// Index revision the memo caches are stamped with.
    pub fn revision(self) -> u64 {
        self.index.revision()
    }

    /// Index entry of `file`, built on the fly for scratch parses and files
    /// the workspace index does not know.
    pub fn file_index(self, file: &Arc<File>) -> Cow<'a, FileIndex> {
        if !file.is_scratch()
            && let Some(index) = self.index.file(file.uri())
        {
            return Cow::Borrowed(index);
        }
        Cow::Owned(FileIndex::build(file))
    }
}

impl std::fmt::Debug for Db<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("files", &self.files.len())
            .field("revision", &self.index.revision())
            .finish()
    }
}
