//! Workspace index.
//!
//! One [`FileIndex`] per file lists its top-level declarations by
//! [`IndexKey`]. Replacing a file swaps exactly that file's entry; nothing
//! else is rescanned. Every change bumps [`WorkspaceIndex::revision`], which
//! the memo caches use as part of their stamp.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::debug;

use crate::base::FileUri;
use crate::parser::SyntaxKind;

use super::decls::{Decl, Declaration};
use super::file::{File, FileOrigin};
use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKey {
    Contracts,
    /// Global functions without a `self` parameter.
    Funs,
    /// Extension functions (`extends fun f(self: T)`).
    Methods,
    Messages,
    Structs,
    Traits,
    Primitives,
    Constants,
}

impl IndexKey {
    pub const ALL: [IndexKey; 8] = [
        IndexKey::Contracts,
        IndexKey::Funs,
        IndexKey::Methods,
        IndexKey::Messages,
        IndexKey::Structs,
        IndexKey::Traits,
        IndexKey::Primitives,
        IndexKey::Constants,
    ];

    /// Keys visible to unqualified names, in lookup order.
    pub const GLOBALS: [IndexKey; 7] = [
        IndexKey::Funs,
        IndexKey::Primitives,
        IndexKey::Structs,
        IndexKey::Messages,
        IndexKey::Traits,
        IndexKey::Constants,
        IndexKey::Contracts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndexKey::Contracts => "contracts",
            IndexKey::Funs => "funs",
            IndexKey::Methods => "methods",
            IndexKey::Messages => "messages",
            IndexKey::Structs => "structs",
            IndexKey::Traits => "traits",
            IndexKey::Primitives => "primitives",
            IndexKey::Constants => "constants",
        }
    }

    fn of(decl: &Declaration) -> Option<IndexKey> {
        let key = match decl {
            Declaration::Contract(_) => IndexKey::Contracts,
            Declaration::Trait(_) => IndexKey::Traits,
            Declaration::Primitive(_) => IndexKey::Primitives,
            Declaration::Constant(_) => IndexKey::Constants,
            Declaration::MessageType(m) if m.is_message() => IndexKey::Messages,
            Declaration::MessageType(_) => IndexKey::Structs,
            Declaration::Function(f) if f.with_self() => IndexKey::Methods,
            Declaration::Function(_) => IndexKey::Funs,
            _ => return None,
        };
        Some(key)
    }
}

// ============================================================================
// FILE INDEX
// ============================================================================

#[derive(Debug, Clone)]
pub struct FileIndex {
    uri: FileUri,
    origin: FileOrigin,
    entries: FxHashMap<IndexKey, Vec<Declaration>>,
    deprecated: FxHashSet<SmolStr>,
}

impl FileIndex {
    pub fn build(file: &Arc<File>) -> Self {
        let mut entries: FxHashMap<IndexKey, Vec<Declaration>> = FxHashMap::default();
        let mut deprecated = FxHashSet::default();

        let root = Node::root(Arc::clone(file));
        for item in root.named_children() {
            if item.kind() == SyntaxKind::IMPORT {
                continue;
            }
            let Some(decl) = Declaration::cast(item) else {
                continue;
            };
            let Some(key) = IndexKey::of(&decl) else {
                continue;
            };
            if decl.is_deprecated() {
                deprecated.insert(decl.name());
            }
            entries.entry(key).or_default().push(decl);
        }

        Self {
            uri: file.uri().clone(),
            origin: file.origin(),
            entries,
            deprecated,
        }
    }

    pub fn uri(&self) -> &FileUri {
        &self.uri
    }

    pub fn origin(&self) -> FileOrigin {
        self.origin
    }

    pub fn elements(&self, key: IndexKey) -> &[Declaration] {
        self.entries.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Visits the file's `key` entries until `f` returns false.
    pub fn process_elements_by_key(
        &self,
        key: IndexKey,
        mut f: impl FnMut(&Declaration) -> bool,
    ) -> bool {
        self.elements(key).iter().all(|decl| f(decl))
    }

    pub fn element_by_name(&self, key: IndexKey, name: &str) -> Option<&Declaration> {
        self.elements(key).iter().find(|d| d.name() == name)
    }

    pub fn is_deprecated(&self, name: &str) -> bool {
        self.deprecated.contains(name)
    }

    /// Names counted for ambiguity checks (extension functions excluded).
    fn counted_names(&self) -> impl Iterator<Item = SmolStr> + '_ {
        self.entries
            .iter()
            .filter(|(key, _)| **key != IndexKey::Methods)
            .flat_map(|(_, decls)| decls.iter().map(|d| d.name()))
    }
}

// ============================================================================
// WORKSPACE INDEX
// ============================================================================

#[derive(Debug, Default)]
pub struct WorkspaceIndex {
    files: IndexMap<FileUri, FileIndex>,
    name_counts: FxHashMap<SmolStr, usize>,
    revision: u64,
}

impl WorkspaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes on every add/remove.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Indexes `file`, replacing whatever the same URI contributed before.
    pub fn add_file(&mut self, file: &Arc<File>) {
        self.remove_file(file.uri());
        let index = FileIndex::build(file);
        for name in index.counted_names() {
            *self.name_counts.entry(name).or_default() += 1;
        }
        debug!(uri = %file.uri(), "indexed file");
        self.files.insert(file.uri().clone(), index);
        self.revision += 1;
    }

    pub fn remove_file(&mut self, uri: &FileUri) -> bool {
        let Some(old) = self.files.shift_remove(uri) else {
            return false;
        };
        for name in old.counted_names() {
            if let Some(count) = self.name_counts.get_mut(&name) {
                *count -= 1;
                if *count == 0 {
                    self.name_counts.remove(&name);
                }
            }
        }
        debug!(uri = %uri, "removed file from index");
        self.revision += 1;
        true
    }

    pub fn file(&self, uri: &FileUri) -> Option<&FileIndex> {
        self.files.get(uri)
    }

    pub fn files_of_origin(&self, origin: FileOrigin) -> impl Iterator<Item = &FileIndex> {
        self.files.values().filter(move |f| f.origin == origin)
    }

    /// Workspace files, then the standard library, then stubs.
    pub fn files_in_root_order(&self) -> impl Iterator<Item = &FileIndex> {
        self.files_of_origin(FileOrigin::Workspace)
            .chain(self.files_of_origin(FileOrigin::Stdlib))
            .chain(self.files_of_origin(FileOrigin::Library))
            .chain(self.files_of_origin(FileOrigin::Stub))
    }

    /// Visits `key` entries of every file, `current` first, until `f`
    /// returns false.
    pub fn process_elements_by_key(
        &self,
        key: IndexKey,
        current: Option<&FileUri>,
        mut f: impl FnMut(&Declaration) -> bool,
    ) -> bool {
        if let Some(first) = current.and_then(|uri| self.files.get(uri))
            && !first.process_elements_by_key(key, &mut f)
        {
            return false;
        }
        self.files_in_root_order()
            .filter(|file| Some(&file.uri) != current)
            .all(|file| file.process_elements_by_key(key, &mut f))
    }

    pub fn element_by_name(&self, key: IndexKey, name: &str) -> Option<Declaration> {
        self.files_in_root_order()
            .find_map(|file| file.element_by_name(key, name))
            .cloned()
    }

    pub fn elements_by_name(&self, key: IndexKey, name: &str) -> Vec<Declaration> {
        self.files_in_root_order()
            .flat_map(|file| file.elements(key).iter().filter(|d| d.name() == name))
            .cloned()
            .collect()
    }

    pub fn has_declaration(&self, name: &str) -> bool {
        self.name_counts.contains_key(name)
    }

    /// More than one top-level declaration across the workspace uses `name`.
    pub fn has_several_declarations(&self, name: &str) -> bool {
        self.name_counts.get(name).is_some_and(|&count| count > 1)
    }

    pub fn is_deprecated(&self, name: &str) -> bool {
        self.files.values().any(|f| f.is_deprecated(name))
    }
}
