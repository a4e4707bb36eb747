//! In-memory fixture for unit tests of the semantic layer.

use std::sync::Arc;

use crate::base::{AnalysisConfig, FileUri, TextSize};

use super::cache::CacheManager;
use super::db::Db;
use super::file::{File, FileOrigin};
use super::files::FileCache;
use super::index::WorkspaceIndex;
use super::node::Node;

pub(crate) struct TestDb {
    pub files: FileCache,
    pub index: WorkspaceIndex,
    pub caches: CacheManager,
    pub config: AnalysisConfig,
}

impl TestDb {
    pub fn new(sources: &[(&str, &str)]) -> Self {
        let mut db = Self {
            files: FileCache::new(),
            index: WorkspaceIndex::new(),
            caches: CacheManager::new(1024),
            config: AnalysisConfig::default(),
        };
        for (path, text) in sources {
            db.add(path, text, FileOrigin::Workspace);
        }
        db
    }

    pub fn add(&mut self, path: &str, text: &str, origin: FileOrigin) {
        let file = self
            .files
            .parse(FileUri::new(path), Arc::from(text), origin)
            .expect("known language");
        let file = Arc::new(file);
        self.index.add_file(&file);
        self.files.insert(file);
    }

    pub fn db(&self) -> Db<'_> {
        Db::new(&self.files, &self.index, &self.caches, &self.config)
    }

    pub fn file(&self, path: &str) -> Arc<File> {
        self.files.get(&FileUri::new(path)).expect("file is loaded")
    }

    /// Leaf at the `nth` (1-based) whole-word occurrence of `word`.
    pub fn node_at(&self, path: &str, word: &str, nth: usize) -> Node {
        let file = self.file(path);
        let offset = word_offset(file.text(), word, nth)
            .unwrap_or_else(|| panic!("occurrence {nth} of {word:?} not found"));
        let leaf = file
            .tree()
            .leaf_at_offset(TextSize::new(offset as u32))
            .expect("leaf at offset")
            .index();
        Node::new(file, leaf)
    }
}

pub(crate) fn word_offset(text: &str, word: &str, nth: usize) -> Option<usize> {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(word)
        .filter(|(start, _)| {
            let before = text[..*start].chars().next_back();
            let after = text[start + word.len()..].chars().next();
            !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
        })
        .nth(nth.checked_sub(1)?)
        .map(|(start, _)| start)
}
