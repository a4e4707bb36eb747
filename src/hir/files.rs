//! File cache.
//!
//! Maps URIs to their current parse. Generations come from one counter shared
//! by every file, so a [`NodeId`](crate::syntax::NodeId) is unique across the
//! workspace and never reused after a reparse.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexMap;

use crate::base::FileUri;
use crate::syntax::{Generation, LanguageId, LanguageRegistry, LanguageSupport};

use super::file::{File, FileOrigin};

#[derive(Debug, Default)]
pub struct FileCache {
    files: IndexMap<FileUri, Arc<File>>,
    languages: LanguageRegistry,
    generation: AtomicU32,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    pub fn register_language(&mut self, support: Arc<dyn LanguageSupport>) {
        self.languages.register(support);
    }

    pub fn next_generation(&self) -> Generation {
        Generation(self.generation.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Parses `text` as the file `uri`, without registering it.
    ///
    /// Returns `None` when no language is registered for the URI.
    pub fn parse(&self, uri: FileUri, text: Arc<str>, origin: FileOrigin) -> Option<File> {
        let language = LanguageId::from_uri(&uri)?;
        let support = Arc::clone(self.languages.get(language)?);
        Some(File::new(uri, origin, self.next_generation(), text, support))
    }

    /// Registers `file`, returning the parse it replaced.
    pub fn insert(&mut self, file: Arc<File>) -> Option<Arc<File>> {
        self.files.insert(file.uri().clone(), file)
    }

    pub fn remove(&mut self, uri: &FileUri) -> Option<Arc<File>> {
        self.files.shift_remove(uri)
    }

    pub fn get(&self, uri: &FileUri) -> Option<Arc<File>> {
        self.files.get(uri).cloned()
    }

    pub fn contains(&self, uri: &FileUri) -> bool {
        self.files.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<File>> {
        self.files.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_unique_across_files() {
        let cache = FileCache::new();
        let a = cache
            .parse(FileUri::new("/p/a.tact"), Arc::from(""), FileOrigin::Workspace)
            .unwrap();
        let b = cache
            .parse(FileUri::new("/p/b.tact"), Arc::from(""), FileOrigin::Workspace)
            .unwrap();
        assert_ne!(a.generation(), b.generation());
    }

    #[test]
    fn unknown_languages_are_not_parsed() {
        let cache = FileCache::new();
        assert!(
            cache
                .parse(FileUri::new("/p/readme.md"), Arc::from("# hi"), FileOrigin::Workspace)
                .is_none()
        );
    }

    #[test]
    fn insert_replaces_previous_parse() {
        let mut cache = FileCache::new();
        let uri = FileUri::new("/p/a.tact");
        let first = cache
            .parse(uri.clone(), Arc::from("struct A {}"), FileOrigin::Workspace)
            .unwrap();
        assert!(cache.insert(Arc::new(first)).is_none());
        let second = cache
            .parse(uri.clone(), Arc::from("struct B {}"), FileOrigin::Workspace)
            .unwrap();
        let replaced = cache.insert(Arc::new(second)).unwrap();
        assert_eq!(replaced.text(), "struct A {}");
        assert_eq!(cache.get(&uri).unwrap().text(), "struct B {}");
        assert_eq!(cache.len(), 1);
    }
}
