//! AnalysisHost and Analysis - Unified state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. This pattern ensures consistent reads across multiple queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Apply file changes
//! host.open_or_update(&uri, text);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let hover = analysis.hover(&uri, Position::new(3, 8))?;
//! let diagnostics = analysis.diagnostics(&uri)?;
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::base::{AnalysisConfig, AnalysisError, AnalysisResult, FileUri, Position, TextSize};
use crate::hir::{
    CacheManager, CacheStats, Db, Diagnostic, File, FileCache, FileOrigin, Node, Ty,
    WorkspaceIndex,
};
use crate::syntax::NodeId;

use super::{
    CompletionItem, GotoResult, Highlight, HoverResult, ReferenceResult, SourceChange,
    completions, document_highlights, find_references, goto_definition, goto_implementation,
    goto_type_definition, hover, rename_file_edits, rename_symbol, run_inspections, type_at,
};

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `open_or_update()`, `close()` and `rename_file()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    files: FileCache,
    index: WorkspaceIndex,
    caches: CacheManager,
    config: AnalysisConfig,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            files: FileCache::new(),
            index: WorkspaceIndex::new(),
            caches: CacheManager::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn files(&self) -> &FileCache {
        &self.files
    }

    pub fn index(&self) -> &WorkspaceIndex {
        &self.index
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.caches.stats()
    }

    /// Origin implied by the configured roots. Libraries under `<stdlib>/libs`
    /// must be imported explicitly, the rest of the stdlib and stubs are not.
    pub fn origin_of(&self, uri: &FileUri) -> FileOrigin {
        if let Some(stdlib) = self.config.stdlib_root() {
            if uri.is_under(&stdlib.join(crate::base::constants::STDLIB_LIBS_DIR)) {
                return FileOrigin::Library;
            }
            if uri.is_under(stdlib) {
                return FileOrigin::Stdlib;
            }
        }
        if let Some(stubs) = self.config.stubs_root()
            && uri.is_under(stubs)
        {
            return FileOrigin::Stub;
        }
        FileOrigin::Workspace
    }

    /// Parses `text` as the new content of `uri` and swaps it in, together
    /// with its index entry. Reopening with identical text keeps the current
    /// parse and everything memoized for it.
    ///
    /// Returns `None` when no language is registered for the URI.
    pub fn open_or_update(&mut self, uri: &FileUri, text: impl Into<Arc<str>>) -> Option<Arc<File>> {
        let origin = self.origin_of(uri);
        self.open_with_origin(uri, text, origin)
    }

    pub fn open_with_origin(
        &mut self,
        uri: &FileUri,
        text: impl Into<Arc<str>>,
        origin: FileOrigin,
    ) -> Option<Arc<File>> {
        let text = text.into();
        if let Some(current) = self.files.get(uri)
            && current.text() == &*text
            && current.origin() == origin
        {
            debug!(%uri, "content unchanged, keeping parse");
            return Some(current);
        }
        let file = self.files.parse(uri.clone(), text, origin)?;
        Some(self.insert_parsed(file))
    }

    /// Registers a file parsed elsewhere (see the project loaders).
    pub fn insert_parsed(&mut self, file: File) -> Arc<File> {
        let file = Arc::new(file);
        let uri = file.uri().clone();
        self.caches.invalidate(&uri);
        let replaced = self.files.insert(Arc::clone(&file)).is_some();
        self.index.add_file(&file);
        if replaced {
            debug!(%uri, generation = %file.generation(), "file reparsed");
        } else {
            info!(%uri, origin = ?file.origin(), "file added");
        }
        file
    }

    /// Parses a file without registering it, for parallel loading.
    pub fn parse_detached(&self, uri: &FileUri, text: Arc<str>) -> Option<File> {
        self.files.parse(uri.clone(), text, self.origin_of(uri))
    }

    /// Forgets `uri`. Returns whether it was loaded.
    pub fn close(&mut self, uri: &FileUri) -> bool {
        self.caches.invalidate(uri);
        let removed = self.files.remove(uri).is_some();
        self.index.remove_file(uri);
        if removed {
            info!(%uri, "file removed");
        }
        removed
    }

    /// Moves the file `old` to `new` and returns the import rewrites other
    /// files need, computed before the move. The edits are not applied.
    pub fn rename_file(&mut self, old: &FileUri, new: &FileUri) -> AnalysisResult<SourceChange> {
        let Some(file) = self.files.get(old) else {
            return Err(AnalysisError::UnknownFile(old.clone()));
        };
        let change = rename_file_edits(self.analysis().db(), old, new);

        self.close(old);
        let text: Arc<str> = Arc::from(file.text());
        match self.files.parse(new.clone(), text, self.origin_of(new)) {
            Some(moved) => {
                self.insert_parsed(moved);
            }
            None => debug!(%new, "no language for renamed file, dropped from index"),
        }
        info!(%old, %new, edited_files = change.len(), "file renamed");
        Ok(change)
    }

    pub fn file(&self, uri: &FileUri) -> Option<Arc<File>> {
        self.files.get(uri)
    }

    pub fn has_file(&self, uri: &FileUri) -> bool {
        self.files.contains(uri)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Get an immutable snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            db: Db::new(&self.files, &self.index, &self.caches, &self.config),
        }
    }
}

/// Read-only view of the host state. Every query takes a URI and a
/// zero-based line/column position.
#[derive(Clone, Copy, Debug)]
pub struct Analysis<'a> {
    db: Db<'a>,
}

impl<'a> Analysis<'a> {
    pub fn db(&self) -> Db<'a> {
        self.db
    }

    pub fn file(&self, uri: &FileUri) -> AnalysisResult<Arc<File>> {
        self.db
            .file(uri)
            .ok_or_else(|| AnalysisError::UnknownFile(uri.clone()))
    }

    pub fn offset(&self, file: &File, position: Position) -> AnalysisResult<TextSize> {
        file.tree()
            .line_index()
            .position_offset(position)
            .ok_or(AnalysisError::PositionOutOfRange {
                line: position.line,
                column: position.column,
            })
    }

    fn locate(&self, uri: &FileUri, position: Position) -> AnalysisResult<(Arc<File>, TextSize)> {
        let file = self.file(uri)?;
        let offset = self.offset(&file, position)?;
        Ok((file, offset))
    }

    /// Node `id` of the current parse of `uri`; an id from a replaced parse
    /// is an error.
    pub fn node(&self, uri: &FileUri, id: NodeId) -> AnalysisResult<Node> {
        let file = self.file(uri)?;
        let expected = file.generation();
        if id.generation != expected || file.tree().node(id.index).is_none() {
            return Err(AnalysisError::StaleNode {
                expected,
                found: id.generation,
            });
        }
        Ok(Node::new(file, id.index))
    }

    pub fn goto_definition(&self, uri: &FileUri, position: Position) -> AnalysisResult<GotoResult> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(goto_definition(self.db, &file, offset))
    }

    pub fn goto_type_definition(
        &self,
        uri: &FileUri,
        position: Position,
    ) -> AnalysisResult<GotoResult> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(goto_type_definition(self.db, &file, offset))
    }

    pub fn implementations(&self, uri: &FileUri, position: Position) -> AnalysisResult<GotoResult> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(goto_implementation(self.db, &file, offset))
    }

    pub fn type_at(&self, uri: &FileUri, position: Position) -> AnalysisResult<Option<Ty>> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(type_at(self.db, &file, offset))
    }

    pub fn hover(&self, uri: &FileUri, position: Position) -> AnalysisResult<Option<HoverResult>> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(hover(self.db, &file, offset))
    }

    pub fn find_references(
        &self,
        uri: &FileUri,
        position: Position,
        include_declaration: bool,
    ) -> AnalysisResult<ReferenceResult> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(find_references(self.db, &file, offset, include_declaration))
    }

    pub fn document_highlights(
        &self,
        uri: &FileUri,
        position: Position,
    ) -> AnalysisResult<Vec<Highlight>> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(document_highlights(self.db, &file, offset))
    }

    pub fn rename_symbol(
        &self,
        uri: &FileUri,
        position: Position,
        new_name: &str,
    ) -> AnalysisResult<SourceChange> {
        let (file, offset) = self.locate(uri, position)?;
        rename_symbol(self.db, &file, offset, new_name)
    }

    pub fn completions(
        &self,
        uri: &FileUri,
        position: Position,
    ) -> AnalysisResult<Vec<CompletionItem>> {
        let (file, offset) = self.locate(uri, position)?;
        Ok(completions(self.db, &file, offset))
    }

    pub fn diagnostics(&self, uri: &FileUri) -> AnalysisResult<Vec<Diagnostic>> {
        let file = self.file(uri)?;
        Ok(run_inspections(self.db, &file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(path: &str) -> FileUri {
        FileUri::new(path)
    }

    #[test]
    fn origins_follow_configured_roots() {
        let host = AnalysisHost::with_config(
            AnalysisConfig::default()
                .with_stdlib_root("/std")
                .with_stubs_root("/stubs"),
        );
        assert_eq!(host.origin_of(&uri("/std/std/prim.tact")), FileOrigin::Stdlib);
        assert_eq!(host.origin_of(&uri("/std/libs/deploy.tact")), FileOrigin::Library);
        assert_eq!(host.origin_of(&uri("/stubs/stubs.tact")), FileOrigin::Stub);
        assert_eq!(host.origin_of(&uri("/p/main.tact")), FileOrigin::Workspace);
    }

    #[test]
    fn update_replaces_parse_and_index() {
        let mut host = AnalysisHost::new();
        let a = uri("/p/a.tact");
        let first = host.open_or_update(&a, "fun old() {}").unwrap();
        let revision = host.index().revision();

        let same = host.open_or_update(&a, "fun old() {}").unwrap();
        assert_eq!(same.generation(), first.generation());
        assert_eq!(host.index().revision(), revision);

        let second = host.open_or_update(&a, "fun new() {}").unwrap();
        assert_ne!(second.generation(), first.generation());
        assert!(host.index().has_declaration("new"));
        assert!(!host.index().has_declaration("old"));
    }

    #[test]
    fn stale_nodes_are_rejected() {
        let mut host = AnalysisHost::new();
        let a = uri("/p/a.tact");
        let first = host.open_or_update(&a, "fun f() {}").unwrap();
        let id = Node::root(first).id();
        assert!(host.analysis().node(&a, id).is_ok());

        host.open_or_update(&a, "fun g() {}");
        let err = host.analysis().node(&a, id).unwrap_err();
        assert!(matches!(err, AnalysisError::StaleNode { .. }));
    }

    #[test]
    fn unknown_file_and_bad_position() {
        let mut host = AnalysisHost::new();
        let a = uri("/p/a.tact");
        host.open_or_update(&a, "fun f() {}");
        let analysis = host.analysis();
        assert!(matches!(
            analysis.hover(&uri("/p/missing.tact"), Position::new(0, 0)),
            Err(AnalysisError::UnknownFile(_))
        ));
        assert!(matches!(
            analysis.hover(&a, Position::new(4, 0)),
            Err(AnalysisError::PositionOutOfRange { line: 4, column: 0 })
        ));
    }

    #[test]
    fn close_removes_declarations() {
        let mut host = AnalysisHost::new();
        let a = uri("/p/a.tact");
        host.open_or_update(&a, "fun f() {}");
        assert!(host.close(&a));
        assert!(!host.close(&a));
        assert!(!host.index().has_declaration("f"));
    }

    #[test]
    fn rename_file_moves_and_reports_import_edits() {
        let mut host = AnalysisHost::new();
        let a = uri("/p/a.tact");
        let b = uri("/p/b.tact");
        let a2 = uri("/p/a2.tact");
        host.open_or_update(&a, "fun helper() {}");
        host.open_or_update(&b, "import \"./a\";\nfun f() { helper(); }");

        let change = host.rename_file(&a, &a2).unwrap();
        assert_eq!(change.edits_for(&b)[0].new_text, "\"./a2\"");
        assert!(!host.has_file(&a));
        assert_eq!(host.file(&a2).unwrap().text(), "fun helper() {}");
        assert!(host.index().file(&a2).is_some());

        assert!(matches!(
            host.rename_file(&a, &a2),
            Err(AnalysisError::UnknownFile(_))
        ));
    }
}
