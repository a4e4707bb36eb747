//! Memo caches for resolution and inference.
//!
//! Results are kept per file in a bucket stamped with the file's tree
//! generation and the workspace index revision. A bucket whose stamp no longer
//! matches is emptied on the next access, so an edit can never serve a result
//! computed against an older tree or an older index.
//!
//! Each memo also tracks the nodes currently being computed on each thread.
//! Asking for such a node again is a cycle (`trait A with B`, `trait B with A`,
//! `let x = x;`) and yields the caller's fallback instead of recursing.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::base::FileUri;
use crate::parser::NodeIndex;
use crate::syntax::Generation;

use super::decls::Declaration;
use super::node::Node;
use super::ty::Ty;

/// Hit/miss counters, for tests and logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct Memo<T> {
    values: FxHashMap<NodeIndex, T>,
    in_flight: FxHashSet<(NodeIndex, ThreadId)>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self {
            values: FxHashMap::default(),
            in_flight: FxHashSet::default(),
        }
    }
}

struct FileCaches {
    generation: Generation,
    revision: u64,
    resolved: Memo<Option<Declaration>>,
    types: Memo<Ty>,
}

impl FileCaches {
    fn new(generation: Generation, revision: u64) -> Self {
        Self {
            generation,
            revision,
            resolved: Memo::default(),
            types: Memo::default(),
        }
    }
}

/// Buckets are keyed by URI and whether the tree is a scratch parse, so a
/// completion copy never evicts the results of the real file.
type BucketKey = (FileUri, bool);

pub struct CacheManager {
    buckets: Mutex<FxHashMap<BucketKey, FileCaches>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: Mutex::new(FxHashMap::default()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn resolve_memo(
        &self,
        node: &Node,
        revision: u64,
        compute: impl FnOnce() -> Option<Declaration>,
    ) -> Option<Declaration> {
        self.memoize(node, revision, |c| &mut c.resolved, None, compute)
    }

    pub fn type_memo(&self, node: &Node, revision: u64, compute: impl FnOnce() -> Ty) -> Ty {
        self.memoize(node, revision, |c| &mut c.types, Ty::Unknown, compute)
    }

    fn memoize<T: Clone>(
        &self,
        node: &Node,
        revision: u64,
        select: fn(&mut FileCaches) -> &mut Memo<T>,
        on_cycle: T,
        compute: impl FnOnce() -> T,
    ) -> T {
        let key: BucketKey = (node.file().uri().clone(), node.file().is_scratch());
        let generation = node.file().generation();
        let index = node.index();
        let flight = (index, thread::current().id());

        {
            let mut buckets = self.buckets.lock();
            let caches = bucket(&mut buckets, key.clone(), generation, revision);
            let memo = select(caches);
            if let Some(value) = memo.values.get(&index) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return value.clone();
            }
            if !memo.in_flight.insert(flight) {
                trace!(node = ?node, "cycle while computing node");
                return on_cycle;
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();

        let mut buckets = self.buckets.lock();
        let caches = bucket(&mut buckets, key, generation, revision);
        let memo = select(caches);
        memo.in_flight.remove(&flight);
        if memo.values.len() >= self.capacity {
            memo.values.clear();
        }
        memo.values.insert(index, value.clone());
        value
    }

    /// Drops everything memoized for `uri`.
    pub fn invalidate(&self, uri: &FileUri) {
        let mut buckets = self.buckets.lock();
        buckets.remove(&(uri.clone(), false));
        buckets.remove(&(uri.clone(), true));
    }

    pub fn clear(&self) {
        self.buckets.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(crate::base::AnalysisConfig::default().cache_capacity)
    }
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("files", &self.buckets.lock().len())
            .field("stats", &self.stats())
            .finish()
    }
}

/// The bucket for `key`, emptied first when its stamp is outdated.
fn bucket<K: Eq + Hash>(
    buckets: &mut FxHashMap<K, FileCaches>,
    key: K,
    generation: Generation,
    revision: u64,
) -> &mut FileCaches {
    let caches = buckets
        .entry(key)
        .or_insert_with(|| FileCaches::new(generation, revision));
    if caches.generation != generation || caches.revision != revision {
        // keep in-flight markers: an outer frame may still be computing
        let resolved_flight = std::mem::take(&mut caches.resolved.in_flight);
        let types_flight = std::mem::take(&mut caches.types.in_flight);
        *caches = FileCaches::new(generation, revision);
        caches.resolved.in_flight = resolved_flight;
        caches.types.in_flight = types_flight;
    }
    caches
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::hir::file::FileOrigin;
    use crate::hir::files::FileCache;

    fn node(files: &FileCache, text: &str) -> Node {
        let file = files
            .parse(FileUri::new("/p/a.tact"), Arc::from(text), FileOrigin::Workspace)
            .unwrap();
        Node::root(Arc::new(file))
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let files = FileCache::new();
        let cache = CacheManager::new(16);
        let root = node(&files, "struct A {}");

        let mut calls = 0;
        for _ in 0..2 {
            let ty = cache.type_memo(&root, 1, || {
                calls += 1;
                Ty::int()
            });
            assert_eq!(ty, Ty::int());
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn new_revision_recomputes() {
        let files = FileCache::new();
        let cache = CacheManager::new(16);
        let root = node(&files, "struct A {}");

        cache.type_memo(&root, 1, Ty::int);
        let ty = cache.type_memo(&root, 2, Ty::bool);
        assert_eq!(ty, Ty::bool());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn reentrant_request_reports_a_cycle() {
        let files = FileCache::new();
        let cache = CacheManager::new(16);
        let root = node(&files, "struct A {}");

        let ty = cache.type_memo(&root, 1, || cache.type_memo(&root, 1, Ty::int));
        // the inner call hit the cycle guard, the outer one stored its result
        assert_eq!(ty, Ty::Unknown);
        assert_eq!(cache.type_memo(&root, 1, Ty::int), Ty::Unknown);
    }

    #[test]
    fn invalidate_drops_the_bucket() {
        let files = FileCache::new();
        let cache = CacheManager::new(16);
        let root = node(&files, "struct A {}");

        cache.type_memo(&root, 1, Ty::int);
        cache.invalidate(root.file().uri());
        assert_eq!(cache.type_memo(&root, 1, Ty::bool), Ty::bool());
    }
}
