//! Import path resolution.
//!
//! `import "./x";` is relative to the importing file's directory and gains a
//! `.tact` extension when it has none. `import "@stdlib/x";` addresses
//! `<stdlib_root>/libs/x.tact`. Imports of FunC sources never contribute
//! declarations and are skipped.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::base::constants::{FUNC_EXTS, STDLIB_IMPORT_PREFIX, STDLIB_LIBS_DIR, TACT_EXT};
use crate::base::{AnalysisConfig, FileUri};

use super::file::File;
use super::files::FileCache;

#[derive(Clone, Copy)]
pub struct ImportResolver<'a> {
    files: &'a FileCache,
    config: &'a AnalysisConfig,
}

impl<'a> ImportResolver<'a> {
    pub fn new(files: &'a FileCache, config: &'a AnalysisConfig) -> Self {
        Self { files, config }
    }

    /// Target URI of an import string; the file need not exist.
    pub fn resolve(&self, from: &FileUri, path: &str) -> Option<FileUri> {
        if is_func_import(path) {
            return None;
        }
        if let Some(lib) = path.strip_prefix(STDLIB_IMPORT_PREFIX) {
            let root = self.config.stdlib_root()?;
            let target = root.join(STDLIB_LIBS_DIR).join(with_tact_ext(lib));
            return Some(FileUri::from_path(&target));
        }
        Some(from.join_relative(&with_tact_ext(path)))
    }

    /// Files directly imported by `file` that are loaded, in import order.
    pub fn imported_files(&self, file: &File) -> Vec<Arc<File>> {
        file.imports()
            .iter()
            .filter_map(|import| self.resolve(file.uri(), &import.path))
            .filter_map(|uri| self.files.get(&uri))
            .collect()
    }

    /// Every file reachable through imports, breadth-first, `file` excluded.
    pub fn import_tree(&self, file: &File) -> Vec<Arc<File>> {
        let mut seen: FxHashSet<FileUri> = FxHashSet::default();
        seen.insert(file.uri().clone());
        let mut queue: VecDeque<Arc<File>> = self.imported_files(file).into();
        let mut out = Vec::new();
        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.uri().clone()) {
                continue;
            }
            queue.extend(self.imported_files(&next));
            out.push(next);
        }
        out
    }
}

fn is_func_import(path: &str) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| FUNC_EXTS.contains(&ext))
}

fn with_tact_ext(path: &str) -> String {
    let suffix = format!(".{TACT_EXT}");
    if path.ends_with(&suffix) {
        path.to_string()
    } else {
        format!("{path}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_and_stdlib_targets() {
        let files = FileCache::new();
        let config = AnalysisConfig::default().with_stdlib_root("/std");
        let resolver = ImportResolver::new(&files, &config);
        let from = FileUri::new("/p/src/main.tact");

        assert_eq!(
            resolver.resolve(&from, "./a"),
            Some(FileUri::new("/p/src/a.tact"))
        );
        assert_eq!(
            resolver.resolve(&from, "../lib/b.tact"),
            Some(FileUri::new("/p/lib/b.tact"))
        );
        assert_eq!(
            resolver.resolve(&from, "@stdlib/deploy"),
            Some(FileUri::new("/std/libs/deploy.tact"))
        );
        assert_eq!(resolver.resolve(&from, "./native.fc"), None);
    }

    #[test]
    fn stdlib_imports_need_a_root() {
        let files = FileCache::new();
        let config = AnalysisConfig::default();
        let resolver = ImportResolver::new(&files, &config);
        assert_eq!(
            resolver.resolve(&FileUri::new("/p/main.tact"), "@stdlib/deploy"),
            None
        );
    }
}
