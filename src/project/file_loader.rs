//! Source discovery and loading shared by the workspace and stdlib loaders.
//!
//! Loading happens in two phases: files are read and parsed in parallel, then
//! registered with the host one at a time so the index sees a single
//! sequential stream of additions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::base::{AnalysisError, AnalysisResult, FileUri};
use crate::hir::File;
use crate::ide::AnalysisHost;
use crate::syntax::LanguageId;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "build", "output"];

/// What a bulk load did.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub loaded: Vec<FileUri>,
    pub failed: Vec<AnalysisError>,
}

impl LoadSummary {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    fn merge(&mut self, other: LoadSummary) {
        self.loaded.extend(other.loaded);
        self.failed.extend(other.failed);
    }
}

/// Whether the path has the extension of a language the cache recognises.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(LanguageId::from_extension)
        .is_some()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir()
        && entry.depth() > 0
        && (name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()))
}

/// Source files under `dir`, sorted.
pub fn collect_file_paths(dir: &Path) -> AnalysisResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AnalysisError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_source_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn load_file(path: &Path) -> AnalysisResult<(FileUri, Arc<str>)> {
    let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    Ok((FileUri::from_path(path), Arc::from(text)))
}

/// Reads and parses `paths` in parallel, then opens them into `host` in
/// path order.
pub fn load_into_host(paths: &[PathBuf], host: &mut AnalysisHost) -> LoadSummary {
    let parsed: Vec<AnalysisResult<Option<File>>> = {
        let host = &*host;
        paths
            .par_iter()
            .map(|path| {
                let (uri, text) = load_file(path)?;
                Ok(host.parse_detached(&uri, text))
            })
            .collect()
    };

    let mut summary = LoadSummary::default();
    for result in parsed {
        match result {
            Ok(Some(file)) => {
                let file = host.insert_parsed(file);
                summary.loaded.push(file.uri().clone());
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%err, "failed to load file");
                summary.failed.push(err);
            }
        }
    }
    info!(
        loaded = summary.loaded.len(),
        failed = summary.failed.len(),
        "loaded files"
    );
    summary
}

/// Collects and loads every source file under each of `roots`.
pub(crate) fn load_roots<'p>(
    roots: impl IntoIterator<Item = &'p Path>,
    host: &mut AnalysisHost,
) -> AnalysisResult<LoadSummary> {
    let mut summary = LoadSummary::default();
    for root in roots {
        let paths = collect_file_paths(root)?;
        summary.merge(load_into_host(&paths, host));
    }
    Ok(summary)
}
