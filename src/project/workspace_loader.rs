use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::base::{AnalysisError, AnalysisResult};
use crate::hir::File;
use crate::ide::AnalysisHost;

use super::file_loader::{self, LoadSummary};

/// Loads the files of a project directory into a host.
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads every Tact, FunC, Fift and TL-B file under `path`.
    ///
    /// Unreadable files are reported in the summary; only a missing root is
    /// an error.
    pub fn load_directory_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> AnalysisResult<LoadSummary> {
        let path = path.as_ref();
        let summary = file_loader::load_roots([path], host)?;
        info!(root = %path.display(), files = summary.loaded.len(), "workspace loaded");
        Ok(summary)
    }

    /// Loads a single file into an AnalysisHost.
    pub fn load_file_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> AnalysisResult<Arc<File>> {
        let path = path.as_ref();
        let (uri, text) = file_loader::load_file(path)?;
        host.open_or_update(&uri, text).ok_or_else(|| {
            AnalysisError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "unsupported file type"),
            )
        })
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}
