use std::path::Path;

use tracing::{debug, info};

use crate::base::AnalysisResult;
use crate::ide::AnalysisHost;

use super::file_loader::{self, LoadSummary};

/// Loads the standard library and builtin stubs named by the host's
/// configuration. Their origins follow from the configured roots, so stdlib
/// and stub declarations become visible everywhere while `libs/` stays
/// behind `@stdlib/` imports.
#[derive(Debug, Default)]
pub struct StdlibLoader {
    loaded: bool,
}

impl StdlibLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if stdlib has been loaded by this loader
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Loads only once. Returns `Ok(true)` if this call did the load.
    pub fn ensure_loaded_into_host(&mut self, host: &mut AnalysisHost) -> AnalysisResult<bool> {
        if self.loaded {
            return Ok(false);
        }
        self.load_into_host(host)?;
        self.loaded = true;
        Ok(true)
    }

    pub fn load_into_host(&self, host: &mut AnalysisHost) -> AnalysisResult<LoadSummary> {
        let config = host.config();
        let roots: Vec<_> = [config.stdlib_root(), config.stubs_root()]
            .into_iter()
            .flatten()
            .map(Path::to_path_buf)
            .collect();
        if roots.is_empty() {
            debug!("no stdlib or stubs root configured");
            return Ok(LoadSummary::default());
        }
        let summary = file_loader::load_roots(roots.iter().map(|p| p.as_path()), host)?;
        info!(files = summary.loaded.len(), "stdlib loaded");
        Ok(summary)
    }
}
