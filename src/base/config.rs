//! Analysis configuration.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

/// Settings fixed for the lifetime of one `AnalysisHost`.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Root of the standard library (`@stdlib/x` resolves to `<root>/libs/x.tact`).
    pub stdlib_root: Option<PathBuf>,
    /// Root of builtin stub declarations.
    pub stubs_root: Option<PathBuf>,
    /// Upper bound of memoized entries per file and cache kind.
    pub cache_capacity: usize,
    /// Inspection ids that are never run.
    pub disabled_inspections: FxHashSet<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stdlib_root: None,
            stubs_root: None,
            cache_capacity: 16 * 1024,
            disabled_inspections: FxHashSet::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_stdlib_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.stdlib_root = Some(root.into());
        self
    }

    pub fn with_stubs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.stubs_root = Some(root.into());
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity.max(1);
        self
    }

    pub fn with_disabled_inspection(mut self, id: impl Into<String>) -> Self {
        self.disabled_inspections.insert(id.into());
        self
    }

    pub fn stdlib_root(&self) -> Option<&Path> {
        self.stdlib_root.as_deref()
    }

    pub fn stubs_root(&self) -> Option<&Path> {
        self.stubs_root.as_deref()
    }

    pub fn is_inspection_enabled(&self, id: &str) -> bool {
        !self.disabled_inspections.contains(id)
    }
}
