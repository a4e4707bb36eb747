//! Loading project and standard-library sources from disk.

pub mod file_loader;
mod stdlib_loader;
mod workspace_loader;

pub use file_loader::LoadSummary;
pub use stdlib_loader::StdlibLoader;
pub use workspace_loader::WorkspaceLoader;
