//! IDE feature tests
//!
//! Tests for:
//! - Symbol and file rename
//! - Inspections (diagnostics)
//! - Code completion
//! - Hover, goto and references through positions

pub mod tests_completion;
pub mod tests_diagnostics;
pub mod tests_navigation;
pub mod tests_rename;
