//! IDE features - High-level APIs for language-server handlers.
//!
//! This module provides the interface between the semantic model (HIR)
//! and an LSP transport. Each function corresponds to an LSP request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take a [`Db`](crate::hir::Db) snapshot and an offset, return data
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//! 3. **Composable**: Built on top of HIR queries
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use tact::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.open_or_update(&uri, "contract C { }");
//!
//! let analysis = host.analysis();
//! let items = analysis.completions(&uri, Position::new(0, 13))?;
//! ```

use std::sync::Arc;

use crate::base::TextSize;
use crate::hir::{File, Node};

mod analysis;
pub mod completion;
mod goto;
mod hover;
pub mod inspections;
mod references;
mod rename;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, CompletionProvider, completions};
pub use goto::{GotoResult, GotoTarget, goto_definition, goto_implementation, goto_type_definition};
pub use hover::{HoverResult, hover, presentation, type_at};
pub use inspections::{Inspection, run_inspections};
pub use references::{
    Highlight, HighlightKind, Reference, ReferenceResult, document_highlights, find_references,
};
pub use rename::{
    SourceChange, TextEdit, apply_edits, rename_file_edits, rename_symbol, validate_identifier,
};

/// Leaf token under the cursor.
pub(crate) fn leaf_at(file: &Arc<File>, offset: TextSize) -> Option<Node> {
    let index = file.tree().leaf_at_offset(offset)?.index();
    Some(Node::new(Arc::clone(file), index))
}
