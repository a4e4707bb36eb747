//! # tact-base
//!
//! Core semantic analysis for the Tact smart-contract language: syntax trees,
//! name resolution, type inference and the cross-file declaration index.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Workspace and stdlib loading (walkdir, rayon)
//!   ↓
//! ide       → Host/snapshot, completion, inspections, goto, hover, rename
//!   ↓
//! hir       → Declarations, resolver, type inferer, index, memo caches
//!   ↓
//! syntax    → Generation-tagged trees, visitor, language hooks
//!   ↓
//! parser    → Logos lexer, recursive-descent Tact parser
//!   ↓
//! base      → FileUri, TextRange, LineIndex, config, errors
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → hir → ide → project)
// ============================================================================

/// Foundation types: FileUri, TextRange, LineIndex, configuration, errors
pub mod base;

/// Parser: Logos lexer and recursive-descent Tact parser
pub mod parser;

/// Syntax: immutable trees, traversal, per-language parse hooks
pub mod syntax;

/// High-level IR: the semantic model over parsed files
pub mod hir;

/// IDE features: completion, inspections, hover, goto-definition, references, rename
pub mod ide;

/// Project management: workspace loading, stdlib
pub mod project;

// Re-export foundation types
pub use base::{
    AnalysisConfig, AnalysisError, AnalysisResult, FileUri, LineCol, LineIndex, Position, Span,
    TextRange, TextSize,
};
pub use ide::{Analysis, AnalysisHost};
