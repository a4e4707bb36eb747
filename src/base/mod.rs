//! Foundation types for the Tact analysis core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileUri`] - Normalized file identifiers and import path arithmetic
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Position`], [`Span`] - Line/column positions used at the editor boundary
//! - [`AnalysisConfig`], [`AnalysisError`] - Configuration and error values
//! - Domain constants (file extensions, stdlib layout)

mod config;
pub mod constants;
mod error;
mod line_index;
mod position;
mod uri;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use line_index::{LineCol, LineIndex};
pub use position::{Position, Span};
pub use uri::FileUri;

pub use text_size::{TextRange, TextSize};

// Re-export text-size for convenience
pub use text_size;
