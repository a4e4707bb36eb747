//! Diagnostics - findings reported against source ranges.
//!
//! Inspections produce [`Diagnostic`]s into a [`DiagnosticCollector`]. The
//! range is kept both as bytes (for edits and tests) and as a line/column
//! [`Span`] (for the editor).

use std::sync::Arc;

use crate::base::{FileUri, Span, TextRange};

use super::file::File;
use super::node::Node;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// How the editor should render the range beyond its severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticTag {
    /// Greyed out.
    Unnecessary,
    /// Struck through.
    Deprecated,
}

/// A diagnostic message with location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub uri: FileUri,
    pub range: TextRange,
    pub span: Span,
    pub severity: Severity,
    /// Inspection id (`unused-variable`, …); see [`codes`].
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
    pub tags: Vec<DiagnosticTag>,
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug)]
pub struct RelatedInfo {
    pub uri: FileUri,
    pub span: Span,
    pub message: Arc<str>,
}

impl RelatedInfo {
    pub fn at(node: &Node, message: impl Into<Arc<str>>) -> Self {
        Self {
            uri: node.file().uri().clone(),
            span: node.span(),
            message: message.into(),
        }
    }
}

impl Diagnostic {
    pub fn new(node: &Node, severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            uri: node.file().uri().clone(),
            range: node.range(),
            span: node.span(),
            severity,
            code: None,
            message: message.into(),
            tags: Vec::new(),
            related: Vec::new(),
        }
    }

    /// Diagnostic over a raw range of `file`, for findings without a node.
    pub fn at_range(
        file: &File,
        range: TextRange,
        severity: Severity,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            uri: file.uri().clone(),
            range,
            span: file.tree().line_index().span(range),
            severity,
            code: None,
            message: message.into(),
            tags: Vec::new(),
            related: Vec::new(),
        }
    }

    pub fn error(node: &Node, message: impl Into<Arc<str>>) -> Self {
        Self::new(node, Severity::Error, message)
    }

    pub fn warning(node: &Node, message: impl Into<Arc<str>>) -> Self {
        Self::new(node, Severity::Warning, message)
    }

    pub fn hint(node: &Node, message: impl Into<Arc<str>>) -> Self {
        Self::new(node, Severity::Hint, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_tag(mut self, tag: DiagnosticTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Inspection ids. Each doubles as the diagnostic code and as the key used
/// to disable the inspection in [`AnalysisConfig`](crate::base::AnalysisConfig).
pub mod codes {
    /// Local variable never read.
    pub const UNUSED_VARIABLE: &str = "unused-variable";
    /// Function parameter never read.
    pub const UNUSED_PARAMETER: &str = "unused-parameter";
    /// Declaration reachable only through another file's imports.
    pub const NOT_IMPORTED_SYMBOL: &str = "not-imported-symbol";
    /// Use of a declaration documented as deprecated.
    pub const DEPRECATED_SYMBOL_USAGE: &str = "deprecated-symbol-usage";
    /// Syntax error reported by the parser.
    pub const PARSER_ERROR: &str = "parser-error";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn diagnostics_for_file(&self, uri: &FileUri) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| &d.uri == uri).collect()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Diagnostics ordered by position, then by code.
    pub fn into_sorted(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| {
            (a.uri.path(), a.range.start(), a.code.as_deref())
                .cmp(&(b.uri.path(), b.range.start(), b.code.as_deref()))
        });
        self.diagnostics
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}
