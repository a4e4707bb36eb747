use std::sync::Arc;

use crate::hir::{Db, Diagnostic, DiagnosticCollector, File, Severity, codes};

use super::Inspection;

/// Syntax errors recorded by the parser.
pub struct ParserErrorInspection;

impl Inspection for ParserErrorInspection {
    fn id(&self) -> &'static str {
        codes::PARSER_ERROR
    }

    fn is_available(&self, _file: &File) -> bool {
        true
    }

    fn inspect(&self, _db: Db<'_>, file: &Arc<File>, sink: &mut DiagnosticCollector) {
        for error in file.errors() {
            sink.add(
                Diagnostic::at_range(file, error.range, Severity::Error, error.message.as_str())
                    .with_code(codes::PARSER_ERROR),
            );
        }
    }
}
