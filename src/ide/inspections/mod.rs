//! Inspections: per-file checks reported as diagnostics.
//!
//! Each [`Inspection`] has a stable id which doubles as its diagnostic code
//! and as the key [`AnalysisConfig`](crate::base::AnalysisConfig) disables it
//! by. [`run_inspections`] runs the enabled ones over one file.

mod deprecated;
mod not_imported;
mod parser_errors;
mod unused;

use std::sync::Arc;

use tracing::debug;

use crate::hir::{Db, Diagnostic, DiagnosticCollector, File};

pub use deprecated::DeprecatedSymbolUsageInspection;
pub use not_imported::NotImportedSymbolInspection;
pub use parser_errors::ParserErrorInspection;
pub use unused::{UnusedParameterInspection, UnusedVariableInspection};

pub trait Inspection: Sync {
    fn id(&self) -> &'static str;

    /// Whether the inspection applies to `file` at all.
    fn is_available(&self, file: &File) -> bool {
        !file.is_stdlib() && !file.is_stub()
    }

    fn inspect(&self, db: Db<'_>, file: &Arc<File>, sink: &mut DiagnosticCollector);
}

pub static DEFAULT_INSPECTIONS: &[&dyn Inspection] = &[
    &ParserErrorInspection,
    &UnusedVariableInspection,
    &UnusedParameterInspection,
    &NotImportedSymbolInspection,
    &DeprecatedSymbolUsageInspection,
];

/// Diagnostics of every enabled default inspection, by position.
pub fn run_inspections(db: Db<'_>, file: &Arc<File>) -> Vec<Diagnostic> {
    run_inspections_with(db, file, DEFAULT_INSPECTIONS)
}

pub fn run_inspections_with(
    db: Db<'_>,
    file: &Arc<File>,
    inspections: &[&dyn Inspection],
) -> Vec<Diagnostic> {
    let mut sink = DiagnosticCollector::new();
    for inspection in inspections {
        if !db.config.is_inspection_enabled(inspection.id()) || !inspection.is_available(file) {
            continue;
        }
        inspection.inspect(db, file, &mut sink);
    }
    debug!(file = %file.uri(), count = sink.len(), "inspected");
    sink.into_sorted()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::AnalysisConfig;
    use crate::hir::codes;
    use crate::hir::test_db::TestDb;

    const SOURCE: &str = "fun f(a: Int) { let x = 1; }";

    #[test]
    fn default_inspections_report_by_position() {
        let t = TestDb::new(&[("/p/a.tact", SOURCE)]);
        let diags = run_inspections(t.db(), &t.file("/p/a.tact"));
        let codes: Vec<_> = diags.iter().filter_map(|d| d.code.as_deref()).collect();
        assert_eq!(codes, [codes::UNUSED_PARAMETER, codes::UNUSED_VARIABLE]);
    }

    #[test]
    fn disabled_inspection_is_skipped() {
        let mut t = TestDb::new(&[]);
        t.config = AnalysisConfig::default().with_disabled_inspection(codes::UNUSED_VARIABLE);
        t.add("/p/a.tact", SOURCE, crate::hir::FileOrigin::Workspace);
        let diags = run_inspections(t.db(), &t.file("/p/a.tact"));
        assert!(diags.iter().all(|d| d.code.as_deref() != Some(codes::UNUSED_VARIABLE)));
        assert_eq!(diags.len(), 1);
    }
}
