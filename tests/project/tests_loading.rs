//! Workspace and stdlib loading from real directories.

use std::fs;
use std::path::Path;

use tact::hir::{Decl, codes};
use tact::ide::AnalysisHost;
use tact::project::{StdlibLoader, WorkspaceLoader};
use tact::{AnalysisConfig, FileUri};
use once_cell::sync::Lazy;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A stdlib with `std/`, `libs/` and a separate stubs root, written once and
/// only read by the tests sharing it.
static STDLIB_FIXTURE: Lazy<TempDir> = Lazy::new(|| {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "stdlib/std/primitives.tact", "primitive Int;\nprimitive Bool;");
    write(
        root,
        "stdlib/libs/deploy.tact",
        "trait Deployable {\n    receive(\"deploy\") {}\n}",
    );
    write(root, "stubs/stubs.tact", "fun dump(value: Int) {}");
    dir
});

fn configured_host(dir: &TempDir) -> AnalysisHost {
    AnalysisHost::with_config(
        AnalysisConfig::default()
            .with_stdlib_root(dir.path().join("stdlib"))
            .with_stubs_root(dir.path().join("stubs")),
    )
}

#[test]
fn test_workspace_directory_loads_all_sources() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    write(&root, "contracts/main.tact", "import \"./utils\";\ncontract Main {}");
    write(&root, "contracts/utils.tact", "fun helper() {}");
    write(&root, "contracts/wallet.fc", "() recv_internal() impure { }");
    write(&root, "README.md", "# project");
    write(&root, "node_modules/dep/index.tact", "fun ignored() {}");

    let mut host = AnalysisHost::new();
    let summary = WorkspaceLoader::new()
        .load_directory_into_host(&root, &mut host)
        .unwrap();

    assert!(summary.is_ok());
    assert_eq!(summary.loaded.len(), 3);
    assert_eq!(host.file_count(), 3);
    assert!(host.has_file(&FileUri::from_path(&root.join("contracts/utils.tact"))));
    assert!(!host.has_file(&FileUri::from_path(&root.join("node_modules/dep/index.tact"))));
}

#[test]
fn test_missing_workspace_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = AnalysisHost::new();
    assert!(
        WorkspaceLoader::new()
            .load_directory_into_host(dir.path().join("absent"), &mut host)
            .is_err()
    );
}

#[test]
fn test_single_file_load() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "one.tact", "struct One { a: Int; }");

    let mut host = AnalysisHost::new();
    let file = WorkspaceLoader::new()
        .load_file_into_host(dir.path().join("one.tact"), &mut host)
        .unwrap();

    assert_eq!(file.text(), "struct One { a: Int; }");
    assert_eq!(host.file_count(), 1);
}

#[test]
fn test_stdlib_loads_once() {
    let dir = &*STDLIB_FIXTURE;
    let mut host = configured_host(dir);
    let mut loader = StdlibLoader::new();

    assert!(loader.ensure_loaded_into_host(&mut host).unwrap());
    assert!(loader.is_loaded());
    assert!(!loader.ensure_loaded_into_host(&mut host).unwrap());
    assert_eq!(host.file_count(), 3);
}

#[test]
fn test_stdlib_and_stubs_are_visible_without_imports() {
    let dir = &*STDLIB_FIXTURE;
    let mut host = configured_host(dir);
    StdlibLoader::new().ensure_loaded_into_host(&mut host).unwrap();

    let main = FileUri::from_path(&dir.path().join("project/main.tact"));
    let source = "fun f(flag: Bool) { dump(1); }";
    host.open_or_update(&main, source).unwrap();

    let analysis = host.analysis();
    let diagnostics = analysis.diagnostics(&main).unwrap();
    assert!(
        diagnostics
            .iter()
            .all(|d| d.code.as_deref() != Some(codes::NOT_IMPORTED_SYMBOL)),
        "{diagnostics:?}"
    );

    let file = host.file(&main).unwrap();
    let offset = source.find("dump").unwrap();
    let leaf = file
        .tree()
        .leaf_at_offset(tact::TextSize::new(offset as u32))
        .unwrap()
        .index();
    let decl = analysis
        .db()
        .resolve(&tact::hir::Node::new(file, leaf))
        .unwrap();
    assert!(decl.node().file().is_stub());
}

#[test]
fn test_stdlib_libs_require_an_import() {
    let dir = &*STDLIB_FIXTURE;
    let mut host = configured_host(dir);
    StdlibLoader::new().ensure_loaded_into_host(&mut host).unwrap();

    let without = FileUri::from_path(&dir.path().join("project/a.tact"));
    let with = FileUri::from_path(&dir.path().join("project/b.tact"));
    host.open_or_update(&without, "contract A with Deployable {}").unwrap();
    host.open_or_update(
        &with,
        "import \"@stdlib/deploy\";\ncontract B with Deployable {}",
    )
    .unwrap();

    let flagged = |uri: &FileUri| {
        host.analysis()
            .diagnostics(uri)
            .unwrap()
            .iter()
            .any(|d| d.code.as_deref() == Some(codes::NOT_IMPORTED_SYMBOL))
    };
    assert!(flagged(&without));
    assert!(!flagged(&with));
}
