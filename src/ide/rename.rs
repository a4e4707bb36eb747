//! Symbol rename and import rewriting for file renames.
//!
//! Both produce a [`SourceChange`]: text edits grouped by file, computed
//! against the current snapshot. Nothing is applied here; the host applies
//! file renames to its own state and leaves text edits to the caller.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::base::constants::{STDLIB_IMPORT_PREFIX, STDLIB_LIBS_DIR, TACT_EXT};
use crate::base::{AnalysisError, AnalysisResult, FileUri, TextRange, TextSize};
use crate::hir::{Db, Decl, File, Node, ReferenceOptions, Referent};
use crate::parser::{Field as NodeField, SyntaxKind, tokenize};

use super::leaf_at;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// Edits per file, files in the order they were first touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceChange {
    edits: IndexMap<FileUri, Vec<TextEdit>>,
}

impl SourceChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_edit(&mut self, uri: FileUri, edit: TextEdit) {
        self.edits.entry(uri).or_default().push(edit);
    }

    pub fn edits_for(&self, uri: &FileUri) -> &[TextEdit] {
        self.edits.get(uri).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn files(&self) -> impl Iterator<Item = &FileUri> {
        self.edits.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FileUri, &[TextEdit])> {
        self.edits.iter().map(|(uri, edits)| (uri, edits.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Number of files touched.
    pub fn len(&self) -> usize {
        self.edits.len()
    }
}

/// `text` with non-overlapping `edits` applied.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| std::cmp::Reverse(e.range.start()));
    let mut out = text.to_string();
    for edit in sorted {
        out.replace_range(std::ops::Range::<usize>::from(edit.range), &edit.new_text);
    }
    out
}

/// A name Tact accepts as an identifier: XID characters, not a keyword.
pub fn validate_identifier(name: &str) -> AnalysisResult<()> {
    let mut chars = name.chars();
    let valid_chars = chars
        .next()
        .is_some_and(|c| c == '_' || unicode_ident::is_xid_start(c))
        && chars.all(unicode_ident::is_xid_continue);
    let single_ident = || {
        let tokens = tokenize(name);
        tokens.len() == 1 && tokens[0].kind == SyntaxKind::IDENT
    };
    if valid_chars && single_ident() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidIdentifier(name.to_string()))
    }
}

/// Renames the declaration under the cursor and every usage of it.
///
/// Declarations of the standard library and stubs are never renamed; the
/// change is empty for them and for positions that name nothing.
pub fn rename_symbol(
    db: Db<'_>,
    file: &Arc<File>,
    offset: TextSize,
    new_name: &str,
) -> AnalysisResult<SourceChange> {
    validate_identifier(new_name)?;
    let mut change = SourceChange::new();
    let Some(referent) = leaf_at(file, offset).and_then(|leaf| Referent::at(db, &leaf)) else {
        return Ok(change);
    };
    let home = referent.declaration().node().file();
    if home.is_stdlib() || home.is_stub() {
        debug!(name = %referent.declaration().name(), "not renaming a library declaration");
        return Ok(change);
    }

    for node in referent.find_references(ReferenceOptions::default().with_definition()) {
        let new_text = match shorthand_field(&node) {
            // `Foo { x }` and `let Foo { x } = …` keep naming the field `x`
            Some(field) => format!("{field}: {new_name}"),
            None => new_name.to_string(),
        };
        change.insert_edit(
            node.file().uri().clone(),
            TextEdit::replace(node.range(), new_text),
        );
    }
    Ok(change)
}

fn shorthand_field(node: &Node) -> Option<&str> {
    let parent = node.parent()?;
    let is_shorthand = match parent.kind() {
        SyntaxKind::INSTANCE_ARGUMENT => parent.child_by_field(NodeField::Value).is_none(),
        SyntaxKind::DESTRUCT_BIND => parent.child_by_field(NodeField::Bind).is_none(),
        _ => false,
    };
    (is_shorthand && node.field() == Some(NodeField::Name)).then(|| node.text())
}

/// Import rewrites for moving `old` to `new`: every other loaded file
/// importing `old` gets its import string recomputed from its own location.
pub fn rename_file_edits(db: Db<'_>, old: &FileUri, new: &FileUri) -> SourceChange {
    let mut change = SourceChange::new();
    if old.extension() != Some(TACT_EXT) || new.extension() != Some(TACT_EXT) {
        return change;
    }
    let imports = db.imports();
    for importer in db.files.iter() {
        if importer.uri() == old {
            continue;
        }
        for import in importer.imports() {
            if imports.resolve(importer.uri(), &import.path).as_ref() != Some(old) {
                continue;
            }
            let path = new_import_path(db, importer.uri(), &import.path, new);
            change.insert_edit(
                importer.uri().clone(),
                TextEdit::replace(import.range, format!("\"{path}\"")),
            );
        }
    }
    debug!(%old, %new, files = change.len(), "import edits for file rename");
    change
}

fn new_import_path(db: Db<'_>, importer: &FileUri, old_path: &str, new: &FileUri) -> String {
    if old_path.starts_with(STDLIB_IMPORT_PREFIX)
        && let Some(libs) = db.config.stdlib_root().map(|r| r.join(STDLIB_LIBS_DIR))
        && new.is_under(&libs)
    {
        let libs_uri = FileUri::from_path(&libs);
        let rest = new.path()[libs_uri.path().len()..].trim_start_matches('/');
        let rest = rest
            .strip_suffix(&format!(".{TACT_EXT}"))
            .unwrap_or(rest);
        return format!("{STDLIB_IMPORT_PREFIX}{rest}");
    }
    importer.relative_import_path(new)
}
