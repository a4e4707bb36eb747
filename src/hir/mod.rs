//! High-level IR (HIR) - the semantic model over parsed files.
//!
//! Everything here is a pure query over an immutable snapshot: the
//! [`FileCache`] of parsed files, the [`WorkspaceIndex`] of top-level
//! declarations and the [`CacheManager`] memoizing resolution and inference.
//! [`Db`] bundles borrows of the three and is what every query takes.
//!
//! ## Key Types
//!
//! - [`File`] / [`Node`] - one parse of one URI, and an owning node handle
//! - [`Declaration`] - tagged union of everything a name can refer to
//! - [`Resolver`] - name occurrence to declaration
//! - [`TypeInferer`] / [`Ty`] - expression and declaration types
//! - [`Referent`] - declaration back to its usages
//! - [`WorkspaceIndex`] - per-file declaration lists by [`IndexKey`]
//!
//! ## Query Layers
//!
//! ```text
//! File (text + tree)          ← replaced whole on every edit
//!     │
//!     ▼
//! FileIndex                   ← top-level declarations (per file)
//!     │
//!     ▼
//! WorkspaceIndex              ← ordered FileIndexes, revision counter
//!     │
//!     ▼
//! resolve(node) ⇄ infer(node) ← memoized per (file generation, revision)
//!     │
//!     ▼
//! Referent, implementations   ← usage and hierarchy search
//! ```

mod cache;
mod db;
mod decls;
mod diagnostics;
mod file;
mod files;
mod implementations;
mod import;
mod index;
mod infer;
mod node;
mod referent;
mod resolve;
mod ty;

#[cfg(test)]
pub(crate) mod test_db;

pub use cache::{CacheManager, CacheStats};
pub use db::Db;
pub use decls::{
    BindingKind, Constant, Contract, Decl, Declaration, Field, Function, MembersOwner,
    MessageType, Parameter, Primitive, Trait, Variable, compute_method_id, crc16, parse_integer,
    type_ref_text,
};
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, DiagnosticTag, RelatedInfo, Severity, codes,
};
pub use file::{File, FileOrigin, Import};
pub use files::FileCache;
pub use implementations::{
    function_implementations, implementations, implementations_of, super_constant, super_field,
    super_method,
};
pub use import::ImportResolver;
pub use index::{FileIndex, IndexKey, WorkspaceIndex};
pub use infer::TypeInferer;
pub use node::Node;
pub use referent::{ReferenceOptions, Referent};
pub use resolve::{ResolveState, Resolver, ScopeProcessor, is_name_occurrence, qualifier_of};
pub use ty::{NamedTy, SizeOf, Ty};

pub(crate) use file::unquote;
