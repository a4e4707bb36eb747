//! File extensions and standard library layout.

/// Extension of primary-language source files.
pub const TACT_EXT: &str = "tact";

/// Extensions of low-level FunC sources.
pub const FUNC_EXTS: &[&str] = &["fc", "func"];

/// Extensions of Fift assembly listings.
pub const FIFT_EXTS: &[&str] = &["fif", "fift"];

/// Extension of TL-B binary-layout schemas.
pub const TLB_EXT: &str = "tlb";

/// Import prefix that addresses the standard library.
pub const STDLIB_IMPORT_PREFIX: &str = "@stdlib/";

/// Directory under the stdlib root holding importable libraries.
pub const STDLIB_LIBS_DIR: &str = "libs";

/// Trait every contract and trait inherits implicitly.
pub const BASE_TRAIT: &str = "BaseTrait";

/// Primitive types known even when no `primitive` declaration is loaded.
pub const BUILTIN_PRIMITIVES: &[&str] = &[
    "Int",
    "Bool",
    "Address",
    "Cell",
    "Slice",
    "Builder",
    "String",
    "StringBuilder",
];

/// Struct produced by `initOf`.
pub const STATE_INIT: &str = "StateInit";
