//! Type values.
//!
//! [`Ty`] is compared by shape: names, serialization and nesting. Named types
//! remember the declaration they came from so member lookup can find fields
//! and methods, but that anchor never takes part in equality.

use std::fmt;
use std::ops::Add;

use smol_str::SmolStr;

use super::db::Db;
use super::decls::{Decl, Declaration};

/// Struct, message, contract or trait type.
#[derive(Clone, Debug)]
pub struct NamedTy {
    pub name: SmolStr,
    pub anchor: Option<Declaration>,
}

impl NamedTy {
    pub fn new(name: impl Into<SmolStr>, anchor: Option<Declaration>) -> Self {
        Self {
            name: name.into(),
            anchor,
        }
    }
}

impl PartialEq for NamedTy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NamedTy {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ty {
    /// `Int`, `Bool`, `Address`, … with an optional `as` serialization.
    Primitive {
        name: SmolStr,
        serialization: Option<SmolStr>,
    },
    Struct(NamedTy),
    Message(NamedTy),
    Contract(NamedTy),
    Trait(NamedTy),
    /// Never directly nested; see [`Ty::option`].
    Option(Box<Ty>),
    Map {
        key: Box<Ty>,
        value: Box<Ty>,
    },
    Bounced(Box<Ty>),
    Null,
    Unknown,
}

impl Ty {
    pub fn primitive(name: impl Into<SmolStr>) -> Ty {
        Ty::Primitive {
            name: name.into(),
            serialization: None,
        }
    }

    pub fn int() -> Ty {
        Ty::primitive("Int")
    }

    pub fn bool() -> Ty {
        Ty::primitive("Bool")
    }

    pub fn string() -> Ty {
        Ty::primitive("String")
    }

    /// `T?`. Already-optional and unknown types are returned unchanged.
    pub fn option(inner: Ty) -> Ty {
        match inner {
            Ty::Option(_) | Ty::Unknown | Ty::Null => inner,
            other => Ty::Option(Box::new(other)),
        }
    }

    pub fn map(key: Ty, value: Ty) -> Ty {
        Ty::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Attaches an `as` serialization; only serializable primitives carry one.
    pub fn with_serialization(self, serialization: Option<SmolStr>) -> Ty {
        match (self, serialization) {
            (Ty::Primitive { name, .. }, Some(ser)) if SERIALIZABLE.contains(&name.as_str()) => {
                Ty::Primitive {
                    name,
                    serialization: Some(ser),
                }
            }
            (ty, _) => ty,
        }
    }

    /// Type introduced by a type-like declaration.
    pub fn from_declaration(decl: &Declaration) -> Ty {
        let named = || NamedTy::new(decl.name(), Some(decl.clone()));
        match decl {
            Declaration::Primitive(_) => Ty::primitive(decl.name()),
            Declaration::MessageType(m) if m.is_message() => Ty::Message(named()),
            Declaration::MessageType(_) => Ty::Struct(named()),
            Declaration::Contract(_) => Ty::Contract(named()),
            Declaration::Trait(_) => Ty::Trait(named()),
            _ => Ty::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Ty::Unknown)
    }

    pub fn is_option(&self) -> bool {
        matches!(self, Ty::Option(_))
    }

    /// `T` for `T?`, the type itself otherwise.
    pub fn unwrap_option(&self) -> &Ty {
        match self {
            Ty::Option(inner) => inner,
            other => other,
        }
    }

    pub fn anchor(&self) -> Option<&Declaration> {
        match self {
            Ty::Struct(n) | Ty::Message(n) | Ty::Contract(n) | Ty::Trait(n) => n.anchor.as_ref(),
            _ => None,
        }
    }

    /// Name without serialization: `Int`, `Foo?`, `map<Int, Cell>`.
    pub fn name(&self) -> String {
        match self {
            Ty::Primitive { name, .. } => name.to_string(),
            Ty::Struct(n) | Ty::Message(n) | Ty::Contract(n) | Ty::Trait(n) => n.name.to_string(),
            Ty::Option(inner) => format!("{}?", inner.name()),
            Ty::Map { key, value } => format!("map<{}, {}>", key.name(), value.name()),
            Ty::Bounced(inner) => format!("bounced<{}>", inner.name()),
            Ty::Null => "null".to_string(),
            Ty::Unknown => "<unknown>".to_string(),
        }
    }

    /// Serialized size in bits.
    pub fn size_of(&self, db: Db<'_>) -> SizeOf {
        self.size_of_at(db, 0)
    }

    fn size_of_at(&self, db: Db<'_>, depth: usize) -> SizeOf {
        // recursive structs
        if depth > MAX_SIZE_DEPTH {
            return SizeOf::INVALID;
        }
        match self {
            Ty::Primitive {
                name,
                serialization,
            } => primitive_size(name, serialization.as_deref()),
            Ty::Option(inner) => inner.size_of_at(db, depth + 1) + SizeOf::fixed(1),
            Ty::Bounced(inner) => inner.size_of_at(db, depth + 1),
            Ty::Struct(n) | Ty::Message(n) => {
                let Some(Declaration::MessageType(decl)) = &n.anchor else {
                    return SizeOf::INVALID;
                };
                let header = if decl.is_message() {
                    SizeOf::fixed(MESSAGE_HEADER_BITS)
                } else {
                    SizeOf::fixed(0)
                };
                decl.fields().iter().fold(header, |acc, field| {
                    let ty = db.infer(field.node());
                    acc + ty.size_of_at(db, depth + 1)
                })
            }
            Ty::Map { .. } | Ty::Contract(_) | Ty::Trait(_) | Ty::Null | Ty::Unknown => {
                SizeOf::INVALID
            }
        }
    }

    /// Field names and types of a struct or message type, in order.
    pub fn fields(&self, db: Db<'_>) -> Vec<(SmolStr, Ty)> {
        match self.anchor() {
            Some(Declaration::MessageType(m)) => m
                .fields()
                .iter()
                .map(|f| (f.name(), db.infer(f.node())))
                .collect(),
            Some(decl) => decl
                .as_members_owner()
                .map(|owner| {
                    owner
                        .fields(db)
                        .iter()
                        .map(|f| (f.name(), db.infer(f.node())))
                        .collect()
                })
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Primitive {
                name,
                serialization: Some(ser),
            } => write!(f, "{name} as {ser}"),
            Ty::Option(inner) => write!(f, "{inner}?"),
            Ty::Map { key, value } => write!(f, "map<{key}, {value}>"),
            Ty::Bounced(inner) => write!(f, "bounced<{inner}>"),
            other => f.write_str(&other.name()),
        }
    }
}

// ============================================================================
// SIZE OF
// ============================================================================

/// Primitives that accept an `as` serialization.
const SERIALIZABLE: &[&str] = &["Int", "Cell", "Slice", "Builder", "String"];

const MAX_SIZE_DEPTH: usize = 32;
const MESSAGE_HEADER_BITS: u32 = 32;

/// `fixed` bits always present plus up to `floating` more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeOf {
    pub fixed: u32,
    pub floating: u32,
    pub valid: bool,
}

impl SizeOf {
    pub const INVALID: SizeOf = SizeOf {
        fixed: 0,
        floating: 0,
        valid: false,
    };

    pub fn fixed(bits: u32) -> SizeOf {
        SizeOf {
            fixed: bits,
            floating: 0,
            valid: true,
        }
    }

    pub fn floating(fixed: u32, floating: u32) -> SizeOf {
        SizeOf {
            fixed,
            floating,
            valid: true,
        }
    }
}

impl Add for SizeOf {
    type Output = SizeOf;

    fn add(self, rhs: SizeOf) -> SizeOf {
        if !self.valid || !rhs.valid {
            return SizeOf::INVALID;
        }
        SizeOf::floating(self.fixed + rhs.fixed, self.floating + rhs.floating)
    }
}

impl fmt::Display for SizeOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            f.write_str("unknown size")
        } else if self.floating == 0 {
            write!(f, "{} bits", self.fixed)
        } else {
            write!(f, "{} bits plus up to {} bits", self.fixed, self.floating)
        }
    }
}

fn primitive_size(name: &str, serialization: Option<&str>) -> SizeOf {
    match (name, serialization) {
        ("Int", None) => SizeOf::fixed(257),
        ("Int", Some("coins" | "varuint16" | "varint16")) => SizeOf::floating(4, 120),
        ("Int", Some("varuint32" | "varint32")) => SizeOf::floating(5, 248),
        ("Int", Some(ser)) => ser
            .strip_prefix("uint")
            .or_else(|| ser.strip_prefix("int"))
            .and_then(|bits| bits.parse().ok())
            .map(SizeOf::fixed)
            .unwrap_or(SizeOf::INVALID),
        ("Bool", _) => SizeOf::fixed(1),
        ("Address", _) => SizeOf::fixed(267),
        ("Cell" | "Slice" | "Builder" | "String", _) => SizeOf::floating(0, 1023),
        _ => SizeOf::INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_never_nests() {
        let opt = Ty::option(Ty::int());
        assert_eq!(Ty::option(opt.clone()), opt);
        assert_eq!(Ty::option(Ty::Unknown), Ty::Unknown);
        assert_eq!(opt.name(), "Int?");
    }

    #[test]
    fn named_types_compare_by_name() {
        let a = Ty::Struct(NamedTy::new("Point", None));
        let b = Ty::Struct(NamedTy::new("Point", None));
        assert_eq!(a, b);
        assert_ne!(a, Ty::Message(NamedTy::new("Point", None)));
    }

    #[test]
    fn serialization_is_kept_and_shown() {
        let ty = Ty::int().with_serialization(Some("uint8".into()));
        assert_eq!(ty.to_string(), "Int as uint8");
        assert_eq!(ty.name(), "Int");
        assert_ne!(ty, Ty::int());
        assert_eq!(Ty::bool().with_serialization(Some("x".into())), Ty::bool());
        let cell = Ty::primitive("Cell").with_serialization(Some("remaining".into()));
        assert_eq!(cell.to_string(), "Cell as remaining");
        let address = Ty::primitive("Address").with_serialization(Some("bytes32".into()));
        assert_eq!(address, Ty::primitive("Address"));
    }

    #[test]
    fn primitive_sizes() {
        assert_eq!(primitive_size("Int", None), SizeOf::fixed(257));
        assert_eq!(primitive_size("Int", Some("uint8")), SizeOf::fixed(8));
        assert_eq!(primitive_size("Int", Some("coins")), SizeOf::floating(4, 120));
        assert_eq!(primitive_size("Address", None), SizeOf::fixed(267));
        assert!(!primitive_size("Foo", None).valid);
    }

    #[test]
    fn size_presentation() {
        assert_eq!(SizeOf::fixed(8).to_string(), "8 bits");
        assert_eq!(
            (SizeOf::fixed(1) + SizeOf::floating(4, 120)).to_string(),
            "5 bits plus up to 120 bits"
        );
        assert_eq!((SizeOf::fixed(1) + SizeOf::INVALID).to_string(), "unknown size");
    }
}
