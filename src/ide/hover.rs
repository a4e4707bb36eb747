//! Hover information and type-at-cursor.

use std::sync::Arc;

use crate::base::{Span, TextRange, TextSize};
use crate::hir::{
    BindingKind, Db, Decl, Declaration, File, Function, MembersOwner, Ty, type_ref_text,
};
use crate::parser::Field as NodeField;

use super::leaf_at;

/// Result of a hover request.
#[derive(Clone, Debug)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// Range of the hovered name.
    pub range: TextRange,
    pub span: Span,
}

/// Type of the expression or declaration under the cursor; `None` when it
/// cannot be inferred.
pub fn type_at(db: Db<'_>, file: &Arc<File>, offset: TextSize) -> Option<Ty> {
    let leaf = leaf_at(file, offset)?;
    let ty = db.infer(&leaf);
    (!ty.is_unknown()).then_some(ty)
}

/// Declaration presentation and documentation of the name under the cursor,
/// or just its type for other expressions.
pub fn hover(db: Db<'_>, file: &Arc<File>, offset: TextSize) -> Option<HoverResult> {
    let leaf = leaf_at(file, offset)?;
    let contents = match db.resolve(&leaf) {
        Some(decl) => {
            let mut contents = code_block(&presentation(db, &decl));
            if let Declaration::MessageType(_) = decl {
                let size = Ty::from_declaration(&decl).size_of(db);
                contents.push_str(&format!("\n\nSize: {size}"));
            }
            if let Some(doc) = decl.doc_comment() {
                contents.push_str("\n\n");
                contents.push_str(&doc);
            }
            contents
        }
        None => {
            let ty = db.infer(&leaf);
            if ty.is_unknown() {
                return None;
            }
            code_block(&ty.to_string())
        }
    };
    Some(HoverResult {
        contents,
        range: leaf.range(),
        span: leaf.span(),
    })
}

fn code_block(text: &str) -> String {
    format!("```tact\n{text}\n```")
}

/// One-line rendering of a declaration, as it would be written in source.
pub fn presentation(db: Db<'_>, decl: &Declaration) -> String {
    match decl {
        Declaration::Function(f) => function_presentation(f),
        Declaration::Contract(c) => owner_presentation("contract", c),
        Declaration::Trait(t) => owner_presentation("trait", t),
        Declaration::MessageType(m) => {
            if !m.is_message() {
                return format!("struct {}", m.name());
            }
            match m.opcode(db) {
                Some(opcode) => format!("message(0x{opcode:x}) {}", m.name()),
                None => format!("message {}", m.name()),
            }
        }
        Declaration::Primitive(p) => format!("primitive {}", p.name()),
        Declaration::Field(f) => match f.owner() {
            Some(owner) => format!("{}.{}", owner.name(), f.presentation()),
            None => f.presentation(),
        },
        Declaration::Constant(c) => {
            let mut out = String::new();
            for (set, word) in [
                (c.is_abstract(), "abstract "),
                (c.is_virtual(), "virtual "),
                (c.is_override(), "override "),
            ] {
                if set {
                    out.push_str(word);
                }
            }
            out.push_str("const ");
            out.push_str(&c.name());
            if let Some(ty) = type_ref_text(c.node(), NodeField::Type) {
                out.push_str(": ");
                out.push_str(&ty);
            }
            if let Some(value) = c.value() {
                out.push_str(" = ");
                out.push_str(value.text());
            }
            out
        }
        Declaration::Parameter(p) => p.presentation(),
        Declaration::Variable(v) => {
            let ty = db.infer(v.node());
            let keyword = match v.binding_kind() {
                Some(BindingKind::Catch) => "catch",
                Some(BindingKind::ForeachKey | BindingKind::ForeachValue) => "foreach",
                _ => "let",
            };
            if ty.is_unknown() {
                format!("{keyword} {}", v.name())
            } else {
                format!("{keyword} {}: {ty}", v.name())
            }
        }
    }
}

fn function_presentation(f: &Function) -> String {
    let mut out = String::new();
    for (set, word) in [
        (f.is_get(), "get "),
        (f.is_abstract(), "abstract "),
        (f.is_virtual(), "virtual "),
        (f.is_override(), "override "),
        (f.is_inline(), "inline "),
        (f.is_extends(), "extends "),
        (f.is_mutates(), "mutates "),
        (f.is_native(), "native "),
        (f.is_asm(), "asm "),
    ] {
        if set {
            out.push_str(word);
        }
    }
    out.push_str(&f.signature());
    out
}

fn owner_presentation(keyword: &str, owner: &dyn MembersOwner) -> String {
    let traits = owner.trait_names();
    if traits.is_empty() {
        format!("{keyword} {}", owner.name())
    } else {
        format!("{keyword} {} with {}", owner.name(), traits.join(", "))
    }
}
