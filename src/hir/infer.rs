//! Type inference.
//!
//! [`TypeInferer::infer`] accepts any node. Nodes without a rule of their own
//! (operators, keywords, punctuation) are inferred as their parent, walking up
//! until a rule applies; the walk never leaves the enclosing statement.
//!
//! Inference never guesses: an unresolved name, call or receiver is
//! [`Ty::Unknown`], and every operation on an unknown operand stays unknown.
//! `as` serializations are carried into the primitive they annotate.

use smol_str::SmolStr;

use crate::base::constants::{BUILTIN_PRIMITIVES, STATE_INIT};
use crate::parser::{Field as NodeField, SyntaxKind};

use super::db::Db;
use super::decls::{BindingKind, Decl, Declaration, Variable};
use super::index::IndexKey;
use super::node::Node;
use super::ty::Ty;

#[derive(Clone, Copy)]
pub struct TypeInferer<'a> {
    db: Db<'a>,
}

impl<'a> TypeInferer<'a> {
    pub fn new(db: Db<'a>) -> Self {
        Self { db }
    }

    /// Type at `node`. Memoized.
    pub fn infer(&self, node: &Node) -> Ty {
        self.db
            .caches
            .type_memo(node, self.db.revision(), || self.infer_uncached(node))
    }

    fn infer_uncached(&self, node: &Node) -> Ty {
        if let Some(ty) = self.infer_rule(node) {
            return ty;
        }
        if node.kind().is_statement() {
            return Ty::Unknown;
        }
        match node.parent() {
            Some(parent) => self.infer(&parent),
            None => Ty::Unknown,
        }
    }

    fn infer_rule(&self, node: &Node) -> Option<Ty> {
        let ty = match node.kind() {
            SyntaxKind::INTEGER => Ty::int(),
            SyntaxKind::STRING => Ty::string(),
            SyntaxKind::BOOLEAN => Ty::bool(),
            SyntaxKind::NULL => Ty::Null,

            SyntaxKind::MAP_TYPE | SyntaxKind::BOUNCED_TYPE => self.type_node_ty(node),
            SyntaxKind::TYPE_IDENTIFIER if is_type_position(node) => self.type_node_ty(node),
            SyntaxKind::IDENTIFIER | SyntaxKind::TYPE_IDENTIFIER | SyntaxKind::SELF => {
                match self.db.resolve(node) {
                    Some(decl) => self.declaration_type(&decl),
                    None => self.builtin(node.text()),
                }
            }

            SyntaxKind::INSTANCE_EXPRESSION | SyntaxKind::DESTRUCT_STATEMENT => {
                let name = node.child_by_field(NodeField::Name)?;
                self.type_node_ty(&name)
            }
            SyntaxKind::NON_NULL_ASSERT_EXPRESSION => {
                let argument = node.child_by_field(NodeField::Argument)?;
                self.infer(&argument).unwrap_option().clone()
            }
            SyntaxKind::INIT_OF => self
                .db
                .index
                .element_by_name(IndexKey::Structs, STATE_INIT)
                .map(|decl| Ty::from_declaration(&decl))
                .unwrap_or(Ty::Unknown),
            SyntaxKind::PARENTHESIZED_EXPRESSION => {
                let value = node.child_by_field(NodeField::Value)?;
                self.infer(&value)
            }

            SyntaxKind::PARAMETER
            | SyntaxKind::FIELD
            | SyntaxKind::STORAGE_VARIABLE
            | SyntaxKind::GLOBAL_CONSTANT
            | SyntaxKind::STORAGE_CONSTANT => self.declared_type(node),
            SyntaxKind::LET_STATEMENT => {
                let name = node.child_by_field(NodeField::Name)?;
                self.variable_type(&Variable::new(name))
            }
            SyntaxKind::DESTRUCT_BIND | SyntaxKind::CATCH_CLAUSE => {
                let name = node
                    .child_by_field(NodeField::Bind)
                    .or_else(|| node.child_by_field(NodeField::Name))?;
                self.variable_type(&Variable::new(name))
            }
            SyntaxKind::CONTRACT
            | SyntaxKind::TRAIT
            | SyntaxKind::STRUCT
            | SyntaxKind::MESSAGE
            | SyntaxKind::PRIMITIVE => Declaration::cast(node.clone())
                .map(|decl| Ty::from_declaration(&decl))
                .unwrap_or(Ty::Unknown),

            SyntaxKind::FIELD_ACCESS_EXPRESSION => {
                let name = node.child_by_field(NodeField::Name)?;
                self.infer(&name)
            }
            SyntaxKind::METHOD_CALL_EXPRESSION | SyntaxKind::STATIC_CALL_EXPRESSION => {
                self.call_type(node)
            }
            SyntaxKind::UNARY_EXPRESSION => self.unary_type(node),
            SyntaxKind::BINARY_EXPRESSION => self.binary_type(node),
            SyntaxKind::TERNARY_EXPRESSION => {
                let consequence = node
                    .child_by_field(NodeField::Consequence)
                    .map(|c| self.infer(&c))
                    .unwrap_or(Ty::Unknown);
                match consequence {
                    Ty::Null => node
                        .child_by_field(NodeField::Alternative)
                        .map(|a| Ty::option(self.infer(&a)))
                        .unwrap_or(Ty::Unknown),
                    other => other,
                }
            }
            kind if kind.is_function() => Ty::Unknown,
            _ => return None,
        };
        Some(ty)
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    /// Type of a value bound by `decl`, or the type `decl` introduces.
    pub fn declaration_type(&self, decl: &Declaration) -> Ty {
        match decl {
            Declaration::Variable(v) => self.variable_type(v),
            Declaration::Parameter(_) | Declaration::Field(_) | Declaration::Constant(_) => {
                self.declared_type(decl.node())
            }
            Declaration::Contract(_)
            | Declaration::Trait(_)
            | Declaration::MessageType(_)
            | Declaration::Primitive(_) => Ty::from_declaration(decl),
            Declaration::Function(_) => Ty::Unknown,
        }
    }

    /// `name: Type` of parameters, fields and constants; an untyped
    /// constant takes the type of its value.
    fn declared_type(&self, node: &Node) -> Ty {
        if node.child_by_field(NodeField::Type).is_some() {
            return self.type_ref(node, NodeField::Type);
        }
        node.child_by_field(NodeField::Value)
            .map(|value| self.infer(&value))
            .unwrap_or(Ty::Unknown)
    }

    fn variable_type(&self, var: &Variable) -> Ty {
        let Some(holder) = var.declaration_node() else {
            return Ty::Unknown;
        };
        match var.binding_kind() {
            Some(BindingKind::Let) => self.declared_type(&holder),
            Some(BindingKind::Destruct) => {
                let Some(field_name) = holder.child_by_field(NodeField::Name) else {
                    return Ty::Unknown;
                };
                let statement = holder.parent().and_then(|list| list.parent());
                let Some(owner_ty) = statement.map(|stmt| self.infer(&stmt)) else {
                    return Ty::Unknown;
                };
                owner_ty
                    .fields(self.db)
                    .into_iter()
                    .find(|(name, _)| name == field_name.text())
                    .map(|(_, ty)| ty)
                    .unwrap_or(Ty::Unknown)
            }
            Some(kind @ (BindingKind::ForeachKey | BindingKind::ForeachValue)) => {
                let Some(map) = holder.child_by_field(NodeField::Map) else {
                    return Ty::Unknown;
                };
                match self.infer(&map).unwrap_option() {
                    Ty::Map { key, value } if kind == BindingKind::ForeachKey => (**key).clone(),
                    Ty::Map { value, .. } => (**value).clone(),
                    _ => Ty::Unknown,
                }
            }
            Some(BindingKind::Catch) => Ty::int(),
            None => Ty::Unknown,
        }
    }

    // ------------------------------------------------------------------------
    // Type references
    // ------------------------------------------------------------------------

    /// Type written under `field` of `owner`, with its `?` and `as` suffixes.
    pub fn type_ref(&self, owner: &Node, field: NodeField) -> Ty {
        let Some(type_node) = owner.child_by_field(field) else {
            return Ty::Unknown;
        };
        let mut ty = self.type_node_ty(&type_node);
        let mut optional = false;
        let mut next = type_node.syntax().next_significant_sibling();
        if let Some(question) = next
            && question.kind() == SyntaxKind::QUESTION
        {
            optional = true;
            next = question.next_significant_sibling();
        }
        if let Some(tlb) = next
            && tlb.kind() == SyntaxKind::TLB_SERIALIZATION
        {
            ty = ty.with_serialization(serialization(&type_node.with_syntax(tlb)));
        }
        if optional { Ty::option(ty) } else { ty }
    }

    fn type_node_ty(&self, node: &Node) -> Ty {
        match node.kind() {
            SyntaxKind::MAP_TYPE => {
                let part = |name: NodeField, tlb: NodeField| {
                    let ty = node
                        .child_by_field(name)
                        .map(|n| self.type_node_ty(&n))
                        .unwrap_or(Ty::Unknown);
                    ty.with_serialization(node.child_by_field(tlb).as_ref().and_then(serialization))
                };
                Ty::map(
                    part(NodeField::Key, NodeField::KeyTlb),
                    part(NodeField::Value, NodeField::ValueTlb),
                )
            }
            SyntaxKind::BOUNCED_TYPE => {
                let inner = node
                    .child_by_field(NodeField::Message)
                    .map(|m| self.type_node_ty(&m))
                    .unwrap_or(Ty::Unknown);
                Ty::Bounced(Box::new(inner))
            }
            _ => match self.db.resolve(node) {
                Some(
                    decl @ (Declaration::Contract(_)
                    | Declaration::Trait(_)
                    | Declaration::MessageType(_)
                    | Declaration::Primitive(_)),
                ) => Ty::from_declaration(&decl),
                _ => self.builtin(node.text()),
            },
        }
    }

    fn builtin(&self, name: &str) -> Ty {
        if BUILTIN_PRIMITIVES.contains(&name) {
            Ty::primitive(name)
        } else {
            Ty::Unknown
        }
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn call_type(&self, call: &Node) -> Ty {
        let Some(name) = call.child_by_field(NodeField::Name) else {
            return Ty::Unknown;
        };
        let Some(Declaration::Function(fun)) = self.db.resolve(&name) else {
            return Ty::Unknown;
        };
        // `Foo.fromCell(c)` is a `Foo`, not an `AnyStruct`
        if let Some(ret) = fun.return_type_node()
            && matches!(ret.text(), "AnyStruct" | "AnyMessage")
            && let Some(object) = call.child_by_field(NodeField::Object)
        {
            return self.infer(&object);
        }
        self.type_ref(fun.node(), NodeField::Result)
    }

    fn unary_type(&self, node: &Node) -> Ty {
        let (Some(op), Some(argument)) = (
            node.child_by_field(NodeField::Operator),
            node.child_by_field(NodeField::Argument),
        ) else {
            return Ty::Unknown;
        };
        if self.infer(&argument).is_unknown() {
            return Ty::Unknown;
        }
        match op.kind() {
            SyntaxKind::BANG | SyntaxKind::BANG_BANG => Ty::bool(),
            _ => Ty::int(),
        }
    }

    fn binary_type(&self, node: &Node) -> Ty {
        let (Some(left), Some(right), Some(op)) = (
            node.child_by_field(NodeField::Left),
            node.child_by_field(NodeField::Right),
            node.child_by_field(NodeField::Operator),
        ) else {
            return Ty::Unknown;
        };
        let left = self.infer(&left);
        let right = self.infer(&right);
        if left.is_unknown() || right.is_unknown() {
            return Ty::Unknown;
        }
        match op.kind() {
            SyntaxKind::AMP_AMP
            | SyntaxKind::PIPE_PIPE
            | SyntaxKind::EQ_EQ
            | SyntaxKind::BANG_EQ
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::LT_EQ
            | SyntaxKind::GT_EQ => Ty::bool(),
            SyntaxKind::PLUS if left.name() == "String" && right.name() == "String" => {
                Ty::string()
            }
            _ => Ty::int(),
        }
    }
}

/// Type names written in a type position rather than used as a value.
fn is_type_position(node: &Node) -> bool {
    match node.field() {
        Some(
            NodeField::Type
            | NodeField::Result
            | NodeField::Key
            | NodeField::Message
            | NodeField::Traits,
        ) => true,
        Some(NodeField::Value) => node
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::MAP_TYPE),
        _ => false,
    }
}

/// `uint8` of an `as uint8` node.
fn serialization(tlb: &Node) -> Option<SmolStr> {
    tlb.child_by_field(NodeField::Name)
        .map(|name| SmolStr::new(name.text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::test_db::TestDb;

    fn infer(source: &str, word: &str, nth: usize) -> Ty {
        let t = TestDb::new(&[("/p/a.tact", source)]);
        let node = t.node_at("/p/a.tact", word, nth);
        t.db().infer(&node)
    }

    #[test]
    fn literals_and_let_hints() {
        let src = "fun f() { let a = 1; let b: Int as uint8 = a; let c = \"s\" + \"t\"; a; b; c; }";
        assert_eq!(infer(src, "a", 3), Ty::int());
        assert_eq!(infer(src, "b", 2).to_string(), "Int as uint8");
        assert_eq!(infer(src, "c", 2), Ty::string());
    }

    #[test]
    fn optional_fields_and_unwrap() {
        let src = "struct Box { inner: Int?; }\nfun f(b: Box) { b.inner; b.inner!!; }";
        assert_eq!(infer(src, "inner", 2), Ty::option(Ty::int()));
        assert_eq!(infer(src, "inner", 3), Ty::option(Ty::int()));
        // the `!!` token itself lands on the assertion
        let t = TestDb::new(&[("/p/a.tact", src)]);
        let file = t.file("/p/a.tact");
        let bang = file.text().rfind("!!").unwrap() + 1;
        let leaf = file
            .tree()
            .leaf_at_offset(crate::base::TextSize::new(bang as u32))
            .unwrap()
            .index();
        assert_eq!(t.db().infer(&Node::new(file, leaf)), Ty::int());
    }

    #[test]
    fn unknown_propagates_through_operations() {
        let src = "fun f() { let x = missing() + 1; let y = x * 2; y; }";
        assert!(infer(src, "x", 2).is_unknown());
        assert!(infer(src, "y", 2).is_unknown());
    }

    #[test]
    fn comparisons_are_bool() {
        let src = "fun f(a: Int) { let ok = a > 1 && !false; ok; }";
        assert_eq!(infer(src, "ok", 2), Ty::bool());
    }

    #[test]
    fn foreach_bindings_take_map_types() {
        let src = "fun f(m: map<Int as uint8, Bool>) { foreach (k, v in m) { k; v; } }";
        assert_eq!(infer(src, "k", 2).to_string(), "Int as uint8");
        assert_eq!(infer(src, "v", 2), Ty::bool());
    }

    #[test]
    fn destructured_fields_take_field_types() {
        let src = "struct P { x: Int; flag: Bool; }\nfun f(p: P) { let P { x, flag: ok } = p; x; ok; }";
        assert_eq!(infer(src, "x", 3), Ty::int());
        assert_eq!(infer(src, "ok", 2), Ty::bool());
    }

    #[test]
    fn calls_use_declared_return_types() {
        let src = "fun g(): Address { return sender(); }\nfun f() { let a = g(); a; }";
        assert_eq!(infer(src, "a", 2), Ty::primitive("Address"));
    }
}
