//! Declaration model.
//!
//! Every named definition is a [`Declaration`]: a tag plus a typed view over
//! the defining [`Node`]. Views are plain newtypes; variants are told apart by
//! the file's classification table, never by inspecting raw kinds ad hoc.
//!
//! Two declarations are equal when they sit on the same node, so a contract
//! parameter seen as a `Parameter` and as a `Field` is the same declaration.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::constants::BASE_TRAIT;
use crate::parser::{Field as NodeField, SyntaxKind};
use crate::syntax::{DeclKind, NodeId};

use super::db::Db;
use super::node::Node;

// ============================================================================
// SHARED INTERFACE
// ============================================================================

pub trait Decl {
    /// The defining node (for variables: the bound name itself).
    fn node(&self) -> &Node;

    fn kind(&self) -> DeclKind;

    fn name_node(&self) -> Option<Node> {
        self.node().child_by_field(NodeField::Name)
    }

    fn name(&self) -> SmolStr {
        self.name_node()
            .map(|n| SmolStr::new(n.text()))
            .unwrap_or_default()
    }

    /// Enclosing contract, trait, struct or message.
    fn owner(&self) -> Option<Declaration> {
        let owner = self.node().parent_of_kind(&[
            SyntaxKind::CONTRACT,
            SyntaxKind::TRAIT,
            SyntaxKind::STRUCT,
            SyntaxKind::MESSAGE,
        ])?;
        Declaration::cast(owner)
    }

    fn doc_comment(&self) -> Option<String> {
        doc_comment(self.node())
    }

    fn is_deprecated(&self) -> bool {
        self.doc_comment()
            .is_some_and(|doc| doc.contains("Deprecated"))
    }
}

macro_rules! decl_views {
    ($($(#[$meta:meta])* $view:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, PartialEq, Eq, Hash)]
            pub struct $view(Node);

            impl $view {
                pub fn new(node: Node) -> Self {
                    Self(node)
                }
            }

            impl fmt::Debug for $view {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({:?})", stringify!($view), self.0)
                }
            }
        )*
    };
}

decl_views! {
    /// Global, native, asm and member functions, and `init`.
    Function,
    Contract,
    Trait,
    /// Struct/message field, storage variable or contract parameter.
    Field,
    Constant,
    Parameter,
    /// A local binding. Wraps the bound name identifier.
    Variable,
    /// Struct or message.
    MessageType,
    Primitive,
}

macro_rules! plain_decl {
    ($($view:ident => $kind:ident),* $(,)?) => {
        $(
            impl Decl for $view {
                fn node(&self) -> &Node {
                    &self.0
                }

                fn kind(&self) -> DeclKind {
                    DeclKind::$kind
                }
            }
        )*
    };
}

plain_decl! {
    Contract => Contract,
    Trait => Trait,
    Field => Field,
    Constant => Constant,
    Parameter => Parameter,
    MessageType => MessageType,
    Primitive => Primitive,
}

impl Decl for Function {
    fn node(&self) -> &Node {
        &self.0
    }

    fn kind(&self) -> DeclKind {
        DeclKind::Function
    }

    fn name(&self) -> SmolStr {
        if self.is_init() {
            return SmolStr::new_static("init");
        }
        self.name_node()
            .map(|n| SmolStr::new(n.text()))
            .unwrap_or_default()
    }
}

impl Decl for Variable {
    fn node(&self) -> &Node {
        &self.0
    }

    fn kind(&self) -> DeclKind {
        DeclKind::Variable
    }

    fn name_node(&self) -> Option<Node> {
        Some(self.0.clone())
    }

    fn doc_comment(&self) -> Option<String> {
        None
    }
}

// ============================================================================
// DECLARATION
// ============================================================================

#[derive(Clone)]
pub enum Declaration {
    Function(Function),
    Contract(Contract),
    Trait(Trait),
    Field(Field),
    Constant(Constant),
    Parameter(Parameter),
    Variable(Variable),
    MessageType(MessageType),
    Primitive(Primitive),
}

impl Declaration {
    /// Declaration introduced by `node`, per its file's classification table.
    pub fn cast(node: Node) -> Option<Declaration> {
        let decl = match node.file().classify(node.kind())? {
            DeclKind::Function => Declaration::Function(Function(node)),
            DeclKind::Contract => Declaration::Contract(Contract(node)),
            DeclKind::Trait => Declaration::Trait(Trait(node)),
            DeclKind::Field => Declaration::Field(Field(node)),
            DeclKind::Constant => Declaration::Constant(Constant(node)),
            DeclKind::Parameter => Declaration::Parameter(Parameter(node)),
            DeclKind::MessageType => Declaration::MessageType(MessageType(node)),
            DeclKind::Primitive => Declaration::Primitive(Primitive(node)),
            DeclKind::Variable => {
                let name = match node.kind() {
                    SyntaxKind::DESTRUCT_BIND => node
                        .child_by_field(NodeField::Bind)
                        .or_else(|| node.child_by_field(NodeField::Name))?,
                    SyntaxKind::IDENTIFIER => node,
                    _ => node.child_by_field(NodeField::Name)?,
                };
                Declaration::Variable(Variable(name))
            }
        };
        Some(decl)
    }

    /// The declaration whose name is `name`, if `name` sits in a declaring
    /// position.
    pub fn from_name(name: &Node) -> Option<Declaration> {
        let parent = name.parent()?;
        let field = name.field();
        match parent.kind() {
            SyntaxKind::LET_STATEMENT if field == Some(NodeField::Name) => {
                Some(Declaration::Variable(Variable(name.clone())))
            }
            SyntaxKind::FOREACH_STATEMENT
                if matches!(field, Some(NodeField::Key | NodeField::Value)) =>
            {
                Some(Declaration::Variable(Variable(name.clone())))
            }
            SyntaxKind::CATCH_CLAUSE if field == Some(NodeField::Name) => {
                Some(Declaration::Variable(Variable(name.clone())))
            }
            SyntaxKind::DESTRUCT_BIND => match field {
                Some(NodeField::Bind) => Some(Declaration::Variable(Variable(name.clone()))),
                // `let S { f: v }`: `f` names the struct field
                Some(NodeField::Name) if parent.child_by_field(NodeField::Bind).is_none() => {
                    Some(Declaration::Variable(Variable(name.clone())))
                }
                _ => None,
            },
            _ if field == Some(NodeField::Name) => Declaration::cast(parent),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> &dyn Decl {
        match self {
            Declaration::Function(d) => d,
            Declaration::Contract(d) => d,
            Declaration::Trait(d) => d,
            Declaration::Field(d) => d,
            Declaration::Constant(d) => d,
            Declaration::Parameter(d) => d,
            Declaration::Variable(d) => d,
            Declaration::MessageType(d) => d,
            Declaration::Primitive(d) => d,
        }
    }

    pub fn as_members_owner(&self) -> Option<&dyn MembersOwner> {
        match self {
            Declaration::Contract(c) => Some(c),
            Declaration::Trait(t) => Some(t),
            _ => None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.node().id()
    }

    /// Whether this declaration lives inside a function (locals and parameters).
    pub fn is_local(&self) -> bool {
        match self {
            Declaration::Variable(_) => true,
            Declaration::Parameter(p) => p.function().is_some(),
            _ => false,
        }
    }
}

impl Decl for Declaration {
    fn node(&self) -> &Node {
        self.as_decl().node()
    }

    fn kind(&self) -> DeclKind {
        self.as_decl().kind()
    }

    fn name_node(&self) -> Option<Node> {
        self.as_decl().name_node()
    }

    fn name(&self) -> SmolStr {
        self.as_decl().name()
    }

    fn owner(&self) -> Option<Declaration> {
        self.as_decl().owner()
    }

    fn doc_comment(&self) -> Option<String> {
        self.as_decl().doc_comment()
    }

    fn is_deprecated(&self) -> bool {
        self.as_decl().is_deprecated()
    }
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Declaration {}

impl Hash for Declaration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.kind().as_str(), self.name(), self.node())
    }
}

// ============================================================================
// FUNCTIONS
// ============================================================================

impl Function {
    pub fn is_init(&self) -> bool {
        self.0.kind() == SyntaxKind::INIT_FUNCTION
    }

    pub fn is_native(&self) -> bool {
        self.0.kind() == SyntaxKind::NATIVE_FUNCTION
    }

    pub fn is_asm(&self) -> bool {
        self.0.kind() == SyntaxKind::ASM_FUNCTION
    }

    pub fn parameters(&self) -> Vec<Parameter> {
        parameters_of(&self.0)
    }

    /// First parameter, when it is named `self` (extension functions).
    pub fn self_param(&self) -> Option<Parameter> {
        self.parameters()
            .into_iter()
            .next()
            .filter(|p| p.name() == "self")
    }

    pub fn with_self(&self) -> bool {
        self.self_param().is_some()
    }

    pub fn return_type_node(&self) -> Option<Node> {
        self.0.child_by_field(NodeField::Result)
    }

    pub fn body(&self) -> Option<Node> {
        self.0.child_by_field(NodeField::Body)
    }

    /// A statement body; asm bodies and `;`-terminated declarations have none.
    pub fn has_body(&self) -> bool {
        self.body()
            .is_some_and(|body| body.kind() == SyntaxKind::FUNCTION_BODY)
    }

    fn has_attribute(&self, keyword: SyntaxKind) -> bool {
        let Some(attributes) = self.0.child_by_field(NodeField::Attributes) else {
            return false;
        };
        attributes.syntax().children().any(|c| {
            c.kind() == keyword
                || c.kind() == SyntaxKind::GET_ATTRIBUTE && keyword == SyntaxKind::GET_KW
        })
    }

    pub fn is_abstract(&self) -> bool {
        self.has_attribute(SyntaxKind::ABSTRACT_KW)
    }

    pub fn is_virtual(&self) -> bool {
        self.has_attribute(SyntaxKind::VIRTUAL_KW)
    }

    pub fn is_override(&self) -> bool {
        self.has_attribute(SyntaxKind::OVERRIDE_KW)
    }

    pub fn is_get(&self) -> bool {
        self.has_attribute(SyntaxKind::GET_KW)
    }

    pub fn is_inline(&self) -> bool {
        self.has_attribute(SyntaxKind::INLINE_KW)
    }

    pub fn is_mutates(&self) -> bool {
        self.has_attribute(SyntaxKind::MUTATES_KW)
    }

    pub fn is_extends(&self) -> bool {
        self.has_attribute(SyntaxKind::EXTENDS_KW)
    }

    /// Explicit `get(<id>)` text, or the id derived from the name.
    pub fn method_id(&self) -> String {
        let explicit = self
            .0
            .child_by_field(NodeField::Attributes)
            .and_then(|attrs| attrs.children_of_kind(SyntaxKind::GET_ATTRIBUTE).pop())
            .and_then(|get| get.child_by_field(NodeField::Value));
        match explicit {
            Some(value) => value.text().to_string(),
            None => compute_method_id(&self.name()).to_string(),
        }
    }

    /// `fun name(a: Int, b: Int): Bool`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters()
            .iter()
            .map(|p| p.presentation())
            .collect();
        let mut out = format!("fun {}({})", self.name(), params.join(", "));
        if let Some(ret) = type_ref_text(&self.0, NodeField::Result) {
            out.push_str(": ");
            out.push_str(&ret);
        }
        out
    }
}

/// CRC-16/XMODEM.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Getter id used when no explicit `get(<id>)` is given.
pub fn compute_method_id(name: &str) -> u32 {
    (u32::from(crc16(name.as_bytes())) & 0xffff) | 0x10000
}

pub(crate) fn parameters_of(node: &Node) -> Vec<Parameter> {
    let Some(list) = node.child_by_field(NodeField::Parameters) else {
        // handlers carry a single `parameter` field
        return node
            .child_by_field(NodeField::Parameter)
            .filter(|p| p.kind() == SyntaxKind::PARAMETER)
            .map(Parameter)
            .into_iter()
            .collect();
    };
    list.children_of_kind(SyntaxKind::PARAMETER)
        .into_iter()
        .map(Parameter)
        .collect()
}

// ============================================================================
// CONTRACTS AND TRAITS
// ============================================================================

pub trait MembersOwner: Decl {
    fn body(&self) -> Option<Node> {
        self.node().child_by_field(NodeField::Body)
    }

    fn own_methods(&self) -> Vec<Function> {
        own_methods_of(self.node())
    }

    /// Contract parameters, then storage variables.
    fn own_fields(&self) -> Vec<Field> {
        own_fields_of(self.node())
    }

    fn own_constants(&self) -> Vec<Constant> {
        own_constants_of(self.node())
    }

    fn init_function(&self) -> Option<Function> {
        self.body()?
            .children_of_kind(SyntaxKind::INIT_FUNCTION)
            .pop()
            .map(Function)
    }

    /// `receive`, `bounced` and `external` handlers.
    fn receivers(&self) -> Vec<Node> {
        self.body()
            .map(|body| {
                body.named_children()
                    .into_iter()
                    .filter(|n| {
                        matches!(
                            n.kind(),
                            SyntaxKind::RECEIVE_FUNCTION
                                | SyntaxKind::BOUNCED_FUNCTION
                                | SyntaxKind::EXTERNAL_FUNCTION
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names written after `with`, in order.
    fn trait_names(&self) -> Vec<SmolStr> {
        trait_list_of(self.node())
            .iter()
            .map(|n| SmolStr::new(n.text()))
            .collect()
    }

    /// Listed traits resolved in order, then the implicit `BaseTrait`.
    fn inherited_traits(&self, db: Db<'_>) -> Vec<Trait> {
        let mut traits = direct_traits(db, self.node());
        if let Some(base) = db.base_trait()
            && base.node() != self.node()
            && !traits.contains(&base)
        {
            traits.push(base);
        }
        traits
    }

    /// Own methods followed by every inherited one.
    fn methods(&self, db: Db<'_>) -> Vec<Function> {
        owner_chain(db, self.node())
            .iter()
            .flat_map(own_methods_of)
            .collect()
    }

    /// Own fields, then inherited ones; a later field replaces an earlier
    /// one with the same name in place.
    fn fields(&self, db: Db<'_>) -> Vec<Field> {
        let mut by_name: IndexMap<SmolStr, Field> = IndexMap::new();
        for owner in owner_chain(db, self.node()) {
            for field in own_fields_of(&owner) {
                by_name.insert(field.name(), field);
            }
        }
        by_name.into_values().collect()
    }

    fn constants(&self, db: Db<'_>) -> Vec<Constant> {
        owner_chain(db, self.node())
            .iter()
            .flat_map(own_constants_of)
            .collect()
    }
}

impl MembersOwner for Contract {}
impl MembersOwner for Trait {}

/// Owner itself, then listed traits depth-first in list order, then
/// `BaseTrait`. Each owner appears once.
pub(crate) fn owner_chain(db: Db<'_>, start: &Node) -> Vec<Node> {
    fn walk(db: Db<'_>, node: &Node, seen: &mut FxHashSet<NodeId>, out: &mut Vec<Node>) {
        if !seen.insert(node.id()) {
            return;
        }
        out.push(node.clone());
        for parent in direct_traits(db, node) {
            walk(db, parent.node(), seen, out);
        }
    }

    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    walk(db, start, &mut seen, &mut out);
    if let Some(base) = db.base_trait()
        && seen.insert(base.node().id())
    {
        out.push(base.node().clone());
    }
    out
}

fn trait_list_of(owner: &Node) -> Vec<Node> {
    owner
        .child_by_field(NodeField::Traits)
        .map(|list| list.children_of_kind(SyntaxKind::TYPE_IDENTIFIER))
        .unwrap_or_default()
}

fn direct_traits(db: Db<'_>, owner: &Node) -> Vec<Trait> {
    trait_list_of(owner)
        .iter()
        .filter_map(|name| match db.resolve(name)? {
            Declaration::Trait(t) => Some(t),
            _ => None,
        })
        .collect()
}

fn body_members(owner: &Node, kind: SyntaxKind) -> Vec<Node> {
    owner
        .child_by_field(NodeField::Body)
        .map(|body| body.children_of_kind(kind))
        .unwrap_or_default()
}

fn own_methods_of(owner: &Node) -> Vec<Function> {
    body_members(owner, SyntaxKind::STORAGE_FUNCTION)
        .into_iter()
        .map(Function)
        .collect()
}

fn own_fields_of(owner: &Node) -> Vec<Field> {
    let params = owner
        .child_by_field(NodeField::Parameters)
        .map(|list| list.children_of_kind(SyntaxKind::PARAMETER))
        .unwrap_or_default();
    params
        .into_iter()
        .chain(body_members(owner, SyntaxKind::STORAGE_VARIABLE))
        .map(Field)
        .collect()
}

fn own_constants_of(owner: &Node) -> Vec<Constant> {
    body_members(owner, SyntaxKind::STORAGE_CONSTANT)
        .into_iter()
        .map(Constant)
        .collect()
}

impl Trait {
    pub fn is_base_trait(&self) -> bool {
        self.name() == BASE_TRAIT
    }
}

// ============================================================================
// STRUCTS, MESSAGES, FIELDS, CONSTANTS
// ============================================================================

impl MessageType {
    pub fn is_message(&self) -> bool {
        self.0.kind() == SyntaxKind::MESSAGE
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0
            .child_by_field(NodeField::Body)
            .map(|body| body.children_of_kind(SyntaxKind::FIELD))
            .unwrap_or_default()
            .into_iter()
            .map(Field)
            .collect()
    }

    /// `message(<opcode>)` expression.
    pub fn opcode_node(&self) -> Option<Node> {
        self.0
            .child_by_field(NodeField::Value)?
            .named_children()
            .into_iter()
            .next()
    }

    /// Explicit opcode: a literal, or a constant holding one.
    pub fn opcode(&self, db: Db<'_>) -> Option<u64> {
        let value = self.opcode_node()?;
        match value.kind() {
            SyntaxKind::INTEGER => parse_integer(value.text()),
            SyntaxKind::IDENTIFIER => match db.resolve(&value)? {
                Declaration::Constant(c) => c
                    .value()
                    .filter(|v| v.kind() == SyntaxKind::INTEGER)
                    .and_then(|v| parse_integer(v.text())),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Field {
    pub fn type_node(&self) -> Option<Node> {
        self.0.child_by_field(NodeField::Type)
    }

    pub fn default_value(&self) -> Option<Node> {
        self.0.child_by_field(NodeField::Value)
    }

    pub fn is_contract_parameter(&self) -> bool {
        self.0.kind() == SyntaxKind::PARAMETER
    }

    /// `name: Type as tlb`
    pub fn presentation(&self) -> String {
        named_type_presentation(&self.0)
    }
}

impl Constant {
    pub fn type_node(&self) -> Option<Node> {
        self.0.child_by_field(NodeField::Type)
    }

    pub fn value(&self) -> Option<Node> {
        self.0.child_by_field(NodeField::Value)
    }

    fn has_attribute(&self, keyword: SyntaxKind) -> bool {
        self.0
            .child_by_field(NodeField::Attributes)
            .is_some_and(|attrs| attrs.syntax().children().any(|c| c.kind() == keyword))
    }

    pub fn is_abstract(&self) -> bool {
        self.has_attribute(SyntaxKind::ABSTRACT_KW)
    }

    pub fn is_virtual(&self) -> bool {
        self.has_attribute(SyntaxKind::VIRTUAL_KW)
    }

    pub fn is_override(&self) -> bool {
        self.has_attribute(SyntaxKind::OVERRIDE_KW)
    }

    pub fn is_global(&self) -> bool {
        self.0.kind() == SyntaxKind::GLOBAL_CONSTANT
    }
}

impl Parameter {
    pub fn type_node(&self) -> Option<Node> {
        self.0.child_by_field(NodeField::Type)
    }

    /// Enclosing function or handler; `None` for contract parameters.
    pub fn function(&self) -> Option<Node> {
        let parent = self.0.parent()?;
        let owner = if parent.kind() == SyntaxKind::PARAMETER_LIST {
            parent.parent()?
        } else {
            parent
        };
        owner.kind().is_function().then_some(owner)
    }

    pub fn presentation(&self) -> String {
        named_type_presentation(&self.0)
    }
}

/// What introduces a local binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Let,
    Destruct,
    ForeachKey,
    ForeachValue,
    Catch,
}

impl Variable {
    pub fn binding_kind(&self) -> Option<BindingKind> {
        let parent = self.0.parent()?;
        let kind = match (parent.kind(), self.0.field()) {
            (SyntaxKind::LET_STATEMENT, _) => BindingKind::Let,
            (SyntaxKind::DESTRUCT_BIND, _) => BindingKind::Destruct,
            (SyntaxKind::FOREACH_STATEMENT, Some(NodeField::Key)) => BindingKind::ForeachKey,
            (SyntaxKind::FOREACH_STATEMENT, _) => BindingKind::ForeachValue,
            (SyntaxKind::CATCH_CLAUSE, _) => BindingKind::Catch,
            _ => return None,
        };
        Some(kind)
    }

    /// The statement, bind or clause holding the name.
    pub fn declaration_node(&self) -> Option<Node> {
        self.0.parent()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// `Type?` / `Type as tlb` text of a type reference stored under `field`.
pub fn type_ref_text(owner: &Node, field: NodeField) -> Option<String> {
    let syntax = owner.syntax();
    let type_node = syntax.child_by_field(field)?;
    let mut out = type_node.text().to_string();
    let mut next = type_node.next_significant_sibling();
    if let Some(question) = next
        && question.kind() == SyntaxKind::QUESTION
    {
        out.push('?');
        next = question.next_significant_sibling();
    }
    if let Some(tlb) = next
        && tlb.kind() == SyntaxKind::TLB_SERIALIZATION
    {
        out.push(' ');
        out.push_str(tlb.text());
    }
    Some(out)
}

fn named_type_presentation(node: &Node) -> String {
    match type_ref_text(node, NodeField::Type) {
        Some(ty) => format!("{}: {}", node.name_text(), ty),
        None => node.name_text().to_string(),
    }
}

/// Decimal, `0x`, `0o` and `0b` literals with `_` separators.
pub fn parse_integer(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else {
        lower.parse().ok()
    }
}

/// Contiguous comment block directly above `node`, markers stripped.
fn doc_comment(node: &Node) -> Option<String> {
    let syntax = node.syntax();
    let lines = syntax.tree().line_index();
    let line_of = |offset| lines.line_col(offset).line;

    let mut next_line = line_of(syntax.text_range().start());
    let mut parts = Vec::new();
    let mut prev = syntax.prev_sibling();
    while let Some(comment) = prev {
        if comment.kind() != SyntaxKind::COMMENT
            || line_of(comment.text_range().end()) + 1 != next_line
        {
            break;
        }
        let start_line = line_of(comment.text_range().start());
        // a trailing comment belongs to the code before it
        if let Some(before) = comment.prev_sibling()
            && line_of(before.text_range().end()) == start_line
        {
            break;
        }
        parts.push(strip_comment(comment.text()));
        next_line = start_line;
        prev = comment.prev_sibling();
    }
    if parts.is_empty() {
        return None;
    }
    parts.reverse();
    Some(parts.join("\n"))
}

fn strip_comment(text: &str) -> String {
    if let Some(block) = text.strip_prefix("/*") {
        let block = block.strip_suffix("*/").unwrap_or(block);
        return block
            .lines()
            .map(|l| l.trim().trim_start_matches('*').trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
    }
    let line = text.trim_start_matches('/');
    line.strip_prefix(' ').unwrap_or(line).trim_end().to_string()
}
