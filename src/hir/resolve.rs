//! Name resolution: from a name occurrence to its declaration.
//!
//! Every possible target of a name is offered, nearest scope first, to a
//! [`ScopeProcessor`]. Resolution uses a first-match processor that stops the
//! walk as soon as a declaration with the wanted name shows up; completion
//! runs the same walk with a processor that collects everything.
//!
//! Unqualified names are looked up in this order:
//!
//! 1. local scopes, walking outward (block statements before the occurrence,
//!    latest first, then `foreach`/`catch` bindings, then parameters)
//! 2. members of the enclosing contract or trait, then inherited members
//! 3. top-level declarations of the current file
//! 4. direct imports, the implicitly imported standard library and stubs,
//!    then the rest of the import tree
//!
//! Qualified names (`a.b`, `a.b()`) are looked up among the members of the
//! receiver's inferred type and the extension functions declared for it.

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::debug;

use crate::parser::{Field as NodeField, SyntaxKind};

use super::db::Db;
use super::decls::{
    Decl, Declaration, Function, MembersOwner, Variable, owner_chain, parameters_of,
};
use super::file::{File, FileOrigin};
use super::index::{FileIndex, IndexKey};
use super::node::Node;
use super::ty::Ty;

// ============================================================================
// PROCESSORS
// ============================================================================

/// Flags threaded through one resolve walk.
#[derive(Debug, Clone, Default)]
pub struct ResolveState {
    /// Collecting completion variants rather than resolving.
    pub completion: bool,
    /// Text a completion item must be prefixed with (`self.`).
    pub prefix: Option<&'static str>,
    /// Name to match instead of the occurrence's own text.
    pub search_name: Option<SmolStr>,
}

impl ResolveState {
    pub fn completion() -> Self {
        Self {
            completion: true,
            ..Self::default()
        }
    }

    pub fn with_prefix(&self, prefix: &'static str) -> Self {
        Self {
            prefix: Some(prefix),
            ..self.clone()
        }
    }

    pub fn with_search_name(&self, name: impl Into<SmolStr>) -> Self {
        Self {
            search_name: Some(name.into()),
            ..self.clone()
        }
    }
}

/// Receives candidate declarations; returning `false` stops the walk.
pub trait ScopeProcessor {
    fn execute(&mut self, decl: &Declaration, state: &ResolveState) -> bool;
}

/// Keeps the first declaration whose name matches.
struct FirstMatch<'n> {
    name: &'n str,
    result: Option<Declaration>,
}

impl ScopeProcessor for FirstMatch<'_> {
    fn execute(&mut self, decl: &Declaration, state: &ResolveState) -> bool {
        let wanted = state.search_name.as_deref().unwrap_or(self.name);
        if decl.name() == wanted {
            self.result = Some(decl.clone());
            return false;
        }
        true
    }
}

/// Whether `node` is something [`Resolver::resolve`] accepts.
pub fn is_name_occurrence(node: &Node) -> bool {
    match node.kind() {
        SyntaxKind::IDENTIFIER | SyntaxKind::TYPE_IDENTIFIER | SyntaxKind::SELF => true,
        SyntaxKind::IDENT => is_asm_argument(node),
        _ => false,
    }
}

fn is_asm_argument(node: &Node) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == SyntaxKind::ASM_ARRANGEMENT)
}

/// `foo` in `expr.foo` and `expr.foo()`: returns `expr`.
pub fn qualifier_of(node: &Node) -> Option<Node> {
    let parent = node.parent()?;
    if !matches!(
        parent.kind(),
        SyntaxKind::FIELD_ACCESS_EXPRESSION | SyntaxKind::METHOD_CALL_EXPRESSION
    ) || node.field() != Some(NodeField::Name)
    {
        return None;
    }
    parent.child_by_field(NodeField::Object)
}

// ============================================================================
// RESOLVER
// ============================================================================

#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    db: Db<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(db: Db<'a>) -> Self {
        Self { db }
    }

    /// Declaration `node` refers to, or `None`. Declaring names resolve to
    /// their own declaration.
    pub fn resolve(&self, node: &Node) -> Option<Declaration> {
        if !is_name_occurrence(node) {
            return None;
        }
        self.db
            .caches
            .resolve_memo(node, self.db.revision(), || self.resolve_uncached(node))
    }

    fn resolve_uncached(&self, node: &Node) -> Option<Declaration> {
        if let Some(decl) = Declaration::from_name(node) {
            return Some(decl);
        }
        if node
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::TLB_SERIALIZATION)
        {
            return None;
        }
        let name = node.text();
        if name.is_empty() {
            return None;
        }

        let mut first = FirstMatch { name, result: None };
        self.process_resolve_variants(node, &mut first, &ResolveState::default());
        if first.result.is_none() {
            debug!(name, file = %node.file().uri(), "unresolved name");
        }
        first.result
    }

    /// Offers every declaration `node` could refer to, nearest first.
    pub fn process_resolve_variants(
        &self,
        node: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        match qualifier_of(node) {
            Some(qualifier) => self.process_qualified(node, &qualifier, proc, state),
            None => self.process_unqualified(node, proc, state),
        }
    }

    // ------------------------------------------------------------------------
    // Qualified
    // ------------------------------------------------------------------------

    fn process_qualified(
        &self,
        node: &Node,
        qualifier: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let ty = self.db.infer(qualifier);
        if ty.is_unknown() {
            return true;
        }
        let is_call = is_method_call(node);
        let file = node.file();

        if matches!(ty, Ty::Struct(_) | Ty::Message(_)) {
            // `Foo.fromCell(c)`: the qualifier names the type itself
            if qualifier.kind() == SyntaxKind::IDENTIFIER
                && let Some(Declaration::MessageType(m)) = self.db.resolve(qualifier)
            {
                let prefix = if m.is_message() { "AnyMessage_" } else { "AnyStruct_" };
                let renamed = state.with_search_name(format!("{prefix}{}", node.text()));
                for fun in ["fromCell", "fromSlice", "opcode"] {
                    if let Some(decl) = self
                        .db
                        .index
                        .element_by_name(IndexKey::Funs, &format!("{prefix}{fun}"))
                        && !proc.execute(&decl, &renamed)
                    {
                        return false;
                    }
                }
                return true;
            }

            if is_call || state.completion {
                for any in ["AnyStruct", "AnyMessage"] {
                    if self
                        .db
                        .index
                        .element_by_name(IndexKey::Primitives, any)
                        .is_some()
                        && !self.process_type(file, &Ty::primitive(any), is_call, proc, state)
                    {
                        return false;
                    }
                }
            }
        }

        if let Ty::Bounced(inner) = &ty {
            return self.process_type(file, inner, is_call, proc, state);
        }

        if !self.process_type(file, &ty, is_call, proc, state) {
            return false;
        }
        // T? is searched after T? itself so same-named methods of T? win
        match &ty {
            Ty::Option(inner) => self.process_type(file, inner, is_call, proc, state),
            other => self.process_type(file, &Ty::option(other.clone()), is_call, proc, state),
        }
    }

    /// Members of `ty`, then extension functions declared for it.
    pub fn process_type(
        &self,
        file: &Arc<File>,
        ty: &Ty,
        is_call: bool,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        match ty.anchor() {
            Some(anchor @ (Declaration::Contract(_) | Declaration::Trait(_))) => {
                if let Some(owner) = anchor.as_members_owner()
                    && !self.process_members(owner, is_call, proc, state)
                {
                    return false;
                }
            }
            Some(Declaration::MessageType(m)) => {
                for field in m.fields() {
                    if !proc.execute(&Declaration::Field(field), state) {
                        return false;
                    }
                }
            }
            _ => {}
        }
        self.process_type_methods(file, ty, proc, state)
    }

    /// Methods first for call sites, fields first otherwise.
    fn process_members(
        &self,
        owner: &dyn MembersOwner,
        is_call: bool,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let methods = || {
            owner
                .methods(self.db)
                .into_iter()
                .map(Declaration::Function)
                .collect::<Vec<_>>()
        };
        let fields = || {
            owner
                .fields(self.db)
                .into_iter()
                .map(Declaration::Field)
                .collect::<Vec<_>>()
        };
        let constants = || {
            owner
                .constants(self.db)
                .into_iter()
                .map(Declaration::Constant)
                .collect::<Vec<_>>()
        };
        let groups = if is_call {
            [methods(), fields(), constants()]
        } else {
            [fields(), constants(), methods()]
        };
        groups
            .iter()
            .flatten()
            .all(|decl| proc.execute(decl, state))
    }

    fn process_type_methods(
        &self,
        file: &Arc<File>,
        ty: &Ty,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        self.process_index_key(IndexKey::Methods, file, &mut |decl| {
            let Declaration::Function(fun) = decl else {
                return true;
            };
            let Some(type_node) = fun.self_param().and_then(|p| p.type_node()) else {
                return true;
            };
            if receiver_matches(ty, &type_node) {
                return proc.execute(decl, state);
            }
            true
        })
    }

    // ------------------------------------------------------------------------
    // Unqualified
    // ------------------------------------------------------------------------

    fn process_unqualified(
        &self,
        node: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let name = node.text();
        if name.is_empty() || name == "_" {
            return true;
        }

        if node.kind() == SyntaxKind::SELF
            && let Some(owner) = node.parent_of_kind(&[SyntaxKind::CONTRACT, SyntaxKind::TRAIT])
            && let Some(decl) = Declaration::cast(owner)
            && !proc.execute(&decl, &state.with_search_name(decl.name()))
        {
            return false;
        }

        if state.completion && !self.process_self_completion(node, proc, state) {
            return false;
        }

        let parent = node.parent();
        match parent.as_ref().map(|p| p.kind()) {
            Some(SyntaxKind::INSTANCE_ARGUMENT) => {
                if let Some(p) = &parent
                    && !self.process_instance_field(node, p, proc, state)
                {
                    return false;
                }
            }
            Some(SyntaxKind::DESTRUCT_BIND) => {
                if let Some(p) = &parent
                    && !self.process_destruct_field(node, p, proc, state)
                {
                    return false;
                }
            }
            Some(SyntaxKind::ASM_ARRANGEMENT) => {
                return self.process_asm_arguments(node, proc, state);
            }
            Some(SyntaxKind::STATIC_CALL_EXPRESSION) => {
                // `context()` is a global call even when a local `context` exists
                if !self.process_all_entities(node, proc, state) {
                    return false;
                }
                return self.process_member_scope(node, true, proc, state);
            }
            _ => {}
        }

        if !self.process_block(node, proc, state) {
            return false;
        }
        if !self.process_member_scope(node, false, proc, state) {
            return false;
        }
        self.process_all_entities(node, proc, state)
    }

    /// Members reachable as `self.x`, offered with a `self.` prefix.
    fn process_self_completion(
        &self,
        node: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let Some(scope) = node.parent_of_kind(&[
            SyntaxKind::CONTRACT_BODY,
            SyntaxKind::TRAIT_BODY,
            SyntaxKind::GLOBAL_FUNCTION,
        ]) else {
            return true;
        };
        let prefixed = state.with_prefix("self.");
        let ty = if scope.kind() == SyntaxKind::GLOBAL_FUNCTION {
            let Some(param) = Function::new(scope).self_param() else {
                return true;
            };
            self.db.infer(param.node())
        } else {
            match scope.parent().and_then(Declaration::cast) {
                Some(owner) => Ty::from_declaration(&owner),
                None => return true,
            }
        };
        if ty.is_unknown() {
            return true;
        }
        self.process_type(node.file(), &ty, false, proc, &prefixed)
    }

    /// `Foo { name: value }`: `name` is a field of `Foo`.
    fn process_instance_field(
        &self,
        node: &Node,
        argument: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        if node.field() != Some(NodeField::Name) {
            return true;
        }
        let has_value = argument.child_by_field(NodeField::Value).is_some()
            || node
                .syntax()
                .next_significant_sibling()
                .is_some_and(|next| next.kind() == SyntaxKind::COLON);
        // shorthand `Foo { name }` reads the local `name`
        if !has_value && !state.completion {
            return true;
        }
        let type_name = argument
            .parent()
            .and_then(|list| list.parent())
            .and_then(|instance| instance.child_by_field(NodeField::Name));
        match type_name {
            Some(type_name) => self.process_fields_of(&type_name, proc, state),
            None => true,
        }
    }

    /// `let Foo { name: bind } = e`: `name` is a field of `Foo`.
    fn process_destruct_field(
        &self,
        node: &Node,
        bind: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let names_field = node.field() == Some(NodeField::Name)
            && bind.child_by_field(NodeField::Bind).is_some();
        if !names_field && !state.completion {
            return true;
        }
        let type_name = bind
            .parent()
            .and_then(|list| list.parent())
            .and_then(|stmt| stmt.child_by_field(NodeField::Name));
        match type_name {
            Some(type_name) => self.process_fields_of(&type_name, proc, state),
            None => true,
        }
    }

    fn process_fields_of(
        &self,
        type_name: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let Some(Declaration::MessageType(m)) = self.db.resolve(type_name) else {
            return true;
        };
        m.fields()
            .into_iter()
            .all(|field| proc.execute(&Declaration::Field(field), state))
    }

    /// `asm(cell self) fun f(self: Builder, cell: Cell)`: arrangement names
    /// are the function's parameters.
    fn process_asm_arguments(
        &self,
        node: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let Some(function) = node.parent_of_kind(&[SyntaxKind::ASM_FUNCTION]) else {
            return true;
        };
        for param in parameters_of(&function) {
            if !proc.execute(&Declaration::Parameter(param), state) {
                break;
            }
        }
        true
    }

    /// Local bindings visible at `node`, innermost first.
    pub fn process_block(
        &self,
        node: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let mut child = node.clone();
        let mut current = node.parent();
        while let Some(scope) = current {
            match scope.kind() {
                SyntaxKind::BLOCK_STATEMENT | SyntaxKind::FUNCTION_BODY => {
                    let before: Vec<Node> = scope
                        .named_children()
                        .into_iter()
                        .take_while(|stmt| *stmt != child)
                        .collect();
                    for stmt in before.iter().rev() {
                        if !statement_bindings(stmt)
                            .iter()
                            .all(|decl| proc.execute(decl, state))
                        {
                            return false;
                        }
                    }
                }
                SyntaxKind::FOREACH_STATEMENT if child.field() == Some(NodeField::Body) => {
                    for field in [NodeField::Value, NodeField::Key] {
                        if let Some(name) = scope.child_by_field(field)
                            && !proc.execute(&variable(name), state)
                        {
                            return false;
                        }
                    }
                }
                SyntaxKind::CATCH_CLAUSE if child.field() == Some(NodeField::Body) => {
                    if let Some(name) = scope.child_by_field(NodeField::Name)
                        && !proc.execute(&variable(name), state)
                    {
                        return false;
                    }
                }
                kind if kind.is_function() => {
                    return parameters_of(&scope)
                        .into_iter()
                        .all(|param| proc.execute(&Declaration::Parameter(param), state));
                }
                SyntaxKind::CONTRACT | SyntaxKind::TRAIT | SyntaxKind::SOURCE_FILE => {
                    return true;
                }
                _ => {}
            }
            current = scope.parent();
            child = scope;
        }
        true
    }

    /// Own and inherited members of the enclosing contract or trait, for
    /// plain identifiers inside its body.
    fn process_member_scope(
        &self,
        node: &Node,
        is_call: bool,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        if state.completion || node.kind() != SyntaxKind::IDENTIFIER {
            return true;
        }
        let Some(body) = node.parent_of_kind(&[SyntaxKind::CONTRACT_BODY, SyntaxKind::TRAIT_BODY])
        else {
            return true;
        };
        let Some(owner) = body.parent() else {
            return true;
        };
        for link in owner_chain(self.db, &owner) {
            let Some(decl) = Declaration::cast(link) else {
                continue;
            };
            let Some(owner) = decl.as_members_owner() else {
                continue;
            };
            let methods = owner.own_methods().into_iter().map(Declaration::Function);
            let fields = owner.own_fields().into_iter().map(Declaration::Field);
            let constants = owner.own_constants().into_iter().map(Declaration::Constant);
            let ordered: Vec<Declaration> = if is_call {
                methods.chain(fields).chain(constants).collect()
            } else {
                fields.chain(constants).chain(methods).collect()
            };
            if !ordered.iter().all(|decl| proc.execute(decl, state)) {
                return false;
            }
        }
        true
    }

    /// Top-level declarations visible from `node`'s file.
    fn process_all_entities(
        &self,
        node: &Node,
        proc: &mut dyn ScopeProcessor,
        state: &ResolveState,
    ) -> bool {
        let file = node.file();

        if state.completion {
            return IndexKey::GLOBALS.iter().all(|&key| {
                self.process_index_key(key, file, &mut |decl| {
                    if let Declaration::Function(f) = decl
                        && (f.with_self() || is_static_struct_method(&f.name()))
                    {
                        return true;
                    }
                    proc.execute(decl, state)
                })
            });
        }

        let mut visit = |index: &FileIndex| process_globals(index, &mut *proc, state);

        let local = self.db.file_index(file);
        if !visit(&local) {
            return false;
        }
        let imports = self.db.imports();
        for imported in imports.imported_files(file) {
            if let Some(index) = self.db.index.file(imported.uri())
                && !visit(index)
            {
                return false;
            }
        }
        for origin in [FileOrigin::Stdlib, FileOrigin::Stub] {
            for index in self.db.index.files_of_origin(origin) {
                if !visit(index) {
                    return false;
                }
            }
        }
        for reachable in imports.import_tree(file) {
            if let Some(index) = self.db.index.file(reachable.uri())
                && !visit(index)
            {
                return false;
            }
        }
        // unimported workspace files; the not-imported inspection reports these
        for index in self.db.index.files_of_origin(FileOrigin::Workspace) {
            if index.uri() != file.uri() && !visit(index) {
                return false;
            }
        }
        true
    }

    /// `key` entries of `file` first, then of every other indexed file.
    fn process_index_key(
        &self,
        key: IndexKey,
        file: &Arc<File>,
        f: &mut dyn FnMut(&Declaration) -> bool,
    ) -> bool {
        if !self.db.file_index(file).process_elements_by_key(key, &mut *f) {
            return false;
        }
        self.db
            .index
            .files_in_root_order()
            .filter(|index| index.uri() != file.uri())
            .all(|index| index.process_elements_by_key(key, &mut *f))
    }
}

fn process_globals(index: &FileIndex, proc: &mut dyn ScopeProcessor, state: &ResolveState) -> bool {
    IndexKey::GLOBALS.iter().all(|&key| {
        index
            .elements(key)
            .iter()
            .all(|decl| proc.execute(decl, state))
    })
}

fn is_method_call(name: &Node) -> bool {
    name.parent()
        .is_some_and(|p| p.kind() == SyntaxKind::METHOD_CALL_EXPRESSION)
}

/// `AnyStruct_fromCell` and friends are reached only as `Foo.fromCell`.
fn is_static_struct_method(name: &str) -> bool {
    name.starts_with("AnyStruct_") || name.starts_with("AnyMessage_")
}

/// Whether an extension function with receiver type `type_node` applies to
/// values of type `ty`.
fn receiver_matches(ty: &Ty, type_node: &Node) -> bool {
    if type_node.kind() == SyntaxKind::MAP_TYPE {
        return matches!(ty, Ty::Map { .. });
    }
    let optional = type_node
        .syntax()
        .next_significant_sibling()
        .is_some_and(|next| next.kind() == SyntaxKind::QUESTION);
    let wanted = type_node.text();
    match ty {
        Ty::Option(inner) => optional && inner.name() == wanted,
        other => !optional && other.name() == wanted,
    }
}

fn variable(name: Node) -> Declaration {
    Declaration::Variable(Variable::new(name))
}

/// Names a statement introduces into the rest of its block.
fn statement_bindings(stmt: &Node) -> Vec<Declaration> {
    match stmt.kind() {
        SyntaxKind::LET_STATEMENT => stmt
            .child_by_field(NodeField::Name)
            .map(variable)
            .into_iter()
            .collect(),
        SyntaxKind::DESTRUCT_STATEMENT => {
            let Some(binds) = stmt.child_by_field(NodeField::Binds) else {
                return Vec::new();
            };
            binds
                .children_of_kind(SyntaxKind::DESTRUCT_BIND)
                .into_iter()
                .rev()
                .filter_map(|bind| {
                    bind.child_by_field(NodeField::Bind)
                        .or_else(|| bind.child_by_field(NodeField::Name))
                })
                .map(variable)
                .collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::test_db::TestDb;

    #[test]
    fn later_let_shadows_earlier_one() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "fun f() { let value = 1; let value = value + 1; return value; }",
        )]);
        let db = t.db();
        let used = t.node_at("/p/a.tact", "value", 4);
        let second = t.node_at("/p/a.tact", "value", 2);
        let first = t.node_at("/p/a.tact", "value", 1);
        assert_eq!(db.resolve(&used).unwrap().node(), &second);
        // the initializer of the second let still sees the first
        let init = t.node_at("/p/a.tact", "value", 3);
        assert_eq!(db.resolve(&init).unwrap().node(), &first);
    }

    #[test]
    fn parameters_and_foreach_bindings() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "fun f(items: map<Int, Int>) { foreach (key, item in items) { item + key; } }",
        )]);
        let db = t.db();
        let items = t.node_at("/p/a.tact", "items", 2);
        assert!(matches!(db.resolve(&items), Some(Declaration::Parameter(_))));
        let item = t.node_at("/p/a.tact", "item", 2);
        assert_eq!(
            db.resolve(&item).unwrap().node(),
            &t.node_at("/p/a.tact", "item", 1)
        );
    }

    #[test]
    fn static_call_skips_locals() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "fun context(): Int { return 1; }\nfun f() { let context = context(); }",
        )]);
        let call = t.node_at("/p/a.tact", "context", 3);
        assert!(matches!(t.db().resolve(&call), Some(Declaration::Function(_))));
    }

    #[test]
    fn self_resolves_to_enclosing_contract() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "contract Counter { value: Int; fun current(): Int { return self.value; } }",
        )]);
        let db = t.db();
        let this = t.node_at("/p/a.tact", "self", 1);
        assert!(matches!(db.resolve(&this), Some(Declaration::Contract(_))));
        let field = t.node_at("/p/a.tact", "value", 2);
        assert!(matches!(db.resolve(&field), Some(Declaration::Field(_))));
    }

    #[test]
    fn instance_argument_names_a_field() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "struct Point { x: Int; y: Int; }\nfun f(y: Int): Point { return Point { x: 1, y }; }",
        )]);
        let db = t.db();
        let named = t.node_at("/p/a.tact", "x", 2);
        assert!(matches!(db.resolve(&named), Some(Declaration::Field(_))));
        let shorthand = t.node_at("/p/a.tact", "y", 3);
        assert!(matches!(db.resolve(&shorthand), Some(Declaration::Parameter(_))));
    }

    #[test]
    fn extension_functions_match_receiver_type() {
        let t = TestDb::new(&[(
            "/p/a.tact",
            "extends fun double(self: Int): Int { return self * 2; }\n\
             extends fun orZero(self: Int?): Int { return self!!; }\n\
             fun f(a: Int, b: Int?) { a.double(); b.orZero(); b.double(); }",
        )]);
        let db = t.db();
        let on_int = t.node_at("/p/a.tact", "double", 2);
        assert_eq!(db.resolve(&on_int).unwrap().name(), "double");
        let on_option = t.node_at("/p/a.tact", "orZero", 2);
        assert_eq!(db.resolve(&on_option).unwrap().name(), "orZero");
        // `Int` methods are reachable on `Int?` as well
        let unwrapped = t.node_at("/p/a.tact", "double", 3);
        assert!(db.resolve(&unwrapped).is_some());
    }

    #[test]
    fn unresolved_name_is_none() {
        let t = TestDb::new(&[("/p/a.tact", "fun f() { missing(); }")]);
        let call = t.node_at("/p/a.tact", "missing", 1);
        assert!(t.db().resolve(&call).is_none());
    }

    #[test]
    fn unimported_workspace_declarations_resolve_after_imports() {
        let t = TestDb::new(&[
            ("/p/a.tact", "import \"./b\";\nfun f(p: Point, o: Other) {}"),
            ("/p/b.tact", "struct Point { x: Int; }"),
            ("/p/c.tact", "struct Point { y: Int; }\nstruct Other {}"),
        ]);
        let db = t.db();
        let point = db.resolve(&t.node_at("/p/a.tact", "Point", 1)).unwrap();
        assert_eq!(point.node().file().uri().as_str(), "/p/b.tact");
        let other = db.resolve(&t.node_at("/p/a.tact", "Other", 1)).unwrap();
        assert_eq!(other.node().file().uri().as_str(), "/p/c.tact");
    }
}
