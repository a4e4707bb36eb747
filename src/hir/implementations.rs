//! Implementation search over the workspace index.
//!
//! Trait implementers are found by name: a contract or trait implements `T`
//! when `T` appears in its own `with` list. Only direct implementers are
//! returned; callers wanting the whole hierarchy query again per level.

use super::db::Db;
use super::decls::{Constant, Decl, Declaration, Field, Function, MembersOwner, Trait};
use super::index::IndexKey;

/// Contracts and traits that list `target` after `with`.
pub fn implementations(db: Db<'_>, target: &Trait) -> Vec<Declaration> {
    let name = target.name();
    let mut result = Vec::new();
    for key in [IndexKey::Contracts, IndexKey::Traits] {
        db.index.process_elements_by_key(key, None, |decl| {
            let lists_target = decl
                .as_members_owner()
                .is_some_and(|owner| owner.trait_names().contains(&name));
            if lists_target {
                result.push(decl.clone());
            }
            true
        });
    }
    result
}

/// Methods of direct implementers that implement `fun`, a trait method.
pub fn function_implementations(db: Db<'_>, fun: &Function) -> Vec<Function> {
    let Some(Declaration::Trait(owner)) = fun.owner() else {
        return Vec::new();
    };
    let name = fun.name();
    implementations(db, &owner)
        .iter()
        .filter_map(|decl| decl.as_members_owner())
        .flat_map(|owner| owner.own_methods())
        .filter(|method| method.name() == name)
        .collect()
}

/// Implementations of any declaration: implementers of a trait, overriding
/// methods of a trait method, nothing for everything else.
pub fn implementations_of(db: Db<'_>, decl: &Declaration) -> Vec<Declaration> {
    match decl {
        Declaration::Trait(t) => implementations(db, t),
        Declaration::Function(f) => function_implementations(db, f)
            .into_iter()
            .map(Declaration::Function)
            .collect(),
        _ => Vec::new(),
    }
}

/// Inherited method `method` overrides: the first listed trait declaring a
/// method with the same name.
pub fn super_method(db: Db<'_>, method: &Function) -> Option<Function> {
    let owner = method.owner()?;
    let owner = owner.as_members_owner()?;
    let name = method.name();
    owner
        .inherited_traits(db)
        .iter()
        .find_map(|t| t.methods(db).into_iter().find(|m| m.name() == name))
}

pub fn super_field(db: Db<'_>, field: &Field) -> Option<Field> {
    let owner = field.owner()?;
    let owner = owner.as_members_owner()?;
    let name = field.name();
    owner
        .inherited_traits(db)
        .iter()
        .find_map(|t| t.fields(db).into_iter().find(|f| f.name() == name))
}

pub fn super_constant(db: Db<'_>, constant: &Constant) -> Option<Constant> {
    let owner = constant.owner()?;
    let owner = owner.as_members_owner()?;
    let name = constant.name();
    owner
        .inherited_traits(db)
        .iter()
        .find_map(|t| t.constants(db).into_iter().find(|c| c.name() == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::test_db::TestDb;

    const HIERARCHY: &str = "trait A { abstract fun f(); }\n\
        trait B with A { override fun f() {} }\n\
        contract C with B { }\n\
        contract D with A { override fun f() {} }";

    fn trait_named(t: &TestDb, name: &str) -> Trait {
        match t.db().index.element_by_name(IndexKey::Traits, name) {
            Some(Declaration::Trait(tr)) => tr,
            other => panic!("no trait {name}: {other:?}"),
        }
    }

    #[test]
    fn direct_implementers_only() {
        let t = TestDb::new(&[("/p/a.tact", HIERARCHY)]);
        let names: Vec<_> = implementations(t.db(), &trait_named(&t, "A"))
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(names, ["D", "B"]);
    }

    #[test]
    fn overriding_methods() {
        let t = TestDb::new(&[("/p/a.tact", HIERARCHY)]);
        let a = trait_named(&t, "A");
        let f = a.own_methods().pop().unwrap();
        let owners: Vec<_> = function_implementations(t.db(), &f)
            .iter()
            .filter_map(|m| m.owner())
            .map(|o| o.name())
            .collect();
        assert_eq!(owners, ["D", "B"]);
    }

    #[test]
    fn super_method_walks_the_with_list() {
        let t = TestDb::new(&[("/p/a.tact", HIERARCHY)]);
        let b = trait_named(&t, "B");
        let f = b.own_methods().pop().unwrap();
        let sup = super_method(t.db(), &f).unwrap();
        assert_eq!(sup.owner().unwrap().name(), "A");
    }
}
