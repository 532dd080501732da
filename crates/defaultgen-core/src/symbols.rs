//! The symbol-table collaborator the engine resolves against.
//!
//! The engine never introspects source itself. A host (a compiler plugin, a
//! build tool, or [`defaultgen-registry`]'s `SymbolRegistry`) implements
//! [`SymbolTable`] over an immutable snapshot of the program being processed.
//! All lookups are synchronous and read-only; implementations must be `Sync`
//! so independent targets can be processed in parallel.
//!
//! # Assignability
//!
//! Reference types form a hierarchy rooted at [`SemanticType::OBJECT_TYPE`].
//! `String` takes part as [`SemanticType::STRING_TYPE`], and a primitive is
//! assignable wherever its boxed type is. Tables describe the hierarchy
//! through [`SymbolTable::direct_supertypes`]; the default knows only the
//! built-in string and boxed types.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::{MemberInfo, QualifiedName, ScopeInfo, SemanticType};

/// Read-only symbol lookups.
pub trait SymbolTable: Send + Sync {
    /// Look up a scope by fully-qualified dotted path (`com.acme.Config`).
    fn lookup_absolute_scope(&self, path: &str) -> Option<ScopeInfo>;

    /// Look up `name` relative to `namespace` (`Config` from `["com", "acme"]`).
    ///
    /// `name` may itself be dotted, for nested scopes (`Outer.Inner`).
    fn lookup_relative_scope(&self, namespace: &[String], name: &str) -> Option<ScopeInfo>;

    /// All members of a scope, in declaration order.
    fn members_of(&self, scope: &QualifiedName) -> Vec<MemberInfo>;

    /// First member of the owner scope named `name`.
    fn lookup_owner_scope_member(&self, owner: &QualifiedName, name: &str) -> Option<MemberInfo> {
        self.members_of(owner).into_iter().find(|m| m.name == name)
    }

    /// Direct supertypes of a reference type, nearest first.
    fn direct_supertypes(&self, name: &QualifiedName) -> Vec<QualifiedName> {
        builtin_supertypes(name)
    }

    /// Whether a value of type `from` can be used where `to` is expected.
    ///
    /// Primitives widen, box, and then follow the reference rules. References
    /// are assignable to themselves, their transitive supertypes and the root
    /// object type. `Void` is never assignable.
    fn is_assignable(&self, from: &SemanticType, to: &SemanticType) -> bool {
        match (from, to) {
            (SemanticType::Void, _) | (_, SemanticType::Void) => false,
            (SemanticType::Primitive(a), SemanticType::Primitive(b)) => a.widens_to(*b),
            (SemanticType::Primitive(a), _) => {
                self.is_assignable(&SemanticType::nominal(a.boxed_name()), to)
            }
            (_, SemanticType::Primitive(_)) => false,
            _ => match (from.reference_name(), to.reference_name()) {
                (Some(a), Some(b)) => {
                    a == b
                        || b == QualifiedName::parse(SemanticType::OBJECT_TYPE)
                        || supertype_closure(&a, |n| self.direct_supertypes(n)).contains(&b)
                }
                _ => false,
            },
        }
    }
}

impl<T: SymbolTable + ?Sized> SymbolTable for &T {
    fn lookup_absolute_scope(&self, path: &str) -> Option<ScopeInfo> {
        (**self).lookup_absolute_scope(path)
    }

    fn lookup_relative_scope(&self, namespace: &[String], name: &str) -> Option<ScopeInfo> {
        (**self).lookup_relative_scope(namespace, name)
    }

    fn members_of(&self, scope: &QualifiedName) -> Vec<MemberInfo> {
        (**self).members_of(scope)
    }

    fn lookup_owner_scope_member(&self, owner: &QualifiedName, name: &str) -> Option<MemberInfo> {
        (**self).lookup_owner_scope_member(owner, name)
    }

    fn direct_supertypes(&self, name: &QualifiedName) -> Vec<QualifiedName> {
        (**self).direct_supertypes(name)
    }

    fn is_assignable(&self, from: &SemanticType, to: &SemanticType) -> bool {
        (**self).is_assignable(from, to)
    }
}

/// Direct supertypes of `java.lang.String` and the boxed primitive types.
pub fn builtin_supertypes(name: &QualifiedName) -> Vec<QualifiedName> {
    let direct: &[&str] = match name.to_string().as_str() {
        SemanticType::STRING_TYPE => &[
            "java.lang.CharSequence",
            "java.lang.Comparable",
            "java.io.Serializable",
        ],
        "java.lang.Byte" | "java.lang.Short" | "java.lang.Integer" | "java.lang.Long"
        | "java.lang.Float" | "java.lang.Double" => &["java.lang.Number", "java.lang.Comparable"],
        "java.lang.Number" => &["java.io.Serializable"],
        "java.lang.Boolean" | "java.lang.Character" => {
            &["java.lang.Comparable", "java.io.Serializable"]
        }
        _ => &[],
    };
    direct.iter().map(|s| QualifiedName::parse(s)).collect()
}

/// Every supertype reachable from `name` through `direct`, nearest first.
///
/// `name` itself is never included, and cycles terminate.
pub fn supertype_closure(
    name: &QualifiedName,
    direct: impl Fn(&QualifiedName) -> Vec<QualifiedName>,
) -> Vec<QualifiedName> {
    let mut seen: FxHashSet<QualifiedName> = FxHashSet::default();
    let mut order = Vec::new();
    let mut queue: VecDeque<QualifiedName> = direct(name).into();

    while let Some(next) = queue.pop_front() {
        if next == *name || !seen.insert(next.clone()) {
            continue;
        }
        queue.extend(direct(&next));
        order.push(next);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveKind;

    struct Empty;

    impl SymbolTable for Empty {
        fn lookup_absolute_scope(&self, _path: &str) -> Option<ScopeInfo> {
            None
        }

        fn lookup_relative_scope(&self, _namespace: &[String], _name: &str) -> Option<ScopeInfo> {
            None
        }

        fn members_of(&self, _scope: &QualifiedName) -> Vec<MemberInfo> {
            Vec::new()
        }
    }

    #[test]
    fn default_assignability() {
        let table = Empty;
        let int = SemanticType::Primitive(PrimitiveKind::Int32);
        let long = SemanticType::Primitive(PrimitiveKind::Int64);
        assert!(table.is_assignable(&int, &long));
        assert!(!table.is_assignable(&long, &int));
        assert!(table.is_assignable(&SemanticType::String, &SemanticType::String));
        assert!(!table.is_assignable(&SemanticType::Void, &SemanticType::Void));
        assert!(!table.is_assignable(
            &SemanticType::nominal("a.B"),
            &SemanticType::nominal("a.C")
        ));
    }

    #[test]
    fn strings_join_the_reference_hierarchy() {
        let table = Empty;
        let string = SemanticType::String;
        for target in ["java.lang.String", "java.lang.CharSequence", "java.lang.Object"] {
            assert!(table.is_assignable(&string, &SemanticType::nominal(target)), "{target}");
        }
        assert!(table.is_assignable(&SemanticType::nominal("java.lang.String"), &string));
        assert!(!table.is_assignable(&string, &SemanticType::nominal("java.lang.Number")));
        assert!(!table.is_assignable(&SemanticType::nominal("java.lang.Object"), &string));
    }

    #[test]
    fn every_reference_reaches_the_root_object() {
        let table = Empty;
        let object = SemanticType::nominal("java.lang.Object");
        assert!(table.is_assignable(&SemanticType::nominal("com.acme.Host"), &object));
        assert!(!table.is_assignable(&SemanticType::Void, &object));
    }

    #[test]
    fn primitives_box_before_reference_checks() {
        let table = Empty;
        let int = SemanticType::Primitive(PrimitiveKind::Int32);
        assert!(table.is_assignable(&int, &SemanticType::nominal("java.lang.Integer")));
        assert!(table.is_assignable(&int, &SemanticType::nominal("java.lang.Number")));
        assert!(table.is_assignable(&int, &SemanticType::nominal("java.lang.Object")));
        // no widening across boxes
        assert!(!table.is_assignable(&int, &SemanticType::nominal("java.lang.Long")));
        assert!(!table.is_assignable(&int, &SemanticType::String));
        assert!(!table.is_assignable(&SemanticType::nominal("java.lang.Integer"), &int));
    }

    #[test]
    fn closure_is_transitive_and_terminates() {
        let graph = |name: &QualifiedName| -> Vec<QualifiedName> {
            match name.to_string().as_str() {
                "A" => vec!["B".into()],
                "B" => vec!["C".into(), "A".into()],
                "C" => vec!["B".into()],
                _ => Vec::new(),
            }
        };
        assert_eq!(
            supertype_closure(&"A".into(), graph),
            [QualifiedName::parse("B"), QualifiedName::parse("C")]
        );
    }
}
