//! Cross-target validation, run over every target before synthesis.

use defaultgen_core::{Placement, StructuralError, TargetRef, TypeHash};
use rustc_hash::FxHashMap;

use crate::builder::builder_name;

/// A named-mode target about to get a builder.
#[derive(Debug, Clone)]
pub struct BuilderSlot<'a> {
    pub target: &'a TargetRef,
    pub placement: &'a Placement,
}

impl BuilderSlot<'_> {
    /// Namespace the builder type is declared in.
    fn namespace(&self) -> String {
        match self.placement {
            Placement::Owner => self.target.owner.namespace_string(),
            Placement::Utility(scope) => scope.to_string(),
        }
    }
}

/// Find builder types synthesized by more than one distinct target.
///
/// Returns one error per affected slot, keyed by the slot's index in `slots`.
/// Two entry points on the same target share a builder and never conflict.
pub fn builder_name_conflicts(
    slots: &[BuilderSlot<'_>],
    suffix: &str,
) -> Vec<(usize, StructuralError)> {
    let mut groups: FxHashMap<(String, String), Vec<usize>> = FxHashMap::default();
    let mut order: Vec<(String, String)> = Vec::new();
    for (index, slot) in slots.iter().enumerate() {
        let key = (slot.namespace(), builder_name(slot.target, suffix));
        let group = groups.entry(key.clone()).or_default();
        if group.is_empty() {
            order.push(key);
        }
        group.push(index);
    }

    let mut conflicts = Vec::new();
    for key in order {
        let Some(members) = groups.get(&key) else {
            continue;
        };
        let mut distinct: Vec<TypeHash> = Vec::new();
        let mut targets: Vec<String> = Vec::new();
        for &index in members {
            let target = slots[index].target;
            if !distinct.contains(&target.hash) {
                distinct.push(target.hash);
                targets.push(target.to_string());
            }
        }
        if distinct.len() < 2 {
            continue;
        }

        let (namespace, name) = key;
        tracing::debug!(%name, %namespace, targets = distinct.len(), "builder name conflict");
        for &index in members {
            conflicts.push((
                index,
                StructuralError::BuilderNameConflict {
                    name: name.clone(),
                    namespace: namespace.clone(),
                    targets: targets.clone(),
                },
            ));
        }
    }
    conflicts.sort_by_key(|(index, _)| *index);
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use defaultgen_core::{
        CallableDecl, ParameterDecl, PrimitiveKind, QualifiedName, SemanticType,
    };

    fn ctor(owner: &str, param: SemanticType) -> TargetRef {
        CallableDecl::constructor(owner, vec![ParameterDecl::new("value", param)]).target()
    }

    #[test]
    fn overloaded_constructors_conflict() {
        let a = ctor("acme.Server", PrimitiveKind::Int32.into());
        let b = ctor("acme.Server", SemanticType::String);
        let owner = Placement::Owner;
        let slots = [
            BuilderSlot { target: &a, placement: &owner },
            BuilderSlot { target: &b, placement: &owner },
        ];

        let conflicts = builder_name_conflicts(&slots, "Builder");
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].0, 0);
        assert_eq!(conflicts[1].0, 1);
        let StructuralError::BuilderNameConflict {
            name,
            namespace,
            targets,
        } = &conflicts[0].1
        else {
            panic!("expected a builder name conflict");
        };
        assert_eq!(name, "ServerBuilder");
        assert_eq!(namespace, "acme");
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn same_target_twice_is_fine() {
        let a = ctor("acme.Server", PrimitiveKind::Int32.into());
        let owner = Placement::Owner;
        let slots = [
            BuilderSlot { target: &a, placement: &owner },
            BuilderSlot { target: &a, placement: &owner },
        ];
        assert!(builder_name_conflicts(&slots, "Builder").is_empty());
    }

    #[test]
    fn different_namespaces_do_not_conflict() {
        let a = ctor("acme.Server", PrimitiveKind::Int32.into());
        let b = ctor("other.Server", PrimitiveKind::Int32.into());
        let owner = Placement::Owner;
        let slots = [
            BuilderSlot { target: &a, placement: &owner },
            BuilderSlot { target: &b, placement: &owner },
        ];
        assert!(builder_name_conflicts(&slots, "Builder").is_empty());
    }

    #[test]
    fn utility_placement_shares_one_namespace() {
        let a = ctor("acme.Server", PrimitiveKind::Int32.into());
        let b = ctor("other.Server", PrimitiveKind::Int32.into());
        let utility = Placement::Utility(QualifiedName::parse("gen.Defaults"));
        let slots = [
            BuilderSlot { target: &a, placement: &utility },
            BuilderSlot { target: &b, placement: &utility },
        ];
        let conflicts = builder_name_conflicts(&slots, "Builder");
        assert_eq!(conflicts.len(), 2);
        assert!(matches!(
            &conflicts[0].1,
            StructuralError::BuilderNameConflict { namespace, .. } if namespace == "gen.Defaults"
        ));
    }
}
