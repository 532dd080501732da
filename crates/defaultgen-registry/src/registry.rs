//! SymbolRegistry - an in-memory symbol table.
//!
//! [`SymbolRegistry`] stores scopes and their members in a [`NamespaceTree`]
//! and answers the engine's [`SymbolTable`] lookups. Hosts that already have
//! a symbol model implement [`SymbolTable`] directly instead.
//!
//! # Thread Safety
//!
//! The registry is populated single-threaded, then only read. Once built it
//! is `Sync` and can be shared by parallel generation without locking.
//!
//! # Example
//!
//! ```
//! use defaultgen_core::{MemberInfo, ScopeInfo, ScopeKind, SemanticType, SymbolTable};
//! use defaultgen_registry::SymbolRegistry;
//!
//! let mut registry = SymbolRegistry::new();
//! registry
//!     .register(
//!         ScopeInfo::new("com.acme.Config", ScopeKind::Class),
//!         [MemberInfo::constant("DEFAULT_HOST", SemanticType::String)],
//!     )
//!     .unwrap();
//!
//! let scope = registry.lookup_absolute_scope("com.acme.Config").unwrap();
//! assert_eq!(registry.members_of(&scope.name).len(), 1);
//! ```

use defaultgen_core::{
    MemberInfo, QualifiedName, ScopeInfo, SymbolTable, builtin_supertypes, supertype_closure,
};

use crate::RegistrationError;
use crate::namespace_tree::{NamespaceTree, ResolutionResult, ScopeEntry};

/// Scopes and members keyed by qualified name.
#[derive(Default)]
pub struct SymbolRegistry {
    tree: NamespaceTree,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    pub fn register_scope(&mut self, info: ScopeInfo) -> Result<(), RegistrationError> {
        self.tree.register_scope(info)
    }

    /// Register a scope together with its members, in declaration order.
    pub fn register(
        &mut self,
        info: ScopeInfo,
        members: impl IntoIterator<Item = MemberInfo>,
    ) -> Result<(), RegistrationError> {
        let name = info.name.clone();
        self.tree.register_scope(info)?;
        for member in members {
            self.tree.add_member(&name, member)?;
        }
        Ok(())
    }

    pub fn add_member(
        &mut self,
        scope: &QualifiedName,
        member: MemberInfo,
    ) -> Result<(), RegistrationError> {
        self.tree.add_member(scope, member)
    }

    /// Make every scope of `imported` resolvable by simple name from `namespace`.
    pub fn add_import<S: AsRef<str>>(&mut self, namespace: &[S], imported: &[S]) {
        let from = self.tree.get_or_create_path(namespace);
        let target = self.tree.get_or_create_path(imported);
        self.tree.add_import(from, target);
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn get_scope(&self, name: &QualifiedName) -> Option<&ScopeEntry> {
        self.tree.get_scope(name)
    }

    /// Every supertype of a type, nearest first.
    pub fn supertypes(&self, name: &QualifiedName) -> Vec<QualifiedName> {
        supertype_closure(name, |n| self.direct_supertypes(n))
    }
}

impl SymbolTable for SymbolRegistry {
    fn lookup_absolute_scope(&self, path: &str) -> Option<ScopeInfo> {
        self.tree.resolve_absolute(path).map(|entry| entry.info.clone())
    }

    fn lookup_relative_scope(&self, namespace: &[String], name: &str) -> Option<ScopeInfo> {
        match self.tree.resolve_relative(namespace, name) {
            ResolutionResult::Found(entry) => Some(entry.info.clone()),
            // the caller must qualify fully
            ResolutionResult::Ambiguous(_) | ResolutionResult::NotFound => None,
        }
    }

    fn members_of(&self, scope: &QualifiedName) -> Vec<MemberInfo> {
        self.get_scope(scope)
            .map(|entry| entry.members.clone())
            .unwrap_or_default()
    }

    fn lookup_owner_scope_member(&self, owner: &QualifiedName, name: &str) -> Option<MemberInfo> {
        self.get_scope(owner)?
            .members
            .iter()
            .find(|m| m.name == name)
            .cloned()
    }

    /// Registered supertypes; unregistered names fall back to the built-in
    /// string and boxed hierarchy.
    fn direct_supertypes(&self, name: &QualifiedName) -> Vec<QualifiedName> {
        match self.get_scope(name) {
            Some(entry) => entry.info.supertypes.clone(),
            None => builtin_supertypes(name),
        }
    }
}
