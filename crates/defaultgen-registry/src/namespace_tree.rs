//! Namespace Tree - hierarchical storage for scopes and their members.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: `NamespaceData` (scopes declared at that level)
//! - Edges: `Contains(name)` for hierarchy, `Imports` for import directives
//!
//! A nested scope `pkg.Outer.Inner` lives in the node reached by
//! `pkg -> Outer`, so scope names and namespace segments share one path space.

use defaultgen_core::{MemberInfo, QualifiedName, ScopeInfo};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use crate::RegistrationError;

/// Result of name resolution that may be ambiguous.
///
/// When several imports bring the same simple name into scope, resolution is
/// ambiguous and the caller must ask for a fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult<T> {
    /// Found exactly one match.
    Found(T),
    /// Found several matches through different imports.
    Ambiguous(Vec<T>),
    /// Not found in any searched location.
    NotFound,
}

/// Edge types in the namespace graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceEdge {
    /// Parent contains child. The String is the child's simple name.
    Contains(String),
    /// Source namespace imports every scope of the target namespace.
    Imports,
}

/// A registered scope and its members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub info: ScopeInfo,
    pub members: Vec<MemberInfo>,
}

/// Data stored in each namespace node.
#[derive(Debug, Default)]
pub struct NamespaceData {
    /// Scopes in this namespace by simple name.
    pub scopes: FxHashMap<String, ScopeEntry>,
}

/// The namespace graph.
pub struct NamespaceTree {
    graph: DiGraph<NamespaceData, NamespaceEdge>,
    root: NodeIndex,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTree {
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(NamespaceData::default());
        Self { graph, root }
    }

    /// Find a child namespace by name.
    pub fn find_child(&self, parent: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.graph.edges(parent).find_map(|edge| match edge.weight() {
            NamespaceEdge::Contains(child) if child == name => Some(edge.target()),
            _ => None,
        })
    }

    pub fn get_or_create_child(&mut self, parent: NodeIndex, name: &str) -> NodeIndex {
        if let Some(child) = self.find_child(parent, name) {
            return child;
        }
        let child = self.graph.add_node(NamespaceData::default());
        self.graph
            .add_edge(parent, child, NamespaceEdge::Contains(name.to_string()));
        child
    }

    /// Get or create a namespace path from root.
    pub fn get_or_create_path<S: AsRef<str>>(&mut self, path: &[S]) -> NodeIndex {
        let mut current = self.root;
        for segment in path {
            current = self.get_or_create_child(current, segment.as_ref());
        }
        current
    }

    /// Get an existing namespace by path from root.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeIndex> {
        self.get_path_from(self.root, path)
    }

    /// Get an existing namespace by path relative to `start`.
    pub fn get_path_from<S: AsRef<str>>(&self, start: NodeIndex, path: &[S]) -> Option<NodeIndex> {
        let mut current = start;
        for segment in path {
            current = self.find_child(current, segment.as_ref())?;
        }
        Some(current)
    }

    pub fn find_parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .find(|edge| matches!(edge.weight(), NamespaceEdge::Contains(_)))
            .map(|edge| edge.source())
    }

    /// Add an import directive.
    pub fn add_import(&mut self, from_ns: NodeIndex, target_ns: NodeIndex) {
        let exists = self.graph.edges(from_ns).any(|edge| {
            matches!(edge.weight(), NamespaceEdge::Imports) && edge.target() == target_ns
        });
        if !exists {
            self.graph.add_edge(from_ns, target_ns, NamespaceEdge::Imports);
        }
    }

    pub fn get_imports(&self, ns: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges(ns)
            .filter(|edge| matches!(edge.weight(), NamespaceEdge::Imports))
            .map(|edge| edge.target())
            .collect()
    }

    // ========================================================================
    // Scope Registration
    // ========================================================================

    /// Register a scope under its qualified name.
    pub fn register_scope(&mut self, info: ScopeInfo) -> Result<(), RegistrationError> {
        let ns_node = self.get_or_create_path(&info.name.namespace);
        let simple_name = info.name.name.clone();

        let ns_data = self
            .graph
            .node_weight_mut(ns_node)
            .ok_or(RegistrationError::InvalidNamespace)?;
        if ns_data.scopes.contains_key(&simple_name) {
            return Err(RegistrationError::DuplicateScope(info.name.to_string()));
        }
        ns_data.scopes.insert(
            simple_name,
            ScopeEntry {
                info,
                members: Vec::new(),
            },
        );
        Ok(())
    }

    /// Append a member to a registered scope.
    ///
    /// Methods may be overloaded; fields must be unique within the scope.
    pub fn add_member(
        &mut self,
        scope: &QualifiedName,
        member: MemberInfo,
    ) -> Result<(), RegistrationError> {
        let entry = self
            .get_scope_mut(scope)
            .ok_or_else(|| RegistrationError::ScopeNotFound(scope.to_string()))?;
        let duplicate = entry
            .members
            .iter()
            .any(|m| m.is_field() && m.name == member.name);
        if member.is_field() && duplicate {
            return Err(RegistrationError::DuplicateField {
                scope: scope.to_string(),
                field: member.name,
            });
        }
        entry.members.push(member);
        Ok(())
    }

    pub fn get_scope(&self, name: &QualifiedName) -> Option<&ScopeEntry> {
        let ns_node = self.get_path(&name.namespace)?;
        self.graph.node_weight(ns_node)?.scopes.get(&name.name)
    }

    fn get_scope_mut(&mut self, name: &QualifiedName) -> Option<&mut ScopeEntry> {
        let ns_node = self.get_path(&name.namespace)?;
        self.graph.node_weight_mut(ns_node)?.scopes.get_mut(&name.name)
    }

    // ========================================================================
    // Scope Resolution
    // ========================================================================

    /// Resolve a fully-qualified dotted scope name.
    pub fn resolve_absolute(&self, path: &str) -> Option<&ScopeEntry> {
        let name = QualifiedName::parse(path);
        if name.name.is_empty() {
            return None;
        }
        self.get_scope(&name)
    }

    /// Resolve a possibly dotted scope name relative to a namespace.
    ///
    /// Search order:
    /// 1. The namespace itself, then its parents up to root
    /// 2. Namespaces imported at the namespace or any parent (non-transitive)
    ///
    /// Several distinct import matches are ambiguous.
    pub fn resolve_relative(
        &self,
        namespace: &[String],
        name: &str,
    ) -> ResolutionResult<&ScopeEntry> {
        let parts: Vec<&str> = name
            .split(QualifiedName::SEPARATOR)
            .filter(|p| !p.is_empty())
            .collect();
        let Some((simple, prefix)) = parts.split_last() else {
            return ResolutionResult::NotFound;
        };
        let Some(start) = self.get_path(namespace) else {
            return ResolutionResult::NotFound;
        };

        let lookup = |base: NodeIndex| {
            self.get_path_from(base, prefix)
                .and_then(|ns| self.graph.node_weight(ns))
                .and_then(|data| data.scopes.get(*simple))
        };

        let mut current = Some(start);
        while let Some(ns_node) = current {
            if let Some(entry) = lookup(ns_node) {
                return ResolutionResult::Found(entry);
            }
            current = self.find_parent(ns_node);
        }

        let mut matches: Vec<&ScopeEntry> = Vec::new();
        let mut scope = Some(start);
        while let Some(ns_node) = scope {
            for imported in self.get_imports(ns_node) {
                if let Some(entry) = lookup(imported) {
                    if !matches.iter().any(|m| m.info.name == entry.info.name) {
                        matches.push(entry);
                    }
                }
            }
            scope = self.find_parent(ns_node);
        }

        match matches.len() {
            0 => ResolutionResult::NotFound,
            1 => ResolutionResult::Found(matches.remove(0)),
            _ => ResolutionResult::Ambiguous(matches),
        }
    }
}
