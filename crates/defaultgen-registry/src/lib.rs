//! A petgraph-backed symbol table for the defaultgen engine.
//!
//! Scopes are stored in a [`NamespaceTree`]; [`SymbolRegistry`] wraps it and
//! implements [`defaultgen_core::SymbolTable`].

mod error;
pub mod namespace_tree;
mod registry;

pub use error::RegistrationError;
pub use namespace_tree::{NamespaceTree, ResolutionResult, ScopeEntry};
pub use registry::SymbolRegistry;
