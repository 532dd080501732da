use std::fmt;

/// Dot-separated qualified name for scopes, types and members.
///
/// Used as the primary key for scope lookups. [`TypeHash`](crate::TypeHash)
/// identities are computed from the display form.
///
/// # Examples
///
/// ```
/// use defaultgen_core::QualifiedName;
///
/// let config = QualifiedName::global("Config");
/// assert_eq!(config.to_string(), "Config");
///
/// let server = QualifiedName::new("Server", vec!["com".into(), "acme".into()]);
/// assert_eq!(server.to_string(), "com.acme.Server");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QualifiedName {
    /// Simple name (e.g., "Server", "DEFAULT_PORT")
    pub name: String,
    /// Namespace path (e.g., ["com", "acme"]).
    /// Empty for the root namespace.
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Separator between path segments.
    pub const SEPARATOR: char = '.';

    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the root namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a dotted string (e.g., "com.acme.Server").
    ///
    /// The last segment is the name, the rest is the namespace. Empty segments
    /// are dropped, so ".com.acme.Server" == "com.acme.Server".
    pub fn parse(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split(Self::SEPARATOR)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                namespace: parts,
            },
            None => Self::global(""),
        }
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Get the namespace as a dotted string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join(".")
    }

    /// Compute the identity hash of this name.
    pub fn to_type_hash(&self) -> crate::TypeHash {
        crate::TypeHash::from_name(&self.to_string())
    }

    /// Create a child name within this name.
    ///
    /// Example: `com.acme` + `Server` = `com.acme.Server`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut child_ns = self.namespace.clone();
        child_ns.push(self.name.clone());
        Self {
            name: name.into(),
            namespace: child_ns,
        }
    }

}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_name() {
        let name = QualifiedName::global("Config");
        assert_eq!(name.name, "Config");
        assert!(name.namespace.is_empty());
        assert_eq!(name.to_string(), "Config");
    }

    #[test]
    fn namespaced_name() {
        let name = QualifiedName::new("Server", vec!["com".into(), "acme".into()]);
        assert_eq!(name.namespace, vec!["com", "acme"]);
        assert_eq!(name.to_string(), "com.acme.Server");
    }

    #[test]
    fn parse_dotted() {
        let name = QualifiedName::parse("com.acme.Server");
        assert_eq!(name.name, "Server");
        assert_eq!(name.namespace, vec!["com", "acme"]);

        let leading = QualifiedName::parse(".com.acme.Server");
        assert_eq!(leading, name);

        let empty = QualifiedName::parse("");
        assert_eq!(empty.name, "");
        assert!(empty.namespace.is_empty());
    }

    #[test]
    fn child_extends_the_path() {
        let ns = QualifiedName::new("acme", vec!["com".into()]);
        let child = ns.child("Server");
        assert_eq!(child.to_string(), "com.acme.Server");
        assert_eq!(child.namespace_string(), "com.acme");
        assert_eq!(child.simple_name(), "Server");
    }
}
