//! Generator configuration.
//!
//! Hosts usually pass processor options as string pairs; [`GeneratorConfig::from_options`]
//! reads the `defaultgen.*` keys and ignores everything else.

use crate::{ConfigError, QualifiedName};

/// Prefix shared by every generator option key.
pub const OPTION_PREFIX: &str = "defaultgen.";

/// Generator-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Builder entry point used when a target does not name its own.
    pub entry_point: String,
    /// Appended to the target name to form the builder type name.
    pub builder_suffix: String,
    /// Scope that receives helpers generated for external targets.
    pub utility_namespace: QualifiedName,
    /// Process independent targets on a thread pool (`parallel` feature).
    pub parallel: bool,
    /// Report discovered defaults that match no parameter.
    pub warn_unmatched: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entry_point: "create".to_string(),
            builder_suffix: "Builder".to_string(),
            utility_namespace: QualifiedName::global("Defaults"),
            parallel: false,
            warn_unmatched: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn with_builder_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.builder_suffix = suffix.into();
        self
    }

    pub fn with_utility_namespace(mut self, namespace: impl Into<QualifiedName>) -> Self {
        self.utility_namespace = namespace.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_warn_unmatched(mut self, warn: bool) -> Self {
        self.warn_unmatched = warn;
        self
    }

    /// Build a config from host option pairs, starting from the defaults.
    ///
    /// Keys outside the `defaultgen.` prefix are ignored. Unknown keys under
    /// the prefix, and values that do not parse, are errors.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            let Some(option) = key.strip_prefix(OPTION_PREFIX) else {
                continue;
            };
            match option {
                "entryPoint" => config.entry_point = identifier(key, value)?,
                "builderSuffix" => config.builder_suffix = identifier(key, value)?,
                "utilityNamespace" => config.utility_namespace = qualified(key, value)?,
                "parallel" => config.parallel = boolean(key, value)?,
                "warnUnmatched" => config.warn_unmatched = boolean(key, value)?,
                _ => return Err(ConfigError::UnknownOption { key: key.to_string() }),
            }
        }
        Ok(config)
    }
}

fn invalid(key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn identifier(key: &str, value: &str) -> Result<String, ConfigError> {
    if is_identifier(value) {
        Ok(value.to_string())
    } else {
        Err(invalid(key, value, "an identifier"))
    }
}

fn qualified(key: &str, value: &str) -> Result<QualifiedName, ConfigError> {
    if value.split(QualifiedName::SEPARATOR).all(is_identifier) {
        Ok(QualifiedName::parse(value))
    } else {
        Err(invalid(key, value, "a dotted name"))
    }
}

fn boolean(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value, "true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.entry_point, "create");
        assert_eq!(config.builder_suffix, "Builder");
        assert_eq!(config.utility_namespace.to_string(), "Defaults");
        assert!(!config.parallel);
        assert!(config.warn_unmatched);
    }

    #[test]
    fn reads_prefixed_options() {
        let config = GeneratorConfig::from_options([
            ("defaultgen.entryPoint", "builder"),
            ("defaultgen.builderSuffix", "Options"),
            ("defaultgen.utilityNamespace", "com.acme.gen.Defaults"),
            ("defaultgen.parallel", "true"),
            ("defaultgen.warnUnmatched", " false "),
            ("other.tool.flag", "whatever"),
        ])
        .unwrap();
        assert_eq!(config.entry_point, "builder");
        assert_eq!(config.builder_suffix, "Options");
        assert_eq!(config.utility_namespace.to_string(), "com.acme.gen.Defaults");
        assert!(config.parallel);
        assert!(!config.warn_unmatched);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            GeneratorConfig::from_options([("defaultgen.parallel", "yes")]),
            Err(ConfigError::InvalidValue {
                key: "defaultgen.parallel".into(),
                value: "yes".into(),
                expected: "true or false",
            })
        );
        assert!(GeneratorConfig::from_options([("defaultgen.entryPoint", "1st")]).is_err());
        assert!(GeneratorConfig::from_options([("defaultgen.utilityNamespace", "a..b")]).is_err());
    }

    #[test]
    fn rejects_unknown_prefixed_key() {
        assert_eq!(
            GeneratorConfig::from_options([("defaultgen.mode", "fast")]),
            Err(ConfigError::UnknownOption {
                key: "defaultgen.mode".into()
            })
        );
    }

    #[test]
    fn setters_chain() {
        let config = GeneratorConfig::default()
            .with_builder_suffix("Spec")
            .with_parallel(true);
        assert_eq!(config.builder_suffix, "Spec");
        assert!(config.parallel);
    }
}
