use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

/// Config file names probed when no explicit path is given
pub const CONFIG_CANDIDATES: [&str; 3] = [
    "Actiongraph.toml",
    "actiongraph.toml",
    ".actiongraph.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanning and resolution settings
    pub analysis: AnalysisConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Blacklist source
    pub blacklist: BlacklistConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Extension of project source files (without the dot)
    pub source_extension: String,

    /// Class-name suffix marking an entry-point class
    pub action_suffix: String,

    /// Bytes scanned before a method declaration for annotations
    pub annotation_lookback: usize,

    /// Follow symbolic links while walking the tree
    pub follow_links: bool,

    /// Call names that never produce an edge
    pub builtin_methods: Vec<String>,

    /// Accessor prefixes whose calls never produce an edge
    pub accessor_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the CLI writes the network document
    pub path: PathBuf,

    /// Pretty-print the JSON document
    pub pretty: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlacklistConfig {
    /// Newline-delimited list of method names to exclude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let builtin_methods = [
            "toString", "equals", "hashCode", "getClass", "wait", "notify", "notifyAll",
            "println", "print", "format", "append", "substring", "length", "indexOf",
        ];

        Self {
            source_extension: "java".to_string(),
            action_suffix: "Action".to_string(),
            annotation_lookback: 200,
            follow_links: false,
            builtin_methods: builtin_methods.iter().map(|s| s.to_string()).collect(),
            accessor_prefixes: vec!["get".to_string(), "set".to_string(), "is".to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("function_network.json"),
            pretty: true,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Err(AnalyzerError::Config(format!(
                        "config file {} does not exist",
                        p.as_ref().display()
                    )))
                }
            }
            None => {
                for candidate in &CONFIG_CANDIDATES {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let extension = &self.analysis.source_extension;
        if extension.is_empty() || extension.starts_with('.') {
            return Err(AnalyzerError::Config(format!(
                "source_extension must be a bare extension, got {:?}",
                extension
            )));
        }
        if self.analysis.action_suffix.is_empty() {
            return Err(AnalyzerError::Config("action_suffix must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[analysis]
annotation_lookback = 64

[output]
pretty = false
"#,
        )
        .unwrap();

        assert_eq!(config.analysis.annotation_lookback, 64);
        assert_eq!(config.analysis.source_extension, "java");
        assert_eq!(config.analysis.action_suffix, "Action");
        assert!(config.analysis.builtin_methods.contains(&"println".to_string()));
        assert!(!config.output.pretty);
        assert_eq!(config.output.path, PathBuf::from("function_network.json"));
        assert!(config.blacklist.file.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actiongraph.toml");

        let mut config = Config::default();
        config.blacklist.file = Some(PathBuf::from("blacklist.txt"));
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.blacklist.file, Some(PathBuf::from("blacklist.txt")));
        assert_eq!(loaded.analysis.accessor_prefixes, vec!["get", "set", "is"]);
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[analysis]\nsource_extension = \".java\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = Config::load_or_default(Some("/definitely/not/here.toml"));
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }
}
