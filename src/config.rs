//! Source-set configuration for `polish.toml`.
//!
//! The file is optional; defaults cover the site layout this tool
//! grew up with. Example:
//!
//! ```toml
//! [sources]
//! css = ["assets/css/base.css", "assets/css/themes.css"]
//! html = ["index.html", "fr/index.html", "projects", "fr/projets"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolishConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// The fixed file sets one run inspects, in lookup order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// CSS files, relative to the project root.
    #[serde(default = "default_css_sources")]
    pub css: Vec<String>,
    /// HTML files or directories, relative to the project root.
    #[serde(default = "default_html_targets")]
    pub html: Vec<String>,
}

fn default_css_sources() -> Vec<String> {
    [
        "assets/css/base.css",
        "assets/css/layout.css",
        "assets/css/components.css",
        "assets/css/themes.css",
    ]
    .map(String::from)
    .to_vec()
}

fn default_html_targets() -> Vec<String> {
    ["index.html", "fr/index.html", "projects", "fr/projets"]
        .map(String::from)
        .to_vec()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            css: default_css_sources(),
            html: default_html_targets(),
        }
    }
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
        }
    }
}

impl PolishConfig {
    /// Parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config next to `root`, falling back to defaults when
    /// the file does not exist.
    pub fn load(root: &Path, file_name: &Path) -> Result<Self, ConfigError> {
        let path = root.join(file_name);
        if path.exists() {
            Self::from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.css.is_empty() {
            return Err(ConfigError::Validation(
                "at least one CSS source is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Read every configured CSS file into memory, preserving order.
    pub fn read_css_sources(&self, root: &Path) -> Result<Vec<(String, String)>> {
        let mut sources = Vec::with_capacity(self.sources.css.len());
        for relative in &self.sources.css {
            let path = root.join(relative);
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read CSS source `{}`", path.display()))?;
            sources.push((relative.clone(), content));
        }
        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_cover_site_layout() {
        let config = PolishConfig::default();
        assert_eq!(config.sources.css.len(), 4);
        assert_eq!(config.sources.css[0], "assets/css/base.css");
        assert_eq!(
            config.sources.html,
            vec!["index.html", "fr/index.html", "projects", "fr/projets"]
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = PolishConfig::load(dir.path(), Path::new("polish.toml")).unwrap();
        assert_eq!(config.sources.css.len(), 4);
    }

    #[test]
    fn test_config_overrides_sources() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polish.toml");
        fs::write(&path, "[sources]\ncss = [\"style.css\"]\nhtml = [\"home.html\"]\n").unwrap();
        let config = PolishConfig::load(dir.path(), Path::new("polish.toml")).unwrap();
        assert_eq!(config.sources.css, vec!["style.css"]);
        assert_eq!(config.sources.html, vec!["home.html"]);
    }

    #[test]
    fn test_partial_config_keeps_defaulted_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polish.toml");
        fs::write(&path, "[sources]\ncss = [\"style.css\"]\n").unwrap();
        let config = PolishConfig::from_path(&path).unwrap();
        assert_eq!(config.sources.css, vec!["style.css"]);
        assert_eq!(config.sources.html.len(), 4);
    }

    #[test]
    fn test_empty_css_list_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polish.toml");
        fs::write(&path, "[sources]\ncss = []\n").unwrap();
        let err = PolishConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polish.toml");
        fs::write(&path, "sources = nonsense").unwrap();
        assert!(matches!(
            PolishConfig::from_path(&path).unwrap_err(),
            ConfigError::Toml(_)
        ));
    }

    #[test]
    fn test_read_css_sources_preserves_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.css"), ":root { --a: 1px; }").unwrap();
        fs::write(dir.path().join("b.css"), ":root { --b: 2px; }").unwrap();
        let config = PolishConfig {
            sources: SourcesConfig {
                css: vec!["b.css".to_string(), "a.css".to_string()],
                html: Vec::new(),
            },
        };
        let sources = config.read_css_sources(dir.path()).unwrap();
        assert_eq!(sources[0].0, "b.css");
        assert_eq!(sources[1].0, "a.css");
    }

    #[test]
    fn test_missing_css_source_errors() {
        let dir = tempdir().unwrap();
        let config = PolishConfig::default();
        assert!(config.read_css_sources(dir.path()).is_err());
    }
}
