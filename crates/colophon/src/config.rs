//! Configuration for the about page.
//!
//! A `colophon.yaml` file supplies the texts that are localized resources in
//! a GUI application. Every field is optional:
//!
//! ```yaml
//! name: Colophon
//! about_template: |
//!   {{ name }} {{ version }}
//!   Built {{ build_date }} for {{ os }} ({{ arch }}).
//! developers: ann, bo, cy          # or a YAML list
//! translators: "Translated by [Crowd](https://crowd.example).\n\n"
//! other_software: ""
//! credits:
//!   header: Brought to you by
//!   wrap_at: 80
//! ```

use colophon_markup::{split_names, CreditsConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ColophonError, Result};

const DEFAULT_ABOUT_TEMPLATE: &str = "{{ name }} {{ version }}
Built {{ build_date }} for {{ os }} ({{ arch }}).

Source code and issue tracker on [GitHub](https://github.com/arthur-debert/colophon).
";

const DEFAULT_OTHER_SOFTWARE: &str = "This program is built on [serde](https://serde.rs), \
[clap](https://docs.rs/clap) and [MiniJinja](https://docs.rs/minijinja).\n";

/// Developer names, either as one comma-separated string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameList {
    Inline(String),
    List(Vec<String>),
}

impl Default for NameList {
    fn default() -> Self {
        NameList::List(Vec::new())
    }
}

impl NameList {
    /// The trimmed, non-empty names in order.
    pub fn names(&self) -> Vec<String> {
        match self {
            NameList::Inline(list) => split_names(list),
            NameList::List(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// About-page texts and credits settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name shown in the about text.
    pub name: String,
    /// MiniJinja template for the about text; its first line is shown bold.
    pub about_template: String,
    pub developers: NameList,
    /// Markup appended after the developer credits.
    pub translators: String,
    /// Markup appended after the translators.
    pub other_software: String,
    pub credits: CreditsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "Colophon".to_string(),
            about_template: DEFAULT_ABOUT_TEMPLATE.to_string(),
            developers: NameList::default(),
            translators: String::new(),
            other_software: DEFAULT_OTHER_SOFTWARE.to_string(),
            credits: CreditsConfig::default(),
        }
    }
}

impl Config {
    /// Parses configuration from YAML content.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        parse_yaml(yaml, "<inline>")
    }

    /// Loads configuration from a YAML file.
    ///
    /// An empty file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        parse_yaml(&content, &path.display().to_string())
    }
}

/// Reads and deserializes a YAML or JSON file.
pub fn read_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read(path)?;
    parse_yaml(&content, &path.display().to_string())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ColophonError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_yaml<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T> {
    serde_yaml::from_str(content).map_err(|e| ColophonError::yaml(origin, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.name, "Colophon");
        assert!(config.about_template.starts_with("{{ name }} {{ version }}\n"));
        assert!(config.developers.names().is_empty());
        assert_eq!(config.credits.wrap_at, 80);
    }

    #[test]
    fn inline_developers() {
        let config = Config::from_yaml("developers: ann, bo ,cy").unwrap();
        assert_eq!(config.developers.names(), vec!["ann", "bo", "cy"]);
    }

    #[test]
    fn list_developers() {
        let config = Config::from_yaml("developers:\n  - ann\n  - ' bo '\n  - ''\n").unwrap();
        assert_eq!(config.developers.names(), vec!["ann", "bo"]);
    }

    #[test]
    fn partial_credits_keep_defaults() {
        let config = Config::from_yaml("credits:\n  header: Brought to you by\n").unwrap();
        assert_eq!(config.credits.header, "Brought to you by");
        assert_eq!(config.credits.profile_url_prefix, "https://github.com/");
        assert_eq!(config.name, "Colophon");
    }

    #[test]
    fn invalid_yaml_is_error() {
        let err = Config::from_yaml("credits: [").unwrap_err();
        assert!(matches!(err, ColophonError::Yaml { .. }));
    }

    #[test]
    fn from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: Ledger\ndevelopers: [ann]").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.name, "Ledger");
        assert_eq!(config.developers.names(), vec!["ann"]);
    }

    #[test]
    fn empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(Config::from_file(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ColophonError::Io { .. }));
    }

    #[test]
    fn reads_json_through_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["a", "b"]"#).unwrap();
        let names: Vec<String> = read_yaml_file(file.path()).unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }
}
