//! Persistent settings of the command line tool, kept in
//! `<config dir>/config.json`.
//!
//! | Key           | Field               | Default     |
//! |---------------|---------------------|-------------|
//! | `sidecar-ext` | `sidecar_ext`       | `.xmp.json` |
//! | `annotator`   | `default_annotator` | unset       |

use crate::error::{QidataError, Result};
use crate::xmp::sidecar::{write_atomic, DEFAULT_SIDECAR_EXT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

/// A setting addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SidecarExt,
    Annotator,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::SidecarExt, ConfigKey::Annotator];

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::SidecarExt => "sidecar-ext",
            ConfigKey::Annotator => "annotator",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = QidataError;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| QidataError::Api(format!("Unknown config key: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QidataConfig {
    /// Appended to a data file's full name to locate its sidecar.
    #[serde(default = "default_sidecar_ext")]
    pub sidecar_ext: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_annotator: Option<String>,
}

fn default_sidecar_ext() -> String {
    DEFAULT_SIDECAR_EXT.to_string()
}

impl Default for QidataConfig {
    fn default() -> Self {
        Self {
            sidecar_ext: default_sidecar_ext(),
            default_annotator: None,
        }
    }
}

impl QidataConfig {
    /// Settings stored in `config_dir`, defaults when nothing is stored yet.
    pub fn load(config_dir: &Path) -> Result<Self> {
        match fs::read_to_string(config_dir.join(CONFIG_FILENAME)) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, config_dir: &Path) -> Result<()> {
        fs::create_dir_all(config_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        write_atomic(&config_dir.join(CONFIG_FILENAME), &content)
    }

    /// Annotator to use when the caller gives none.
    pub fn annotator(&self) -> Option<&str> {
        self.default_annotator.as_deref()
    }

    /// Text form of a setting; an unset annotator reads as empty.
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::SidecarExt => self.sidecar_ext.clone(),
            ConfigKey::Annotator => self.annotator().unwrap_or_default().to_string(),
        }
    }

    /// Every setting with its text form, in table order.
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .collect()
    }

    /// Change a setting from its text form.
    ///
    /// The sidecar extension gains a leading dot when it lacks one. An empty
    /// annotator unsets the default.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::SidecarExt => {
                let ext = value.trim();
                if ext.trim_start_matches('.').is_empty() {
                    return Err(QidataError::Api(format!("{} cannot be empty", key)));
                }
                self.sidecar_ext = if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{}", ext)
                };
            }
            ConfigKey::Annotator => {
                let name = value.trim();
                self.default_annotator = (!name.is_empty()).then(|| name.to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = QidataConfig::default();
        assert_eq!(config.sidecar_ext, ".xmp.json");
        assert_eq!(config.annotator(), None);
    }

    #[test]
    fn key_names_parse() {
        for key in ConfigKey::ALL {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), key);
        }
        let err = "colour".parse::<ConfigKey>().unwrap_err();
        assert_eq!(err.to_string(), "Api Error: Unknown config key: colour");
    }

    #[test]
    fn sidecar_ext_gets_a_leading_dot() {
        let mut config = QidataConfig::default();
        config.set(ConfigKey::SidecarExt, "meta.json").unwrap();
        assert_eq!(config.sidecar_ext, ".meta.json");
        config.set(ConfigKey::SidecarExt, ".xmp").unwrap();
        assert_eq!(config.sidecar_ext, ".xmp");
        assert!(config.set(ConfigKey::SidecarExt, ".").is_err());
        assert_eq!(config.sidecar_ext, ".xmp");
    }

    #[test]
    fn empty_annotator_unsets_the_default() {
        let mut config = QidataConfig::default();
        assert_eq!(config.get(ConfigKey::Annotator), "");
        config.set(ConfigKey::Annotator, "jdoe").unwrap();
        assert_eq!(config.annotator(), Some("jdoe"));
        config.set(ConfigKey::Annotator, "  ").unwrap();
        assert_eq!(config.annotator(), None);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = QidataConfig::load(&dir.path().join("absent")).unwrap();
        assert_eq!(config, QidataConfig::default());
    }

    #[test]
    fn save_creates_the_directory_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");

        let mut config = QidataConfig::default();
        config.set(ConfigKey::Annotator, "jdoe").unwrap();
        config.set(ConfigKey::SidecarExt, "xmp").unwrap();
        config.save(&nested).unwrap();

        let loaded = QidataConfig::load(&nested).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.entries(),
            vec![
                (ConfigKey::SidecarExt, ".xmp".to_string()),
                (ConfigKey::Annotator, "jdoe".to_string()),
            ]
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"default_annotator":"sam"}"#,
        )
        .unwrap();
        let config = QidataConfig::load(dir.path()).unwrap();
        assert_eq!(config.sidecar_ext, ".xmp.json");
        assert_eq!(config.annotator(), Some("sam"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{").unwrap();
        assert!(matches!(
            QidataConfig::load(dir.path()),
            Err(QidataError::Serialization(_))
        ));
    }
}
