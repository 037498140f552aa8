use crate::commands::{CmdMessage, CmdResult};
use crate::config::{ConfigKey, QidataConfig};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Bad keys and values are reported as error messages; only IO and parse
/// failures of the stored file are errors.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = QidataConfig::load(dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(name) => match name.parse::<ConfigKey>() {
            Ok(key) => result.add_message(CmdMessage::info(config.get(key))),
            Err(e) => result.add_message(CmdMessage::error(e.to_string())),
        },
        ConfigAction::Set(name, value) => {
            let changed = name
                .parse::<ConfigKey>()
                .and_then(|key| config.set(key, &value).map(|_| key));
            match changed {
                Ok(key) => {
                    config.save(dir)?;
                    result.add_message(CmdMessage::success(format!(
                        "{} set to {}",
                        key,
                        config.get(key)
                    )));
                    return Ok(result.with_config(config));
                }
                Err(e) => result.add_message(CmdMessage::error(e.to_string())),
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn set_then_show_key() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("sidecar-ext".into(), "meta".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "sidecar-ext set to .meta");
        assert_eq!(result.config.unwrap().sidecar_ext, ".meta");

        let result = run(dir.path(), ConfigAction::ShowKey("sidecar-ext".into())).unwrap();
        assert_eq!(result.messages[0].content, ".meta");
    }

    #[test]
    fn unknown_key_is_reported_not_saved() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::Set("colour".into(), "red".into())).unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Error));
        assert!(result.messages[0].content.contains("Unknown config key: colour"));
        assert!(!dir.path().join("config.json").exists());

        let result = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Error));
    }

    #[test]
    fn invalid_value_is_reported_not_saved() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::Set("sidecar-ext".into(), ".".into())).unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Error));
        assert!(result.config.is_none());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(QidataConfig::default()));
    }
}
