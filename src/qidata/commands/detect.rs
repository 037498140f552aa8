use crate::commands::{CmdMessage, CmdResult};
use crate::config::QidataConfig;
use crate::error::Result;
use crate::version::identify_with_ext;
use std::path::PathBuf;

pub fn run(paths: &[PathBuf], config: &QidataConfig) -> Result<CmdResult> {
    let versions: Vec<_> = paths
        .iter()
        .map(|path| (path.clone(), identify_with_ext(path, &config.sidecar_ext)))
        .collect();

    let mut result = CmdResult::default();
    let outdated = versions
        .iter()
        .filter(|(_, v)| v.map_or(false, |v| !v.is_current()))
        .count();
    if outdated > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} file(s) use an outdated annotation version",
            outdated
        )));
    }
    Ok(result.with_versions(versions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::AnnotationVersion;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reports_each_file() {
        let dir = TempDir::new().unwrap();
        let legacy = dir.path().join("old.jpg");
        fs::write(&legacy, b"x").unwrap();
        fs::write(
            dir.path().join("old.jpg.xmp.json"),
            r#"{"namespaces":[{"uri":"http://aldebaran.com/xmp/1","prefix":"aldebaran",
                "children":{"aldebaran:Face":{}}}]}"#,
        )
        .unwrap();
        let plain = dir.path().join("plain.jpg");
        fs::write(&plain, b"x").unwrap();
        let missing = dir.path().join("missing.jpg");

        let result = run(
            &[legacy.clone(), plain.clone(), missing.clone()],
            &QidataConfig::default(),
        )
        .unwrap();
        assert_eq!(
            result.versions,
            vec![
                (legacy, Some(AnnotationVersion::V1)),
                (plain, None),
                (missing, None),
            ]
        );
        assert_eq!(result.messages.len(), 1);
    }
}
