use crate::commands::{CmdMessage, CmdResult, FileReport};
use crate::config::QidataConfig;
use crate::error::Result;
use crate::file::{OpenMode, QiDataFile};
use crate::version::identify_with_ext;
use std::path::Path;

pub fn run(path: &Path, config: &QidataConfig) -> Result<CmdResult> {
    let mut file = QiDataFile::open_with(path, OpenMode::Read, config)?;
    let report = FileReport {
        path: path.to_path_buf(),
        kind: file.kind(),
        store: file.store().clone(),
    };
    file.close()?;

    let mut result = CmdResult::default();
    if let Some(version) = identify_with_ext(path, &config.sidecar_ext) {
        if !version.is_current() {
            result.add_message(CmdMessage::warning(format!(
                "{} uses annotation version {}, its annotations are not loaded",
                path.display(),
                version
            )));
        }
    }
    if report.store.is_empty() {
        result.add_message(CmdMessage::info("No annotations"));
    }
    Ok(result.with_report(report))
}
