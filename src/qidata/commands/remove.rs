use crate::commands::{AnnotationRequest, CmdMessage, CmdResult};
use crate::config::QidataConfig;
use crate::error::Result;
use crate::file::{OpenMode, QiDataFile};
use crate::metadata::make_metadata_object;
use std::path::Path;

/// Remove one annotation. Without `--location`, an entry with any location
/// may be removed when none without a location matches.
pub fn run(path: &Path, config: &QidataConfig, request: &AnnotationRequest) -> Result<CmdResult> {
    let annotator = request.annotator(config)?;
    let object = make_metadata_object(&request.type_name, &request.fields()?)?;
    let location = request.location()?;

    let mut file = QiDataFile::open_with(path, OpenMode::Write, config)?;
    file.remove_annotation(&annotator, &object, location.as_ref())?;
    file.close()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} for {}",
        object, annotator
    )));
    Ok(result)
}
