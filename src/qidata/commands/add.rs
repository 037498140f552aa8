use crate::commands::{AnnotationRequest, CmdMessage, CmdResult};
use crate::config::QidataConfig;
use crate::error::Result;
use crate::file::{OpenMode, QiDataFile};
use crate::location;
use crate::metadata::make_metadata_object;
use std::path::Path;

pub fn run(path: &Path, config: &QidataConfig, request: &AnnotationRequest) -> Result<CmdResult> {
    let annotator = request.annotator(config)?;
    let object = make_metadata_object(&request.type_name, &request.fields()?)?;
    let location = request.location()?;

    let mut file = QiDataFile::open_with(path, OpenMode::Write, config)?;
    let message = format!(
        "Added {} for {} at {}",
        object,
        annotator,
        location::describe(location.as_ref())
    );
    file.add_annotation(&annotator, object, location)?;
    file.close()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(message));
    Ok(result)
}
