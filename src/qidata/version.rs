//! Detection of the annotation layout a file was written with.
//!
//! | Version | Namespace            | First level under the namespace |
//! |---------|----------------------|---------------------------------|
//! | 1       | `LEGACY_QIDATA_NS`   | data-object type (`Face`, ...)  |
//! | 2       | `LEGACY_QIDATA_NS`   | annotator                       |
//! | 3       | `QIDATA_NS`          | annotator, then metadata type   |

use crate::metadata::MetadataType;
use crate::xmp::sidecar::DEFAULT_SIDECAR_EXT;
use crate::xmp::{local_name, AttributeContainer, XmpFile, LEGACY_QIDATA_NS, QIDATA_NS};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnnotationVersion {
    V1,
    V2,
    V3,
}

impl AnnotationVersion {
    pub fn number(self) -> u32 {
        match self {
            AnnotationVersion::V1 => 1,
            AnnotationVersion::V2 => 2,
            AnnotationVersion::V3 => 3,
        }
    }

    /// Whether files of this version can be opened as a [`QiDataFile`](crate::file::QiDataFile).
    pub fn is_current(self) -> bool {
        self == AnnotationVersion::V3
    }
}

impl fmt::Display for AnnotationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Version of the annotations stored for `path`, `None` if it carries none.
///
/// A file whose container cannot be opened is reported as not annotated.
pub fn identify_file_annotation_version(path: &Path) -> Option<AnnotationVersion> {
    identify_with_ext(path, DEFAULT_SIDECAR_EXT)
}

pub fn identify_with_ext(path: &Path, sidecar_ext: &str) -> Option<AnnotationVersion> {
    match XmpFile::open_with_ext(path, false, sidecar_ext) {
        Ok(container) => identify_container_version(&container),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot open container");
            None
        }
    }
}

/// The first qidata namespace of the container decides the version.
pub fn identify_container_version<C: AttributeContainer>(container: &C) -> Option<AnnotationVersion> {
    let uri = container
        .namespaces()
        .into_iter()
        .find(|uri| *uri == LEGACY_QIDATA_NS || *uri == QIDATA_NS)?;

    if uri == QIDATA_NS {
        return Some(AnnotationVersion::V3);
    }

    let typed_first_level = container.namespace(uri).map_or(false, |children| {
        children.keys().any(|key| {
            MetadataType::from_str(local_name(key)).map_or(false, MetadataType::is_data_object)
        })
    });
    Some(if typed_first_level {
        AnnotationVersion::V1
    } else {
        AnnotationVersion::V2
    })
}
