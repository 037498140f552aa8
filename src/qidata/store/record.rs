//! Plain nested form of an [`AnnotationStore`].
//!
//! ```text
//! { annotator: { TypeName: [ { "info": {...fields, "version": n}, "location": ... } ] } }
//! ```
//!
//! `location` is omitted for annotations without one.

use super::{Annotation, AnnotationStore, Annotations, TypedAnnotations};
use crate::error::Result;
use crate::location::Location;
use crate::metadata::{make_metadata_object, FieldValue, Fields, MetadataType, VERSION_FIELD};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub info: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl AnnotationRecord {
    pub fn from_annotation(annotation: &Annotation) -> Self {
        let mut info = annotation.object.to_dict();
        info.insert(
            VERSION_FIELD.to_string(),
            FieldValue::Int(i64::from(annotation.object.version())),
        );
        Self {
            info,
            location: annotation.location.clone(),
        }
    }

    pub fn to_annotation(&self, metadata_type: MetadataType) -> Result<Annotation> {
        Ok(Annotation {
            object: make_metadata_object(metadata_type.name(), &self.info)?,
            location: self.location.clone(),
        })
    }
}

/// `annotator -> type name -> records`.
pub type RecordTree = IndexMap<String, IndexMap<String, Vec<AnnotationRecord>>>;

impl AnnotationStore {
    pub fn to_records(&self) -> RecordTree {
        self.annotations
            .iter()
            .map(|(annotator, typed)| {
                let typed = typed
                    .iter()
                    .map(|(metadata_type, entries)| {
                        let records = entries.iter().map(AnnotationRecord::from_annotation).collect();
                        (metadata_type.name().to_string(), records)
                    })
                    .collect();
                (annotator.clone(), typed)
            })
            .collect()
    }

    /// Build a writable store from records, keeping only the listed types.
    /// Types keep the order they have in `records`.
    ///
    /// Types missing for an annotator are simply absent from the result; a
    /// record that does not describe a valid object is an error.
    pub fn from_records(records: &RecordTree, types: &[MetadataType]) -> Result<Self> {
        let mut store = AnnotationStore::new();
        store.replace_all(records_to_annotations(records, types)?);
        Ok(store)
    }
}

pub(crate) fn records_to_annotations(
    records: &RecordTree,
    types: &[MetadataType],
) -> Result<Annotations> {
    let mut annotations = Annotations::new();
    for (annotator, by_type) in records {
        let mut typed = TypedAnnotations::new();
        for (type_name, entries) in by_type {
            let Some(metadata_type) = types.iter().find(|t| t.name() == type_name.as_str())
            else {
                continue;
            };
            let loaded = entries
                .iter()
                .map(|record| record.to_annotation(*metadata_type))
                .collect::<Result<Vec<_>>>()?;
            debug!(
                annotator = annotator.as_str(),
                metadata_type = metadata_type.name(),
                count = loaded.len(),
                "loaded annotations"
            );
            typed.insert(*metadata_type, loaded);
        }
        annotations.insert(annotator.clone(), typed);
    }
    Ok(annotations)
}
