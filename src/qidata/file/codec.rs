//! Mapping between the store's record form and the container's value tree.
//!
//! ```text
//! qidata:jdoe
//! └── qidata:Property            (array)
//!     └── [0]
//!         ├── qidata:info        (struct, one text leaf per field + version)
//!         └── qidata:location    (text or nested arrays of text, optional)
//! ```

use crate::error::{QidataError, Result};
use crate::location::Location;
use crate::metadata::{FieldValue, Fields, MetadataType};
use crate::store::{AnnotationRecord, RecordTree};
use crate::xmp::{qualified, strip_prefixes, XmpTree, XmpValue};
use indexmap::IndexMap;

const INFO: &str = "info";
const LOCATION: &str = "location";

pub(crate) fn records_to_tree(records: &RecordTree, prefix: &str) -> XmpTree {
    records
        .iter()
        .map(|(annotator, by_type)| {
            let typed: XmpTree = by_type
                .iter()
                .map(|(type_name, entries)| {
                    let items = entries
                        .iter()
                        .map(|record| record_to_value(record, prefix))
                        .collect();
                    (qualified(prefix, type_name), XmpValue::Array(items))
                })
                .collect();
            (qualified(prefix, annotator), XmpValue::Struct(typed))
        })
        .collect()
}

fn record_to_value(record: &AnnotationRecord, prefix: &str) -> XmpValue {
    let info: XmpTree = record
        .info
        .iter()
        .map(|(name, value)| (qualified(prefix, name), XmpValue::Text(value.to_text())))
        .collect();

    let mut entry = XmpTree::new();
    entry.insert(qualified(prefix, INFO), XmpValue::Struct(info));
    if let Some(location) = &record.location {
        entry.insert(qualified(prefix, LOCATION), location_to_value(location));
    }
    XmpValue::Struct(entry)
}

fn location_to_value(location: &Location) -> XmpValue {
    match location {
        Location::List(items) => XmpValue::Array(items.iter().map(location_to_value).collect()),
        leaf => XmpValue::Text(leaf.to_text().unwrap_or_default()),
    }
}

/// Read the records of the listed types out of a namespace tree, in the
/// order the tree stores them.
///
/// Every annotator found in the tree gets an entry, even if none of its
/// types are listed.
pub(crate) fn tree_to_records(tree: &XmpTree, types: &[MetadataType]) -> Result<RecordTree> {
    let mut records = RecordTree::new();
    for (annotator, node) in strip_prefixes(tree) {
        let typed = node
            .as_struct()
            .ok_or_else(|| malformed(&format!("annotator {} is not a structure", annotator)))?;

        let mut by_type = IndexMap::new();
        for (type_name, list) in typed {
            let Some(metadata_type) = types.iter().find(|t| t.name() == type_name.as_str())
            else {
                continue;
            };
            let items = list.as_array().ok_or_else(|| {
                malformed(&format!("{}/{} is not an array", annotator, metadata_type))
            })?;
            let entries = items
                .iter()
                .map(value_to_record)
                .collect::<Result<Vec<_>>>()?;
            by_type.insert(metadata_type.name().to_string(), entries);
        }
        records.insert(annotator, by_type);
    }
    Ok(records)
}

fn value_to_record(value: &XmpValue) -> Result<AnnotationRecord> {
    let entry = value
        .as_struct()
        .ok_or_else(|| malformed("annotation entry is not a structure"))?;

    let info = entry
        .get(INFO)
        .and_then(XmpValue::as_struct)
        .ok_or_else(|| malformed("annotation entry has no info structure"))?;
    let info = info
        .iter()
        .map(|(name, value)| {
            value
                .as_text()
                .map(|text| (name.clone(), FieldValue::Str(text.to_string())))
                .ok_or_else(|| malformed(&format!("info field {} is not text", name)))
        })
        .collect::<Result<Fields>>()?;

    let location = entry.get(LOCATION).map(value_to_location).transpose()?;
    Ok(AnnotationRecord { info, location })
}

fn value_to_location(value: &XmpValue) -> Result<Location> {
    match value {
        XmpValue::Text(text) => Ok(Location::from_text(text)),
        XmpValue::Array(items) => Ok(Location::List(
            items
                .iter()
                .map(value_to_location)
                .collect::<Result<Vec<_>>>()?,
        )),
        XmpValue::Struct(_) => Err(malformed("location structures are not supported")),
    }
}

fn malformed(reason: &str) -> QidataError {
    QidataError::Container(reason.to_string())
}
