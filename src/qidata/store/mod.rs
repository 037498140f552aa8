//! # Annotation Store
//!
//! In-memory home of a data file's annotations:
//!
//! ```text
//! annotator ─┬─ MetadataType ── [ (object, location?), ... ]
//!            └─ MetadataType ── [ ... ]
//! ```
//!
//! Both mapping levels keep insertion order so that serialization is
//! deterministic. A type key disappears as soon as its list is empty, and an
//! annotator key disappears with its last type: the store never holds empty
//! branches.
//!
//! ## Access Model
//!
//! - Mutation happens only through [`AnnotationStore::add_annotation`] and
//!   [`AnnotationStore::remove_annotation`], both refused with
//!   [`QidataError::ReadOnly`] on a read-only store.
//! - [`AnnotationStore::get_annotations`] and [`AnnotationStore::annotations`]
//!   hand out owned copies; changing them never reaches the store.
//! - [`AnnotationStore::annotations_of`] lends a borrowed view for callers
//!   that only need to look.
//!
//! ## Removal Matching
//!
//! An entry matches when both its object and its location are equal to the
//! ones given. When the caller gives no location and no entry without a
//! location matches, the first entry with an equal object is removed instead,
//! whatever its location.
//!
//! ## Serialization
//!
//! The store converts to and from a plain nested record form ([`RecordTree`])
//! through [`AnnotationStore::to_records`] and [`AnnotationStore::from_records`].
//! The file adapter maps that form onto the attribute container.

use crate::error::{QidataError, Result};
use crate::location::{self, Location, LocationCheck};
use crate::metadata::{MetadataObject, MetadataType};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

pub mod record;

pub use record::{AnnotationRecord, RecordTree};

/// One annotation: an object, optionally tied to a place in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub object: MetadataObject,
    pub location: Option<Location>,
}

impl Annotation {
    pub fn new(object: impl Into<MetadataObject>, location: Option<Location>) -> Self {
        Self {
            object: object.into(),
            location,
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}",
            self.object,
            location::describe(self.location.as_ref())
        )
    }
}

/// Annotations of one annotator, grouped by type.
pub type TypedAnnotations = IndexMap<MetadataType, Vec<Annotation>>;

/// All annotations, grouped by annotator.
pub type Annotations = IndexMap<String, TypedAnnotations>;

#[derive(Debug, Clone)]
pub struct AnnotationStore {
    annotations: Annotations,
    read_only: bool,
    dirty: bool,
    location_check: LocationCheck,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AnnotationStore {
    fn eq(&self, other: &Self) -> bool {
        self.annotations == other.annotations
    }
}

impl AnnotationStore {
    /// Empty writable store accepting any location.
    pub fn new() -> Self {
        Self {
            annotations: Annotations::new(),
            read_only: false,
            dirty: false,
            location_check: location::accept_any,
        }
    }

    pub fn with_location_check(mut self, check: LocationCheck) -> Self {
        self.location_check = check;
        self
    }

    pub fn set_location_check(&mut self, check: LocationCheck) {
        self.location_check = check;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// True when the store was changed since it was built or last marked clean.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Whether `location` is acceptable for this store. `None` always is.
    pub fn is_location_valid(&self, location: Option<&Location>) -> bool {
        location.map_or(true, |l| (self.location_check)(l))
    }

    /// Append an annotation for `annotator`.
    ///
    /// The object must pass [`MetadataObject::validate`], so that whatever the
    /// store holds can be read back after serialization.
    pub fn add_annotation(
        &mut self,
        annotator: &str,
        object: impl Into<MetadataObject>,
        location: Option<Location>,
    ) -> Result<()> {
        self.ensure_writable()?;
        let object = object.into();
        object.validate()?;
        if !self.is_location_valid(location.as_ref()) {
            return Err(QidataError::InvalidLocation(location::describe(
                location.as_ref(),
            )));
        }

        self.annotations
            .entry(annotator.to_string())
            .or_default()
            .entry(object.metadata_type())
            .or_default()
            .push(Annotation { object, location });
        self.dirty = true;
        Ok(())
    }

    /// Annotations made by `annotator`, optionally restricted to one type name.
    ///
    /// Unknown annotators yield an empty list. Without a type, the lists of
    /// every type are concatenated in the order the types were first added.
    pub fn get_annotations(
        &self,
        annotator: &str,
        type_name: Option<&str>,
    ) -> Result<Vec<Annotation>> {
        let Some(typed) = self.annotations.get(annotator) else {
            return Ok(Vec::new());
        };

        let metadata_type = type_name
            .map(|name| {
                MetadataType::from_str(name).map_err(|_| {
                    QidataError::InvalidType(format!("{} is not a valid MetadataType", name))
                })
            })
            .transpose()?;

        Ok(match metadata_type {
            Some(t) => typed.get(&t).cloned().unwrap_or_default(),
            None => typed.values().flatten().cloned().collect(),
        })
    }

    /// Borrowed view of one (annotator, type) list. Empty when absent.
    pub fn annotations_of(&self, annotator: &str, metadata_type: MetadataType) -> &[Annotation] {
        self.annotations
            .get(annotator)
            .and_then(|typed| typed.get(&metadata_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Remove one annotation of `annotator`.
    ///
    /// See the module documentation for the matching rules.
    pub fn remove_annotation(
        &mut self,
        annotator: &str,
        object: &MetadataObject,
        location: Option<&Location>,
    ) -> Result<()> {
        self.ensure_writable()?;
        let metadata_type = object.metadata_type();

        let typed = self
            .annotations
            .get_mut(annotator)
            .ok_or_else(|| QidataError::UnknownAnnotator(annotator.to_string()))?;

        let position = typed
            .get(&metadata_type)
            .and_then(|entries| find_match(entries, object, location));

        let Some(position) = position else {
            return Err(QidataError::NoMatch {
                annotator: annotator.to_string(),
                object: object.to_string(),
                location: location::describe(location),
            });
        };

        if let Some(entries) = typed.get_mut(&metadata_type) {
            entries.remove(position);
            if entries.is_empty() {
                typed.shift_remove(&metadata_type);
            }
        }
        if typed.is_empty() {
            self.annotations.shift_remove(annotator);
        }
        self.dirty = true;
        Ok(())
    }

    /// Deep copy of every annotation.
    pub fn annotations(&self) -> Annotations {
        self.annotations.clone()
    }

    /// Annotators currently present, in insertion order.
    pub fn annotators(&self) -> Vec<String> {
        self.annotations.keys().cloned().collect()
    }

    /// Drop every annotation and load `annotations` instead, leaving the
    /// store clean. Empty branches in `annotations` are skipped.
    pub(crate) fn replace_all(&mut self, annotations: Annotations) {
        self.annotations = annotations
            .into_iter()
            .map(|(annotator, typed)| {
                let typed: TypedAnnotations =
                    typed.into_iter().filter(|(_, v)| !v.is_empty()).collect();
                (annotator, typed)
            })
            .filter(|(_, typed)| !typed.is_empty())
            .collect();
        self.dirty = false;
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.read_only {
            Err(QidataError::ReadOnly)
        } else {
            Ok(())
        }
    }
}

fn find_match(
    entries: &[Annotation],
    object: &MetadataObject,
    location: Option<&Location>,
) -> Option<usize> {
    let exact = entries
        .iter()
        .position(|a| &a.object == object && a.location.as_ref() == location);
    if exact.is_some() || location.is_some() {
        return exact;
    }
    entries.iter().position(|a| &a.object == object)
}

impl fmt::Display for AnnotationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (annotator, typed) in &self.annotations {
            writeln!(f, "Annotator: {}", annotator)?;
            for (metadata_type, entries) in typed {
                writeln!(f, "  {}:", metadata_type)?;
                for entry in entries {
                    writeln!(f, "    - {}", entry)?;
                }
            }
        }
        Ok(())
    }
}
