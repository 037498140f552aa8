//! # File Adapter
//!
//! [`QiDataFile`] binds one [`AnnotationStore`] to the attribute container
//! of one data file.
//!
//! ## Lifecycle
//!
//! ```text
//!   open(path, "r") ──> open-readonly ──┐
//!   open(path, "w") ──> open-writable ──┴── close() ──> closed
//! ```
//!
//! - Opening classifies the file, opens its container and hydrates the store.
//! - [`QiDataFile::save`] serializes the store into the container. Nothing
//!   reaches the disk until [`QiDataFile::close`], which saves and flushes a
//!   writable file.
//! - [`QiDataFile::cancel_changes`] drops in-memory edits and hydrates again
//!   from the container, i.e. from the last save.
//! - Once closed, every mutating call fails with [`QidataError::ClosedFile`].
//!   Reads keep working on the last in-memory state.
//!
//! Dropping an open file closes it. Errors raised at that point can only be
//! logged, so callers that care should call `close()` themselves.
//!
//! ## Hydration
//!
//! Only the metadata types compatible with the file's [`DataKind`] are read
//! back. A type missing for an annotator is simply empty.

use crate::config::QidataConfig;
use crate::error::{QidataError, Result};
use crate::kind::{file_data_type, DataKind};
use crate::location::Location;
use crate::metadata::{compatible_types, MetadataObject, MetadataType};
use crate::store::record::records_to_annotations;
use crate::store::{Annotation, AnnotationStore, Annotations};
use crate::xmp::registry::{namespace_prefix, register_qidata_namespaces};
use crate::xmp::{local_name, AttributeContainer, XmpFile, XmpTree, QIDATA_NS};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

pub(crate) mod codec;

/// File-level property holding the data kind of the file.
pub const DATA_TYPE_PROPERTY: &str = "data_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
}

impl OpenMode {
    pub fn is_writable(self) -> bool {
        self == OpenMode::Write
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpenMode::Read => "r",
            OpenMode::Write => "w",
        })
    }
}

impl FromStr for OpenMode {
    type Err = QidataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" => Ok(OpenMode::Read),
            "w" => Ok(OpenMode::Write),
            other => Err(QidataError::Api(format!(
                "{} is not a valid mode (expected \"r\" or \"w\")",
                other
            ))),
        }
    }
}

/// An annotated data file.
pub struct QiDataFile<C: AttributeContainer = XmpFile> {
    container: C,
    kind: DataKind,
    store: AnnotationStore,
    raw_data: Option<Vec<u8>>,
    closed: bool,
}

impl QiDataFile<XmpFile> {
    /// Open `path` with the default configuration.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        Self::open_with(path, mode, &QidataConfig::default())
    }

    /// Open `path`. The file is never created; it must exist.
    pub fn open_with(path: impl AsRef<Path>, mode: OpenMode, config: &QidataConfig) -> Result<Self> {
        let path = path.as_ref();
        register_qidata_namespaces()?;
        let kind = file_data_type(path)?;
        let container = XmpFile::open_with_ext(path, mode.is_writable(), &config.sidecar_ext)?;
        let raw_data = if kind.has_raw_data() {
            Some(fs::read(path).map_err(QidataError::Io)?)
        } else {
            None
        };
        Self::with_container(container, kind, raw_data)
    }
}

impl<C: AttributeContainer> QiDataFile<C> {
    /// Wrap an already opened container. `kind` is the classified kind; a
    /// kind stored in the container wins when it belongs to the same family.
    pub fn with_container(container: C, kind: DataKind, raw_data: Option<Vec<u8>>) -> Result<Self> {
        let kind = match container.property(DATA_TYPE_PROPERTY).map(DataKind::from_str) {
            Some(Ok(stored)) if kind.can_become(stored) => stored,
            Some(Ok(stored)) => {
                debug!(%stored, classified = %kind, "ignoring stored data kind");
                kind
            }
            Some(Err(e)) => {
                debug!(error = %e, "ignoring unreadable data kind");
                kind
            }
            None => kind,
        };

        let mut store = AnnotationStore::new().with_location_check(kind.location_check());
        store.set_read_only(!container.is_writable());

        let mut file = Self {
            container,
            kind,
            store,
            raw_data,
            closed: false,
        };
        file.load()?;
        info!(
            path = %file.path().display(),
            mode = %file.mode(),
            kind = %file.kind,
            "opened file"
        );
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        self.container.path()
    }

    pub fn mode(&self) -> OpenMode {
        if self.container.is_writable() {
            OpenMode::Write
        } else {
            OpenMode::Read
        }
    }

    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// Refine the data kind within its family (`IMAGE` to `IMAGE_2D`, ...).
    pub fn set_kind(&mut self, kind: DataKind) -> Result<()> {
        self.ensure_writable()?;
        if !self.kind.can_become(kind) {
            return Err(QidataError::InvalidType(format!(
                "Cannot change type from {} to {}",
                self.kind, kind
            )));
        }
        self.kind = kind;
        self.store.set_location_check(kind.location_check());
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Unparsed content of the data file, for kinds that have one.
    pub fn raw_data(&self) -> Option<&[u8]> {
        self.raw_data.as_deref()
    }

    /// The qidata namespace as stored in the container, prefixes included.
    pub fn raw_metadata(&self) -> Option<&XmpTree> {
        self.container.namespace(QIDATA_NS)
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn annotations(&self) -> Annotations {
        self.store.annotations()
    }

    pub fn annotators(&self) -> Vec<String> {
        self.store.annotators()
    }

    /// Annotators present in the container, i.e. as of the last save.
    pub fn saved_annotators(&self) -> Vec<String> {
        self.raw_metadata()
            .map(|tree| tree.keys().map(|k| local_name(k).to_string()).collect())
            .unwrap_or_default()
    }

    pub fn get_annotations(&self, annotator: &str, type_name: Option<&str>) -> Result<Vec<Annotation>> {
        self.store.get_annotations(annotator, type_name)
    }

    pub fn annotations_of(&self, annotator: &str, metadata_type: MetadataType) -> &[Annotation] {
        self.store.annotations_of(annotator, metadata_type)
    }

    pub fn add_annotation(
        &mut self,
        annotator: &str,
        object: impl Into<MetadataObject>,
        location: Option<Location>,
    ) -> Result<()> {
        self.ensure_writable()?;
        let object = object.into();
        self.ensure_compatible(object.metadata_type())?;
        self.store.add_annotation(annotator, object, location)
    }

    pub fn remove_annotation(
        &mut self,
        annotator: &str,
        object: &MetadataObject,
        location: Option<&Location>,
    ) -> Result<()> {
        self.ensure_writable()?;
        self.ensure_compatible(object.metadata_type())?;
        self.store.remove_annotation(annotator, object, location)
    }

    /// Serialize the store into the container. Persisted at close.
    pub fn save(&mut self) -> Result<()> {
        self.ensure_writable()?;
        let prefix = namespace_prefix(QIDATA_NS).ok_or_else(|| {
            QidataError::Container(format!("namespace {} is not registered", QIDATA_NS))
        })?;

        let records = self.store.to_records();
        let tree = codec::records_to_tree(&records, &prefix);
        self.container.set_namespace(QIDATA_NS, tree)?;
        self.container.set_property(DATA_TYPE_PROPERTY, self.kind.name())?;
        self.store.mark_clean();
        debug!(path = %self.path().display(), annotators = records.len(), "saved annotations");
        Ok(())
    }

    /// Drop unsaved edits and reload the last saved state.
    pub fn cancel_changes(&mut self) -> Result<()> {
        self.ensure_writable()?;
        self.load()
    }

    /// Close the file, saving and flushing it when writable.
    ///
    /// The file is closed even if saving fails. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let result = if self.container.is_writable() {
            self.save().and_then(|()| self.container.flush())
        } else {
            Ok(())
        };
        self.closed = true;
        info!(path = %self.path().display(), "closed file");
        result
    }

    fn load(&mut self) -> Result<()> {
        let annotations = match self.container.namespace(QIDATA_NS) {
            Some(tree) => {
                let types = compatible_types(self.kind);
                let records = codec::tree_to_records(tree, types)?;
                records_to_annotations(&records, types)?
            }
            None => Annotations::new(),
        };
        self.store.replace_all(annotations);
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(QidataError::ClosedFile(self.path().to_path_buf()))
        } else {
            Ok(())
        }
    }

    fn ensure_writable(&self) -> Result<()> {
        self.ensure_open()?;
        if self.container.is_writable() {
            Ok(())
        } else {
            Err(QidataError::ReadOnly)
        }
    }

    fn ensure_compatible(&self, metadata_type: MetadataType) -> Result<()> {
        if compatible_types(self.kind).contains(&metadata_type) {
            Ok(())
        } else {
            Err(QidataError::InvalidType(format!(
                "{} cannot be stored in a {} file",
                metadata_type, self.kind
            )))
        }
    }
}

impl<C: AttributeContainer> Drop for QiDataFile<C> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(path = %self.path().display(), error = %e, "failed to close file");
        }
    }
}

impl<C: AttributeContainer> fmt::Display for QiDataFile<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.store, f)
    }
}

impl<C: AttributeContainer> fmt::Debug for QiDataFile<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QiDataFile")
            .field("path", &self.path())
            .field("mode", &self.mode())
            .field("kind", &self.kind)
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Person, Property, Speech};
    use crate::xmp::MemContainer;

    fn box_location() -> Location {
        Location::from(vec![vec![0_i64, 0], vec![10, 80]])
    }

    fn image(writable: bool) -> QiDataFile<MemContainer> {
        register_qidata_namespaces().unwrap();
        QiDataFile::with_container(MemContainer::new("photo.jpg", writable), DataKind::Image, None)
            .unwrap()
    }

    /// Close `file` and hand back what its container persisted.
    fn persisted(mut file: QiDataFile<MemContainer>) -> MemContainer {
        file.close().unwrap();
        file.container.clone()
    }

    #[test]
    fn open_mode_parses_r_and_w() {
        assert_eq!("r".parse::<OpenMode>().unwrap(), OpenMode::Read);
        assert_eq!("w".parse::<OpenMode>().unwrap(), OpenMode::Write);
        assert!("rw".parse::<OpenMode>().is_err());
        assert_eq!(OpenMode::Write.to_string(), "w");
    }

    #[test]
    fn annotations_survive_close_and_reopen() {
        let mut file = image(true);
        file.add_annotation("jdoe", Property::new("prop", "10"), None)
            .unwrap();
        file.add_annotation("jdoe", Property::new("prop", "10"), Some(box_location()))
            .unwrap();
        let container = persisted(file);
        assert_eq!(container.flushes(), 1);

        let reopened =
            QiDataFile::with_container(container.reopen(false), DataKind::Image, None).unwrap();
        assert_eq!(reopened.mode(), OpenMode::Read);
        let got = reopened.get_annotations("jdoe", Some("Property")).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[1].location, Some(box_location()));
        assert_eq!(reopened.saved_annotators(), vec!["jdoe".to_string()]);
    }

    #[test]
    fn closed_file_refuses_mutation_but_still_reads() {
        let mut file = image(true);
        file.add_annotation("jdoe", Property::new("prop", "10"), None)
            .unwrap();
        file.close().unwrap();
        assert!(file.is_closed());

        assert!(matches!(
            file.add_annotation("jdoe", Property::new("prop", "10"), None),
            Err(QidataError::ClosedFile(_))
        ));
        assert!(matches!(file.cancel_changes(), Err(QidataError::ClosedFile(_))));
        assert!(matches!(file.save(), Err(QidataError::ClosedFile(_))));
        assert_eq!(file.annotators(), vec!["jdoe".to_string()]);

        file.close().unwrap();
        assert_eq!(file.container.flushes(), 1);
    }

    #[test]
    fn closed_is_reported_before_read_only() {
        let mut file = image(false);
        file.close().unwrap();
        assert!(matches!(
            file.add_annotation("jdoe", Property::default(), None),
            Err(QidataError::ClosedFile(_))
        ));
    }

    #[test]
    fn read_only_file_refuses_changes_and_never_flushes() {
        let mut file = image(false);
        assert!(matches!(
            file.add_annotation("jdoe", Property::default(), None),
            Err(QidataError::ReadOnly)
        ));
        assert!(matches!(file.save(), Err(QidataError::ReadOnly)));
        assert!(matches!(file.cancel_changes(), Err(QidataError::ReadOnly)));
        assert_eq!(persisted(file).flushes(), 0);
    }

    #[test]
    fn cancel_changes_restores_last_save() {
        let mut file = image(true);
        let prop = MetadataObject::from(Property::new("prop", "10"));
        file.add_annotation("jdoe", prop.clone(), None).unwrap();
        file.save().unwrap();
        let saved = file.annotations();

        file.add_annotation("sambrose", Person::default(), None)
            .unwrap();
        file.remove_annotation("jdoe", &prop, None).unwrap();
        file.cancel_changes().unwrap();

        assert_eq!(file.annotations(), saved);
        assert!(!file.store().is_dirty());
    }

    #[test]
    fn incompatible_type_is_refused() {
        let mut file = image(true);
        let err = file
            .add_annotation("jdoe", Speech::default(), None)
            .unwrap_err();
        assert!(matches!(err, QidataError::InvalidType(_)));
        assert!(file.annotations().is_empty());
    }

    #[test]
    fn location_rule_follows_kind() {
        let mut file = image(true);
        assert!(matches!(
            file.add_annotation("jdoe", Property::default(), Some(Location::Int(1))),
            Err(QidataError::InvalidLocation(_))
        ));

        register_qidata_namespaces().unwrap();
        let mut audio =
            QiDataFile::with_container(MemContainer::new("a.wav", true), DataKind::Audio, None)
                .unwrap();
        audio
            .add_annotation("jdoe", Property::default(), Some(Location::from(vec![0.5, 2.0])))
            .unwrap();
        assert!(audio
            .add_annotation("jdoe", Property::default(), Some(box_location()))
            .is_err());
    }

    #[test]
    fn kind_refinement_is_persisted() {
        let mut file = image(true);
        file.set_kind(DataKind::Image2D).unwrap();
        assert!(matches!(
            file.set_kind(DataKind::Audio),
            Err(QidataError::InvalidType(_))
        ));
        let container = persisted(file);

        let reopened =
            QiDataFile::with_container(container.reopen(false), DataKind::Image, None).unwrap();
        assert_eq!(reopened.kind(), DataKind::Image2D);
    }

    #[test]
    fn stored_kind_from_another_family_is_ignored() {
        let mut file = image(true);
        file.set_kind(DataKind::Image3D).unwrap();
        let container = persisted(file);

        let audio =
            QiDataFile::with_container(container.reopen(false), DataKind::Audio, None).unwrap();
        assert_eq!(audio.kind(), DataKind::Audio);
    }

    #[test]
    fn raw_metadata_keeps_prefixes() {
        let mut file = image(true);
        assert!(file.raw_metadata().is_none());
        file.add_annotation("jdoe", Property::default(), None)
            .unwrap();
        file.save().unwrap();
        let tree = file.raw_metadata().unwrap();
        assert!(tree.contains_key("qidata:jdoe"));
    }
}
