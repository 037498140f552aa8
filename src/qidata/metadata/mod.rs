//! # Metadata Objects
//!
//! Typed, versioned values that make up the content of an annotation.
//!
//! Every registered type is a variant of [`MetadataType`] and has a matching
//! variant of [`MetadataObject`] wrapping a struct of flat primitive fields.
//! The registry is static: a type name resolves to a variant through
//! [`MetadataType::from_str`], and [`make_metadata_object`] dispatches to the
//! variant's constructor.
//!
//! ## Dict round-trip
//!
//! Objects travel through the attribute container as flat field mappings
//! ([`Fields`]). [`MetadataObject::to_dict`] produces that mapping without the
//! `version` field; the container layer adds `version` on its own so that a
//! newer reader can recognize the schema it is looking at.
//!
//! Construction is lenient about representation: the container stores every
//! leaf as text, so `"10"` is accepted for an integer field and `"True"` for a
//! boolean one. It is strict about shape: unknown field names, or values that
//! cannot be read as the declared primitive, fail with
//! [`QidataError::InvalidType`].
//!
//! ## Compatibility
//!
//! Not every type makes sense for every kind of raw data (there is no speech
//! in a photograph). [`compatible_types`] returns, per [`DataKind`], the types
//! a file of that kind may carry. Hydration only looks for those keys.

use crate::error::{QidataError, Result};
use crate::kind::DataKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod countries;
mod fields;
mod objects;

pub use countries::Country;
pub use objects::{Context, Face, Object, Person, Property, Speech, TimeStamp, Transform};

use fields::FieldReader;

/// Flat mapping of field name to primitive value.
pub type Fields = IndexMap<String, FieldValue>;

/// Name of the field carrying the schema version in serialized records.
pub const VERSION_FIELD: &str = "version";

/// A primitive field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl FieldValue {
    /// Text form used by the attribute container.
    ///
    /// Floats always keep a fractional part or exponent so they are not read
    /// back as integers.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Bool(v) => v.to_string(),
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Float(v) => format!("{:?}", v),
            FieldValue::Str(v) => v.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(v) => write!(f, "\"{}\"", v),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Registered metadata object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataType {
    Context,
    Face,
    Object,
    Person,
    Property,
    Speech,
    TimeStamp,
    Transform,
}

impl MetadataType {
    pub const ALL: [MetadataType; 8] = [
        MetadataType::Context,
        MetadataType::Face,
        MetadataType::Object,
        MetadataType::Person,
        MetadataType::Property,
        MetadataType::Speech,
        MetadataType::TimeStamp,
        MetadataType::Transform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetadataType::Context => "Context",
            MetadataType::Face => "Face",
            MetadataType::Object => "Object",
            MetadataType::Person => "Person",
            MetadataType::Property => "Property",
            MetadataType::Speech => "Speech",
            MetadataType::TimeStamp => "TimeStamp",
            MetadataType::Transform => "Transform",
        }
    }

    /// Schema version written next to every serialized object of this type.
    pub fn version(self) -> u32 {
        match self {
            MetadataType::Face => 1,
            _ => 0,
        }
    }

    /// Types describing a physical entity in the data.
    ///
    /// The first annotation layout stored these at the top level of the
    /// namespace, which is how version detection recognizes it.
    pub fn is_data_object(self) -> bool {
        matches!(
            self,
            MetadataType::Face | MetadataType::Object | MetadataType::Person
        )
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetadataType {
    type Err = QidataError;

    fn from_str(s: &str) -> Result<Self> {
        MetadataType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| QidataError::UnknownType(s.to_string()))
    }
}

/// Types a file of the given kind may carry, in registry order.
pub fn compatible_types(kind: DataKind) -> &'static [MetadataType] {
    const IMAGE: &[MetadataType] = &[
        MetadataType::Context,
        MetadataType::Face,
        MetadataType::Object,
        MetadataType::Person,
        MetadataType::Property,
        MetadataType::TimeStamp,
        MetadataType::Transform,
    ];
    const AUDIO: &[MetadataType] = &[
        MetadataType::Context,
        MetadataType::Person,
        MetadataType::Property,
        MetadataType::Speech,
        MetadataType::TimeStamp,
        MetadataType::Transform,
    ];
    match kind {
        DataKind::Image | DataKind::Image2D | DataKind::Image3D => IMAGE,
        DataKind::Audio => AUDIO,
    }
}

/// A typed annotation value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataObject {
    Context(Context),
    Face(Face),
    Object(Object),
    Person(Person),
    Property(Property),
    Speech(Speech),
    TimeStamp(TimeStamp),
    Transform(Transform),
}

impl MetadataObject {
    pub fn metadata_type(&self) -> MetadataType {
        match self {
            MetadataObject::Context(_) => MetadataType::Context,
            MetadataObject::Face(_) => MetadataType::Face,
            MetadataObject::Object(_) => MetadataType::Object,
            MetadataObject::Person(_) => MetadataType::Person,
            MetadataObject::Property(_) => MetadataType::Property,
            MetadataObject::Speech(_) => MetadataType::Speech,
            MetadataObject::TimeStamp(_) => MetadataType::TimeStamp,
            MetadataObject::Transform(_) => MetadataType::Transform,
        }
    }

    pub fn version(&self) -> u32 {
        self.metadata_type().version()
    }

    /// Apply the rules enforced when the object is read back from its fields
    /// (non-negative ages, nanoseconds below one second, RFC 3339 dates).
    pub fn validate(&self) -> Result<()> {
        make_metadata_object(self.metadata_type().name(), &self.to_dict()).map(|_| ())
    }

    /// Flat field mapping, without the version field.
    pub fn to_dict(&self) -> Fields {
        match self {
            MetadataObject::Context(o) => o.to_dict(),
            MetadataObject::Face(o) => o.to_dict(),
            MetadataObject::Object(o) => o.to_dict(),
            MetadataObject::Person(o) => o.to_dict(),
            MetadataObject::Property(o) => o.to_dict(),
            MetadataObject::Speech(o) => o.to_dict(),
            MetadataObject::TimeStamp(o) => o.to_dict(),
            MetadataObject::Transform(o) => o.to_dict(),
        }
    }
}

impl fmt::Display for MetadataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.metadata_type())?;
        for (i, (name, value)) in self.to_dict().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str(")")
    }
}

macro_rules! impl_from_object {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for MetadataObject {
                fn from(value: $variant) -> Self {
                    MetadataObject::$variant(value)
                }
            }
        )*
    };
}

impl_from_object!(Context, Face, Object, Person, Property, Speech, TimeStamp, Transform);

/// Build an object of the named type from a flat field mapping.
///
/// A `version` entry is accepted and checked against the type's schema
/// version; it is not part of the resulting object.
pub fn make_metadata_object(type_name: &str, fields: &Fields) -> Result<MetadataObject> {
    let metadata_type = MetadataType::from_str(type_name)?;
    check_version(metadata_type, fields)?;

    let mut reader = FieldReader::new(metadata_type.name(), fields);
    let object = match metadata_type {
        MetadataType::Context => Context::read(&mut reader)?.into(),
        MetadataType::Face => Face::read(&mut reader)?.into(),
        MetadataType::Object => Object::read(&mut reader)?.into(),
        MetadataType::Person => Person::read(&mut reader)?.into(),
        MetadataType::Property => Property::read(&mut reader)?.into(),
        MetadataType::Speech => Speech::read(&mut reader)?.into(),
        MetadataType::TimeStamp => TimeStamp::read(&mut reader)?.into(),
        MetadataType::Transform => Transform::read(&mut reader)?.into(),
    };
    reader.finish()?;
    Ok(object)
}

fn check_version(metadata_type: MetadataType, fields: &Fields) -> Result<()> {
    let Some(value) = fields.get(VERSION_FIELD) else {
        return Ok(());
    };
    let found = fields::as_int(value).ok_or_else(|| {
        QidataError::InvalidType(format!(
            "{}.{} must be an integer, got {}",
            metadata_type, VERSION_FIELD, value
        ))
    })?;
    if found > i64::from(metadata_type.version()) {
        return Err(QidataError::UnsupportedVersion {
            type_name: metadata_type.name().to_string(),
            found,
            supported: metadata_type.version(),
        });
    }
    Ok(())
}

/// One valid object of the given type.
#[cfg(test)]
pub(crate) fn sample(metadata_type: MetadataType) -> MetadataObject {
    match metadata_type {
        MetadataType::Context => Context {
            recorder_name: "jdoe".into(),
            recording_device: "pepper".into(),
            recording_datetime: "2017-06-12T10:00:00+02:00".into(),
            recording_location: "EUROPE__FRANCE".parse().unwrap(),
        }
        .into(),
        MetadataType::Face => Face {
            name: "jdoe".into(),
            age: 42,
            gender: "female".into(),
            expression: "happy".into(),
        }
        .into(),
        MetadataType::Object => Object {
            type_: "cup".into(),
            id: 3,
        }
        .into(),
        MetadataType::Person => Person {
            name: "jdoe".into(),
            id: 7,
        }
        .into(),
        MetadataType::Property => Property::new("key", "value").into(),
        MetadataType::Speech => Speech {
            name: "jdoe".into(),
            sentence: "hello".into(),
            language: "en".into(),
        }
        .into(),
        MetadataType::TimeStamp => TimeStamp {
            seconds: 1_500_000_000,
            nanoseconds: 250,
        }
        .into(),
        MetadataType::Transform => Transform {
            tx: 1.0,
            ty: -2.5,
            tz: 0.0,
            rx: 0.0,
            ry: 0.0,
            rz: 0.0,
            rw: 1.0,
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn type_names_round_trip() {
        for t in MetadataType::ALL {
            assert_eq!(t.name().parse::<MetadataType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        assert!(matches!(
            "Unicorn".parse::<MetadataType>(),
            Err(QidataError::UnknownType(name)) if name == "Unicorn"
        ));
        assert!(matches!(
            make_metadata_object("Unicorn", &Fields::new()),
            Err(QidataError::UnknownType(_))
        ));
    }

    #[test]
    fn dict_round_trip_for_every_type() {
        for t in MetadataType::ALL {
            let object = sample(t);
            assert_eq!(object.metadata_type(), t);
            let rebuilt = make_metadata_object(t.name(), &object.to_dict()).unwrap();
            assert_eq!(rebuilt, object);
        }
    }

    #[test]
    fn validate_applies_reader_rules() {
        for t in MetadataType::ALL {
            sample(t).validate().unwrap();
        }

        let invalid: [MetadataObject; 3] = [
            Face {
                age: -1,
                ..Default::default()
            }
            .into(),
            TimeStamp {
                seconds: 0,
                nanoseconds: 1_000_000_000,
            }
            .into(),
            Context {
                recording_datetime: "yesterday".into(),
                ..Default::default()
            }
            .into(),
        ];
        for object in invalid {
            assert!(matches!(object.validate(), Err(QidataError::InvalidType(_))));
        }
    }

    #[test]
    fn to_dict_excludes_version() {
        for t in MetadataType::ALL {
            assert!(!sample(t).to_dict().contains_key(VERSION_FIELD));
        }
    }

    #[test]
    fn text_encoded_fields_are_coerced() {
        let object = make_metadata_object(
            "Person",
            &fields(&[
                ("name", "jdoe".into()),
                ("id", "12".into()),
                ("version", "0".into()),
            ]),
        )
        .unwrap();
        assert_eq!(
            object,
            MetadataObject::Person(Person {
                name: "jdoe".into(),
                id: 12
            })
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let object = make_metadata_object("Property", &Fields::new()).unwrap();
        assert_eq!(object, Property::new("", "").into());
    }

    #[test]
    fn wrong_shaped_field_is_a_type_error() {
        let err = make_metadata_object("Person", &fields(&[("id", "twelve".into())])).unwrap_err();
        assert!(matches!(err, QidataError::InvalidType(_)));
    }

    #[test]
    fn unknown_field_is_a_type_error() {
        let err =
            make_metadata_object("Property", &fields(&[("colour", "red".into())])).unwrap_err();
        assert!(matches!(err, QidataError::InvalidType(_)));
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = make_metadata_object("Face", &fields(&[("version", FieldValue::Int(2))])).unwrap_err();
        assert!(matches!(
            err,
            QidataError::UnsupportedVersion {
                found: 2,
                supported: 1,
                ..
            }
        ));
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(
            MetadataObject::from(Property::new("a", "b")),
            MetadataObject::from(Property::new("a", "b"))
        );
        assert_ne!(
            MetadataObject::from(Property::new("a", "b")),
            MetadataObject::from(Property::new("a", "c"))
        );
    }

    #[test]
    fn compatibility_depends_on_kind() {
        assert!(compatible_types(DataKind::Image).contains(&MetadataType::Face));
        assert!(!compatible_types(DataKind::Image).contains(&MetadataType::Speech));
        assert!(compatible_types(DataKind::Audio).contains(&MetadataType::Speech));
        assert!(!compatible_types(DataKind::Audio).contains(&MetadataType::Face));
        assert_eq!(
            compatible_types(DataKind::Image2D),
            compatible_types(DataKind::Image)
        );
    }

    #[test]
    fn float_text_keeps_fraction() {
        assert_eq!(FieldValue::Float(1.0).to_text(), "1.0");
        assert_eq!(FieldValue::Int(1).to_text(), "1");
    }

    #[test]
    fn display_lists_fields() {
        let object: MetadataObject = Property::new("prop", "10").into();
        assert_eq!(
            object.to_string(),
            "Property(key=\"prop\", value=\"10\")"
        );
    }
}
