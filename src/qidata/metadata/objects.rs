use super::fields::FieldReader;
use super::{Country, FieldValue, Fields};
use crate::error::Result;
use chrono::DateTime;

fn dict<const N: usize>(pairs: [(&str, FieldValue); N]) -> Fields {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Free-form key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            key: reader.string("key"),
            value: reader.string("value"),
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("key", self.key.as_str().into()),
            ("value", self.value.as_str().into()),
        ])
    }
}

/// A person appearing in the data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    pub name: String,
    pub id: i64,
}

impl Person {
    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            name: reader.string("name"),
            id: reader.int("id")?,
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("name", self.name.as_str().into()),
            ("id", self.id.into()),
        ])
    }
}

/// A face appearing in an image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Face {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub expression: String,
}

impl Face {
    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        let name = reader.string("name");
        let age = reader.int("age")?;
        if age < 0 {
            return Err(reader.invalid("age", "must not be negative"));
        }
        Ok(Self {
            name,
            age,
            gender: reader.string("gender"),
            expression: reader.string("expression"),
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("name", self.name.as_str().into()),
            ("age", self.age.into()),
            ("gender", self.gender.as_str().into()),
            ("expression", self.expression.as_str().into()),
        ])
    }
}

/// A physical object appearing in the data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object {
    /// Serialized as `type`.
    pub type_: String,
    pub id: i64,
}

impl Object {
    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            type_: reader.string("type"),
            id: reader.int("id")?,
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("type", self.type_.as_str().into()),
            ("id", self.id.into()),
        ])
    }
}

/// A sentence pronounced in an audio recording.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Speech {
    pub name: String,
    pub sentence: String,
    pub language: String,
}

impl Speech {
    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            name: reader.string("name"),
            sentence: reader.string("sentence"),
            language: reader.string("language"),
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("name", self.name.as_str().into()),
            ("sentence", self.sentence.as_str().into()),
            ("language", self.language.as_str().into()),
        ])
    }
}

/// Recording conditions of the data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub recorder_name: String,
    pub recording_device: String,
    /// RFC 3339 timestamp, or empty when unknown.
    pub recording_datetime: String,
    pub recording_location: Country,
}

impl Context {
    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        let recorder_name = reader.string("recorder_name");
        let recording_device = reader.string("recording_device");

        let recording_datetime = reader.string("recording_datetime");
        if !recording_datetime.is_empty() {
            DateTime::parse_from_rfc3339(&recording_datetime)
                .map_err(|e| reader.invalid("recording_datetime", e))?;
        }

        let location = reader.string("recording_location");
        let recording_location = if location.is_empty() {
            Country::default()
        } else {
            location
                .parse()
                .map_err(|_| reader.invalid("recording_location", "unknown country code"))?
        };

        Ok(Self {
            recorder_name,
            recording_device,
            recording_datetime,
            recording_location,
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("recorder_name", self.recorder_name.as_str().into()),
            ("recording_device", self.recording_device.as_str().into()),
            ("recording_datetime", self.recording_datetime.as_str().into()),
            ("recording_location", self.recording_location.code().into()),
        ])
    }
}

/// Acquisition time of the data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeStamp {
    pub seconds: i64,
    pub nanoseconds: i64,
}

impl TimeStamp {
    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        let seconds = reader.int("seconds")?;
        let nanoseconds = reader.int("nanoseconds")?;
        if !(0..1_000_000_000).contains(&nanoseconds) {
            return Err(reader.invalid("nanoseconds", "must be in 0..1000000000"));
        }
        Ok(Self {
            seconds,
            nanoseconds,
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("seconds", self.seconds.into()),
            ("nanoseconds", self.nanoseconds.into()),
        ])
    }
}

/// Sensor pose: translation plus rotation quaternion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub rw: f64,
}

impl Transform {
    pub(super) fn read(reader: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            tx: reader.float("tx")?,
            ty: reader.float("ty")?,
            tz: reader.float("tz")?,
            rx: reader.float("rx")?,
            ry: reader.float("ry")?,
            rz: reader.float("rz")?,
            rw: reader.float("rw")?,
        })
    }

    pub fn to_dict(&self) -> Fields {
        dict([
            ("tx", self.tx.into()),
            ("ty", self.ty.into()),
            ("tz", self.tz.into()),
            ("rx", self.rx.into()),
            ("ry", self.ry.into()),
            ("rz", self.rz.into()),
            ("rw", self.rw.into()),
        ])
    }
}
