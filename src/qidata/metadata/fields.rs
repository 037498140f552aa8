//! Reading typed fields out of a flat [`Fields`] mapping.

use super::{FieldValue, Fields, VERSION_FIELD};
use crate::error::{QidataError, Result};

pub(crate) fn as_int(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Int(v) => Some(*v),
        FieldValue::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_float(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Float(v) => Some(*v),
        FieldValue::Int(v) => Some(*v as f64),
        FieldValue::Str(s) => s.trim().parse().ok(),
        FieldValue::Bool(_) => None,
    }
}

fn as_string(value: &FieldValue) -> String {
    match value {
        FieldValue::Str(s) => s.clone(),
        other => other.to_text(),
    }
}

/// Consumes named fields for one object type and remembers which names were
/// asked for, so leftovers can be reported by [`FieldReader::finish`].
pub(crate) struct FieldReader<'a> {
    type_name: &'static str,
    fields: &'a Fields,
    known: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(type_name: &'static str, fields: &'a Fields) -> Self {
        Self {
            type_name,
            fields,
            known: vec![VERSION_FIELD],
        }
    }

    pub(crate) fn string(&mut self, name: &'static str) -> String {
        self.known.push(name);
        self.fields.get(name).map(as_string).unwrap_or_default()
    }

    pub(crate) fn int(&mut self, name: &'static str) -> Result<i64> {
        self.known.push(name);
        match self.fields.get(name) {
            None => Ok(0),
            Some(value) => as_int(value).ok_or_else(|| self.shape_error(name, "an integer", value)),
        }
    }

    pub(crate) fn float(&mut self, name: &'static str) -> Result<f64> {
        self.known.push(name);
        match self.fields.get(name) {
            None => Ok(0.0),
            Some(value) => as_float(value).ok_or_else(|| self.shape_error(name, "a number", value)),
        }
    }

    /// Fails if the mapping holds a field the type does not declare.
    pub(crate) fn finish(self) -> Result<()> {
        match self
            .fields
            .keys()
            .find(|k| !self.known.contains(&k.as_str()))
        {
            Some(unknown) => Err(QidataError::InvalidType(format!(
                "{} has no field named {}",
                self.type_name, unknown
            ))),
            None => Ok(()),
        }
    }

    pub(crate) fn invalid(&self, name: &str, reason: impl std::fmt::Display) -> QidataError {
        QidataError::InvalidType(format!("{}.{}: {}", self.type_name, name, reason))
    }

    fn shape_error(&self, name: &str, expected: &str, got: &FieldValue) -> QidataError {
        self.invalid(name, format!("expected {}, got {}", expected, got))
    }
}
