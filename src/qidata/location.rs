//! Annotation locations.
//!
//! A [`Location`] says where in the raw data an annotation applies. Its shape
//! is not fixed: a bounding box for an image, a time interval for a sound.
//! Which shapes are acceptable is decided by a [`LocationCheck`] supplied by
//! the data kind. An absent location is always valid.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Location>),
}

/// Predicate deciding whether a location is acceptable.
pub type LocationCheck = fn(&Location) -> bool;

impl Location {
    /// Read back a leaf the attribute container stored as text.
    ///
    /// Integers are tried first, then floats; anything else stays text.
    pub fn from_text(text: &str) -> Location {
        let trimmed = text.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            Location::Int(v)
        } else if let Ok(v) = trimmed.parse::<f64>() {
            Location::Float(v)
        } else {
            Location::Text(text.to_string())
        }
    }

    /// Text form of a leaf. `None` for lists.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Location::Int(v) => Some(v.to_string()),
            Location::Float(v) => Some(format!("{:?}", v)),
            Location::Text(v) => Some(v.clone()),
            Location::List(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Location::Int(v) => Some(*v as f64),
            Location::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn as_pair(&self) -> Option<(&Location, &Location)> {
        match self {
            Location::List(items) if items.len() == 2 => Some((&items[0], &items[1])),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Text(v) => write!(f, "'{}'", v),
            Location::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            leaf => f.write_str(&leaf.to_text().unwrap_or_default()),
        }
    }
}

impl From<i64> for Location {
    fn from(value: i64) -> Self {
        Location::Int(value)
    }
}

impl From<f64> for Location {
    fn from(value: f64) -> Self {
        Location::Float(value)
    }
}

impl<T: Into<Location>> From<Vec<T>> for Location {
    fn from(items: Vec<T>) -> Self {
        Location::List(items.into_iter().map(Into::into).collect())
    }
}

/// Display helper for optional locations, rendering `None` like the absent value.
pub fn describe(location: Option<&Location>) -> String {
    location.map_or_else(|| "None".to_string(), ToString::to_string)
}

pub fn accept_any(_: &Location) -> bool {
    true
}

fn is_number_pair(location: &Location) -> bool {
    location
        .as_pair()
        .is_some_and(|(a, b)| a.as_number().is_some() && b.as_number().is_some())
}

/// Images take two corners: `[[x0, y0], [x1, y1]]`.
pub fn is_valid_image_location(location: &Location) -> bool {
    location
        .as_pair()
        .is_some_and(|(a, b)| is_number_pair(a) && is_number_pair(b))
}

/// Sounds take a time interval: `[start, end]`.
pub fn is_valid_audio_location(location: &Location) -> bool {
    is_number_pair(location)
}
