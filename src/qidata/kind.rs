//! Classification of raw data files.
//!
//! The kind of a file decides which metadata types it may carry
//! ([`compatible_types`](crate::metadata::compatible_types)) and which
//! locations are valid for its annotations.

use crate::error::{QidataError, Result};
use crate::location::{self, LocationCheck};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Image,
    Image2D,
    Image3D,
    Audio,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff"];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3", "flac"];

impl DataKind {
    pub const ALL: [DataKind; 4] = [
        DataKind::Image,
        DataKind::Image2D,
        DataKind::Image3D,
        DataKind::Audio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DataKind::Image => "IMAGE",
            DataKind::Image2D => "IMAGE_2D",
            DataKind::Image3D => "IMAGE_3D",
            DataKind::Audio => "AUDIO",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, DataKind::Image | DataKind::Image2D | DataKind::Image3D)
    }

    /// Whether a file of kind `self` may be re-labelled as `other`.
    ///
    /// Kinds can only be refined within the same family; an image never
    /// becomes audio.
    pub fn can_become(self, other: DataKind) -> bool {
        self.is_image() == other.is_image()
    }

    /// Validity rule applied to annotation locations on files of this kind.
    pub fn location_check(self) -> LocationCheck {
        if self.is_image() {
            location::is_valid_image_location
        } else {
            location::is_valid_audio_location
        }
    }

    /// Whether raw bytes are exposed for files of this kind.
    pub fn has_raw_data(self) -> bool {
        self.is_image()
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataKind {
    type Err = QidataError;

    fn from_str(s: &str) -> Result<Self> {
        DataKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| QidataError::InvalidType(format!("{} is not a valid DataType", s)))
    }
}

/// Classify a file by its extension.
pub fn file_data_type(path: &Path) -> Result<DataKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| QidataError::UnsupportedFile(path.to_path_buf()))?;

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(DataKind::Image)
    } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        Ok(DataKind::Audio)
    } else {
        Err(QidataError::UnsupportedFile(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(
            file_data_type(Path::new("photo.JPG")).unwrap(),
            DataKind::Image
        );
        assert_eq!(
            file_data_type(Path::new("dir/sound.wav")).unwrap(),
            DataKind::Audio
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        assert!(matches!(
            file_data_type(Path::new("notes.txt")),
            Err(QidataError::UnsupportedFile(_))
        ));
        assert!(matches!(
            file_data_type(Path::new("no_extension")),
            Err(QidataError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn names_round_trip() {
        for kind in DataKind::ALL {
            assert_eq!(kind.name().parse::<DataKind>().unwrap(), kind);
        }
        assert!("VIDEO".parse::<DataKind>().is_err());
    }

    #[test]
    fn refinement_stays_in_family() {
        assert!(DataKind::Image.can_become(DataKind::Image2D));
        assert!(DataKind::Image3D.can_become(DataKind::Image));
        assert!(!DataKind::Image.can_become(DataKind::Audio));
        assert!(!DataKind::Audio.can_become(DataKind::Image2D));
    }
}
