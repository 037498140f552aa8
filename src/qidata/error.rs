use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QidataError {
    #[error("This method cannot be used in read-only mode")]
    ReadOnly,

    #[error("File is closed: {0}")]
    ClosedFile(PathBuf),

    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Location {0} is invalid")]
    InvalidLocation(String),

    #[error("Annotator {0} is unknown")]
    UnknownAnnotator(String),

    #[error("Could not remove annotation {object} for {annotator} at location {location}")]
    NoMatch {
        annotator: String,
        object: String,
        location: String,
    },

    #[error("{0} is not a valid MetadataType")]
    UnknownType(String),

    #[error("{type_name} version {found} is not supported (max {supported})")]
    UnsupportedVersion {
        type_name: String,
        found: i64,
        supported: u32,
    },

    #[error("Unsupported file: {0}")]
    UnsupportedFile(PathBuf),

    #[error("Namespace {uri} is already registered with prefix {existing}")]
    NamespaceConflict { uri: String, existing: String },

    #[error("Container error: {0}")]
    Container(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QidataError>;
