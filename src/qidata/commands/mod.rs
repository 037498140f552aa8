//! # Commands
//!
//! One module per CLI operation. Each `run` function does the work against the
//! library and returns a [`CmdResult`]: structured data plus user-facing
//! messages. Commands never print.

use crate::config::QidataConfig;
use crate::error::{QidataError, Result};
use crate::kind::DataKind;
use crate::location::Location;
use crate::metadata::{FieldValue, Fields};
use crate::store::AnnotationStore;
use crate::version::AnnotationVersion;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod detect;
pub mod remove;
pub mod show;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Snapshot of an annotated file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: DataKind,
    pub store: AnnotationStore,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub report: Option<FileReport>,
    pub versions: Vec<(PathBuf, Option<AnnotationVersion>)>,
    pub config: Option<QidataConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_report(mut self, report: FileReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_versions(mut self, versions: Vec<(PathBuf, Option<AnnotationVersion>)>) -> Self {
        self.versions = versions;
        self
    }

    pub fn with_config(mut self, config: QidataConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// What to add or remove: an object described on the command line.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRequest {
    pub type_name: String,
    pub annotator: Option<String>,
    /// `key=value` pairs
    pub fields: Vec<String>,
    /// JSON text, e.g. `[[0, 0], [10, 80]]`
    pub location: Option<String>,
}

impl AnnotationRequest {
    pub(crate) fn fields(&self) -> Result<Fields> {
        self.fields
            .iter()
            .map(|pair| {
                pair.split_once('=')
                    .map(|(key, value)| (key.trim().to_string(), FieldValue::from(value)))
                    .ok_or_else(|| {
                        QidataError::Api(format!("Field {} must look like key=value", pair))
                    })
            })
            .collect()
    }

    pub(crate) fn location(&self) -> Result<Option<Location>> {
        self.location
            .as_deref()
            .map(|text| {
                serde_json::from_str(text).map_err(|e| {
                    QidataError::Api(format!("Location {} is not valid JSON: {}", text, e))
                })
            })
            .transpose()
    }

    /// The annotator given, else the configured default.
    pub(crate) fn annotator(&self, config: &QidataConfig) -> Result<String> {
        self.annotator
            .clone()
            .or_else(|| config.annotator().map(str::to_string))
            .ok_or_else(|| {
                QidataError::Api(
                    "No annotator given (use --annotator or `qidata config annotator <name>`)"
                        .to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigKey;

    fn request() -> AnnotationRequest {
        AnnotationRequest {
            type_name: "Property".into(),
            annotator: None,
            fields: vec!["key=prop".into(), "value=a=b".into()],
            location: Some("[[0, 0], [10, 80.5]]".into()),
        }
    }

    #[test]
    fn fields_split_on_first_equal_sign() {
        let fields = request().fields().unwrap();
        assert_eq!(fields["key"], FieldValue::from("prop"));
        assert_eq!(fields["value"], FieldValue::from("a=b"));
    }

    #[test]
    fn field_without_value_is_refused() {
        let mut request = request();
        request.fields = vec!["key".into()];
        assert!(matches!(request.fields(), Err(QidataError::Api(_))));
    }

    #[test]
    fn location_is_parsed_from_json() {
        let location = request().location().unwrap().unwrap();
        assert_eq!(
            location,
            Location::List(vec![
                Location::from(vec![0_i64, 0]),
                Location::List(vec![Location::Int(10), Location::Float(80.5)]),
            ])
        );

        let mut request = request();
        request.location = Some("[0,".into());
        assert!(request.location().is_err());
        request.location = None;
        assert_eq!(request.location().unwrap(), None);
    }

    #[test]
    fn annotator_falls_back_to_config() {
        let mut config = QidataConfig::default();
        assert!(request().annotator(&config).is_err());
        config.set(ConfigKey::Annotator, "jdoe").unwrap();
        assert_eq!(request().annotator(&config).unwrap(), "jdoe");

        let mut explicit = request();
        explicit.annotator = Some("sam".into());
        assert_eq!(explicit.annotator(&config).unwrap(), "sam");
    }
}
