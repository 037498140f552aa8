//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point used by the CLI.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Carries context**: the loaded [`QidataConfig`] and where it lives
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic; that belongs in
//! `commands/*.rs`.

use crate::commands;
use crate::config::QidataConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{AnnotationRequest, CmdMessage, CmdResult, FileReport, MessageLevel};

pub struct QidataApi {
    config: QidataConfig,
    config_dir: PathBuf,
}

impl QidataApi {
    /// Build the API from the configuration stored in `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let config = QidataConfig::load(&config_dir)?;
        Ok(Self { config, config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn show(&self, path: &Path) -> Result<CmdResult> {
        commands::show::run(path, &self.config)
    }

    pub fn detect(&self, paths: &[PathBuf]) -> Result<CmdResult> {
        commands::detect::run(paths, &self.config)
    }

    pub fn add_annotation(&self, path: &Path, request: &AnnotationRequest) -> Result<CmdResult> {
        commands::add::run(path, &self.config, request)
    }

    pub fn remove_annotation(&self, path: &Path, request: &AnnotationRequest) -> Result<CmdResult> {
        commands::remove::run(path, &self.config, request)
    }

    /// Read or change the stored configuration. A change is picked up by the
    /// next `QidataApi` built from the same directory.
    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}
