use super::registry::namespace_prefix;
use super::{AttributeContainer, XmpTree};
use crate::error::{QidataError, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// In-memory attribute container for testing.
///
/// Clone it after a flush to reopen the "persisted" state in a new adapter.
#[derive(Debug, Clone, Default)]
pub struct MemContainer {
    path: PathBuf,
    writable: bool,
    namespaces: IndexMap<String, XmpTree>,
    properties: IndexMap<String, String>,
    flushes: usize,
}

impl MemContainer {
    pub fn new(path: impl Into<PathBuf>, writable: bool) -> Self {
        Self {
            path: path.into(),
            writable,
            ..Default::default()
        }
    }

    /// Same content, reopened with another access mode.
    pub fn reopen(&self, writable: bool) -> Self {
        Self {
            writable,
            flushes: 0,
            ..self.clone()
        }
    }

    /// Seed a namespace regardless of access mode or registration.
    pub fn with_namespace(mut self, uri: &str, children: XmpTree) -> Self {
        self.namespaces.insert(uri.to_string(), children);
        self
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl AttributeContainer for MemContainer {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn namespaces(&self) -> Vec<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    fn namespace(&self, uri: &str) -> Option<&XmpTree> {
        self.namespaces.get(uri)
    }

    fn set_namespace(&mut self, uri: &str, children: XmpTree) -> Result<()> {
        if !self.writable {
            return Err(QidataError::ReadOnly);
        }
        if namespace_prefix(uri).is_none() {
            return Err(QidataError::Container(format!(
                "namespace {} is not registered",
                uri
            )));
        }
        self.namespaces.insert(uri.to_string(), children);
        Ok(())
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.writable {
            return Err(QidataError::ReadOnly);
        }
        self.properties.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.writable {
            self.flushes += 1;
        }
        Ok(())
    }
}
