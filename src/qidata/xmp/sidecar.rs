use super::registry::namespace_prefix;
use super::{AttributeContainer, XmpTree};
use crate::error::{QidataError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_SIDECAR_EXT: &str = ".xmp.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct NamespaceEntry {
    uri: String,
    prefix: String,
    #[serde(default)]
    children: XmpTree,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SidecarDocument {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<String, String>,
    #[serde(default)]
    namespaces: Vec<NamespaceEntry>,
}

/// Attribute container stored in a sidecar document next to the data file.
///
/// The data file itself is never modified. A writable container rewrites the
/// sidecar on every [`flush`](AttributeContainer::flush); a read-only one
/// never touches the disk.
#[derive(Debug)]
pub struct XmpFile {
    path: PathBuf,
    sidecar: PathBuf,
    writable: bool,
    document: SidecarDocument,
}

/// Sidecar location for `path`: the extension is appended to the full name.
pub fn sidecar_path(path: &Path, sidecar_ext: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(sidecar_ext);
    PathBuf::from(name)
}

/// Replace `target` with `content` through a tmp file in the same directory.
pub(crate) fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let tmp = dir.join(format!(".qidata-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp, content).map_err(QidataError::Io)?;
    fs::rename(&tmp, target).map_err(QidataError::Io)?;
    Ok(())
}

impl XmpFile {
    /// Open the container of `path`, reading its sidecar if there is one.
    ///
    /// Fails if the data file does not exist or the sidecar cannot be parsed.
    pub fn open(path: &Path, writable: bool) -> Result<Self> {
        Self::open_with_ext(path, writable, DEFAULT_SIDECAR_EXT)
    }

    pub fn open_with_ext(path: &Path, writable: bool, sidecar_ext: &str) -> Result<Self> {
        if !path.is_file() {
            return Err(QidataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let sidecar = sidecar_path(path, sidecar_ext);
        let document = if sidecar.exists() {
            let content = fs::read_to_string(&sidecar).map_err(QidataError::Io)?;
            serde_json::from_str(&content).map_err(|e| {
                QidataError::Container(format!("{}: {}", sidecar.display(), e))
            })?
        } else {
            SidecarDocument::default()
        };

        debug!(
            path = %path.display(),
            sidecar = %sidecar.display(),
            writable,
            namespaces = document.namespaces.len(),
            "opened attribute container"
        );

        Ok(Self {
            path: path.to_path_buf(),
            sidecar,
            writable,
            document,
        })
    }

    pub fn sidecar(&self) -> &Path {
        &self.sidecar
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.writable {
            Ok(())
        } else {
            Err(QidataError::ReadOnly)
        }
    }
}

impl AttributeContainer for XmpFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn namespaces(&self) -> Vec<&str> {
        self.document
            .namespaces
            .iter()
            .map(|ns| ns.uri.as_str())
            .collect()
    }

    fn namespace(&self, uri: &str) -> Option<&XmpTree> {
        self.document
            .namespaces
            .iter()
            .find(|ns| ns.uri == uri)
            .map(|ns| &ns.children)
    }

    fn set_namespace(&mut self, uri: &str, children: XmpTree) -> Result<()> {
        self.ensure_writable()?;
        let prefix = namespace_prefix(uri)
            .ok_or_else(|| QidataError::Container(format!("namespace {} is not registered", uri)))?;

        match self.document.namespaces.iter_mut().find(|ns| ns.uri == uri) {
            Some(entry) => {
                entry.prefix = prefix;
                entry.children = children;
            }
            None => self.document.namespaces.push(NamespaceEntry {
                uri: uri.to_string(),
                prefix,
                children,
            }),
        }
        Ok(())
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.document.properties.get(name).map(String::as_str)
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        self.ensure_writable()?;
        self.document
            .properties
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.writable {
            return Ok(());
        }
        let content =
            serde_json::to_string_pretty(&self.document).map_err(QidataError::Serialization)?;
        write_atomic(&self.sidecar, &content)?;

        info!(sidecar = %self.sidecar.display(), "wrote attribute container");
        Ok(())
    }
}
