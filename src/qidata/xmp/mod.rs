//! # Attribute Container
//!
//! Annotations are persisted in an XMP-style attribute container: a set of
//! namespaces, each holding an ordered tree of named values. Property names
//! are qualified with the namespace prefix (`qidata:jdoe`), and every leaf is
//! text, whatever it meant when it was written.
//!
//! ## Design
//!
//! The [`AttributeContainer`] trait is the seam between the file adapter and
//! the persistence format:
//!
//! - [`XmpFile`]: production container, a sidecar document next to the data
//!   file, written on [`flush`](AttributeContainer::flush).
//! - [`MemContainer`]: in-memory container for exercising the file adapter
//!   without touching the filesystem.
//!
//! Namespaces must be registered with a prefix before a container writes them
//! (see [`registry`]).
//!
//! ## Sidecar Layout
//!
//! ```text
//! photo.jpg
//! photo.jpg.xmp.json   # { "properties": {...}, "namespaces": [ { uri, prefix, children } ] }
//! ```

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod memory;
pub mod registry;
pub mod sidecar;

pub use memory::MemContainer;
pub use registry::{register_namespace, LEGACY_QIDATA_NS, QIDATA_NS};
pub use sidecar::XmpFile;

/// A node of a namespace's value tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XmpValue {
    Text(String),
    Array(Vec<XmpValue>),
    Struct(XmpTree),
}

/// Ordered children of a namespace or structure, by qualified name.
pub type XmpTree = IndexMap<String, XmpValue>;

impl XmpValue {
    pub fn as_struct(&self) -> Option<&XmpTree> {
        match self {
            XmpValue::Struct(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[XmpValue]> {
        match self {
            XmpValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmpValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Copy of this node with namespace prefixes stripped from every
    /// structure key, at any depth.
    pub fn without_prefixes(&self) -> XmpValue {
        match self {
            XmpValue::Text(text) => XmpValue::Text(text.clone()),
            XmpValue::Array(items) => {
                XmpValue::Array(items.iter().map(XmpValue::without_prefixes).collect())
            }
            XmpValue::Struct(tree) => XmpValue::Struct(strip_prefixes(tree)),
        }
    }
}

/// Local part of a qualified name: `qidata:jdoe` gives `jdoe`.
///
/// Only the leading prefix is removed, so `qidata:team:jdoe` gives `team:jdoe`.
pub fn local_name(key: &str) -> &str {
    key.split_once(':').map_or(key, |(_, local)| local)
}

/// Qualify `name` with `prefix`.
pub fn qualified(prefix: &str, name: &str) -> String {
    format!("{}:{}", prefix, name)
}

/// Copy of `tree` with namespace prefixes stripped from every key, at any depth.
pub fn strip_prefixes(tree: &XmpTree) -> XmpTree {
    tree.iter()
        .map(|(key, value)| (local_name(key).to_string(), value.without_prefixes()))
        .collect()
}

/// Storage for namespaced attribute trees attached to one data file.
pub trait AttributeContainer {
    /// Path of the data file the attributes describe.
    fn path(&self) -> &Path;

    fn is_writable(&self) -> bool;

    /// URIs of the namespaces present, in document order.
    fn namespaces(&self) -> Vec<&str>;

    /// Children of a namespace, `None` if the namespace is absent.
    fn namespace(&self, uri: &str) -> Option<&XmpTree>;

    /// Replace every child of a namespace, creating it if needed.
    fn set_namespace(&mut self, uri: &str, children: XmpTree) -> Result<()>;

    /// File-level property outside any namespace.
    fn property(&self, name: &str) -> Option<&str>;

    fn set_property(&mut self, name: &str, value: &str) -> Result<()>;

    /// Persist pending changes. A no-op for read-only containers.
    fn flush(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> XmpValue {
        XmpValue::Text(s.to_string())
    }

    #[test]
    fn local_name_drops_only_the_leading_prefix() {
        assert_eq!(local_name("qidata:jdoe"), "jdoe");
        assert_eq!(local_name("qidata:team:jdoe"), "team:jdoe");
        assert_eq!(local_name("plain"), "plain");
    }

    #[test]
    fn prefixes_are_stripped_through_arrays() {
        let mut info = XmpTree::new();
        info.insert("qidata:key".into(), text("prop"));
        let mut entry = XmpTree::new();
        entry.insert("qidata:info".into(), XmpValue::Struct(info));
        let mut typed = XmpTree::new();
        typed.insert(
            "qidata:Property".into(),
            XmpValue::Array(vec![XmpValue::Struct(entry)]),
        );
        let mut root = XmpTree::new();
        root.insert("qidata:jdoe".into(), XmpValue::Struct(typed));

        let stripped = strip_prefixes(&root);
        let entry = &stripped["jdoe"].as_struct().unwrap()["Property"]
            .as_array()
            .unwrap()[0];
        let info = entry.as_struct().unwrap()["info"].as_struct().unwrap();
        assert_eq!(info["key"].as_text(), Some("prop"));
    }

    #[test]
    fn tree_serializes_as_plain_json() {
        let mut root = XmpTree::new();
        root.insert(
            "qidata:loc".into(),
            XmpValue::Array(vec![text("1"), text("2.0")]),
        );
        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(json, r#"{"qidata:loc":["1","2.0"]}"#);
        let back: XmpTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }
}
