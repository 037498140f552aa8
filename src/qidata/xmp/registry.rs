//! Process-wide namespace registry.
//!
//! A namespace URI maps to exactly one prefix for the lifetime of the
//! process. Registering the same pair twice is harmless; giving a known URI a
//! different prefix is refused.

use crate::error::{QidataError, Result};
use indexmap::IndexMap;
use once_cell::sync::{Lazy, OnceCell};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Namespace of the current annotation layout (annotator, then type).
pub const QIDATA_NS: &str = "http://softbank-robotics.com/qidata/1";

/// Namespace used by the first two annotation layouts.
pub const LEGACY_QIDATA_NS: &str = "http://aldebaran.com/xmp/1";

static NAMESPACES: Lazy<Mutex<IndexMap<String, String>>> =
    Lazy::new(|| Mutex::new(IndexMap::new()));

static QIDATA_REGISTERED: OnceCell<()> = OnceCell::new();

fn namespaces() -> MutexGuard<'static, IndexMap<String, String>> {
    // The map is only ever inserted into, so a poisoned lock still holds a
    // consistent map.
    NAMESPACES.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn register_namespace(uri: &str, prefix: &str) -> Result<()> {
    let mut registered = namespaces();
    match registered.get(uri) {
        Some(existing) if existing == prefix => Ok(()),
        Some(existing) => Err(QidataError::NamespaceConflict {
            uri: uri.to_string(),
            existing: existing.clone(),
        }),
        None => {
            debug!(uri, prefix, "registered namespace");
            registered.insert(uri.to_string(), prefix.to_string());
            Ok(())
        }
    }
}

pub fn namespace_prefix(uri: &str) -> Option<String> {
    namespaces().get(uri).cloned()
}

/// Register the qidata namespaces. Runs once per process; later calls return
/// immediately.
pub fn register_qidata_namespaces() -> Result<()> {
    QIDATA_REGISTERED.get_or_try_init(|| {
        register_namespace(QIDATA_NS, "qidata")?;
        register_namespace(LEGACY_QIDATA_NS, "aldebaran")
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pair_registers_twice() {
        register_namespace("urn:test:same", "same").unwrap();
        register_namespace("urn:test:same", "same").unwrap();
        assert_eq!(namespace_prefix("urn:test:same").as_deref(), Some("same"));
    }

    #[test]
    fn conflicting_prefix_is_refused() {
        register_namespace("urn:test:conflict", "first").unwrap();
        let err = register_namespace("urn:test:conflict", "second").unwrap_err();
        assert!(matches!(
            err,
            QidataError::NamespaceConflict { ref existing, .. } if existing == "first"
        ));
        assert_eq!(
            namespace_prefix("urn:test:conflict").as_deref(),
            Some("first")
        );
    }

    #[test]
    fn qidata_namespaces_are_registered_once() {
        register_qidata_namespaces().unwrap();
        register_qidata_namespaces().unwrap();
        assert_eq!(namespace_prefix(QIDATA_NS).as_deref(), Some("qidata"));
        assert_eq!(
            namespace_prefix(LEGACY_QIDATA_NS).as_deref(),
            Some("aldebaran")
        );
    }

    #[test]
    fn unknown_namespace_has_no_prefix() {
        assert_eq!(namespace_prefix("urn:test:never"), None);
    }
}
