//! # Qidata Architecture
//!
//! Qidata attaches typed annotations to raw data files (images, sounds) and
//! keeps them in an attribute container stored next to the file. It is a
//! library first; the `qidata` binary is one thin client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs + args.rs)                                    │
//! │  - Parses arguments, prints results, sets the exit code     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs) + Commands (commands/*.rs)                    │
//! │  - One function per operation, returns CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  File Adapter (file/)                                       │
//! │  - QiDataFile: open / save / cancel_changes / close         │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                              │
//!                  ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Annotation Store (store/)    │ │  Attribute Container      │
//! │  annotator → type → entries   │ │  (xmp/): XmpFile sidecar, │
//! │  MetadataObject registry      │ │  MemContainer for tests   │
//! │  (metadata/)                  │ │                           │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! From `api.rs` inward the code never writes to stdout/stderr and never
//! exits the process. Diagnostics go through `tracing`; the binary decides
//! where they end up.
//!
//! ## Quick Start
//!
//! ```no_run
//! use qidata::file::{OpenMode, QiDataFile};
//! use qidata::location::Location;
//! use qidata::metadata::Property;
//!
//! # fn main() -> qidata::error::Result<()> {
//! let mut file = QiDataFile::open("photo.jpg", OpenMode::Write)?;
//! let corners = Location::from(vec![vec![0_i64, 0], vec![10, 80]]);
//! file.add_annotation("jdoe", Property::new("label", "cat"), Some(corners))?;
//! file.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for the CLI
//! - [`commands`]: One module per CLI operation
//! - [`file`]: File adapter binding a store to a data file
//! - [`store`]: The annotation store and its record form
//! - [`metadata`]: Metadata object types and their registry
//! - [`location`]: Annotation locations and per-kind validity rules
//! - [`kind`]: Data kinds and file classification
//! - [`xmp`]: Attribute containers and the namespace registry
//! - [`version`]: Detection of legacy annotation layouts
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod file;
pub mod kind;
pub mod location;
pub mod metadata;
pub mod store;
pub mod version;
pub mod xmp;
