//! Core systems for Trellis.
//!
//! This crate provides the foundations the control tree is built on:
//!
//! - **Hierarchy**: an arena of nodes with non-owning parent links and
//!   ordered children, addressed by generational [`NodeId`] handles
//! - **Errors**: [`TrellisError`] and the crate [`Result`] alias
//! - **Logging**: `tracing` targets, span names, a tree dumper and perf spans
//! - **Configuration**: [`TrellisConfig`], loadable from TOML

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod logging;

pub use config::{TextMetricsConfig, TreeConfig, TrellisConfig};
pub use error::{Result, TrellisError};
pub use hierarchy::{Hierarchy, NodeId};
pub use logging::{HierarchyDebug, PerfSpan, TreeFormatOptions, TreeStyle};
