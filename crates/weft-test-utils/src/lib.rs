//! Test utilities for Weft development.
//!
//! Not published. Provides a capturing diagnostic sink and a fixture
//! record type with two link roles, shared by integration tests across
//! the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{CaptureSink, Critter, Kind, IN_INVENTORY, IN_WORLD};
