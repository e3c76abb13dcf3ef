//! Orchestration layer of the centra toolkit.
//!
//! Edge-list conversion, graph snapshot persistence, and the multi-run
//! experiment harness. The algorithms live in `centra-engine`; this crate
//! owns all file I/O around them.

pub mod convert;
pub mod experiment;
pub mod snapshot;
