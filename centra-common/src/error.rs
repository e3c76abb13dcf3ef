//! Error types for the centra toolkit
//!
//! Library crates return the typed [`Error`] below; the CLI wraps it in
//! `anyhow` at the application boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An edge weight is non-positive, non-finite, or a relaxation improved
    /// a finalized distance. Shortest-path counting requires strictly
    /// positive, finite weights.
    #[error("unsupported weight on edge {from} -> {to}: weights must be strictly positive and finite")]
    UnsupportedWeights { from: u32, to: u32 },

    /// A vertex index fell outside the graph.
    #[error("vertex {vertex} out of range: graph has {vertex_count} vertices")]
    VertexOutOfRange { vertex: u32, vertex_count: usize },

    /// An accuracy or confidence parameter fell outside the open interval (0, 1).
    #[error("invalid {name}: {value} is not between 0 and 1 (extremes excluded)")]
    InvalidParameter { name: &'static str, value: f64 },
}
