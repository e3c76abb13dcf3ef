//! Core engine for exact and sampled betweenness centrality.
//!
//! The building blocks are layered: [`graph`] is the read-only view every
//! computation shares, [`sssp`] produces the per-source shortest-path DAG
//! with path counts, [`brandes`] folds a DAG into betweenness contributions
//! and drives the exact computation, [`sample`] builds the three sampling
//! estimators on the same primitives, and [`timeout`] bounds any of them
//! with a deadline.

pub mod brandes;
pub mod diameter;
pub mod graph;
pub mod sample;
pub mod sample_size;
pub mod sssp;
pub mod stats;
pub mod timeout;

pub use brandes::exact_betweenness;
pub use graph::Graph;
pub use sample::{sampled_betweenness, DiameterSpec, EstimatorKind, SampleOptions};
pub use stats::ComputationStats;
pub use timeout::{run_with_deadline, Outcome};
