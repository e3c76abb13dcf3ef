//! Graph snapshot persistence.
//!
//! Snapshots are plain bincode over a serde struct, so converting a large
//! edge list once is enough; every later computation loads the snapshot.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use centra_engine::Graph;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub directed: bool,
    pub vertex_count: u32,
    /// Original vertex names, indexed by vertex id; empty when vertices
    /// are anonymous.
    pub vertex_names: Vec<String>,
    pub edges: Vec<(u32, u32)>,
    pub weights: Option<Vec<f64>>,
}

impl GraphSnapshot {
    pub fn from_graph(graph: &Graph, vertex_names: Vec<String>) -> Self {
        Self {
            directed: graph.is_directed(),
            vertex_count: graph.vertex_count() as u32,
            vertex_names,
            edges: graph.endpoints().to_vec(),
            weights: graph.edge_weights().map(<[f64]>::to_vec),
        }
    }

    pub fn to_graph(&self) -> Result<Graph> {
        let graph = match &self.weights {
            Some(weights) => {
                if weights.len() != self.edges.len() {
                    bail!(
                        "snapshot has {} edges but {} weights",
                        self.edges.len(),
                        weights.len()
                    );
                }
                let weighted: Vec<(u32, u32, f64)> = self
                    .edges
                    .iter()
                    .zip(weights)
                    .map(|(&(u, v), &w)| (u, v, w))
                    .collect();
                Graph::from_weighted_edges(self.vertex_count as usize, &weighted, self.directed)?
            }
            None => Graph::from_edges(self.vertex_count as usize, &self.edges, self.directed)?,
        };
        Ok(graph)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create snapshot {}", path.display()))?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self).context("failed to serialize snapshot")?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open snapshot {}", path.display()))?;
        let reader = BufReader::new(file);
        let snapshot =
            bincode::deserialize_from(reader).context("failed to deserialize snapshot")?;
        Ok(snapshot)
    }
}
