//! Compact CSR graph view shared by every computation.
//!
//! The graph is immutable once built: adjacency in offset/target form, edge
//! weights indexed by edge id. Undirected graphs store each edge in both
//! adjacency rows under one shared edge id. All per-computation scratch
//! (distances, path counts, predecessors) lives with the computation that
//! allocated it, never on the graph, so independent computations can run
//! against one shared graph.

use centra_common::{Error, Result};

#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    /// Edge endpoints indexed by edge id, as given at construction.
    endpoints: Vec<(u32, u32)>,
    /// Edge weights indexed by edge id; `None` means unit weights.
    weights: Option<Vec<f64>>,
    /// CSR row starts, `vertex_count + 1` entries.
    offsets: Vec<usize>,
    /// Adjacency heads.
    targets: Vec<u32>,
    /// Edge id for each adjacency slot.
    edge_ids: Vec<u32>,
}

impl Graph {
    /// Build an unweighted graph from an edge list.
    pub fn from_edges(vertex_count: usize, edges: &[(u32, u32)], directed: bool) -> Result<Self> {
        Self::build(vertex_count, edges.to_vec(), None, directed)
    }

    /// Build a weighted graph from an edge list. Weights must be strictly
    /// positive and finite; shortest-path counting is not defined otherwise.
    pub fn from_weighted_edges(
        vertex_count: usize,
        edges: &[(u32, u32, f64)],
        directed: bool,
    ) -> Result<Self> {
        let endpoints: Vec<(u32, u32)> = edges.iter().map(|&(u, v, _)| (u, v)).collect();
        let weights: Vec<f64> = edges.iter().map(|&(_, _, w)| w).collect();
        for (&(u, v), &w) in endpoints.iter().zip(&weights) {
            if !(w.is_finite() && w > 0.0) {
                return Err(Error::UnsupportedWeights { from: u, to: v });
            }
        }
        Self::build(vertex_count, endpoints, Some(weights), directed)
    }

    fn build(
        vertex_count: usize,
        endpoints: Vec<(u32, u32)>,
        weights: Option<Vec<f64>>,
        directed: bool,
    ) -> Result<Self> {
        for &(u, v) in &endpoints {
            for vertex in [u, v] {
                if vertex as usize >= vertex_count {
                    return Err(Error::VertexOutOfRange {
                        vertex,
                        vertex_count,
                    });
                }
            }
        }

        // Count-then-fill CSR construction.
        let mut counts = vec![0usize; vertex_count];
        for &(u, v) in &endpoints {
            counts[u as usize] += 1;
            if !directed {
                counts[v as usize] += 1;
            }
        }

        let mut offsets = Vec::with_capacity(vertex_count + 1);
        let mut offset = 0usize;
        for &count in &counts {
            offsets.push(offset);
            offset += count;
        }
        offsets.push(offset);

        let mut targets = vec![0u32; offset];
        let mut edge_ids = vec![0u32; offset];
        counts.fill(0);
        for (id, &(u, v)) in endpoints.iter().enumerate() {
            let pos = offsets[u as usize] + counts[u as usize];
            targets[pos] = v;
            edge_ids[pos] = id as u32;
            counts[u as usize] += 1;
            if !directed {
                let pos = offsets[v as usize] + counts[v as usize];
                targets[pos] = u;
                edge_ids[pos] = id as u32;
                counts[v as usize] += 1;
            }
        }

        Ok(Self {
            directed,
            endpoints,
            weights,
            offsets,
            targets,
            edge_ids,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Outgoing `(neighbor, edge id)` pairs of `vertex`.
    pub fn neighbors(&self, vertex: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        let start = self.offsets[vertex as usize];
        let end = self.offsets[vertex as usize + 1];
        self.targets[start..end]
            .iter()
            .copied()
            .zip(self.edge_ids[start..end].iter().copied())
    }

    pub fn degree(&self, vertex: u32) -> usize {
        self.offsets[vertex as usize + 1] - self.offsets[vertex as usize]
    }

    /// Weight of an edge; 1.0 for unweighted graphs.
    pub fn weight(&self, edge_id: u32) -> f64 {
        match &self.weights {
            Some(weights) => weights[edge_id as usize],
            None => 1.0,
        }
    }

    /// Edge endpoints indexed by edge id, as given at construction.
    pub fn endpoints(&self) -> &[(u32, u32)] {
        &self.endpoints
    }

    /// Edge weights indexed by edge id, when the graph is weighted.
    pub fn edge_weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}
