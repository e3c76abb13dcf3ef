//! Single-source shortest paths with path counting.
//!
//! Produces the predecessor DAG that Brandes' backward pass consumes: per
//! vertex the distance from the source, the number of distinct shortest
//! paths reaching it, the predecessors one hop closer to the source, and
//! the order vertices were finalized in (non-decreasing distance).
//!
//! Unweighted graphs run a BFS frontier; weighted graphs run binary-heap
//! Dijkstra with lazy deletion (stale heap entries are skipped on pop, a
//! re-push stands in for decrease-key).
//!
//! Path counts are 64-bit and saturate on pathological graphs with more
//! than `u64::MAX` shortest paths to one vertex; betweenness arithmetic is
//! f64 throughout, so a saturated count degrades the estimate instead of
//! wrapping.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use centra_common::{Error, Result};

use crate::graph::Graph;

/// Shortest-path DAG rooted at one source vertex.
///
/// `dist` and `path_counts` are authoritative for the vertices listed in
/// `order`; vertices never finalized (unreachable, or beyond an early
/// termination target) keep `dist == f64::INFINITY`.
#[derive(Debug)]
pub struct ShortestPathDag {
    pub source: u32,
    pub dist: Vec<f64>,
    pub path_counts: Vec<u64>,
    pub preds: Vec<Vec<u32>>,
    /// Finalization order, non-decreasing in distance.
    pub order: Vec<u32>,
    /// Edges relaxed while building the DAG (forward workload).
    pub relaxed_edges: u64,
}

impl ShortestPathDag {
    /// Whether `vertex` was reached from the source.
    pub fn is_reached(&self, vertex: u32) -> bool {
        self.dist[vertex as usize].is_finite()
    }
}

/// Shortest paths from `source` to every reachable vertex.
pub fn shortest_paths(graph: &Graph, source: u32) -> Result<ShortestPathDag> {
    shortest_paths_to(graph, source, None)
}

/// Shortest paths from `source`, stopping once `target` is finalized.
///
/// With a target, the DAG is complete for every vertex no farther than the
/// target, enough to enumerate or sample every shortest `source -> target`
/// path. An unreached target is not an error: its distance stays infinite
/// and the caller decides (pair-sampling resamples, point-to-point lookups
/// treat it as unreachable).
pub fn shortest_paths_to(
    graph: &Graph,
    source: u32,
    target: Option<u32>,
) -> Result<ShortestPathDag> {
    let vertex_count = graph.vertex_count();
    for vertex in std::iter::once(source).chain(target) {
        if vertex as usize >= vertex_count {
            return Err(Error::VertexOutOfRange {
                vertex,
                vertex_count,
            });
        }
    }

    if graph.is_weighted() {
        dijkstra_counting(graph, source, target)
    } else {
        bfs_counting(graph, source, target)
    }
}

/// BFS specialization for unit weights.
fn bfs_counting(graph: &Graph, source: u32, target: Option<u32>) -> Result<ShortestPathDag> {
    let n = graph.vertex_count();
    let mut dag = ShortestPathDag {
        source,
        dist: vec![f64::INFINITY; n],
        path_counts: vec![0; n],
        preds: vec![Vec::new(); n],
        order: Vec::with_capacity(n),
        relaxed_edges: 0,
    };
    dag.dist[source as usize] = 0.0;
    dag.path_counts[source as usize] = 1;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        dag.order.push(v);
        if target == Some(v) {
            break;
        }
        let next_dist = dag.dist[v as usize] + 1.0;
        for (u, _) in graph.neighbors(v) {
            dag.relaxed_edges += 1;
            let u_us = u as usize;
            if dag.dist[u_us].is_infinite() {
                dag.dist[u_us] = next_dist;
                queue.push_back(u);
            }
            if dag.dist[u_us] == next_dist {
                dag.path_counts[u_us] =
                    dag.path_counts[u_us].saturating_add(dag.path_counts[v as usize]);
                dag.preds[u_us].push(v);
            }
        }
    }

    Ok(dag)
}

/// Min-heap entry ordered by tentative distance.
#[derive(Clone, Copy)]
struct HeapEntry {
    vertex: u32,
    dist: f64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior on BinaryHeap.
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
    }
}

fn dijkstra_counting(graph: &Graph, source: u32, target: Option<u32>) -> Result<ShortestPathDag> {
    let n = graph.vertex_count();
    let mut dag = ShortestPathDag {
        source,
        dist: vec![f64::INFINITY; n],
        path_counts: vec![0; n],
        preds: vec![Vec::new(); n],
        order: Vec::with_capacity(n),
        relaxed_edges: 0,
    };

    // Tentative distances; `dag.dist` is only written on finalization.
    let mut seen = vec![f64::INFINITY; n];
    let mut finalized = vec![false; n];
    seen[source as usize] = 0.0;
    dag.path_counts[source as usize] = 1;

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        vertex: source,
        dist: 0.0,
    });

    while let Some(HeapEntry { vertex: v, dist: d }) = heap.pop() {
        let v_us = v as usize;
        if finalized[v_us] {
            continue; // stale entry superseded by a re-push
        }
        finalized[v_us] = true;
        dag.dist[v_us] = d;
        dag.order.push(v);
        if target == Some(v) {
            break;
        }

        for (u, edge) in graph.neighbors(v) {
            dag.relaxed_edges += 1;
            let u_us = u as usize;
            let next_dist = d + graph.weight(edge);

            if finalized[u_us] {
                if next_dist < dag.dist[u_us] {
                    // A finalized distance can only improve if an edge
                    // weight is negative; the construction-time check makes
                    // this unreachable, but the invariant is cheap to keep.
                    return Err(Error::UnsupportedWeights { from: v, to: u });
                }
                continue;
            }

            if next_dist < seen[u_us] {
                seen[u_us] = next_dist;
                dag.path_counts[u_us] = dag.path_counts[v_us];
                dag.preds[u_us].clear();
                dag.preds[u_us].push(v);
                heap.push(HeapEntry {
                    vertex: u,
                    dist: next_dist,
                });
            } else if next_dist == seen[u_us] {
                // Tie on an already-discovered shortest distance: every
                // shortest path to v extends to u.
                dag.path_counts[u_us] =
                    dag.path_counts[u_us].saturating_add(dag.path_counts[v_us]);
                dag.preds[u_us].push(v);
            }
        }
    }

    Ok(dag)
}
