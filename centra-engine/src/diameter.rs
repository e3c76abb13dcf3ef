//! Exact and approximate graph diameter.
//!
//! The diameter feeds the VC-dimension sample-size bound, which counts
//! vertices on a longest shortest path, so distances here are hop counts
//! (unit-weight traversal) even on weighted graphs.

use std::collections::VecDeque;
use std::time::Instant;

use centra_common::{Error, Result};
use log::info;
use rand::Rng;

use crate::graph::Graph;

/// Diameter value plus the work spent computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiameterResult {
    pub diameter: u64,
    pub touched_edges: u64,
}

/// Hop distances from `source`; unreachable vertices stay `u64::MAX`.
/// Returns the distances and the number of adjacency slots scanned.
fn hop_distances(graph: &Graph, source: u32) -> (Vec<u64>, u64) {
    let n = graph.vertex_count();
    let mut dist = vec![u64::MAX; n];
    let mut touched = 0u64;
    dist[source as usize] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        let next = dist[v as usize] + 1;
        for (u, _) in graph.neighbors(v) {
            touched += 1;
            if dist[u as usize] == u64::MAX {
                dist[u as usize] = next;
                queue.push_back(u);
            }
        }
    }

    (dist, touched)
}

/// Exact diameter: the longest finite shortest-path length, over every
/// source. An edgeless graph has diameter 0.
pub fn exact_diameter(graph: &Graph) -> DiameterResult {
    let start = Instant::now();
    let mut diameter = 0u64;
    let mut touched = 0u64;

    for source in 0..graph.vertex_count() as u32 {
        let (dist, scanned) = hop_distances(graph, source);
        touched += scanned;
        for d in dist {
            if d != u64::MAX && d > diameter {
                diameter = d;
            }
        }
    }

    info!(
        "exact diameter {} in {:.3}s",
        diameter,
        start.elapsed().as_secs_f64()
    );
    DiameterResult {
        diameter,
        touched_edges: touched,
    }
}

/// Upper bound on the diameter from one sweep: the two largest finite
/// distances from a uniformly random vertex. By the triangle inequality
/// any pair is no farther apart than the sum of its distances to the
/// sampled vertex, and the two largest values dominate that sum.
pub fn approx_diameter<R: Rng>(graph: &Graph, rng: &mut R) -> Result<DiameterResult> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(Error::VertexOutOfRange {
            vertex: 0,
            vertex_count: 0,
        });
    }

    let source = rng.gen_range(0..n as u32);
    let (dist, touched) = hop_distances(graph, source);

    let mut largest = 0u64;
    let mut second = 0u64;
    for d in dist {
        if d == u64::MAX {
            continue;
        }
        if d >= largest {
            second = largest;
            largest = d;
        } else if d > second {
            second = d;
        }
    }

    Ok(DiameterResult {
        diameter: largest + second,
        touched_edges: touched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn path_graph(n: usize) -> Graph {
        let edges: Vec<(u32, u32)> = (0..n as u32 - 1).map(|i| (i, i + 1)).collect();
        Graph::from_edges(n, &edges, false).unwrap()
    }

    #[test]
    fn path_graph_diameter_is_length() {
        let result = exact_diameter(&path_graph(6));
        assert_eq!(result.diameter, 5);
        assert!(result.touched_edges > 0);
    }

    #[test]
    fn disconnected_graph_uses_longest_component() {
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (3, 4)], false).unwrap();
        assert_eq!(exact_diameter(&g).diameter, 2);
    }

    #[test]
    fn edgeless_graph_has_zero_diameter() {
        let g = Graph::from_edges(3, &[], false).unwrap();
        assert_eq!(exact_diameter(&g).diameter, 0);
    }

    #[test]
    fn approximation_upper_bounds_the_diameter() {
        let g = path_graph(9);
        let exact = exact_diameter(&g).diameter;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let approx = approx_diameter(&g, &mut rng).unwrap().diameter;
            assert!(approx >= exact, "seed {seed}: {approx} < {exact}");
            assert!(approx <= 2 * exact, "seed {seed}: {approx} > {}", 2 * exact);
        }
    }

    #[test]
    fn repeated_distances_both_count_toward_the_bound() {
        // On a 3-path sampled at the middle the two largest distances are
        // both 1; collapsing equal values (as the distinct-value variant
        // does) would report 1 and undershoot the true diameter 2.
        let g = path_graph(3);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let approx = approx_diameter(&g, &mut rng).unwrap().diameter;
            assert!(approx >= 2, "seed {seed}: bound {approx} undershoots");
        }
    }
}
