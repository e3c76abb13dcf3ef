//! Sampling-based betweenness estimators.
//!
//! Three estimators share the SSSP and accumulation primitives: draw `k`
//! random samples of a fixed kind, accumulate unnormalized contributions,
//! then renormalize into an unbiased estimate of the betweenness vector
//! the exact driver would produce.
//!
//! - Brandes-Pich: uniform source vertices, full dependency accumulation
//!   per source, Hoeffding sample size.
//! - VC-dimension: uniform vertex pairs, one uniformly random shortest path
//!   per pair, sample size from the VC-dimension bound (which needs a
//!   diameter: exact, one-sweep approximate, or caller-fixed).
//! - Linear scaling (Geisberger-Sanders-Schultes): uniform sources with
//!   distance-scaled accumulation. The distance ratios of a pair's two
//!   endpoint draws sum to exactly 1 on undirected graphs, making the
//!   estimate unbiased there without the halving the other source-sampled
//!   estimators need; directed graphs use a factor-2 approximation of the
//!   same argument.

use std::time::Instant;

use centra_common::{Error, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::brandes::{accumulate, accumulate_linear_scaled};
use crate::diameter::{approx_diameter, exact_diameter};
use crate::graph::Graph;
use crate::sample_size::{hoeffding_sample_size, vc_dimension_bound, vc_sample_size};
use crate::sssp::{shortest_paths, shortest_paths_to, ShortestPathDag};
use crate::stats::ComputationStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorKind {
    BrandesPich,
    VcDimension,
    GssLinear,
}

/// Where the VC-dimension estimator gets its diameter from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiameterSpec {
    /// One-sweep upper bound from a random vertex (the default).
    Approximate,
    Exact,
    /// Caller-supplied value, e.g. from a previous run.
    Fixed(u64),
}

#[derive(Debug, Clone)]
pub struct SampleOptions {
    pub kind: EstimatorKind,
    /// Accuracy parameter, in (0, 1).
    pub epsilon: f64,
    /// Confidence parameter, in (0, 1).
    pub delta: f64,
    /// Overrides the epsilon/delta-derived sample size (and skips the
    /// diameter computation for the VC estimator). Must be at least 1.
    pub sample_size: Option<u64>,
    pub diameter: DiameterSpec,
    /// Seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl SampleOptions {
    pub fn new(kind: EstimatorKind, epsilon: f64, delta: f64) -> Self {
        Self {
            kind,
            epsilon,
            delta,
            sample_size: None,
            diameter: DiameterSpec::Approximate,
            seed: None,
        }
    }
}

/// Approximate betweenness centrality of every vertex.
pub fn sampled_betweenness(
    graph: &Graph,
    options: &SampleOptions,
) -> Result<(ComputationStats, Vec<f64>)> {
    if options.sample_size.is_none() {
        validate_unit_interval("epsilon", options.epsilon)?;
        validate_unit_interval("delta", options.delta)?;
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let start = Instant::now();

    match options.kind {
        EstimatorKind::BrandesPich => source_sampled(graph, options, &mut rng, start, false),
        EstimatorKind::GssLinear => source_sampled(graph, options, &mut rng, start, true),
        EstimatorKind::VcDimension => pair_sampled(graph, options, &mut rng, start),
    }
}

fn validate_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

/// Uniform-source estimators (Brandes-Pich, and linear scaling when
/// `linear_scaling` is set).
fn source_sampled(
    graph: &Graph,
    options: &SampleOptions,
    rng: &mut StdRng,
    start: Instant,
    linear_scaling: bool,
) -> Result<(ComputationStats, Vec<f64>)> {
    let n = graph.vertex_count();
    if n == 0 {
        let mut stats = ComputationStats::completed(start.elapsed().as_secs_f64(), 0, 0);
        stats.sample_size = Some(0);
        return Ok((stats, Vec::new()));
    }

    let k = options
        .sample_size
        .unwrap_or_else(|| hoeffding_sample_size(options.epsilon, options.delta, n));
    debug_assert!(k >= 1, "sample size must be at least 1");
    debug!("sampling {k} sources over {n} vertices");

    let mut betweenness = vec![0.0f64; n];
    let mut forward = 0u64;
    let mut backward = 0u64;

    for _ in 0..k {
        let source = rng.gen_range(0..n as u32);
        let dag = shortest_paths(graph, source)?;
        forward += dag.relaxed_edges;
        if linear_scaling {
            // A source that reaches nothing contributes exactly zero;
            // skip its backward pass.
            if dag.order.len() > 1 {
                backward += accumulate_linear_scaled(&dag, &mut betweenness);
            }
        } else {
            backward += accumulate(&dag, &mut betweenness);
        }
    }

    let mut scale = n as f64 / k as f64;
    if linear_scaling {
        if graph.is_directed() {
            scale *= 2.0;
        }
    } else if !graph.is_directed() {
        scale *= 0.5;
    }
    for value in &mut betweenness {
        *value *= scale;
    }

    let mut stats = ComputationStats::completed(start.elapsed().as_secs_f64(), forward, backward);
    stats.sample_size = Some(k);
    Ok((stats, betweenness))
}

/// VC-dimension estimator: uniform pairs, one random shortest path each.
fn pair_sampled(
    graph: &Graph,
    options: &SampleOptions,
    rng: &mut StdRng,
    start: Instant,
) -> Result<(ComputationStats, Vec<f64>)> {
    let n = graph.vertex_count();
    let mut betweenness = vec![0.0f64; n];

    // Without edges no pair has a path; every draw would be discarded.
    if n < 2 || graph.edge_count() == 0 {
        let mut stats = ComputationStats::completed(start.elapsed().as_secs_f64(), 0, 0);
        stats.sample_size = Some(0);
        return Ok((stats, betweenness));
    }

    let mut diameter_value = None;
    let mut diameter_touched = None;
    let k = match options.sample_size {
        Some(k) => k,
        None => {
            let diameter = match options.diameter {
                DiameterSpec::Fixed(value) => value,
                DiameterSpec::Exact => {
                    let result = exact_diameter(graph);
                    diameter_touched = Some(result.touched_edges as i64);
                    result.diameter
                }
                DiameterSpec::Approximate => {
                    let result = approx_diameter(graph, rng)?;
                    diameter_touched = Some(result.touched_edges as i64);
                    result.diameter
                }
            };
            diameter_value = Some(diameter);
            vc_sample_size(options.epsilon, options.delta, vc_dimension_bound(diameter))
        }
    };
    debug_assert!(k >= 1, "sample size must be at least 1");
    info!("sampling {k} shortest paths between random pairs");

    let mut forward = 0u64;
    let mut drawn = 0u64;
    while drawn < k {
        let s = rng.gen_range(0..n as u32);
        let t = rng.gen_range(0..n as u32);
        if s == t {
            continue;
        }
        let dag = shortest_paths_to(graph, s, Some(t))?;
        forward += dag.relaxed_edges;
        if !dag.is_reached(t) {
            // Disconnected pair: discard and resample, the draw does not
            // count toward k.
            continue;
        }
        drawn += 1;

        for vertex in sample_shortest_path(&dag, t, rng) {
            if vertex != s && vertex != t {
                betweenness[vertex as usize] += 1.0;
            }
        }
    }

    // Pairs with a path are sampled uniformly; rescale by the pair count
    // of the convention in use (unordered for undirected graphs).
    let pairs = if graph.is_directed() {
        n as f64 * (n as f64 - 1.0)
    } else {
        n as f64 * (n as f64 - 1.0) / 2.0
    };
    let scale = pairs / k as f64;
    for value in &mut betweenness {
        *value *= scale;
    }

    let mut stats = ComputationStats::completed(start.elapsed().as_secs_f64(), forward, 0);
    stats.sample_size = Some(k);
    stats.diameter = diameter_value;
    stats.diameter_touched_edges = diameter_touched;
    Ok((stats, betweenness))
}

/// Pick one shortest path from the DAG's source to `target`, uniformly
/// among all of them, returned source-first.
///
/// Walks backward from `target`, drawing each predecessor `p` with
/// probability proportional to `path_counts[p]`, one ball per shortest
/// path reaching `p`, so every complete path is selected with equal
/// probability, matching enumerate-then-choose in distribution without
/// materializing the path set. `target` must be reached in `dag`.
pub fn sample_shortest_path<R: Rng>(
    dag: &ShortestPathDag,
    target: u32,
    rng: &mut R,
) -> Vec<u32> {
    let mut path = vec![target];
    let mut current = target;
    while current != dag.source {
        current = pick_weighted_predecessor(dag, current, rng);
        path.push(current);
    }
    path.reverse();
    path
}

/// Draw one predecessor of `vertex` with probability proportional to its
/// shortest-path count.
fn pick_weighted_predecessor<R: Rng>(dag: &ShortestPathDag, vertex: u32, rng: &mut R) -> u32 {
    let preds = &dag.preds[vertex as usize];
    let total: u64 = preds
        .iter()
        .fold(0u64, |acc, &p| acc.saturating_add(dag.path_counts[p as usize]));

    let mut ball = rng.gen_range(0..total);
    for &p in preds {
        let count = dag.path_counts[p as usize];
        if ball < count {
            return p;
        }
        ball -= count;
    }
    // Reachable only when the ball total saturated; the last urn absorbs
    // the rounding.
    preds[preds.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_cycle() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)], false).unwrap()
    }

    #[test]
    fn invalid_accuracy_parameters_are_rejected() {
        let g = four_cycle();
        for (eps, delta) in [(0.0, 0.5), (1.0, 0.5), (0.5, 0.0), (0.5, 1.0), (-0.1, 0.5)] {
            let options = SampleOptions::new(EstimatorKind::BrandesPich, eps, delta);
            assert!(sampled_betweenness(&g, &options).is_err(), "({eps}, {delta})");
        }
    }

    #[test]
    fn sample_size_override_skips_parameter_validation() {
        let g = four_cycle();
        let options = SampleOptions {
            sample_size: Some(8),
            ..SampleOptions::new(EstimatorKind::BrandesPich, 0.0, 0.0)
        };
        let (stats, _) = sampled_betweenness(&g, &options).unwrap();
        assert_eq!(stats.sample_size, Some(8));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let g = four_cycle();
        for kind in [
            EstimatorKind::BrandesPich,
            EstimatorKind::VcDimension,
            EstimatorKind::GssLinear,
        ] {
            let options = SampleOptions {
                seed: Some(99),
                ..SampleOptions::new(kind, 0.2, 0.2)
            };
            let (stats_a, bc_a) = sampled_betweenness(&g, &options).unwrap();
            let (stats_b, bc_b) = sampled_betweenness(&g, &options).unwrap();
            assert_eq!(bc_a, bc_b, "{kind:?}");
            assert_eq!(stats_a.sample_size, stats_b.sample_size);
        }
    }

    #[test]
    fn vc_reports_its_diameter() {
        let g = four_cycle();
        let options = SampleOptions {
            seed: Some(3),
            diameter: DiameterSpec::Exact,
            ..SampleOptions::new(EstimatorKind::VcDimension, 0.2, 0.2)
        };
        let (stats, _) = sampled_betweenness(&g, &options).unwrap();
        assert_eq!(stats.diameter, Some(2));
        assert!(stats.diameter_touched_edges.unwrap() > 0);
    }

    #[test]
    fn fixed_diameter_skips_the_diameter_computation() {
        let g = four_cycle();
        let options = SampleOptions {
            seed: Some(3),
            diameter: DiameterSpec::Fixed(9),
            ..SampleOptions::new(EstimatorKind::VcDimension, 0.2, 0.2)
        };
        let (stats, _) = sampled_betweenness(&g, &options).unwrap();
        assert_eq!(stats.diameter, Some(9));
        assert_eq!(stats.diameter_touched_edges, None);
    }

    #[test]
    fn pair_sampling_survives_disconnected_components() {
        // Half the random pairs straddle the two components and must be
        // resampled without counting toward the sample size.
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (3, 4), (4, 5)], false).unwrap();
        let options = SampleOptions {
            seed: Some(17),
            sample_size: Some(50),
            ..SampleOptions::new(EstimatorKind::VcDimension, 0.2, 0.2)
        };
        let (stats, bc) = sampled_betweenness(&g, &options).unwrap();
        assert_eq!(stats.sample_size, Some(50));
        // Only the two middle vertices can be internal to any path.
        for v in [0usize, 2, 3, 5] {
            assert_eq!(bc[v], 0.0, "vertex {v}");
        }
    }

    #[test]
    fn edgeless_graph_short_circuits() {
        let g = Graph::from_edges(4, &[], false).unwrap();
        let options = SampleOptions {
            seed: Some(1),
            ..SampleOptions::new(EstimatorKind::VcDimension, 0.2, 0.2)
        };
        let (stats, bc) = sampled_betweenness(&g, &options).unwrap();
        assert_eq!(stats.sample_size, Some(0));
        assert_eq!(bc, vec![0.0; 4]);
    }

    #[test]
    fn empty_graph_yields_empty_estimate() {
        let g = Graph::from_edges(0, &[], false).unwrap();
        for kind in [
            EstimatorKind::BrandesPich,
            EstimatorKind::VcDimension,
            EstimatorKind::GssLinear,
        ] {
            let options = SampleOptions {
                seed: Some(1),
                ..SampleOptions::new(kind, 0.2, 0.2)
            };
            let (_, bc) = sampled_betweenness(&g, &options).unwrap();
            assert!(bc.is_empty(), "{kind:?}");
        }
    }
}
