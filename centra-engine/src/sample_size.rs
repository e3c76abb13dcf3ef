//! Sample-size calculators for the sampling estimators.
//!
//! Pure numeric functions: accuracy `epsilon`, confidence `delta`, and a
//! structural bound (vertex count, or a VC-dimension upper bound derived
//! from the diameter) map to a number of samples. Both parameters must lie
//! in the open interval (0, 1); callers validate before reaching this
//! module.

/// Default multiplicative constant of the VC-dimension bound.
pub const DEFAULT_VC_CONSTANT: f64 = 0.5;

/// Samples needed for an epsilon-approximation of the betweenness of every
/// vertex of an n-vertex graph with probability at least 1 - delta
/// (Hoeffding + union bound; Brandes-Pich and source-sampling estimators).
pub fn hoeffding_sample_size(epsilon: f64, delta: f64, vertex_count: usize) -> u64 {
    let n = vertex_count as f64;
    let samples = 2.0 * ((n - 2.0) / (epsilon * (n - 1.0))).powi(2) * (2.0 * n / delta).ln();
    (samples.ceil() as u64).max(1)
}

/// Samples needed for an epsilon-approximation of a range set with
/// VC-dimension at most `vcdim_upper_bound` with probability at least
/// 1 - delta.
pub fn vc_sample_size(epsilon: f64, delta: f64, vcdim_upper_bound: u64) -> u64 {
    vc_sample_size_with_constant(epsilon, delta, vcdim_upper_bound, DEFAULT_VC_CONSTANT)
}

pub fn vc_sample_size_with_constant(
    epsilon: f64,
    delta: f64,
    vcdim_upper_bound: u64,
    constant: f64,
) -> u64 {
    let samples =
        (constant / epsilon.powi(2)) * (vcdim_upper_bound as f64 + (1.0 / delta).ln());
    (samples.ceil() as u64).max(1)
}

/// VC-dimension upper bound of the shortest-path range set of a graph with
/// the given diameter: `floor(log2(D - 1))`. A diameter of at most 2 means
/// no shortest path has more than one internal vertex to shatter, so the
/// bound is 0 (the log term is undefined there).
pub fn vc_dimension_bound(diameter: u64) -> u64 {
    if diameter <= 2 {
        0
    } else {
        ((diameter - 1) as f64).log2().floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hoeffding_matches_the_formula() {
        let n = 100usize;
        let (eps, delta) = (0.1, 0.1);
        let expected = (2.0 * (98.0f64 / (0.1 * 99.0)).powi(2) * (2000.0f64).ln()).ceil() as u64;
        assert_eq!(hoeffding_sample_size(eps, delta, n), expected);
    }

    #[test]
    fn vc_matches_the_formula() {
        let expected = ((0.5 / 0.01) * (4.0 + 10.0f64.ln())).ceil() as u64;
        assert_eq!(vc_sample_size(0.1, 0.1, 4), expected);
    }

    #[test]
    fn vc_constant_scales_linearly() {
        let base = vc_sample_size_with_constant(0.1, 0.1, 4, 0.5);
        let doubled = vc_sample_size_with_constant(0.1, 0.1, 4, 1.0);
        assert!(doubled >= 2 * base - 1);
    }

    #[test]
    fn loosening_parameters_never_costs_more_samples() {
        let grid = [0.05, 0.1, 0.2, 0.4, 0.8];
        for &eps in &grid {
            for &delta in &grid {
                for &looser_eps in grid.iter().filter(|&&e| e >= eps) {
                    assert!(
                        hoeffding_sample_size(looser_eps, delta, 1000)
                            <= hoeffding_sample_size(eps, delta, 1000)
                    );
                    assert!(
                        vc_sample_size(looser_eps, delta, 5) <= vc_sample_size(eps, delta, 5)
                    );
                }
                for &looser_delta in grid.iter().filter(|&&d| d >= delta) {
                    assert!(
                        hoeffding_sample_size(eps, looser_delta, 1000)
                            <= hoeffding_sample_size(eps, delta, 1000)
                    );
                    assert!(
                        vc_sample_size(eps, looser_delta, 5) <= vc_sample_size(eps, delta, 5)
                    );
                }
            }
        }
    }

    #[test]
    fn trivial_diameters_have_zero_bound() {
        assert_eq!(vc_dimension_bound(0), 0);
        assert_eq!(vc_dimension_bound(1), 0);
        assert_eq!(vc_dimension_bound(2), 0);
    }

    #[test]
    fn bound_grows_logarithmically() {
        assert_eq!(vc_dimension_bound(3), 1);
        assert_eq!(vc_dimension_bound(5), 2);
        assert_eq!(vc_dimension_bound(9), 3);
        assert_eq!(vc_dimension_bound(17), 4);
        assert_eq!(vc_dimension_bound(1025), 10);
    }

    #[test]
    fn degenerate_vertex_counts_still_request_a_sample() {
        assert_eq!(hoeffding_sample_size(0.1, 0.1, 2), 1);
    }
}
