//! Real-valued variation operators.
//!
//! These operate on `&[f64]` decision vectors inside per-variable bounds
//! and never produce a value outside `[lower, upper]`.
//!
//! # Operators
//!
//! - [`random_vector`]: uniform sampling inside the box
//! - [`sbx_crossover`]: bounded Simulated Binary Crossover
//! - [`polynomial_mutation`]: bounded polynomial mutation
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design"

use rand::Rng;

/// Below this parent gap SBX leaves the variable untouched.
const SBX_EPS: f64 = 1e-14;

/// Samples a vector uniformly inside `[lower, upper]`.
pub fn random_vector<R: Rng>(lower: &[f64], upper: &[f64], rng: &mut R) -> Vec<f64> {
    lower
        .iter()
        .zip(upper)
        .map(|(&lo, &hi)| if hi > lo { rng.random_range(lo..=hi) } else { lo })
        .collect()
}

/// Bounded Simulated Binary Crossover (SBX).
///
/// Each variable takes part with probability 0.5. The spread factor is
/// drawn from a polynomial distribution with index `eta`, truncated so
/// both children stay inside the bounds. Children are swapped with
/// probability 0.5 per variable.
///
/// # Panics
/// Panics if the parents and bounds have different lengths.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    lower: &[f64],
    upper: &[f64],
    eta: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(n, lower.len(), "bounds must match the parent length");

    let mut c1 = parent1.to_vec();
    let mut c2 = parent2.to_vec();

    for i in 0..n {
        if rng.random::<f64>() > 0.5 {
            continue;
        }
        let (xl, xu) = (lower[i], upper[i]);
        if (parent1[i] - parent2[i]).abs() <= SBX_EPS || xu - xl <= SBX_EPS {
            continue;
        }

        let y1 = parent1[i].min(parent2[i]);
        let y2 = parent1[i].max(parent2[i]);
        let delta = y2 - y1;
        let u: f64 = rng.random();

        let beta = 1.0 + 2.0 * (y1 - xl) / delta;
        let child_lo = 0.5 * ((y1 + y2) - spread(beta, eta, u) * delta);

        let beta = 1.0 + 2.0 * (xu - y2) / delta;
        let child_hi = 0.5 * ((y1 + y2) + spread(beta, eta, u) * delta);

        let child_lo = child_lo.clamp(xl, xu);
        let child_hi = child_hi.clamp(xl, xu);

        if rng.random::<f64>() < 0.5 {
            c1[i] = child_hi;
            c2[i] = child_lo;
        } else {
            c1[i] = child_lo;
            c2[i] = child_hi;
        }
    }

    (c1, c2)
}

/// SBX spread factor `beta_q` for bound distance `beta`.
fn spread(beta: f64, eta: f64, u: f64) -> f64 {
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    if u <= 1.0 / alpha {
        (u * alpha).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 - u * alpha)).powf(1.0 / (eta + 1.0))
    }
}

/// Bounded polynomial mutation, applied to each variable with
/// probability `prob`.
pub fn polynomial_mutation<R: Rng>(
    x: &mut [f64],
    lower: &[f64],
    upper: &[f64],
    eta: f64,
    prob: f64,
    rng: &mut R,
) {
    for (i, xi) in x.iter_mut().enumerate() {
        if rng.random::<f64>() >= prob {
            continue;
        }
        let (xl, xu) = (lower[i], upper[i]);
        let range = xu - xl;
        if range <= 0.0 {
            continue;
        }

        let delta1 = (*xi - xl) / range;
        let delta2 = (xu - *xi) / range;
        let u: f64 = rng.random();
        let power = 1.0 / (eta + 1.0);

        let delta_q = if u < 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(power) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(power)
        };

        *xi = (*xi + delta_q * range).clamp(xl, xu);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_random_vector_in_bounds() {
        let mut rng = rng();
        let lower = [-5.0, 0.0, 2.0];
        let upper = [5.0, 1.0, 2.0];
        for _ in 0..100 {
            let x = random_vector(&lower, &upper, &mut rng);
            assert_eq!(x.len(), 3);
            for i in 0..3 {
                assert!(x[i] >= lower[i] && x[i] <= upper[i]);
            }
            assert_eq!(x[2], 2.0);
        }
    }

    #[test]
    fn test_sbx_children_in_bounds() {
        let mut rng = rng();
        let lower = [0.0; 5];
        let upper = [1.0; 5];
        for _ in 0..200 {
            let p1 = random_vector(&lower, &upper, &mut rng);
            let p2 = random_vector(&lower, &upper, &mut rng);
            let (c1, c2) = sbx_crossover(&p1, &p2, &lower, &upper, 15.0, &mut rng);
            for v in c1.iter().chain(c2.iter()) {
                assert!((0.0..=1.0).contains(v), "child value {v} out of bounds");
            }
        }
    }

    #[test]
    fn test_sbx_identical_parents() {
        let mut rng = rng();
        let p = vec![0.3, 0.7];
        let (c1, c2) = sbx_crossover(&p, &p, &[0.0; 2], &[1.0; 2], 15.0, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_sbx_preserves_mean_before_clamping() {
        // Far from the bounds clamping never triggers, so SBX keeps the
        // parents' midpoint.
        let mut rng = rng();
        let (c1, c2) = sbx_crossover(&[-1.0], &[1.0], &[-1e6], &[1e6], 15.0, &mut rng);
        assert!(((c1[0] + c2[0]) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_polynomial_mutation_in_bounds() {
        let mut rng = rng();
        let lower = [-5.0; 10];
        let upper = [5.0; 10];
        for _ in 0..200 {
            let mut x = random_vector(&lower, &upper, &mut rng);
            polynomial_mutation(&mut x, &lower, &upper, 20.0, 1.0, &mut rng);
            assert!(x.iter().all(|v| (-5.0..=5.0).contains(v)));
        }
    }

    #[test]
    fn test_polynomial_mutation_zero_prob_is_noop() {
        let mut rng = rng();
        let mut x = vec![0.1, 0.2, 0.3];
        polynomial_mutation(&mut x, &[0.0; 3], &[1.0; 3], 20.0, 0.0, &mut rng);
        assert_eq!(x, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_polynomial_mutation_changes_something() {
        let mut rng = rng();
        let mut x = vec![0.5; 20];
        polynomial_mutation(&mut x, &[0.0; 20], &[1.0; 20], 20.0, 1.0, &mut rng);
        assert!(x.iter().any(|&v| (v - 0.5).abs() > 1e-12));
    }
}
