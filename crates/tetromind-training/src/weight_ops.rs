//! Vector operations on signed weight arrays.
//!
//! Unlike feature systems that fold the sign of a feature into its
//! normalization, the placement score keeps raw feature values and lets the
//! weights carry the sign (height, holes, and bumpiness want negative
//! weights). The genetic operators therefore work on the full signed range
//! `[-max_weight, max_weight]`, and L1 normalization divides by the sum of
//! absolute values so a vector's signs survive normalization.

use rand::Rng;
use rand_distr::Normal;

use tetromind_evaluator::weights::Weights;

/// Weight vector length, matching [`Weights::LEN`].
pub const LEN: usize = Weights::LEN;

/// Generates a random signed weight vector.
///
/// Each weight is independently sampled from `[-max_weight, max_weight]`.
pub fn random<R>(rng: &mut R, max_weight: f32) -> [f32; LEN]
where
    R: Rng + ?Sized,
{
    std::array::from_fn(|_| rng.random_range(-max_weight..=max_weight))
}

/// Performs BLX-α (blend crossover) between two parent weight vectors.
///
/// For each position, offspring are sampled uniformly from the parents'
/// range expanded by `alpha` times the parent distance on both sides, then
/// clamped to `[-max_weight, max_weight]`. `alpha = 0` keeps offspring
/// strictly between the parents; around `0.2..0.5` allows moderate
/// exploration beyond them.
pub fn blx_alpha<R>(
    p1: &[f32; LEN],
    p2: &[f32; LEN],
    alpha: f32,
    max_weight: f32,
    rng: &mut R,
) -> [f32; LEN]
where
    R: Rng + ?Sized,
{
    std::array::from_fn(|i| {
        let min = f32::min(p1[i], p2[i]);
        let max = f32::max(p1[i], p2[i]);
        let d = max - min;
        let lower = min - alpha * d;
        let upper = max + alpha * d;
        rng.random_range(lower..=upper)
            .clamp(-max_weight, max_weight)
    })
}

/// Applies Gaussian mutation to a weight vector in place.
///
/// Each weight is perturbed with probability `rate` by noise drawn from
/// `N(0, sigma)` and clamped to `[-max_weight, max_weight]`.
pub fn mutate<R>(weights: &mut [f32; LEN], sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).unwrap();
    for w in weights {
        if rng.random_bool(rate.into()) {
            *w = (*w + rng.sample(normal)).clamp(-max_weight, max_weight);
        }
    }
}

/// Normalizes a weight vector so the absolute values sum to 1.0.
///
/// Placement rankings are invariant under positive scaling of the weight
/// vector, so normalization removes redundant solutions from the search
/// space without changing behavior. Signs are preserved. A vector of all
/// zeros is left unchanged.
pub fn normalize_l1(weights: &mut [f32; LEN]) {
    let sum: f32 = weights.iter().map(|w| w.abs()).sum();
    if sum > 0.0 {
        for w in weights {
            *w /= sum;
        }
    }
}
