use crate::error::{Error, Result};

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Allowed deviation of a probability vector's sum from one.
pub const TOLERANCE: f64 = 1e-9;

/// Draws an index with the given probabilities.
pub fn sample<R: Rng + ?Sized>(probs: &[f64], rng: &mut R) -> Result<usize> {
    if probs.is_empty() {
        return Err(Error::InvalidProbabilityVector {
            reason: "probability vector is empty",
        });
    }
    let mut sum = 0.0;
    for p in probs {
        if !p.is_finite() {
            return Err(Error::InvalidProbabilityVector {
                reason: "probability is not finite",
            });
        }
        if *p < 0.0 {
            return Err(Error::InvalidProbabilityVector {
                reason: "probability is negative",
            });
        }
        sum += p;
    }
    if (sum - 1.0).abs() > TOLERANCE {
        return Err(Error::InvalidProbabilityVector {
            reason: "probabilities do not sum to one",
        });
    }
    let dist: WeightedIndex<f64> =
        WeightedIndex::new(probs).map_err(|_| Error::InvalidProbabilityVector {
            reason: "probabilities cannot be sampled",
        })?;
    Ok(dist.sample(rng))
}
