use crate::error::{Error, Result};

/// Unnormalized selection weights: prior times likelihood, one per candidate.
#[derive(Debug, Clone)]
pub struct Weights(Vec<f64>);

impl Weights {
    pub fn from(w: &[f64]) -> Result<Weights> {
        for ww in w.iter() {
            check(*ww)?;
        }
        Ok(Weights(Vec::from(w)))
    }

    /// Elementwise product of prior and likelihood weights.  The likelihood
    /// must have exactly as many entries as the prior.
    pub fn combine(prior: &[f64], likelihood: &[f64]) -> Result<Weights> {
        if prior.len() != likelihood.len() {
            return Err(Error::ContractViolation {
                expected: prior.len(),
                found: likelihood.len(),
            });
        }
        let mut w = Vec::with_capacity(prior.len());
        for (p, l) in prior.iter().zip(likelihood) {
            check(*l)?;
            let product = p * l;
            check(product)?;
            w.push(product);
        }
        Ok(Weights(w))
    }

    pub fn normalize(self) -> Result<Vec<f64>> {
        let sum: f64 = self.0.iter().sum();
        if !sum.is_finite() {
            return Err(Error::InvalidProbabilityVector {
                reason: "weights sum to a non-finite value",
            });
        }
        if sum <= 0.0 {
            return Err(Error::InvalidProbabilityVector {
                reason: "weights sum to zero",
            });
        }
        Ok(self.0.into_iter().map(|x| x / sum).collect())
    }
}

fn check(x: f64) -> Result<()> {
    if x.is_nan() || x.is_infinite() {
        Err(Error::InvalidProbabilityVector {
            reason: "weight is not finite",
        })
    } else if x < 0.0 {
        Err(Error::InvalidProbabilityVector {
            reason: "weight is negative",
        })
    } else {
        Ok(())
    }
}
