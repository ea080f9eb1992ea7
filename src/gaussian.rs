// Gaussian likelihoods with known variance and a conjugate prior on the mean

use crate::clust::Clustering;
use crate::distr::Likelihood;
use crate::error::{Error, Result};
use crate::prelude::*;

use rand::Rng;
use rand_distr::{Distribution, Normal as NormalDistr};
use statrs::distribution::{Continuous, Normal};

/// Univariate observations `x ~ N(mu, scale^2)` with `mu ~ N(prior_mean,
/// prior_scale^2)`.  Each cluster is scored by its posterior predictive
/// density, a new cluster by the prior predictive.
#[derive(Debug, Clone, Copy)]
pub struct NormalKnownVariance {
    pub prior_mean: f64,
    pub prior_scale: Scale,
    pub scale: Scale,
}

impl NormalKnownVariance {
    pub fn new(prior_mean: f64, prior_scale: Scale, scale: Scale) -> Self {
        Self {
            prior_mean,
            prior_scale,
            scale,
        }
    }

    fn predictive_density(&self, n: usize, sum: f64, x: f64) -> f64 {
        predictive_density(self.prior_mean, self.prior_scale, self.scale, n, sum, x)
    }
}

// Density at `x` of the posterior predictive after `n` observations summing
// to `sum`.
fn predictive_density(
    prior_mean: f64,
    prior_scale: Scale,
    scale: Scale,
    n: usize,
    sum: f64,
    x: f64,
) -> f64 {
    let precision = 1.0 / prior_scale.variance() + n as f64 / scale.variance();
    let mean = (prior_mean / prior_scale.variance() + sum / scale.variance()) / precision;
    let sd = (1.0 / precision + scale.variance()).sqrt();
    Normal::new(mean, sd).map_or(f64::NAN, |d| d.pdf(x))
}

impl Likelihood<[f64]> for NormalKnownVariance {
    fn evaluate(&self, data: &[f64], item: usize, clustering: &Clustering) -> Vec<f64> {
        let x = data[item];
        let mut result: Vec<f64> = clustering
            .clusters()
            .map(|(_, cluster)| {
                let sum: f64 = cluster.items().map(|j| data[j]).sum();
                self.predictive_density(cluster.size(), sum, x)
            })
            .collect();
        result.push(self.predictive_density(0, 0.0, x));
        result
    }
}

/// Vector observations whose coordinates follow `NormalKnownVariance`
/// independently, each with its own prior mean.
#[derive(Debug, Clone)]
pub struct DiagonalNormalKnownVariance {
    pub prior_mean: Vec<f64>,
    pub prior_scale: Scale,
    pub scale: Scale,
}

impl DiagonalNormalKnownVariance {
    pub fn new(prior_mean: Vec<f64>, prior_scale: Scale, scale: Scale) -> Self {
        Self {
            prior_mean,
            prior_scale,
            scale,
        }
    }

    fn predictive_density(&self, data: &[Vec<f64>], items: &[usize], x: &[f64]) -> f64 {
        if x.len() != self.prior_mean.len() {
            return f64::NAN;
        }
        let mut density = 1.0;
        for (d, (xd, m)) in x.iter().zip(&self.prior_mean).enumerate() {
            let mut sum = 0.0;
            for j in items {
                match data[*j].get(d) {
                    Some(v) => sum += v,
                    None => return f64::NAN,
                }
            }
            density *=
                predictive_density(*m, self.prior_scale, self.scale, items.len(), sum, *xd);
        }
        density
    }
}

impl Likelihood<[Vec<f64>]> for DiagonalNormalKnownVariance {
    fn evaluate(&self, data: &[Vec<f64>], item: usize, clustering: &Clustering) -> Vec<f64> {
        let x = &data[item][..];
        let mut result: Vec<f64> = clustering
            .cluster_ids()
            .map(|id| self.predictive_density(data, &clustering.items_of(id), x))
            .collect();
        result.push(self.predictive_density(data, &[], x));
        result
    }
}

/// Draws `n_per_component` points around each mean, returned with the index
/// of the generating component.
pub fn synthetic_mixture<R: Rng + ?Sized>(
    means: &[f64],
    scale: Scale,
    n_per_component: usize,
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<usize>)> {
    let mut data = Vec::with_capacity(means.len() * n_per_component);
    let mut labels = Vec::with_capacity(data.capacity());
    for (k, mean) in means.iter().enumerate() {
        let distr = normal(*mean, scale)?;
        for _ in 0..n_per_component {
            data.push(distr.sample(rng));
            labels.push(k);
        }
    }
    Ok((data, labels))
}

pub fn synthetic_mixture_nd<R: Rng + ?Sized>(
    means: &[Vec<f64>],
    scale: Scale,
    n_per_component: usize,
    rng: &mut R,
) -> Result<(Vec<Vec<f64>>, Vec<usize>)> {
    let mut data = Vec::with_capacity(means.len() * n_per_component);
    let mut labels = Vec::with_capacity(data.capacity());
    for (k, mean) in means.iter().enumerate() {
        let distrs = mean
            .iter()
            .map(|m| normal(*m, scale))
            .collect::<Result<Vec<_>>>()?;
        for _ in 0..n_per_component {
            data.push(distrs.iter().map(|d| d.sample(rng)).collect());
            labels.push(k);
        }
    }
    Ok((data, labels))
}

fn normal(mean: f64, scale: Scale) -> Result<NormalDistr<f64>> {
    if !mean.is_finite() {
        return Err(Error::InvalidConfiguration {
            name: "mean",
            message: "must be finite",
        });
    }
    NormalDistr::new(mean, scale.unwrap()).map_err(|_| Error::InvalidConfiguration {
        name: "scale",
        message: "must be finite and greater than zero",
    })
}
