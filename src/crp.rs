// Chinese restaurant process

use crate::categorical;
use crate::clust::Clustering;
use crate::error::Result;
use crate::prelude::*;
use crate::wgt::Weights;

use rand::Rng;
use statrs::function::gamma::ln_gamma;

/// Prior weights for joining each cluster of `clustering` (in cluster order)
/// followed by the weight for a new cluster, given `n` other allocated items.
pub fn prior_weights(n: usize, alpha: f64, clustering: &Clustering) -> Vec<f64> {
    let denominator = n as f64 + alpha;
    let mut weights: Vec<f64> = clustering
        .clusters()
        .map(|(_, cluster)| cluster.size() as f64 / denominator)
        .collect();
    weights.push(alpha / denominator);
    weights
}

/// Draws a partition from the CRP by sequential seating.  Together with
/// `log_pmf` this checks `prior_weights` against the closed-form prior; the
/// sampler itself does not use it.
pub fn sample<T: Rng + ?Sized>(n_items: usize, mass: Mass, rng: &mut T) -> Result<Clustering> {
    let mut clustering = Clustering::unallocated(n_items);
    for i in 0..n_items {
        let probs = Weights::from(&prior_weights(i, mass.unwrap(), &clustering))?.normalize()?;
        let k = categorical::sample(&probs, rng)?;
        match clustering.id_at(k) {
            Some(id) => clustering.allocate(i, id)?,
            None => {
                clustering.new_cluster(i)?;
            }
        }
    }
    Ok(clustering)
}

/// Log probability of a partition under the CRP with the given mass.
pub fn log_pmf(x: &Clustering, mass: Mass) -> f64 {
    let ni = x.n_items() as f64;
    let ns = x.n_clusters() as f64;
    let m = mass.unwrap();
    let mut result = ns * mass.ln() + ln_gamma(m) - ln_gamma(m + ni);
    for size in x.sizes() {
        result += ln_gamma(size as f64);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_prior_weights() {
        let clustering = Clustering::from_labels(&[0, 0, 1]);
        let w = prior_weights(3, 1.0, &clustering);
        assert_eq!(w, vec![0.5, 0.25, 0.25]);
        let w = prior_weights(0, 2.0, &Clustering::unallocated(4));
        assert_eq!(w, vec![1.0]);
    }

    #[test]
    fn test_prior_weights_with_zero_mass() {
        let clustering = Clustering::from_labels(&[0, 1, 1]);
        assert_eq!(prior_weights(3, 0.0, &clustering), vec![1.0 / 3.0, 2.0 / 3.0, 0.0]);
    }

    #[test]
    fn test_goodness_of_fit_constructive() {
        let n_items = 5;
        let mass = Mass::new(2.0).unwrap();
        let rng = &mut Pcg64Mcg::seed_from_u64(0x5eed);
        let sample_closure = || sample(n_items, mass, rng).unwrap();
        let log_prob_closure = |clustering: &Clustering| log_pmf(clustering, mass);
        if let Some(msg) = crate::testing::assert_goodness_of_fit(
            100000,
            n_items,
            sample_closure,
            log_prob_closure,
            1,
            0.001,
        ) {
            panic!("{}", msg);
        }
    }

    #[test]
    fn test_pmf() {
        let mass = Mass::new(1.5).unwrap();
        let log_prob_closure = |clustering: &Clustering| log_pmf(clustering, mass);
        crate::testing::assert_pmf_sums_to_one(5, log_prob_closure, 0.0000001);
    }

    #[test]
    fn test_single_item() {
        let rng = &mut Pcg64Mcg::seed_from_u64(9);
        let clustering = sample(1, Mass::new(0.1).unwrap(), rng).unwrap();
        assert_eq!(clustering.sizes(), vec![1]);
        assert!((log_pmf(&clustering, Mass::new(0.1).unwrap())).abs() < 1e-12);
    }
}
