use crate::clust::Clustering;

use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::HashMap;

/// Every set partition of `n_items` items as standardized labels
/// (restricted growth strings).
pub fn all_partitions(n_items: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    if n_items == 0 {
        result.push(Vec::new());
        return result;
    }
    let mut labels = vec![0; n_items];
    let mut max = vec![0; n_items];
    loop {
        result.push(labels.clone());
        // Find the rightmost position that can be incremented.
        let mut i = n_items - 1;
        while i > 0 && labels[i] > max[i - 1] {
            i -= 1;
        }
        if i == 0 {
            return result;
        }
        labels[i] += 1;
        max[i] = max[i - 1].max(labels[i]);
        for j in (i + 1)..n_items {
            labels[j] = 0;
            max[j] = max[i];
        }
    }
}

fn standardized(clustering: &Clustering) -> Vec<usize> {
    clustering
        .labels()
        .into_iter()
        .map(|x| x.unwrap_or(usize::MAX))
        .collect()
}

pub fn assert_goodness_of_fit(
    n_samples: usize,
    n_items: usize,
    mut sample: impl FnMut() -> Clustering,
    log_pmf: impl Fn(&Clustering) -> f64,
    n_calls_per_sample: usize,
    alpha: f64,
) -> Option<String> {
    let ns = n_samples as f64;
    let mut map = HashMap::new();
    for i in 0..(n_calls_per_sample * n_samples) {
        let s = sample();
        if (i + 1) % n_calls_per_sample == 0 {
            *map.entry(standardized(&s)).or_insert(0) += 1;
        }
    }
    let threshold = 5.0;
    let mut chisq = 0.0;
    let mut df = 0;
    let mut observed = 0;
    let mut expected = 0.0;
    for labels in all_partitions(n_items) {
        observed += *map.get(&labels).unwrap_or(&0);
        expected += ns * log_pmf(&Clustering::from_labels(&labels)).exp();
        if expected >= threshold {
            let o = observed as f64;
            chisq += (o - expected) * (o - expected) / expected;
            df += 1;
            observed = 0;
            expected = 0.0;
        }
    }
    let distr = ChiSquared::new((df - 1) as f64).unwrap();
    let p_value = 1.0 - distr.cdf(chisq);
    if p_value <= alpha {
        Some(format!(
            "Rejected goodness of fit test... p-value: {:.8}, chisq: {:.2}, df: {}",
            p_value, chisq, df
        ))
    } else {
        None
    }
}

pub fn assert_pmf_sums_to_one(n_items: usize, log_pmf: impl Fn(&Clustering) -> f64, epsilon: f64) {
    let sum: f64 = all_partitions(n_items)
        .iter()
        .map(|p| log_pmf(&Clustering::from_labels(p)).exp())
        .sum();
    assert!(
        1.0 - epsilon <= sum && sum <= 1.0 + epsilon,
        "Total probability should be one, but is {}.",
        sum
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_numbers() {
        let counts: Vec<_> = (0..7).map(|n| all_partitions(n).len()).collect();
        assert_eq!(counts, vec![1, 1, 2, 5, 15, 52, 203]);
        assert_eq!(
            all_partitions(3),
            vec![
                vec![0, 0, 0],
                vec![0, 0, 1],
                vec![0, 1, 0],
                vec![0, 1, 1],
                vec![0, 1, 2]
            ]
        );
    }
}
