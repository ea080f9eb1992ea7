use crate::clust::Clustering;

/// Anything that holds a fixed number of items the sampler can cluster.
pub trait Dataset {
    fn n_items(&self) -> usize;
}

impl<T> Dataset for [T] {
    fn n_items(&self) -> usize {
        self.len()
    }
}

impl<T> Dataset for Vec<T> {
    fn n_items(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Dataset for [T; N] {
    fn n_items(&self) -> usize {
        N
    }
}

/// Likelihood of one item under each existing cluster and under a new one.
pub trait Likelihood<D: ?Sized> {
    // The item is unallocated in the clustering.  Must return one value per
    // cluster, in cluster order, followed by the value for a new cluster.
    fn evaluate(&self, data: &D, item: usize, clustering: &Clustering) -> Vec<f64>;
}

impl<D, F> Likelihood<D> for F
where
    D: ?Sized,
    F: Fn(&D, usize, &Clustering) -> Vec<f64>,
{
    fn evaluate(&self, data: &D, item: usize, clustering: &Clustering) -> Vec<f64> {
        self(data, item, clustering)
    }
}

/// A likelihood that ignores the data, so the sampler targets the prior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flat;

impl<D: ?Sized> Likelihood<D> for Flat {
    fn evaluate(&self, _data: &D, _item: usize, clustering: &Clustering) -> Vec<f64> {
        vec![1.0; clustering.n_clusters() + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_likelihood() {
        let l = |data: &[f64], item: usize, clustering: &Clustering| {
            vec![data[item]; clustering.n_clusters() + 1]
        };
        let clustering = Clustering::from_labels(&[0, 1]);
        assert_eq!(l.evaluate(&[2.0, 3.0][..], 1, &clustering), vec![3.0; 3]);
        assert_eq!(Flat.evaluate(&[0u8; 2][..], 0, &clustering), vec![1.0; 3]);
    }

    #[test]
    fn test_dataset() {
        assert_eq!(vec![1, 2, 3].n_items(), 3);
        assert_eq!([0.0; 4].n_items(), 4);
        assert_eq!([1.0, 2.0][..].n_items(), 2);
    }
}
