use crate::categorical;
use crate::clust::Clustering;
use crate::crp::prior_weights;
use crate::distr::{Dataset, Likelihood};
use crate::error::{Error, Result};
use crate::prelude::*;
use crate::wgt::Weights;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::{debug, info, warn};

/// Settings of a `GibbsSampler`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GibbsConfig {
    /// Initial concentration of the Chinese restaurant process.
    pub alpha: Mass,
    /// Number of full sweeps over all items.
    pub num_iter: usize,
    /// Sweep index after which the concentration is re-estimated.
    pub eb_start: usize,
    /// Stride, in sweeps, of the re-estimation.
    pub eb_interval: usize,
}

impl GibbsConfig {
    pub fn new(alpha: Mass) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    pub fn with_num_iter(mut self, num_iter: usize) -> Self {
        self.num_iter = num_iter;
        self
    }

    pub fn with_eb_start(mut self, eb_start: usize) -> Self {
        self.eb_start = eb_start;
        self
    }

    pub fn with_eb_interval(mut self, eb_interval: usize) -> Self {
        self.eb_interval = eb_interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_iter == 0 {
            return Err(Error::InvalidConfiguration {
                name: "num_iter",
                message: "must be greater than zero",
            });
        }
        if self.eb_interval == 0 {
            return Err(Error::InvalidConfiguration {
                name: "eb_interval",
                message: "must be greater than zero",
            });
        }
        Ok(())
    }
}

impl Default for GibbsConfig {
    fn default() -> Self {
        Self {
            alpha: Mass::ONE,
            num_iter: 100,
            eb_start: 20,
            eb_interval: 5,
        }
    }
}

/// State visible to an observer after each completed sweep.
#[derive(Debug)]
pub struct SweepReport<'a> {
    pub sweep: usize,
    /// Concentration after any re-estimation at this sweep.
    pub alpha: f64,
    pub new_clusters: usize,
    pub clustering: &'a Clustering,
}

/// Collapsed Gibbs sampler for a Chinese restaurant process mixture.
///
/// Items are visited in ascending order.  The concentration is sampler state:
/// after sweep `t` with `t % eb_interval == 0` and `t > eb_start`, it is
/// replaced by the number of clusters created during that sweep.  That count
/// may be zero, after which no new cluster can ever be created.
#[derive(Debug, Clone)]
pub struct GibbsSampler<L> {
    config: GibbsConfig,
    alpha: f64,
    likelihood: L,
}

impl<L> GibbsSampler<L> {
    pub fn new(config: GibbsConfig, likelihood: L) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alpha: config.alpha.unwrap(),
            config,
            likelihood,
        })
    }

    pub fn config(&self) -> &GibbsConfig {
        &self.config
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn likelihood(&self) -> &L {
        &self.likelihood
    }

    fn eb_due(&self, sweep: usize) -> bool {
        sweep % self.config.eb_interval == 0 && sweep > self.config.eb_start
    }
}

impl<L> GibbsSampler<L> {
    pub fn fit<D, R>(&mut self, data: &D, rng: &mut R) -> Result<Clustering>
    where
        D: Dataset + ?Sized,
        L: Likelihood<D>,
        R: Rng + ?Sized,
    {
        self.fit_with(data, rng, |_| {})
    }

    pub fn fit_seeded<D>(&mut self, data: &D, seed: u64) -> Result<Clustering>
    where
        D: Dataset + ?Sized,
        L: Likelihood<D>,
    {
        let rng = &mut Pcg64Mcg::seed_from_u64(seed);
        self.fit(data, rng)
    }

    /// Like `fit`, calling `observer` after every sweep.  Every run starts from
    /// the configured concentration.
    pub fn fit_with<D, R, F>(
        &mut self,
        data: &D,
        rng: &mut R,
        mut observer: F,
    ) -> Result<Clustering>
    where
        D: Dataset + ?Sized,
        L: Likelihood<D>,
        R: Rng + ?Sized,
        F: FnMut(&SweepReport),
    {
        self.alpha = self.config.alpha.unwrap();
        debug!(
            n_items = data.n_items(),
            alpha = self.alpha,
            num_iter = self.config.num_iter,
            "fitting"
        );
        let mut clustering = self.initialize(data, rng)?;
        for t in 0..self.config.num_iter {
            let new_clusters = self.sweep(t, &mut clustering, data, rng)?;
            observer(&SweepReport {
                sweep: t,
                alpha: self.alpha,
                new_clusters,
                clustering: &clustering,
            });
        }
        debug!(
            n_clusters = clustering.n_clusters(),
            alpha = self.alpha,
            "fit finished"
        );
        Ok(clustering)
    }

    /// Sequential construction: item `i` sees only items `0..i`.
    pub fn initialize<D, R>(&self, data: &D, rng: &mut R) -> Result<Clustering>
    where
        D: Dataset + ?Sized,
        L: Likelihood<D>,
        R: Rng + ?Sized,
    {
        let mut clustering = Clustering::unallocated(data.n_items());
        for i in 0..clustering.n_items() {
            self.place(i, i, &mut clustering, data, rng)?;
        }
        Ok(clustering)
    }

    /// One pass over all items, each conditioned on the other `N-1`.  Applies
    /// the concentration update due at sweep `t` and returns the number of
    /// clusters created.
    pub fn sweep<D, R>(
        &mut self,
        t: usize,
        clustering: &mut Clustering,
        data: &D,
        rng: &mut R,
    ) -> Result<usize>
    where
        D: Dataset + ?Sized,
        L: Likelihood<D>,
        R: Rng + ?Sized,
    {
        let n_items = clustering.n_items();
        if n_items != data.n_items() {
            return Err(Error::InvalidConfiguration {
                name: "clustering",
                message: "number of items differs from the data",
            });
        }
        let mut new_clusters = 0;
        for i in 0..n_items {
            clustering.remove(i)?;
            if self.place(i, n_items - 1, clustering, data, rng)? {
                new_clusters += 1;
            }
        }
        debug!(
            sweep = t,
            n_clusters = clustering.n_clusters(),
            new_clusters,
            "sweep"
        );
        if self.eb_due(t) {
            let old = self.alpha;
            self.alpha = new_clusters as f64;
            info!(sweep = t, old, new = self.alpha, "re-estimated concentration");
            if new_clusters == 0 {
                warn!(sweep = t, "concentration is zero; no new clusters can form");
            }
        }
        Ok(new_clusters)
    }

    // Allocates the unallocated `item` given `n` other allocated items.
    // Returns whether a new cluster was created.
    fn place<D, R>(
        &self,
        item: usize,
        n: usize,
        clustering: &mut Clustering,
        data: &D,
        rng: &mut R,
    ) -> Result<bool>
    where
        D: Dataset + ?Sized,
        L: Likelihood<D>,
        R: Rng + ?Sized,
    {
        let prior = prior_weights(n, self.alpha, clustering);
        let likelihood = self.likelihood.evaluate(data, item, clustering);
        let probs = Weights::combine(&prior, &likelihood)?.normalize()?;
        let k = categorical::sample(&probs, rng)?;
        match clustering.id_at(k) {
            Some(id) => {
                clustering.allocate(item, id)?;
                Ok(false)
            }
            None => {
                clustering.new_cluster(item)?;
                Ok(true)
            }
        }
    }
}
