//! Chinese restaurant process mixture clustering by collapsed Gibbs sampling.
//!
//! The sampler is agnostic to the observation model: callers supply a
//! [`Likelihood`] returning, for one item, a weight per existing cluster and
//! one for a new cluster.  [`gaussian`] has two reference models.

pub mod categorical;
pub mod clust;
pub mod crp;
pub mod distr;
pub mod error;
pub mod gaussian;
pub mod mcmc;
pub mod prelude;
#[cfg(test)]
mod testing;
pub mod wgt;

pub use clust::{Cluster, ClusterId, Clustering};
pub use distr::{Dataset, Flat, Likelihood};
pub use error::{Error, Result};
pub use mcmc::{GibbsConfig, GibbsSampler, SweepReport};
pub use prelude::{Mass, Scale};
