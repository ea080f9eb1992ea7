use crate::error::{Error, Result};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Handle of a cluster within one `Clustering`.  Handles are never reused, so
/// ordering by id is ordering by creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(usize);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A non-empty set of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    items: BTreeSet<usize>,
}

impl Cluster {
    fn singleton(item: usize) -> Self {
        let mut items = BTreeSet::new();
        items.insert(item);
        Self { items }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, item: usize) -> bool {
        self.items.contains(&item)
    }

    pub fn items(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }
}

/// A partition of `n_items` items into clusters stored by id, with each item
/// recording the id of the cluster holding it.
#[derive(Debug, Clone)]
pub struct Clustering {
    clusters: BTreeMap<ClusterId, Cluster>,
    assignment: Vec<Option<ClusterId>>,
    next_id: usize,
}

impl Clustering {
    pub fn unallocated(n_items: usize) -> Self {
        Self {
            clusters: BTreeMap::new(),
            assignment: vec![None; n_items],
            next_id: 0,
        }
    }

    pub fn one_cluster(n_items: usize) -> Self {
        Self::from_labels(&vec![0; n_items])
    }

    pub fn singletons(n_items: usize) -> Self {
        Self::from_labels(&(0..n_items).collect::<Vec<_>>())
    }

    /// Builds a clustering from arbitrary labels.  Clusters are created in order
    /// of first appearance.
    pub fn from_labels(labels: &[usize]) -> Self {
        let mut clustering = Self::unallocated(labels.len());
        let mut map = HashMap::new();
        for (item, label) in labels.iter().enumerate() {
            match map.get(label) {
                Some(&id) => clustering.attach(item, id),
                None => {
                    let id = clustering.spawn(item);
                    map.insert(*label, id);
                }
            }
        }
        clustering
    }

    pub fn n_items(&self) -> usize {
        self.assignment.len()
    }

    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    pub fn n_allocated(&self) -> usize {
        self.assignment.iter().filter(|x| x.is_some()).count()
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    pub fn clusters(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> + '_ {
        self.clusters.iter().map(|(id, cluster)| (*id, cluster))
    }

    pub fn cluster_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.clusters.keys().copied()
    }

    /// Cluster sizes in cluster order.
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.values().map(Cluster::size).collect()
    }

    pub fn size_of(&self, id: ClusterId) -> usize {
        self.clusters.get(&id).map_or(0, Cluster::size)
    }

    pub fn cluster_of(&self, item: usize) -> Option<ClusterId> {
        self.assignment.get(item).copied().flatten()
    }

    pub fn assignment(&self) -> &[Option<ClusterId>] {
        &self.assignment[..]
    }

    /// The id of the `position`-th cluster in cluster order.
    pub fn id_at(&self, position: usize) -> Option<ClusterId> {
        self.clusters.keys().nth(position).copied()
    }

    pub fn items_of(&self, id: ClusterId) -> Vec<usize> {
        self.clusters
            .get(&id)
            .map(|c| c.items().collect())
            .unwrap_or_default()
    }

    /// Places an unallocated item in a new singleton cluster.
    pub fn new_cluster(&mut self, item: usize) -> Result<ClusterId> {
        self.check_unallocated(item)?;
        Ok(self.spawn(item))
    }

    /// Places an unallocated item in an existing cluster.
    pub fn allocate(&mut self, item: usize, id: ClusterId) -> Result<()> {
        self.check_unallocated(item)?;
        if !self.clusters.contains_key(&id) {
            return Err(Error::InvalidAllocation {
                item,
                message: "no cluster with that id",
            });
        }
        self.attach(item, id);
        Ok(())
    }

    /// Detaches an item from its cluster, deleting the cluster if it becomes
    /// empty.  Returns the id of the cluster the item left.
    pub fn remove(&mut self, item: usize) -> Result<ClusterId> {
        let id = match self.assignment.get_mut(item) {
            Some(slot) => slot.take().ok_or(Error::InvalidAllocation {
                item,
                message: "item is not allocated",
            })?,
            None => {
                return Err(Error::InvalidAllocation {
                    item,
                    message: "item is out of range",
                })
            }
        };
        if let Some(cluster) = self.clusters.get_mut(&id) {
            cluster.items.remove(&item);
            if cluster.items.is_empty() {
                self.clusters.remove(&id);
            }
        }
        Ok(id)
    }

    /// Labels `0, 1, ...` in order of first appearance; `None` for unallocated
    /// items.
    pub fn labels(&self) -> Vec<Option<usize>> {
        let mut map = HashMap::new();
        self.assignment
            .iter()
            .map(|id| {
                id.map(|id| {
                    let next = map.len();
                    *map.entry(id).or_insert(next)
                })
            })
            .collect()
    }

    /// Whether the clusters partition all items exactly once, none is empty,
    /// and every item's id names the cluster containing it.
    pub fn is_valid(&self) -> bool {
        let mut seen = vec![false; self.n_items()];
        for (id, cluster) in self.clusters() {
            if cluster.size() == 0 {
                return false;
            }
            for item in cluster.items() {
                if item >= seen.len() || seen[item] || self.cluster_of(item) != Some(id) {
                    return false;
                }
                seen[item] = true;
            }
        }
        seen.into_iter().all(|x| x)
    }

    fn check_unallocated(&self, item: usize) -> Result<()> {
        match self.assignment.get(item) {
            None => Err(Error::InvalidAllocation {
                item,
                message: "item is out of range",
            }),
            Some(Some(_)) => Err(Error::InvalidAllocation {
                item,
                message: "item is already allocated",
            }),
            Some(None) => Ok(()),
        }
    }

    fn spawn(&mut self, item: usize) -> ClusterId {
        let id = ClusterId(self.next_id);
        self.next_id += 1;
        self.clusters.insert(id, Cluster::singleton(item));
        self.assignment[item] = Some(id);
        id
    }

    fn attach(&mut self, item: usize, id: ClusterId) {
        if let Some(cluster) = self.clusters.get_mut(&id) {
            cluster.items.insert(item);
            self.assignment[item] = Some(id);
        }
    }
}
