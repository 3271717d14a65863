use crate::bio::taxonomy::{DescendantSet, TaxonId, TaxonomyGraph};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// Sizes of the sets involved in building a [`Whitelist`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WhitelistStats {
    /// Taxa below any include root
    pub included: usize,
    /// Taxa below any exclude root
    pub excluded: usize,
    /// Taxa left after subtracting the excluded set
    pub whitelisted: usize,
}

/// Union of the descendant sets of several roots.
///
/// Roots are expanded in parallel over the shared, read-only graph and the
/// per-worker sets are merged at the end.
pub fn aggregate_descendants(graph: &TaxonomyGraph, roots: &[TaxonId]) -> DescendantSet {
    roots
        .par_iter()
        .map(|&root| {
            if !graph.has_children(root) {
                tracing::warn!("Taxon {} has no children in the taxonomy", root);
            }
            graph.descendants(root)
        })
        .reduce(DescendantSet::new, |a, b| {
            let (mut larger, smaller) = if a.len() >= b.len() { (a, b) } else { (b, a) };
            larger.extend(smaller);
            larger
        })
}

/// Taxa whose catalog records are emitted: include descendants minus exclude descendants
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    taxa: HashSet<TaxonId>,
}

impl Whitelist {
    pub fn build(
        graph: &TaxonomyGraph,
        include: &[TaxonId],
        exclude: &[TaxonId],
    ) -> (Self, WhitelistStats) {
        let mut taxa = aggregate_descendants(graph, include);
        let excluded = aggregate_descendants(graph, exclude);
        let included = taxa.len();

        taxa.retain(|taxon_id| !excluded.contains(taxon_id));

        let stats = WhitelistStats {
            included,
            excluded: excluded.len(),
            whitelisted: taxa.len(),
        };
        tracing::info!(
            included = stats.included,
            excluded = stats.excluded,
            whitelisted = stats.whitelisted,
            "whitelist computed"
        );

        (Self { taxa }, stats)
    }

    #[inline]
    pub fn contains(&self, taxon_id: TaxonId) -> bool {
        self.taxa.contains(&taxon_id)
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    /// Members in ascending order, for reproducible dumps
    pub fn sorted(&self) -> Vec<TaxonId> {
        let mut ids: Vec<TaxonId> = self.taxa.iter().copied().collect();
        ids.par_sort_unstable();
        ids
    }
}

impl FromIterator<TaxonId> for Whitelist {
    fn from_iter<I: IntoIterator<Item = TaxonId>>(iter: I) -> Self {
        Self {
            taxa: iter.into_iter().collect(),
        }
    }
}
