use rayon::prelude::*;
use crate::{KMeansError, Sample};

/// Whether **a** matches **b** within a tolerance.
///
/// R, G and B of **a** each have to lie in `[b - th, b + th]` (on the widened 16-bit channels,
/// saturating at the range boundaries). Alpha has to match exactly.
pub fn colors_match<A: Sample, B: Sample>(th: u32, a: &A, b: &B) -> bool {
    let (a, b) = (a.rgba(), b.rgba());
    a[0..3].iter().zip(b[0..3].iter())
        .all(|(&ac, &bc)| ac >= bc.saturating_sub(th) && ac <= bc.saturating_add(th))
        && a[3] == b[3]
}

/// Result of [`classify_by_centroids`]: the share of observations belonging to each named color group.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedPalette {
    entries: Vec<(String, f64)>,
    unmatched: f64,
}
impl NamedPalette {
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Weight of the group with the given name, 0 if there is no such group.
    /// If several groups share a name, the first one is reported.
    pub fn weight(&self, name: &str) -> f64 {
        self.entries.iter()
            .find(|(n, _)| n == name)
            .map_or(0.0, |&(_, w)| w)
    }

    /// Share of observations that matched none of the groups.
    pub fn unmatched(&self) -> f64 { self.unmatched }

    /// Entries in the order the groups were given, including groups without any match.
    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.entries.iter()
    }

    /// Entries ordered by descending weight. Equal weights keep the given order.
    pub fn sorted_by_weight(&self) -> Vec<(String, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|(_, w0), (_, w1)| w1.total_cmp(w0));
        sorted
    }
}

/// Classify **observations** against named groups of reference colors instead of clustering them.
///
/// Every observation is counted for the first group (in the given order) containing a color that
/// [matches](colors_match) it within **th**. Observations matching no group are reported as
/// [`NamedPalette::unmatched`]. Weights are relative to the total amount of observations.
///
/// ## Errors
/// - [`KMeansError::InvalidParameter`] for no observations or no groups
pub fn classify_by_centroids<S: Sample, N: AsRef<str> + Sync>(th: u32, observations: &[S], centroids: &[(N, Vec<S>)]) -> Result<NamedPalette, KMeansError> {
    if observations.is_empty() {
        return Err(KMeansError::InvalidParameter("observations must not be empty"));
    }
    if centroids.is_empty() {
        return Err(KMeansError::InvalidParameter("centroids must not be empty"));
    }

    let groups: Vec<Option<usize>> = observations.par_iter()
        .map(|o| centroids.iter().position(|(_, colors)| colors.iter().any(|c| colors_match(th, o, c))))
        .collect();
    let mut counts = vec![0usize; centroids.len()];
    let mut unmatched = 0usize;
    groups.into_iter().for_each(|group| match group {
        Some(idx) => counts[idx] += 1,
        None => unmatched += 1,
    });
    log::debug!("classified {} observations into {} groups, {} unmatched", observations.len(), centroids.len(), unmatched);

    let total = observations.len() as f64;
    Ok(NamedPalette {
        entries: centroids.iter().zip(counts)
            .map(|((name, _), cnt)| (name.as_ref().to_owned(), cnt as f64 / total))
            .collect(),
        unmatched: unmatched as f64 / total,
    })
}
