use crate::Sample;

/// Result of a palette extraction: representative colors, each with the share of samples it represents.
///
/// Weights lie in `(0, 1]` and sum up to 1. Every color appears only once.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette<S: Sample> {
    entries: Vec<(S, f64)>,
}
impl<S: Sample> Palette<S> {
    /// Turn the final cluster sizes into weights.
    ///
    /// ## Arguments
    /// - **centroids**: Centroid of each cluster slot
    /// - **frequencies**: Amount of samples in each cluster slot
    /// - **sample_cnt**: Total amount of samples
    ///
    /// Empty slots are skipped, slots with equal centroids are merged into one entry.
    pub(crate) fn from_clusters(centroids: &[S], frequencies: &[usize], sample_cnt: usize) -> Self {
        debug_assert_eq!(centroids.len(), frequencies.len());
        debug_assert!(sample_cnt > 0);
        let mut counts: Vec<(S, usize)> = Vec::with_capacity(centroids.len());
        for (&centroid, &freq) in centroids.iter().zip(frequencies.iter()) {
            if freq == 0 {
                continue;
            }
            match counts.iter_mut().find(|(c, _)| *c == centroid) {
                Some((_, cnt)) => *cnt += freq,
                None => counts.push((centroid, freq)),
            }
        }
        let total = sample_cnt as f64;
        Self {
            entries: counts.into_iter().map(|(c, cnt)| (c, cnt as f64 / total)).collect()
        }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Colors of this palette, in cluster order.
    pub fn colors(&self) -> Vec<S> {
        self.entries.iter().map(|&(c, _)| c).collect()
    }

    /// Weight of the given color, 0 if it is not part of the palette.
    pub fn weight(&self, color: &S) -> f64 {
        self.entries.iter()
            .find(|(c, _)| c == color)
            .map_or(0.0, |&(_, w)| w)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(S, f64)> {
        self.entries.iter()
    }

    /// Entries ordered by descending weight. Equal weights keep cluster order.
    pub fn sorted_by_weight(&self) -> Vec<(S, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|(_, w0), (_, w1)| w1.total_cmp(w0));
        sorted
    }

    /// The color covering the most samples.
    pub fn dominant(&self) -> Option<S> {
        self.sorted_by_weight().first().map(|&(c, _)| c)
    }
}

impl<S: Sample> IntoIterator for Palette<S> {
    type Item = (S, f64);
    type IntoIter = std::vec::IntoIter<(S, f64)>;
    fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}
