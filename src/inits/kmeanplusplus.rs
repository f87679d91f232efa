use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Sample};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rayon::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<S: Sample, D: DistanceFunction>(kmean: &KMeans<S, D>, state: &mut KMeansState<S>, config: &KMeansConfig<'_, S>) -> Result<(), KMeansError> {
    let mut rnd = config.rnd.borrow_mut();
    state.centroids.clear();

    // Randomly select first centroid
    let first_idx = rnd.gen_range(0, kmean.sample_cnt);
    state.centroids.push(kmean.samples[first_idx]);

    for k in 1..state.k {
        // For each following centroid...
        // Calculate distances & update cluster-assignments against the centroids chosen so far
        kmean.update_cluster_assignments(state, Some(k));

        // Use rand's WeightedIndex to randomly draw a centroid, with probabilities proportional to the distances.
        // When all samples coincide with a centroid, there is nothing to weight -> draw uniformly.
        let sampled_centroid_id = match WeightedIndex::new(state.centroid_distances.par_iter().cloned().collect::<Vec<u64>>()) {
            Ok(centroid_index) => centroid_index.sample(rnd.deref_mut()),
            Err(_) => rnd.gen_range(0, kmean.sample_cnt),
        };
        state.centroids.push(kmean.samples[sampled_centroid_id]);
    }
    log::debug!("kmeans++ selected {} centroids", state.centroids.len());
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_distinct_groups() {
        // Three well separated colors: kmeans++ can never pick a second sample of an already chosen color,
        // because its distance (and therefore its probability) is 0.
        let red = [255u8, 0, 0, 255];
        let green = [0u8, 255, 0, 255];
        let blue = [0u8, 0, 255, 255];
        let samples: Vec<[u8; 4]> = (0..30).map(|i| [red, green, blue][i % 3]).collect();
        let kmean = KMeans::new(samples);
        for seed in 0..20 {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let mut state = KMeansState::new(kmean.sample_cnt, 3);
            calculate(&kmean, &mut state, &conf).unwrap();
            let mut centroids = state.centroids.clone();
            centroids.sort();
            assert_eq!(centroids, {
                let mut should = vec![red, green, blue];
                should.sort();
                should
            });
        }
    }

    #[test]
    fn identical_samples() {
        let kmean = KMeans::new(vec![[9u8, 9, 9, 9]; 10]);
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1)).build();
        let mut state = KMeansState::new(kmean.sample_cnt, 4);
        calculate(&kmean, &mut state, &conf).unwrap();
        assert_eq!(state.centroids, vec![[9u8, 9, 9, 9]; 4]);
    }
}
