use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Sample};
use rand::prelude::*;

#[inline(always)]
pub fn calculate<S: Sample, D: DistanceFunction>(kmean: &KMeans<S, D>, state: &mut KMeansState<S>, config: &KMeansConfig<'_, S>) -> Result<(), KMeansError> {
    let mut rnd = config.rnd.borrow_mut();
    let k = state.k;

    state.assignments.iter_mut().for_each(|a| *a = rnd.gen_range(0, k));
    kmean.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);

    // Each partition is represented by its medoid. Partitions that stayed empty get a random sample.
    let partitions = kmean.cluster_members(&state.assignments, k);
    state.centroids = partitions.iter()
        .map(|members| match kmean.update_centroid(members) {
            Some(centroid) => centroid,
            None => kmean.samples[rnd.gen_range(0, kmean.sample_cnt)],
        })
        .collect();
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroids_are_partition_medoids() {
        let samples: Vec<[u16; 4]> = (0..200u16).map(|v| [v * 300, v * 100, 0, 0xffff]).collect();
        let kmean = KMeans::new(samples.clone());
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
        let mut state = KMeansState::new(kmean.sample_cnt, 4);
        calculate(&kmean, &mut state, &conf).unwrap();

        assert_eq!(state.centroids.len(), 4);
        assert_eq!(state.centroid_frequency.iter().sum::<usize>(), 200);
        for (slot, centroid) in state.centroids.iter().enumerate() {
            let members: Vec<[u16; 4]> = state.assignments.iter().enumerate()
                .filter(|&(_, &a)| a == slot)
                .map(|(i, _)| samples[i])
                .collect();
            assert_eq!(Some(*centroid), crate::medoid(&members));
        }
    }

    #[test]
    fn empty_partitions_get_a_sample() {
        // k == sample_cnt: some partition is (almost) certainly empty
        let samples: Vec<[u8; 4]> = (0..6u8).map(|v| [v * 40, 0, 0, 255]).collect();
        let kmean = KMeans::new(samples.clone());
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(3)).build();
        let mut state = KMeansState::new(kmean.sample_cnt, 6);
        calculate(&kmean, &mut state, &conf).unwrap();
        assert_eq!(state.centroids.len(), 6);
        assert!(state.centroids.iter().all(|c| samples.contains(c)));
    }
}
