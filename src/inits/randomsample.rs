use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Sample};
use rand::prelude::*;

/// Forgy: draw k samples independently and uniformly, with replacement.
#[inline(always)]
pub fn calculate<S: Sample, D: DistanceFunction>(kmean: &KMeans<S, D>, state: &mut KMeansState<S>, config: &KMeansConfig<'_, S>) -> Result<(), KMeansError> {
    let mut rnd = config.rnd.borrow_mut();
    state.centroids = (0..state.k)
        .map(|_| kmean.samples[rnd.gen_range(0, kmean.sample_cnt)])
        .collect();
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_k_observations() {
        let samples: Vec<[u8; 4]> = (0..50u8).map(|v| [v, v, v, 255]).collect();
        let kmean = KMeans::new(samples.clone());
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1337)).build();
        let mut state = KMeansState::new(kmean.sample_cnt, 7);
        calculate(&kmean, &mut state, &conf).unwrap();
        assert_eq!(state.centroids.len(), 7);
        assert!(state.centroids.iter().all(|c| samples.contains(c)));
    }

    #[test]
    fn draws_with_replacement() {
        // k == sample_cnt: without replacement this would always be a permutation
        let samples: Vec<[u8; 4]> = (0..8u8).map(|v| [v, 0, 0, 255]).collect();
        let kmean = KMeans::new(samples);
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(7)).build();
        let found_duplicate = (0..64).any(|_| {
            let mut state = KMeansState::new(kmean.sample_cnt, 8);
            calculate(&kmean, &mut state, &conf).unwrap();
            let mut centroids = state.centroids.clone();
            centroids.sort();
            centroids.dedup();
            centroids.len() < 8
        });
        assert!(found_duplicate);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let samples: Vec<[u8; 4]> = (0..=255u8).map(|v| [v, 255 - v, v / 2, 255]).collect();
        let kmean = KMeans::new(samples);
        let draw = |seed| {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let mut state = KMeansState::new(kmean.sample_cnt, 16);
            calculate(&kmean, &mut state, &conf).unwrap();
            state.centroids
        };
        assert_eq!(draw(1), draw(1));
        assert_ne!(draw(1), draw(2));
    }
}
