use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Sample};

pub(crate) struct Lloyd<S, D> {
	_p: std::marker::PhantomData<(S, D)>
}
impl<S: Sample, D: DistanceFunction> Lloyd<S, D> {
    #[inline(always)] pub fn calculate<'a, F>(data: &KMeans<S, D>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, S>) -> Result<KMeansState<S>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<S, D>, &mut KMeansState<S>, &KMeansConfig<'c, S>) -> Result<(), KMeansError> {
        data.validate(k, max_iter)?;

        let mut state = KMeansState::new(data.sample_cnt, k);
        state.distsum = u64::MAX;

        // Initialize clusters and notify subscriber
        init(data, &mut state, config)?;
        if state.centroids.len() != k {
            return Err(KMeansError::InvalidParameter("initialization has to produce exactly k centroids"));
        }
        log::debug!("initialized {} centroids for {} samples", k, data.sample_cnt);
        (config.init_done)(&state);
        let mut abort_strategy = config.abort_strategy.create_logic();

        for i in 1..=max_iter {
            data.update_cluster_assignments(&mut state, None);
            let used_centroids_cnt = data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
            let new_distsum: u64 = state.centroid_distances.iter().sum();
            let new_centroids = data.update_centroids(&state);

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_distsum);
            log::debug!("iteration {}: distsum {}, {} of {} clusters populated", i, new_distsum, used_centroids_cnt, k);
            state.distsum = new_distsum;
            state.iterations = i;

            if new_centroids == state.centroids {
                state.converged = true;
                log::info!("converged after {} iterations", i);
                break;
            }
            // The final partition is kept together with the centroids it was assigned against
            if i == max_iter {
                log::info!("stopped after reaching the iteration limit of {}", max_iter);
                break;
            }
            if !abort_strategy.next(new_distsum) {
                log::info!("aborted after {} iterations", i);
                break;
            }
            state.centroids = new_centroids;
        }

        Ok(state)
    }
}
