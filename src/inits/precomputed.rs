use crate::{helpers, DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Sample};

#[inline(always)]
pub fn calculate<S: Sample, D: DistanceFunction>(
    kmean: &KMeans<S, D>, state: &mut KMeansState<S>, _config: &KMeansConfig<'_, S>, computed: Vec<S>,
) -> Result<(), KMeansError> {
    if computed.len() != state.k {
        return Err(KMeansError::InvalidParameter("amount of precomputed centroids must equal k"));
    }
    // Snap every given centroid onto its closest sample
    state.centroids = computed.iter()
        .map(|c| {
            helpers::nearest(&kmean.distance, &c.rgba(), kmean.channels.iter())
                .map(|(idx, _)| kmean.samples[idx])
                .ok_or(KMeansError::InvalidParameter("observations must not be empty"))
        })
        .collect::<Result<Vec<S>, KMeansError>>()?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use ::palette::Srgba;

    #[test]
    fn train_with_precomputed_centroids() {
        let samples: Vec<[u8; 4]> = vec![[0, 0, 0, 255], [1, 1, 1, 255], [10, 10, 10, 255], [11, 11, 11, 255], [20, 20, 20, 255], [21, 21, 21, 255]];
        let centroids = vec![[0u8, 0, 0, 255], [21, 21, 21, 255]];

        let kmean = KMeans::new(samples);
        let result = kmean.kmeans_lloyd(2, 200, KMeans::init_precomputed(centroids), &KMeansConfig::default()).unwrap();

        assert!(result.converged);
        assert_eq!(result.centroids, vec![[1, 1, 1, 255], [20, 20, 20, 255]]);
        assert_eq!(result.centroid_frequency, vec![3, 3]);
    }

    #[test]
    fn snaps_to_observations() {
        let black = Srgba::new(0u16, 0, 0, 0xffff);
        let white = Srgba::new(0xffffu16, 0xffff, 0xffff, 0xffff);
        let kmean = KMeans::new(vec![black, white]);
        let mut state = KMeansState::new(2, 2);
        let wanted = vec![Srgba::new(0x1000u16, 0x1000, 0x1000, 0), Srgba::new(0xf000, 0xf000, 0xf000, 0)];
        calculate(&kmean, &mut state, &KMeansConfig::default(), wanted).unwrap();
        assert_eq!(state.centroids, vec![black, white]);
    }

    #[test]
    fn wrong_amount_of_centroids() {
        let kmean = KMeans::new(vec![[0u8; 4]; 4]);
        let res = kmean.kmeans_lloyd(3, 10, KMeans::init_precomputed(vec![[0u8; 4]; 2]), &KMeansConfig::default());
        assert_eq!(res.unwrap_err(), KMeansError::InvalidParameter("amount of precomputed centroids must equal k"));
    }
}
