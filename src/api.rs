use crate::{distances::RgbDistance, helpers, palette::Palette, AbortStrategy, KMeansError, Sample};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, S> = &'a dyn Fn(&KMeansState<S>);
pub type IterationDoneCallbackFn<'a, S> = &'a dyn Fn(&KMeansState<S>, usize, u64);

/// Distance between two samples, given as channel tuples widened to `0..=CHANNEL_MAX`.
///
/// The distance is used for the assignment of samples to centroids, as well as for snapping
/// a cluster's mean onto its closest member.
pub trait DistanceFunction: Send + Sync {
    fn distance(&self, a: &[u32; 4], b: &[u32; 4]) -> u64;

    /// Convenience wrapper calculating the distance between two samples.
    fn between<A: Sample, B: Sample>(&self, a: &A, b: &B) -> u64 where Self: Sized {
        self.distance(&a.rgba(), &b.rgba())
    }
}

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, S: Sample> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, S>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration's assignment step
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, S>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy
}
impl<'a, S: Sample> Default for KMeansConfig<'a, S> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(StdRng::from_entropy())),
            abort_strategy: AbortStrategy::default()
        }
    }
}
impl<'a, S: Sample> KMeansConfig<'a, S> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, S> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, S: Sample> std::fmt::Debug for KMeansConfig<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig").field("abort_strategy", &self.abort_strategy).finish()
    }
}

pub struct KMeansConfigBuilder<'a, S: Sample> {
    config: KMeansConfig<'a, S>
}
impl<'a, S: Sample> KMeansConfigBuilder<'a, S> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, S>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, S>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    /// ## Default
    /// A [`StdRng`] seeded from system entropy
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::CentroidsStable`]
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, S> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// Clusters are identified by their slot index `0..k`.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of (squared) distances from all samples to their respective centroids
/// - **centroids**: Centroid of each slot. After a finished calculation, these are the centroids the final
///   assignment was calculated against
/// - **centroid_frequency**: Amount of samples in each slot
/// - **assignments**: Vector mapping each sample to its respective nearest slot
/// - **centroid_distances**: Vector containing each sample's (squared) distance to its centroid
/// - **iterations**: Amount of finished iterations
/// - **converged**: Whether the last iteration left all centroids unchanged
#[derive(Clone, Debug)]
pub struct KMeansState<S: Sample> {
    pub k: usize,
    pub distsum: u64,
    pub centroids: Vec<S>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<u64>,
    pub iterations: usize,
    pub converged: bool,
}
impl<S: Sample> KMeansState<S> {
    pub(crate) fn new(sample_cnt: usize, k: usize) -> Self {
        Self {
            k,
            distsum: 0,
            centroids: Vec::with_capacity(k),
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![u64::MAX;sample_cnt],
            iterations: 0,
            converged: false,
        }
    }

    /// Weighted palette of the final partition: one entry per populated cluster, with its
    /// share of all samples as weight. Clusters with equal centroids are merged into one entry.
    pub fn palette(&self) -> Palette<S> {
        Palette::from_clusters(&self.centroids, &self.centroid_frequency, self.assignments.len())
    }
}




/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. The instance
/// is immutable, multiple calculations with differing parameters can run on it.
///
/// ## Supported variants
/// - k-Means clustering with medoid centroids (Lloyd) [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - Random-Sample (Forgy) [`KMeans::init_random_sample`]
/// - Random-Partition [`KMeans::init_random_partition`]
/// - K-Mean++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed [`KMeans::init_precomputed`]
pub struct KMeans<S: Sample, D: DistanceFunction = RgbDistance> {
    pub(crate) sample_cnt: usize,
    pub(crate) samples: Vec<S>,
    pub(crate) channels: Vec<[u32; 4]>,
    pub(crate) distance: D,
}
impl<S: Sample> KMeans<S, RgbDistance> {
    /// Create a new instance of the [`KMeans`] structure, using the squared RGB distance.
    ///
    /// ## Arguments
    /// - **samples**: Vector of observations, e.g. the pixels of an image in row-major order
    pub fn new(samples: Vec<S>) -> Self {
        Self::with_distance(samples, RgbDistance)
    }
}
impl<S: Sample, D: DistanceFunction> KMeans<S, D> {
    /// Create a new instance of the [`KMeans`] structure, using a custom distance function.
    pub fn with_distance(samples: Vec<S>, distance: D) -> Self {
        // Widen once, so the hot loops don't have to
        let channels = samples.par_iter().map(Sample::rgba).collect();
        Self {
            sample_cnt: samples.len(),
            samples,
            channels,
            distance
        }
    }

    /// Amount of observations this instance operates on.
    pub fn sample_cnt(&self) -> usize { self.sample_cnt }

    /// The observations this instance operates on.
    pub fn samples(&self) -> &[S] { &self.samples }

    pub(crate) fn validate(&self, k: usize, max_iter: usize) -> Result<(), KMeansError> {
        if self.sample_cnt == 0 {
            return Err(KMeansError::InvalidParameter("observations must not be empty"));
        }
        if k == 0 {
            return Err(KMeansError::InvalidParameter("k must be greater than 0"));
        }
        if max_iter == 0 {
            return Err(KMeansError::InvalidParameter("max_iter must be greater than 0"));
        }
        if self.sample_cnt < k {
            return Err(KMeansError::InsufficientObservations { observations: self.sample_cnt, k });
        }
        Ok(())
    }

    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<S>, limit_k: Option<usize>) {
        let k = limit_k.unwrap_or(state.k);
        let centroids: Vec<[u32; 4]> = state.centroids.iter().take(k).map(Sample::rgba).collect();
        let distance = &self.distance;

        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (self.sample_cnt / rayon::current_num_threads()).max(1);
        self.channels.par_iter()
            .with_min_len(work_packet_size)
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                if let Some((best_idx, best_dist)) = helpers::nearest(distance, s, centroids.iter()) {
                    *assignment = best_idx;
                    *centroid_dist = best_dist;
                }
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut[usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    /// Group sample indices by their assigned slot. Members stay in sample order.
    pub(crate) fn cluster_members(&self, assignments: &[usize], k: usize) -> Vec<Vec<usize>> {
        let mut clusters = vec![Vec::new(); k];
        assignments.iter().cloned().enumerate()
            .for_each(|(sample_id, centroid_id)| clusters[centroid_id].push(sample_id));
        clusters
    }

    /// Medoid-snapped centroid of the given cluster: the member closest to the cluster's mean.
    pub(crate) fn update_centroid(&self, members: &[usize]) -> Option<S> {
        let mean = helpers::channel_mean(members.iter().map(|&i| &self.channels[i]))?;
        helpers::nearest(&self.distance, &mean, members.iter().map(|&i| &self.channels[i]))
            .map(|(pos, _)| self.samples[members[pos]])
    }

    /// Calculate the new centroid of every slot. Slots without samples keep their centroid.
    pub(crate) fn update_centroids(&self, state: &KMeansState<S>) -> Vec<S> {
        let clusters = self.cluster_members(&state.assignments, state.k);
        clusters.par_iter()
            .zip(state.centroids.par_iter())
            .map(|(members, old)| self.update_centroid(members).unwrap_or(*old))
            .collect()
    }



    /// K-Means algorithm with medoid centroids (one-phase Lloyd iteration).
    ///
    /// Each iteration assigns every sample to its nearest centroid, then replaces each centroid with the
    /// member closest to its cluster's mean. The calculation stops once no centroid changed, the
    /// abort strategy requests it, or **max_iter** iterations ran. Reaching the limit is not an error.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of iterations
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidParameter`] for no samples, `k == 0` or `max_iter == 0`
    /// - [`KMeansError::InsufficientObservations`] if there are fewer samples than **k**
    ///
    /// ## Example
    /// ```rust
    /// use palette_kmeans::*;
    /// use rand::prelude::*;
    ///
    /// let mut rnd = StdRng::seed_from_u64(42);
    /// let pixels: Vec<[u8; 4]> = (0..1000).map(|_| [rnd.gen(), rnd.gen(), rnd.gen(), 255]).collect();
    ///
    /// let conf = KMeansConfig::build().random_generator(rnd).build();
    /// let kmean = KMeans::new(pixels);
    /// let result = kmean.kmeans_lloyd(4, 100, KMeans::init_random_sample, &conf).unwrap();
    ///
    /// for (color, weight) in result.palette().iter() {
    ///     println!("{:?}: {:.2}%", color, weight * 100.0);
    /// }
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, S>) -> Result<KMeansState<S>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<S, D>, &mut KMeansState<S>, &KMeansConfig<'c, S>) -> Result<(), KMeansError> {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// K-Means++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by selecting one sample as first centroid.
    /// Proceeding from there, the method iteratively selects one new centroid (per iteration), drawing
    /// each sample with a probability proportional to its (squared) distance to the nearest centroid selected so far.
    /// This leads to a tendency of selecting centroids, that are far away from the already chosen ones.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_kmeanplusplus(kmean: &KMeans<S, D>, state: &mut KMeansState<S>, config: &KMeansConfig<'_, S>) -> Result<(), KMeansError> {
        crate::inits::kmeanplusplus::calculate(kmean, state, config)
    }

    /// Random-Partition initialization method
    ///
    /// ## Description
    /// This initialization method randomly partitions the samples into k partitions, and then uses each
    /// partition's medoid (the member closest to its mean) as initial centroid.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_partition(kmean: &KMeans<S, D>, state: &mut KMeansState<S>, config: &KMeansConfig<'_, S>) -> Result<(), KMeansError> {
        crate::inits::randompartition::calculate(kmean, state, config)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method draws k samples uniformly at random, with replacement, as initial centroids.
    /// The same sample can therefore be drawn more than once.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_sample(kmean: &KMeans<S, D>, state: &mut KMeansState<S>, config: &KMeansConfig<'_, S>) -> Result<(), KMeansError> {
        crate::inits::randomsample::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Start from the given centroids. Each of them is replaced by its closest sample, so that every centroid
    /// is an actual observation. The amount of given centroids has to equal k.
    pub fn init_precomputed(centroids: Vec<S>) -> impl FnOnce(&KMeans<S, D>, &mut KMeansState<S>, &KMeansConfig<'_, S>) -> Result<(), KMeansError> {
        move |kmean, state, config| crate::inits::precomputed::calculate(kmean, state, config, centroids)
    }
}
