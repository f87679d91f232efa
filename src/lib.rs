//! # palette_kmeans - API documentation
//!
//! palette_kmeans is a small rust library extracting a weighted color palette from a collection of
//! color samples (typically the pixels of an image) using k-means clustering.
//!
//! ## Design target
//! Samples are partitioned into k clusters. For each cluster, the library reports a representative color
//! and the fraction of all samples it covers. Unlike textbook k-means, a cluster's centroid is not its mean,
//! but the member closest to that mean (medoid-snap). Every reported color therefore is a color that
//! actually occurred in the input.
//!
//! Samples are given as a plain vector of anything implementing [`Sample`]: four channels (R,G,B,A),
//! widened to 16 bits. Distances only take R,G,B into account.
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. There exist
//! multiple algorithms for this initialization, most of which are based on at least some
//! degree of randomness. For a list of implemented initialization methods, see [`KMeans`].
//! Randomness always comes from the generator in [`KMeansConfig`]; use a seeded one for reproducible results.
//!
//! ## Example
//! ```rust
//! use palette_kmeans::*;
//!
//! let black = [0u8, 0, 0, 255];
//! let white = [255u8, 255, 255, 255];
//! let pixels = vec![black, black, white, white];
//!
//! let kmean = KMeans::new(pixels);
//! let result = kmean.kmeans_lloyd(2, 10, KMeans::init_precomputed(vec![black, white]), &KMeansConfig::default()).unwrap();
//!
//! let palette = result.palette();
//! assert_eq!(palette.weight(&black), 0.5);
//! assert_eq!(palette.weight(&white), 0.5);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use palette_kmeans::*;
//! use palette::Srgba;
//! use rand::prelude::*;
//!
//! let mut rnd = StdRng::seed_from_u64(1337);
//! let pixels: Vec<Srgba<u16>> = (0..20000).map(|_| Srgba::new(rnd.gen(), rnd.gen(), rnd.gen(), 0xffff)).collect();
//!
//! let conf = KMeansConfig::build()
//!     .random_generator(rnd)
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|s, nr, new_distsum|
//!         println!("Iteration {} - Error: {} -> {}", nr, s.distsum, new_distsum))
//!     .build();
//!
//! let kmean = KMeans::new(pixels);
//! let result = kmean.kmeans_lloyd(8, 100, KMeans::init_kmeanplusplus, &conf).unwrap();
//! println!("Palette: {:?}", result.palette().sorted_by_weight());
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, taking over the samples into its ownership.
//! Its instance-methods run a calculation without mutating it; the state (and finally the result) of a
//! calculation lives in a [`KMeansState`]. [`KMeansState::palette`] turns the final state into a [`Palette`].
//!
//! For the common case, [`cluster`] runs the whole pipeline with Forgy initialization and a freshly seeded generator.
//!
//! When the colors of interest are known up front, [`classify_by_centroids`] skips the clustering and reports
//! which share of the samples lies within a tolerance of each named group of reference colors.

#[macro_use] mod helpers;
mod sample;
mod error;
mod api;
mod palette;
mod distances;
mod variants;
mod inits;
mod abort_strategy;
mod classify;

pub use abort_strategy::AbortStrategy;
pub use classify::{classify_by_centroids, colors_match, NamedPalette};
pub use api::{DistanceFunction, KMeansState, KMeansConfig, KMeansConfigBuilder, KMeans};
pub use distances::RgbDistance;
pub use error::KMeansError;
pub use helpers::{medoid, nearest_sample};
pub use crate::palette::Palette;
pub use sample::{Channel, Sample, CHANNEL_MAX};

/// Extract a palette of at most **k** colors from **observations**.
///
/// Centroids are initialized using Forgy's method, with a generator seeded from system entropy. Use
/// [`cluster_with_config`] for reproducible results.
///
/// ## Errors
/// - [`KMeansError::InsufficientObservations`] if there are fewer observations than **k**
/// - [`KMeansError::InvalidParameter`] for no observations, `k == 0` or `max_iter == 0`
pub fn cluster<S: Sample>(k: usize, max_iter: usize, observations: &[S]) -> Result<Palette<S>, KMeansError> {
    cluster_with_config(k, max_iter, observations, &KMeansConfig::default())
}

/// Same as [`cluster`], taking the random generator, callbacks and abort strategy from **config**.
pub fn cluster_with_config<S: Sample>(k: usize, max_iter: usize, observations: &[S], config: &KMeansConfig<'_, S>) -> Result<Palette<S>, KMeansError> {
    let kmean = KMeans::new(observations.to_vec());
    kmean.kmeans_lloyd(k, max_iter, KMeans::init_random_sample, config)
        .map(|state| state.palette())
}
