use palette_kmeans::*;
use palette::Srgba;
use rand::prelude::*;

fn main() {
    let (sample_cnt, k, max_iter) = (20000, 8, 2500);

    // Generate some random data
    let mut rnd = StdRng::seed_from_u64(42);
    let samples: Vec<Srgba<u16>> = (0..sample_cnt).map(|_| Srgba::new(rnd.gen(), rnd.gen(), rnd.gen(), 0xffffu16)).collect();

	let conf = KMeansConfig::build()
		.random_generator(rnd)
		.init_done(&|_| println!("Initialization completed."))
		.iteration_done(&|s, nr, new_distsum|
			println!("Iteration {} - Error: {} -> {} | Improvement: {}",
				nr, s.distsum, new_distsum, s.distsum as i128 - new_distsum as i128))
		.abort_strategy(AbortStrategy::NoImprovementForXIterations {
			// Abort after there has not been an improvement for 5 iterations
			x: 5,
			// Only count as improvement if the distance sum dropped by more than this
			threshold: 1 << 20,
			// Do not directly abort after a negative improvement
			abort_on_negative: false
		})
		.build();

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::new(samples);
    let result = match kmean.kmeans_lloyd(k, max_iter, KMeans::init_kmeanplusplus, &conf) {
        Ok(result) => result,
        Err(err) => { eprintln!("{}", err); return; }
    };

    println!("Converged: {} after {} iterations", result.converged, result.iterations);
    println!("Centroids: {:?}", result.centroids);
    println!("Palette: {:?}", result.palette().sorted_by_weight());
    println!("Error: {}", result.distsum);
}
