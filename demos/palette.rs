use palette_kmeans::*;
use palette::Srgba;
use rand::prelude::*;

fn main() {
    let (sample_cnt, k, max_iter) = (20000, 6, 100);

    // Generate a noisy "image" made of a few base colors
    let mut rnd = StdRng::seed_from_u64(1337);
    let base: [Srgba<u8>; 4] = [
        Srgba::new(200, 30, 30, 255),
        Srgba::new(30, 160, 60, 255),
        Srgba::new(20, 40, 190, 255),
        Srgba::new(240, 240, 230, 255),
    ];
    let pixels: Vec<Srgba<u8>> = (0..sample_cnt)
        .map(|_| {
            let c = base[rnd.gen_range(0, base.len())];
            let mut jitter = |c: u8| (c as i16 + rnd.gen_range(-12i16, 13)).max(0).min(255) as u8;
            Srgba::new(jitter(c.red), jitter(c.green), jitter(c.blue), c.alpha)
        })
        .collect();

    let conf = KMeansConfig::build().random_generator(rnd).build();
    match cluster_with_config(k, max_iter, &pixels, &conf) {
        Ok(palette) => {
            for (color, weight) in palette.sorted_by_weight() {
                println!("#{:02x}{:02x}{:02x}  {:5.2}%", color.red, color.green, color.blue, weight * 100.0);
            }
        }
        Err(err) => eprintln!("palette extraction failed: {}", err),
    }

    // Classify the same pixels against known reference colors
    let groups = vec![("red", vec![base[0]]), ("green", vec![base[1]]), ("blue", vec![base[2]])];
    match classify_by_centroids(12 * 257, &pixels, &groups) {
        Ok(named) => {
            for (name, weight) in named.sorted_by_weight() {
                println!("{:>8}  {:5.2}%", name, weight * 100.0);
            }
            println!("{:>8}  {:5.2}%", "other", named.unmatched() * 100.0);
        }
        Err(err) => eprintln!("classification failed: {}", err),
    }
}
