use nalgebra::Point3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Background stars, scattered uniformly through a cube centered on the sun.
/// Placement is deterministic for a given seed.
pub struct Starfield {
    stars: Vec<Point3<f32>>,
}

impl Starfield {
    pub fn generate(count: usize, half_extent: f32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut coord = || rng.gen_range(-half_extent..half_extent);

        let stars = (0..count)
            .map(|_| Point3::new(coord(), coord(), coord()))
            .collect();

        Starfield { stars }
    }

    pub fn stars(&self) -> &[Point3<f32>] {
        &self.stars
    }
}
