use larder_core::{Catalog, Recipe};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Up to `count` recipes in a shuffled order fixed by `seed`.
pub fn featured(catalog: &Catalog, count: usize, seed: u64) -> Vec<&Recipe> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picks: Vec<&Recipe> = catalog.recipes().iter().collect();
    picks.shuffle(&mut rng);
    picks.truncate(count);
    picks
}
