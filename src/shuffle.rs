use crate::card::{Card, DECK_SIZE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Returns a uniformly random permutation of `0..n` (Fisher–Yates).
pub fn shuffle<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    shuffle_in_place(&mut order, rng);
    order
}

pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Seedable RNG used for dealing.
///
/// The same seed always deals the same layout, which is what the tests
/// rely on. Without a seed the RNG is seeded from the thread RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn shuffle(&mut self, n: usize) -> Vec<usize> {
        shuffle(n, &mut self.inner)
    }

    pub fn shuffled_deck(&mut self) -> Vec<Card> {
        self.shuffle(DECK_SIZE)
            .into_iter()
            .filter_map(Card::new)
            .collect()
    }
}
