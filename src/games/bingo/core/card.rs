use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shuffle;

/// A player's grid of words, filled row-major from a fresh shuffle of
/// the game's word set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    rows: Vec<Vec<String>>,
}

impl Card {
    /// Deals a `side_size` x `side_size` card. If the pool has fewer
    /// than `side_size`^2 words the card stops short of a full grid;
    /// the session's pool sizing keeps that from happening in play.
    pub fn deal(words: &[String], side_size: usize, rng: &mut impl Rng) -> Self {
        let rows = shuffle(words, rng)
            .chunks_exact(side_size)
            .take(side_size)
            .map(<[String]>::to_vec)
            .collect();

        Self { rows }
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn deals_a_full_grid_of_unique_pool_words() {
        let mut rng = StdRng::seed_from_u64(123);
        let pool = pool(43);

        let card = Card::deal(&pool, 5, &mut rng);

        assert_eq!(card.rows().len(), 5);
        assert!(card.rows().iter().all(|row| row.len() == 5));

        let words: HashSet<&str> = card.words().collect();
        assert_eq!(words.len(), 25, "a duplicate-free pool deals a duplicate-free card");
        assert!(card.words().all(|word| pool.iter().any(|p| p == word)));
    }

    #[test]
    fn short_pool_deals_a_short_card() {
        let mut rng = StdRng::seed_from_u64(123);

        let card = Card::deal(&pool(13), 5, &mut rng);

        // two complete rows fit; the partial third row is dropped
        assert_eq!(card.rows().len(), 2);
        assert!(card.rows().iter().all(|row| row.len() == 5));
    }

    #[test]
    fn two_cards_from_one_pool_differ() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = pool(43);

        let first = Card::deal(&pool, 5, &mut rng);
        let second = Card::deal(&pool, 5, &mut rng);

        assert_ne!(first, second);
    }
}
