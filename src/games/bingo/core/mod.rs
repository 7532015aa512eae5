//! Pure game rules: shuffling, card dealing and win detection. No
//! clocks, no network, and randomness always arrives as a caller
//! supplied [`Rng`] so tests can seed it.

use rand::Rng;

mod card;
pub use card::Card;

/// Uniformly random permutation of `items`: repeatedly draw a random
/// index from an owned copy of the remaining pool until it is empty.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut impl Rng) -> Vec<T> {
    let mut remaining = items.to_vec();
    let mut shuffled = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let index = rng.gen_range(0..remaining.len());
        shuffled.push(remaining.remove(index));
    }

    shuffled
}

/// Whether `card` has a complete line of called words: any full row,
/// any full column, the main diagonal or the anti-diagonal, checked in
/// that order.
pub fn has_bingo(called: &[String], card: &Card) -> bool {
    let rows = card.rows();
    let side = rows.len();
    if side == 0 {
        return false;
    }

    let is_called = |word: &str| called.iter().any(|called| called == word);

    if rows.iter().any(|row| row.iter().all(|word| is_called(word))) {
        return true;
    }

    if (0..side).any(|col| rows.iter().all(|row| is_called(&row[col]))) {
        return true;
    }

    if (0..side).all(|i| is_called(&rows[i][i])) {
        return true;
    }

    (0..side).all(|i| is_called(&rows[i][side - 1 - i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = words(40);

        let shuffled = shuffle(&input, &mut rng);

        assert_eq!(shuffled.len(), input.len());

        let mut sorted = shuffled.clone();
        sorted.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn shuffle_preserves_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = vec!["a".to_owned(), "a".to_owned(), "b".to_owned()];

        let mut shuffled = shuffle(&input, &mut rng);
        shuffled.sort();

        assert_eq!(shuffled, vec!["a", "a", "b"]);
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let input = words(20);

        let first = shuffle(&input, &mut StdRng::seed_from_u64(42));
        let second = shuffle(&input, &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    fn card_from(rows: &[&[&str]]) -> Card {
        Card::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|s| (*s).to_owned()).collect())
                .collect(),
        )
    }

    fn called(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| (*s).to_owned()).collect()
    }

    const CARD: &[&[&str]] = &[
        &["a", "b", "c"],
        &["d", "e", "f"],
        &["g", "h", "i"],
    ];

    #[test]
    fn complete_row_wins() {
        assert!(has_bingo(&called(&["d", "e", "f"]), &card_from(CARD)));
    }

    #[test]
    fn incomplete_row_does_not_win() {
        assert!(!has_bingo(&called(&["d", "e"]), &card_from(CARD)));
    }

    #[test]
    fn complete_column_wins() {
        assert!(has_bingo(&called(&["b", "e", "h"]), &card_from(CARD)));
    }

    #[test]
    fn main_diagonal_wins() {
        assert!(has_bingo(&called(&["a", "e", "i"]), &card_from(CARD)));
    }

    #[test]
    fn anti_diagonal_wins() {
        assert!(has_bingo(&called(&["c", "e", "g"]), &card_from(CARD)));
    }

    #[test]
    fn scattered_words_do_not_win() {
        assert!(!has_bingo(&called(&["a", "f", "h", "b"]), &card_from(CARD)));
    }

    #[test]
    fn empty_card_never_wins() {
        assert!(!has_bingo(&called(&["a"]), &Card::from_rows(Vec::new())));
    }
}
