//! Raw influence formula shared by every entity kind.
//!
//! raw = weighted_pages × rating_bonus × bonuses, where `bonuses` depends on the
//! strategy:
//! - `Flat`  (author / country / genre): diversity × favorite
//! - `Saga`: completion × length
//!
//! Everything here is a pure function of the member records and the genre table.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::genre_weights::GenreWeightTable;
use crate::record::{average_rating, ReadingRecord};
use crate::text::label;

const RATING_BONUS_FLOOR: f64 = 0.6;
const RATING_BONUS_STEP: f64 = 0.225;
const DIVERSITY_STEP: f64 = 0.05;
const DIVERSITY_CAP: f64 = 0.20;
const FAVORITE_STEP: f64 = 0.10;
const COMPLETION_STEP: f64 = 0.1;
const COMPLETION_CAP: f64 = 1.5;
const LENGTH_STEP: f64 = 0.1;
const LENGTH_CAP: f64 = 1.3;
const LENGTH_PAGES_PER_STEP: u64 = 1000;

/// Which bonus family applies on top of the shared base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusStrategy {
    Flat,
    Saga,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Bonuses {
    Flat {
        distinct_genres: usize,
        diversity_bonus: f64,
        favorite_count: usize,
        favorite_bonus: f64,
    },
    Saga {
        completion_bonus: f64,
        length_bonus: f64,
    },
}

impl Bonuses {
    pub fn factor(&self) -> f64 {
        match self {
            Bonuses::Flat {
                diversity_bonus,
                favorite_bonus,
                ..
            } => diversity_bonus * favorite_bonus,
            Bonuses::Saga {
                completion_bonus,
                length_bonus,
            } => completion_bonus * length_bonus,
        }
    }
}

/// Intermediate factors kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub book_count: usize,
    pub total_pages: u64,
    pub weighted_pages: f64,
    pub avg_rating: f64,
    pub rating_bonus: f64,
    pub bonuses: Bonuses,
}

impl ScoreBreakdown {
    pub fn raw_score(&self) -> f64 {
        self.weighted_pages * self.rating_bonus * self.bonuses.factor()
    }
}

/// Linear ramp: 1★ → 0.6, 5★ → 1.5; unrated → 1.0.
pub fn rating_bonus(avg_rating: f64) -> f64 {
    if avg_rating > 0.0 {
        RATING_BONUS_FLOOR + (avg_rating - 1.0) * RATING_BONUS_STEP
    } else {
        1.0
    }
}

/// +5% per distinct genre, capped at +20%.
pub fn diversity_bonus(distinct_genres: usize) -> f64 {
    1.0 + (DIVERSITY_STEP * distinct_genres as f64).min(DIVERSITY_CAP)
}

/// +10% per five-star or favorited book. Uncapped.
pub fn favorite_bonus(favorites: usize) -> f64 {
    1.0 + FAVORITE_STEP * favorites as f64
}

/// 2 books → 1.1, capped at 1.5 from 6 books on.
pub fn completion_bonus(book_count: usize) -> f64 {
    (1.0 + book_count.saturating_sub(1) as f64 * COMPLETION_STEP).min(COMPLETION_CAP)
}

/// +10% per full thousand pages, capped at 1.3.
pub fn length_bonus(total_pages: u64) -> f64 {
    (1.0 + (total_pages / LENGTH_PAGES_PER_STEP) as f64 * LENGTH_STEP).min(LENGTH_CAP)
}

fn is_favorite(r: &ReadingRecord) -> bool {
    r.favorite || r.valid_rating() == Some(5)
}

/// Compute the breakdown for a member list. Callers pass at least one member.
pub fn breakdown(
    members: &[&ReadingRecord],
    strategy: BonusStrategy,
    weights: &GenreWeightTable,
) -> ScoreBreakdown {
    let total_pages: u64 = members.iter().map(|r| u64::from(r.pages)).sum();
    let weighted_pages: f64 = members
        .iter()
        .map(|r| f64::from(r.pages) * weights.weight_of(&r.genre))
        .sum();
    let avg_rating = average_rating(members.iter().copied());

    let bonuses = match strategy {
        BonusStrategy::Flat => {
            let distinct_genres = members
                .iter()
                .map(|r| label(&r.genre))
                .collect::<BTreeSet<_>>()
                .len();
            let favorite_count = members.iter().filter(|r| is_favorite(r)).count();
            Bonuses::Flat {
                distinct_genres,
                diversity_bonus: diversity_bonus(distinct_genres),
                favorite_count,
                favorite_bonus: favorite_bonus(favorite_count),
            }
        }
        BonusStrategy::Saga => Bonuses::Saga {
            completion_bonus: completion_bonus(members.len()),
            length_bonus: length_bonus(total_pages),
        },
    };

    ScoreBreakdown {
        book_count: members.len(),
        total_pages,
        weighted_pages,
        avg_rating,
        rating_bonus: rating_bonus(avg_rating),
        bonuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rating_ramp_endpoints() {
        assert!(approx(rating_bonus(1.0), 0.6));
        assert!(approx(rating_bonus(3.0), 1.05));
        assert!(approx(rating_bonus(5.0), 1.5));
        assert!(approx(rating_bonus(0.0), 1.0));
    }

    #[test]
    fn diversity_caps_at_twenty_percent() {
        assert!(approx(diversity_bonus(1), 1.05));
        assert!(approx(diversity_bonus(4), 1.20));
        assert!(approx(diversity_bonus(9), 1.20));
    }

    #[test]
    fn completion_and_length_caps() {
        assert!(approx(completion_bonus(2), 1.1));
        assert!(approx(completion_bonus(6), 1.5));
        assert!(approx(completion_bonus(14), 1.5));
        assert!(approx(length_bonus(999), 1.0));
        assert!(approx(length_bonus(1000), 1.1));
        assert!(approx(length_bonus(2999), 1.2));
        assert!(approx(length_bonus(10_000), 1.3));
    }

    #[test]
    fn favorites_count_five_stars_and_flags() {
        let a = ReadingRecord::new("1", "a", "x", 100).rated(5);
        let b = ReadingRecord::new("2", "b", "x", 100).favorited();
        let c = ReadingRecord::new("3", "c", "x", 100).rated(4);
        let bd = breakdown(&[&a, &b, &c], BonusStrategy::Flat, &GenreWeightTable::default());
        match bd.bonuses {
            Bonuses::Flat {
                favorite_count,
                favorite_bonus,
                ..
            } => {
                assert_eq!(favorite_count, 2);
                assert!(approx(favorite_bonus, 1.2));
            }
            other => panic!("unexpected bonuses: {other:?}"),
        }
    }

    #[test]
    fn saga_example_from_two_unrated_books() {
        let a = ReadingRecord::new("1", "a", "X", 300).genre("Fiction");
        let b = ReadingRecord::new("2", "b", "X", 300).genre("Fiction");
        let bd = breakdown(&[&a, &b], BonusStrategy::Saga, &GenreWeightTable::default());
        assert_eq!(bd.total_pages, 600);
        assert!(approx(bd.weighted_pages, 600.0));
        assert!(approx(bd.rating_bonus, 1.0));
        assert!(approx(bd.raw_score(), 660.0));
    }
}
