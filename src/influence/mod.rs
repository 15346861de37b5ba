//! # Influence scoring
//! Ranks authors, countries, genres and sagas by how much they shaped a reading
//! history. Raw scores come from [`scoring::breakdown`]; [`normalize::rank`] scales
//! each batch to 0..=100 and orders it.

pub mod normalize;
pub mod scoring;

use serde::Serialize;
use std::collections::HashMap;

use crate::genre_weights::GenreWeightTable;
use crate::record::{ReadingKind, ReadingRecord};
use crate::saga::Saga;
use crate::text::label;

pub use normalize::{normalize_batch, normalize_raw, rank, ranking_order};
pub use scoring::{BonusStrategy, Bonuses, ScoreBreakdown};

/// Score of one entity inside its comparison batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluenceScore {
    pub id: String,
    pub name: String,
    pub raw_score: f64,
    pub normalized_score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Flat groupings scored with the diversity/favorite bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Country,
    Genre,
}

impl EntityKind {
    pub fn label_of(self, r: &ReadingRecord) -> &str {
        match self {
            EntityKind::Author => label(&r.author),
            EntityKind::Country => label(&r.nationality),
            EntityKind::Genre => label(&r.genre),
        }
    }
}

/// All four rankings of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rankings {
    pub authors: Vec<InfluenceScore>,
    pub countries: Vec<InfluenceScore>,
    pub genres: Vec<InfluenceScore>,
    pub sagas: Vec<InfluenceScore>,
}

#[derive(Debug, Clone, Copy)]
pub struct InfluenceScorer<'a> {
    weights: &'a GenreWeightTable,
    excluded_kinds: &'a [ReadingKind],
}

impl<'a> InfluenceScorer<'a> {
    pub fn new(weights: &'a GenreWeightTable, excluded_kinds: &'a [ReadingKind]) -> Self {
        Self {
            weights,
            excluded_kinds,
        }
    }

    /// Score one flat entity. `normalized_score` is relative to itself until the
    /// score is placed in a batch via [`rank`].
    pub fn score(&self, entity: &str, members: &[&ReadingRecord]) -> InfluenceScore {
        self.build(entity.to_string(), entity.to_string(), members, BonusStrategy::Flat)
    }

    pub fn score_saga(&self, saga: &Saga) -> InfluenceScore {
        let members: Vec<&ReadingRecord> = saga.books.iter().collect();
        self.build(saga.id.clone(), saga.name.clone(), &members, BonusStrategy::Saga)
    }

    fn build(
        &self,
        id: String,
        name: String,
        members: &[&ReadingRecord],
        strategy: BonusStrategy,
    ) -> InfluenceScore {
        let breakdown = scoring::breakdown(members, strategy, self.weights);
        let raw_score = breakdown.raw_score().max(0.0);
        InfluenceScore {
            id,
            name,
            raw_score,
            normalized_score: normalize_raw(&[raw_score])[0],
            breakdown,
        }
    }

    /// Group eligible records by label (first-seen order), score and rank them.
    pub fn rank_by(&self, kind: EntityKind, records: &[ReadingRecord]) -> Vec<InfluenceScore> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&ReadingRecord>)> = Vec::new();
        let excluded = self.excluded_kinds;
        for r in records.iter().filter(|r| !excluded.contains(&r.reading_kind)) {
            let key = kind.label_of(r);
            let i = *index.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[i].1.push(r);
        }
        let scores = groups
            .iter()
            .map(|(name, members)| self.score(name, members))
            .collect();
        rank(scores)
    }

    pub fn rank_authors(&self, records: &[ReadingRecord]) -> Vec<InfluenceScore> {
        self.rank_by(EntityKind::Author, records)
    }

    pub fn rank_countries(&self, records: &[ReadingRecord]) -> Vec<InfluenceScore> {
        self.rank_by(EntityKind::Country, records)
    }

    pub fn rank_genres(&self, records: &[ReadingRecord]) -> Vec<InfluenceScore> {
        self.rank_by(EntityKind::Genre, records)
    }

    pub fn rank_sagas(&self, sagas: &[Saga]) -> Vec<InfluenceScore> {
        rank(sagas.iter().map(|s| self.score_saga(s)).collect())
    }

    pub fn rank_all(&self, records: &[ReadingRecord], sagas: &[Saga]) -> Rankings {
        Rankings {
            authors: self.rank_authors(records),
            countries: self.rank_countries(records),
            genres: self.rank_genres(records),
            sagas: self.rank_sagas(sagas),
        }
    }
}
