//! # Saga grouping
//! Buckets eligible records by `(series name, author)` and turns every bucket with
//! two or more members into a [`Saga`]. Singletons and records without a series
//! name are returned as standalone reads.
//!
//! Stateless: the same input (including order) always yields the same grouping.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::genre_weights::GenreWeightTable;
use crate::record::{average_rating, ReadingKind, ReadingRecord};
use crate::series::SeriesNameExtractor;
use crate::text::{fold_key, label, title_case};

/// Smallest bucket that counts as a saga.
pub const MIN_SAGA_BOOKS: usize = 2;

/// Derived multi-volume series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Saga {
    /// `lower(name)|lower(author)`; stable across runs.
    pub id: String,
    pub name: String,
    /// Author and nationality of `books[0]`, the earliest book in reading order.
    pub author: String,
    pub nationality: String,
    pub primary_genre: String,
    pub books: Vec<ReadingRecord>,
    pub total_pages: u64,
    pub weighted_pages: f64,
    pub avg_rating: f64,
    pub avg_genre_weight: f64,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub book_count: usize,
}

/// Output of [`SagaGrouper::group`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grouping {
    /// Sorted by `total_pages` desc; ties keep first-seen order.
    pub sagas: Vec<Saga>,
    /// Eligible records not in any saga, input order.
    pub standalone: Vec<ReadingRecord>,
    /// Records skipped because of their reading kind, input order.
    pub excluded: Vec<ReadingRecord>,
}

#[derive(Debug, Clone)]
pub struct SagaGrouper {
    extractor: SeriesNameExtractor,
    excluded_kinds: Vec<ReadingKind>,
}

impl Default for SagaGrouper {
    fn default() -> Self {
        Self::new(
            SeriesNameExtractor::default(),
            vec![ReadingKind::Academic, ReadingKind::Reference],
        )
    }
}

struct Bucket {
    series_name: String,
    members: Vec<usize>,
}

impl SagaGrouper {
    pub fn new(extractor: SeriesNameExtractor, excluded_kinds: Vec<ReadingKind>) -> Self {
        Self {
            extractor,
            excluded_kinds,
        }
    }

    pub fn is_eligible(&self, record: &ReadingRecord) -> bool {
        !self.excluded_kinds.contains(&record.reading_kind)
    }

    pub fn group(&self, records: &[ReadingRecord], weights: &GenreWeightTable) -> Grouping {
        let mut out = Grouping::default();

        // Bucket in first-seen order.
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut buckets: Vec<Bucket> = Vec::new();
        // Per record: Some(bucket) if it has a series name.
        let mut assigned: Vec<Option<usize>> = vec![None; records.len()];

        for (i, r) in records.iter().enumerate() {
            if !self.is_eligible(r) {
                continue;
            }
            let Some(series_name) = self.extractor.extract(r) else {
                continue;
            };
            let key = saga_key(&series_name, &r.author);
            let b = *index.entry(key).or_insert_with(|| {
                buckets.push(Bucket {
                    series_name,
                    members: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[b].members.push(i);
            assigned[i] = Some(b);
        }

        for (i, r) in records.iter().enumerate() {
            if !self.is_eligible(r) {
                out.excluded.push(r.clone());
                continue;
            }
            match assigned[i] {
                Some(b) if buckets[b].members.len() >= MIN_SAGA_BOOKS => {}
                _ => out.standalone.push(r.clone()),
            }
        }

        out.sagas = buckets
            .iter()
            .filter(|b| b.members.len() >= MIN_SAGA_BOOKS)
            .map(|b| {
                let members: Vec<&ReadingRecord> = b.members.iter().map(|&i| &records[i]).collect();
                build_saga(&b.series_name, &members, weights)
            })
            .collect();
        // Stable: equal totals keep bucket order.
        out.sagas.sort_by(|a, b| b.total_pages.cmp(&a.total_pages));

        out
    }
}

/// Grouping key: same series name by different authors never merges.
pub fn saga_key(series_name: &str, author: &str) -> String {
    format!("{}|{}", fold_key(series_name), fold_key(author))
}

fn build_saga(series_name: &str, members: &[&ReadingRecord], weights: &GenreWeightTable) -> Saga {
    let mut books: Vec<ReadingRecord> = members.iter().map(|r| (*r).clone()).collect();
    books.sort_by_key(book_order_key);
    let first = &books[0];

    let total_pages: u64 = books.iter().map(|b| u64::from(b.pages)).sum();
    let weighted_pages: f64 = books
        .iter()
        .map(|b| f64::from(b.pages) * weights.weight_of(&b.genre))
        .sum();
    let avg_genre_weight = if total_pages > 0 {
        weighted_pages / total_pages as f64
    } else {
        0.0
    };

    let years = books.iter().filter_map(|b| b.year_published);

    let id = saga_key(series_name, &first.author);
    let author = first.author.trim().to_string();
    let nationality = label(&first.nationality).to_string();

    Saga {
        id,
        name: title_case(series_name),
        author,
        nationality,
        primary_genre: primary_genre(members),
        total_pages,
        weighted_pages,
        avg_rating: average_rating(books.iter()),
        avg_genre_weight,
        start_year: years.clone().min(),
        end_year: years.max(),
        book_count: books.len(),
        books,
    }
}

/// Publication year first, then completion date; undated books keep input order at the end.
fn book_order_key(r: &ReadingRecord) -> (bool, Option<i32>, bool, Option<NaiveDate>) {
    (
        r.year_published.is_none(),
        r.year_published,
        r.completed_date.is_none(),
        r.completed_date,
    )
}

/// Most frequent genre label; ties go to the one seen first.
fn primary_genre(members: &[&ReadingRecord]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for r in members {
        let g = label(&r.genre);
        match counts.iter_mut().find(|(k, _)| *k == g) {
            Some((_, n)) => *n += 1,
            None => counts.push((g, 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (g, n) in counts {
        if best.map_or(true, |(_, bn)| n > bn) {
            best = Some((g, n));
        }
    }
    best.map(|(g, _)| g.to_string()).unwrap_or_default()
}
