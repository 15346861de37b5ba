//! # Library stats
//! One-pass tallies for the dashboard: totals, per-author/nationality/genre/collection
//! counts, rating distribution and books per year. Plain counting; ties keep the
//! order in which a label was first seen.
//!
//! Labels are grouped exactly like the influence rankings group them
//! (trimmed, blank → `Unknown`), so both views agree on the same buckets.

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::record::{ReadingKind, ReadingRecord};
use crate::text::label;

pub const DEFAULT_TOP_N: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorTally {
    pub author: String,
    pub books: usize,
    pub pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalityTally {
    pub nationality: String,
    pub books: usize,
    pub unique_authors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreTally {
    pub genre: String,
    pub books: usize,
    pub pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionTally {
    pub collection: String,
    pub books: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub complete: usize,
    pub academic: usize,
    pub reference: usize,
}

/// Index 0 holds unrated books, 1..=5 the star buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RatingDistribution(pub [usize; 6]);

impl RatingDistribution {
    pub fn unrated(&self) -> usize {
        self.0[0]
    }

    pub fn stars(&self, stars: u8) -> usize {
        match stars {
            1..=5 => self.0[usize::from(stars)],
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub total_pages: u64,
    pub unique_authors: usize,
    pub avg_pages: f64,
    pub top_authors_by_books: Vec<AuthorTally>,
    pub top_authors_by_pages: Vec<AuthorTally>,
    pub nationalities: Vec<NationalityTally>,
    pub genres: Vec<GenreTally>,
    pub collections: Vec<CollectionTally>,
    pub kinds: KindCounts,
    pub ratings: RatingDistribution,
    /// Completed books per calendar year.
    pub books_per_year: BTreeMap<i32, usize>,
}

/// Insertion-ordered tally keyed by label.
struct Tally<'a, T> {
    index: HashMap<&'a str, usize>,
    rows: Vec<(&'a str, T)>,
}

impl<'a, T: Default> Tally<'a, T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }

    fn slot(&mut self, key: &'a str) -> &mut T {
        let rows = &mut self.rows;
        let i = *self.index.entry(key).or_insert_with(|| {
            rows.push((key, T::default()));
            rows.len() - 1
        });
        &mut self.rows[i].1
    }
}

#[derive(Default)]
struct AuthorAcc {
    books: usize,
    pages: u64,
}

#[derive(Default)]
struct NationalityAcc<'a> {
    books: usize,
    authors: BTreeSet<&'a str>,
}

#[derive(Default)]
struct GenreAcc {
    books: usize,
    pages: u64,
}

/// Tally `records`. Every record counts, including academic/reference reads.
pub fn compute(records: &[ReadingRecord], top_n: usize) -> LibraryStats {
    let mut authors: Tally<AuthorAcc> = Tally::new();
    let mut nations: Tally<NationalityAcc> = Tally::new();
    let mut genres: Tally<GenreAcc> = Tally::new();
    let mut collections: Tally<usize> = Tally::new();
    let mut kinds = KindCounts::default();
    let mut ratings = RatingDistribution::default();
    let mut books_per_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut total_pages: u64 = 0;

    for r in records {
        let pages = u64::from(r.pages);
        total_pages += pages;
        let author = label(&r.author);

        let a = authors.slot(author);
        a.books += 1;
        a.pages += pages;

        let n = nations.slot(label(&r.nationality));
        n.books += 1;
        n.authors.insert(author);

        let g = genres.slot(label(&r.genre));
        g.books += 1;
        g.pages += pages;

        if let Some(c) = r.collection.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            *collections.slot(c) += 1;
        }

        match r.reading_kind {
            ReadingKind::Complete => kinds.complete += 1,
            ReadingKind::Academic => kinds.academic += 1,
            ReadingKind::Reference => kinds.reference += 1,
        }

        ratings.0[r.valid_rating().map_or(0, usize::from)] += 1;

        if let Some(d) = r.completed_date {
            *books_per_year.entry(d.year()).or_insert(0) += 1;
        }
    }

    let total_books = records.len();
    let avg_pages = if total_books > 0 {
        total_pages as f64 / total_books as f64
    } else {
        0.0
    };

    let author_rows: Vec<AuthorTally> = authors
        .rows
        .iter()
        .map(|(k, a)| AuthorTally {
            author: k.to_string(),
            books: a.books,
            pages: a.pages,
        })
        .collect();

    // `sort_by` is stable: equal counts keep first-seen order.
    let mut top_authors_by_books = author_rows.clone();
    top_authors_by_books.sort_by(|a, b| b.books.cmp(&a.books));
    top_authors_by_books.truncate(top_n);

    let mut top_authors_by_pages = author_rows;
    top_authors_by_pages.sort_by(|a, b| b.pages.cmp(&a.pages));
    top_authors_by_pages.truncate(top_n);

    let mut nationalities: Vec<NationalityTally> = nations
        .rows
        .into_iter()
        .map(|(k, n)| NationalityTally {
            nationality: k.to_string(),
            books: n.books,
            unique_authors: n.authors.len(),
        })
        .collect();
    nationalities.sort_by(|a, b| b.books.cmp(&a.books));

    let mut genre_rows: Vec<GenreTally> = genres
        .rows
        .into_iter()
        .map(|(k, g)| GenreTally {
            genre: k.to_string(),
            books: g.books,
            pages: g.pages,
        })
        .collect();
    genre_rows.sort_by(|a, b| b.books.cmp(&a.books));

    let mut collection_rows: Vec<CollectionTally> = collections
        .rows
        .into_iter()
        .map(|(k, books)| CollectionTally {
            collection: k.to_string(),
            books,
        })
        .collect();
    collection_rows.sort_by(|a, b| b.books.cmp(&a.books));

    LibraryStats {
        total_books,
        total_pages,
        unique_authors: authors.index.len(),
        avg_pages,
        top_authors_by_books,
        top_authors_by_pages,
        nationalities,
        genres: genre_rows,
        collections: collection_rows,
        kinds,
        ratings,
        books_per_year,
    }
}
