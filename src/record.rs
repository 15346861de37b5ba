//! # Reading records
//! Input shape consumed by the analytics core. Records arrive already validated
//! by the import/persistence layer: non-empty `title`/`author`, positive `pages`.
//!
//! Field names follow the JSON produced by the surrounding app (camelCase).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a book was read. Only `Complete` reads take part in saga grouping and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    #[default]
    Complete,
    Academic,
    Reference,
}

/// One finished (or consulted) book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub pages: u32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub nationality: String,
    /// 1..=5; anything else counts as unrated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub reading_kind: ReadingKind,
    /// Explicit series tag set by the user; wins over title heuristics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl ReadingRecord {
    /// Minimal complete read; optional fields can be filled with the builder helpers.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        pages: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            pages,
            genre: String::new(),
            nationality: String::new(),
            rating: None,
            year_published: None,
            completed_date: None,
            reading_kind: ReadingKind::Complete,
            collection: None,
            favorite: false,
        }
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = nationality.into();
        self
    }

    pub fn rated(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn published(mut self, year: i32) -> Self {
        self.year_published = Some(year);
        self
    }

    pub fn completed(mut self, date: NaiveDate) -> Self {
        self.completed_date = Some(date);
        self
    }

    pub fn kind(mut self, kind: ReadingKind) -> Self {
        self.reading_kind = kind;
        self
    }

    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn favorited(mut self) -> Self {
        self.favorite = true;
        self
    }

    /// Rating if it lies in the valid 1..=5 range.
    pub fn valid_rating(&self) -> Option<u8> {
        self.rating.filter(|r| (1..=5).contains(r))
    }
}

/// Mean over valid ratings only; 0.0 when nothing is rated.
pub fn average_rating<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ReadingRecord>,
{
    let (sum, n) = records
        .into_iter()
        .filter_map(ReadingRecord::valid_rating)
        .fold((0u32, 0u32), |(s, n), r| (s + u32::from(r), n + 1));
    if n == 0 {
        0.0
    } else {
        f64::from(sum) / f64::from(n)
    }
}
