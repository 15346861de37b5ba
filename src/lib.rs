// src/lib.rs
// Public library surface for the reading-log analytics core.

pub mod analysis;
pub mod config;
pub mod genre_weights;
pub mod influence;
pub mod record;
pub mod saga;
pub mod series;
pub mod stats;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::analysis::{Analyzer, CachedAnalyzer, LibraryReport};
pub use crate::config::AnalyticsConfig;
pub use crate::genre_weights::GenreWeightTable;
pub use crate::influence::{InfluenceScore, InfluenceScorer, Rankings};
pub use crate::record::{ReadingKind, ReadingRecord};
pub use crate::saga::{Grouping, Saga, SagaGrouper};
pub use crate::series::{SeriesNameExtractor, TitlePattern};
pub use crate::stats::LibraryStats;
