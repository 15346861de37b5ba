//! Pipeline entry: grouping → rankings → stats in one report.
//!
//! `Analyzer` recomputes everything on every call. `CachedAnalyzer` keeps the last
//! report and reuses it only when the SHA-256 digest of (records, genre table,
//! config) is unchanged, so a stale report is never returned.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use crate::config::AnalyticsConfig;
use crate::genre_weights::GenreWeightTable;
use crate::influence::{InfluenceScorer, Rankings};
use crate::record::ReadingRecord;
use crate::saga::{Grouping, SagaGrouper};
use crate::series::SeriesNameExtractor;
use crate::stats::{self, LibraryStats};

/// Everything the dashboard renders for one record collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryReport {
    pub grouping: Grouping,
    pub rankings: Rankings,
    pub stats: LibraryStats,
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyticsConfig,
    weights: GenreWeightTable,
    grouper: SagaGrouper,
}

impl Analyzer {
    pub fn new(config: AnalyticsConfig, weights: GenreWeightTable) -> Self {
        let grouper = SagaGrouper::new(SeriesNameExtractor::default(), config.excluded_kinds.clone());
        Self {
            config,
            weights,
            grouper,
        }
    }

    /// Config-driven construction: loads the genre table the config names.
    pub fn from_config(config: AnalyticsConfig) -> Self {
        let weights = config.genre_table();
        Self::new(config, weights)
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn weights(&self) -> &GenreWeightTable {
        &self.weights
    }

    pub fn group(&self, records: &[ReadingRecord]) -> Grouping {
        self.grouper.group(records, &self.weights)
    }

    pub fn scorer(&self) -> InfluenceScorer<'_> {
        InfluenceScorer::new(&self.weights, &self.config.excluded_kinds)
    }

    pub fn analyze(&self, records: &[ReadingRecord]) -> LibraryReport {
        let grouping = self.group(records);
        let rankings = self.scorer().rank_all(records, &grouping.sagas);
        let stats = stats::compute(records, self.config.top_n);

        if tracing::enabled!(target: "readlog", tracing::Level::DEBUG) {
            debug!(
                target: "readlog",
                input = %content_id(&self.digest(records)),
                records = records.len(),
                sagas = grouping.sagas.len(),
                standalone = grouping.standalone.len(),
                excluded = grouping.excluded.len(),
                authors = rankings.authors.len(),
                "library analyzed"
            );
        }

        LibraryReport {
            grouping,
            rankings,
            stats,
        }
    }

    /// Content digest over everything the report depends on.
    pub fn digest(&self, records: &[ReadingRecord]) -> [u8; 32] {
        let mut h = Sha256::new();
        // Serialization of plain data structs cannot fail; fall back to Debug just in case.
        match serde_json::to_vec(records) {
            Ok(bytes) => h.update(&bytes),
            Err(_) => h.update(format!("{records:?}").as_bytes()),
        }
        h.update([0u8]);
        for (k, w) in self.weights.entries() {
            h.update(k.as_bytes());
            h.update(w.to_le_bytes());
        }
        h.update([0u8]);
        h.update(self.config.top_n.to_le_bytes());
        h.update(format!("{:?}", self.config.excluded_kinds).as_bytes());
        h.finalize().into()
    }
}

/// Short hex id for logs (first 6 bytes of the digest).
pub fn content_id(digest: &[u8; 32]) -> String {
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Memoizing wrapper around [`Analyzer`].
#[derive(Debug)]
pub struct CachedAnalyzer {
    analyzer: Analyzer,
    inner: RwLock<Option<CacheEntry>>,
}

#[derive(Debug)]
struct CacheEntry {
    digest: [u8; 32],
    report: Arc<LibraryReport>,
}

impl CachedAnalyzer {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            inner: RwLock::new(None),
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Report for `records`, recomputed only when their content changed.
    pub fn analyze(&self, records: &[ReadingRecord]) -> Arc<LibraryReport> {
        let digest = self.analyzer.digest(records);

        // Fast path under the read lock.
        {
            let guard = self.inner.read().expect("report cache lock poisoned");
            if let Some(entry) = guard.as_ref().filter(|e| e.digest == digest) {
                debug!(target: "readlog", input = %content_id(&digest), "report cache hit");
                return Arc::clone(&entry.report);
            }
        }

        let report = Arc::new(self.analyzer.analyze(records));
        let mut guard = self.inner.write().expect("report cache lock poisoned");
        *guard = Some(CacheEntry {
            digest,
            report: Arc::clone(&report),
        });
        info!(target: "readlog", input = %content_id(&digest), "report recomputed");
        report
    }

    pub fn invalidate(&self) {
        *self.inner.write().expect("report cache lock poisoned") = None;
    }
}
