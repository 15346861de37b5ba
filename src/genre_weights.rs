//! # Genre Weights
//!
//! Maps a free-text genre label to a page multiplier reflecting how dense the
//! reading usually is. Tiers run from 1.5 (philosophy, classics, history, essays)
//! down to 0.8 (romance, YA, self-help, comedy); general fiction sits at 1.0.
//!
//! - Loads from JSON (`{"weights": {"Philosophy": 1.5, ...}}`) or the built-in seed.
//! - Resolution order: exact key → case-insensitive key → substring either way → 1.0.
//! - Substring candidates are tried longest key first, then alphabetically, so
//!   "Maya history" resolves through "history" rather than "ya".
//! - Every weight handed out lies in `[0.8, 1.5]`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, collections::HashMap, fs, path::Path};
use tracing::warn;

use crate::text::fold_key;

pub const DEFAULT_GENRE_WEIGHT: f64 = 1.0;
pub const MIN_GENRE_WEIGHT: f64 = 0.8;
pub const MAX_GENRE_WEIGHT: f64 = 1.5;

/// On-disk shape of a genre weight file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreWeightsConfig {
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    key: String,
    folded: String,
    weight: f64,
}

/// Immutable lookup table. Build once, pass by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreWeightTable {
    exact: HashMap<String, f64>,
    // Deterministic probe order for the fuzzy steps.
    ordered: Vec<Entry>,
}

impl Default for GenreWeightTable {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl GenreWeightTable {
    pub fn from_config(cfg: GenreWeightsConfig) -> Self {
        let mut ordered: Vec<Entry> = cfg
            .weights
            .into_iter()
            .filter(|(k, _)| !k.trim().is_empty())
            .map(|(key, w)| Entry {
                folded: fold_key(&key),
                weight: clamp_tier(w),
                key,
            })
            .collect();
        ordered.sort_by(|a, b| {
            b.folded
                .chars()
                .count()
                .cmp(&a.folded.chars().count())
                .then_with(|| a.folded.cmp(&b.folded))
                .then_with(|| a.key.cmp(&b.key))
        });
        let exact = ordered.iter().map(|e| (e.key.clone(), e.weight)).collect();
        Self { exact, ordered }
    }

    /// Strict loader: I/O or JSON errors are reported.
    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading genre weights from {}", path.display()))?;
        let cfg: GenreWeightsConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing genre weights in {}", path.display()))?;
        Ok(Self::from_config(cfg))
    }

    /// Lenient loader: falls back to `default_seed()` on any error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(t) => t,
            Err(e) => {
                warn!(target: "readlog", error = %e, "genre weights unavailable, using built-in table");
                Self::default_seed()
            }
        }
    }

    /// Multiplier for `genre`. Total: unknown or blank labels get 1.0.
    pub fn weight_of(&self, genre: &str) -> f64 {
        // 1) Exact, case-sensitive.
        if let Some(&w) = self.exact.get(genre) {
            return w;
        }

        let g = fold_key(genre);
        if g.is_empty() {
            return DEFAULT_GENRE_WEIGHT;
        }

        // 2) Case-insensitive exact.
        if let Some(e) = self.ordered.iter().find(|e| e.folded == g) {
            return e.weight;
        }

        // 3) Substring in either direction.
        if let Some(e) = self
            .ordered
            .iter()
            .find(|e| g.contains(e.folded.as_str()) || e.folded.contains(g.as_str()))
        {
            return e.weight;
        }

        // 4) Default.
        DEFAULT_GENRE_WEIGHT
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// `(key, weight)` in probe order. Used for content fingerprints.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ordered.iter().map(|e| (e.key.as_str(), e.weight))
    }

    /// Built-in five-tier table.
    pub fn default_seed() -> Self {
        let mut weights = BTreeMap::new();
        for (k, v) in [
            // 1.5
            ("Philosophy", 1.5),
            ("Classics", 1.5),
            ("Classic", 1.5),
            ("History", 1.5),
            ("Essays", 1.5),
            ("Essay", 1.5),
            // 1.3
            ("Literary Fiction", 1.3),
            ("Science", 1.3),
            ("Poetry", 1.3),
            ("Psychology", 1.3),
            ("Anthropology", 1.3),
            ("Biography", 1.3),
            // 1.2
            ("Science Fiction", 1.2),
            ("Historical Fiction", 1.2),
            ("Nonfiction", 1.2),
            ("Non-Fiction", 1.2),
            ("Politics", 1.2),
            ("Economics", 1.2),
            ("Memoir", 1.2),
            ("Drama", 1.2),
            // 1.0
            ("Fiction", 1.0),
            ("Fantasy", 1.0),
            ("Mystery", 1.0),
            ("Thriller", 1.0),
            ("Horror", 1.0),
            ("Crime", 1.0),
            ("Adventure", 1.0),
            ("Short Stories", 1.0),
            ("Graphic Novel", 1.0),
            // 0.8
            ("Romance", 0.8),
            ("Young Adult", 0.8),
            ("YA", 0.8),
            ("Self-Help", 0.8),
            ("Comedy", 0.8),
            ("Humor", 0.8),
        ] {
            weights.insert(k.to_string(), v);
        }
        Self::from_config(GenreWeightsConfig { weights })
    }
}

fn clamp_tier(w: f64) -> f64 {
    if w.is_finite() {
        w.clamp(MIN_GENRE_WEIGHT, MAX_GENRE_WEIGHT)
    } else {
        DEFAULT_GENRE_WEIGHT
    }
}
