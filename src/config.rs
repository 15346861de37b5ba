// src/config.rs
//! Analytics configuration (TOML).
//!
//! ```toml
//! [analytics]
//! top_n = 20
//! excluded_kinds = ["academic", "reference"]
//! genre_weights_path = "genre_weights.json"   # relative to this file
//! ```
//!
//! Lookup: $READLOG_CONFIG_PATH → config/readlog.toml → built-in defaults.
//! $READLOG_TOP_N overrides `top_n`.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::genre_weights::GenreWeightTable;
use crate::record::ReadingKind;
use crate::stats::DEFAULT_TOP_N;

pub const DEFAULT_CONFIG_PATH: &str = "config/readlog.toml";
pub const ENV_CONFIG_PATH: &str = "READLOG_CONFIG_PATH";
pub const ENV_TOP_N: &str = "READLOG_TOP_N";

const TOP_N_MAX: usize = 500;

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigRoot {
    #[serde(default)]
    analytics: AnalyticsConfig,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_excluded_kinds() -> Vec<ReadingKind> {
    vec![ReadingKind::Academic, ReadingKind::Reference]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Rows kept in the "top authors" lists.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Reading kinds left out of saga grouping and influence scoring.
    #[serde(default = "default_excluded_kinds")]
    pub excluded_kinds: Vec<ReadingKind>,
    /// JSON genre weight table; built-in seed when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_weights_path: Option<PathBuf>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            excluded_kinds: default_excluded_kinds(),
            genre_weights_path: None,
        }
    }
}

impl AnalyticsConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let root: ConfigRoot = toml::from_str(s).context("parsing analytics config")?;
        Ok(root.analytics.sanitized())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analytics config from {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&content)
            .with_context(|| format!("in {}", path.display()))?;
        // Relative weight paths are resolved against the config file's folder.
        if let (Some(p), Some(dir)) = (cfg.genre_weights_path.as_mut(), path.parent()) {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        }
        Ok(cfg)
    }

    /// Env var path → default path → defaults; then env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path {}", pb.display()));
            }
            Self::load_from(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::load_from(&default)?
            } else {
                debug!(target: "readlog", "no config file, using defaults");
                Self::default()
            }
        };

        if let Some(n) = parse_top_n_env(std::env::var(ENV_TOP_N).ok()) {
            cfg.top_n = n;
        }

        info!(
            target: "readlog",
            top_n = cfg.top_n,
            excluded = ?cfg.excluded_kinds,
            weights = ?cfg.genre_weights_path,
            "analytics config loaded"
        );
        Ok(cfg)
    }

    /// Genre table named by the config, or the built-in seed.
    pub fn genre_table(&self) -> GenreWeightTable {
        match &self.genre_weights_path {
            Some(p) => GenreWeightTable::load_from_file(p),
            None => GenreWeightTable::default_seed(),
        }
    }

    fn sanitized(mut self) -> Self {
        self.top_n = self.top_n.clamp(1, TOP_N_MAX);
        let mut seen = Vec::with_capacity(self.excluded_kinds.len());
        self.excluded_kinds.retain(|k| {
            if seen.contains(k) {
                false
            } else {
                seen.push(*k);
                true
            }
        });
        self
    }
}

fn parse_top_n_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .map(|v| v.clamp(1, TOP_N_MAX))
}
