// tests/determinism.rs
// Same input, same output: grouping, rankings and stats must be identical
// across repeated runs (compared through their JSON form).

use rand::{rngs::StdRng, Rng, SeedableRng};
use readlog_influence::{Analyzer, AnalyticsConfig, GenreWeightTable, ReadingRecord};

fn library(seed: u64) -> Vec<ReadingRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let series = ["Discworld", "Earthsea", "The Expanse", "Foundation"];
    let authors = ["Pratchett", "Le Guin", "Corey", "Asimov"];
    (0..120)
        .map(|i| {
            let k = rng.random_range(0..series.len());
            let title = if rng.random_bool(0.7) {
                format!("Volume {i} ({} #{})", series[k], rng.random_range(1..20))
            } else {
                format!("Standalone {i}")
            };
            let mut r = ReadingRecord::new(format!("b{i}"), title, authors[k], rng.random_range(50..900))
                .genre(["Fantasy", "Science Fiction", "Humor"][rng.random_range(0..3)]);
            if rng.random_bool(0.5) {
                r = r.published(rng.random_range(1950..2024));
            }
            r
        })
        .collect()
}

#[test]
fn repeated_runs_are_byte_identical() {
    let analyzer = Analyzer::new(AnalyticsConfig::default(), GenreWeightTable::default_seed());
    let records = library(2026);
    let first = serde_json::to_string(&analyzer.analyze(&records)).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&analyzer.analyze(&records)).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn fresh_analyzers_agree() {
    let records = library(99);
    let a = Analyzer::new(AnalyticsConfig::default(), GenreWeightTable::default_seed());
    let b = Analyzer::new(AnalyticsConfig::default(), GenreWeightTable::default_seed());
    assert_eq!(a.analyze(&records), b.analyze(&records));
    assert_eq!(a.digest(&records), b.digest(&records));
}
