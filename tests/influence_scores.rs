// tests/influence_scores.rs
// Scoring examples and properties. The synthetic part uses a seeded RNG so runs
// are reproducible.

use rand::{rngs::StdRng, Rng, SeedableRng};
use readlog_influence::influence::{normalize_raw, Bonuses};
use readlog_influence::{
    GenreWeightTable, InfluenceScorer, ReadingKind, ReadingRecord, SagaGrouper,
};

const EXCLUDED: [ReadingKind; 2] = [ReadingKind::Academic, ReadingKind::Reference];

#[test]
fn saga_example_scores_660() {
    let t = GenreWeightTable::default_seed();
    let rs = vec![
        ReadingRecord::new("1", "First", "X", 300).genre("Fiction").in_collection("Y"),
        ReadingRecord::new("2", "Second", "X", 300).genre("Fiction").in_collection("Y"),
    ];
    let g = SagaGrouper::default().group(&rs, &t);
    let s = InfluenceScorer::new(&t, &EXCLUDED).score_saga(&g.sagas[0]);
    assert!((s.raw_score - 660.0).abs() < 1e-6, "raw {}", s.raw_score);
    assert_eq!(s.id, "y|x");
    match s.breakdown.bonuses {
        Bonuses::Saga {
            completion_bonus,
            length_bonus,
        } => {
            assert!((completion_bonus - 1.1).abs() < 1e-9);
            assert!((length_bonus - 1.0).abs() < 1e-9);
        }
        other => panic!("expected saga bonuses, got {other:?}"),
    }
}

#[test]
fn normalization_example() {
    assert_eq!(normalize_raw(&[100.0, 50.0, 25.0]), vec![100, 50, 25]);
}

#[test]
fn ranked_output_is_sorted_desc() {
    let t = GenreWeightTable::default_seed();
    let rs = vec![
        ReadingRecord::new("1", "a", "Small", 100),
        ReadingRecord::new("2", "b", "Large", 1000),
        ReadingRecord::new("3", "c", "Medium", 500),
    ];
    let ranked = InfluenceScorer::new(&t, &EXCLUDED).rank_authors(&rs);
    let names: Vec<_> = ranked.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Large", "Medium", "Small"]);
    assert_eq!(ranked[0].normalized_score, 100);
    assert_eq!(ranked[1].normalized_score, 50);
    assert_eq!(ranked[2].normalized_score, 10);
}

#[test]
fn breakdown_reproduces_raw_score() {
    let t = GenreWeightTable::default_seed();
    let rs = vec![
        ReadingRecord::new("1", "a", "A", 321).genre("Poetry").rated(2),
        ReadingRecord::new("2", "b", "A", 123).genre("Horror").favorited(),
    ];
    for s in InfluenceScorer::new(&t, &EXCLUDED).rank_genres(&rs) {
        assert!((s.breakdown.raw_score() - s.raw_score).abs() < 1e-9);
    }
}

fn random_records(rng: &mut StdRng, n: usize) -> Vec<ReadingRecord> {
    let authors = ["Austen", "Borges", "Calvino", "Dostoevsky", "Eco"];
    let genres = ["Fiction", "Philosophy", "Romance", "Science Fiction", "Poetry", "Cooking"];
    let countries = ["UK", "Argentina", "Italy", "Russia", ""];
    (0..n)
        .map(|i| {
            let mut r = ReadingRecord::new(
                format!("r{i}"),
                format!("Title {i} (Series {} #{})", rng.random_range(0..4), i),
                authors[rng.random_range(0..authors.len())],
                rng.random_range(1..1500),
            )
            .genre(genres[rng.random_range(0..genres.len())])
            .nationality(countries[rng.random_range(0..countries.len())]);
            if rng.random_bool(0.6) {
                r = r.rated(rng.random_range(1..=5));
            }
            if rng.random_bool(0.1) {
                r = r.kind(ReadingKind::Academic);
            }
            r
        })
        .collect()
}

#[test]
fn normalization_bound_holds_for_random_batches() {
    let t = GenreWeightTable::default_seed();
    let mut rng = StdRng::seed_from_u64(0x5EED_2026);
    for _ in 0..50 {
        let n = rng.random_range(1..60);
        let rs = random_records(&mut rng, n);
        let scorer = InfluenceScorer::new(&t, &EXCLUDED);
        let g = SagaGrouper::default().group(&rs, &t);
        let batches = [
            scorer.rank_authors(&rs),
            scorer.rank_countries(&rs),
            scorer.rank_genres(&rs),
            scorer.rank_sagas(&g.sagas),
        ];
        for batch in batches.iter().filter(|b| !b.is_empty()) {
            assert_eq!(batch.iter().map(|s| s.normalized_score).max(), Some(100));
            assert!(batch.iter().all(|s| s.normalized_score <= 100 && s.raw_score >= 0.0));
            assert!(batch
                .windows(2)
                .all(|w| w[0].normalized_score >= w[1].normalized_score));
        }
        for s in &g.sagas {
            assert!(s.book_count >= 2);
        }
    }
}

#[test]
fn more_pages_never_lowers_raw_score() {
    let t = GenreWeightTable::default_seed();
    let scorer = InfluenceScorer::new(&t, &EXCLUDED);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let genre = ["Fiction", "History", "Romance"][rng.random_range(0..3)];
        let rating = rng.random_range(1..=5);
        let small = rng.random_range(1..1000);
        let big = small + rng.random_range(1..1000);
        let a = ReadingRecord::new("a", "a", "A", big).genre(genre).rated(rating);
        let b = ReadingRecord::new("b", "b", "B", small).genre(genre).rated(rating);
        assert!(scorer.score("A", &[&a]).raw_score >= scorer.score("B", &[&b]).raw_score);
    }
}

#[test]
fn weight_lookup_is_total_and_bounded() {
    let t = GenreWeightTable::default_seed();
    let mut rng = StdRng::seed_from_u64(7);
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz -ÉéñY".chars().collect();
    for _ in 0..500 {
        let len = rng.random_range(0..12);
        let s: String = (0..len)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect();
        let w = t.weight_of(&s);
        assert!((0.8..=1.5).contains(&w), "{s:?} -> {w}");
    }
}
