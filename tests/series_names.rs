// tests/series_names.rs
// Hand-picked titles for the series name heuristics.

use readlog_influence::{ReadingRecord, SeriesNameExtractor};

fn extract(title: &str) -> Option<String> {
    SeriesNameExtractor::default().extract(&ReadingRecord::new("t", title, "Anyone", 100))
}

#[test]
fn lord_of_the_rings_parenthetical() {
    assert_eq!(
        extract("The Fellowship of the Ring (The Lord of the Rings #1)").as_deref(),
        Some("The Lord of the Rings")
    );
}

#[test]
fn plain_title_is_standalone() {
    assert_eq!(extract("Dune"), None);
    assert_eq!(extract("One Hundred Years of Solitude"), None);
}

#[test]
fn parenthetical_beats_leading_prefix() {
    // Both patterns could fire; the trailing parenthetical comes first.
    assert_eq!(
        extract("Dune: Part One (Dune Chronicles #1)").as_deref(),
        Some("Dune Chronicles")
    );
}

#[test]
fn leading_prefix_beats_trailing_volume() {
    assert_eq!(extract("Berserk: The Black Swordsman, Vol. 1").as_deref(), Some("Berserk"));
}

#[test]
fn assorted_real_world_titles() {
    let cases = [
        ("A Game of Thrones (A Song of Ice and Fire, #1)", Some("A Song of Ice and Fire")),
        ("The Eye of the World (The Wheel of Time Book 1)", Some("The Wheel of Time")),
        ("Saga, Vol. 1", Some("Saga")),
        ("One Piece Volume 12", Some("One Piece")),
        ("Discworld \u{2014} Small Gods", Some("Discworld")),
        ("Catch-22", None),
        ("1984", None),
    ];
    for (title, want) in cases {
        assert_eq!(extract(title).as_deref(), want, "title: {title}");
    }
}
