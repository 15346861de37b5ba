//! Series name extraction: derive a candidate saga name from a book title.
//!
//! Patterns are independent (predicate + extractor) and tried in order; the first
//! one that yields a name wins. An explicit `collection` on the record short-circuits
//! all of them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::ReadingRecord;

/// "... (Series Name #3)" and friends.
static TRAILING_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((?P<inner>[^()]+)\)\s*$").expect("trailing paren regex"));

/// Volume marker at the end of a parenthetical: "#1", ", #1", "#1-3", "Book 2", "Vol. 3", "Volume 4".
static PAREN_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[\s,;:]*(?:#\s*\d+(?:\.\d+)?(?:\s*[-–]\s*\d+(?:\.\d+)?)?|\b(?:book|vol\.?|volume)\s*\d+(?:\s*[-–]\s*\d+)?)\s*$",
    )
    .expect("paren marker regex")
});

/// Separator after a series prefix: ": ", " — ", " – ", " - ".
static PREFIX_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[:–—-]\s+").expect("prefix separator regex"));

/// "Name, Vol. 3", "Name Vol 3", "Name Volume 3", "Name #3", "Name Book 3", "Name #1-3".
static TRAILING_VOLUME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<name>.+?)[\s,]*(?:#\s*\d+|\b(?:vol\.?|volume|book)\s*\d+)(?:\s*[-–]\s*\d+)?\s*$",
    )
    .expect("trailing volume regex")
});

const PREFIX_MIN_CHARS: usize = 3;
const PREFIX_MAX_CHARS: usize = 49;
const REST_MIN_CHARS: usize = 4;
// Names this short are noise ("(1)", "(US)").
const NAME_MIN_CHARS: usize = 3;

/// One title heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePattern {
    TrailingParenthetical,
    LeadingPrefix,
    TrailingVolume,
}

impl TitlePattern {
    /// Default precedence.
    pub const ALL: [TitlePattern; 3] = [
        TitlePattern::TrailingParenthetical,
        TitlePattern::LeadingPrefix,
        TitlePattern::TrailingVolume,
    ];

    pub fn apply(self, title: &str) -> Option<String> {
        match self {
            TitlePattern::TrailingParenthetical => trailing_parenthetical(title),
            TitlePattern::LeadingPrefix => leading_prefix(title),
            TitlePattern::TrailingVolume => trailing_volume(title),
        }
    }
}

/// Ordered list of title patterns.
#[derive(Debug, Clone)]
pub struct SeriesNameExtractor {
    patterns: Vec<TitlePattern>,
}

impl Default for SeriesNameExtractor {
    fn default() -> Self {
        Self {
            patterns: TitlePattern::ALL.to_vec(),
        }
    }
}

impl SeriesNameExtractor {
    pub fn with_patterns(patterns: Vec<TitlePattern>) -> Self {
        Self { patterns }
    }

    /// Series name for `record`, or `None` if it looks standalone.
    pub fn extract(&self, record: &ReadingRecord) -> Option<String> {
        if let Some(c) = record.collection.as_deref() {
            if !c.trim().is_empty() {
                return Some(c.to_string());
            }
        }
        self.extract_from_title(&record.title)
    }

    pub fn extract_from_title(&self, title: &str) -> Option<String> {
        let title = title.trim();
        self.patterns.iter().find_map(|p| p.apply(title))
    }
}

fn trailing_parenthetical(title: &str) -> Option<String> {
    let caps = TRAILING_PAREN.captures(title)?;
    let inner = caps.name("inner")?.as_str();
    let name = PAREN_MARKER.replace(inner, "");
    accept_name(&name)
}

/// Separators are tried left to right; the first one leaving a valid prefix and
/// tail wins, so "Re: Zero - Starting Life" yields "Re: Zero".
fn leading_prefix(title: &str) -> Option<String> {
    PREFIX_SEPARATOR.find_iter(title).find_map(|m| {
        let prefix = title[..m.start()].trim();
        let rest = title[m.end()..].trim();
        let n = prefix.chars().count();
        if !(PREFIX_MIN_CHARS..=PREFIX_MAX_CHARS).contains(&n) {
            return None;
        }
        if rest.chars().count() < REST_MIN_CHARS {
            return None;
        }
        Some(prefix.to_string())
    })
}

fn trailing_volume(title: &str) -> Option<String> {
    let caps = TRAILING_VOLUME.captures(title)?;
    accept_name(caps.name("name")?.as_str())
}

fn accept_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '-' | '\u{2013}' | '\u{2014}'))
        .trim();
    if name.chars().count() < NAME_MIN_CHARS {
        None
    } else {
        Some(name.to_string())
    }
}
