//! Small string helpers shared by the grouping and tallying code.

/// Label used when an author/genre/nationality is blank.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Trimmed label, or `Unknown` when blank. Grouping keys for flat entities and stats.
pub fn label(raw: &str) -> &str {
    let t = raw.trim();
    if t.is_empty() {
        UNKNOWN_LABEL
    } else {
        t
    }
}

/// Lowercase + collapse whitespace. Used for case-insensitive keys.
pub fn fold_key(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// "the lord of the rings" -> "The Lord Of The Rings".
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_labels_become_unknown() {
        assert_eq!(label("   "), UNKNOWN_LABEL);
        assert_eq!(label(" Spain "), "Spain");
    }

    #[test]
    fn fold_key_is_case_and_space_insensitive() {
        assert_eq!(fold_key("  The   Wheel of TIME "), "the wheel of time");
    }

    #[test]
    fn title_case_handles_unicode() {
        assert_eq!(title_case("el señor de los ANILLOS"), "El Señor De Los Anillos");
        assert_eq!(title_case("élan vital"), "Élan Vital");
    }
}
