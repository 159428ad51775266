use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Known naming variants between the pool data and the medals feed. Keys are
/// already-canonicalized strings; extend this table, not the merge logic.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("united states of america", "usa"),
    ("united states", "usa"),
    ("great britain", "great britain"),
    ("republic of korea", "south korea"),
    ("korea republic of", "south korea"),
    ("korea", "south korea"),
    ("democratic peoples republic of korea", "north korea"),
    ("united arab emirates", "uae"),
    ("czech republic", "czechia"),
    ("hong kong china", "hong kong"),
    ("bosnia and herzegovina", "bosnia and herzegovina"),
    ("trinidad and tobago", "trinidad and tobago"),
];

/// Canonical matching key for a free-form country name or code: lowercase,
/// decompose and drop diacritics, `&` becomes `and`, every other
/// non-alphanumeric run collapses to a single space. Total and idempotent;
/// unknown names come back canonicalized but unaliased.
pub fn normalize_country(value: &str) -> String {
    let folded: String = value
        .to_lowercase()
        .chars()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .replace('&', "and");

    let mut key = String::with_capacity(folded.len());
    let mut pending_space = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(c);
        } else {
            pending_space = true;
        }
    }

    match COUNTRY_ALIASES.iter().find(|(from, _)| *from == key) {
        Some((_, to)) => (*to).to_string(),
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korea_variants_collapse_to_one_key() {
        assert_eq!(normalize_country("Republic of Korea"), "south korea");
        assert_eq!(normalize_country("Korea, Republic of"), "south korea");
        assert_eq!(normalize_country("KOREA"), "south korea");
    }

    #[test]
    fn test_diacritics_and_punctuation() {
        assert_eq!(normalize_country("Côte d'Ivoire"), "cote d ivoire");
        assert_eq!(normalize_country("  São Tomé & Príncipe "), "sao tome and principe");
    }

    #[test]
    fn test_codes_normalize_too() {
        assert_eq!(normalize_country("USA"), "usa");
        assert_eq!(normalize_country("United States of America"), "usa");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["Côte d'Ivoire", "Republic of Korea", "Czech Republic", "Wakanda"] {
            let once = normalize_country(raw);
            assert_eq!(normalize_country(&once), once);
        }
    }

    #[test]
    fn test_unknown_name_passes_through_canonicalized() {
        assert_eq!(normalize_country("Wakanda"), "wakanda");
        assert_eq!(normalize_country("Czech Republic"), "czechia");
    }
}
