use crate::core::normalize::normalize_country;
use crate::domain::model::{Entry, MedalRow};
use serde_json::Value;
use std::collections::HashMap;

// Accepted field names per logical field, in priority order. The medals
// feed has shipped both spellings.
pub const NAME_FIELDS: &[&str] = &["countryName"];
pub const CODE_FIELDS: &[&str] = &["countryCode"];
pub const GOLD_FIELDS: &[&str] = &["gold", "goldTotal"];
pub const SILVER_FIELDS: &[&str] = &["silver", "silverTotal"];
pub const BRONZE_FIELDS: &[&str] = &["bronze", "bronzeTotal"];

/// Medal counts arrive as numbers or as strings with stray formatting.
/// Keep the digits, drop everything else, default to zero.
pub fn parse_medal_count(value: &Value) -> u32 {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Index the external rows by canonical key. Both the country name and the
/// country code map to the same row, so a local entry matches if either
/// form lines up.
pub fn build_medal_lookup(rows: &[MedalRow]) -> HashMap<String, usize> {
    let mut lookup = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        for fields in [NAME_FIELDS, CODE_FIELDS] {
            if let Some(raw) = row.field(fields).and_then(Value::as_str) {
                if !raw.is_empty() {
                    lookup.insert(normalize_country(raw), index);
                }
            }
        }
    }
    lookup
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub teams: Vec<Entry>,
    /// Original (non-normalized) country strings with no external row,
    /// in order of first occurrence.
    pub missing: Vec<String>,
}

/// Replace every local entry's medal counts with the external totals.
/// Full overwrite: an entry whose country has no external row is zeroed
/// and reported, never silently kept.
pub fn merge_medals(teams: &[Entry], rows: &[MedalRow]) -> MergeOutcome {
    let lookup = build_medal_lookup(rows);
    let mut missing: Vec<String> = Vec::new();

    let merged = teams
        .iter()
        .map(|entry| {
            let key = normalize_country(&entry.country);
            match lookup.get(&key).map(|&index| &rows[index]) {
                Some(row) => Entry {
                    gold: medal_count(row, GOLD_FIELDS),
                    silver: medal_count(row, SILVER_FIELDS),
                    bronze: medal_count(row, BRONZE_FIELDS),
                    ..entry.clone()
                },
                None => {
                    if !missing.iter().any(|c| c == &entry.country) {
                        missing.push(entry.country.clone());
                    }
                    Entry {
                        gold: 0,
                        silver: 0,
                        bronze: 0,
                        ..entry.clone()
                    }
                }
            }
        })
        .collect();

    MergeOutcome {
        teams: merged,
        missing,
    }
}

fn medal_count(row: &MedalRow, fields: &[&str]) -> u32 {
    row.field(fields).map(parse_medal_count).unwrap_or(0)
}
