use crate::core::scoring;
use crate::utils::error::{PoolError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One (member, country) record of the pool. A member may own several
/// countries; each country appears on exactly one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub member: String,
    pub country: String,
    #[serde(default)]
    pub draft_value: f64,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub silver: u32,
    #[serde(default)]
    pub bronze: u32,
}

impl Entry {
    pub fn points(&self) -> u32 {
        scoring::points(self.gold, self.silver, self.bronze)
    }
}

/// Entry plus its derived point total. Points are always recomputed from the
/// medal counts, never stored in the pool file.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub entry: Entry,
    pub points: u32,
}

impl ScoredEntry {
    pub fn new(entry: Entry) -> Self {
        let points = entry.points();
        Self { entry, points }
    }

    /// Points per unit of draft cost. A zero draft value maps to 0.0,
    /// never NaN or infinity.
    pub fn ratio(&self) -> f64 {
        if self.entry.draft_value > 0.0 {
            self.points as f64 / self.entry.draft_value
        } else {
            0.0
        }
    }
}

/// Per-member rollup of all of that member's entries. Rebuilt from scratch
/// on every render; never mutated in place.
#[derive(Debug, Clone)]
pub struct AggregatedTeam {
    pub member: String,
    pub countries: Vec<ScoredEntry>,
    pub draft_value: f64,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total_points: u32,
}

impl AggregatedTeam {
    pub fn empty(member: String) -> Self {
        Self {
            member,
            countries: Vec::new(),
            draft_value: 0.0,
            gold: 0,
            silver: 0,
            bronze: 0,
            total_points: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortKey {
    Country,
    Value,
    Gold,
    Silver,
    Bronze,
    Points,
    Ratio,
}

impl SortKey {
    /// Natural direction when a column is first selected: names read A→Z,
    /// every numeric column starts with the biggest value on top.
    pub fn default_dir(self) -> SortDir {
        match self {
            SortKey::Country => SortDir::Asc,
            _ => SortDir::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flipped(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// Active sort column and direction for one member's country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for SortDirective {
    fn default() -> Self {
        Self {
            key: SortKey::Points,
            dir: SortDir::Desc,
        }
    }
}

impl SortDirective {
    pub fn new(key: SortKey, dir: SortDir) -> Self {
        Self { key, dir }
    }

    /// Header-click semantics: clicking the active column flips its
    /// direction, clicking another column selects it at its default
    /// direction.
    pub fn clicked(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                dir: self.dir.flipped(),
            }
        } else {
            Self {
                key,
                dir: key.default_dir(),
            }
        }
    }
}

/// Per-member sort state, keyed by member name. Owned by the presenter and
/// passed into the ranker so the ranker itself stays pure.
pub type SortMap = HashMap<String, SortDirective>;

/// Whether the pool file was a bare entry array or an object wrapping the
/// array. Writes mirror whichever shape was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotShape {
    Bare,
    Tagged,
}

/// The full local dataset for one refresh cycle. Replaced wholesale on
/// reload; readers never observe a half-updated pool.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub updated_at: Option<String>,
    pub teams: Vec<Entry>,
    pub shape: SnapshotShape,
}

impl PoolSnapshot {
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self {
                updated_at: None,
                teams: parse_entries(Value::Array(items))?,
                shape: SnapshotShape::Bare,
            }),
            Value::Object(map) => {
                let teams = map.get("teams").cloned().ok_or_else(|| PoolError::LoadError {
                    message: "pool data must be an array or include a teams array".to_string(),
                })?;
                if !teams.is_array() {
                    return Err(PoolError::LoadError {
                        message: "pool teams field is not an array".to_string(),
                    });
                }
                Ok(Self {
                    updated_at: map
                        .get("updatedAt")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    teams: parse_entries(teams)?,
                    shape: SnapshotShape::Tagged,
                })
            }
            _ => Err(PoolError::LoadError {
                message: "pool data must be an array or include a teams array".to_string(),
            }),
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        let teams = serde_json::to_value(&self.teams)?;
        match self.shape {
            SnapshotShape::Bare => Ok(teams),
            SnapshotShape::Tagged => Ok(serde_json::json!({
                "updatedAt": self.updated_at,
                "teams": teams,
            })),
        }
    }

    /// Boundary check run by the loaders. The pure core assumes these
    /// invariants and never re-validates.
    pub fn validate(&self) -> Result<()> {
        for (index, entry) in self.teams.iter().enumerate() {
            if entry.member.trim().is_empty() {
                return Err(PoolError::LoadError {
                    message: format!("pool entry {} has an empty member", index),
                });
            }
            if entry.country.trim().is_empty() {
                return Err(PoolError::LoadError {
                    message: format!("pool entry {} has an empty country", index),
                });
            }
            if !entry.draft_value.is_finite() || entry.draft_value < 0.0 {
                return Err(PoolError::LoadError {
                    message: format!(
                        "pool entry {} has an invalid draft value: {}",
                        index, entry.draft_value
                    ),
                });
            }
        }
        Ok(())
    }
}

fn parse_entries(value: Value) -> Result<Vec<Entry>> {
    serde_json::from_value(value).map_err(|e| PoolError::LoadError {
        message: format!("invalid pool entry: {}", e),
    })
}

/// One row of the external medal table, kept as raw JSON so field-name
/// variants between feed versions can be resolved by priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedalRow {
    #[serde(flatten)]
    pub data: HashMap<String, Value>,
}

impl MedalRow {
    /// Resolve a logical field through an ordered list of accepted names.
    /// The first present, non-null name wins.
    pub fn field(&self, names: &[&str]) -> Option<&Value> {
        names
            .iter()
            .filter_map(|name| self.data.get(*name))
            .find(|value| !value.is_null())
    }
}

/// Output of the standings transform: ranked teams plus the rendered
/// projections written by the load step.
#[derive(Debug, Clone)]
pub struct StandingsResult {
    pub teams: Vec<AggregatedTeam>,
    pub updated_at: Option<String>,
    pub html_output: String,
    pub text_output: String,
    pub csv_output: String,
}

/// Output of the reconcile transform: the rewritten snapshot plus every
/// local country that had no row in the medal table.
#[derive(Debug, Clone)]
pub struct MergedPool {
    pub snapshot: PoolSnapshot,
    pub missing_countries: Vec<String>,
}
