use crate::domain::model::{AggregatedTeam, ScoredEntry, SortDir, SortDirective, SortKey, SortMap};
use std::cmp::Ordering;

/// Top-level standings order: total points descending. `sort_by` is stable,
/// so members on equal points keep their first-appearance order and the
/// table never flickers between re-renders.
pub fn rank_teams(teams: &mut [AggregatedTeam]) {
    teams.sort_by(|a, b| b.total_points.cmp(&a.total_points));
}

/// Order one member's countries by the active directive. The primary key is
/// direction-adjusted; the tie-break for each key is fixed and never
/// reversed by the direction.
pub fn sort_countries(countries: &mut [ScoredEntry], directive: SortDirective) {
    countries.sort_by(|a, b| {
        let primary = primary_cmp(a, b, directive.key);
        let primary = match directive.dir {
            SortDir::Asc => primary,
            SortDir::Desc => primary.reverse(),
        };
        primary.then_with(|| tie_break(a, b, directive.key))
    });
}

/// Apply each member's directive from the presenter-owned sort map.
/// Members without a recorded directive fall back to points descending.
pub fn sort_team_countries(teams: &mut [AggregatedTeam], directives: &SortMap) {
    for team in teams.iter_mut() {
        let directive = directives.get(&team.member).copied().unwrap_or_default();
        sort_countries(&mut team.countries, directive);
    }
}

fn name_key(entry: &ScoredEntry) -> String {
    entry.entry.country.to_lowercase()
}

fn primary_cmp(a: &ScoredEntry, b: &ScoredEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Country => name_key(a).cmp(&name_key(b)),
        SortKey::Value => a.entry.draft_value.total_cmp(&b.entry.draft_value),
        SortKey::Gold => a.entry.gold.cmp(&b.entry.gold),
        SortKey::Silver => a.entry.silver.cmp(&b.entry.silver),
        SortKey::Bronze => a.entry.bronze.cmp(&b.entry.bronze),
        SortKey::Points => a.points.cmp(&b.points),
        SortKey::Ratio => a.ratio().total_cmp(&b.ratio()),
    }
}

fn tie_break(a: &ScoredEntry, b: &ScoredEntry, key: SortKey) -> Ordering {
    match key {
        // Equal names: higher points first, then higher draft value.
        SortKey::Country => b
            .points
            .cmp(&a.points)
            .then_with(|| b.entry.draft_value.total_cmp(&a.entry.draft_value)),
        // Numeric ties read A→Z.
        _ => name_key(a).cmp(&name_key(b)),
    }
}
