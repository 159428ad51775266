use crate::domain::model::{AggregatedTeam, Entry, ScoredEntry};
use std::collections::HashMap;

/// Roll the flat entry list up into one team per member. Single pass;
/// teams come back in order of each member's first appearance so the
/// ranker's stable sort has a deterministic base order.
pub fn aggregate(entries: &[Entry]) -> Vec<AggregatedTeam> {
    let mut teams: Vec<AggregatedTeam> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let slot = *index.entry(entry.member.clone()).or_insert_with(|| {
            teams.push(AggregatedTeam::empty(entry.member.clone()));
            teams.len() - 1
        });

        let scored = ScoredEntry::new(entry.clone());
        let team = &mut teams[slot];
        team.draft_value += entry.draft_value;
        team.gold += entry.gold;
        team.silver += entry.silver;
        team.bronze += entry.bronze;
        team.total_points += scored.points;
        team.countries.push(scored);
    }

    teams
}
